//! Render-time data for templates
//!
//! This module defines [`TemplateValue`], the closed set of shapes a template
//! can be rendered against, and [`TemplateData`], a small builder that turns
//! plain string maps into that representation.
//!
//! # Shapes
//!
//! - `Null` - absent data, zero records
//! - `Text` - a scalar, seen as the implicit record `{ "value": text }`
//! - `Record` - one key to value mapping, one record
//! - `List` - a sequence of records rendered one after another
//!
//! # Conversions
//!
//! ```rust,ignore
//! use curly_template::TemplateValue;
//! use serde_json::json;
//!
//! let record: TemplateValue = [("name", "Alice")].into_iter().collect();
//! let from_json = TemplateValue::from(json!({"items": [{"name": "a"}, {"name": "b"}]}));
//! let from_struct = TemplateValue::from_serialize(&my_struct)?;
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Field name under which a non-record item is exposed to a template
pub const IMPLICIT_FIELD: &str = "value";

/// Data a template is rendered against
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum TemplateValue {
    #[default]
    Null,
    Text(String),
    Record(IndexMap<String, TemplateValue>),
    List(Vec<TemplateValue>),
}

impl TemplateValue {
    /// Normalize to the sequence of iteration units
    ///
    /// A list yields its items, `Null` yields nothing, and any other value is
    /// its own single unit.
    pub fn as_records(&self) -> &[TemplateValue] {
        match self {
            TemplateValue::List(items) => items,
            TemplateValue::Null => &[],
            other => std::slice::from_ref(other),
        }
    }

    /// The scalar text, if this is a scalar
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TemplateValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TemplateValue::Null)
    }

    /// Parse JSON text into a value
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)?;
        Ok(value.into())
    }

    /// Convert any serializable type into a value
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }
}

/// Read-only view of one iteration unit as a record
#[derive(Debug, Clone, Copy)]
pub(crate) enum RecordView<'a> {
    Fields(&'a IndexMap<String, TemplateValue>),
    Single(&'a TemplateValue),
    Empty,
}

impl<'a> RecordView<'a> {
    pub(crate) fn of(value: &'a TemplateValue) -> Self {
        match value {
            TemplateValue::Record(fields) => RecordView::Fields(fields),
            other => RecordView::Single(other),
        }
    }

    /// Look up a field. `None` means the key is absent, which is different
    /// from a key present with a `Null` value.
    pub(crate) fn get(&self, key: &str) -> Option<&'a TemplateValue> {
        match *self {
            RecordView::Fields(fields) => fields.get(key),
            RecordView::Single(value) if key == IMPLICIT_FIELD => Some(value),
            RecordView::Single(_) | RecordView::Empty => None,
        }
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<IndexMap<String, TemplateValue>> for TemplateValue {
    fn from(fields: IndexMap<String, TemplateValue>) -> Self {
        TemplateValue::Record(fields)
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        TemplateValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TemplateValue>> From<Option<T>> for TemplateValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TemplateValue::Null, Into::into)
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateValue
where
    K: Into<String>,
    V: Into<TemplateValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TemplateValue::Record(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<JsonValue> for TemplateValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => TemplateValue::Null,
            JsonValue::Bool(b) => TemplateValue::Text(b.to_string()),
            JsonValue::Number(n) => TemplateValue::Text(n.to_string()),
            JsonValue::String(s) => TemplateValue::Text(s),
            JsonValue::Array(items) => {
                TemplateValue::List(items.into_iter().map(Into::into).collect())
            }
            JsonValue::Object(fields) => TemplateValue::Record(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<&JsonValue> for TemplateValue {
    fn from(value: &JsonValue) -> Self {
        value.clone().into()
    }
}

/// Builder for render data made of plain string maps
///
/// Holds a list of top-level records. Inner template data is attached with
/// [`add_inner`](TemplateData::add_inner).
///
/// ```rust,ignore
/// let mut data = TemplateData::new();
/// data.add([("title", "Groceries")]);
/// data.add_inner("F", vec![
///     vec![("a", "b"), ("c", "d")],
///     vec![("a", "m"), ("c", "p")],
/// ]);
/// let rendered = template.render(&data.into_value())?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateData {
    records: Vec<IndexMap<String, TemplateValue>>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one top-level record
    pub fn add<I, K, V>(&mut self, record: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.records.push(to_record(record));
        self
    }

    /// Append several top-level records
    pub fn add_all<L, I, K, V>(&mut self, records: L) -> &mut Self
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.records.extend(records.into_iter().map(to_record));
        self
    }

    /// Attach `records` under `key` to every top-level record, creating an
    /// empty top-level record first if there is none yet
    pub fn add_inner<L, I, K, V>(&mut self, key: &str, records: L) -> &mut Self
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if self.records.is_empty() {
            self.records.push(IndexMap::new());
        }
        let inner = TemplateValue::List(
            records
                .into_iter()
                .map(|r| TemplateValue::Record(to_record(r)))
                .collect(),
        );
        for record in &mut self.records {
            record.insert(key.to_string(), inner.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_value(self) -> TemplateValue {
        self.into()
    }
}

impl From<TemplateData> for TemplateValue {
    fn from(data: TemplateData) -> Self {
        TemplateValue::List(data.records.into_iter().map(TemplateValue::Record).collect())
    }
}

fn to_record<I, K, V>(record: I) -> IndexMap<String, TemplateValue>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    record
        .into_iter()
        .map(|(k, v)| (k.into(), TemplateValue::Text(v.into())))
        .collect()
}
