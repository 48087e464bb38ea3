//! Inner template registration and indentation variants
//!
//! Registering a template under a key stores a private copy of it in the
//! registering processor and re-derives every indentation variant in the
//! affected subtree. A variant for column `c` is the inner template's text
//! with each non-empty continuation line prefixed by `c` spaces, so that
//! multi-line inner templates stay aligned with the placeholder they replace.
//!
//! Variants are never patched in place: every registration rebuilds the
//! section sequences of the registering processor and, recursively, of all
//! its inner templates.

use std::collections::{BTreeMap, BTreeSet};

use crate::compiler::next_template_id;
use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::types::{Section, TemplateProcessor};

impl TemplateProcessor {
    /// Bind `inner` to the placeholder `key` of this template
    ///
    /// A copy of `inner` is stored; later changes to `inner` do not affect
    /// this template. The returned reference points at the stored copy and
    /// can be used to register further nested templates.
    ///
    /// The stored copy, and every template below it, gets a new identity, so
    /// `inner` may later be registered into the copy.
    ///
    /// # Errors
    ///
    /// [`Error::BindingError`] when `key` is blank, when `inner` is this
    /// template (or a clone of it), or when `key` is already registered.
    /// A failed registration leaves this template unchanged.
    pub fn register(&mut self, key: &str, inner: &TemplateProcessor) -> Result<&mut TemplateProcessor> {
        if key.trim().is_empty() {
            return Err(Error::binding_static("The key must be a valid non-blank string"));
        }
        if inner.id == self.id {
            return Err(Error::binding_static(
                "Disallowed to register a template to itself as an inner template",
            ));
        }
        if self.inner_templates.contains_key(key) {
            return Err(Error::binding_owned(format!(
                "key is already registered for use in another template: {}",
                key
            )));
        }

        let mut copy = inner.clone();
        copy.assign_fresh_ids();

        let mut staged = self.clone();
        let (index, _) = staged.inner_templates.insert_full(key.to_string(), copy);
        let columns = staged.sections_by_indent.keys().copied().collect();
        staged.rebuild(columns)?;
        *self = staged;

        let (_, registered) = self.inner_templates.get_index_mut(index).ok_or_else(|| {
            Error::binding_owned(format!("inner template vanished during registration: {}", key))
        })?;
        tracing::debug!(
            key,
            columns = ?registered.sections_by_indent.keys().collect::<Vec<_>>(),
            "registered inner template"
        );
        Ok(registered)
    }

    /// The inner template bound to `key`
    pub fn get_inner(&self, key: &str) -> Option<&TemplateProcessor> {
        self.inner_templates.get(key)
    }

    /// Mutable access to the inner template bound to `key`, for registering
    /// templates nested further down
    pub fn get_inner_mut(&mut self, key: &str) -> Option<&mut TemplateProcessor> {
        self.inner_templates.get_mut(key)
    }

    fn assign_fresh_ids(&mut self) {
        self.id = next_template_id();
        for inner in self.inner_templates.values_mut() {
            inner.assign_fresh_ids();
        }
    }

    /// Recompute the variants for `columns` from the original text, then do
    /// the same for every inner template with the columns it occurs at
    fn rebuild(&mut self, columns: BTreeSet<usize>) -> Result<()> {
        let mut variants = BTreeMap::new();
        for column in columns {
            let text = indent_continuation_lines(&self.original_text, column);
            let mut sections = Parser::new(&text).parse()?;
            bind_inner_sections(&mut sections, |key| self.inner_templates.contains_key(key));
            variants.insert(column, sections);
        }
        self.sections_by_indent = variants;

        for (key, inner) in self.inner_templates.iter_mut() {
            let columns = inner_columns(&self.sections_by_indent, key);
            inner.rebuild(columns)?;
        }
        Ok(())
    }
}

/// Prefix every non-empty line after the first with `column` spaces
pub(crate) fn indent_continuation_lines(text: &str, column: usize) -> String {
    let padding = " ".repeat(column);
    let mut lines = text.split('\n');
    let mut indented = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        indented.push_str(first);
    }
    for line in lines {
        indented.push('\n');
        if !line.is_empty() {
            indented.push_str(&padding);
            indented.push_str(line);
        }
    }
    indented
}

/// Turn placeholders whose key is bound into inner template references
fn bind_inner_sections(sections: &mut [Section], is_bound: impl Fn(&str) -> bool) {
    for section in sections.iter_mut() {
        let bound = match &*section {
            Section::Dynamic { key, indent } if is_bound(key) => Some((key.clone(), *indent)),
            _ => None,
        };
        if let Some((key, indent)) = bound {
            *section = Section::Inner { key, indent };
        }
    }
}

/// Columns at which `key` is referenced in any variant, plus column 0
fn inner_columns(variants: &BTreeMap<usize, Vec<Section>>, key: &str) -> BTreeSet<usize> {
    let mut columns = BTreeSet::from([0]);
    for sections in variants.values() {
        for section in sections {
            if let Section::Inner { key: k, indent } = section {
                if k == key {
                    columns.insert(*indent);
                }
            }
        }
    }
    columns
}
