//! Data/template correspondence check
//!
//! Walks the data tree alongside the template tree and fails on the first
//! record that lacks a declared placeholder key. Keys bound to inner
//! templates are not required to be present: absent inner data simply means
//! the inner template renders zero times.

use crate::error::{Error, Result};
use crate::types::TemplateProcessor;
use crate::value::{RecordView, TemplateValue};

/// Path prefix of top-level records in error messages
const ROOT_PATH: &str = "ROOT";

pub struct Checker<'a> {
    template: &'a TemplateProcessor,
}

impl<'a> Checker<'a> {
    pub fn new(template: &'a TemplateProcessor) -> Self {
        Self { template }
    }

    /// Check every record of `data` against the template tree
    pub fn check(&self, data: &TemplateValue) -> Result<()> {
        Self::check_records(self.template, data.as_records(), ROOT_PATH)
    }

    fn check_records(
        template: &TemplateProcessor,
        records: &[TemplateValue],
        parent_path: &str,
    ) -> Result<()> {
        for (index, item) in records.iter().enumerate() {
            let path = format!("{}[{}]", parent_path, index);
            let record = RecordView::of(item);

            let missing: Vec<String> = template
                .declared_keys
                .iter()
                .filter(|key| {
                    !template.inner_templates.contains_key(key.as_str())
                        && !record.contains_key(key)
                })
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(Error::missing_keys(path, missing));
            }

            for (key, inner) in &template.inner_templates {
                let inner_records = record.get(key).map_or(&[][..], TemplateValue::as_records);
                Self::check_records(inner, inner_records, &format!("{}.{}", path, key))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(text: &str) -> TemplateProcessor {
        TemplateProcessor::compile(text).unwrap()
    }

    #[test]
    fn test_check_passes_with_all_keys() {
        let template = compile("{{a}} and {{b}}");
        let data = TemplateValue::from(json!({"a": "1", "b": "2", "extra": "ignored"}));
        assert!(Checker::new(&template).check(&data).is_ok());
    }

    #[test]
    fn test_check_reports_missing_key_at_root() {
        let template = compile("Hi {{name}}");
        let data = TemplateValue::from(json!({}));
        let err = Checker::new(&template).check(&data).unwrap_err();
        match err {
            Error::MissingKeys { path, keys } => {
                assert_eq!(path, "ROOT[0]");
                assert_eq!(keys, vec!["name"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_check_reports_record_index() {
        let template = compile("{{a}}");
        let data = TemplateValue::from(json!([{"a": "x"}, {"b": "y"}]));
        let err = Checker::new(&template).check(&data).unwrap_err();
        assert!(err.to_string().contains("ROOT[1]"));
    }

    #[test]
    fn test_check_null_value_counts_as_present() {
        let template = compile("{{a}}");
        let data = TemplateValue::from(json!({"a": null}));
        assert!(Checker::new(&template).check(&data).is_ok());
    }

    #[test]
    fn test_check_empty_data_has_no_records_to_fail() {
        let template = compile("{{a}}");
        assert!(Checker::new(&template).check(&TemplateValue::Null).is_ok());
        assert!(Checker::new(&template).check(&TemplateValue::List(vec![])).is_ok());
    }

    #[test]
    fn test_check_nested_path() {
        let mut template = compile("{{title}}: {{F}}");
        template.register("F", &compile("[{{a}}-{{c}}]")).unwrap();

        let data = TemplateValue::from(json!([
            {"title": "one", "F": [{"a": "b", "c": "d"}]},
            {"title": "two", "F": [{"a": "m", "c": "p"}, {"a": "q"}]}
        ]));
        let err = Checker::new(&template).check(&data).unwrap_err();
        match err {
            Error::MissingKeys { path, keys } => {
                assert_eq!(path, "ROOT[1].F[1]");
                assert_eq!(keys, vec!["c"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_check_absent_inner_data_is_allowed() {
        let mut template = compile("{{title}} {{F}}");
        template.register("F", &compile("{{a}}")).unwrap();
        let data = TemplateValue::from(json!({"title": "no inner data"}));
        assert!(Checker::new(&template).check(&data).is_ok());
    }

    #[test]
    fn test_check_scalar_items_expose_value() {
        let mut template = compile("{{F}}");
        template.register("F", &compile("- {{value}}")).unwrap();
        let data = TemplateValue::from(json!({"F": ["x", "y"]}));
        assert!(Checker::new(&template).check(&data).is_ok());
    }
}
