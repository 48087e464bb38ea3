//! Builder pattern API for constructing TemplateProcessor instances
//!
//! This module provides a fluent API for compiling a template together with
//! its inner templates in one expression. Inner builders are compiled first
//! and registered in the order they were added, so the finished tree is the
//! same as compiling and registering by hand.

use crate::error::{Error, Result};
use crate::types::*;

/// Builder for constructing TemplateProcessor instances
///
/// # Examples
///
/// ```rust,ignore
/// use curly_template::TemplateBuilder;
///
/// let page = TemplateBuilder::new()
///     .from_str("<ul>\n  {{items}}\n</ul>")
///     .with_checks(false)
///     .with_inner("items", TemplateBuilder::new().from_str("<li>{{name}}</li>"))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    source: Option<String>,
    config: TemplateConfig,
    inner: Vec<(String, TemplateBuilder)>,
}

impl TemplateBuilder {
    /// Create a new template builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template text
    pub fn from_str<S: Into<String>>(mut self, text: S) -> Self {
        self.source = Some(text.into());
        self
    }

    /// Use a custom template configuration
    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable the correctness check before rendering
    pub fn with_checks(mut self, enabled: bool) -> Self {
        self.config = self.config.with_checks(enabled);
        self
    }

    /// Set the multiplier used for the output size estimate
    pub fn with_size_estimate_modifier(mut self, modifier: f64) -> Self {
        self.config = self.config.with_size_estimate_modifier(modifier);
        self
    }

    /// Bind an inner template, itself described by a builder, to `key`
    pub fn with_inner<S: Into<String>>(mut self, key: S, inner: TemplateBuilder) -> Self {
        self.inner.push((key.into(), inner));
        self
    }

    /// Compile the template and register all inner templates
    pub fn build(self) -> Result<TemplateProcessor> {
        let source = self
            .source
            .ok_or_else(|| Error::parse_static("No template source specified"))?;

        let mut template = TemplateProcessor::compile_with_config(&source, self.config)?;
        for (key, inner) in self.inner {
            let inner = inner.build()?;
            template.register(&key, &inner)?;
        }
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TemplateValue;
    use serde_json::json;

    #[test]
    fn test_builder_basic() {
        let template = TemplateBuilder::new().from_str("Hi {{name}}").build().unwrap();
        let data = TemplateValue::from(json!({"name": "there"}));
        assert_eq!(template.render(&data).unwrap(), "Hi there");
    }

    #[test]
    fn test_builder_without_source() {
        let result = TemplateBuilder::new().build();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No template source specified"));
    }

    #[test]
    fn test_builder_config() {
        let template = TemplateBuilder::new()
            .from_str("Hi {{name}}")
            .with_checks(false)
            .with_size_estimate_modifier(1.5)
            .build()
            .unwrap();
        assert!(!template.config().run_checks());
        assert_eq!(template.config().size_estimate_modifier(), 1.5);

        // unchecked: the missing key renders empty instead of failing
        assert_eq!(template.render(&TemplateValue::Null).unwrap(), "Hi ");
    }

    #[test]
    fn test_builder_nested_inner_templates() {
        let template = TemplateBuilder::new()
            .from_str("<div>\n  {{rows}}\n</div>")
            .with_inner(
                "rows",
                TemplateBuilder::new()
                    .from_str("<p>{{cells}}</p>")
                    .with_inner("cells", TemplateBuilder::new().from_str("[{{value}}]")),
            )
            .build()
            .unwrap();

        let data = TemplateValue::from(json!({
            "rows": [{"cells": ["a", "b"]}, {"cells": ["c"]}]
        }));
        assert_eq!(
            template.render(&data).unwrap(),
            "<div>\n  <p>[a]\n   [b]</p>\n  <p>[c]</p>\n</div>"
        );
    }

    #[test]
    fn test_builder_propagates_binding_errors() {
        let result = TemplateBuilder::new()
            .from_str("{{F}}")
            .with_inner("F", TemplateBuilder::new().from_str("a"))
            .with_inner("F", TemplateBuilder::new().from_str("b"))
            .build();
        assert!(matches!(result, Err(Error::BindingError(_))));
    }
}
