use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::types::*;

static NEXT_TEMPLATE_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique template identity
pub(crate) fn next_template_id() -> u64 {
    NEXT_TEMPLATE_ID.fetch_add(1, Ordering::Relaxed)
}

pub struct Compiler;

impl Compiler {
    pub fn compile(text: &str, config: TemplateConfig) -> Result<TemplateProcessor> {
        if text.is_empty() {
            return Err(Error::parse_static(
                "The input to building a template must be a non-empty string",
            ));
        }

        let sections = Parser::new(text).parse()?;
        let declared_keys = Self::declared_keys(&sections);
        let estimated_size = Self::estimate_template_size(text, config.size_estimate_modifier);

        tracing::debug!(
            keys = declared_keys.len(),
            sections = sections.len(),
            estimated_size,
            "compiled template"
        );

        let mut sections_by_indent = BTreeMap::new();
        sections_by_indent.insert(0, sections);

        Ok(TemplateProcessor {
            id: next_template_id(),
            original_text: text.to_string(),
            sections_by_indent,
            declared_keys,
            inner_templates: IndexMap::new(),
            estimated_size,
            config,
        })
    }

    /// Distinct placeholder keys, in the order they first appear
    fn declared_keys(sections: &[Section]) -> IndexSet<String> {
        sections
            .iter()
            .filter_map(|section| match section {
                Section::Dynamic { key, .. } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    fn estimate_template_size(text: &str, modifier: f64) -> usize {
        (text.len() as f64 * modifier).round() as usize
    }
}
