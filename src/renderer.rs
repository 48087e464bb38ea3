//! Template rendering engine
//!
//! This module walks a compiled template tree against a data tree and
//! produces the output text. It also holds the size estimator used to
//! pre-size the output buffer.

use crate::checker::Checker;
use crate::error::Result;
use crate::types::{Section, TemplateProcessor};
use crate::value::{RecordView, TemplateValue};

/// Renders a finished template tree
pub struct Renderer<'a> {
    template: &'a TemplateProcessor,
}

impl<'a> Renderer<'a> {
    pub fn new(template: &'a TemplateProcessor) -> Self {
        Self { template }
    }

    /// Render the template with the given data
    ///
    /// Records are rendered in order, separated by a newline. Top-level data
    /// without records renders the template once with nothing substituted.
    pub fn render(&self, data: &TemplateValue, run_checks: bool) -> Result<String> {
        if run_checks {
            Checker::new(self.template).check(data)?;
        }

        let records = data.as_records();
        let capacity = self.estimate_size(records);
        let mut output = String::with_capacity(capacity);

        if records.is_empty() {
            Self::render_record(self.template, 0, RecordView::Empty, &mut output);
        } else {
            Self::render_records(self.template, 0, records, &mut output);
        }

        tracing::debug!(
            records = records.len(),
            capacity,
            length = output.len(),
            checked = run_checks,
            "rendered template"
        );
        Ok(output)
    }

    /// Approximate output size: this template once per record (at least
    /// once), plus every inner template's estimate for each record's data
    pub fn estimate_size(&self, records: &[TemplateValue]) -> usize {
        Self::estimate(self.template, records)
    }

    fn estimate(template: &TemplateProcessor, records: &[TemplateValue]) -> usize {
        let mut size = records.len().max(1) * template.estimated_size;
        for (key, inner) in &template.inner_templates {
            for item in records {
                size += Self::estimate(inner, inner_records(RecordView::of(item), key));
            }
        }
        size
    }

    fn render_records(
        template: &TemplateProcessor,
        indent: usize,
        records: &[TemplateValue],
        output: &mut String,
    ) {
        for (index, item) in records.iter().enumerate() {
            if index > 0 {
                output.push('\n');
                output.extend(std::iter::repeat(' ').take(indent));
            }
            Self::render_record(template, indent, RecordView::of(item), output);
        }
    }

    fn render_record(
        template: &TemplateProcessor,
        indent: usize,
        record: RecordView<'_>,
        output: &mut String,
    ) {
        // every variant an outer template can ask for is built at registration
        let sections = template
            .sections_by_indent
            .get(&indent)
            .or_else(|| template.sections_by_indent.get(&0));

        for section in sections.into_iter().flatten() {
            match section {
                Section::Static(text) => output.push_str(text),
                Section::Dynamic { key, .. } => match record.get(key) {
                    Some(TemplateValue::Text(value)) => output.push_str(value),
                    Some(_) => {}
                    None => tracing::trace!(key = key.as_str(), "missing key rendered empty"),
                },
                Section::Inner { key, indent } => {
                    if let Some(inner) = template.inner_templates.get(key) {
                        Self::render_records(inner, *indent, inner_records(record, key), output);
                    }
                }
            }
        }
    }
}

fn inner_records<'v>(record: RecordView<'v>, key: &str) -> &'v [TemplateValue] {
    record.get(key).map_or(&[][..], TemplateValue::as_records)
}
