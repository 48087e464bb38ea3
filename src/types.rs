//! Core template types and configurations
//!
//! This module contains the compiled template structure, its section model
//! and the configuration options used throughout the library.
//!
//! # Key Types
//!
//! - [`TemplateProcessor`] - One compiled template plus its bound inner templates
//! - [`Section`] - One parsed unit of a template
//! - [`TemplateConfig`] - Configuration options for template behavior
//!
//! # Usage
//!
//! ```rust,ignore
//! use curly_template::{TemplateProcessor, TemplateConfig, TemplateValue};
//!
//! let config = TemplateConfig::default().with_checks(false);
//! let template = TemplateProcessor::compile_with_config("Hello {{name}}", config)?;
//!
//! let data: TemplateValue = [("name", "Alice")].into_iter().collect();
//! let result = template.render(&data)?;
//! ```

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use crate::checker::Checker;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::value::TemplateValue;

/// One parsed unit of a template, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Text copied to the output verbatim
    Static(String),

    /// A `{{key}}` placeholder substituted with a scalar from the record.
    /// `indent` is the zero-based column at which the placeholder opened.
    Dynamic { key: String, indent: usize },

    /// A placeholder whose key is bound to an inner template. The target is
    /// the owning processor's inner template registered under `key`.
    Inner { key: String, indent: usize },
}

impl Section {
    /// The placeholder key, if this section has one
    pub fn key(&self) -> Option<&str> {
        match self {
            Section::Static(_) => None,
            Section::Dynamic { key, .. } | Section::Inner { key, .. } => Some(key),
        }
    }

    /// Column of the placeholder, zero for static text
    pub fn indent(&self) -> usize {
        match self {
            Section::Static(_) => 0,
            Section::Dynamic { indent, .. } | Section::Inner { indent, .. } => *indent,
        }
    }

    pub fn is_inner(&self) -> bool {
        matches!(self, Section::Inner { .. })
    }
}

/// A compiled template
///
/// `TemplateProcessor` holds the parsed sections of one template, one
/// sequence per indentation variant, and exclusively owns the inner
/// templates registered on it.
///
/// # Lifecycle
///
/// Build fully, then render. Compile once, register inner templates with
/// [`register`](TemplateProcessor::register) (which needs `&mut self`), then
/// render any number of times through `&self`. Rendering never mutates the
/// processor, so a finished processor can be shared across threads and
/// rendered concurrently with independent data.
///
/// ```rust,ignore
/// let mut page = TemplateProcessor::compile("<ul>\n  {{items}}\n</ul>")?;
/// let item = TemplateProcessor::compile("<li>{{name}}</li>")?;
/// page.register("items", &item)?;
///
/// let html = page.render(&data)?;
/// ```
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    /// Identity of the compiled template, shared by its clones
    pub(crate) id: u64,
    pub(crate) original_text: String,
    /// Section sequences by indent column. Column 0 is always present.
    pub(crate) sections_by_indent: BTreeMap<usize, Vec<Section>>,
    pub(crate) declared_keys: IndexSet<String>,
    pub(crate) inner_templates: IndexMap<String, TemplateProcessor>,
    pub(crate) estimated_size: usize,
    pub(crate) config: TemplateConfig,
}

impl TemplateProcessor {
    /// Compile a template string with the default configuration
    pub fn compile(text: &str) -> Result<Self> {
        Self::compile_with_config(text, TemplateConfig::default())
    }

    /// Compile a template string with custom configuration
    pub fn compile_with_config(text: &str, config: TemplateConfig) -> Result<Self> {
        crate::compiler::Compiler::compile(text, config)
    }

    /// Render the template, running the correctness check if the
    /// configuration asks for it
    pub fn render(&self, data: &TemplateValue) -> Result<String> {
        self.render_with_checks(data, self.config.run_checks)
    }

    /// Render the template, choosing explicitly whether to check the data first
    ///
    /// With `run_checks` off, missing keys render as empty strings.
    pub fn render_with_checks(&self, data: &TemplateValue, run_checks: bool) -> Result<String> {
        Renderer::new(self).render(data, run_checks)
    }

    /// Validate that `data` supplies every declared key at every nesting level
    pub fn check(&self, data: &TemplateValue) -> Result<()> {
        Checker::new(self).check(data)
    }

    /// Approximate output size for `data`, used to pre-size the output buffer
    pub fn estimate_size(&self, data: &TemplateValue) -> usize {
        Renderer::new(self).estimate_size(data.as_records())
    }

    /// The template text as it was compiled
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Placeholder keys found in the template, in document order
    pub fn declared_keys(&self) -> impl Iterator<Item = &str> {
        self.declared_keys.iter().map(String::as_str)
    }

    /// Keys bound to inner templates, in registration order
    pub fn inner_keys(&self) -> impl Iterator<Item = &str> {
        self.inner_templates.keys().map(String::as_str)
    }

    /// Sections of the variant for `indent`, if that variant exists
    pub fn sections(&self, indent: usize) -> Option<&[Section]> {
        self.sections_by_indent.get(&indent).map(Vec::as_slice)
    }

    /// Indent columns this template has variants for, ascending
    pub fn indent_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections_by_indent.keys().copied()
    }

    /// Single-pass size contribution of this template
    pub fn estimated_size(&self) -> usize {
        self.estimated_size
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }
}

/// Configuration for a compiled template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConfig {
    pub(crate) run_checks: bool,
    pub(crate) size_estimate_modifier: f64,
}

impl TemplateConfig {
    /// Create a new template configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the correctness check before every [`TemplateProcessor::render`]
    pub fn with_checks(mut self, enabled: bool) -> Self {
        self.run_checks = enabled;
        self
    }

    /// Multiplier applied to the template length for the size estimate
    pub fn with_size_estimate_modifier(mut self, modifier: f64) -> Self {
        self.size_estimate_modifier = modifier;
        self
    }

    /// Configuration for trusted data: no checks before rendering
    pub fn unchecked() -> Self {
        Self {
            run_checks: false,
            ..Self::default()
        }
    }

    // Accessors
    pub fn run_checks(&self) -> bool {
        self.run_checks
    }
    pub fn size_estimate_modifier(&self) -> f64 {
        self.size_estimate_modifier
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            run_checks: true,
            size_estimate_modifier: 1.1,
        }
    }
}
