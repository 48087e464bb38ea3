//! String templating with `{{key}}` placeholders
//!
//! This crate compiles template text into an ordered list of sections and
//! renders it against hierarchical data. There are no expressions or
//! conditionals: repetition and nesting come from the shape of the data.
//! A list of records renders the template once per record, and a key bound
//! to an inner template renders that template for the records found under
//! the key. Multi-line inner templates are re-indented to the column of the
//! placeholder they replace.
//!
//! # Examples
//!
//! ```rust,ignore
//! use curly_template::{compile, TemplateValue};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut list = compile("<ul>\n  {{items}}\n</ul>")?;
//! list.register("items", &compile("<li>{{name}}</li>")?)?;
//!
//! let data = TemplateValue::from(json!({
//!     "items": [{"name": "first"}, {"name": "second"}]
//! }));
//!
//! let rendered = list.render(&data)?;
//! assert_eq!(rendered, "<ul>\n  <li>first</li>\n  <li>second</li>\n</ul>");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod value;
pub mod parser;
pub mod compiler;
pub mod registry;
pub mod checker;
pub mod renderer;
pub mod builder;

// Re-export commonly used types
pub use builder::TemplateBuilder;
pub use error::{Error, Result};
pub use types::{Section, TemplateConfig, TemplateProcessor};
pub use value::{TemplateData, TemplateValue};

/// Compile a template string with the default configuration
pub fn compile(text: &str) -> Result<TemplateProcessor> {
    TemplateProcessor::compile(text)
}
