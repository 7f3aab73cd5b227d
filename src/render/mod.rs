//! Report renderers — trait-based format dispatch.
//!
//! Both renderers consume the shared render tree read-only; neither touches
//! the wire record.

pub mod html;
pub mod text;

use crate::tree::RenderTree;
use anyhow::{anyhow, Result};

/// Trait for rendering a RenderTree into a specific output format.
pub trait Renderer {
    fn render(&self, tree: &RenderTree) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use text or html", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats_resolve() {
        assert_eq!(create_renderer("text").unwrap().file_extension(), "txt");
        assert_eq!(create_renderer("html").unwrap().file_extension(), "html");
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(create_renderer("pdf").is_err());
    }
}
