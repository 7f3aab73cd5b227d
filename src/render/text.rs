//! Plain-text renderer — the CLI's on-screen view of the report.
//!
//! Line-oriented output with no wrapping (the terminal wraps), so rendering
//! is fully deterministic for a given tree.

use crate::render::Renderer;
use crate::tree::{Body, FileSection, FunctionSection, RenderTree};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, tree: &RenderTree) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(tree.title.clone());
        lines.push("=".repeat(tree.title.chars().count()));
        lines.push(tree.subtitle.clone());
        lines.push(String::new());

        match &tree.body {
            Body::Placeholder(message) => {
                lines.push(message.clone());
                lines.push(String::new());
            }
            Body::Files(files) => {
                for file in files {
                    render_file(&mut lines, file);
                }
            }
        }

        lines.push(format!("Generated on {}", tree.generated_at));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

fn render_file(lines: &mut Vec<String>, file: &FileSection) {
    lines.push(file.heading.clone());
    lines.push("-".repeat(file.heading.chars().count()));
    if let Some(ref path) = file.path {
        lines.push(format!("[{}]", path));
    }
    lines.push(String::new());

    if let Some(ref paragraphs) = file.overview {
        lines.push("Overview:".to_string());
        lines.push(String::new());
        for paragraph in paragraphs {
            if paragraph.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("  {}", paragraph));
            }
        }
        lines.push(String::new());
    }

    if let Some(ref functions) = file.functions {
        lines.push("Functions:".to_string());
        lines.push(String::new());
        for func in functions {
            render_function(lines, func);
        }
    }
}

fn render_function(lines: &mut Vec<String>, func: &FunctionSection) {
    lines.push(format!("  {}", func.name));

    if let Some(ref description) = func.description {
        lines.push(String::new());
        for line in description {
            lines.push(format!("    {}", line));
        }
    }

    if let Some(ref parameters) = func.parameters {
        lines.push(String::new());
        lines.push("    Parameters:".to_string());
        for param in parameters {
            lines.push(format!("      - {}", param));
        }
    }

    if let Some(ref returns) = func.returns {
        lines.push(String::new());
        lines.push("    Returns:".to_string());
        for ret in returns {
            lines.push(format!("      - {}", ret));
        }
    }

    lines.push(String::new());
}
