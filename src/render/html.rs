//! HTML renderer — standalone page mirroring the report structure:
//! header band, per-file sections, function cards, footer timestamp.

use crate::render::Renderer;
use crate::tree::{Body, FileSection, FunctionSection, RenderTree};

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, tree: &RenderTree) -> String {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", html_escape(&tree.title)));
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 56em; margin: 0 auto; padding: 0 1em; color: #4b5563; }\n");
        out.push_str("header { background: #2563eb; color: white; padding: 2em 1.5em; border-radius: 0 0 8px 8px; }\n");
        out.push_str("header p { opacity: 0.9; margin-bottom: 0; }\n");
        out.push_str("h2 { color: #1f2937; border-bottom: 1px solid #e5e7eb; padding-bottom: 0.3em; }\n");
        out.push_str(".path { font-size: 0.8em; color: #9ca3af; }\n");
        out.push_str(".function { background: #f9fafb; border: 1px solid #e5e7eb; border-radius: 8px; padding: 1em; margin: 1em 0; }\n");
        out.push_str(".function h4 { color: #2563eb; margin-top: 0; }\n");
        out.push_str(".empty { text-align: center; color: #6b7280; padding: 3em 0; }\n");
        out.push_str("footer { color: #6b7280; font-size: 0.85em; border-top: 1px solid #e5e7eb; padding: 1em 0; margin-top: 2em; }\n");
        out.push_str("</style>\n</head>\n<body>\n");

        out.push_str("<header>\n");
        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&tree.title)));
        out.push_str(&format!("<p>{}</p>\n", html_escape(&tree.subtitle)));
        out.push_str("</header>\n<main>\n");

        match &tree.body {
            Body::Placeholder(message) => {
                out.push_str(&format!(
                    "<p class=\"empty\">{}</p>\n",
                    html_escape(message)
                ));
            }
            Body::Files(files) => {
                for file in files {
                    out.push_str(&render_file_html(file));
                }
            }
        }

        out.push_str("</main>\n");
        out.push_str(&format!(
            "<footer>Generated on {}</footer>\n",
            html_escape(&tree.generated_at)
        ));
        out.push_str("</body>\n</html>\n");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_file_html(file: &FileSection) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"file\">\n");
    out.push_str(&format!("<h2>{}</h2>\n", html_escape(&file.heading)));

    if let Some(ref path) = file.path {
        out.push_str(&format!("<p class=\"path\">{}</p>\n", html_escape(path)));
    }

    if let Some(ref paragraphs) = file.overview {
        out.push_str("<h3>Overview</h3>\n");
        for paragraph in paragraphs {
            out.push_str(&format!("<p>{}</p>\n", html_escape(paragraph)));
        }
    }

    if let Some(ref functions) = file.functions {
        out.push_str("<h3>Functions</h3>\n");
        for func in functions {
            out.push_str(&render_function_html(func));
        }
    }

    out.push_str("</section>\n");
    out
}

fn render_function_html(func: &FunctionSection) -> String {
    let mut out = String::new();
    out.push_str("<article class=\"function\">\n");
    out.push_str(&format!("<h4>{}</h4>\n", html_escape(&func.name)));

    if let Some(ref description) = func.description {
        for line in description {
            out.push_str(&format!("<p>{}</p>\n", html_escape(line)));
        }
    }

    if let Some(ref parameters) = func.parameters {
        out.push_str("<h5>Parameters</h5>\n<ul>\n");
        for param in parameters {
            out.push_str(&format!("  <li>{}</li>\n", html_escape(param)));
        }
        out.push_str("</ul>\n");
    }

    if let Some(ref returns) = func.returns {
        out.push_str("<h5>Returns</h5>\n<ul>\n");
        for ret in returns {
            out.push_str(&format!("  <li>{}</li>\n", html_escape(ret)));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</article>\n");
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentationRecord;
    use crate::normalize::normalize;
    use crate::tree::build;

    fn render_json(json: &str) -> String {
        let record: DocumentationRecord = serde_json::from_str(json).unwrap();
        HtmlRenderer.render(&build(&normalize(&record)))
    }

    #[test]
    fn escapes_markup_in_content() {
        let out = render_json(
            r#"{"timestamp": "T", "files": [{"fileName": "a.py",
                "functions": [{"name": "f(x: List[int]) -> Dict<str, int>"}]}]}"#,
        );
        assert!(out.contains("Dict&lt;str, int&gt;"));
        assert!(!out.contains("Dict<str"));
    }

    #[test]
    fn placeholder_renders_empty_state() {
        let out = render_json(r#"{"timestamp": "T", "files": []}"#);
        assert!(out.contains("class=\"empty\""));
        assert!(!out.contains("<section"));
    }

    #[test]
    fn sections_appear_only_when_present() {
        let out = render_json(
            r#"{"timestamp": "T", "files": [{"fileName": "a.py", "overview": "o",
                "functions": [{"name": "f", "parameters": ["p"]}]}]}"#,
        );
        assert!(out.contains("<h3>Overview</h3>"));
        assert!(out.contains("<h5>Parameters</h5>"));
        assert!(!out.contains("<h5>Returns</h5>"));
    }
}
