use std::path::Path;

use pulldown_cmark::{Options, Parser, html};

pub struct PreviewController {
    pub enabled: bool,
}

impl PreviewController {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Toggle preview state. Returns new enabled state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Render markdown text to raw HTML.
    pub fn render_markdown(text: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(text, options);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        html_output
    }

    /// Full pipeline for the preview pane: render, point relative images at
    /// the document's folder, wrap in HelpView font tags.
    pub fn render_for_helpview(text: &str, doc_dir: Option<&Path>) -> String {
        let mut html = Self::render_markdown(text);
        if let Some(dir) = doc_dir {
            html = resolve_image_sources(&html, dir);
        }
        wrap_html_for_helpview(&html)
    }
}

/// Wrap HTML in HelpView-compatible font tags.
pub fn wrap_html_for_helpview(html: &str) -> String {
    format!("<font face=\"Helvetica\" size=\"4\">{}</font>", html)
}

/// Rewrite relative `<img src>` values to absolute paths under `doc_dir`.
/// URLs and absolute paths are left alone.
pub fn resolve_image_sources(html: &str, doc_dir: &Path) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(img_start) = rest.find("<img ") {
        result.push_str(&rest[..img_start]);

        let tag_content = &rest[img_start..];
        let tag_end = tag_content.find('>').map_or(tag_content.len(), |i| i + 1);
        let tag = &tag_content[..tag_end];

        match src_span(tag) {
            Some((start, end)) if needs_resolving(&tag[start..end]) => {
                let abs = doc_dir.join(&tag[start..end]);
                result.push_str(&tag[..start]);
                result.push_str(&abs.to_string_lossy());
                result.push_str(&tag[end..]);
            }
            _ => result.push_str(tag),
        }

        rest = &rest[img_start + tag_end..];
    }

    result.push_str(rest);
    result
}

/// Byte range of the `src` attribute value inside an HTML tag.
fn src_span(tag: &str) -> Option<(usize, usize)> {
    let pattern = " src=\"";
    let pos = tag.to_ascii_lowercase().find(pattern)?;
    let value_start = pos + pattern.len();
    let value_end = tag[value_start..].find('"')? + value_start;
    Some((value_start, value_end))
}

fn needs_resolving(src: &str) -> bool {
    !src.is_empty() && !src.contains("://") && !src.starts_with("data:") && !Path::new(src).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_headings_and_emphasis() {
        let html = PreviewController::render_markdown("# Title\n\n**bold** and *it*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>it</em>"));
    }

    #[test]
    fn test_render_tables_and_strikethrough() {
        let html = PreviewController::render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_render_code_block() {
        let html = PreviewController::render_markdown("```\nlet x = 1;\n```");
        assert!(html.contains("<pre><code>let x = 1;\n</code></pre>"));
    }

    #[test]
    fn test_toggle() {
        let mut preview = PreviewController::new(true);
        assert!(!preview.toggle());
        assert!(preview.toggle());
        assert!(preview.enabled);
    }

    #[test]
    fn test_wrap_html_for_helpview() {
        let html = "<p>Hello</p>";
        let result = wrap_html_for_helpview(html);
        assert!(result.starts_with("<font face=\"Helvetica\""));
        assert!(result.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_resolve_relative_image() {
        let dir = Path::new("/notes/work");
        let html = r#"<p><img src="img/a.png" alt="A" /></p>"#;
        let out = resolve_image_sources(html, dir);
        let expected = dir.join("img/a.png");
        assert!(out.contains(&format!("src=\"{}\"", expected.to_string_lossy())));
        assert!(out.contains("alt=\"A\""));
        assert!(out.ends_with("/></p>"));
    }

    #[test]
    fn test_resolve_leaves_urls_alone() {
        let html = r#"<img src="https://example.com/a.png" alt="" />"#;
        assert_eq!(resolve_image_sources(html, Path::new("/notes")), html);
    }

    #[test]
    fn test_resolve_without_images() {
        let html = "<p>No images</p>";
        assert_eq!(resolve_image_sources(html, Path::new("/notes")), html);
    }

    #[test]
    fn test_render_for_helpview_pipeline() {
        let out = PreviewController::render_for_helpview("![x](pic.png)", Some(Path::new("/nb")));
        assert!(out.starts_with("<font face=\"Helvetica\" size=\"4\">"));
        assert!(out.contains(&Path::new("/nb").join("pic.png").to_string_lossy().to_string()));
    }
}
