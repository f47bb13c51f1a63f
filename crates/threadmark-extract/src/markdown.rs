/// Render one extracted document as markdown.
///
/// Layout: title heading, source filename, total page count, a `---`
/// separator, then a `# Page N` section per non-blank page. Page numbers
/// refer to the original PDF, so skipped blank pages leave gaps.
pub fn render_document(stem: &str, pdf_name: &str, pages: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {stem}\n\n"));
    out.push_str(&format!("**Source:** `{pdf_name}`\n\n"));
    out.push_str(&format!("**Pages:** {}\n\n", pages.len()));
    out.push_str("---\n\n");

    let sections: Vec<String> = pages
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| format!("# Page {}\n\n{}", i + 1, text))
        .collect();
    out.push_str(&sections.join("\n\n"));

    out
}
