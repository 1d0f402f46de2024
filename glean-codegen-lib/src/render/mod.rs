//! Assembly of rendered entries into documents.
//!
//! Rendering is pure and deterministic: the same layout and entries always
//! produce the same bytes.

/// A generated file, held in memory until everything has been rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub contents: String,
}

/// The fixed text around a unit's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Everything before the first entry, including the opening of the container
    pub header: String,

    /// Everything after the last entry
    pub footer: String,

    /// Prefix of every entry line
    pub indent: String,

    /// Appended to the last line of each declaration
    pub separator: &'static str,
}

/// One instrument as rendered by a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub description: String,

    /// The definition this entry came from, as `category.name`
    pub origin: String,

    /// Declarations placed ahead of the documented one, such as key enumerations
    pub preamble: Vec<String>,
    pub declaration: String,
}

/// Join a layout and its entries into the document text
#[must_use]
pub fn render(layout: &Layout, entries: &[RenderedEntry]) -> String {
    let mut out = String::with_capacity(layout.header.len() + layout.footer.len() + entries.len() * 256);
    out.push_str(&layout.header);

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }

        for block in &entry.preamble {
            push_indented(&mut out, &layout.indent, block, "");
            out.push('\n');
        }

        push_doc_comment(&mut out, &layout.indent, &entry.description, &entry.origin);
        push_indented(&mut out, &layout.indent, &entry.declaration, layout.separator);
    }

    out.push_str(&layout.footer);
    out
}

/// Keep free text from closing, or opening a nested, comment
#[must_use]
pub fn escape_comment(line: &str) -> String {
    line.replace("*/", "*\\/").replace("/*", "/\\*")
}

fn push_doc_comment(out: &mut String, indent: &str, description: &str, origin: &str) {
    push_line(out, indent, "/**");
    for line in description.lines() {
        if line.is_empty() {
            push_line(out, indent, " *");
        } else {
            push_line(out, indent, &format!(" * {}", escape_comment(line)));
        }
    }
    push_line(out, indent, " *");
    push_line(out, indent, &format!(" * Generated from `{}`.", escape_comment(origin)));
    push_line(out, indent, " */");
}

fn push_indented(out: &mut String, indent: &str, block: &str, separator: &str) {
    let mut lines = block.lines().peekable();
    while let Some(line) = lines.next() {
        if lines.peek().is_none() {
            push_line(out, indent, &format!("{line}{separator}"));
        } else {
            push_line(out, indent, line);
        }
    }
}

fn push_line(out: &mut String, indent: &str, line: &str) {
    if !line.is_empty() {
        out.push_str(indent);
        out.push_str(line);
    }
    out.push('\n');
}
