//! Markdown and PDF export of a single note.

use std::fs;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::Serialize;

use crate::entity::Note;
use crate::error::NotesError;
use crate::Result;

// A4 portrait with 10mm margins, 12pt Helvetica on a 10mm line pitch.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const LINE_HEIGHT: f32 = 10.0;
const FONT_SIZE: f32 = 12.0;
const CHARS_PER_LINE: usize = 90;

#[derive(Serialize)]
struct NoteFrontmatter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    title: &'a str,
    date: String,
    #[serde(skip_serializing_if = "no_tags")]
    tags: &'a [String],
}

impl<'a> NoteFrontmatter<'a> {
    fn from_note(note: &'a Note) -> Self {
        Self {
            id: note.id.as_deref(),
            title: &note.title,
            date: note.date.format("%Y-%m-%d").to_string(),
            tags: &note.tags,
        }
    }
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

fn yaml_frontmatter<T: Serialize>(data: &T) -> Result<String> {
    let yaml = serde_yaml::to_string(data)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// Render `note` as Markdown: YAML frontmatter, the raw content, then the
/// checklist as task-list items.
pub fn export_markdown(note: &Note) -> Result<String> {
    let mut out = yaml_frontmatter(&NoteFrontmatter::from_note(note))?;
    out.push('\n');
    out.push_str(&note.content);

    if !note.checklist.is_empty() {
        if !note.content.is_empty() && !note.content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("\n## Checklist\n\n");
        for item in &note.checklist {
            let mark = if item.done { 'x' } else { ' ' };
            out.push_str(&format!("- [{}] {}\n", mark, item.text));
        }
    }

    Ok(out)
}

/// Render the note content as a PDF: one block of wrapped text, continued
/// onto new pages as needed.
pub fn export_pdf(note: &Note) -> Result<Vec<u8>> {
    let pdf_err = |e: printpdf::Error| NotesError::Export(e.to_string());

    let (doc, page, layer) =
        PdfDocument::new(&note.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Content");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN - LINE_HEIGHT;
    for line in wrap_text(&note.content, CHARS_PER_LINE) {
        if y < MARGIN {
            let (page, next) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Content");
            layer = doc.get_page(page).get_layer(next);
            y = PAGE_HEIGHT - MARGIN - LINE_HEIGHT;
        }
        layer.use_text(line, FONT_SIZE, Mm(MARGIN), Mm(y), &font);
        y -= LINE_HEIGHT;
    }

    doc.save_to_bytes().map_err(pdf_err)
}

/// Break `text` into lines of at most `width` chars, splitting at spaces
/// where possible. Explicit newlines are kept.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split(' ') {
            let mut word_len = word.chars().count();
            if len > 0 && len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            let mut rest = word;
            while word_len > width - len {
                let split = rest
                    .char_indices()
                    .nth(width - len)
                    .map_or(rest.len(), |(i, _)| i);
                line.push_str(&rest[..split]);
                lines.push(std::mem::take(&mut line));
                rest = &rest[split..];
                word_len = rest.chars().count();
                len = 0;
            }
            line.push_str(rest);
            len += word_len;
        }
        lines.push(line);
    }

    lines
}

/// File name for an exported note, derived from its title.
pub fn export_file_name(note: &Note) -> String {
    format!("{}.md", slugify(&note.title))
}

/// Write an export to `path`, creating parent directories.
pub fn write_export(path: &Path, body: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, body)?;
    Ok(())
}

/// Lowercase ASCII slug of `title`; anything else collapses to single
/// hyphens. Titles with nothing usable become `"note"`.
pub fn slugify(title: &str) -> String {
    let words: Vec<String> = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();

    if words.is_empty() {
        "note".to_string()
    } else {
        words.join("-")
    }
}
