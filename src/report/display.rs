//! Terminal rendering of entries and subjects.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};

use crate::listing::SubjectGroup;
use crate::models::Entry;

/// Longest title shown in a table cell before it is cut
pub const MAX_TITLE_WIDTH: usize = 80;

/// Entries as a table with title, id and PDF columns
pub fn entries_table(entries: &[Entry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Title", "arXiv ID", "PDF"]);

    for (index, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(truncate(&entry.title, MAX_TITLE_WIDTH)).add_attribute(Attribute::Bold),
            Cell::new(entry.arxiv_id().unwrap_or("-")),
            Cell::new(&entry.pdf_link),
        ]);
    }
    table
}

/// Entries as `* title` lines, each followed by the indented PDF link
pub fn entries_plain(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| format!("\t* {}\n\t\t({})\n", entry.title, entry.pdf_link))
        .collect()
}

/// Subjects as a table of shortcut, name and fields
pub fn subjects_table(subjects: &[SubjectGroup]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Subject", "Name", "Fields"]);

    for subject in subjects {
        let fields = subject
            .fields
            .iter()
            .map(|f| format!("{} ({})", f.code, f.label))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&subject.code).add_attribute(Attribute::Bold),
            Cell::new(&subject.name),
            Cell::new(fields),
        ]);
    }
    table
}

/// Subjects as indented plain text
pub fn subjects_plain(subjects: &[SubjectGroup]) -> String {
    let mut out = String::new();
    for subject in subjects {
        out.push_str(&format!("{}: {}\n", subject.name, subject.code));
        for field in &subject.fields {
            out.push_str(&format!("\t{}: {}\n", field.label, field.code));
        }
    }
    out
}

/// Cut `text` to at most `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
