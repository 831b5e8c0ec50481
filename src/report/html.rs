//! HTML table rendering.

use crate::models::Entry;

const COLUMNS: [&str; 3] = ["title", "pdf", "abstract"];

/// Render entries as an HTML table: a row-index column, then title, pdf and
/// abstract. Links become anchors opening in a new tab, headers are centered.
pub fn render_html_table(entries: &[Entry]) -> String {
    let mut out = String::new();
    out.push_str("<table border=\"1\" class=\"dataframe\">\n");
    out.push_str("  <thead>\n");
    out.push_str("    <tr style=\"text-align: center;\">\n");
    out.push_str("      <th></th>\n");
    for column in COLUMNS {
        out.push_str(&format!("      <th>{}</th>\n", column));
    }
    out.push_str("    </tr>\n");
    out.push_str("  </thead>\n");
    out.push_str("  <tbody>\n");

    for (index, entry) in entries.iter().enumerate() {
        out.push_str("    <tr>\n");
        out.push_str(&format!("      <th>{}</th>\n", index));
        out.push_str(&format!(
            "      <td>{}</td>\n",
            html_escape::encode_text(&entry.title)
        ));
        out.push_str(&format!("      <td>{}</td>\n", anchor(&entry.pdf_link)));
        out.push_str(&format!("      <td>{}</td>\n", anchor(&entry.abstract_link)));
        out.push_str("    </tr>\n");
    }

    out.push_str("  </tbody>\n");
    out.push_str("</table>");
    out
}

fn anchor(url: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\">{}</a>",
        html_escape::encode_double_quoted_attribute(url),
        html_escape::encode_text(url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let entries = vec![
            Entry::new("First", "https://arxiv.org/pdf/1", "https://arxiv.org/abs/1"),
            Entry::new("Second", "https://arxiv.org/pdf/2", "https://arxiv.org/abs/2"),
        ];
        let html = render_html_table(&entries);

        assert!(html.starts_with("<table border=\"1\" class=\"dataframe\">"));
        assert!(html.contains("<tr style=\"text-align: center;\">"));
        assert!(html.contains("<th>title</th>\n      <th>pdf</th>\n      <th>abstract</th>"));
        assert!(html.contains("<th>0</th>\n      <td>First</td>"));
        assert!(html.contains("<th>1</th>\n      <td>Second</td>"));
        assert!(html.contains(
            "<td><a href=\"https://arxiv.org/abs/2\" target=\"_blank\">https://arxiv.org/abs/2</a></td>"
        ));
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
    }

    #[test]
    fn test_title_is_escaped() {
        let entries = vec![Entry::new(
            "Bounds for <k>-SAT & \"friends\"",
            "https://arxiv.org/pdf/1",
            "https://arxiv.org/abs/1",
        )];
        let html = render_html_table(&entries);

        assert!(html.contains("<td>Bounds for &lt;k&gt;-SAT &amp; \"friends\"</td>"));
        assert!(!html.contains("<k>"));
    }

    #[test]
    fn test_link_attribute_is_escaped() {
        let entries = vec![Entry::new(
            "Quoted",
            "https://arxiv.org/pdf/1?a=1&b=\"2\"",
            "https://arxiv.org/abs/<1>",
        )];
        let html = render_html_table(&entries);

        assert!(html.contains("href=\"https://arxiv.org/pdf/1?a=1&amp;b=&quot;2&quot;\""));
        assert!(html.contains(">https://arxiv.org/pdf/1?a=1&amp;b=\"2\"</a>"));
        assert!(html.contains(">https://arxiv.org/abs/&lt;1&gt;</a>"));
        assert!(!html.contains("<1>"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let html = render_html_table(&[]);
        assert!(html.contains("<thead>"));
        assert!(!html.contains("<td>"));
    }
}
