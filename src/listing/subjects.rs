//! Subject and field shortcuts listed on the archive home page.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use super::document::{child_elements, leading_text, tag, ListingDocument};
use super::parser::CONTENT_ID;
use super::ListingError;

/// Link labels on the home page that are navigation, not taxonomy
const NAVIGATION_LABELS: &[&str] = &["new", "recent", "search"];

/// A field within a subject, e.g. "Machine Learning" -> "cs.LG"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldShortcut {
    pub label: String,
    pub code: String,
}

/// A subject with its shortcut and its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectGroup {
    /// Display name, e.g. "Computer Science"
    pub name: String,

    /// Shortcut used in listing URLs, e.g. "cs"
    pub code: String,

    /// Fields of the subject in page order
    pub fields: Vec<FieldShortcut>,
}

impl SubjectGroup {
    /// Look up a field shortcut by its label, ignoring case
    pub fn field_code(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label.eq_ignore_ascii_case(label))
            .map(|f| f.code.as_str())
    }
}

/// Read the subject taxonomy from the home page.
///
/// Every `ul` directly under the content element lists subjects, one `li`
/// each. Inside an item, the first labelled element names the subject, the
/// second holds its shortcut, and every later one is a field whose `id` is
/// the field shortcut.
pub fn parse_subjects(document: &ListingDocument) -> Result<Vec<SubjectGroup>, ListingError> {
    let content = document
        .element_by_id(CONTENT_ID)
        .ok_or_else(|| ListingError::MissingContent(format!("no element with id '{}'", CONTENT_ID)))?;

    let groups: Vec<SubjectGroup> = child_elements(content)
        .filter(|element| tag(*element) == "ul")
        .flat_map(child_elements)
        .filter(|element| tag(*element) == "li")
        .filter_map(parse_item)
        .collect();

    tracing::debug!("Found {} subjects", groups.len());
    Ok(groups)
}

fn parse_item(item: ElementRef<'_>) -> Option<SubjectGroup> {
    let mut labelled = child_elements(item).filter_map(|element| {
        let label = leading_text(element).trim().to_string();
        if label.is_empty()
            || NAVIGATION_LABELS.contains(&label.as_str())
            || label.contains("detailed")
        {
            None
        } else {
            Some((label, element))
        }
    });

    let (name, _) = labelled.next()?;
    let code = match labelled.next() {
        Some((code, _)) => code,
        None => {
            tracing::debug!("Subject '{}' has no shortcut, skipping", name);
            return None;
        }
    };

    let fields = labelled
        .filter_map(|(label, element)| match element.value().id() {
            Some(id) => Some(FieldShortcut {
                label,
                code: id.to_string(),
            }),
            None => {
                tracing::debug!("Field '{}' of '{}' has no id, skipping", label, name);
                None
            }
        })
        .collect();

    Some(SubjectGroup { name, code, fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"<html><body><div id="content">
        <h2>Physics</h2>
        <ul>
          <li><a href="/archive/astro-ph" id="main-astro-ph">Astrophysics</a>
            (<strong id="astro-ph">astro-ph</strong>
            <a href="/list/astro-ph/new">new</a>, <a href="/list/astro-ph/recent">recent</a>,
            <a href="/list/astro-ph/search">search</a>)<br>
            Includes: <a href="/list/astro-ph.CO/recent" id="astro-ph.CO">Cosmology and Nongalactic Astrophysics</a>;
            <a href="/list/astro-ph.EP/recent" id="astro-ph.EP">Earth and Planetary Astrophysics</a>
          </li>
        </ul>
        <h2>Computer Science</h2>
        <ul>
          <li><a href="/archive/cs" id="main-cs">Computing Research Repository</a>
            (<strong id="cs">cs</strong> <a href="/list/cs/new">new</a>, <a href="/list/cs/recent">recent</a>,
            <a href="/list/cs/search">search</a>)<br>
            Includes: (see <a href="/archive/cs" id="main-cs-detailed">detailed description</a>):
            <a href="/list/cs.AI/recent" id="cs.AI">Artificial Intelligence</a>;
            <a href="/list/cs.LG/recent" id="cs.LG">Machine Learning</a>;
            <a href="/list/cs.XX/recent">Unlabelled Field</a>
          </li>
        </ul>
    </div></body></html>"#;

    #[test]
    fn test_parse_subjects() {
        let doc = ListingDocument::parse(HOME);
        let groups = parse_subjects(&doc).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Astrophysics");
        assert_eq!(groups[0].code, "astro-ph");
        assert_eq!(groups[0].fields.len(), 2);
        assert_eq!(groups[0].fields[0].code, "astro-ph.CO");

        assert_eq!(groups[1].code, "cs");
        let codes: Vec<&str> = groups[1].fields.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["cs.AI", "cs.LG"]);
    }

    #[test]
    fn test_field_code_lookup() {
        let doc = ListingDocument::parse(HOME);
        let groups = parse_subjects(&doc).unwrap();
        assert_eq!(groups[1].field_code("machine learning"), Some("cs.LG"));
        assert_eq!(groups[1].field_code("Quantum Physics"), None);
    }

    #[test]
    fn test_missing_content() {
        let doc = ListingDocument::parse("<html><body></body></html>");
        assert!(matches!(
            parse_subjects(&doc),
            Err(ListingError::MissingContent(_))
        ));
    }
}
