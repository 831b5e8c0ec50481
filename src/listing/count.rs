//! Total entry count announced on a listing root page.

use super::document::{leading_text, nth_child_element, ListingDocument};
use super::ListingError;

/// Id of the element wrapping the listing summary
pub const COUNT_CONTAINER_ID: &str = "dlpage";

/// Position of the summary line (`[ total of N entries: ... ]`) among the container's children
const COUNT_ELEMENT_INDEX: usize = 3;

/// Position of the number within the summary line's words
const COUNT_TOKEN_INDEX: usize = 3;

/// Read the declared number of entries for the listed period.
///
/// Fails with [`ListingError::PageNotFound`] when the summary container is
/// absent, which is how a non-existent subject/field shows up, and with
/// [`ListingError::MalformedCount`] when the container is there but the count
/// cannot be read from it.
pub fn resolve_entry_count(document: &ListingDocument) -> Result<usize, ListingError> {
    let container = document
        .element_by_id(COUNT_CONTAINER_ID)
        .ok_or_else(|| {
            ListingError::PageNotFound(format!("no element with id '{}'", COUNT_CONTAINER_ID))
        })?;

    let summary = nth_child_element(container, COUNT_ELEMENT_INDEX).ok_or_else(|| {
        ListingError::MalformedCount(format!(
            "'{}' has no summary element at position {}",
            COUNT_CONTAINER_ID, COUNT_ELEMENT_INDEX
        ))
    })?;

    let text = leading_text(summary);
    let token = text.split_whitespace().nth(COUNT_TOKEN_INDEX).ok_or_else(|| {
        ListingError::MalformedCount(format!("summary '{}' is too short", text.trim()))
    })?;

    let count = token.parse::<usize>().map_err(|_| {
        ListingError::MalformedCount(format!(
            "expected a number at word {} of '{}', found '{}'",
            COUNT_TOKEN_INDEX + 1,
            text.trim(),
            token
        ))
    })?;

    tracing::debug!("Listing declares {} entries", count);
    Ok(count)
}
