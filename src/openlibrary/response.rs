//! Search response wire types and normalization.

use crate::domain::{BookRecord, PublishYear, Result};
use serde::Deserialize;

/// Top-level search response document.
///
/// Only `docs` is read. A body without `docs` decodes as an empty page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<RawDoc>,
}

/// One raw search result, before normalization.
///
/// Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDoc {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i64>,
    #[serde(default)]
    pub language: Option<Vec<String>>,
    #[serde(default)]
    pub cover_i: Option<i64>,
}

impl From<RawDoc> for BookRecord {
    fn from(doc: RawDoc) -> Self {
        Self {
            author_display: Self::author_text(doc.author_name.as_deref()),
            language_display: Self::language_text(doc.language.as_deref()),
            first_publish_year: PublishYear::from_raw(doc.first_publish_year),
            id: doc.key.unwrap_or_default(),
            title: doc.title.unwrap_or_default(),
            cover_image_id: doc.cover_i,
        }
    }
}

/// Decodes a response body and normalizes every record, preserving order.
///
/// # Errors
///
/// Returns [`BookFinderError::Decode`](crate::domain::BookFinderError::Decode) if the
/// body is not a JSON object of the expected shape.
pub fn parse_search_page(body: &[u8]) -> Result<Vec<BookRecord>> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    tracing::debug!(doc_count = response.docs.len(), "decoded search response");
    Ok(response.docs.into_iter().map(BookRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookFinderError, NOT_AVAILABLE, UNKNOWN_AUTHOR};

    #[test]
    fn normalizes_complete_record() {
        let body = br#"{"docs":[{
            "key":"/works/OL1W",
            "title":"Introduction to Algorithms",
            "author_name":["Thomas H. Cormen","Charles E. Leiserson"],
            "first_publish_year":1990,
            "language":["eng","ger"],
            "cover_i":8231856
        }]}"#;

        let books = parse_search_page(body).unwrap();
        assert_eq!(books.len(), 1);
        let book = &books[0];
        assert_eq!(book.id, "/works/OL1W");
        assert_eq!(book.title, "Introduction to Algorithms");
        assert_eq!(book.author_display, "Thomas H. Cormen, Charles E. Leiserson");
        assert_eq!(book.first_publish_year, PublishYear::Year(1990));
        assert_eq!(book.language_display, "eng, ger");
        assert_eq!(book.cover_image_id, Some(8231856));
    }

    #[test]
    fn missing_fields_get_sentinels() {
        let body = br#"{"docs":[{"key":"/works/OL2W","title":"Anonymous Notes"}]}"#;

        let books = parse_search_page(body).unwrap();
        assert_eq!(books[0].author_display, UNKNOWN_AUTHOR);
        assert_eq!(books[0].first_publish_year.to_string(), NOT_AVAILABLE);
        assert_eq!(books[0].language_display, NOT_AVAILABLE);
        assert_eq!(books[0].cover_image_id, None);
    }

    #[test]
    fn unknown_fields_are_ignored_and_order_is_kept() {
        let body = br#"{"numFound":3,"start":0,"docs":[
            {"key":"/works/A","edition_count":4},
            {"key":"/works/B"},
            {"key":"/works/C"}
        ]}"#;

        let ids: Vec<String> = parse_search_page(body)
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["/works/A", "/works/B", "/works/C"]);
    }

    #[test]
    fn missing_docs_is_an_empty_page() {
        assert!(parse_search_page(br#"{"numFound":0}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = parse_search_page(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, BookFinderError::Decode(_)));
    }
}
