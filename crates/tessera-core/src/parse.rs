//! Parsers for the comma-separated list columns of the sheet.
//!
//! All three parsers split on every comma with no escaping, trim each field
//! and keep empty segments. Absent or empty input yields an empty list.

use crate::models::{Extra, Resource, Tag};

fn segments(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.filter(|s| !s.is_empty())
        .into_iter()
        .flat_map(|s| s.split(','))
}

/// Parses `"a, b ,c"` into one tag per segment.
///
/// ```
/// use tessera_core::parse::parse_tags;
///
/// let tags = parse_tags(Some("a, b ,c"));
/// let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
/// assert_eq!(names, ["a", "b", "c"]);
/// assert!(parse_tags(None).is_empty());
/// ```
pub fn parse_tags(raw: Option<&str>) -> Vec<Tag> {
    segments(raw)
        .map(|tag| Tag {
            name: tag.trim().to_string(),
        })
        .collect()
}

/// Parses `key:value` segments.
///
/// Fields past the second colon are dropped, and a segment without a colon
/// has no value.
pub fn parse_extras(raw: Option<&str>) -> Vec<Extra> {
    segments(raw)
        .map(|extra| {
            let mut parts = extra.split(':');
            Extra {
                key: parts.next().unwrap_or_default().trim().to_string(),
                value: parts.next().map(|v| v.trim().to_string()),
            }
        })
        .collect()
}

/// Parses `url:description:format` segments.
///
/// The last two colon-separated fields are the description and format, and
/// everything before them is the URL, so a scheme or port survives intact.
/// A segment with a single colon has no format; one with no colon is just a
/// URL.
///
/// ```
/// use tessera_core::parse::parse_resources;
///
/// let res = parse_resources(Some("http://x:desc:csv"));
/// assert_eq!(res[0].url, "http://x");
/// assert_eq!(res[0].description.as_deref(), Some("desc"));
/// assert_eq!(res[0].format.as_deref(), Some("csv"));
/// ```
pub fn parse_resources(raw: Option<&str>) -> Vec<Resource> {
    segments(raw)
        .map(|resource| {
            let parts: Vec<&str> = resource.split(':').collect();
            let field = |s: &str| s.trim().to_string();
            match parts.as_slice() {
                [url] => Resource {
                    url: field(*url),
                    description: None,
                    format: None,
                },
                [url, description] => Resource {
                    url: field(*url),
                    description: Some(field(*description)),
                    format: None,
                },
                [url @ .., description, format] => Resource {
                    url: url.join(":").trim().to_string(),
                    description: Some(field(*description)),
                    format: Some(field(*format)),
                },
                [] => unreachable!("split always yields at least one item"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_trims() {
        assert_eq!(
            parse_tags(Some("a, b ,c")),
            vec![
                Tag { name: "a".into() },
                Tag { name: "b".into() },
                Tag { name: "c".into() },
            ]
        );
    }

    #[test]
    fn test_parse_tags_empty() {
        assert!(parse_tags(Some("")).is_empty());
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn test_parse_tags_keeps_duplicates_and_blanks() {
        let tags = parse_tags(Some("x,,x"));
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[1].name, "");
        assert_eq!(tags[2].name, "x");
    }

    #[test]
    fn test_parse_extras() {
        assert_eq!(
            parse_extras(Some("color:red, size:large")),
            vec![
                Extra {
                    key: "color".into(),
                    value: Some("red".into())
                },
                Extra {
                    key: "size".into(),
                    value: Some("large".into())
                },
            ]
        );
    }

    #[test]
    fn test_parse_extras_without_colon() {
        assert_eq!(
            parse_extras(Some("flag")),
            vec![Extra {
                key: "flag".into(),
                value: None
            }]
        );
    }

    #[test]
    fn test_parse_extras_drops_after_second_field() {
        let extras = parse_extras(Some("homepage:http://example.org"));
        assert_eq!(extras[0].key, "homepage");
        assert_eq!(extras[0].value.as_deref(), Some("http"));
    }

    #[test]
    fn test_parse_extras_empty() {
        assert!(parse_extras(Some("")).is_empty());
        assert!(parse_extras(None).is_empty());
    }

    #[test]
    fn test_parse_resources_with_scheme() {
        assert_eq!(
            parse_resources(Some("http://x:desc:csv")),
            vec![Resource {
                url: "http://x".into(),
                description: Some("desc".into()),
                format: Some("csv".into()),
            }]
        );
    }

    #[test]
    fn test_parse_resources_with_port() {
        let res = parse_resources(Some(" https://host:8080/data.json : Feed : JSON "));
        assert_eq!(res[0].url, "https://host:8080/data.json");
        assert_eq!(res[0].description.as_deref(), Some("Feed"));
        assert_eq!(res[0].format.as_deref(), Some("JSON"));
    }

    #[test]
    fn test_parse_resources_missing_fields() {
        let res = parse_resources(Some("file.csv:Readings,bare.csv"));
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].url, "file.csv");
        assert_eq!(res[0].description.as_deref(), Some("Readings"));
        assert!(res[0].format.is_none());
        assert_eq!(res[1].url, "bare.csv");
        assert!(res[1].description.is_none());
        assert!(res[1].format.is_none());
    }

    #[test]
    fn test_parse_resources_empty() {
        assert!(parse_resources(Some("")).is_empty());
        assert!(parse_resources(None).is_empty());
    }
}
