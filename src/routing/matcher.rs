//! Path-template matcher
//!
//! Matches a concrete request path against a route template such as
//! `/tables/{tableId}`. Literal segments must match exactly; `{name}`
//! segments capture the corresponding path segment into a parameter map.

use std::collections::HashMap;

/// Match a path against a template, producing captured parameters.
///
/// Returns `None` when the path does not match. Segment counts must agree
/// and an empty path segment never satisfies a capture.
pub fn match_template(template: &str, path: &str) -> Option<HashMap<String, String>> {
    let template_segments: Vec<&str> = template.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();

    if template_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (template_segment, path_segment) in template_segments.iter().zip(&path_segments) {
        if let Some(name) = capture_name(template_segment) {
            if path_segment.is_empty() {
                return None;
            }
            params.insert(name.to_string(), (*path_segment).to_string());
        } else if template_segment != path_segment {
            return None;
        }
    }

    Some(params)
}

/// Parameter name of a `{name}` segment, `None` for literals
fn capture_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let params = match_template("/tables", "/tables").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_literal_mismatch() {
        assert!(match_template("/tables", "/reservations").is_none());
        assert!(match_template("/tables", "/Tables").is_none());
    }

    #[test]
    fn test_capture() {
        let params = match_template("/tables/{tableId}", "/tables/42").unwrap();
        assert_eq!(params.get("tableId").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_segment_count_mismatch() {
        assert!(match_template("/tables/{tableId}", "/tables").is_none());
        assert!(match_template("/tables/{tableId}", "/tables/42/extra").is_none());
        assert!(match_template("/tables", "/tables/42").is_none());
    }

    #[test]
    fn test_empty_segment_does_not_capture() {
        assert!(match_template("/tables/{tableId}", "/tables/").is_none());
    }

    #[test]
    fn test_capture_is_opaque() {
        // The matcher binds whatever the segment holds; validation is the
        // handler's concern.
        let params = match_template("/tables/{tableId}", "/tables/not-a-number").unwrap();
        assert_eq!(
            params.get("tableId").map(String::as_str),
            Some("not-a-number")
        );
    }
}
