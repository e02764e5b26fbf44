//! Pagination helpers

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The server advertised a following page
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_next: bool) -> Self {
        Self { items, has_next }
    }

    /// A page after which the server signals no more data
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, false)
    }
}

/// Check a `Link` header for a `rel="next"` entry
///
/// GitHub formats the header as
/// `<https://api.github.com/user/orgs?page=2>; rel="next", <...>; rel="last"`.
/// A missing or malformed header means there is no next page.
pub fn parse_has_next_link(link: Option<&str>) -> bool {
    let Some(link) = link else {
        return false;
    };

    link.split(',').any(|entry| {
        entry.split(';').skip(1).any(|param| {
            param
                .trim()
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"'))
                .is_some_and(|rel| rel.split_whitespace().any(|r| r == "next"))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_link_present() {
        let link = r#"<https://api.github.com/organizations/1/repos?page=2>; rel="next", <https://api.github.com/organizations/1/repos?page=5>; rel="last""#;
        assert!(parse_has_next_link(Some(link)));
    }

    #[test]
    fn test_next_link_absent_on_last_page() {
        let link = r#"<https://api.github.com/organizations/1/repos?page=4>; rel="prev", <https://api.github.com/organizations/1/repos?page=1>; rel="first""#;
        assert!(!parse_has_next_link(Some(link)));
    }

    #[test]
    fn test_missing_or_garbage_header() {
        assert!(!parse_has_next_link(None));
        assert!(!parse_has_next_link(Some("")));
        assert!(!parse_has_next_link(Some("next")));
        assert!(!parse_has_next_link(Some("<https://x>; rel=\"nextish\"")));
    }
}
