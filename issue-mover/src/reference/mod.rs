//! Parsing of issue URLs and `org/repo` strings.
//!
//! Both parsers are pure functions of their input and validate shape only;
//! whether the referenced repository or issue exists is decided later by the
//! tracker.

mod error;
mod issue_ref;
mod repo_ref;

pub use error::ParseError;
pub use issue_ref::IssueReference;
pub use repo_ref::RepositoryReference;

use url::Url;

/// Web host of public GitHub.
pub const DEFAULT_WEB_HOST: &str = "github.com";

/// Parses an issue URL such as `https://github.com/acme/widgets/issues/42`.
///
/// Query strings and fragments are ignored, as are empty path segments
/// (so a trailing slash is accepted).
///
/// # Arguments
///
/// * `input` - Absolute issue URL
/// * `host` - Expected web host of the tracker (e.g. `github.com`)
///
/// # Errors
///
/// Returns the [`ParseError`] variant describing the first check that failed.
pub fn parse_issue_ref(input: &str, host: &str) -> Result<IssueReference, ParseError> {
    let url = Url::parse(input.trim()).map_err(|_| ParseError::MalformedUrl {
        input: input.to_string(),
    })?;

    let segments: Vec<&str> = match url.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).collect(),
        None => {
            return Err(ParseError::MalformedUrl {
                input: input.to_string(),
            })
        }
    };

    let found = url.host_str().unwrap_or_default();
    if !found.eq_ignore_ascii_case(host) {
        return Err(ParseError::WrongHost {
            expected: host.to_string(),
            found: found.to_string(),
        });
    }

    let [org, repo, kind, number] = segments.as_slice() else {
        return Err(ParseError::BadIssuePathShape {
            path: url.path().to_string(),
        });
    };

    if *kind != "issues" {
        return Err(ParseError::NotAnIssueUrl {
            segment: (*kind).to_string(),
        });
    }

    let number = parse_issue_number(number)?;
    Ok(IssueReference::new(*org, *repo, number))
}

/// Parses a destination repository of the form `org/repo`.
///
/// # Errors
///
/// Returns [`ParseError::BadRepoFormat`] unless the input is exactly two
/// non-empty tokens separated by `/`.
pub fn parse_repo_ref(input: &str) -> Result<RepositoryReference, ParseError> {
    let trimmed = input.trim();
    match trimmed.split('/').collect::<Vec<_>>().as_slice() {
        [org, repo] if !org.is_empty() && !repo.is_empty() => {
            Ok(RepositoryReference::new(*org, *repo))
        }
        _ => Err(ParseError::BadRepoFormat {
            input: input.to_string(),
        }),
    }
}

/// Parses a base-10 issue number, rejecting signs and other decoration
/// that [`str::parse`] would otherwise accept.
fn parse_issue_number(segment: &str) -> Result<u64, ParseError> {
    let bad = || ParseError::BadIssueNumber {
        segment: segment.to_string(),
    };
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    segment.parse().map_err(|_| bad())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<IssueReference, ParseError> {
        parse_issue_ref(input, DEFAULT_WEB_HOST)
    }

    #[test]
    fn can_parse_issue_url() {
        let issue = parse("https://github.com/acme/widgets/issues/42").unwrap();
        assert_eq!(issue, IssueReference::new("acme", "widgets", 42));
        assert_eq!(issue.to_string(), "acme/widgets#42");
    }

    #[test]
    fn can_parse_issue_zero_and_trailing_slash() {
        let issue = parse("https://github.com/acme/widgets/issues/0/").unwrap();
        assert_eq!(issue.number, 0);
    }

    #[test]
    fn ignores_query_and_fragment() {
        let issue =
            parse("https://github.com/acme/widgets/issues/7?foo=bar#issuecomment-1").unwrap();
        assert_eq!(issue, IssueReference::new("acme", "widgets", 7));
    }

    #[test]
    fn host_comparison_is_case_insensitive() {
        assert!(parse("https://GitHub.com/acme/widgets/issues/1").is_ok());
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(matches!(
            parse("github.com/acme/widgets/issues/1"),
            Err(ParseError::MalformedUrl { .. })
        ));
        assert!(matches!(
            parse("not a url"),
            Err(ParseError::MalformedUrl { .. })
        ));
        assert!(matches!(
            parse("mailto:someone@github.com"),
            Err(ParseError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn rejects_wrong_host() {
        let err = parse("https://gitlab.com/acme/widgets/issues/1").unwrap_err();
        assert_eq!(
            err,
            ParseError::WrongHost {
                expected: "github.com".to_string(),
                found: "gitlab.com".to_string(),
            }
        );
    }

    #[test]
    fn accepts_custom_host() {
        let issue =
            parse_issue_ref("https://git.example.com/acme/widgets/issues/3", "git.example.com")
                .unwrap();
        assert_eq!(issue.number, 3);
    }

    #[test]
    fn rejects_bad_path_shape() {
        for url in [
            "https://github.com/acme/widgets",
            "https://github.com/acme/widgets/issues",
            "https://github.com/acme/widgets/issues/1/comments",
        ] {
            assert!(
                matches!(parse(url), Err(ParseError::BadIssuePathShape { .. })),
                "{url}"
            );
        }
    }

    #[test]
    fn rejects_non_issue_url() {
        assert_eq!(
            parse("https://github.com/acme/widgets/pull/1").unwrap_err(),
            ParseError::NotAnIssueUrl {
                segment: "pull".to_string()
            }
        );
    }

    #[test]
    fn rejects_bad_issue_number() {
        for number in ["abc", "-1", "+1", "1.5", "99999999999999999999999"] {
            let url = format!("https://github.com/acme/widgets/issues/{number}");
            assert!(
                matches!(parse(&url), Err(ParseError::BadIssueNumber { .. })),
                "{url}"
            );
        }
    }

    #[test]
    fn can_parse_repo_ref() {
        assert_eq!(
            parse_repo_ref("a/b").unwrap(),
            RepositoryReference::new("a", "b")
        );
        assert_eq!(parse_repo_ref(" acme/widgets2 ").unwrap().to_string(), "acme/widgets2");
    }

    #[test]
    fn rejects_bad_repo_format() {
        for input in ["a/b/c", "a", "", "/b", "a/", "/"] {
            assert!(
                matches!(parse_repo_ref(input), Err(ParseError::BadRepoFormat { .. })),
                "{input:?}"
            );
        }
    }
}
