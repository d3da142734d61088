//! Template renderer.

use super::format_timestamp;
use crate::reference::IssueReference;
use crate::tracker::Comment;
use chrono::{DateTime, Utc};
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

/// Header crediting the original author.
const ATTRIBUTION_TEMPLATE: &str = "_From @{{author}} on {{date}}_";

/// Body of the issue created on the destination repository.
const ISSUE_BODY_TEMPLATE: &str =
    "{{attribution}}\n\n{{body}}\n\n_Copied from original issue {{org}}/{{repo}}#{{number}}_";

/// Body of each comment copied to the destination issue.
const COMMENT_BODY_TEMPLATE: &str = "{{attribution}}\n\n{{body}}";

/// Comment left on the source issue before it is closed.
const MOVED_NOTICE_TEMPLATE: &str = "This issue was moved to {{org}}/{{repo}}#{{number}}";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Renders the text posted while moving an issue.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the attribution header for content written by `author` at
    /// `created_at`.
    ///
    /// The output is a pure function of its inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_attribution(
        &self,
        author: &str,
        created_at: &DateTime<Utc>,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "author": author,
            "date": format_timestamp(created_at)
        });

        self.render_template(ATTRIBUTION_TEMPLATE, &data)
    }

    /// Renders the body of the destination issue.
    ///
    /// # Arguments
    ///
    /// * `author` - Login of the source issue author
    /// * `created_at` - Creation time of the source issue
    /// * `body` - Original issue body
    /// * `source` - Issue being moved
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_issue_body(
        &self,
        author: &str,
        created_at: &DateTime<Utc>,
        body: &str,
        source: &IssueReference,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "attribution": self.render_attribution(author, created_at)?,
            "body": body,
            "org": source.org,
            "repo": source.repo,
            "number": source.number
        });

        self.render_template(ISSUE_BODY_TEMPLATE, &data)
    }

    /// Renders the body of a comment copied to the destination issue.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comment_body(&self, comment: &Comment) -> Result<String, super::TemplateError> {
        let data = json!({
            "attribution": self.render_attribution(&comment.author, &comment.created_at)?,
            "body": comment.body
        });

        self.render_template(COMMENT_BODY_TEMPLATE, &data)
    }

    /// Renders the notice posted on the source issue.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_moved_notice(
        &self,
        destination: &IssueReference,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "org": destination.org,
            "repo": destination.repo,
            "number": destination.number
        });

        self.render_template(MOVED_NOTICE_TEMPLATE, &data)
    }

    /// Renders a template with the given data.
    fn render_template(&self, template: &str, data: &Value) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn can_render_attribution() {
        let renderer = TemplateRenderer::new();
        let header = renderer.render_attribution("octocat", &sample_time()).unwrap();
        assert_eq!(header, "_From @octocat on Tue, 14 Mar 2023 15:09:26 GMT_");
    }

    #[test]
    fn attribution_is_deterministic() {
        let renderer = TemplateRenderer::new();
        let first = renderer.render_attribution("octocat", &sample_time()).unwrap();
        let second = TemplateRenderer::new()
            .render_attribution("octocat", &sample_time())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn can_render_issue_body() {
        let renderer = TemplateRenderer::new();
        let source = IssueReference::new("acme", "widgets", 42);
        let body = renderer
            .render_issue_body("octocat", &sample_time(), "It breaks.", &source)
            .unwrap();

        assert_eq!(
            body,
            "_From @octocat on Tue, 14 Mar 2023 15:09:26 GMT_\n\n\
             It breaks.\n\n\
             _Copied from original issue acme/widgets#42_"
        );
    }

    #[test]
    fn can_render_comment_body() {
        let renderer = TemplateRenderer::new();
        let comment = Comment {
            author: "hubot".to_string(),
            created_at: sample_time(),
            body: "Me too".to_string(),
        };

        assert_eq!(
            renderer.render_comment_body(&comment).unwrap(),
            "_From @hubot on Tue, 14 Mar 2023 15:09:26 GMT_\n\nMe too"
        );
    }

    #[test]
    fn can_render_moved_notice() {
        let renderer = TemplateRenderer::new();
        let notice = renderer
            .render_moved_notice(&IssueReference::new("acme", "widgets2", 7))
            .unwrap();
        assert_eq!(notice, "This issue was moved to acme/widgets2#7");
    }

    #[test]
    fn content_is_not_escaped_or_interpreted() {
        let renderer = TemplateRenderer::new();
        let comment = Comment {
            author: "hubot".to_string(),
            created_at: sample_time(),
            body: "<b>{{not_a_variable}}</b> & co".to_string(),
        };

        let rendered = renderer.render_comment_body(&comment).unwrap();
        assert!(rendered.ends_with("<b>{{not_a_variable}}</b> & co"));
    }
}
