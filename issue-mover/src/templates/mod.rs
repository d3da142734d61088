//! Text composition for moved issues using Handlebars.
//!
//! Everything posted on either repository during a move is rendered here:
//! the attribution header, the destination issue body, copied comment
//! bodies and the notice left on the source issue.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

use chrono::{DateTime, Utc};

/// RFC 1123 date layout, always rendered in UTC.
const RFC_1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a timestamp for attribution headers.
///
/// Format: "Tue, 15 Nov 1994 08:12:31 GMT"
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(RFC_1123_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_rfc_1123() {
        let ts = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(format_timestamp(&ts), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn format_is_fixed_width() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_timestamp(&early).len(), format_timestamp(&late).len());
    }
}
