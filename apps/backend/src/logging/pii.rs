use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for PII redaction in log output.
///
/// All patterns are vetted literals; each construction site carries a single
/// allow for the unwrap.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Standard email addresses
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Phone-number-like digit runs (also catches dates of birth)
    pub fn phone() -> &'static Regex {
        static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\+?\d[\d\-. ()]{5,}\d").unwrap()
        });
        &PHONE_REGEX
    }

    /// Postgres constraint errors echo the whole offending row
    pub fn failing_row() -> &'static Regex {
        static FAILING_ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"Failing row contains \([^)]*\)").unwrap()
        });
        &FAILING_ROW_REGEX
    }
}

/// Redacts employee PII from a string.
///
/// - Row dumps in database errors are replaced wholesale
/// - Emails keep the first character of the local part and the full domain
/// - Phone numbers and other long digit runs become `[REDACTED_PHONE]`
pub fn redact(input: &str) -> String {
    let rows_redacted = PiiRegexRegistry::failing_row()
        .replace_all(input, "Failing row contains ([REDACTED_ROW])");

    let email_redacted =
        PiiRegexRegistry::email().replace_all(&rows_redacted, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.find('@') {
                Some(0) | None => full_match.to_string(),
                Some(at_pos) => {
                    let first_char = &full_match[..1];
                    let domain = &full_match[at_pos..];
                    format!("{first_char}***{domain}")
                }
            }
        });

    PiiRegexRegistry::phone()
        .replace_all(&email_redacted, "[REDACTED_PHONE]")
        .to_string()
}

/// Displays the wrapped string with [`redact`] applied.
pub struct Redacted<'a>(pub &'a str);

impl<'a> fmt::Display for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl<'a> fmt::Debug for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
