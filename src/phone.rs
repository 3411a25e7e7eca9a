//! Phone number and phone-number-id helpers.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::CoraError;

static NON_DIGITS: OnceLock<Regex> = OnceLock::new();

fn non_digits() -> &'static Regex {
    NON_DIGITS.get_or_init(|| Regex::new(r"\D+").expect("valid non-digit pattern"))
}

/// Best-effort US-centric cleanup that approximates E.164 for `+1` numbers.
///
/// Ten digits gain a `+1` prefix and eleven digits starting with `1` gain a
/// `+`. Anything else is returned unchanged; this is not E.164 validation.
///
/// ```
/// assert_eq!(cora::phone::normalize_phone("(956) 670-7155"), "+19566707155");
/// assert_eq!(cora::phone::normalize_phone("123"), "123");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let digits = non_digits().replace_all(raw, "");
    match digits.len() {
        10 => format!("+1{digits}"),
        11 if digits.starts_with('1') => format!("+{digits}"),
        _ => raw.to_string(),
    }
}

/// Parse a phone number id copied out of a dotenv file or a shell.
///
/// Trims whitespace, drops a trailing `# comment` and surrounding quotes.
/// Returns `None` when nothing is left.
pub fn parse_phone_number_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let without_comment = trimmed.split('#').next().unwrap_or_default().trim();
    let unquoted = without_comment.trim_matches(|c| c == '"' || c == '\'');
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

/// Ensure a phone number id is a UUID, as the call endpoint requires.
pub fn validate_phone_number_id(id: &str) -> Result<(), CoraError> {
    Uuid::parse_str(id).map(|_| ()).map_err(|_| {
        CoraError::invalid(format!(
            "phone_number_id must be a UUID (got {id:?}); update VAPI_PHONE_NUMBER_ID or pass a UUID explicitly"
        ))
    })
}
