//! Log-safe rendering helpers
//!
//! API tokens never reach logs or `config show` output unmasked, and backend
//! error bodies are truncated before they are logged or shown to the user.

use std::fmt;

/// Masked API token for logging
///
/// Only the first 6 characters are shown, the rest becomes `***`.
#[derive(Clone, Debug)]
pub struct SensitiveToken<'a> {
    inner: &'a str,
}

impl<'a> SensitiveToken<'a> {
    /// # Example
    /// ```
    /// use sales_estimator::logging::SensitiveToken;
    ///
    /// let token = SensitiveToken::new("est_live_8f2c1a9d");
    /// assert_eq!(format!("{}", token), "est_li***");
    /// ```
    pub fn new(token: &'a str) -> Self {
        Self { inner: token }
    }
}

impl<'a> fmt::Display for SensitiveToken<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible_len = 6;
        match self.inner.get(..visible_len) {
            Some(prefix) if self.inner.len() > visible_len * 2 => write!(f, "{}***", prefix),
            // too short to reveal anything
            _ => write!(f, "***"),
        }
    }
}

/// Owned masked form of an optional token, for serializing into output
pub fn mask_token(token: Option<&str>) -> Option<String> {
    token.map(|t| SensitiveToken::new(t).to_string())
}

/// Truncate a response body to `max_size` bytes on a char boundary
///
/// Returns the (possibly shortened) body and whether it was cut.
pub fn truncate_body(body: String, max_size: usize) -> (String, bool) {
    if body.len() <= max_size {
        return (body, false);
    }
    let mut end = max_size;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    (format!("{}...", &body[..end]), true)
}
