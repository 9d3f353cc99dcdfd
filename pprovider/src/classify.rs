//! Failure classification: raw provider errors to user-facing categories.
//!
//! ```rust
//! use pprovider::{FailureCategory, ProviderError, classify};
//!
//! let error = ProviderError::authentication("http 401 Unauthorized: bad key");
//! let failure = classify(&error);
//!
//! assert_eq!(failure.category, FailureCategory::Unauthorized);
//! assert!(failure.raw.contains("401"));
//! ```

use std::fmt::{Display, Formatter};

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    QuotaOrBilling,
    Unauthorized,
    ModelUnavailable,
    Transient,
}

impl FailureCategory {
    pub fn friendly_message(&self) -> &'static str {
        match self {
            Self::QuotaOrBilling => {
                "AI service quota exceeded or billing issue. Please check your account."
            }
            Self::Unauthorized => "Authentication error with AI service. Check API key.",
            Self::ModelUnavailable => {
                "Requested model is unavailable. Contact admin or try a different model."
            }
            Self::Transient => "AI service temporarily unavailable. Please try again later.",
        }
    }
}

impl Display for FailureCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::QuotaOrBilling => "quota-or-billing",
            Self::Unauthorized => "unauthorized",
            Self::ModelUnavailable => "model-unavailable",
            Self::Transient => "transient",
        };

        f.write_str(label)
    }
}

/// A classified provider failure. The raw error text is kept verbatim for
/// diagnostics; the friendly message is the only part shown to end users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFailure {
    pub category: FailureCategory,
    pub friendly_message: String,
    pub raw: String,
}

impl ClassifiedFailure {
    /// Classifies any stringified error. Matching is case-insensitive
    /// substring search, first rule wins; unmatched input is `Transient`,
    /// so classification itself cannot fail.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();

        let category = if needle.contains("quota") || needle.contains("billing") {
            FailureCategory::QuotaOrBilling
        } else if needle.contains("401") || needle.contains("unauthorized") {
            FailureCategory::Unauthorized
        } else if needle.contains("model") || needle.contains("not found") {
            FailureCategory::ModelUnavailable
        } else {
            FailureCategory::Transient
        };

        Self {
            category,
            friendly_message: category.friendly_message().to_string(),
            raw,
        }
    }
}

pub fn classify(error: &ProviderError) -> ClassifiedFailure {
    ClassifiedFailure::from_raw(error.to_string())
}
