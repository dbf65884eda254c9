use url::Url;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Bulutsantralim API key (`key`).
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Query parameter name used by Bulutsantralim (`key`).
    pub const FIELD: &'static str = "key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number normalized to the "90"-prefixed digit form Bulutsantralim
/// expects.
///
/// [`PhoneNumber::normalize`] strips formatting characters and rewrites the
/// country prefix; see its documentation for the exact rules.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "phone";

    /// Normalize a raw phone number.
    ///
    /// Spaces, hyphens, and parentheses are stripped first. A result that
    /// already starts with `90` is kept as-is; a leading `0` is replaced by
    /// `90`; anything else gets `90` prepended, except input that arrives
    /// already carrying an explicit `+90` prefix, which passes through with
    /// the plus sign intact (upstream quirk, preserved).
    pub fn normalize(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        let stripped: String = input
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '(' | ')'))
            .collect();
        if stripped.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let normalized = if stripped.starts_with("90") || stripped.starts_with("+90") {
            stripped
        } else if let Some(rest) = stripped.strip_prefix('0') {
            format!("90{rest}")
        } else {
            format!("90{stripped}")
        };

        Ok(Self(normalized))
    }

    /// Borrow the normalized value as sent to Bulutsantralim.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Area code used when listing available numbers (`area_code`).
///
/// Invariant: non-empty after trimming. [`AreaCode::default`] is `850`.
pub struct AreaCode(String);

impl AreaCode {
    /// Query parameter name used by Bulutsantralim (`area_code`).
    pub const FIELD: &'static str = "area_code";

    /// Area code used when none is specified.
    pub const DEFAULT: &'static str = "850";

    /// Create a validated [`AreaCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated area code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AreaCode {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Validated base URL for the Bulutsantralim API.
///
/// Invariant: parses as an absolute URL; stored without a trailing slash so
/// endpoint derivation never doubles separators.
pub struct BaseUrl(String);

impl BaseUrl {
    /// Production API base used when no override is configured.
    pub const DEFAULT: &'static str = "https://api.bulutsantralim.com";

    /// Parse and validate a base URL.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "base_url" });
        }
        Url::parse(trimmed).map_err(|_| ValidationError::InvalidBaseUrl {
            input: trimmed.to_owned(),
        })?;
        Ok(Self(trimmed.trim_end_matches('/').to_owned()))
    }

    /// Borrow the validated base URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full endpoint URL for `path` under this base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}
