use std::fmt;

use serde::Serialize;

use super::ParsedArgs;

/// Which check a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleViolation {
    /// A required argument or option is missing.
    Required,
    /// Options not declared by the schema were supplied.
    Unknown,
    /// The token could not be coerced, or a check panicked.
    Parse,
    /// The value is not one of the allowed values.
    Enum,
    /// A number is below the minimum.
    Min,
    /// A number is above the maximum.
    Max,
    /// A string is shorter than the minimum.
    MinLength,
    /// A string is longer than the maximum.
    MaxLength,
    /// A string does not match the pattern.
    Pattern,
    /// A rule-level or schema-level check returned false.
    Custom,
    /// The check registered for the rule's type returned false.
    Type,
}

impl RuleViolation {
    /// Stable name of the violation.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleViolation::Required => "required",
            RuleViolation::Unknown => "unknown",
            RuleViolation::Parse => "parse",
            RuleViolation::Enum => "enum",
            RuleViolation::Min => "min",
            RuleViolation::Max => "max",
            RuleViolation::MinLength => "minLength",
            RuleViolation::MaxLength => "maxLength",
            RuleViolation::Pattern => "pattern",
            RuleViolation::Custom => "custom",
            RuleViolation::Type => "type",
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Argument or option name; `*` for schema-wide checks.
    pub field: String,
    /// The check that failed.
    pub rule: RuleViolation,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    /// Creates a failure for `field`.
    pub fn new(field: impl Into<String>, rule: RuleViolation, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

/// Outcome of validating one argument list.
///
/// `parsed` is present exactly when there are no errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    parsed: Option<ParsedArgs>,
}

impl ValidationResult {
    pub(crate) fn from_parts(errors: Vec<ValidationError>, parsed: ParsedArgs) -> Self {
        let parsed = errors.is_empty().then_some(parsed);
        Self { errors, parsed }
    }

    /// Whether every check passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every failure, positional failures first.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Typed values, when valid.
    pub fn parsed(&self) -> Option<&ParsedArgs> {
        self.parsed.as_ref()
    }

    /// Converts into the typed values or the list of failures.
    pub fn into_result(self) -> Result<ParsedArgs, Vec<ValidationError>> {
        match self.parsed {
            Some(parsed) => Ok(parsed),
            None => Err(self.errors),
        }
    }
}
