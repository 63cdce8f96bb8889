//! Declarative argument validation.
//!
//! A [`ValidationSchema`] describes the positional arguments and named
//! `--options` a command accepts. The [`Validator`] checks raw tokens
//! against it and either produces typed [`ParsedArgs`] or reports every
//! problem at once. Validation never fails with an error: all failures
//! are returned as data in the [`ValidationResult`].

mod options;
mod predicate;
mod result;
mod rule;
mod validator;
mod value;

#[cfg(test)]
mod tests;

pub use options::extract_options;
pub use predicate::Predicate;
pub use result::{RuleViolation, ValidationError, ValidationResult};
pub use rule::{RuleType, ValidationRule, ValidationSchema};
pub use validator::Validator;
pub use value::{ParsedArgs, ParsedValue};
