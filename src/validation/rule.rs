use std::fmt;

use regex::Regex;

use super::{ParsedValue, Predicate};

/// Expected type of an argument or option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Any text.
    String,
    /// A finite number.
    Number,
    /// `true` or `false`, case-insensitive.
    Boolean,
    /// Comma-separated list.
    Array,
    /// A user-defined type, checked by a predicate registered on the
    /// [`Validator`](super::Validator) under this name.
    Custom(String),
}

impl RuleType {
    /// Name under which custom checks for this type are registered.
    pub fn name(&self) -> &str {
        match self {
            RuleType::String => "string",
            RuleType::Number => "number",
            RuleType::Boolean => "boolean",
            RuleType::Array => "array",
            RuleType::Custom(name) => name,
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Specification of one positional argument or named option.
///
/// `min`/`max` bound numbers for [`RuleType::Number`] and character counts
/// for [`RuleType::String`]. Arrays are not length-checked.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    /// Argument or option name.
    pub name: String,
    /// Expected type.
    pub rule_type: RuleType,
    /// Whether the value must be supplied.
    pub required: bool,
    /// Allowed values, compared after coercion.
    pub allowed: Option<Vec<ParsedValue>>,
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
    /// Pattern a string must contain a match for.
    pub pattern: Option<Regex>,
    /// Extra check on the coerced value.
    pub validate: Option<Predicate<ParsedValue>>,
    /// Message used instead of the default for every failure of this rule.
    pub message: Option<String>,
}

impl ValidationRule {
    /// Creates an optional rule of the given type.
    pub fn new(name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            name: name.into(),
            rule_type,
            required: false,
            allowed: None,
            min: None,
            max: None,
            pattern: None,
            validate: None,
            message: None,
        }
    }

    /// Creates a string rule.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, RuleType::String)
    }

    /// Creates a number rule.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, RuleType::Number)
    }

    /// Creates a boolean rule.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, RuleType::Boolean)
    }

    /// Creates an array rule.
    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, RuleType::Array)
    }

    /// Creates a rule of a user-defined type.
    pub fn custom(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, RuleType::Custom(type_name.into()))
    }

    /// Marks the value as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restricts the value to `values`.
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParsedValue>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Requires strings to contain a match for `pattern`.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Adds an extra check on the coerced value.
    pub fn validate(mut self, predicate: Predicate<ParsedValue>) -> Self {
        self.validate = Some(predicate);
        self
    }

    /// Overrides the failure message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Expected arguments and options of a command.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    /// Positional rules, in order.
    pub args: Vec<ValidationRule>,
    /// Named option rules, in declaration order.
    pub options: Vec<ValidationRule>,
    /// Accept options the schema does not declare.
    pub allow_unknown: bool,
    /// Check over the whole raw argument list.
    pub validate: Option<Predicate<Vec<String>>>,
}

impl ValidationSchema {
    /// Creates an empty schema that rejects unknown options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional rule.
    pub fn arg(mut self, rule: ValidationRule) -> Self {
        self.args.push(rule);
        self
    }

    /// Declares a named option, replacing an earlier one of the same name.
    pub fn option(mut self, rule: ValidationRule) -> Self {
        match self.options.iter_mut().find(|existing| existing.name == rule.name) {
            Some(existing) => *existing = rule,
            None => self.options.push(rule),
        }
        self
    }

    /// Accepts or rejects undeclared options.
    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    /// Adds a check over the whole raw argument list.
    pub fn validate(mut self, predicate: Predicate<Vec<String>>) -> Self {
        self.validate = Some(predicate);
        self
    }

    /// The rule for option `name`.
    pub fn find_option(&self, name: &str) -> Option<&ValidationRule> {
        self.options.iter().find(|rule| rule.name == name)
    }
}
