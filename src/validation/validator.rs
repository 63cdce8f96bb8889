use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use tracing::{instrument, trace};

use super::{
    ParsedArgs, ParsedValue, Predicate, RuleType, RuleViolation, ValidationError,
    ValidationResult, ValidationRule, ValidationSchema, extract_options,
};

/// Validates raw argument tokens against a [`ValidationSchema`].
///
/// Holds a registry of custom type checks keyed by type name. The registry
/// can change at any time and affects every later validation.
#[derive(Default)]
pub struct Validator {
    type_rules: RwLock<HashMap<String, Predicate<ParsedValue>>>,
}

impl Validator {
    /// Creates a validator with no custom type checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `predicate` for every rule whose type is named `type_name`,
    /// replacing an earlier registration.
    pub fn add_rule(&self, type_name: impl Into<String>, predicate: Predicate<ParsedValue>) {
        self.type_rules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_name.into(), predicate);
    }

    /// Removes the check registered for `type_name`. Returns whether one existed.
    pub fn remove_rule(&self, type_name: &str) -> bool {
        self.type_rules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(type_name)
            .is_some()
    }

    /// Validates `args` against `schema`.
    ///
    /// Runs the positional pass, the named-option pass, and the schema-wide
    /// check, and reports the failures of all three. Within one value, only
    /// the first failing check is reported.
    #[instrument(skip_all, fields(args = args.len()))]
    pub async fn validate(&self, args: &[String], schema: &ValidationSchema) -> ValidationResult {
        let mut errors = Vec::new();
        let mut parsed = ParsedArgs::default();

        for (index, rule) in schema.args.iter().enumerate() {
            match args.get(index) {
                Some(raw) => match self.check_value(raw, rule).await {
                    Ok(value) => parsed.args.push(value),
                    Err(error) => errors.push(error),
                },
                None if rule.required => errors.push(missing(rule)),
                None => {}
            }
        }

        let options = extract_options(args);

        if !schema.allow_unknown {
            let unknown: Vec<&str> = options
                .iter()
                .map(|(name, _)| name.as_str())
                .filter(|name| schema.find_option(name).is_none())
                .collect();

            if !unknown.is_empty() {
                let field = unknown.join(", ");
                errors.push(ValidationError::new(
                    field.clone(),
                    RuleViolation::Unknown,
                    format!("Unknown options: {field}"),
                ));
            }
        }

        for rule in schema.options.iter().filter(|rule| rule.required) {
            if !options.iter().any(|(name, _)| *name == rule.name) {
                errors.push(missing(rule));
            }
        }

        for (name, raw) in &options {
            let Some(rule) = schema.find_option(name) else {
                continue;
            };
            match self.check_value(raw, rule).await {
                Ok(value) => {
                    parsed.options.insert(name.clone(), value);
                }
                Err(error) => errors.push(error),
            }
        }

        if let Some(predicate) = &schema.validate {
            match predicate.evaluate(args.to_vec()).await {
                Ok(true) => {}
                Ok(false) => errors.push(ValidationError::new(
                    "*",
                    RuleViolation::Custom,
                    "Arguments failed validation",
                )),
                Err(message) => {
                    errors.push(ValidationError::new("*", RuleViolation::Parse, message));
                }
            }
        }

        trace!(errors = errors.len(), "validation finished");
        ValidationResult::from_parts(errors, parsed)
    }

    /// Coerces one token and runs the rule's checks in order, stopping at
    /// the first failure.
    async fn check_value(
        &self,
        raw: &str,
        rule: &ValidationRule,
    ) -> Result<ParsedValue, ValidationError> {
        let fail = |violation: RuleViolation, default: String| {
            let message = rule.message.clone().unwrap_or(default);
            ValidationError::new(rule.name.clone(), violation, message)
        };

        let value = coerce(raw, &rule.rule_type).map_err(|reason| {
            fail(RuleViolation::Parse, format!("{}: {reason}", rule.name))
        })?;

        if let Some(allowed) = &rule.allowed {
            if !allowed.contains(&value) {
                let choices = allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(fail(
                    RuleViolation::Enum,
                    format!("{} must be one of: {choices}", rule.name),
                ));
            }
        }

        if let ParsedValue::Number(number) = value {
            if let Some(min) = rule.min.filter(|min| number < *min) {
                return Err(fail(
                    RuleViolation::Min,
                    format!("{} must be at least {min}", rule.name),
                ));
            }
            if let Some(max) = rule.max.filter(|max| number > *max) {
                return Err(fail(
                    RuleViolation::Max,
                    format!("{} must be at most {max}", rule.name),
                ));
            }
        }

        if let (RuleType::String, ParsedValue::String(text)) = (&rule.rule_type, &value) {
            let length = text.chars().count() as f64;
            if let Some(min) = rule.min.filter(|min| length < *min) {
                return Err(fail(
                    RuleViolation::MinLength,
                    format!("{} must be at least {min} characters", rule.name),
                ));
            }
            if let Some(max) = rule.max.filter(|max| length > *max) {
                return Err(fail(
                    RuleViolation::MaxLength,
                    format!("{} must be at most {max} characters", rule.name),
                ));
            }

            if let Some(pattern) = &rule.pattern {
                if !pattern.is_match(text) {
                    return Err(fail(
                        RuleViolation::Pattern,
                        format!("{} must match {}", rule.name, pattern.as_str()),
                    ));
                }
            }
        }

        if let Some(predicate) = &rule.validate {
            match predicate.evaluate(value.clone()).await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(fail(
                        RuleViolation::Custom,
                        format!("{} failed validation", rule.name),
                    ));
                }
                Err(message) => return Err(fail(RuleViolation::Parse, message)),
            }
        }

        let type_rule = self
            .type_rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(rule.rule_type.name())
            .cloned();

        if let Some(predicate) = type_rule {
            match predicate.evaluate(value.clone()).await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(fail(
                        RuleViolation::Type,
                        format!("{} is not a valid {}", rule.name, rule.rule_type),
                    ));
                }
                Err(message) => return Err(fail(RuleViolation::Parse, message)),
            }
        }

        Ok(value)
    }
}

fn missing(rule: &ValidationRule) -> ValidationError {
    let message = rule
        .message
        .clone()
        .unwrap_or_else(|| format!("{} is required", rule.name));
    ValidationError::new(rule.name.clone(), RuleViolation::Required, message)
}

fn coerce(raw: &str, rule_type: &RuleType) -> Result<ParsedValue, String> {
    match rule_type {
        RuleType::String | RuleType::Custom(_) => Ok(ParsedValue::String(raw.to_string())),
        RuleType::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(ParsedValue::Number)
            .ok_or_else(|| format!("'{raw}' is not a number")),
        RuleType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(ParsedValue::Boolean(true)),
            "false" => Ok(ParsedValue::Boolean(false)),
            _ => Err(format!("'{raw}' is not a boolean")),
        },
        RuleType::Array => Ok(ParsedValue::Array(
            raw.split(',').map(|item| item.trim().to_string()).collect(),
        )),
    }
}
