//! Unit tests for the validation engine
//!
//! Covers coercion, check ordering, option extraction, and the custom
//! type registry.

#![allow(clippy::panic, clippy::unwrap_used)]

use regex::Regex;

use crate::validation::{
    ParsedValue, Predicate, RuleViolation, ValidationRule, ValidationSchema, Validator,
    extract_options,
};

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|token| token.to_string()).collect()
}

#[tokio::test]
async fn missing_required_args_report_one_error_each_in_order() {
    let schema = ValidationSchema::new()
        .arg(ValidationRule::string("source").required())
        .arg(ValidationRule::string("target").required());

    let result = Validator::new().validate(&[], &schema).await;

    assert!(!result.is_valid());
    assert!(result.parsed().is_none());
    let fields: Vec<&str> = result.errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["source", "target"]);
    assert!(
        result
            .errors()
            .iter()
            .all(|e| e.rule == RuleViolation::Required)
    );
}

#[tokio::test]
async fn typed_positional_values_are_coerced() {
    let schema = ValidationSchema::new()
        .arg(ValidationRule::number("count"))
        .arg(ValidationRule::boolean("force"))
        .arg(ValidationRule::array("tags"));

    let result = Validator::new()
        .validate(&tokens(&["123", "true", "a,b,c"]), &schema)
        .await;

    assert!(result.is_valid());
    let parsed = result.parsed().unwrap();
    assert_eq!(
        parsed.args,
        vec![
            ParsedValue::Number(123.0),
            ParsedValue::Boolean(true),
            ParsedValue::Array(tokens(&["a", "b", "c"])),
        ]
    );
}

#[tokio::test]
async fn optional_trailing_args_may_be_omitted() {
    let schema = ValidationSchema::new()
        .arg(ValidationRule::string("name").required())
        .arg(ValidationRule::number("count"));

    let result = Validator::new().validate(&tokens(&["otter"]), &schema).await;

    assert!(result.is_valid());
    assert_eq!(result.parsed().unwrap().args, vec![ParsedValue::from("otter")]);
}

#[tokio::test]
async fn array_items_are_trimmed() {
    let schema = ValidationSchema::new().arg(ValidationRule::array("items"));

    let result = Validator::new()
        .validate(&tokens(&[" a , b,c "]), &schema)
        .await;

    assert_eq!(
        result.parsed().unwrap().arg(0).unwrap().as_array().unwrap(),
        &tokens(&["a", "b", "c"])[..]
    );
}

#[tokio::test]
async fn unparseable_number_is_a_parse_error() {
    let schema = ValidationSchema::new().arg(ValidationRule::number("count"));

    for raw in ["abc", "", "NaN", "inf"] {
        let result = Validator::new().validate(&tokens(&[raw]), &schema).await;
        assert_eq!(result.errors().len(), 1, "input {raw:?}");
        assert_eq!(result.errors()[0].rule, RuleViolation::Parse);
    }
}

#[tokio::test]
async fn boolean_accepts_only_true_or_false_in_any_case() {
    let schema = ValidationSchema::new().arg(ValidationRule::boolean("flag"));
    let validator = Validator::new();

    let upper = validator.validate(&tokens(&["FALSE"]), &schema).await;
    assert_eq!(upper.parsed().unwrap().args, vec![ParsedValue::Boolean(false)]);

    let yes = validator.validate(&tokens(&["yes"]), &schema).await;
    assert_eq!(yes.errors()[0].rule, RuleViolation::Parse);
}

#[tokio::test]
async fn unknown_option_is_rejected_by_default() {
    let schema = ValidationSchema::new().option(ValidationRule::number("y"));

    let result = Validator::new().validate(&tokens(&["--x", "1"]), &schema).await;

    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].rule, RuleViolation::Unknown);
    assert_eq!(result.errors()[0].field, "x");
}

#[tokio::test]
async fn unknown_options_are_reported_together() {
    let schema = ValidationSchema::new();

    let result = Validator::new()
        .validate(&tokens(&["--a", "--b", "2"]), &schema)
        .await;

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].field, "a, b");
}

#[tokio::test]
async fn unknown_options_pass_when_allowed() {
    let schema = ValidationSchema::new().allow_unknown(true);

    let result = Validator::new().validate(&tokens(&["--x", "1"]), &schema).await;

    assert!(result.is_valid());
    assert!(result.parsed().unwrap().options.is_empty());
}

#[tokio::test]
async fn named_options_are_typed() {
    let schema = ValidationSchema::new()
        .option(ValidationRule::number("depth"))
        .option(ValidationRule::boolean("verbose"));

    let result = Validator::new()
        .validate(&tokens(&["--verbose", "--depth", "3"]), &schema)
        .await;

    let parsed = result.parsed().unwrap();
    assert_eq!(parsed.option("depth"), Some(&ParsedValue::Number(3.0)));
    assert_eq!(parsed.option("verbose"), Some(&ParsedValue::Boolean(true)));
}

#[tokio::test]
async fn required_option_errors_precede_option_value_errors() {
    let schema = ValidationSchema::new()
        .option(ValidationRule::number("depth"))
        .option(ValidationRule::string("name").required());

    let result = Validator::new()
        .validate(&tokens(&["--depth", "deep"]), &schema)
        .await;

    let rules: Vec<RuleViolation> = result.errors().iter().map(|e| e.rule).collect();
    assert_eq!(rules, vec![RuleViolation::Required, RuleViolation::Parse]);
    assert_eq!(result.errors()[0].field, "name");
    assert_eq!(result.errors()[1].field, "depth");
}

#[tokio::test]
async fn positional_errors_precede_named_errors() {
    let schema = ValidationSchema::new()
        .arg(ValidationRule::number("count").required())
        .option(ValidationRule::string("mode").required());

    let result = Validator::new().validate(&[], &schema).await;

    let fields: Vec<&str> = result.errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["count", "mode"]);
}

#[tokio::test]
async fn enum_is_checked_after_coercion() {
    let schema = ValidationSchema::new()
        .arg(ValidationRule::number("level").one_of([1, 2, 3]))
        .arg(ValidationRule::string("color").one_of(["red", "green"]));
    let validator = Validator::new();

    let ok = validator.validate(&tokens(&["2", "red"]), &schema).await;
    assert!(ok.is_valid());

    let bad = validator.validate(&tokens(&["5", "blue"]), &schema).await;
    let rules: Vec<RuleViolation> = bad.errors().iter().map(|e| e.rule).collect();
    assert_eq!(rules, vec![RuleViolation::Enum, RuleViolation::Enum]);
}

#[tokio::test]
async fn numeric_bounds_apply_to_numbers() {
    let schema = ValidationSchema::new().arg(ValidationRule::number("n").min(1.0).max(10.0));
    let validator = Validator::new();

    let low = validator.validate(&tokens(&["0"]), &schema).await;
    assert_eq!(low.errors()[0].rule, RuleViolation::Min);

    let high = validator.validate(&tokens(&["11"]), &schema).await;
    assert_eq!(high.errors()[0].rule, RuleViolation::Max);

    let edge = validator.validate(&tokens(&["10"]), &schema).await;
    assert!(edge.is_valid());
}

#[tokio::test]
async fn length_bounds_apply_to_strings_only() {
    let strings = ValidationSchema::new().arg(ValidationRule::string("s").min(2.0).max(3.0));
    let arrays = ValidationSchema::new().arg(ValidationRule::array("a").min(2.0).max(3.0));
    let validator = Validator::new();

    let short = validator.validate(&tokens(&["a"]), &strings).await;
    assert_eq!(short.errors()[0].rule, RuleViolation::MinLength);

    let long = validator.validate(&tokens(&["abcd"]), &strings).await;
    assert_eq!(long.errors()[0].rule, RuleViolation::MaxLength);

    let unchecked = validator.validate(&tokens(&["a,b,c,d,e"]), &arrays).await;
    assert!(unchecked.is_valid());
}

#[tokio::test]
async fn pattern_searches_string_values() {
    let schema = ValidationSchema::new()
        .arg(ValidationRule::string("branch").pattern(Regex::new("^feat/").unwrap()));
    let validator = Validator::new();

    assert!(validator.validate(&tokens(&["feat/x"]), &schema).await.is_valid());

    let result = validator.validate(&tokens(&["fix/x"]), &schema).await;
    assert_eq!(result.errors()[0].rule, RuleViolation::Pattern);
}

#[tokio::test]
async fn first_failing_check_wins() {
    let schema = ValidationSchema::new().arg(
        ValidationRule::string("s")
            .one_of(["abcdef"])
            .max(2.0)
            .pattern(Regex::new("^z").unwrap()),
    );

    let result = Validator::new().validate(&tokens(&["qq"]), &schema).await;

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].rule, RuleViolation::Enum);
}

#[tokio::test]
async fn rule_predicate_runs_after_builtin_checks() {
    let even = Predicate::new(|value: &ParsedValue| {
        value.as_f64().is_some_and(|n| n % 2.0 == 0.0)
    });
    let schema = ValidationSchema::new().arg(ValidationRule::number("n").validate(even));
    let validator = Validator::new();

    assert!(validator.validate(&tokens(&["4"]), &schema).await.is_valid());

    let odd = validator.validate(&tokens(&["3"]), &schema).await;
    assert_eq!(odd.errors()[0].rule, RuleViolation::Custom);
}

#[tokio::test]
async fn async_predicates_are_awaited() {
    let slow_check = Predicate::new_async(|value: ParsedValue| async move {
        tokio::task::yield_now().await;
        value.as_str() == Some("ok")
    });
    let schema = ValidationSchema::new().arg(ValidationRule::string("s").validate(slow_check));

    let result = Validator::new().validate(&tokens(&["nope"]), &schema).await;

    assert_eq!(result.errors()[0].rule, RuleViolation::Custom);
}

#[tokio::test]
async fn message_override_replaces_default() {
    let schema = ValidationSchema::new().arg(
        ValidationRule::number("port")
            .required()
            .message("port must be a valid TCP port"),
    );
    let validator = Validator::new();

    let missing = validator.validate(&[], &schema).await;
    assert_eq!(missing.errors()[0].message, "port must be a valid TCP port");

    let garbage = validator.validate(&tokens(&["http"]), &schema).await;
    assert_eq!(garbage.errors()[0].message, "port must be a valid TCP port");
}

#[tokio::test]
async fn custom_type_without_registered_rule_passes_through() {
    let schema = ValidationSchema::new().arg(ValidationRule::custom("when", "date"));

    let result = Validator::new().validate(&tokens(&["whenever"]), &schema).await;

    assert_eq!(result.parsed().unwrap().args, vec![ParsedValue::from("whenever")]);
}

#[tokio::test]
async fn registered_type_rules_apply_until_removed() {
    let schema = ValidationSchema::new().arg(ValidationRule::custom("when", "date"));
    let validator = Validator::new();
    validator.add_rule(
        "date",
        Predicate::new(|value: &ParsedValue| {
            value
                .as_str()
                .is_some_and(|text| chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok())
        }),
    );

    let rejected = validator.validate(&tokens(&["soon"]), &schema).await;
    assert_eq!(rejected.errors()[0].rule, RuleViolation::Type);

    let accepted = validator.validate(&tokens(&["2026-10-18"]), &schema).await;
    assert!(accepted.is_valid());

    assert!(validator.remove_rule("date"));
    assert!(!validator.remove_rule("date"));
    assert!(validator.validate(&tokens(&["soon"]), &schema).await.is_valid());
}

#[tokio::test]
async fn type_rules_can_target_builtin_types() {
    let schema = ValidationSchema::new().arg(ValidationRule::number("n"));
    let validator = Validator::new();
    validator.add_rule(
        "number",
        Predicate::new(|value: &ParsedValue| value.as_f64().is_some_and(|n| n.fract() == 0.0)),
    );

    let result = validator.validate(&tokens(&["1.5"]), &schema).await;

    assert_eq!(result.errors()[0].rule, RuleViolation::Type);
}

#[tokio::test]
async fn schema_check_failure_is_reported_on_star_field() {
    let schema = ValidationSchema::new()
        .allow_unknown(true)
        .validate(Predicate::new(|args: &Vec<String>| args.len() <= 2));

    let result = Validator::new()
        .validate(&tokens(&["a", "b", "c"]), &schema)
        .await;

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].field, "*");
    assert_eq!(result.errors()[0].rule, RuleViolation::Custom);
}

#[tokio::test]
async fn all_passes_run_even_after_failures() {
    let schema = ValidationSchema::new()
        .arg(ValidationRule::number("n").required())
        .validate(Predicate::new(|_: &Vec<String>| false));

    let result = Validator::new().validate(&tokens(&["x", "--z"]), &schema).await;

    let rules: Vec<RuleViolation> = result.errors().iter().map(|e| e.rule).collect();
    assert_eq!(
        rules,
        vec![
            RuleViolation::Parse,
            RuleViolation::Unknown,
            RuleViolation::Custom
        ]
    );
}

#[tokio::test]
async fn panicking_predicate_becomes_parse_error() {
    let schema = ValidationSchema::new().arg(
        ValidationRule::string("s").validate(Predicate::new(|_: &ParsedValue| -> bool { panic!("kaboom") })),
    );

    let result = Validator::new().validate(&tokens(&["x"]), &schema).await;

    assert_eq!(result.errors()[0].rule, RuleViolation::Parse);
    assert_eq!(result.errors()[0].message, "kaboom");
}

#[test]
fn extract_options_pairs_names_with_values() {
    let options = extract_options(&tokens(&["pos", "--a", "1", "--b", "--c", "x", "tail"]));

    assert_eq!(
        options,
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "true".to_string()),
            ("c".to_string(), "x".to_string()),
        ]
    );
}

#[test]
fn extract_options_trailing_flag_defaults_to_true() {
    let options = extract_options(&tokens(&["--dry-run"]));

    assert_eq!(options, vec![("dry-run".to_string(), "true".to_string())]);
}

#[test]
fn extract_options_repeated_name_keeps_last_value() {
    let options = extract_options(&tokens(&["--n", "1", "--m", "--n", "2"]));

    assert_eq!(
        options,
        vec![
            ("n".to_string(), "2".to_string()),
            ("m".to_string(), "true".to_string()),
        ]
    );
}
