//! Unit tests for the error taxonomy and handler
//!
//! Covers the detail shapes per code, log bounding, action dispatch, and
//! formatting.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::{
    io,
    sync::{
        Arc, mpsc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::{
    config::ErrorLogConfig,
    errors::{CommandError, ErrorCode, ErrorHandler, ErrorKind, ErrorRecord},
    validation::{RuleViolation, ValidationError},
};

#[test]
fn codes_render_as_screaming_snake_case() {
    let rendered: Vec<&str> = ErrorCode::ALL.iter().map(|code| code.as_str()).collect();
    assert_eq!(
        rendered,
        vec![
            "COMMAND_NOT_FOUND",
            "INVALID_ARGUMENTS",
            "PERMISSION_DENIED",
            "RATE_LIMIT_EXCEEDED",
            "EXECUTION_FAILED",
            "CANCELLED",
            "TIMEOUT",
            "INVALID_STATE",
            "SYSTEM_ERROR",
        ]
    );
    assert_eq!(
        serde_json::to_value(ErrorCode::RateLimitExceeded).unwrap(),
        json!("RATE_LIMIT_EXCEEDED")
    );
}

#[test]
fn constructors_carry_code_specific_details() {
    let cases = [
        (
            CommandError::not_found("git.push"),
            ErrorCode::CommandNotFound,
            json!({ "commandId": "git.push" }),
        ),
        (
            CommandError::permission_denied("rm", vec!["admin".into()]),
            ErrorCode::PermissionDenied,
            json!({ "commandId": "rm", "requiredPermissions": ["admin"] }),
        ),
        (
            CommandError::rate_limit_exceeded("deploy", 5, Duration::from_secs(60)),
            ErrorCode::RateLimitExceeded,
            json!({ "commandId": "deploy", "limit": 5, "window": 60000 }),
        ),
        (
            CommandError::cancelled("build"),
            ErrorCode::Cancelled,
            json!({ "commandId": "build" }),
        ),
        (
            CommandError::timeout("fetch", Duration::from_millis(1500)),
            ErrorCode::Timeout,
            json!({ "commandId": "fetch", "timeout": 1500 }),
        ),
        (
            CommandError::invalid_state("idle", "running"),
            ErrorCode::InvalidState,
            json!({ "expectedState": "idle", "actualState": "running" }),
        ),
        (
            CommandError::system("disk full", json!({ "free": 0 })),
            ErrorCode::SystemError,
            json!({ "free": 0 }),
        ),
    ];

    for (error, code, details) in cases {
        assert_eq!(error.code(), code);
        assert_eq!(error.details(), details, "{code}");
    }
}

#[test]
fn invalid_arguments_lists_every_failure() {
    let error = CommandError::invalid_arguments(vec![
        ValidationError::new("a", RuleViolation::Required, "a is required"),
        ValidationError::new("b", RuleViolation::Min, "b must be at least 1"),
    ]);

    assert_eq!(error.code(), ErrorCode::InvalidArguments);
    assert_eq!(
        error.message(),
        "Invalid arguments: a is required; b must be at least 1"
    );
    assert_eq!(
        error.details(),
        json!({
            "validation": [
                { "field": "a", "rule": "required", "message": "a is required" },
                { "field": "b", "rule": "min", "message": "b must be at least 1" },
            ]
        })
    );
    assert!(matches!(
        error.kind(),
        ErrorKind::InvalidArguments { validation } if validation.len() == 2
    ));
}

#[test]
fn execution_failed_keeps_the_cause_chain() {
    let cause = io::Error::new(io::ErrorKind::NotFound, "missing file");
    let error = CommandError::execution_failed("open", cause);

    assert_eq!(error.message(), "Command execution failed: missing file");
    assert_eq!(
        error.details(),
        json!({ "commandId": "open", "cause": "missing file" })
    );
    assert_eq!(error.causes(), vec!["missing file"]);
}

#[test]
fn log_keeps_most_recent_errors_up_to_capacity() {
    let handler = ErrorHandler::new();

    for i in 0..150 {
        handler.handle_error(&CommandError::not_found(format!("cmd{i}")));
    }

    let log = handler.get_error_log();
    assert_eq!(log.len(), 100);
    assert_eq!(log[0].command_id(), Some("cmd149"));
    assert_eq!(log[99].command_id(), Some("cmd50"));
}

#[test]
fn log_capacity_comes_from_config_and_is_at_least_one() {
    let handler = ErrorHandler::from_config(&ErrorLogConfig { capacity: 0 });
    assert_eq!(handler.capacity(), 1);

    handler.handle_error(&CommandError::cancelled("first"));
    handler.handle_error(&CommandError::cancelled("second"));

    let log = handler.get_error_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].command_id(), Some("second"));
}

#[test]
fn error_log_is_a_copy() {
    let handler = ErrorHandler::new();
    handler.handle_error(&CommandError::not_found("x"));

    let mut snapshot = handler.get_error_log();
    snapshot.clear();

    assert_eq!(handler.get_error_log().len(), 1);
}

#[test]
fn clear_error_log_empties_the_log() {
    let handler = ErrorHandler::new();
    handler.handle_error(&CommandError::not_found("x"));
    handler.handle_error(&CommandError::not_found("y"));

    handler.clear_error_log();

    assert!(handler.get_error_log().is_empty());
}

#[test]
fn registered_action_replaces_default_for_its_code_only() {
    let handler = ErrorHandler::new();
    let timeouts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&timeouts);
    handler.register_handler(ErrorCode::Timeout, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    handler.handle_error(&CommandError::timeout("slow", Duration::from_secs(1)));
    handler.handle_error(&CommandError::timeout("slower", Duration::from_secs(2)));
    handler.handle_error(&CommandError::not_found("other"));

    assert_eq!(timeouts.load(Ordering::SeqCst), 2);
    assert_eq!(handler.get_error_log().len(), 3);
}

#[test]
fn latest_registration_wins() {
    let handler = ErrorHandler::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let first = Arc::clone(&hits);
    handler.register_handler(ErrorCode::Cancelled, move |_| {
        first.fetch_add(1, Ordering::SeqCst);
    });
    let second = Arc::clone(&hits);
    handler.register_handler(ErrorCode::Cancelled, move |_| {
        second.fetch_add(10, Ordering::SeqCst);
    });

    handler.handle_error(&CommandError::cancelled("job"));

    assert_eq!(hits.load(Ordering::SeqCst), 10);
}

#[test]
fn every_code_dispatches_to_its_action() {
    let handler = ErrorHandler::new();
    let hits = Arc::new(AtomicUsize::new(0));
    for code in ErrorCode::ALL {
        let counter = Arc::clone(&hits);
        handler.register_handler(code, move |err| {
            assert_eq!(err.code(), code);
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }

    let errors = [
        CommandError::not_found("a"),
        CommandError::invalid_arguments(vec![ValidationError::new(
            "x",
            RuleViolation::Required,
            "x is required",
        )]),
        CommandError::permission_denied("a", vec!["admin".into()]),
        CommandError::rate_limit_exceeded("a", 1, Duration::from_secs(1)),
        CommandError::execution_failed("a", io::Error::other("boom")),
        CommandError::cancelled("a"),
        CommandError::timeout("a", Duration::from_secs(1)),
        CommandError::invalid_state("idle", "busy"),
        CommandError::system("down", json!({})),
    ];
    for error in &errors {
        handler.handle_error(error);
    }

    assert_eq!(hits.load(Ordering::SeqCst), ErrorCode::ALL.len());
}

#[test]
fn action_can_register_handlers() {
    let handler = Arc::new(ErrorHandler::new());
    let timeouts = Arc::new(AtomicUsize::new(0));

    let weak = Arc::downgrade(&handler);
    let counter = Arc::clone(&timeouts);
    handler.register_handler(ErrorCode::Cancelled, move |_| {
        let Some(handler) = weak.upgrade() else {
            return;
        };
        let counter = Arc::clone(&counter);
        handler.register_handler(ErrorCode::Timeout, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    });

    let (done_tx, done_rx) = mpsc::channel();
    let worker = Arc::clone(&handler);
    thread::spawn(move || {
        worker.handle_error(&CommandError::cancelled("job"));
        let _ = done_tx.send(());
    });
    assert!(
        done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
        "handle_error did not return"
    );

    handler.handle_error(&CommandError::timeout("fetch", Duration::from_secs(1)));
    assert_eq!(timeouts.load(Ordering::SeqCst), 1);
}

#[test]
fn panicking_action_is_contained() {
    let handler = ErrorHandler::new();
    handler.register_handler(ErrorCode::SystemError, |_| panic!("action failed"));

    let record = handler.handle_error(&CommandError::system("bad", json!({})));

    assert_eq!(record.code, ErrorCode::SystemError);
    assert_eq!(handler.get_error_log().len(), 1);

    // The handler keeps working after the panic.
    handler.handle_error(&CommandError::system("worse", json!({})));
    assert_eq!(handler.get_error_log().len(), 2);
}

#[test]
fn error_details_are_normalized() {
    let error = CommandError::not_found("git.push");
    let record = ErrorHandler::get_error_details(&error);

    assert_eq!(record.code, ErrorCode::CommandNotFound);
    assert_eq!(record.message, "Command not found: git.push");
    assert_eq!(record.details, json!({ "commandId": "git.push" }));
    assert!(record.causes.is_empty());

    let serialized = serde_json::to_value(&record).unwrap();
    for key in ["code", "message", "details", "causes", "timestamp"] {
        assert!(serialized.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn format_has_header_details_and_timestamp() {
    let error = CommandError::not_found("git.push");
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

    let formatted = ErrorRecord::at(&error, timestamp).format();

    assert_eq!(
        formatted,
        "[COMMAND_NOT_FOUND] Command not found: git.push\n\
         Details: {\n  \"commandId\": \"git.push\"\n}\n\
         Timestamp: 2024-03-01T12:30:00.000Z"
    );
}

#[test]
fn format_error_renders_three_sections() {
    let formatted = ErrorHandler::format_error(&CommandError::cancelled("sync"));

    assert!(formatted.starts_with("[CANCELLED] Command cancelled: sync\n"));
    assert!(formatted.contains("\nDetails: "));
    assert!(formatted.contains("\nTimestamp: "));
}
