use std::path::PathBuf;

use pm::error::{exit_codes, Error, JsonError};
use serde_json::Value;

#[test]
fn rejections_exit_cleanly() {
    let errors = [
        Error::Usage("pm start <ticket_id> <agent>"),
        Error::UnknownCommand("deploy".to_string()),
        Error::EpicNotFound("E1".to_string()),
        Error::TicketNotFound("T1".to_string()),
        Error::InvalidRiskStatus("purple".to_string()),
        Error::DuplicateEpic("E1".to_string()),
    ];
    for err in errors {
        assert!(err.is_rejection(), "{err}");
        assert_eq!(err.exit_code(), exit_codes::REJECTED);
    }
}

#[test]
fn exit_code_user_error() {
    let err = Error::InvalidConfig("bad input".to_string());
    assert!(!err.is_rejection());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::LockFailed(PathBuf::from("agent_status.json.lock"));
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);

    let source = serde_json::from_str::<Value>("{").unwrap_err();
    let err = Error::StateParse {
        path: PathBuf::from("agent_status.json"),
        source,
    };
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn details_include_ownership_fields() {
    let err = Error::NotAssigned {
        ticket: "T1".to_string(),
        assigned_to: "alice".to_string(),
        agent: "bob".to_string(),
    };
    assert_eq!(err.to_string(), "Ticket T1 is assigned to alice, not bob");
    let details = err.details().expect("details");
    assert_eq!(details["ticket"], Value::String("T1".to_string()));
    assert_eq!(details["assigned_to"], Value::String("alice".to_string()));
    assert_eq!(details["agent"], Value::String("bob".to_string()));
}

#[test]
fn json_error_includes_kind_and_details() {
    let err = Error::InvalidRiskStatus("purple".to_string());
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::REJECTED);
    assert_eq!(json.kind, "validation");
    assert_eq!(json.message, "Risk status must be: green, yellow, or red");
    let details = json.details.expect("details");
    assert_eq!(details["value"], Value::String("purple".to_string()));
}
