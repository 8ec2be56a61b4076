//! Unit tests for error handling

use super::*;
use std::io;

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err = WinsightError::from(json_error);

    match err {
        WinsightError::Json(_) => (),
        _ => panic!("Expected Json error variant"),
    }
}

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let err = WinsightError::from(io_error);

    match err {
        WinsightError::Io(_) => (),
        _ => panic!("Expected Io error variant"),
    }
}

#[test]
fn test_parse_int_error_conversion() {
    let parse_error = "not_a_number".parse::<u16>().unwrap_err();
    let err = WinsightError::from(parse_error);

    match err {
        WinsightError::ParseInt(_) => (),
        _ => panic!("Expected ParseInt error variant"),
    }
}

#[test]
fn test_no_data_error_message() {
    let err = WinsightError::NoData { season: 2023 };
    let msg = err.to_string();
    assert!(msg.contains("no rows"));
    assert!(msg.contains("2023"));
}

#[test]
fn test_unknown_league_error_message() {
    let err = WinsightError::UnknownLeague {
        name: "mlb".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("Unknown league"));
    assert!(msg.contains("mlb"));
}

#[test]
fn test_missing_column_error_message() {
    let err = WinsightError::MissingColumn {
        name: "win".to_string(),
    };
    assert!(err.to_string().contains("win"));
}

#[test]
fn test_error_source_chain() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let err = WinsightError::from(io_error);

    let error_trait: &dyn std::error::Error = &err;
    assert!(error_trait.source().is_some());
}

#[test]
fn test_result_type_alias() {
    fn test_function() -> Result<String> {
        Ok("success".to_string())
    }

    let result = test_function();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "success");
}
