use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E0004.as_str(), "E0004");
}

#[test]
fn test_error_code_phases() {
    assert!(ErrorCode::E0001.is_tokenizer_error());
    assert!(!ErrorCode::E0001.is_parser_error());

    assert!(ErrorCode::E1003.is_parser_error());
    assert!(!ErrorCode::E1003.is_warning());

    assert!(ErrorCode::W1001.is_warning());
    assert!(!ErrorCode::W1001.is_parser_error());

    assert!(!ErrorCode::E9001.is_tokenizer_error());
    assert!(!ErrorCode::E9001.is_parser_error());
}
