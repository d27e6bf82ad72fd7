use mustache_js_compiler::tokenizer::{tokenize, TokenizeError, Tokenizer};

#[test]
fn test_unclosed_tag() {
    let result = tokenize("Hello {{name");
    assert_eq!(result, Err(TokenizeError::UnclosedTag { offset: 6 }));
}

#[test]
fn test_unclosed_triple_mustache() {
    let result = tokenize("{{{markup}}");
    assert_eq!(result, Err(TokenizeError::UnclosedTag { offset: 0 }));
}

#[test]
fn test_unclosed_section() {
    let result = tokenize("{{#users}}Hello");
    assert_eq!(
        result,
        Err(TokenizeError::UnclosedSection {
            name: "users".to_string(),
            offset: 0,
        })
    );
}

#[test]
fn test_mismatched_closing_tag() {
    let result = tokenize("{{#users}}{{/people}}");
    assert_eq!(
        result,
        Err(TokenizeError::MismatchedClose {
            expected: "users".to_string(),
            found: "people".to_string(),
            offset: 10,
        })
    );
}

#[test]
fn test_stray_closing_tag() {
    let result = tokenize("{{/users}}");
    assert_eq!(
        result,
        Err(TokenizeError::UnexpectedClose {
            name: "users".to_string(),
            offset: 0,
        })
    );
}

#[test]
fn test_empty_tag() {
    let result = tokenize("a{{}}b");
    assert_eq!(result, Err(TokenizeError::EmptyTag { offset: 1 }));
}

#[test]
fn test_unknown_partial() {
    let result = tokenize("{{>nope}}");
    assert_eq!(
        result,
        Err(TokenizeError::UnknownPartial {
            name: "nope".to_string(),
            offset: 0,
        })
    );
}

#[test]
fn test_recursive_partial_is_rejected() {
    let result = Tokenizer::new()
        .partial("self", "x{{>self}}")
        .tokenize("{{>self}}");
    assert_eq!(
        result,
        Err(TokenizeError::RecursivePartial {
            name: "self".to_string(),
            offset: 1,
        })
    );
}

#[test]
fn test_mutually_recursive_partials_are_rejected() {
    let result = Tokenizer::new()
        .partial("a", "{{>b}}")
        .partial("b", "{{>a}}")
        .tokenize("{{>a}}");
    assert!(
        matches!(result, Err(TokenizeError::RecursivePartial { ref name, .. }) if name == "a"),
        "Expected RecursivePartial for 'a', got {:?}",
        result
    );
}

#[test]
fn test_error_carries_the_tag_offset() {
    let error = tokenize("text {{#open}}").unwrap_err();
    assert_eq!(error.offset(), 5);
}
