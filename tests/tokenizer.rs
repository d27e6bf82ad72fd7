use mustache_js_compiler::ast::Token;
use mustache_js_compiler::tokenizer::{tokenize, Tokenizer};

#[test]
fn test_plain_text_is_a_single_content_token() {
    let tokens = tokenize("Hello world!").unwrap();
    assert_eq!(tokens, vec![Token::Content("Hello world!".to_string())]);
}

#[test]
fn test_escaped_variable() {
    let tokens = tokenize("Hello {{name}}!\n").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Content("Hello ".to_string()),
            Token::Variable {
                name: "name".to_string(),
                escape: true,
            },
            Token::Content("!\n".to_string()),
        ]
    );
}

#[test]
fn test_triple_mustache_is_raw() {
    let tokens = tokenize("{{{markup}}}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Variable {
            name: "markup".to_string(),
            escape: false,
        }]
    );
}

#[test]
fn test_ampersand_is_raw() {
    let tokens = tokenize("{{& markup }}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Variable {
            name: "markup".to_string(),
            escape: false,
        }]
    );
}

#[test]
fn test_whitespace_inside_tags_is_trimmed() {
    let tokens = tokenize("{{ name }}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Variable {
            name: "name".to_string(),
            escape: true,
        }]
    );
}

#[test]
fn test_comments_are_dropped() {
    let tokens = tokenize("a{{! ignore me }}b").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Content("a".to_string()),
            Token::Content("b".to_string()),
        ]
    );
}

#[test]
fn test_section_with_body() {
    let tokens = tokenize("{{#users}}Hello {{name}}!\n{{/users}}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Section {
            name: "users".to_string(),
            body: vec![
                Token::Content("Hello ".to_string()),
                Token::Variable {
                    name: "name".to_string(),
                    escape: true,
                },
                Token::Content("!\n".to_string()),
            ],
        }]
    );
}

#[test]
fn test_inverted_section() {
    let tokens = tokenize("{{^missing}}Not Existing!\n{{/missing}}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::InvertedSection {
            name: "missing".to_string(),
            body: vec![Token::Content("Not Existing!\n".to_string())],
        }]
    );
}

#[test]
fn test_nested_sections() {
    let tokens = tokenize("{{#a}}{{#b}}x{{/b}}{{/a}}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Section {
            name: "a".to_string(),
            body: vec![Token::Section {
                name: "b".to_string(),
                body: vec![Token::Content("x".to_string())],
            }],
        }]
    );
}

#[test]
fn test_partial_is_resolved_to_its_tokens() {
    let tokens = Tokenizer::new()
        .partial("greeting", "Hello {{name}}!")
        .tokenize("{{>greeting}}")
        .unwrap();
    assert_eq!(
        tokens,
        vec![Token::Partial {
            body: vec![
                Token::Content("Hello ".to_string()),
                Token::Variable {
                    name: "name".to_string(),
                    escape: true,
                },
                Token::Content("!".to_string()),
            ],
        }]
    );
}

#[test]
fn test_partial_referencing_another_partial() {
    let tokens = Tokenizer::new()
        .partial("outer", "[{{>inner}}]")
        .partial("inner", "{{name}}")
        .tokenize("{{>outer}}")
        .unwrap();
    assert_eq!(
        tokens,
        vec![Token::Partial {
            body: vec![
                Token::Content("[".to_string()),
                Token::Partial {
                    body: vec![Token::Variable {
                        name: "name".to_string(),
                        escape: true,
                    }],
                },
                Token::Content("]".to_string()),
            ],
        }]
    );
}
