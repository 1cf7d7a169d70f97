//! Error surfacing across the lex/parse/runtime pipeline (spec.md §7, §8 scenario 6).

use minipy::interpreter::Interpreter;
use minipy::lexer::Lexer;
use minipy::parser::Parser;

#[test]
fn division_by_zero_mentions_division_by_zero() {
    let tokens = Lexer::new("print 1/0").lex().expect("lex");
    let program = Parser::new(tokens).parse_program().expect("parse");
    let mut interpreter = Interpreter::new();
    let mut out = Vec::new();
    let mut input = std::io::empty();
    let mut reader = std::io::BufReader::new(&mut input);
    let err = interpreter
        .run(&program, &mut out, &mut reader)
        .unwrap_err();
    assert!(err.message.contains("Division by zero"));
}

#[test]
fn type_mismatch_in_comparison_is_a_runtime_error() {
    let tokens = Lexer::new("print 1 < \"a\"").lex().expect("lex");
    let program = Parser::new(tokens).parse_program().expect("parse");
    let mut interpreter = Interpreter::new();
    let mut out = Vec::new();
    let mut input = std::io::empty();
    let mut reader = std::io::BufReader::new(&mut input);
    let err = interpreter
        .run(&program, &mut out, &mut reader)
        .unwrap_err();
    assert!(err.message.contains("not supported"));
}

#[test]
fn missing_dict_key_reports_the_key() {
    let tokens = Lexer::new("d={}\nprint d[\"missing\"]").lex().expect("lex");
    let program = Parser::new(tokens).parse_program().expect("parse");
    let mut interpreter = Interpreter::new();
    let mut out = Vec::new();
    let mut input = std::io::empty();
    let mut reader = std::io::BufReader::new(&mut input);
    let err = interpreter
        .run(&program, &mut out, &mut reader)
        .unwrap_err();
    assert!(err.message.contains("Key not found: missing"));
}

#[test]
fn lexer_rejects_unknown_characters() {
    let err = Lexer::new("x = 1 @ 2").lex().unwrap_err();
    assert!(err.message.contains("Unexpected character") || err.message.contains('@'));
}

#[test]
fn parser_rejects_malformed_statements() {
    let tokens = Lexer::new("if (true) print 1").lex().expect("lex");
    let err = Parser::new(tokens).parse_program().unwrap_err();
    assert!(!err.message.is_empty());
}
