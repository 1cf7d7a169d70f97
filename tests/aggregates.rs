//! End-to-end list/dict scenarios (spec.md §8, scenarios 3-5).

use minipy::interpreter::Interpreter;
use minipy::lexer::Lexer;
use minipy::parser::Parser;

fn run(src: &str) -> String {
    let tokens = Lexer::new(src).lex().expect("lex");
    let program = Parser::new(tokens).parse_program().expect("parse");
    let mut interpreter = Interpreter::new();
    let mut out = Vec::new();
    let mut input = std::io::empty();
    let mut reader = std::io::BufReader::new(&mut input);
    interpreter
        .run(&program, &mut out, &mut reader)
        .expect("run");
    String::from_utf8(out).unwrap()
}

#[test]
fn list_mutation_is_visible_through_alias() {
    let out = run("a=[1,2,3]\nb=a\nappend(a,4)\nprint str(b)");
    assert_eq!(out, "[1, 2, 3, 4]\n");
}

#[test]
fn negative_index_reads_from_the_end() {
    let out = run("xs=[10,20,30]\nprint str(xs[-1])\nprint str(xs[-2])");
    assert_eq!(out, "30\n20\n");
}

#[test]
fn dict_preserves_insertion_order_across_keys_and_values() {
    let out = run(
        "d={}\nd[\"x\"]=1\nd[\"a\"]=2\nprint str(keys(d))\nprint str(values(d))",
    );
    assert_eq!(out, "[\"x\", \"a\"]\n[1, 2]\n");
}

#[test]
fn append_then_remove_round_trips() {
    let out = run(
        "xs=[1,2,3]\nappend(xs,4)\nv=remove(xs,len(xs)-1)\nprint str(xs)\nprint str(v)",
    );
    assert_eq!(out, "[1, 2, 3]\n4\n");
}

#[test]
fn indexed_assignment_mutates_in_place() {
    let out = run("xs=[1,2,3]\nxs[1]=99\nprint str(xs)");
    assert_eq!(out, "[1, 99, 3]\n");
}

#[test]
fn dict_literal_and_index_assignment() {
    let out = run("d={\"a\": 1, \"b\": 2}\nd[\"c\"]=3\nprint str(d)");
    assert_eq!(out, "{\"a\": 1, \"b\": 2, \"c\": 3}\n");
}

#[test]
fn del_removes_a_variable() {
    let tokens = Lexer::new("x=1\ndel x\nprint x").lex().expect("lex");
    let program = Parser::new(tokens).parse_program().expect("parse");
    let mut interpreter = Interpreter::new();
    let mut out = Vec::new();
    let mut input = std::io::empty();
    let mut reader = std::io::BufReader::new(&mut input);
    let err = interpreter
        .run(&program, &mut out, &mut reader)
        .expect_err("x should be undefined after del");
    assert!(err.message.contains("undefined variable"));
}

#[test]
fn del_on_dict_index_removes_the_key() {
    let out = run("d={\"a\":1}\ndel d[\"a\"]\nprint str(has_key(d, \"a\"))");
    assert_eq!(out, "false\n");
}
