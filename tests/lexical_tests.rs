//! Comments and prefixed literals as they reach the parser.

mod common;

use common::{expression, parse_error, specification, statement};
use sql_parser::ast::{Expression, Literal, Statement};
use sql_parser::{ParseErrorKind, parse_script};

fn string_value(sql: &str) -> String {
    match expression(sql) {
        Expression::Literal(Literal::String(value), _) => value.to_string(),
        other => panic!("expected string literal, got {other:?}"),
    }
}

#[test]
fn block_comments_are_ignored() {
    assert!(matches!(statement("SELECT 1 /* c */"), Statement::Query(_)));
    assert!(matches!(statement("/* leading */ SELECT 1"), Statement::Query(_)));

    let select = specification("SELECT a /* first */, b /* multi\nline */ FROM t /* end */");
    assert_eq!(select.select_items.len(), 2);
    assert_eq!(select.from.len(), 1);

    let select = specification("SELECT /* a ** b **/ 1, /**/ 2");
    assert_eq!(select.select_items.len(), 2);
}

#[test]
fn line_and_block_comments_mix() {
    let select = specification(
        "SELECT x -- the key\n\
         , y /* -- not a line comment */\n\
         FROM t -- done",
    );
    assert_eq!(select.select_items.len(), 2);
}

#[test]
fn comment_markers_inside_strings_are_text() {
    assert_eq!(string_value("'/* kept */'"), "/* kept */");
    assert_eq!(string_value("'-- kept'"), "-- kept");
}

#[test]
fn unterminated_block_comment_is_lexical() {
    let error = parse_error("SELECT 1 /* open");
    let ParseErrorKind::Lexical { message } = &error.kind else {
        panic!("expected lexical error, got {error:?}");
    };
    assert_eq!(message, "unterminated block comment");
    assert_eq!(error.span, 9..16);
}

#[test]
fn comments_work_across_script_statements() {
    let result = parse_script("SELECT 1; /* between; statements */ SELECT 2 -- last;");
    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(result.statements.len(), 2);
}

#[test]
fn unicode_strings_decode() {
    assert_eq!(string_value(r"U&'\0041\+01F600'"), "A\u{1F600}");
    assert_eq!(string_value(r"u&'caf\00E9'"), "caf\u{e9}");
    assert_eq!(string_value("U&'#0041#0042' UESCAPE '#'"), "AB");
    assert_eq!(string_value("U&'it''s'"), "it's");
}

#[test]
fn prefix_letters_alone_stay_identifiers() {
    let select = specification("SELECT u, x, t.X, U || 'a', x = 'b' FROM t");
    assert_eq!(select.select_items.len(), 5);
}

#[test]
fn binary_literals() {
    assert!(matches!(
        expression("X'CAFE'"),
        Expression::Literal(Literal::Binary(ref hex), _) if hex == "CAFE"
    ));
    assert!(matches!(
        expression("x'00 ff'"),
        Expression::Literal(Literal::Binary(ref hex), _) if hex == "00ff"
    ));
}

#[test]
fn unterminated_prefixed_strings_are_lexical() {
    for sql in ["SELECT U&'abc", "SELECT X'CA"] {
        let error = parse_error(sql);
        let ParseErrorKind::Lexical { message } = &error.kind else {
            panic!("expected lexical error for `{sql}`, got {error:?}");
        };
        assert_eq!(message, "unterminated string literal");
        assert_eq!(error.span.start, 7);
    }
}
