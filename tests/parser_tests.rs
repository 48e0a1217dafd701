use zarac::analyzer::DataType;
use zarac::lexer::{Lexer, Literal};
use zarac::parser::*;
use zarac::CompileError;

fn generate_ast(input: &str) -> Result<Program, CompileError> {
    let tokens = Lexer::tokenize(input);
    let mut parser = Parser::new(tokens);
    parser.parse()
}

fn ident(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

fn int(i: i64) -> Expr {
    Expr::Literal(Literal::Integer(i))
}

/// Returns the (expected, found) pair of a syntax error.
fn syntax_error(input: &str) -> (String, String) {
    match generate_ast(input) {
        Err(CompileError::Syntax { expected, found }) => (expected, found),
        other => panic!("expected a syntax error for {input:?}, got {other:?}"),
    }
}

#[test]
fn empty_input_is_an_empty_program() {
    assert_eq!(generate_ast("").unwrap(), Program(vec![]));
    assert_eq!(parse(Lexer::tokenize("  \n")).unwrap(), Program(vec![]));
}

#[test]
fn parses_declarations_and_assignments() {
    let ast = generate_ast("int x = 5; float y; x = x + 1;").unwrap();
    assert_eq!(
        ast,
        Program(vec![
            Stmt::VarDecl(DataType::Int, "x".to_string(), Some(int(5))),
            Stmt::VarDecl(DataType::Float, "y".to_string(), None),
            Stmt::Assign(
                "x".to_string(),
                Expr::binary(BinOpKind::Add, ident("x"), int(1))
            ),
        ])
    );
}

#[test]
fn multiplication_binds_tighter_and_operators_fold_left() {
    let ast = generate_ast("a - b - c * (d + e);").unwrap();
    let expected = Expr::binary(
        BinOpKind::Sub,
        Expr::binary(BinOpKind::Sub, ident("a"), ident("b")),
        Expr::binary(
            BinOpKind::Mul,
            ident("c"),
            Expr::binary(BinOpKind::Add, ident("d"), ident("e")),
        ),
    );
    assert_eq!(ast, Program(vec![Stmt::Expr(expected)]));
}

#[test]
fn parses_if_else_and_do_while() {
    let ast = generate_ast("if (x == 1) { ; } else { y = 2; } do { } while (x < 20);").unwrap();
    assert_eq!(
        ast,
        Program(vec![
            Stmt::If(
                Expr::binary(BinOpKind::Equal, ident("x"), int(1)),
                vec![Stmt::SemiColon],
                Some(vec![Stmt::Assign("y".to_string(), int(2))]),
            ),
            Stmt::DoWhile(
                vec![],
                Expr::binary(BinOpKind::LessThan, ident("x"), int(20))
            ),
        ])
    );
}

#[test]
fn bare_blocks_nest() {
    let ast = generate_ast("{ { x; } ; }").unwrap();
    assert_eq!(
        ast,
        Program(vec![Stmt::Block(vec![
            Stmt::Block(vec![Stmt::Expr(ident("x"))]),
            Stmt::SemiColon,
        ])])
    );
}

#[test]
fn missing_semicolon_names_the_expected_delimiter() {
    let (expected, found) = syntax_error("int x = 5 int y = 6;");
    assert_eq!(expected, "';'");
    assert!(found.contains("DATA_TYPE: int"), "{found}");

    let (expected, found) = syntax_error("x = 1");
    assert_eq!(expected, "';'");
    assert_eq!(found, "end of input");
}

#[test]
fn unmatched_paren_is_reported() {
    let (expected, _) = syntax_error("x = (1 + 2;");
    assert_eq!(expected, "')'");

    let (expected, _) = syntax_error("if (x > 1 { }");
    assert_eq!(expected, "')'");
}

#[test]
fn blocks_require_braces() {
    let (expected, _) = syntax_error("if (x) x = 1;");
    assert_eq!(expected, "'{'");

    let (expected, found) = syntax_error("do { x = 1; ");
    assert_eq!(expected, "'}'");
    assert_eq!(found, "end of input");

    let (expected, _) = syntax_error("do { } (x);");
    assert_eq!(expected, "'while'");
}

#[test]
fn only_identifiers_can_be_assigned() {
    let (expected, found) = syntax_error("x + 1 = 2;");
    assert_eq!(expected, "';'");
    assert!(found.starts_with("'='"), "{found}");
}

#[test]
fn bad_factor_is_reported() {
    let (expected, _) = syntax_error("for (x);");
    assert_eq!(expected, "literal, identifier or '('");

    let (expected, found) = syntax_error("x = ;");
    assert_eq!(expected, "literal, identifier or '('");
    assert!(found.contains("DELIMITER: ;"), "{found}");

    let (expected, _) = syntax_error("int = 5;");
    assert_eq!(expected, "identifier");
}

#[test]
fn deeply_nested_parens_are_rejected_not_overflowed() {
    let depth = 10_000;
    let input = format!("int x = 1; x = {}x{};", "(".repeat(depth), ")".repeat(depth));
    let (expected, found) = syntax_error(&input);
    assert_eq!(expected, format!("at most {MAX_DEPTH} levels of nesting"));
    assert!(found.contains("DELIMITER: ("), "{found}");
}

#[test]
fn deeply_nested_blocks_are_rejected() {
    let depth = 10_000;
    let input = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
    let (expected, _) = syntax_error(&input);
    assert_eq!(expected, format!("at most {MAX_DEPTH} levels of nesting"));
}

#[test]
fn long_operator_chains_count_towards_the_limit() {
    let input = format!("x = x{};", " + x".repeat(10_000));
    let (expected, _) = syntax_error(&input);
    assert_eq!(expected, format!("at most {MAX_DEPTH} levels of nesting"));

    let input = format!("x = x{};", " * x".repeat(10_000));
    let (expected, _) = syntax_error(&input);
    assert_eq!(expected, format!("at most {MAX_DEPTH} levels of nesting"));
}

#[test]
fn nesting_up_to_the_limit_parses() {
    let depth = MAX_DEPTH - 1;
    let input = format!("x = {}x{};", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(
        generate_ast(&input).unwrap(),
        Program(vec![Stmt::Assign("x".to_string(), ident("x"))])
    );

    let input = format!("x = x{};", " + 1".repeat(MAX_DEPTH));
    assert!(generate_ast(&input).is_ok());

    let input = format!("{}{}", "{".repeat(MAX_DEPTH), "}".repeat(MAX_DEPTH));
    assert!(generate_ast(&input).is_ok());
}
