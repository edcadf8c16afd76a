use rc_core::ast::{BinOp, Stmt};

#[test]
fn full_pipeline_parses_a_two_process_program() {
    let src = "
        var turn;
        proc P {
            var wants;
            wants := 1;
            do {
                turn != 0 -> skip
                | else -> break
            }
            wants := 0;
        }
        proc Q {
            turn := 1;
        }
        reach? turn == 1;
    ";
    let prog = rc_frontend::parse(src).expect("well-formed program should parse");
    assert_eq!(prog.globals.len(), 1);
    assert_eq!(prog.procs.len(), 2);
    assert_eq!(prog.checks.len(), 1);
    assert_eq!(prog.nbvar, 1 + 1); // turn + P::wants
}

#[test]
fn undeclared_identifier_is_a_name_not_a_parse_error() {
    // parsing doesn't resolve names, so this is fine at this layer;
    // rc_core::compile is what catches the undeclared reference.
    let src = "var x; proc P { y := 1; }";
    let prog = rc_frontend::parse(src).unwrap();
    match &prog.procs[0].body[0] {
        Stmt::Assign(a) => assert_eq!(a.target, "y"),
        other => panic!("expected Assign, got {other:?}"),
    }
}

#[test]
fn operator_precedence_binds_tighter_than_comparison() {
    let src = "var x; proc P { x := 1 + 2 * 3; } reach? x < 1 + 1;";
    let prog = rc_frontend::parse(src).unwrap();
    // not asserting on the Assign value here, just that the reach
    // clause parsed as (x < (1 + 1)) and not ((x < 1) + 1)
    let check = &prog.checks[0];
    match &check.cond {
        rc_core::ast::Expr::Bin(BinOp::Lt, _, rhs) => {
            assert_eq!(
                **rhs,
                rc_core::ast::Expr::Bin(
                    BinOp::Add,
                    Box::new(rc_core::ast::Expr::Val(1)),
                    Box::new(rc_core::ast::Expr::Val(1))
                )
            );
        }
        other => panic!("expected Lt at the top, got {other:?}"),
    }
}

#[test]
fn unterminated_block_comment_is_reported() {
    let err = rc_frontend::parse("var x; /* never closed").unwrap_err();
    assert!(matches!(err, rc_frontend::ParseError::UnterminatedComment { .. }));
}
