use rc_core::compile::compile_prog;
use rc_core::error::CompileError;

#[test]
fn mutual_exclusion_program_compiles_to_a_step_graph() {
    let src = "
        var turn;
        proc P {
            do {
                turn != 0 -> skip
                | else -> break
            }
            turn := 1;
        }
        reach? turn == 1;
    ";
    let prog = rc_frontend::parse(src).unwrap();
    let ir = compile_prog(&prog).unwrap();
    assert_eq!(ir.nbproc(), 1);
    assert_eq!(ir.nbcheck(), 1);
    assert!(ir.nbstep() > 0);
    assert!(ir.procs[0].entry.is_some());
}

#[test]
fn reachability_check_referencing_unknown_variable_is_rejected() {
    let src = "var x; proc P { skip; } reach? y == 1;";
    let prog = rc_frontend::parse(src).unwrap();
    let err = compile_prog(&prog).unwrap_err();
    match err {
        CompileError::UndeclaredVariable { name, scope } => {
            assert_eq!(name, "y");
            assert!(scope.contains("reach"));
        }
        other => panic!("expected UndeclaredVariable, got {other:?}"),
    }
}

#[test]
fn locals_are_not_visible_to_sibling_procedures() {
    let src = "
        proc P { var v; v := 1; }
        proc Q { v := 2; }
    ";
    let prog = rc_frontend::parse(src).unwrap();
    let err = compile_prog(&prog).unwrap_err();
    match err {
        CompileError::UndeclaredVariable { name, scope } => {
            assert_eq!(name, "v");
            assert_eq!(scope, "Q");
        }
        other => panic!("expected UndeclaredVariable, got {other:?}"),
    }
}

#[test]
fn do_loop_with_no_satisfied_guard_and_no_else_blocks_on_itself() {
    // a `do` whose only guard can never hold, and with no else arm,
    // compiles to a step that loops back to itself rather than
    // advancing past the loop.
    let src = "var x; proc P { do { x < 0 -> x := x + 1; } } reach? x == 0;";
    let prog = rc_frontend::parse(src).unwrap();
    let ir = compile_prog(&prog).unwrap();
    let entry = ir.procs[0].entry.unwrap();
    let head = ir.step(entry);
    assert_eq!(head.guarded.len(), 1);
    assert!(head.unguarded.is_none());
}
