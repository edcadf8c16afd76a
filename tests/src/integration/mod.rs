//! End-to-end scenarios and the quantified invariants a correct
//! checker must uphold, run against the full parse -> compile ->
//! search pipeline.

use std::collections::HashSet;

use rc_core::compile::compile_prog;
use rc_core::ir::{RProg, StepId};
use rc_core::EvalValue;
use rc_engine::{exec_exhaustive, exec_random, ExhaustiveBudget, SearchBudget};

fn compile(src: &str) -> RProg {
    let ast = rc_frontend::parse(src).unwrap();
    compile_prog(&ast).unwrap()
}

// -- S1-S6 --

#[test]
fn s1_trivial_reachability() {
    let prog = compile("var x; proc P { x := 1; } reach? x == 1;");
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    let diff = sat[0].clone().expect("x == 1 should be reachable");
    let trace = rc_engine::trace::reconstruct(&prog, &diff);
    assert_eq!(trace.entries.len(), 1);
}

#[test]
fn s2_unreachable_check_under_both_engines() {
    let prog = compile("var x; proc P { skip; } reach? x == 1;");
    let exhaustive = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    assert!(exhaustive[0].is_none());

    let mut rng = rand::thread_rng();
    let budget = SearchBudget {
        episodes: 10,
        steps_per_episode: 5,
    };
    let random = exec_random(&prog, &budget, &mut rng);
    assert!(random[0].is_none());
}

#[test]
fn s3_mutual_exclusion_skeleton_never_admits_both_in_critical_section() {
    // each process raises its own flag, then waits on the *other's*
    // flag being clear before entering a dedicated critical-section
    // step (cs0/cs1); it clears its own flag again only after leaving.
    let src = "
        var flag0;
        var flag1;
        var cs0;
        var cs1;
        proc P0 {
            flag0 := 1;
            do {
                flag1 == 0 -> break
                | else -> skip
            }
            cs0 := 1;
            cs0 := 0;
            flag0 := 0;
        }
        proc P1 {
            flag1 := 1;
            do {
                flag0 == 0 -> break
                | else -> skip
            }
            cs1 := 1;
            cs1 := 0;
            flag1 := 0;
        }
        reach? cs0 == 1 && cs1 == 1;
    ";
    let prog = compile(src);
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    assert!(sat[0].is_none());
}

#[test]
fn s4_range_nondeterminism() {
    // exhaustive search branches over every value `0..3` can draw
    // rather than sampling one, so x == 2 is deterministically
    // reachable with a depth-1 witness.
    let prog = compile("var x; proc P { x := 0..3; } reach? x == 2;");
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    let diff = sat[0].clone().expect("x == 2 should be reachable");
    assert_eq!(diff.depth, 1);

    // random search only samples one draw per tick, so it can only
    // confirm reachability probabilistically; retry rather than assert
    // single-shot determinism.
    let mut rng = rand::thread_rng();
    let budget = SearchBudget {
        episodes: 200,
        steps_per_episode: 5,
    };
    let random = exec_random(&prog, &budget, &mut rng);
    assert!(random[0].is_some(), "x == 2 should turn up across 200 random episodes");
}

#[test]
fn s5_loop_with_break_reaches_five() {
    // each iteration is two ticks -- one to evaluate the guard and
    // move onto the assignment step, one to execute it and loop back
    // -- so five increments take a witness depth of ten, not five.
    let prog = compile(
        "var x; proc P { do { x < 5 -> x := x + 1 | else -> break } } reach? x == 5;",
    );
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    let diff = sat[0].clone().expect("x == 5 should be reachable");
    let trace = rc_engine::trace::reconstruct(&prog, &diff);
    assert_eq!(trace.final_env.get(0), 5);
    assert_eq!(trace.entries.len(), 10);
}

#[test]
fn s6_division_by_zero_blocks_the_second_assignment() {
    let prog = compile("var x; var y; proc P { x := 0; y := 1 / x; } reach? y == 1;");
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    assert!(sat[0].is_none());
}

// -- quantified invariants --

#[test]
fn invariant_1_variable_ids_are_dense_and_unique() {
    let prog = compile(
        "var a; var b;
         proc P { var c; c := 1; }
         proc Q { var d; d := 2; }",
    );
    let mut ids: Vec<u32> = prog.var_names.iter().enumerate().map(|(i, _)| i as u32).collect();
    ids.sort_unstable();
    let expected: Vec<u32> = (0..prog.nbvar).collect();
    assert_eq!(ids, expected);
}

#[test]
fn invariant_2_every_step_reference_points_into_the_arena() {
    let prog = compile(
        "var x;
         proc P {
             do { x < 3 -> x := x + 1 | else -> break }
             if { x == 3 -> skip | else -> skip }
         }",
    );
    for step in &prog.steps {
        for g in &step.guarded {
            assert!((g.next.0 as usize) < prog.nbstep());
        }
        if let Some(u) = step.unguarded {
            assert!((u.0 as usize) < prog.nbstep());
        }
    }
}

#[test]
fn invariant_3_bfs_witness_depth_matches_shortest_path() {
    // a single process has no other interleaving to race against, so
    // the shortest path is exactly the tick count needed to climb from
    // 0 to 5 one guard-then-assign round trip at a time.
    let prog = compile(
        "var x; proc P { do { x < 5 -> x := x + 1 | else -> break } } reach? x == 5;",
    );
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    let diff = sat[0].clone().unwrap();
    assert_eq!(diff.depth, 10);
}

#[test]
fn invariant_4_partial_propagates_through_compound_expressions() {
    use rc_core::eval::eval;
    use rc_core::ir::RExpr;
    let mut rng = rand::rngs::mock::StepRng::new(0, 1);
    let partial = RExpr::Div(Box::new(RExpr::Val(1)), Box::new(RExpr::Val(0)));
    let compound = RExpr::Mul(
        Box::new(RExpr::Add(Box::new(partial), Box::new(RExpr::Val(1)))),
        Box::new(RExpr::Val(2)),
    );
    assert_eq!(eval(&compound, &[], &mut rng), EvalValue::Partial);
}

#[test]
fn invariant_5_no_configuration_is_explored_twice() {
    // dedup assurance against StateHashSet directly lives in
    // engine::hashset_tests; here we confirm dedup doesn't accidentally
    // suppress genuine reachability of either outcome.
    let prog = compile(
        "var x;
         proc A { x := 1; }
         proc B { x := 2; }
         reach? x == 1;
         reach? x == 2;",
    );
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    assert!(sat[0].is_some());
    assert!(sat[1].is_some());
}

#[test]
fn invariant_6_replaying_a_witness_satisfies_the_check() {
    let prog = compile(
        "var x; proc P { do { x < 5 -> x := x + 1 | else -> break } } reach? x == 5;",
    );
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    let diff = sat[0].clone().unwrap();
    let trace = rc_engine::trace::reconstruct(&prog, &diff);
    let mut rng = rand::rngs::mock::StepRng::new(0, 1);
    let result = rc_core::eval::eval(&prog.checks[0].cond, &trace.final_env.0, &mut rng);
    assert!(result.is_satisfied());
}

#[test]
fn invariant_7_blocked_step_is_a_fixpoint() {
    // a do-loop whose only guard never holds and has no else arm
    // blocks forever: exhaustive search terminates (doesn't spin) and
    // no check depending on further progress is ever satisfied.
    let prog = compile("var x; proc P { do { x < 0 -> x := x - 1; } } reach? x == -1;");
    let sat = exec_exhaustive(&prog, &ExhaustiveBudget::default());
    assert!(sat[0].is_none());

    let mut seen_step_ids: HashSet<StepId> = HashSet::new();
    for step in &prog.steps {
        seen_step_ids.insert(step.id);
    }
    assert_eq!(seen_step_ids.len(), prog.nbstep());
}
