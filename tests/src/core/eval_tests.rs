use rand::rngs::mock::StepRng;
use rc_core::eval::eval;
use rc_core::ir::RExpr;
use rc_core::EvalValue;

fn val(n: i32) -> RExpr {
    RExpr::Val(n)
}

#[test]
fn guard_with_partial_condition_is_never_satisfied() {
    let mut rng = StepRng::new(0, 1);
    let guard = RExpr::Div(Box::new(val(1)), Box::new(val(0)));
    assert!(!eval(&guard, &[], &mut rng).is_satisfied());
}

#[test]
fn zero_is_not_satisfied_but_is_not_partial_either() {
    let mut rng = StepRng::new(0, 1);
    let v = eval(&val(0), &[], &mut rng);
    assert_eq!(v, EvalValue::Definite(0));
    assert!(!v.is_partial());
    assert!(!v.is_satisfied());
}

#[test]
fn variable_reference_reads_from_env_by_id() {
    let mut rng = StepRng::new(0, 1);
    let env = [10, 20, 30];
    let e = RExpr::Var(rc_core::VarId(2));
    assert_eq!(eval(&e, &env, &mut rng), EvalValue::Definite(30));
}

#[test]
fn addition_overflow_wraps_rather_than_panics() {
    let mut rng = StepRng::new(0, 1);
    let e = RExpr::Add(Box::new(val(i32::MAX)), Box::new(val(1)));
    assert_eq!(eval(&e, &[], &mut rng), EvalValue::Definite(i32::MIN));
}

#[test]
fn not_of_partial_is_partial_not_true() {
    let mut rng = StepRng::new(0, 1);
    let bad = RExpr::Mod(Box::new(val(1)), Box::new(val(0)));
    let e = RExpr::Not(Box::new(bad));
    assert_eq!(eval(&e, &[], &mut rng), EvalValue::Partial);
}

#[test]
fn and_short_circuits_structurally_but_not_evaluation() {
    // the evaluator always evaluates both sides (no short-circuit) —
    // a partial right-hand side makes the whole conjunction partial
    // even when the left side is false.
    let mut rng = StepRng::new(0, 1);
    let bad = RExpr::Div(Box::new(val(1)), Box::new(val(0)));
    let e = RExpr::And(Box::new(val(0)), Box::new(bad));
    assert_eq!(eval(&e, &[], &mut rng), EvalValue::Partial);
}
