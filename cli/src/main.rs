//! `reachcheck` — parse a guarded-command program, optionally display
//! its syntax tree/internal graph/graphviz dump, and optionally search
//! it for a state satisfying each `reach?` clause.

mod args;
mod config;
mod dot;
mod printer;

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

use args::{ArgError, Args, Flags, Help};
use printer::Painter;
use rc_core::error::CompileError;
use rc_frontend::ParseError;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();
}

enum Failure {
    Usage(String),
    Input(String),
}

fn run() -> Result<(), Failure> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = args::parse_args(argv).map_err(|e| match e {
        ArgError::UnknownFlag(f) => Failure::Usage(format!("{Help}\n\nerror: {f}")),
        ArgError::NoFile => Failure::Usage(format!("{Help}")),
    })?;

    if args.flags.has(Flags::HELP) {
        println!("{Help}");
        return Ok(());
    }

    let Some(fname) = args.fname_src.as_ref() else {
        return Err(Failure::Usage(format!("{Help}")));
    };

    let cfg = match &args.config {
        Some(path) => config::load(Path::new(path))
            .map_err(|e| Failure::Input(format!("loading config: {e}")))?,
        None => config::Config::default(),
    };

    let source = std::fs::read_to_string(fname)
        .map_err(|e| Failure::Input(format!("reading {fname}: {e}")))?;

    let ast_prog = rc_frontend::parse(&source).map_err(|e: ParseError| {
        Failure::Input(format!("parse error: {e}"))
    })?;

    let painter = Painter::new(!args.flags.has(Flags::NO_COLOR));

    if args.flags.has(Flags::SHOW_AST) {
        println!("{}", printer::pp_prog(&painter, &ast_prog));
    }

    let ir_prog = rc_core::compile::compile_prog(&ast_prog)
        .map_err(|e: CompileError| Failure::Input(format!("compile error: {e}")))?;

    if args.flags.has(Flags::SHOW_REPR) {
        println!("{}", printer::pp_rprog(&painter, &ir_prog));
    }

    if args.flags.has(Flags::SHOW_DOT) {
        let dot_path = PathBuf::from(fname).with_extension("dot");
        dot::write_and_render(&ir_prog, &dot_path, true)
            .map_err(|e| Failure::Input(format!("{e}")))?;
        println!("wrote {}", dot_path.display());
    }

    if args.flags.has(Flags::EXEC_RAND) {
        let mut rng = rand::thread_rng();
        let sat = rc_engine::exec_random(&ir_prog, &cfg.search, &mut rng);
        report(&painter, &ir_prog, &sat, "has not been reached", args.flags.has(Flags::SHOW_TRACE));
    }

    if args.flags.has(Flags::EXEC_ALL) {
        let sat = rc_engine::exec_exhaustive(&ir_prog, &cfg.exhaustive);
        report(&painter, &ir_prog, &sat, "is not reachable", args.flags.has(Flags::SHOW_TRACE));
    }

    Ok(())
}

/// Print one line per check: its expression followed by `is reachable`
/// or the caller's unreachable wording (`has not been reached` for
/// random, `is not reachable` for exhaustive — §6). `-t` additionally
/// replays the witness trace for every reachable check.
fn report(
    painter: &Painter,
    prog: &rc_core::ir::RProg,
    sat: &rc_engine::compute::Sat,
    unreached_msg: &str,
    show_trace: bool,
) {
    for (i, (check, entry)) in prog.checks.iter().zip(sat.iter()).enumerate() {
        let expr = printer::pp_rexpr(painter, &check.cond);
        match entry {
            Some(diff) => {
                println!("check {i}: {expr} is reachable");
                if show_trace {
                    let trace = rc_engine::trace::reconstruct(prog, diff);
                    for e in &trace.entries {
                        match e.assigned {
                            Some((var, val)) => println!(
                                "  process {} -> step {:?}, {} <- {val}",
                                e.pid,
                                e.new_step,
                                prog.var_name(var)
                            ),
                            None => println!("  process {} -> step {:?}", e.pid, e.new_step),
                        }
                    }
                    println!("  final: {:?}", trace.final_env.0);
                }
            }
            None => println!("check {i}: {expr} {unreached_msg}"),
        }
    }
}

/// Logs every panic through `tracing` before the default handler prints
/// its usual backtrace-on-stderr message.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            tracing::error!(%info, "internal invariant violation");
            default_panic(info);
        }));
    });
}

/// A panic here means one of the graph's own invariants broke (an
/// `unreachable!`, a `StepId` indexing past `prog.nbstep()`) rather than
/// a user-facing usage or input error, so it gets its own exit code
/// (255) instead of sharing 1 with `Failure`.
fn main() -> ExitCode {
    init_logging();
    install_panic_hook();
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(Failure::Usage(msg))) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
        Ok(Err(Failure::Input(msg))) => {
            eprintln!("error: {msg}");
            ExitCode::from(1)
        }
        Err(_) => ExitCode::from(255),
    }
}
