//! Graphviz emission for the compiled step graph, plus an optional
//! shell-out to `dot` to rasterize it.

use std::fmt::Write as _;
use std::path::Path;
use std::process::Command;

use rc_core::ir::{RProg, StepId};

#[derive(Debug, thiserror::Error)]
pub enum DotError {
    #[error("writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invoking `dot`: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("`dot` exited with a failure status")]
    DotFailed,
}

fn node_label(prog: &RProg, id: StepId) -> String {
    let step = prog.step(id);
    match &step.assign {
        Some(a) => format!("{}: {} <- ...", id.0, prog.var_name(a.target)),
        None if !step.guarded.is_empty() => format!("{}: ?{}", id.0, step.guarded.len()),
        None => format!("{}: skip", id.0),
    }
}

/// Renders every process's reachable steps as a single graph, with
/// each process's entry step called out as its own subgraph cluster.
pub fn render(prog: &RProg) -> String {
    let mut out = String::new();
    out.push_str("digraph reachcheck {\n");
    out.push_str("  node [shape=box, fontname=monospace];\n");

    for (i, proc) in prog.procs.iter().enumerate() {
        let _ = writeln!(out, "  subgraph cluster_{i} {{");
        let _ = writeln!(out, "    label=\"{}\";", proc.name);
        let mut seen = vec![false; prog.nbstep()];
        if let Some(entry) = proc.entry {
            emit_step(&mut out, prog, entry, &mut seen);
        }
        out.push_str("  }\n");
    }

    out.push_str("}\n");
    out
}

fn emit_step(out: &mut String, prog: &RProg, id: StepId, seen: &mut [bool]) {
    if seen[id.0 as usize] {
        return;
    }
    seen[id.0 as usize] = true;
    let _ = writeln!(out, "    s{} [label=\"{}\"];", id.0, node_label(prog, id));
    let step = prog.step(id);
    for g in &step.guarded {
        let _ = writeln!(out, "    s{} -> s{} [label=\"guard\"];", id.0, g.next.0);
        emit_step(out, prog, g.next, seen);
    }
    if let Some(next) = step.unguarded {
        let label = if step.guarded.is_empty() { "next" } else { "else" };
        let _ = writeln!(out, "    s{} -> s{} [label=\"{label}\"];", id.0, next.0);
        emit_step(out, prog, next, seen);
    }
}

/// Writes the `.dot` source to `dot_path`, then if `render_png` is set,
/// shells out to `dot -Tpng` to produce a sibling `.png`.
pub fn write_and_render(prog: &RProg, dot_path: &Path, render_png: bool) -> Result<(), DotError> {
    let source = render(prog);
    std::fs::write(dot_path, source).map_err(|source| DotError::Write {
        path: dot_path.display().to_string(),
        source,
    })?;

    if render_png {
        let png_path = dot_path.with_extension("png");
        let status = Command::new("dot")
            .arg("-Tpng")
            .arg(dot_path)
            .arg("-o")
            .arg(&png_path)
            .status()
            .map_err(DotError::Spawn)?;
        if !status.success() {
            return Err(DotError::DotFailed);
        }
    }
    Ok(())
}
