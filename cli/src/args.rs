//! Command-line flag parsing.
//!
//! Mirrors a small static flag table rather than reaching for an
//! argument-parsing crate: short flags combine in one cluster
//! (`-ar`), long flags stand alone (`--trace`), and everything is a
//! plain bitset — there just aren't enough flags here to need more.

use std::fmt;

/// A small hand-rolled bitset — there are too few flags here to pull in
/// a dedicated crate for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(pub u32);

impl Flags {
    pub const SHOW_AST: u32 = 1;
    pub const SHOW_REPR: u32 = 2;
    pub const SHOW_DOT: u32 = 4;
    pub const EXEC_RAND: u32 = 8;
    pub const EXEC_ALL: u32 = 16;
    pub const SHOW_TRACE: u32 = 32;
    pub const NO_COLOR: u32 = 64;
    pub const HELP: u32 = 128;

    pub fn has(self, bit: u32) -> bool {
        self.0 & bit != 0
    }
}

pub struct FlagSpec {
    pub long: &'static str,
    pub short: char,
    pub bit: u32,
    pub help: &'static str,
}

pub const FLAG_TABLE: &[FlagSpec] = &[
    FlagSpec {
        long: "ast",
        short: 'a',
        bit: Flags::SHOW_AST,
        help: "Pretty-print the syntax tree",
    },
    FlagSpec {
        long: "repr",
        short: 'r',
        bit: Flags::SHOW_REPR,
        help: "Pretty-print the internal graph representation",
    },
    FlagSpec {
        long: "dot",
        short: 'd',
        bit: Flags::SHOW_DOT,
        help: "Dump a graphviz file and render it as a png",
    },
    FlagSpec {
        long: "rand",
        short: 'R',
        bit: Flags::EXEC_RAND,
        help: "Perform Monte-Carlo execution",
    },
    FlagSpec {
        long: "all",
        short: 'A',
        bit: Flags::EXEC_ALL,
        help: "Perform exhaustive execution",
    },
    FlagSpec {
        long: "trace",
        short: 't',
        bit: Flags::SHOW_TRACE,
        help: "Show the sequence of steps that satisfies each check",
    },
    FlagSpec {
        long: "no-color",
        short: 'c',
        bit: Flags::NO_COLOR,
        help: "Do not use ANSI color codes in pretty-prints",
    },
    FlagSpec {
        long: "help",
        short: 'h',
        bit: Flags::HELP,
        help: "Show this help message and exit",
    },
];

#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("no file specified")]
    NoFile,
}

pub struct Args {
    pub fname_src: Option<String>,
    pub flags: Flags,
    pub config: Option<String>,
}

fn find_by_short(c: char) -> Option<&'static FlagSpec> {
    FLAG_TABLE.iter().find(|f| f.short == c)
}

fn find_by_long(name: &str) -> Option<&'static FlagSpec> {
    FLAG_TABLE.iter().find(|f| f.long == name)
}

/// `-ar` clusters short flags; warns (does not fail) on a repeated
/// flag within the cluster.
fn multiflags(cluster: &str) -> Result<u32, ArgError> {
    let mut acc = 0u32;
    for c in cluster.chars() {
        match find_by_short(c) {
            Some(spec) => {
                if acc & spec.bit != 0 {
                    eprintln!("Warning: duplicate flag '{c}' is ignored");
                }
                acc |= spec.bit;
            }
            None => return Err(ArgError::UnknownFlag(c.to_string())),
        }
    }
    Ok(acc)
}

fn find_option(arg: &str) -> Result<u32, ArgError> {
    if let Some(long) = arg.strip_prefix("--") {
        find_by_long(long)
            .map(|s| s.bit)
            .ok_or_else(|| ArgError::UnknownFlag(arg.to_string()))
    } else {
        multiflags(&arg[1..])
    }
}

/// Parse `argv[1..]`. `--config <path>` is long-only and not part of
/// the combinable bitset.
pub fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Args, ArgError> {
    let mut fname_src = None;
    let mut flags = Flags::default();
    let mut config = None;

    let mut iter = argv.into_iter().peekable();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config = iter.next();
            continue;
        }
        if let Some(rest) = arg.strip_prefix('-') {
            if rest.is_empty() {
                return Err(ArgError::UnknownFlag(arg));
            }
            let opt = find_option(&arg)?;
            if flags.has(opt) {
                eprintln!("Warning: duplicate flag '{arg}' is ignored");
            }
            flags.0 |= opt;
        } else if fname_src.is_some() {
            eprintln!("Warning: duplicate filename '{arg}' is ignored");
        } else {
            fname_src = Some(arg);
        }
    }

    if flags.has(Flags::SHOW_TRACE) && !flags.has(Flags::EXEC_RAND) && !flags.has(Flags::EXEC_ALL)
    {
        eprintln!("Warning: --trace is useless without either --rand or --all");
    }

    Ok(Args {
        fname_src,
        flags,
        config,
    })
}

pub struct Help;

impl fmt::Display for Help {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "reachcheck")?;
        writeln!(f, "  Model checker for a small guarded-command language")?;
        writeln!(f)?;
        writeln!(f, "  Usage: reachcheck [FILE] [FLAGS]")?;
        writeln!(f, "  Flags:")?;
        for spec in FLAG_TABLE {
            writeln!(f, "    -{}, --{:<10}   {}", spec.short, spec.long, spec.help)?;
        }
        writeln!(f, "    --config <path>          Load search-budget overrides from a TOML file")?;
        writeln!(f, "  Examples:")?;
        writeln!(f, "      reachcheck -ar input.prog --no-color")?;
        writeln!(f, "      reachcheck input.prog --rand --all -c -t")?;
        write!(f, "      reachcheck -h")
    }
}
