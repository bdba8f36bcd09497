//! Command-line argument parsing.
//!
//! Usage:
//!   p8 [-xdq] [-f[<file>]] [-e <expr>]... [<expr>...]

use std::path::PathBuf;

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Print numbers in hex form (`-x`).
    pub hex: bool,
    /// Debug logging (`-d`).
    pub debug: bool,
    /// No prompt when reading a terminal (`-q`).
    pub quiet: bool,
    /// Config-file specification.
    pub config: ConfigFile,
    /// Expressions from `-e` and positional arguments, in order.
    pub exprs: Vec<String>,
}

/// How to choose the config file.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum ConfigFile {
    /// `~/.p8rc` if it exists (default).
    #[default]
    Search,
    /// `-f` with no file argument: skip the config file.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

pub const USAGE: &str = "Usage: p8 [-xdq] [-f[<file>]] [-e <expr>]... [<expr>...]";

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            args.exprs.extend(argv[i + 1..].iter().cloned());
            break;
        }

        // Non-flag argument, including negative literals such as `-1.5`.
        if !arg.starts_with('-') || arg == "-" || looks_numeric(&arg[1..]) {
            args.exprs.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'x' => args.hex = true,
                'd' => args.debug = true,
                'q' => args.quiet = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else {
                        args.config = ConfigFile::Skip;
                    }
                }

                // -e<expr> or -e <expr>
                'e' => {
                    let expr = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-e requires an expression argument".to_owned());
                    };
                    args.exprs.push(expr);
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    Ok(args)
}

fn looks_numeric(rest: &str) -> bool {
    rest.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args() {
        let a = parse_argv(&[]).unwrap();
        assert_eq!(a, CliArgs::default());
        assert_eq!(a.config, ConfigFile::Search);
    }

    #[test]
    fn flags() {
        let a = parse_argv(&args(&["-x", "-d"])).unwrap();
        assert!(a.hex && a.debug && !a.quiet);
    }

    #[test]
    fn combined_flags() {
        let a = parse_argv(&args(&["-xqd"])).unwrap();
        assert!(a.hex && a.debug && a.quiet);
    }

    #[test]
    fn f_alone_skips_config() {
        let a = parse_argv(&args(&["-f"])).unwrap();
        assert_eq!(a.config, ConfigFile::Skip);
    }

    #[test]
    fn f_with_embedded_path() {
        let a = parse_argv(&args(&["-f/tmp/my.p8rc"])).unwrap();
        assert_eq!(a.config, ConfigFile::Explicit(PathBuf::from("/tmp/my.p8rc")));
    }

    #[test]
    fn f_does_not_swallow_next_arg() {
        let a = parse_argv(&args(&["-f", "tostr(1)"])).unwrap();
        assert_eq!(a.config, ConfigFile::Skip);
        assert_eq!(a.exprs, ["tostr(1)"]);
    }

    #[test]
    fn e_separate_and_embedded() {
        let a = parse_argv(&args(&["-e", "flr(1.5)", "-eabs(-2)"])).unwrap();
        assert_eq!(a.exprs, ["flr(1.5)", "abs(-2)"]);
    }

    #[test]
    fn e_missing_arg_is_error() {
        assert!(parse_argv(&args(&["-e"])).is_err());
    }

    #[test]
    fn positional_and_e_keep_order() {
        let a = parse_argv(&args(&["sgn(0)", "-e", "sgn(-1)", "sgn(1)"])).unwrap();
        assert_eq!(a.exprs, ["sgn(0)", "sgn(-1)", "sgn(1)"]);
    }

    #[test]
    fn negative_literal_is_positional() {
        let a = parse_argv(&args(&["-1.5", "-.5"])).unwrap();
        assert_eq!(a.exprs, ["-1.5", "-.5"]);
    }

    #[test]
    fn double_dash_ends_flags() {
        let a = parse_argv(&args(&["-x", "--", "-x"])).unwrap();
        assert!(a.hex);
        assert_eq!(a.exprs, ["-x"]);
    }

    #[test]
    fn unknown_flag_is_error() {
        let err = parse_argv(&args(&["-z"])).unwrap_err();
        assert_eq!(err, "unknown option: -z");
    }
}
