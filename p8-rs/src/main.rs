use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use p8::cli::{self, ConfigFile};
use p8::config::{self, Config};
use p8::script::expr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("p8: {e}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::FAILURE;
        }
    };

    let default_filter = if args.debug { "p8=debug" } else { "p8=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // ── Load config ───────────────────────────────────────────────────────────
    let config = match &args.config {
        ConfigFile::Skip => Config::default(),
        ConfigFile::Explicit(path) => match Config::load_file(path) {
            Ok((cfg, _)) => cfg,
            Err(e) => {
                eprintln!("p8: warning: {}: {e}", path.display());
                Config::default()
            }
        },
        ConfigFile::Search => match config::default_path().filter(|p| p.exists()) {
            Some(path) => match Config::load_file(&path) {
                Ok((cfg, _)) => cfg,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "can't read config: {e}");
                    Config::default()
                }
            },
            None => Config::default(),
        },
    };
    let hex = args.hex || config.hex;
    tracing::debug!(hex, exprs = args.exprs.len(), "starting");

    let mut failed = false;
    let mut run = |src: &str| match expr::eval_str(src) {
        Ok(result) => println!("{}", expr::render(result.as_ref(), hex)),
        Err(e) => {
            eprintln!("p8: {e}");
            failed = true;
        }
    };

    if !args.exprs.is_empty() {
        for src in &args.exprs {
            run(src);
        }
    } else {
        let stdin = io::stdin();
        let prompt = !args.quiet && stdin.is_terminal();
        let mut lines = stdin.lock().lines();
        loop {
            if prompt {
                print!("{}", config.prompt);
                let _ = io::stdout().flush();
            }
            let Some(line) = lines.next() else { break };
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("p8: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if !line.trim().is_empty() {
                run(&line);
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
