//! `.p8rc` configuration file parser.
//!
//! One `key = value` setting per line:
//!
//! | Key | Value | Effect |
//! |-----|-------|--------|
//! | `hex` | `true`/`false`/`on`/`off`/`1`/`0` | print numbers in `0x0000.0000` form |
//! | `prompt` | any text, optionally double-quoted | prompt shown when reading a terminal |
//! | Lines starting with `;` or `#` | | comment, ignored |
//!
//! Bad lines are reported and skipped; the rest of the file still loads.

use std::path::{Path, PathBuf};

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// Settings read from `.p8rc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub hex: bool,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Config { hex: false, prompt: "> ".to_owned() }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config string.
    ///
    /// Returns the config and every error met on the way; each error is
    /// also logged at `warn` level.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            let result = match line.split_once('=') {
                Some((key, value)) => config.set(key.trim(), value.trim()),
                None => Err(format!("expected `key = value`, got `{line}`")),
            };
            if let Err(message) = result {
                tracing::warn!(line = lineno, "{message}");
                errors.push(ConfigError { line: lineno, message });
            }
        }

        (config, errors)
    }

    /// Read and parse a config file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Apply one setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "hex" => {
                self.hex = parse_bool(value).ok_or_else(|| format!("hex: not a boolean: `{value}`"))?;
            }
            "prompt" => self.prompt = unquote(value).to_owned(),
            "" => return Err("missing key".to_owned()),
            other => return Err(format!("unknown setting `{other}`")),
        }
        Ok(())
    }
}

/// `~/.p8rc`, or `None` when no home directory can be determined.
pub fn default_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".p8rc"))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let (cfg, errs) = Config::load_str("");
        assert!(errs.is_empty());
        assert_eq!(cfg, Config::default());
        assert!(!cfg.hex);
        assert_eq!(cfg.prompt, "> ");
    }

    #[test]
    fn hex_setting() {
        for src in ["hex = true", "hex=on", "  hex =  1 ", "hex = YES"] {
            let (cfg, errs) = Config::load_str(src);
            assert!(errs.is_empty(), "{src}: {errs:?}");
            assert!(cfg.hex, "{src}");
        }
        let (cfg, _) = Config::load_str("hex = true\nhex = off");
        assert!(!cfg.hex);
    }

    #[test]
    fn prompt_setting() {
        let (cfg, errs) = Config::load_str("prompt = p8>");
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(cfg.prompt, "p8>");

        let (cfg, _) = Config::load_str(r#"prompt = "pico = 8> ""#);
        assert_eq!(cfg.prompt, "pico = 8> ");
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let (cfg, errs) = Config::load_str(
            "; comment\n\
             # also a comment\n\
             \n\
             hex = true\n",
        );
        assert!(errs.is_empty(), "{errs:?}");
        assert!(cfg.hex);
    }

    #[test]
    fn bad_lines_are_reported_with_line_numbers() {
        let (cfg, errs) = Config::load_str(
            "hex = maybe\n\
             prompt = ok\n\
             colour = red\n\
             just some words\n\
             = 3\n",
        );
        assert_eq!(errs.iter().map(|e| e.line).collect::<Vec<_>>(), [1, 3, 4, 5]);
        assert!(errs[1].message.contains("colour"), "{}", errs[1]);
        assert_eq!(errs[0].to_string(), "line 1: hex: not a boolean: `maybe`");
        // The good line still applies.
        assert_eq!(cfg.prompt, "ok");
        assert!(!cfg.hex);
    }

    #[test]
    fn load_file_reads_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "hex = on").unwrap();
        writeln!(f, "prompt = >>").unwrap();
        let (cfg, errs) = Config::load_file(f.path()).unwrap();
        assert!(errs.is_empty(), "{errs:?}");
        assert!(cfg.hex);
        assert_eq!(cfg.prompt, ">>");
    }

    #[test]
    fn load_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_file(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn default_path_is_dotfile() {
        if let Some(p) = default_path() {
            assert_eq!(p.file_name().and_then(|n| n.to_str()), Some(".p8rc"));
        }
    }
}
