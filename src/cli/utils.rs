//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use beltquote::QuoteRequest;

/// Resolve plain-text input for commands that accept either inline strings or files.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        // Shells pass "\n" literally inside quotes.
        return Ok(t.replace("\\n", "\n"));
    }
    if let Some(path) = from {
        if path.as_os_str() == "-" {
            return read_stdin();
        }
        return fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    read_stdin()
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Print to stdout, or write to `output` when given.
pub fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            write_output(path, content)?;
            if path.as_os_str() != "-" {
                tracing::info!(path = %path.display(), "wrote output");
            }
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

/// Load a JSON quote request, attaching path context to any error.
pub fn load_request(path: &Path) -> Result<QuoteRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read quote request {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse quote request {}", path.display()))
}
