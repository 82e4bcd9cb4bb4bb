//! Confirmation gate consulted before destructive requests.
//!
//! The gate is synchronous: a destroy verb asks once, and a declined answer
//! means no request is issued at all.

use std::io::{self, BufRead, Write};

/// Prompt shown before every delete.
pub const DEFAULT_PROMPT: &str = "Are you sure?";

pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Accepts every prompt. For non-interactive use (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Asks on the terminal. Anything but `y`/`yes` declines, as does a read error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{} [y/N] ", prompt).and_then(|_| stderr.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
