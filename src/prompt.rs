use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::{Res, error::AuthError};

/// Asks the user a question and returns the answer without its line ending.
pub trait Prompt {
    fn ask(&mut self, message: &str) -> Res<String>;
}

/// Prompt on the controlling terminal: question on stdout, one line of stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> Res<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "[{}] {}", "?".cyan().bold(), message)
            .and_then(|_| stdout.flush())
            .map_err(|e| AuthError::Input(e.to_string()))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| AuthError::Input(e.to_string()))?;

        if read == 0 {
            return Err(AuthError::Input("standard input closed".to_string()));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
