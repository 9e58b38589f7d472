//! Overwrite confirmation
//!
//! Uses dialoguer when stdin is a terminal and a plain line read otherwise, so
//! answers can be piped in.

use std::io::{BufRead, IsTerminal, Write};

use dialoguer::Input;

use crate::error::Result;

/// Asks the user a yes/no question.
pub trait ConfirmGate {
    /// `true` only for an affirmative answer.
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// `y` or `Y`, surrounding whitespace ignored. Anything else is a no.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalGate;

impl ConfirmGate for TerminalGate {
    fn confirm(&self, question: &str) -> Result<bool> {
        let prompt = format!("{question} (y/n)");

        if std::io::stdin().is_terminal() {
            let answer: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            return Ok(is_affirmative(&answer));
        }

        // End of input reads as an empty answer.
        let mut stderr = std::io::stderr();
        write!(stderr, "{prompt}: ")?;
        stderr.flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmGate for FixedAnswer {
    fn confirm(&self, question: &str) -> Result<bool> {
        tracing::debug!(question, answer = self.0, "fixed confirmation");
        Ok(self.0)
    }
}
