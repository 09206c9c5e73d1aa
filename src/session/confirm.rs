//! Yes/no gates for destructive actions.

use std::io::{self, BufRead, Write};

/// Blocking yes/no question. Returning `false` aborts the action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Answers every question with a fixed reply.
#[derive(Clone, Copy, Debug)]
pub struct Always(pub bool);

impl Confirm for Always {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Asks on a terminal-like stream pair. Only `y`/`yes` (any case) confirm.
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read the answer from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{message} [y/N] ").is_err() || self.output.flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = Prompt::new(answer.as_bytes(), &mut output).confirm("Reset?");
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_accepts_yes() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("  yes  \n").0);
    }

    #[test]
    fn test_prompt_rejects_everything_else() {
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("").0);
        assert!(!ask("yep\n").0);
    }

    #[test]
    fn test_prompt_writes_question() {
        let (_, output) = ask("n\n");
        assert_eq!(output, "Reset? [y/N] ");
    }

    #[test]
    fn test_always() {
        assert!(Always(true).confirm("?"));
        assert!(!Always(false).confirm("?"));
    }
}
