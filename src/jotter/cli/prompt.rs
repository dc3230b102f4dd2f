use console::Term;
use jotter::binding::{Confirm, Decision};
use log::warn;
use std::io;

/// Asks on stderr and reads the answer from stdin, so a piped `y` works.
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, prompt: &str) -> Decision {
        let term = Term::stderr();
        if let Err(e) = term.write_str(&format!("{} [y/N] ", prompt)) {
            warn!("event=confirm status=prompt_failed error={}", e);
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => parse_answer(&input),
            Err(e) => {
                warn!("event=confirm status=read_failed error={}", e);
                Decision::Abort
            }
        }
    }
}

/// Only an explicit yes proceeds; anything else, including no input, aborts.
pub fn parse_answer(input: &str) -> Decision {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Decision::Proceed,
        _ => Decision::Abort,
    }
}
