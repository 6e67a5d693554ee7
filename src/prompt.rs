use colored::*;
use domain::goals::Confirm;
use std::io::{self, BufRead, Write};

/// Asks on the terminal and reads a y/N answer from stdin. Anything other
/// than `y` or `yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} {} ", prompt.yellow(), "[y/N]".dimmed());
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
