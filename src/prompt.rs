//! Terminal interaction seam.
//!
//! Operations that need user input talk to a [`Prompter`] instead of the
//! terminal so they can be driven from tests with scripted answers.

use dialoguer::{Confirm, Input, Select};

use crate::error::Result;

pub trait Prompter {
    /// Single-choice menu. Returns the index of the chosen item.
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize>;

    /// Free-text answer. Empty answers are allowed.
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no question defaulting to no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Writes a line of output for the user.
    fn say(&mut self, text: &str);
}

/// [`Prompter`] backed by `dialoguer` on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize> {
        let index = Select::new()
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = Confirm::new().with_prompt(prompt).default(false).interact()?;
        Ok(answer)
    }

    fn say(&mut self, text: &str) {
        println!("{text}");
    }
}
