pub mod flashcards;
pub mod lab;
pub mod notes;
pub mod quiz;
pub mod study;
pub mod units;

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-based reader over stdin for the interactive commands
pub struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    pub async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        self.next_line().await
    }

    /// Read one trimmed line without prompting. Cancel safe.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }
}
