//! Interactive shell — stdin/stdout REPL for the assistant.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::dispatch::ReasoningDispatcher;

/// A simple REPL that reads queries from stdin and writes answers to stdout.
pub struct Shell {
    dispatcher: Arc<ReasoningDispatcher>,
}

impl Shell {
    pub fn new(dispatcher: Arc<ReasoningDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Run until EOF or a `quit` command (case-insensitive).
    pub async fn run(&self) -> std::io::Result<()> {
        let stdin = tokio::io::stdin();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();

        eprint!("> ");

        while let Some(line) = lines.next_line().await? {
            let line = line.trim().to_string();
            if line.is_empty() {
                eprint!("> ");
                continue;
            }
            if line.eq_ignore_ascii_case("quit") {
                break;
            }

            match self.dispatcher.answer(&line).await {
                Some(answer) => println!("\n{}\n", answer),
                None => println!("\nI could not produce an answer for that query. Try rephrasing, or check the logs for details.\n"),
            }
            eprint!("> ");
        }

        Ok(())
    }
}
