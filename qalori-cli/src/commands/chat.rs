use clap::Args;
use qalori_core::ChatSession;
use std::io::{self, BufRead, Write};

use super::runtime;
use crate::config::Config;

/// Chat with the nutrition assistant (type 'exit' to leave)
#[derive(Args)]
pub struct ChatCommand {}

impl ChatCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let ai = config.gemini_client()?;
        let rt = runtime()?;
        let mut session = ChatSession::new();

        println!("Hi! Ask me anything about nutrition or fitness. Type 'exit' to leave.");

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            let message = line.trim();
            if message.is_empty() {
                continue;
            }
            if matches!(message, "exit" | "quit") {
                break;
            }

            let reply = rt.block_on(session.send(&ai, message));
            println!("{}\n", reply);
        }

        Ok(())
    }
}
