use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use duel_snake::charclass::{parse_single_char, report};

fn main() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter a single character: ");
        stdout.flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            // Input closed before a valid character arrived
            return Ok(());
        };
        let line = line.context("Failed to read stdin")?;

        match parse_single_char(&line) {
            Ok(ch) => {
                for entry in report(ch) {
                    println!("{}", entry);
                }
                return Ok(());
            }
            Err(err) => println!("{}\n", err),
        }
    }
}
