//! Info CLI command

use anyhow::Result;
use chrono::Local;

/// Prints today's date, the operating system and the grocer version
pub fn run() -> Result<()> {
    println!("Today's date: {}", Local::now().format("%Y-%m-%d"));
    println!("Operating System: {}", std::env::consts::OS);
    println!("Grocer version: {}", env!("CARGO_PKG_VERSION"));

    Ok(())
}
