//! Terminal front-end: request prompt and step-by-step guide

mod guide;
mod prompt;

pub use guide::*;
pub use prompt::*;

use colored::*;

/// Separator line used for visual formatting
const SEPARATOR: &str = "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

/// ANSI escape sequence to clear the terminal screen
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Clears the screen and prints the title between separator lines
fn display_header(title: &str) {
    print!("{}", CLEAR_SCREEN);
    println!("{}{}{}", SEPARATOR, title.blue().bold(), SEPARATOR);
}

/// Prints a status line the way the prompt reports problems
fn display_status(message: &str) {
    println!("{} {}", "⚠️".yellow(), message.red().bold());
}
