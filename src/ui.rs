//! Status-line output.
//!
//! Every terminal outcome of a run is reported as exactly one line on stdout;
//! errors go to stderr. Styling is dropped automatically when the stream is
//! not a terminal or `NO_COLOR` is set.

use console::style;

use crate::bumper::Outcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a skip notice with a dimmed marker.
pub fn display_skip(message: &str) {
    println!("{} {}", style("-").dim(), message);
}

/// Print the status line for a finished run.
pub fn display_outcome(outcome: &Outcome) {
    let message = outcome.to_string();
    match outcome {
        Outcome::Bumped { .. } => display_success(&message),
        Outcome::WouldBump { .. } => display_status(&message),
        Outcome::Skipped(_) => display_skip(&message),
    }
}
