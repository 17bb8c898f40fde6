//! dossier CLI - Personnel Archive Browsing
//!
//! Command-line interface for browsing personnel archives.

use std::process::ExitCode;

fn main() -> ExitCode {
    dossier::cli::run()
}
