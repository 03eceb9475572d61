//! Chat packager - application bundle pipeline for the intranet chat suite.
//!
//! This binary packages the chat client and server entry scripts into
//! signed, quarantine-free macOS .app bundles ready for distribution.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match chat_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
