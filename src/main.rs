//! codepush_bundle - over-the-air update bundler for React Native and Expo apps.
//!
//! This binary installs dependencies, bundles the project's JavaScript and
//! optionally compiles it to Hermes byte-code, with artifact verification.

use std::process;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match codepush_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
