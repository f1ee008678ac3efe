//! Binary entry point for `codebase-casing`.

use std::process;

fn main() {
    if let Err(e) = codebase_casing::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
