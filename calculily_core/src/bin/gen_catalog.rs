//! Generate CALCULATORS.md from the calculator catalog.
//!
//! ```bash
//! cargo run --bin gen-catalog [OUTPUT]
//! ```
//!
//! Writes to `calculily_core/CALCULATORS.md` (relative to the workspace root)
//! unless an output path is given.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use calculily_core::catalog::generate_catalog_markdown;

const DEFAULT_OUTPUT: &str = "calculily_core/CALCULATORS.md";

fn main() -> io::Result<()> {
    let output_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let markdown = generate_catalog_markdown();
    fs::write(&output_path, &markdown)?;
    println!("Wrote {} bytes to {}", markdown.len(), output_path.display());
    Ok(())
}
