//! Utility commands (version).

use anyhow::Result;

/// Show version information
pub fn cmd_version(verbose: bool) -> Result<i32> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("surveyor {}", VERSION);

    if verbose {
        const GIT_SHA: &str = env!("GIT_SHA");
        const BUILD_DATE: &str = env!("BUILD_DATE");
        println!("commit: {}", GIT_SHA);
        println!("built: {}", BUILD_DATE);
    }

    Ok(0)
}
