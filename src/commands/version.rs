//! Command: print version information.

/// Engine version: `ENGINE_VERSION` at build time, else the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("ENGINE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the engine version to stdout.
pub fn run() {
    println!("engine {}", version());
}
