//! tokensmith command-line pipeline
//!
//! Loads `tokensmith.toml`, runs every selected (brand, theme) combination
//! through the core and emit crates, writes the output tree, and summarizes
//! the run. The `tokensmith` binary is a thin clap wrapper over [`run`].

pub mod config;
pub mod pipeline;
pub mod project;
pub mod report;

pub use config::{Config, ConfigError, CONFIG_FILE};
pub use pipeline::{run, select_combinations, RunOptions, RunReport};
pub use project::init_project;
pub use report::render_summary;

/// Exit code for a run that finished with diagnostics
pub const EXIT_DIAGNOSTICS: u8 = 2;

/// Exit code for `report` under the given leniency.
pub fn exit_code(report: &RunReport, lenient: bool) -> u8 {
    if report.diagnostics.is_empty() || lenient {
        0
    } else {
        EXIT_DIAGNOSTICS
    }
}
