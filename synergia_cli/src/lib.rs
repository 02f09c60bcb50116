//! synergia_cli - Command-line front end for the Synergia rule engine
//!
//! Parses and validates user input, renders reports, and exports scenario
//! grids as CSV. All rule logic lives in `synergia_core`.

pub mod error;
pub mod export;
pub mod input;
pub mod report;

pub use error::{CliError, CliResult};
