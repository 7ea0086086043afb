//! Library components of the `ies` command-line tool.

pub mod logging;
pub mod report;
