//! CLI command implementations.

pub mod bloch;
pub mod common;
pub mod factor;
pub mod params;
pub mod run;
pub mod sense;
pub mod version;
