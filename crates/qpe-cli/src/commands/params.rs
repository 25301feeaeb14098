//! Params command implementation.

use anyhow::Result;

use super::common::{build_parameters, print_parameters};

/// Execute the params command.
pub fn execute(epsilon: f64, ancillas: Option<u32>, noise: f64) -> Result<()> {
    let params = build_parameters(epsilon, ancillas, noise)?;
    print_parameters(&params);
    Ok(())
}
