//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum phase estimation teaching simulator",
        style("QPE").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpe-core     Parameter model, mock generator and demos");
    println!("  qpe-session  Run control, timers and animations");
    println!("  qpe-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
