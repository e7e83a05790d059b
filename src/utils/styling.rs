//! Terminal styling helpers for the CLI front-end

use console::style;

/// Print the application banner.
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("riskscope").cyan().bold(),
        style("cohort risk-factor explorer").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a step header with styling.
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("    {} {}", style("*").cyan(), message);
}
