//! Shared CLI output helpers.
//!
//! Status lines go to stderr so that `get` and `envfile` output on stdout
//! stays pipeable. Color follows `NO_COLOR` and terminal detection.
//!
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: names, paths, hints
//! - Dimmed: secondary info

use std::fmt::Display;

use console::style;

use crate::core::domain::Warning;

const RULE_WIDTH: usize = 56;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// `✓ message`
pub fn success(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✓").green().for_stderr(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// `✗ message`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red().for_stderr(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// `⚠ message`
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("⚠").yellow().for_stderr(), msg);
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// Print every warning of an operation.
pub fn warnings(warnings: &[Warning]) {
    for warning in warnings {
        warn(&warning.to_string());
    }
}

/// `→ hint`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!(
            "{} {}",
            style("→").cyan().for_stderr(),
            style(msg).cyan().for_stderr()
        );
    } else {
        eprintln!("→ {}", msg);
    }
}

/// `  label  value`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// A blank line followed by a header and a rule.
pub fn section(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!();
    if colors_enabled() {
        println!("{}", style(title).bold());
        println!("{}", style(rule).dim());
    } else {
        println!("{}", title);
        println!("{}", rule);
    }
}

/// Inline-styled secret or identity name.
pub fn key(k: &str) -> String {
    if colors_enabled() {
        style(k).cyan().for_stderr().to_string()
    } else {
        k.to_string()
    }
}

/// Inline-styled path or environment.
pub fn path(p: &str) -> String {
    if colors_enabled() {
        style(p).cyan().for_stderr().to_string()
    } else {
        p.to_string()
    }
}

/// Inline-styled command.
pub fn cmd(c: &str) -> String {
    if colors_enabled() {
        style(c).green().for_stderr().to_string()
    } else {
        c.to_string()
    }
}
