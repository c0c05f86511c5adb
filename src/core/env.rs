//! `.env` rendering of a resolved environment.
//!
//! Output is meant to be sourced by a shell, so backslashes are tripled
//! and values with whitespace, `#`, quotes or `=` are double-quoted.

use zeroize::Zeroizing;

use crate::core::vault::Resolution;

/// Suffix marking values that only exist for the current user.
pub const PERSONAL_MARKER: &str = " #personal";

/// Render every resolved variable as `NAME=value` lines, ordered by name.
///
/// Missing personal values are rendered empty.
pub fn render(resolution: &Resolution) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::new());
    for (name, var) in &resolution.vars {
        out.push_str(name);
        out.push('=');
        out.push_str(&quote_if_needed(&escape_backslashes(&var.value)));
        if var.personal {
            out.push_str(PERSONAL_MARKER);
        }
        out.push('\n');
    }
    out
}

fn escape_backslashes(value: &str) -> Zeroizing<String> {
    Zeroizing::new(value.replace('\\', "\\\\\\"))
}

fn quote_if_needed(value: &str) -> Zeroizing<String> {
    let already_quoted = value.len() >= 2 && value.starts_with('"') && value.ends_with('"');
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '='));

    if already_quoted || !needs_quotes {
        return Zeroizing::new(value.to_string());
    }
    Zeroizing::new(format!("\"{}\"", value.replace('"', "\\\"")))
}
