//! Display helpers shared by the terminal UI and the one-shot printer.
//! Keep helpers small and pure so they can be tested directly.

use crate::models::AbilityEntry;

/// Uppercase the first character of `s`, leaving the rest untouched.
///
/// Examples: `pikachu` -> `Pikachu`, `lightning-rod` -> `Lightning-rod`, `` -> ``.
pub fn capitalize_first(s: &str) -> String {
    let mut chs = s.chars();
    match chs.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chs.as_str(),
    }
}

/// Render a value stored in tenths of `unit` (decimetres, hectograms).
pub fn format_tenths(value: u32, unit: &str) -> String {
    format!("{}.{} {}", value / 10, value % 10, unit)
}

pub fn ability_label(ability: &AbilityEntry) -> String {
    if ability.is_hidden {
        format!("{} (hidden)", capitalize_first(&ability.name))
    } else {
        capitalize_first(&ability.name)
    }
}
