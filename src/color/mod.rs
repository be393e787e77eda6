//! ANSI color sequences applied when a backend's sink is a terminal.
//!
//! The basic 8-color palette is used rather than true color: these escapes
//! prefix every rendered line, and the widest terminal compatibility wins
//! over palette fidelity for log output.

use crate::level::Level;

/// Terminates any active SGR styling so subsequent text returns to the terminal default.
pub const RESET: &str = "\x1b[0m";

const MAGENTA: &str = "\x1b[35m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const MAGENTA_BOLD: &str = "\x1b[35;1m";
const RED_BOLD: &str = "\x1b[31;1m";
const YELLOW_BOLD: &str = "\x1b[33;1m";
const GREEN_BOLD: &str = "\x1b[32;1m";
const CYAN_BOLD: &str = "\x1b[36;1m";
const WHITE_BOLD: &str = "\x1b[37;1m";

/// The escape sequence for a record's level; `None` is the level-less plain
/// print variant, rendered white.
#[must_use]
pub const fn sequence(level: Option<Level>, bold: bool) -> &'static str {
    match (level, bold) {
        (Some(Level::Fatal), false) => MAGENTA,
        (Some(Level::Fatal), true) => MAGENTA_BOLD,
        (Some(Level::Error), false) => RED,
        (Some(Level::Error), true) => RED_BOLD,
        (Some(Level::Warn), false) => YELLOW,
        (Some(Level::Warn), true) => YELLOW_BOLD,
        (Some(Level::Info), false) => GREEN,
        (Some(Level::Info), true) => GREEN_BOLD,
        (Some(Level::Debug), false) => CYAN,
        (Some(Level::Debug), true) => CYAN_BOLD,
        (None, false) => WHITE,
        (None, true) => WHITE_BOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_palette_contract() {
        assert_eq!(sequence(Some(Level::Fatal), false), "\x1b[35m");
        assert_eq!(sequence(Some(Level::Error), false), "\x1b[31m");
        assert_eq!(sequence(Some(Level::Warn), false), "\x1b[33m");
        assert_eq!(sequence(Some(Level::Info), false), "\x1b[32m");
        assert_eq!(sequence(Some(Level::Debug), false), "\x1b[36m");
        assert_eq!(sequence(None, false), "\x1b[37m");
    }

    #[test]
    fn bold_variants_carry_intensity() {
        for level in Level::all() {
            assert!(sequence(Some(level), true).ends_with(";1m"));
        }
    }
}
