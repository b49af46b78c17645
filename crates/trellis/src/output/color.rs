//! Color helpers for text output.
//!
//! Semantic theme:
//!   - green: positive answers (connected, acyclic, path found)
//!   - red: negative answers and errors
//!   - yellow: warnings
//!   - cyan: vertex ids
//!   - dimmed: labels and unreachable markers

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Green "yes" or red "no".
pub(crate) fn yes_no(value: bool, config: &OutputConfig) -> String {
    if value {
        success("yes", config)
    } else {
        error("no", config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_when_colors_disabled() {
        let config = OutputConfig::new(false);
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(warning("careful", &config), "careful");
        assert_eq!(yes_no(false, &config), "no");
    }

    #[test]
    fn colored_when_enabled() {
        colored::control::set_override(true);
        let config = OutputConfig::new(true);
        assert_ne!(info("7", &config), "7");
        assert!(info("7", &config).contains('7'));
        colored::control::unset_override();
    }
}
