//! Configuration path utilities for argui.
//!
//! This module provides functions for resolving the command definition file
//! path and expanding shell variables like `~` in paths.

/// Default path for the command definitions file
const DEFAULT_DEFINITION_PATH: &str = "~/.argui/commands.yml";

/// Name of the flag that launches a program in interactive mode.
///
/// Parameters with this destination are never presented as fields.
pub const INTERACTIVE_FLAG_DEST: &str = "interactive";

/// Resolves the command definition file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// definition path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use argui_core::config::get_definition_path;
///
/// // Use default path
/// let default_path = get_definition_path(&None);
///
/// // Use custom path
/// let custom_path = get_definition_path(&Some("/path/to/commands.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/commands.yml");
/// ```
pub fn get_definition_path(definition_path_arg: &Option<String>) -> String {
    let definition_path = match definition_path_arg {
        Some(definition_path) => definition_path,
        None => DEFAULT_DEFINITION_PATH,
    };

    shellexpand::tilde(definition_path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_definition_path_with_custom_path() {
        let custom_path = Some("/custom/path/commands.yml".to_string());
        let result = get_definition_path(&custom_path);
        assert_eq!(result, "/custom/path/commands.yml");
    }

    #[test]
    fn test_get_definition_path_with_none() {
        let result = get_definition_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with("commands.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_definition_path_with_tilde() {
        let tilde_path = Some("~/my-commands.yml".to_string());
        let result = get_definition_path(&tilde_path);
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-commands.yml"));
    }
}
