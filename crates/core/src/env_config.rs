//! Environment variable parsing with warn-level logging for invalid values.

use std::fmt::Display;
use std::str::FromStr;

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, default: T) -> T {
    parse_with_default(var, std::env::var(var).ok().as_deref(), default)
}

/// Non-empty string value of an environment variable.
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn parse_with_default<T: FromStr + Display>(var: &str, raw: Option<&str>, default: T) -> T {
    let Some(value) = raw else {
        return default;
    };
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!(var, value, default = %default, "invalid env var value, using default");
            default
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_value() {
        let result: u16 = parse_with_default("CDM_ADMIN_PORT", Some("9000"), 8787);
        assert_eq!(result, 9000);
    }

    #[test]
    fn test_parse_invalid_value() {
        let result: u16 = parse_with_default("CDM_ADMIN_PORT", Some("banana"), 8787);
        assert_eq!(result, 8787);
    }

    #[test]
    fn test_parse_missing_value() {
        let result: u32 = parse_with_default("CDM_ADMIN_DEFAULT_PAGE_SIZE", None, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_parse_empty_value() {
        let result: u32 = parse_with_default("CDM_ADMIN_DEFAULT_PAGE_SIZE", Some(""), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_missing_var_uses_default() {
        let result: u32 = env_parse_with_default("CDM_ADMIN_TEST_UNSET_VAR_41873", 25);
        assert_eq!(result, 25);
        assert_eq!(env_non_empty("CDM_ADMIN_TEST_UNSET_VAR_41873"), None);
    }
}
