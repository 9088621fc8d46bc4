//! `${VAR}` / `${VAR:-default}` expansion for config strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced form is recognised; strings without `${` are returned
/// as-is, so a literal `$` in a path survives. An unset variable without a
/// default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("STYLIST_TEST_DOCS", "/srv/docs");
        }
        let result = expand_env("${STYLIST_TEST_DOCS}/api", "output.dir").unwrap();
        assert_eq!(result, "/srv/docs/api");
        unsafe {
            std::env::remove_var("STYLIST_TEST_DOCS");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("STYLIST_TEST_UNSET");
        }
        let result = expand_env("${STYLIST_TEST_UNSET:-build/docs}", "output.dir").unwrap();
        assert_eq!(result, "build/docs");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("STYLIST_TEST_MISSING");
        }
        let err = expand_env("${STYLIST_TEST_MISSING}", "theme.css").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("STYLIST_TEST_MISSING"));
        assert!(msg.contains("theme.css"));
    }

    #[test]
    fn test_bare_dollar_untouched() {
        assert_eq!(expand_env("assets/$theme.css", "theme.css").unwrap(), "assets/$theme.css");
    }

    #[test]
    fn test_expand_opt_none_stays_none() {
        let mut value = None;
        expand_opt(&mut value, "theme.dump_ast").unwrap();
        assert!(value.is_none());
    }
}
