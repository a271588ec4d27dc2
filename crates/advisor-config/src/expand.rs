//! `${VAR}` and `${VAR:-default}` expansion for config strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Strings without `${` are returned as is, so a bare `$` in a URL or path
/// is never touched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(Unset(var.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of an unset variable.
struct Unset(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("ADVISOR_TEST_EDIT_HOST", "sandbox.example.com");
        }
        let result = expand_env("https://${ADVISOR_TEST_EDIT_HOST}/edit", "edit.base_url").unwrap();
        assert_eq!(result, "https://sandbox.example.com/edit");
        unsafe {
            std::env::remove_var("ADVISOR_TEST_EDIT_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("ADVISOR_TEST_UNSET_OUT");
        }
        let result = expand_env("${ADVISOR_TEST_UNSET_OUT:-public}", "build.output_dir").unwrap();
        assert_eq!(result, "public");
    }

    #[test]
    fn test_missing_var_names_field_and_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("ADVISOR_TEST_MISSING");
        }
        let err = expand_env("${ADVISOR_TEST_MISSING}", "edit.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("ADVISOR_TEST_MISSING"));
        assert!(err.to_string().contains("edit.base_url"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("dist", "build.output_dir").unwrap(), "dist");
        assert_eq!(
            expand_env("https://example.com/$path", "edit.base_url").unwrap(),
            "https://example.com/$path"
        );
    }
}
