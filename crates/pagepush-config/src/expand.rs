//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the input unchanged if no `${}` patterns are present, so a lone
/// `$` in a value is left alone. Once `${` appears, bare `$VAR` references
/// are expanded too when set; unset bare references are kept verbatim.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(name) = first_missing_required(value) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    // Unset variables only reach the lookup when they carry a default.
    shellexpand::env_with_context(value, |var| -> Result<Option<String>, std::env::VarError> {
        Ok(std::env::var(var).ok())
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} could not be read", e.var_name),
    })
}

/// Find the first `${VAR}` reference without a default whose variable is unset.
fn first_missing_required(value: &str) -> Option<&str> {
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        let inner = &after[..end];
        if !inner.contains(":-") && std::env::var(inner).is_err() {
            return Some(inner);
        }
        rest = &after[end + 1..];
    }
    None
}
