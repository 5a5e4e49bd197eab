//! `${VAR}` and `${VAR:-default}` expansion in string values.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand braced environment references in `value`.
///
/// Strings without `${` are returned as-is, so a literal `$` in a title or
/// path needs no escaping.
pub(crate) fn expand(value: &str, field: &'static str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field,
            var: e.var_name,
        })
}

/// [`expand`] for optional keys.
pub(crate) fn expand_in_place(
    value: &mut Option<String>,
    field: &'static str,
) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_mut() {
        *raw = expand(raw, field)?;
    }
    Ok(())
}
