use thiserror::Error;

/// An environment variable required at runtime is unset or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

impl MissingEnvVarError {
    /// Name of the variable that was looked up.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Reads an environment variable, treating a blank value the same as an unset one.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}
