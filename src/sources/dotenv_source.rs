//! `.env` file settings source.
//!
//! Reads an env file without touching the process environment and exposes
//! its assignments as string settings.

use std::path::PathBuf;

use crate::dotenv::{read_env_file, DEFAULT_ENV_FILE};
use crate::env::ConfigEnv;
use crate::error::{SettingError, SettingErrors};
use crate::source::Source;
use crate::value::SettingsMap;

/// Env file settings source.
///
/// Relative paths are searched for upward from the current directory the
/// same way [`load_env`](crate::dotenv::load_env) does. A missing file
/// yields no settings unless the source is [`required`](DotEnv::required).
#[derive(Debug, Clone)]
pub struct DotEnv {
    path: PathBuf,
    required: bool,
    name: String,
}

impl DotEnv {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            required: false,
            name,
        }
    }

    /// Fail when the file cannot be found.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Default for DotEnv {
    fn default() -> Self {
        Self::file(DEFAULT_ENV_FILE)
    }
}

impl Source for DotEnv {
    fn load(&self, env: &dyn ConfigEnv) -> Result<SettingsMap, SettingErrors> {
        let found = read_env_file(env, &self.path)
            .map_err(|e| SettingErrors::single(SettingError::source(&self.name, e.to_string())))?;

        match found {
            Some((_, vars)) => Ok(vars.to_settings()),
            None if self.required => Err(SettingErrors::single(SettingError::source(
                &self.name,
                "file not found",
            ))),
            None => Ok(SettingsMap::new()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;
    use crate::error::ErrorCode;
    use crate::value::Value;

    #[test]
    fn test_dotenv_loads_assignments() {
        let env = MockEnv::new()
            .with_cwd("/srv/app")
            .with_file("/srv/app/.env", "DEBUG=True\nALLOWED_HOSTS='a.com,b.com'\n");

        let settings = DotEnv::default().load(&env).unwrap();

        assert_eq!(settings["DEBUG"], Value::from("True"));
        assert_eq!(settings["ALLOWED_HOSTS"], Value::from("a.com,b.com"));
        assert!(env.get_env("DEBUG").is_none());
    }

    #[test]
    fn test_dotenv_missing_file() {
        let env = MockEnv::new().with_cwd("/srv/app");

        assert!(DotEnv::default().load(&env).unwrap().is_empty());

        let errors = DotEnv::file(".env.production").required().load(&env).unwrap_err();
        assert_eq!(errors.first().code, ErrorCode::Source);
        assert_eq!(errors.first().message, ".env.production: file not found");
    }

    #[test]
    fn test_dotenv_parse_error() {
        let env = MockEnv::new()
            .with_cwd("/srv/app")
            .with_file("/srv/app/.env", "GOOD=1\nBAD='open\n");

        let errors = DotEnv::default().load(&env).unwrap_err();
        assert!(errors.first().message.contains("Unmatched single quote at line 2"));
    }
}
