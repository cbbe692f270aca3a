//! ConfigEnv trait for testable I/O.
//!
//! Env-file discovery, the `Env` source, and `load_env` all go through this
//! trait so tests can run against an in-memory filesystem and environment.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// File system and environment access used by settings loading.
///
/// # Example
///
/// ```
/// use dj_typed_settings::env::{ConfigEnv, MockEnv};
/// use std::path::Path;
///
/// let env = MockEnv::new()
///     .with_cwd("/srv/app")
///     .with_file("/srv/app/.env", "DEBUG=True\n")
///     .with_env("SECRET_KEY", "s3cr3t");
///
/// assert!(env.file_exists(Path::new("/srv/app/.env")));
/// assert_eq!(env.get_env("SECRET_KEY").as_deref(), Some("s3cr3t"));
/// ```
pub trait ConfigEnv: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the file is missing, unreadable, or not UTF-8.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Check if a regular file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// The current working directory.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Get an environment variable by name.
    fn get_env(&self, name: &str) -> Option<String>;

    /// Set an environment variable.
    fn set_env_var(&self, name: &str, value: &str);

    /// Get all environment variables matching a prefix.
    fn env_vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)>;

    /// Get all environment variables.
    fn all_env_vars(&self) -> Vec<(String, String)>;
}

/// Production environment using standard library I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealEnv;

impl RealEnv {
    /// Create a new real environment.
    pub fn new() -> Self {
        Self
    }
}

impl ConfigEnv for RealEnv {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn get_env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set_env_var(&self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }

    fn env_vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        std::env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect()
    }

    fn all_env_vars(&self) -> Vec<(String, String)> {
        std::env::vars().collect()
    }
}

#[derive(Debug, Clone)]
enum MockFile {
    Content(String),
    PermissionDenied,
}

/// In-memory environment for tests.
///
/// The working directory defaults to `/`.
#[derive(Debug)]
pub struct MockEnv {
    files: RwLock<HashMap<PathBuf, MockFile>>,
    env_vars: RwLock<HashMap<String, String>>,
    cwd: PathBuf,
}

impl Default for MockEnv {
    fn default() -> Self {
        Self {
            files: RwLock::default(),
            env_vars: RwLock::default(),
            cwd: PathBuf::from("/"),
        }
    }
}

impl MockEnv {
    /// Create a new empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory.
    pub fn with_cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = path.into();
        self
    }

    /// Add a file with content.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.set_file(path, content);
        self
    }

    /// Add a file that will return "permission denied" on read.
    pub fn with_unreadable_file(self, path: impl Into<PathBuf>) -> Self {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), MockFile::PermissionDenied);
        self
    }

    /// Set an environment variable.
    pub fn with_env(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_env(name, value);
        self
    }

    /// Set multiple environment variables from an iterator.
    pub fn with_envs<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut env_vars = self.env_vars.write().unwrap_or_else(PoisonError::into_inner);
        for (k, v) in vars {
            env_vars.insert(k.into(), v.into());
        }
        drop(env_vars);
        self
    }

    /// Add or replace a file after creation.
    pub fn set_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), MockFile::Content(content.into()));
    }

    /// Update an environment variable.
    pub fn set_env(&self, name: impl Into<String>, value: impl Into<String>) {
        self.env_vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    /// Remove an environment variable.
    pub fn remove_env(&self, name: &str) {
        self.env_vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }
}

impl ConfigEnv for MockEnv {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);

        match files.get(path) {
            Some(MockFile::Content(content)) => Ok(content.clone()),
            Some(MockFile::PermissionDenied) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("mock permission denied: {}", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock file not found: {}", path.display()),
            )),
        }
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn get_env(&self, name: &str) -> Option<String> {
        self.env_vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn set_env_var(&self, name: &str, value: &str) {
        self.set_env(name, value);
    }

    fn env_vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.env_vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn all_env_vars(&self) -> Vec<(String, String)> {
        self.env_vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_env_file_exists() {
        let env = RealEnv::new();
        assert!(env.file_exists(Path::new("Cargo.toml")));
        assert!(!env.file_exists(Path::new("manage.py")));
    }

    #[test]
    fn test_mock_env_files() {
        let env = MockEnv::new()
            .with_file("/app/.env", "DEBUG=1\n")
            .with_file("/app/manage.py", "");

        assert!(env.file_exists(Path::new("/app/.env")));
        assert!(env.file_exists(Path::new("/app/manage.py")));
        assert!(!env.file_exists(Path::new("/app/.env.local")));
        assert_eq!(env.read_file(Path::new("/app/.env")).unwrap(), "DEBUG=1\n");
    }

    #[test]
    fn test_mock_env_missing_file() {
        let env = MockEnv::new();
        let result = env.read_file(Path::new(".env"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mock_env_permission_denied() {
        let env = MockEnv::new().with_unreadable_file("/app/.env");
        assert!(env.file_exists(Path::new("/app/.env")));
        let result = env.read_file(Path::new("/app/.env"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_mock_env_vars() {
        let env = MockEnv::new()
            .with_env("DJANGO_DEBUG", "True")
            .with_env("DJANGO_SECRET_KEY", "abc")
            .with_env("HOME", "/root");

        assert_eq!(env.get_env("DJANGO_DEBUG"), Some("True".to_string()));
        assert_eq!(env.get_env("MISSING"), None);
        assert_eq!(env.env_vars_with_prefix("DJANGO_").len(), 2);
        assert_eq!(env.all_env_vars().len(), 3);

        env.set_env_var("HOME", "/home/app");
        assert_eq!(env.get_env("HOME"), Some("/home/app".to_string()));
        env.remove_env("HOME");
        assert_eq!(env.get_env("HOME"), None);
    }

    #[test]
    fn test_mock_env_cwd() {
        assert_eq!(MockEnv::new().current_dir().unwrap(), PathBuf::from("/"));
        let env = MockEnv::new().with_cwd("/srv/app/config");
        assert_eq!(env.current_dir().unwrap(), PathBuf::from("/srv/app/config"));
    }
}
