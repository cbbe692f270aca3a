//! Integration tests for `load_env` against the real filesystem.
//!
//! Variable names are unique per test since the process environment is
//! shared between test threads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dj_typed_settings::dotenv::load_env_with;
use dj_typed_settings::prelude::*;
use dj_typed_settings::DotEnvError;
use tempfile::TempDir;

/// The real environment, seen from a fixed working directory.
///
/// Relative paths resolve against `cwd` instead of the process directory.
struct InDir {
    cwd: PathBuf,
    real: RealEnv,
}

impl InDir {
    fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            real: RealEnv::new(),
        }
    }
}

impl ConfigEnv for InDir {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.real.read_file(&self.cwd.join(path))
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.real.file_exists(&self.cwd.join(path))
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn get_env(&self, name: &str) -> Option<String> {
        self.real.get_env(name)
    }

    fn set_env_var(&self, name: &str, value: &str) {
        self.real.set_env_var(name, value)
    }

    fn env_vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.real.env_vars_with_prefix(prefix)
    }

    fn all_env_vars(&self) -> Vec<(String, String)> {
        self.real.all_env_vars()
    }
}

#[test]
fn test_load_env_absolute_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(
        &path,
        "export DJTS_ABS_NAME=app\nDJTS_ABS_QUOTED=\"hello world\"\n# comment\n",
    )
    .unwrap();

    let loaded = load_env(&path, false).unwrap();

    assert_eq!(loaded.as_deref(), Some(path.as_path()));
    assert_eq!(std::env::var("DJTS_ABS_NAME").unwrap(), "app");
    assert_eq!(std::env::var("DJTS_ABS_QUOTED").unwrap(), "hello world");
}

#[test]
fn test_load_env_keeps_existing_unless_overridden() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "DJTS_OVERRIDE_VAR=from-file\n").unwrap();

    std::env::set_var("DJTS_OVERRIDE_VAR", "from-process");
    load_env(&path, false).unwrap();
    assert_eq!(std::env::var("DJTS_OVERRIDE_VAR").unwrap(), "from-process");

    load_env(&path, true).unwrap();
    assert_eq!(std::env::var("DJTS_OVERRIDE_VAR").unwrap(), "from-file");
}

#[test]
fn test_load_env_missing_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    assert!(load_env(dir.path().join("missing.env"), false).unwrap().is_none());
}

#[test]
fn test_load_env_parse_error_reports_path_and_position() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "DJTS_PARSE_OK=1\nDJTS_PARSE_BAD=\"open\n").unwrap();

    let err = load_env(&path, false).unwrap_err();
    match &err {
        DotEnvError::Parse { path: found, source } => {
            assert_eq!(found, &path);
            assert_eq!(source.line, 2);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(std::env::var("DJTS_PARSE_OK").is_err());
}

#[test]
fn test_load_env_upward_search() {
    // project/{manage.py, .env, app/}
    let root = TempDir::new().unwrap();
    let project = root.path().join("project");
    let app = project.join("app");
    fs::create_dir_all(&app).unwrap();
    fs::write(project.join("manage.py"), "").unwrap();
    fs::write(project.join(".env"), "DJTS_UPWARD_VAR=found\n").unwrap();

    let loaded = load_env_with(&InDir::new(&app), Path::new(".env"), false).unwrap();

    assert_eq!(loaded, Some(project.join(".env")));
    assert_eq!(std::env::var("DJTS_UPWARD_VAR").unwrap(), "found");
}

#[test]
fn test_load_env_stops_at_manage_py() {
    // project/{.env, subproject/{manage.py, app/}}
    let root = TempDir::new().unwrap();
    let project = root.path().join("project");
    let subproject = project.join("subproject");
    let app = subproject.join("app");
    fs::create_dir_all(&app).unwrap();
    fs::write(project.join(".env"), "DJTS_DANGEROUS_VAR=wrong\n").unwrap();
    fs::write(subproject.join("manage.py"), "").unwrap();

    let loaded = load_env_with(&InDir::new(&app), Path::new(".env"), false).unwrap();

    assert!(loaded.is_none());
    assert!(std::env::var("DJTS_DANGEROUS_VAR").is_err());
}

#[test]
fn test_dotenv_source_feeds_builder() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("manage.py"), "").unwrap();
    fs::write(
        root.path().join(".env"),
        "SECRET_KEY=from-file\nDEBUG=true\nALLOWED_HOSTS=a.example.com,b.example.com\n",
    )
    .unwrap();

    let settings = Settings::builder()
        .source(Defaults::schema())
        .source(DotEnv::default().required())
        .build_with_env(&InDir::new(root.path()))
        .unwrap();

    assert_eq!(settings.get_str("SECRET_KEY"), Some("from-file"));
    assert_eq!(settings.get_bool("DEBUG"), Some(true));
    assert_eq!(
        settings.get("ALLOWED_HOSTS"),
        Some(&Value::from(vec!["a.example.com", "b.example.com"]))
    );
}
