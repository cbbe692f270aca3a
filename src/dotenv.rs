//! `.env` file parsing and loading.
//!
//! The parser implements a narrowed subset of shell assignment syntax:
//!
//! - `[export ]NAME=VALUE` assignments, separated by whitespace or `;`
//! - `#` comments wherever a new assignment could start
//! - outside quotes, escaped newlines are omitted, other escaped characters
//!   are kept literally, and unescaped backslashes are dropped
//! - inside single quotes, everything is literal
//! - inside double quotes, escaped newlines are omitted, `\"` and `\\` are
//!   unescaped, and any other backslash is kept
//!
//! Quoted and unquoted segments concatenate: `KEY=un'quoted'"mixed"`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::env::{ConfigEnv, RealEnv};
use crate::error::{DotEnvError, EnvParseError, EnvParseErrorKind};
use crate::value::{SettingsMap, Value};

/// Marker file of a Django project root. The env file search stops there.
pub const PROJECT_ROOT_MARKER: &str = "manage.py";

/// Default env file name.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Variables parsed from an env file, in first-assignment order.
///
/// Reassigning a name replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    entries: Vec<(String, String)>,
    // name -> position in `entries`
    index: HashMap<String, usize>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Variable names in order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// The variables as string-valued settings.
    pub fn to_settings(&self) -> SettingsMap {
        self.iter()
            .map(|(n, v)| (n.to_string(), Value::from(v)))
            .collect()
    }
}

impl IntoIterator for EnvVars {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ScanName,
    ScanValue,
    InSingleQuote,
    InDoubleQuote,
}

/// Parse env file content given as lines (each keeping its newline).
///
/// ```
/// use dj_typed_settings::parse_env_file;
///
/// let vars = parse_env_file(&["KEY=VALUE\n", "export QUOTED=\"a b\"\n"]).unwrap();
/// assert_eq!(vars.get("KEY"), Some("VALUE"));
/// assert_eq!(vars.get("QUOTED"), Some("a b"));
/// ```
pub fn parse_env_file<S: AsRef<str>>(lines: &[S]) -> Result<EnvVars, EnvParseError> {
    let content: String = lines.iter().map(AsRef::as_ref).collect();
    parse_env_str(&content)
}

/// Parse env file content.
pub fn parse_env_str(content: &str) -> Result<EnvVars, EnvParseError> {
    let chars: Vec<char> = content.chars().chain(std::iter::once('\n')).collect();
    let len = chars.len();

    let mut result = EnvVars::new();
    let mut state = State::ScanName;
    let mut cursor = 0;
    let mut quote_start = 0;
    let mut name = String::new();
    let mut value = String::new();

    while cursor < len {
        match state {
            State::ScanName => {
                while cursor < len && is_separator(chars[cursor]) {
                    cursor += 1;
                }
                if cursor >= len {
                    break;
                }
                if chars[cursor] == '#' {
                    while cursor < len && chars[cursor] != '\n' {
                        cursor += 1;
                    }
                    continue;
                }
                let Some((var_name, end)) = scan_header(&chars, cursor) else {
                    return Err(parse_error(
                        EnvParseErrorKind::ExpectedAssignment,
                        &chars,
                        cursor,
                    ));
                };
                if chars.get(end) != Some(&'=') {
                    return Err(parse_error(
                        EnvParseErrorKind::ExpectedOperator,
                        &chars,
                        end,
                    ));
                }
                name = var_name;
                cursor = end + 1;
                state = State::ScanValue;
            }
            State::ScanValue => {
                let c = chars[cursor];
                if is_separator(c) {
                    result.insert(std::mem::take(&mut name), std::mem::take(&mut value));
                    cursor += 1;
                    state = State::ScanName;
                } else if c == '\'' || c == '"' {
                    cursor += 1;
                    quote_start = cursor;
                    state = if c == '\'' {
                        State::InSingleQuote
                    } else {
                        State::InDoubleQuote
                    };
                } else if c == '\\' {
                    let run = backslash_run(&chars, cursor);
                    cursor += run;
                    push_backslashes(&mut value, run / 2);
                    if run % 2 == 1 && cursor < len {
                        let escaped = chars[cursor];
                        cursor += 1;
                        if escaped != '\n' {
                            value.push(escaped);
                        }
                    }
                } else {
                    value.push(c);
                    cursor += 1;
                }
            }
            State::InSingleQuote => {
                let Some(close) = chars[cursor..].iter().position(|&c| c == '\'') else {
                    return Err(parse_error(
                        EnvParseErrorKind::UnmatchedSingleQuote,
                        &chars,
                        quote_start,
                    ));
                };
                value.extend(&chars[cursor..cursor + close]);
                cursor += close + 1;
                state = State::ScanValue;
            }
            State::InDoubleQuote => {
                let c = chars[cursor];
                if c == '"' {
                    cursor += 1;
                    state = State::ScanValue;
                } else if c == '\\' {
                    let run = backslash_run(&chars, cursor);
                    cursor += run;
                    push_backslashes(&mut value, run / 2);
                    if run % 2 == 1 && cursor < len {
                        let escaped = chars[cursor];
                        cursor += 1;
                        match escaped {
                            '\n' => {}
                            '"' => value.push('"'),
                            other => {
                                value.push('\\');
                                value.push(other);
                            }
                        }
                    }
                } else {
                    value.push(c);
                    cursor += 1;
                }
            }
        }
    }

    match state {
        State::ScanName => {}
        // A pending value is committed at end of input, even after a
        // trailing lone backslash.
        State::ScanValue => result.insert(name, value),
        State::InSingleQuote => {
            return Err(parse_error(
                EnvParseErrorKind::UnmatchedSingleQuote,
                &chars,
                quote_start,
            ))
        }
        State::InDoubleQuote => {
            return Err(parse_error(
                EnvParseErrorKind::UnmatchedDoubleQuote,
                &chars,
                quote_start,
            ))
        }
    }

    Ok(result)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ';'
}

// Matches `(export\s+)?[A-Za-z_][A-Za-z0-9_]*` at `start`, returning the
// name and the index just past it.
fn scan_header(chars: &[char], start: usize) -> Option<(String, usize)> {
    let ident_end = |from: usize| -> Option<usize> {
        let first = *chars.get(from)?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let rest = chars[from + 1..]
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric() || **c == '_')
            .count();
        Some(from + 1 + rest)
    };

    let end = ident_end(start)?;
    let word: String = chars[start..end].iter().collect();

    if word == "export" {
        let spaces = chars[end..].iter().take_while(|c| c.is_whitespace()).count();
        if spaces > 0 {
            if let Some(name_end) = ident_end(end + spaces) {
                let name = chars[end + spaces..name_end].iter().collect();
                return Some((name, name_end));
            }
        }
    }
    Some((word, end))
}

fn backslash_run(chars: &[char], start: usize) -> usize {
    chars[start..].iter().take_while(|&&c| c == '\\').count()
}

fn push_backslashes(value: &mut String, count: usize) {
    value.extend(std::iter::repeat('\\').take(count));
}

fn parse_error(kind: EnvParseErrorKind, chars: &[char], offset: usize) -> EnvParseError {
    let offset = offset.min(chars.len());
    let before = &chars[..offset];
    let line = before.iter().filter(|&&c| c == '\n').count() + 1;
    let column = match before.iter().rposition(|&c| c == '\n') {
        Some(newline) => offset - newline,
        None => offset + 1,
    };
    EnvParseError {
        kind,
        line: u32::try_from(line).unwrap_or(u32::MAX),
        column: u32::try_from(column).unwrap_or(u32::MAX),
    }
}

/// Locate an env file.
///
/// Absolute paths are used as-is. A relative path that does not exist is
/// searched for upward from the current directory, stopping at a directory
/// containing `manage.py` or at the filesystem root.
pub fn find_env_file(env: &dyn ConfigEnv, path: &Path) -> Option<PathBuf> {
    if path.is_absolute() || env.file_exists(path) {
        return env.file_exists(path).then(|| path.to_path_buf());
    }

    let mut dir = env.current_dir().ok()?;
    loop {
        let candidate = dir.join(path);
        if env.file_exists(&candidate) {
            return Some(candidate);
        }
        if env.file_exists(&dir.join(PROJECT_ROOT_MARKER)) || !dir.pop() {
            return None;
        }
    }
}

/// Read and parse an env file without touching the environment.
///
/// Returns `Ok(None)` if no file is found.
pub fn read_env_file(
    env: &dyn ConfigEnv,
    path: &Path,
) -> Result<Option<(PathBuf, EnvVars)>, DotEnvError> {
    let Some(found) = find_env_file(env, path) else {
        trace!(path = %path.display(), "no env file found");
        return Ok(None);
    };

    let content = env.read_file(&found).map_err(|source| DotEnvError::Io {
        path: found.clone(),
        source,
    })?;
    let vars = parse_env_str(&content).map_err(|source| DotEnvError::Parse {
        path: found.clone(),
        source,
    })?;
    Ok(Some((found, vars)))
}

/// Load an env file into the process environment.
///
/// Variables already set are kept unless `override_existing` is true.
/// Returns the path that was loaded, or `None` if no file was found.
pub fn load_env(
    path: impl AsRef<Path>,
    override_existing: bool,
) -> Result<Option<PathBuf>, DotEnvError> {
    load_env_with(&RealEnv, path.as_ref(), override_existing)
}

/// [`load_env`] against an explicit environment.
pub fn load_env_with(
    env: &dyn ConfigEnv,
    path: &Path,
    override_existing: bool,
) -> Result<Option<PathBuf>, DotEnvError> {
    let Some((found, vars)) = read_env_file(env, path)? else {
        return Ok(None);
    };

    let mut applied = 0;
    for (name, value) in vars.iter() {
        if override_existing || env.get_env(name).is_none() {
            env.set_env_var(name, value);
            applied += 1;
        }
    }
    debug!(
        path = %found.display(),
        total = vars.len(),
        applied,
        "loaded env file"
    );
    Ok(Some(found))
}
