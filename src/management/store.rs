use std::{collections::HashMap, env, io::ErrorKind, path::PathBuf};

use crate::{Res, error::AuthError, utils};

/// Key/value storage for client credentials and tokens.
///
/// `set` only stages a value; nothing reaches durable storage until
/// [`save`](CredentialStore::save) is awaited.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    fn save(&mut self) -> impl Future<Output = Res<()>> + Send;
}

/// Credential store backed by a `.env` file.
///
/// Lookups fall back to the process environment for keys the file does not
/// define. Empty values count as absent.
#[derive(Debug)]
pub struct EnvFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
    pending: Vec<(String, String)>,
}

impl EnvFileStore {
    /// Loads `path` if it exists. A missing file is an empty store that
    /// will be created on the first save.
    pub async fn open(path: impl Into<PathBuf>) -> Res<Self> {
        let path = path.into();
        let mut values = HashMap::new();

        if async_fs::metadata(&path).await.is_ok() {
            let entries = dotenv::from_path_iter(&path)
                .map_err(|e| AuthError::Store(format!("{}: {e}", path.display())))?;
            for entry in entries {
                let (key, value) =
                    entry.map_err(|e| AuthError::Store(format!("{}: {e}", path.display())))?;
                values.insert(key, value);
            }
        }

        Ok(EnvFileStore {
            path,
            values,
            pending: Vec::new(),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CredentialStore for EnvFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
            .filter(|value| !value.is_empty())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        match self.pending.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.pending.push((key.to_string(), value.to_string())),
        }
    }

    /// Rewrites the file with all staged values. Lines for other keys and
    /// comments are kept as they are.
    async fn save(&mut self) -> Res<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let existing = match async_fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        async_fs::write(&self.path, merge_env_file(&existing, &self.pending)).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            async_fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        self.pending.clear();
        Ok(())
    }
}

/// Applies `updates` to the text of a `.env` file.
///
/// The first assignment of an updated key is replaced in place, later
/// duplicates of it are dropped, and keys not yet present are appended.
pub fn merge_env_file(existing: &str, updates: &[(String, String)]) -> String {
    let mut written = vec![false; updates.len()];
    let mut lines: Vec<String> = Vec::new();

    for line in existing.lines() {
        let position = utils::env_line_key(line)
            .and_then(|key| updates.iter().position(|(k, _)| k == key));

        match position {
            Some(i) if written[i] => {}
            Some(i) => {
                let (key, value) = &updates[i];
                lines.push(format!("{key}={}", utils::quote_env_value(value)));
                written[i] = true;
            }
            None => lines.push(line.to_string()),
        }
    }

    for ((key, value), done) in updates.iter().zip(&written) {
        if !done {
            lines.push(format!("{key}={}", utils::quote_env_value(value)));
        }
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    contents
}

/// In-memory store, for embedding the flow and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        MemoryStore {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            saves: 0,
        }
    }

    /// Number of completed saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    async fn save(&mut self) -> Res<()> {
        self.saves += 1;
        Ok(())
    }
}
