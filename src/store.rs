use std::{
    collections::HashMap,
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Named rule texts
pub trait RuleStore {
    /// Rule text by name. Empty for unknown or invalid names
    fn get(&self, name: &str) -> String;

    fn put(&mut self, name: &str, text: &str) -> Result<(), StoreError>;

    /// All known names
    fn names(&self) -> Vec<String>;
}

/// Names are letters, digits, `-`, `_` and `.`
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn checked_name(name: &str) -> Result<&str, StoreError> {
    let name = name.trim();
    if !is_valid_name(name) {
        return Err(StoreError::InvalidName(name.to_owned()));
    }

    Ok(name)
}

/// Keeps each rule in `<dir>/<name>.txt`. Reads are cached
#[derive(Debug)]
pub struct DirStore {
    dir: PathBuf,
    names: Vec<String>,
    cache: Mutex<HashMap<String, String>>,
}

impl DirStore {
    /// Creates directory if it does not exist and lists existing rules
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();

            if !path.extension().is_some_and(|ext| ext == "txt") {
                continue;
            }

            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
        names.sort();

        Ok(Self {
            dir,
            names,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.txt"))
    }
}

impl RuleStore for DirStore {
    fn get(&self, name: &str) -> String {
        let Ok(name) = checked_name(name) else {
            return String::new();
        };

        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };

        cache
            .entry(name.to_owned())
            .or_insert_with(|| {
                fs::read_to_string(self.path(name)).unwrap_or_else(|err| {
                    log::warn!("reading rule {name}: {err}");
                    String::new()
                })
            })
            .clone()
    }

    fn put(&mut self, name: &str, text: &str) -> Result<(), StoreError> {
        let name = checked_name(name)?;

        fs::write(self.path(name), text)?;

        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_owned());
        }

        let cache = match self.cache.get_mut() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.insert(name.to_owned(), text.to_owned());

        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}

/// In memory store, names in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rules: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleStore for MemoryStore {
    fn get(&self, name: &str) -> String {
        let name = name.trim();

        self.rules
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.clone())
            .unwrap_or_default()
    }

    fn put(&mut self, name: &str, text: &str) -> Result<(), StoreError> {
        let name = checked_name(name)?;

        match self.rules.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = text.to_owned(),
            None => self.rules.push((name.to_owned(), text.to_owned())),
        }

        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.rules.iter().map(|(name, _)| name.clone()).collect()
    }
}

#[derive(Debug)]
pub enum StoreError {
    InvalidName(String),
    Io(io::Error),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidName(name) => write!(f, "invalid rule name: {name:?}"),
            StoreError::Io(err) => write!(f, "rule store io: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::InvalidName(_) => None,
            StoreError::Io(err) => Some(err),
        }
    }
}
