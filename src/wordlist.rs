//! Word catalogs
//!
//! A word source lists available catalogs and loads one as plain strings.
//! Filtering and padding happen later, per difficulty.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A loadable word catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: String,
    pub title: String,
    pub approx_count: usize,
}

/// Supplies word catalogs to the game
pub trait WordSource {
    fn list_catalogs(&self) -> Vec<Catalog>;
    fn load_words(&self, catalog_id: &str) -> Result<Vec<String>, LoadError>;
}

impl<T: WordSource + ?Sized> WordSource for Box<T> {
    fn list_catalogs(&self) -> Vec<Catalog> {
        (**self).list_catalogs()
    }

    fn load_words(&self, catalog_id: &str) -> Result<Vec<String>, LoadError> {
        (**self).load_words(catalog_id)
    }
}

/// Title from a file name: `local_places.txt` -> `Local Places`
pub fn title_from_filename(name: &str) -> String {
    let stem = name.strip_suffix(".txt").unwrap_or(name);
    stem.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed, non-empty lines
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Catalogs read from `*.txt` files in a directory, one word per line
#[derive(Debug, Clone)]
pub struct DirWordSource {
    dir: PathBuf,
}

impl DirWordSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file: &str) -> Result<String, LoadError> {
        let path = self.dir.join(file);
        fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }
}

impl WordSource for DirWordSource {
    fn list_catalogs(&self) -> Vec<Catalog> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cannot list wordlists in {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };

        let mut catalogs: Vec<Catalog> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.to_lowercase().ends_with(".txt"))
            .map(|name| {
                let approx_count = self.read(&name).map(|t| parse_words(&t).len()).unwrap_or(0);
                Catalog {
                    title: title_from_filename(&name),
                    id: name,
                    approx_count,
                }
            })
            .collect();
        catalogs.sort_by(|a, b| a.id.cmp(&b.id));
        catalogs
    }

    fn load_words(&self, catalog_id: &str) -> Result<Vec<String>, LoadError> {
        // Only plain file names inside the directory
        if catalog_id.contains(['/', '\\']) || catalog_id.starts_with('.') {
            return Err(LoadError::UnknownCatalog(catalog_id.to_string()));
        }
        let text = self.read(catalog_id)?;
        let words = parse_words(&text);
        log::info!("Loaded {} words from {}", words.len(), catalog_id);
        Ok(words)
    }
}

/// In-memory catalogs (tests, embedded lists, wasm host)
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    catalogs: Vec<(Catalog, Vec<String>)>,
}

impl StaticWordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a catalog
    pub fn insert(&mut self, id: &str, title: &str, words: Vec<String>) {
        let catalog = Catalog {
            id: id.to_string(),
            title: title.to_string(),
            approx_count: words.len(),
        };
        self.catalogs.retain(|(c, _)| c.id != id);
        self.catalogs.push((catalog, words));
    }

    pub fn with(mut self, id: &str, words: &[&str]) -> Self {
        let words = words.iter().map(|w| w.to_string()).collect();
        self.insert(id, &title_from_filename(id), words);
        self
    }
}

impl WordSource for StaticWordSource {
    fn list_catalogs(&self) -> Vec<Catalog> {
        self.catalogs.iter().map(|(c, _)| c.clone()).collect()
    }

    fn load_words(&self, catalog_id: &str) -> Result<Vec<String>, LoadError> {
        self.catalogs
            .iter()
            .find(|(c, _)| c.id == catalog_id)
            .map(|(_, words)| words.clone())
            .ok_or_else(|| LoadError::UnknownCatalog(catalog_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("local_places.txt"), "Local Places");
        assert_eq!(title_from_filename("animals.txt"), "Animals");
        assert_eq!(title_from_filename("sci-fi__terms"), "Sci Fi Terms");
    }

    #[test]
    fn test_parse_words_skips_blank_lines() {
        assert_eq!(parse_words("cat\r\n\n  dog \n"), vec!["cat", "dog"]);
    }

    #[test]
    fn test_dir_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("animals.txt"), "cat\ndog\n\nbird\n").unwrap();
        fs::write(dir.path().join("food.txt"), "pie\n").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let source = DirWordSource::new(dir.path());
        let catalogs = source.list_catalogs();
        assert_eq!(catalogs.len(), 2);
        assert_eq!(catalogs[0].id, "animals.txt");
        assert_eq!(catalogs[0].title, "Animals");
        assert_eq!(catalogs[0].approx_count, 3);

        assert_eq!(source.load_words("animals.txt").unwrap(), vec!["cat", "dog", "bird"]);
        assert!(matches!(source.load_words("missing.txt"), Err(LoadError::Io { .. })));
        assert!(matches!(
            source.load_words("../animals.txt"),
            Err(LoadError::UnknownCatalog(_))
        ));
    }

    #[test]
    fn test_static_source() {
        let source = StaticWordSource::new().with("animals.txt", &["cat", "dog"]);
        assert_eq!(source.list_catalogs()[0].title, "Animals");
        assert_eq!(source.load_words("animals.txt").unwrap().len(), 2);
        assert!(source.load_words("food.txt").is_err());
    }
}
