//! Read-only game facts consumed by the dump.
//!
//! The engine-side knowledge (spell tables, item naming, the description
//! database) stays outside this crate. It reaches the dump through the
//! [`GameDataSource`] capability as plain, already-resolved facts. The one
//! implementation shipped here, [`TomlSource`], reads those facts from a TOML
//! snapshot exported by the engine.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplier of the facts the dump walks.
///
/// Slices are returned in the engine's table order, which is the order the
/// document lists them in.
pub trait GameDataSource {
    /// Long version string of the game the facts were taken from.
    fn version(&self) -> &str;
    fn spells(&self) -> &[SpellFacts];
    fn books(&self) -> &[BookFacts];
    fn unrands(&self) -> &[UnrandFacts];
}

/// Range of a targeted spell at zero power and at its power cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRange {
    pub min: i32,
    pub max: i32,
}

/// Noise made when casting a spell and by its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpellNoise {
    pub casting: i32,
    pub effect: i32,
}

/// One spell, as the engine describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellFacts {
    pub name: String,
    pub level: i32,
    /// Long school names, e.g. "Conjurations".
    #[serde(default)]
    pub schools: Vec<String>,
    pub power_cap: i32,
    /// Absent for spells without a range.
    #[serde(default)]
    pub range: Option<SpellRange>,
    #[serde(default)]
    pub noise: SpellNoise,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quote: Option<String>,
    /// Monster-only spells are kept in the tables but left out of the dump.
    #[serde(default = "default_true")]
    pub player_spell: bool,
}

/// One spellbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFacts {
    pub name: String,
    /// Spell names in the order the book lists them.
    #[serde(default)]
    pub spells: Vec<String>,
    pub value: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quote: Option<String>,
}

/// One unrandom artefact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrandFacts {
    pub name: String,
    /// Fully identified inventory name.
    pub full_name: String,
    #[serde(default)]
    pub unidentified_name: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub inscription: Option<String>,
    /// `None` marks a placeholder entry in the artefact table.
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub sub_type: String,
    pub value: i64,
    /// Upper-case flag names, e.g. "EVIL".
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quote: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Layout of the TOML snapshot.
#[derive(Debug, Deserialize)]
struct GameDataFile {
    version: String,
    #[serde(default)]
    spells: Vec<SpellFacts>,
    #[serde(default)]
    books: Vec<BookFacts>,
    #[serde(default)]
    unrands: Vec<UnrandFacts>,
}

/// Facts loaded from a TOML snapshot file.
#[derive(Debug, Clone, PartialEq)]
pub struct TomlSource {
    version: String,
    spells: Vec<SpellFacts>,
    books: Vec<BookFacts>,
    unrands: Vec<UnrandFacts>,
}

impl TomlSource {
    pub fn new(
        version: impl Into<String>,
        spells: Vec<SpellFacts>,
        books: Vec<BookFacts>,
        unrands: Vec<UnrandFacts>,
    ) -> Self {
        TomlSource {
            version: version.into(),
            spells,
            books,
            unrands,
        }
    }

    /// Load a snapshot from `path`.
    ///
    /// # Errors
    /// Errors bubble up from file IO and TOML deserialization.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading game data from '{}'", path.display()))?;
        let source = Self::parse(&text)
            .with_context(|| format!("parsing game data from '{}'", path.display()))?;
        info!(
            "loaded game data {} from '{}': {} spells, {} books, {} unrands",
            source.version,
            path.display(),
            source.spells.len(),
            source.books.len(),
            source.unrands.len()
        );
        Ok(source)
    }

    /// Parse a snapshot from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or does not match the snapshot layout.
    pub fn parse(text: &str) -> Result<Self> {
        let file: GameDataFile = toml::from_str(text).context("invalid game data TOML")?;
        let source = TomlSource::new(file.version, file.spells, file.books, file.unrands);
        source.check_references();
        Ok(source)
    }

    /// Warn about books listing spells the snapshot does not define.
    fn check_references(&self) {
        let known: HashSet<&str> = self.spells.iter().map(|s| s.name.as_str()).collect();
        for book in &self.books {
            for spell in &book.spells {
                if !known.contains(spell.as_str()) {
                    warn!("book '{}' lists unknown spell '{}'", book.name, spell);
                }
            }
        }
    }
}

impl GameDataSource for TomlSource {
    fn version(&self) -> &str {
        &self.version
    }

    fn spells(&self) -> &[SpellFacts] {
        &self.spells
    }

    fn books(&self) -> &[BookFacts] {
        &self.books
    }

    fn unrands(&self) -> &[UnrandFacts] {
        &self.unrands
    }
}

/// File name of the snapshot looked up when no path is given.
pub const DEFAULT_DATA_FILE: &str = "gamedata.toml";

/// Resolve the most likely location of the snapshot file.
///
/// Tries `data/` under the working directory, then next to the executable
/// and one level above it. Falls back to `data/gamedata.toml` so the
/// eventual IO error names a sensible path.
pub fn default_data_path() -> PathBuf {
    let mut candidates = vec![PathBuf::from("data").join(DEFAULT_DATA_FILE)];

    if let Ok(exe_path) = env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            candidates.push(dir.join("data").join(DEFAULT_DATA_FILE));
            if let Some(parent) = dir.parent() {
                candidates.push(parent.join("data").join(DEFAULT_DATA_FILE));
            }
        }
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from("data").join(DEFAULT_DATA_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"
version = "0.32.1"

[[spells]]
name = "Magic Dart"
level = 1
schools = ["Conjurations"]
power_cap = 25
range = { min = 4, max = 4 }
noise = { casting = 1, effect = 0 }
flags = ["dir_or_target", "needs_tracer"]
description = "Throws a small dart of magical energy."

[[spells]]
name = "Smiting"
level = 4
power_cap = 0
player_spell = false

[[books]]
name = "Book of Minor Magic"
spells = ["Magic Dart"]
value = 150

[[unrands]]
name = "dummy"
full_name = "dummy"
value = 0
"#;

    #[test]
    fn test_parse_snapshot() {
        let source = TomlSource::parse(SNAPSHOT).unwrap();
        assert_eq!(source.version(), "0.32.1");
        assert_eq!(source.spells().len(), 2);

        let dart = &source.spells()[0];
        assert_eq!(dart.range, Some(SpellRange { min: 4, max: 4 }));
        assert_eq!(dart.noise.casting, 1);
        assert!(dart.player_spell);

        let smiting = &source.spells()[1];
        assert!(!smiting.player_spell);
        assert_eq!(smiting.range, None);
        assert!(smiting.schools.is_empty());

        assert_eq!(source.books()[0].spells, vec!["Magic Dart"]);
        assert_eq!(source.unrands()[0].base_type, None);
    }

    #[test]
    fn test_parse_rejects_missing_version() {
        assert!(TomlSource::parse("[[spells]]\nname = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let source = TomlSource::load(file.path()).unwrap();
        assert_eq!(source.books().len(), 1);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = TomlSource::load("/nonexistent/gamedata.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/gamedata.toml"));
    }
}
