//! Loading program blueprints from JSON files, strings, and directories.
//!
//! A blueprint is the crate's only external data format: the program table
//! plus a sample initial configuration, serialized as structured JSON. The
//! engine itself never reads files; callers (and the embedded fixtures in
//! [`programs`](crate::programs)) go through this module.

use crate::machine::Machine;
use crate::program::Program;
use crate::tape::Tape;
use crate::types::{ProgramError, Rule, Symbol};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A program table bundled with the initial configuration it was written
/// for: blank symbol, tape contents, head position, and state index.
///
/// The configuration is a convenience default. The engine still takes tape,
/// head, and state as explicit arguments, so callers are free to run the
/// same table on other inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct Blueprint<S> {
    pub name: String,
    pub blank: S,
    #[serde(default)]
    pub tape: Vec<S>,
    #[serde(default)]
    pub head: usize,
    #[serde(default)]
    pub state: usize,
    pub table: Vec<Vec<Rule<S>>>,
}

impl<S: Symbol> Blueprint<S> {
    /// The program table, detached from the sample configuration.
    pub fn program(&self) -> Program<S> {
        Program::new(self.name.clone(), self.table.clone())
    }

    /// A fresh tape holding the sample contents.
    pub fn initial_tape(&self) -> Tape<S> {
        Tape::new(self.tape.clone(), self.blank.clone())
    }

    /// A machine ready to run the blueprint's sample configuration.
    pub fn machine(&self) -> Machine<S> {
        Machine::new(self.program(), self.initial_tape(), self.head, self.state)
    }
}

/// Utility for reading blueprints off disk.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single blueprint from a JSON file.
    ///
    /// # Errors
    ///
    /// * [`ProgramError::FileError`] if the file cannot be read.
    /// * [`ProgramError::ParseError`] if the content is not a valid
    ///   blueprint document.
    pub fn load_blueprint<S>(path: &Path) -> Result<Blueprint<S>, ProgramError>
    where
        S: Symbol + DeserializeOwned,
    {
        let content = fs::read_to_string(path).map_err(|e| {
            ProgramError::FileError(format!("failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_blueprint_from_string(&content)
    }

    /// Parses a blueprint from in-memory JSON, e.g. user input.
    pub fn load_blueprint_from_string<S>(content: &str) -> Result<Blueprint<S>, ProgramError>
    where
        S: Symbol + DeserializeOwned,
    {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads every `.json` blueprint in `directory`. Subdirectories and
    /// files with other extensions are skipped; each file yields its own
    /// `Result` so one bad program does not hide the rest.
    pub fn load_blueprints<S>(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, Blueprint<S>), ProgramError>>
    where
        S: Symbol + DeserializeOwned,
    {
        if !directory.exists() {
            return vec![Err(ProgramError::FileError(format!(
                "directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(ProgramError::FileError(format!(
                    "failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(ProgramError::FileError(format!(
                            "failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load_blueprint(&path) {
                    Ok(blueprint) => Some(Ok((path, blueprint))),
                    Err(e) => Some(Err(ProgramError::FileError(format!(
                        "failed to load program from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
