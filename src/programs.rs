//! The bundled sample programs and a registry over them.
//!
//! Two canonical blueprints ship embedded in the binary: "Increment by one"
//! and "Add two numbers". Both operate on binary numerals written
//! least-significant bit rightmost, with the `start` marker at cell 0 and
//! blanks separating number fields.

use crate::loader::{Blueprint, ProgramLoader};
use crate::types::{ProgramError, Sym};
use std::sync::RwLock;

// Default embedded programs
const PROGRAM_TEXTS: [&str; 2] = [
    include_str!("../programs/increment.json"),
    include_str!("../programs/addition.json"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: RwLock<Vec<Blueprint<Sym>>> = RwLock::new(Vec::new());
}

/// Access to the embedded sample blueprints.
pub struct ProgramManager;

impl ProgramManager {
    /// Parses the embedded blueprints into the registry. Idempotent; the
    /// accessors below call it on demand.
    pub fn load() -> Result<(), ProgramError> {
        let mut blueprints = Vec::new();
        for text in PROGRAM_TEXTS {
            blueprints.push(ProgramLoader::load_blueprint_from_string(text)?);
        }

        let mut guard = PROGRAMS
            .write()
            .map_err(|_| ProgramError::FileError("failed to acquire write lock".to_string()))?;
        *guard = blueprints;

        Ok(())
    }

    /// Number of embedded programs.
    pub fn count() -> usize {
        let _ = Self::load();
        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    pub fn by_index(index: usize) -> Result<Blueprint<Sym>, ProgramError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| ProgramError::FileError("failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                ProgramError::ValidationError(format!("program index {} out of range", index))
            })
    }

    pub fn by_name(name: &str) -> Result<Blueprint<Sym>, ProgramError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| ProgramError::FileError("failed to acquire read lock".to_string()))?
            .iter()
            .find(|blueprint| blueprint.name == name)
            .cloned()
            .ok_or_else(|| ProgramError::ValidationError(format!("program '{}' not found", name)))
    }

    pub fn names() -> Vec<String> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map(|programs| programs.iter().map(|b| b.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Summary of one embedded program.
    pub fn info(index: usize) -> Result<ProgramInfo, ProgramError> {
        let blueprint = Self::by_index(index)?;
        let program = blueprint.program();

        Ok(ProgramInfo {
            index,
            name: blueprint.name.clone(),
            state_count: program.state_count(),
            rule_count: program.rule_count(),
            tape_len: blueprint.tape.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub state_count: usize,
    pub rule_count: usize,
    pub tape_len: usize,
}
