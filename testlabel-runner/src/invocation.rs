//! Validated command-line input.

use std::path::PathBuf;
use testlabel_core::parse_assembly_list;
use thiserror::Error;

/// A required positional argument was not supplied.
///
/// The display text is the exact operator-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingArgument {
    #[error("Error: input RepositoryName is null")]
    RepositoryName,
    #[error("Error: input AssemblyPaths is null")]
    AssemblyPaths,
}

/// One run's input: the repository label and the artifact manifests to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub repository_name: String,
    pub assembly_paths: Vec<PathBuf>,
}

impl Invocation {
    /// Blank values count as missing; the repository name is checked first.
    pub fn new(
        repository_name: Option<String>,
        assembly_paths: Option<String>,
    ) -> Result<Self, MissingArgument> {
        let repository_name = repository_name
            .filter(|r| !r.trim().is_empty())
            .ok_or(MissingArgument::RepositoryName)?;
        let assembly_input = assembly_paths
            .filter(|a| !a.trim().is_empty())
            .ok_or(MissingArgument::AssemblyPaths)?;

        Ok(Self {
            repository_name,
            assembly_paths: parse_assembly_list(&assembly_input),
        })
    }
}
