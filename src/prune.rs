//! Pruner - deletes directories the classifier judged unused.
//!
//! Runs strictly after classification has finished, so no walk ever observes its own
//! deletions. A failure inside one directory is reported and the run moves on.

use colored::*;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::classify::Classified;
use crate::confirm::Confirm;
use crate::error::Result;

/// What happened to one unused directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    /// Dry run: reported only
    Reported,
    Deleted,
    /// Confirmation was refused
    Declined,
    /// An ancestor deleted earlier in the same run took it along
    RemovedWithParent,
    /// Deletion hit an OS error; the detail is the error text
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub outcome: PruneOutcome,
}

/// Per-run summary of the unused directories and what was done with each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<PruneEntry>,
}

impl Report {
    /// Relative paths of every directory judged unused
    pub fn unused(&self) -> Vec<&Path> {
        self.entries.iter().map(|e| e.relative.as_path()).collect()
    }

    pub fn count(&self, matches: impl Fn(&PruneOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| matches(&e.outcome)).count()
    }

    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, PruneOutcome::Deleted | PruneOutcome::RemovedWithParent))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, PruneOutcome::Failed(_)))
    }

    pub fn outcome_of(&self, relative: impl AsRef<Path>) -> Option<&PruneOutcome> {
        self.entries
            .iter()
            .find(|e| e.relative == relative.as_ref())
            .map(|e| &e.outcome)
    }
}

pub struct Pruner {
    dry_run: bool,
}

impl Pruner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Process every unused directory in `classified`, in order.
    ///
    /// Only a failure to obtain confirmation aborts the run; deletion errors are
    /// recorded per directory.
    pub fn prune(&self, classified: &[Classified], confirm: &mut dyn Confirm) -> Result<Report> {
        let in_use: Vec<&Path> = classified
            .iter()
            .filter(|c| c.verdict.in_use())
            .map(|c| c.dir.path.as_path())
            .collect();
        let mut removed: Vec<PathBuf> = Vec::new();
        let mut report = Report::default();

        for item in classified.iter().filter(|c| !c.verdict.in_use()) {
            let dir = &item.dir;
            let name = dir.relative.display().to_string();
            println!("Directory {} is not used!", name.as_str().yellow());

            let outcome = if self.dry_run {
                PruneOutcome::Reported
            } else if removed.iter().any(|r| dir.path.starts_with(r)) {
                println!("Directory {} removed with parent", name);
                PruneOutcome::RemovedWithParent
            } else if confirm.confirm(&dir.relative)? {
                match self.delete_contents(&dir.path, &in_use, &mut removed) {
                    Ok(()) => {
                        info!("Deleted unused directory {}", dir.path.display());
                        println!("Directory {} {}", name, "deleted!".green());
                        PruneOutcome::Deleted
                    }
                    Err(e) => {
                        warn!("Failed to delete {}: {}", dir.path.display(), e);
                        println!("Directory {} {}", name, "error during deletion!".red());
                        println!("  {}", e);
                        PruneOutcome::Failed(e.to_string())
                    }
                }
            } else {
                println!("Directory {} not deleted!", name);
                PruneOutcome::Declined
            };

            report.entries.push(PruneEntry {
                path: dir.path.clone(),
                relative: dir.relative.clone(),
                outcome,
            });
        }

        Ok(report)
    }

    /// Remove the files directly in `dir`, then its subdirectory trees.
    ///
    /// `dir` itself stays in place, emptied. Subtrees holding an in-use directory are
    /// left alone.
    fn delete_contents(&self, dir: &Path, in_use: &[&Path], removed: &mut Vec<PathBuf>) -> io::Result<()> {
        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                subdirs.push(entry.path());
            } else {
                files.push(entry.path());
            }
        }

        for file in &files {
            fs::remove_file(file)?;
        }

        for sub in subdirs {
            if in_use.iter().any(|p| p.starts_with(&sub)) {
                continue;
            }
            fs::remove_dir_all(&sub)?;
            removed.push(sub);
        }
        Ok(())
    }
}
