//! Orphan directory reconciliation - index, classify, prune.

use colored::*;
use log::info;
use std::path::PathBuf;

use crate::classify::classify;
use crate::confirm::Confirm;
use crate::error::{Result, ensure_dir};
use crate::index::LinkIndex;
use crate::prune::{Pruner, Report};

/// One reconciliation run over a source tree and a destination tree of links
#[derive(Debug, Clone)]
pub struct Reconciler {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub dry_run: bool,
}

impl Reconciler {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            dry_run,
        }
    }

    /// Run all three stages. Both roots are checked before anything is scanned.
    ///
    /// `confirm` is never consulted on a dry run.
    pub fn run(&self, confirm: &mut dyn Confirm) -> Result<Report> {
        ensure_dir(&self.source)?;
        ensure_dir(&self.destination)?;

        println!("{} {}", "Scanning source:".cyan(), self.source.display());
        println!("{} {}", "Scanning destination:".cyan(), self.destination.display());
        info!(
            "Reconciling {} against {} (dry_run: {})",
            self.source.display(),
            self.destination.display(),
            self.dry_run
        );

        let index = LinkIndex::build(&self.destination)?;
        let classified = classify(&self.source, &index)?;
        let report = Pruner::new(self.dry_run).prune(&classified, confirm)?;

        info!(
            "Run complete: {} unused, {} deleted, {} failed",
            report.entries.len(),
            report.deleted(),
            report.failed()
        );
        Ok(report)
    }
}
