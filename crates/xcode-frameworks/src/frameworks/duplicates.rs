//! Detecting and removing frameworks linked more than once
//!
//! Occurrences are counted by framework name across the Frameworks phase of
//! every native target, so a framework linked by two targets counts twice.

use super::framework_name;
use crate::pbxproj::{ObjectId, PbxProj};
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// A framework name linked more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub name: String,
    pub count: usize,
}

/// Which entry of a duplicate group survives [`fix_duplicates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    KeepFirst,
    KeepLast,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::KeepFirst => "keep-first",
            Strategy::KeepLast => "keep-last",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep-first" => Ok(Strategy::KeepFirst),
            "keep-last" => Ok(Strategy::KeepLast),
            other => Err(Error::InvalidStrategy(other.to_string())),
        }
    }
}

/// Outcome for one duplicated framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixEntry {
    pub name: String,
    /// Occurrences before fixing
    pub occurrences: usize,
    /// Frameworks-phase entries removed
    pub removed: usize,
}

/// Result of [`fix_duplicates`], sorted by framework name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixReport {
    pub entries: Vec<FixEntry>,
}

impl FixReport {
    /// True when nothing was duplicated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn removed_total(&self) -> usize {
        self.entries.iter().map(|e| e.removed).sum()
    }
}

/// Frameworks-phase build files grouped by framework name, each group in
/// target order.
fn occurrences(proj: &PbxProj) -> BTreeMap<String, Vec<ObjectId>> {
    let mut groups: BTreeMap<String, Vec<ObjectId>> = BTreeMap::new();
    for target in proj.native_targets() {
        let Some(phase) = proj.frameworks_build_phase(&target) else {
            continue;
        };
        for file in proj.phase_files(&phase) {
            if let Some(path) = proj.build_file_path(&file) {
                groups.entry(framework_name(path).to_string()).or_default().push(file);
            }
        }
    }
    groups
}

/// Framework names linked more than once, sorted by name.
pub fn find_duplicates(proj: &PbxProj) -> Vec<Duplicate> {
    occurrences(proj)
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(name, files)| Duplicate {
            name,
            count: files.len(),
        })
        .collect()
}

/// Remove duplicate framework links, keeping one entry per name.
///
/// The retained entry is chosen by `strategy` among the occurrences in
/// target order; every other entry is dropped from all targets' Frameworks
/// phases. Build files no longer listed in any phase are deleted.
pub fn fix_duplicates(proj: &mut PbxProj, strategy: Strategy) -> FixReport {
    let phases: Vec<ObjectId> = proj
        .native_targets()
        .iter()
        .filter_map(|t| proj.frameworks_build_phase(t))
        .collect();

    let mut report = FixReport::default();
    for (name, files) in occurrences(proj) {
        if files.len() < 2 {
            continue;
        }
        debug!("Fixing duplicates for {}...", name);

        let keep = match strategy {
            Strategy::KeepFirst => files.first(),
            Strategy::KeepLast => files.last(),
        }
        .cloned();
        let discard: BTreeSet<ObjectId> = files
            .iter()
            .filter(|f| Some(*f) != keep.as_ref())
            .cloned()
            .collect();

        // The kept build file survives once even if it was listed repeatedly
        let mut kept = false;
        let mut removed = 0;
        for phase in &phases {
            removed += proj.retain_phase_files(phase, |file| {
                if Some(file) == keep.as_ref() {
                    !std::mem::replace(&mut kept, true)
                } else {
                    !discard.contains(file)
                }
            });
        }

        for file in &discard {
            if !proj.is_in_any_phase(file) {
                proj.remove_object(file);
            }
        }

        info!(
            "Fixed duplicates for {}: removed {} of {} ({})",
            name,
            removed,
            files.len(),
            strategy
        );
        report.entries.push(FixEntry {
            name,
            occurrences: files.len(),
            removed,
        });
    }
    report
}
