use crate::areas::workspace::WorkspaceEntry;
use crate::artifacts::database::database_entry::DatabaseEntry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug)]
pub struct ConflictMessage {
    pub header: &'static str,
    pub footer: Option<&'static str>,
}

impl From<&ConflictType> for ConflictMessage {
    fn from(value: &ConflictType) -> Self {
        match value {
            ConflictType::StaleFile => Self {
                header: "Your local changes to the following files would be overwritten by checkout:",
                footer: Some("Please commit your changes or stash them before you switch branches."),
            },
            ConflictType::StaleDirectory => Self {
                header: "Updating the following directories would lose untracked files in them:",
                footer: None,
            },
            ConflictType::UntrackedOverwritten => Self {
                header: "The following untracked working tree files would be overwritten by checkout:",
                footer: Some("Please move or remove them before you switch branches."),
            },
            ConflictType::UntrackedRemoved => Self {
                header: "The following untracked working tree files would be removed by checkout:",
                footer: Some("Please move or remove them before you switch branches."),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConflictType {
    StaleFile,
    StaleDirectory,
    UntrackedOverwritten,
    UntrackedRemoved,
}

impl ConflictType {
    /// Classify a conflict at a path from what the index, the working tree
    /// and the target hold there
    pub fn get_conflict_type(
        working: &WorkspaceEntry,
        staged: Option<&DatabaseEntry>,
        target: Option<&DatabaseEntry>,
    ) -> ConflictType {
        if staged.is_some() {
            ConflictType::StaleFile
        } else if matches!(working, WorkspaceEntry::Directory) {
            ConflictType::StaleDirectory
        } else if target.is_some() {
            ConflictType::UntrackedOverwritten
        } else {
            ConflictType::UntrackedRemoved
        }
    }
}

/// Every path a checkout refused to touch, grouped by reason
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conflicts {
    conflicts: BTreeMap<ConflictType, BTreeSet<PathBuf>>,
}

impl Conflicts {
    pub fn add(&mut self, conflict_type: ConflictType, path: PathBuf) {
        self.conflicts.entry(conflict_type).or_default().insert(path);
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.values().all(BTreeSet::is_empty)
    }

    /// All conflicting paths, sorted and without duplicates
    pub fn paths(&self) -> Vec<PathBuf> {
        self.conflicts
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn of_type(&self, conflict_type: ConflictType) -> impl Iterator<Item = &PathBuf> {
        self.conflicts.get(&conflict_type).into_iter().flatten()
    }
}

impl std::fmt::Display for Conflicts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (conflict_type, paths) in &self.conflicts {
            if paths.is_empty() {
                continue;
            }

            let ConflictMessage { header, footer } = conflict_type.into();
            writeln!(f, "{header}")?;
            for path in paths {
                writeln!(f, "\t{}", path.display())?;
            }
            if let Some(footer) = footer {
                writeln!(f, "{footer}")?;
            }
        }

        write!(f, "Aborting")
    }
}
