use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, HEAD_REF_NAME, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::BitError;
use anyhow::Context;

/// A revision specification identifying a commit.
///
/// Supports multiple formats:
/// - `HEAD` and its alias `@`
/// - Branch names: `main`, `feature/new-feature`
/// - Full or abbreviated (4+ hex characters) object IDs, tried when no
///   branch with that name exists
/// - Parent notation: `<revision>^` (e.g., `main^`, `HEAD^`, `abc123^`)
/// - Ancestor notation: `<revision>~<n>` (e.g., `main~3`, `HEAD~5`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    /// A branch name, or possibly an object ID (decided at resolution)
    Ref(BranchName),
    /// The Nth first-parent ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            if resolved_name == HEAD_REF_NAME {
                return Ok(Revision::Head);
            }

            let branch_name = BranchName::try_parse(resolved_name.to_string())
                .map_err(|_| BitError::RefNotFound(revision.to_string()))?;
            Ok(Revision::Ref(branch_name))
        }
    }

    /// Resolve to a commit ID
    ///
    /// Branches win over object IDs. Fails with `RefNotFound`,
    /// `AmbiguousObjectId`, `UnexpectedObjectType` or, for `HEAD` on an
    /// unborn branch, `UnbornBranch`.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository.refs().resolve_head(),
            Revision::Ref(branch_name) => {
                if let Some(oid) = repository.refs().read_branch(branch_name)? {
                    return Ok(oid);
                }

                let name = branch_name.as_ref();
                if !ObjectId::is_hex_prefix(name) {
                    return Err(BitError::RefNotFound(name.to_string()).into());
                }

                let oid = resolve_object_id(name, repository)?;
                let object_type = repository.database().get_object_type(&oid)?;
                if object_type != ObjectType::Commit {
                    return Err(BitError::UnexpectedObjectType {
                        oid,
                        expected: ObjectType::Commit,
                        actual: object_type,
                    }
                    .into());
                }

                Ok(oid)
            }
            Revision::Parent(base_revision) => {
                let oid = base_revision.resolve(repository)?;
                self.commit_parent(&oid, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = self.commit_parent(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn commit_parent(&self, oid: &ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        let commit = repository.database().parse_object_as_commit(oid)?;

        commit
            .parent()
            .cloned()
            .ok_or_else(|| BitError::RefNotFound(self.to_string()).into())
    }

    /// The branch this revision names, if it is a plain existing branch
    pub fn as_branch(&self, repository: &Repository) -> anyhow::Result<Option<BranchName>> {
        match self {
            Revision::Ref(name) if repository.refs().branch_exists(name) => Ok(Some(name.clone())),
            _ => Ok(None),
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Head => write!(f, "{HEAD_REF_NAME}"),
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}

/// Resolve a full or abbreviated object ID of any kind
///
/// When several objects share the prefix and exactly one of them is a
/// commit, the commit wins. Fails with `RefNotFound` or `AmbiguousObjectId`.
pub fn resolve_object_id(prefix: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
    let database = repository.database();
    let matches = database.find_objects_by_prefix(prefix)?;

    match matches.as_slice() {
        [] => Err(BitError::RefNotFound(prefix.to_string()).into()),
        [oid] => Ok(oid.clone()),
        _ => {
            let commits = matches
                .iter()
                .filter(|oid| {
                    database
                        .get_object_type(oid)
                        .is_ok_and(|object_type| object_type == ObjectType::Commit)
                })
                .collect::<Vec<_>>();

            match commits.as_slice() {
                [oid] => Ok((*oid).clone()),
                _ => Err(BitError::AmbiguousObjectId {
                    prefix: prefix.to_string(),
                    candidates: matches,
                }
                .into()),
            }
        }
    }
}

/// Resolve a name that may denote any object: an object ID first, then a
/// revision
pub fn resolve_object(name: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
    if ObjectId::is_hex_prefix(name) {
        match resolve_object_id(name, repository) {
            Ok(oid) => return Ok(oid),
            Err(error) if !matches!(error.downcast_ref(), Some(BitError::RefNotFound(_))) => {
                return Err(error);
            }
            Err(_) => {}
        }
    }

    Revision::try_parse(name)?.resolve(repository)
}
