use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::HashMap;

/// Branch names pointing at each commit, plus where HEAD sits
struct Decorations {
    head: Head,
    reverse_refs: HashMap<ObjectId, Vec<BranchName>>,
}

impl Repository {
    /// Print the first-parent history from `revision` (HEAD when omitted),
    /// newest first
    pub fn log(&self, revision: Option<&str>, oneline: bool) -> anyhow::Result<()> {
        let start = match revision {
            Some(revision) => Revision::try_parse(revision)?.resolve(self)?,
            None => self.refs().resolve_head()?,
        };

        let decorations = Decorations {
            head: self.refs().head()?,
            reverse_refs: self.refs().reverse_refs()?,
        };

        for (position, entry) in CommitGraph::new(self).history(start).enumerate() {
            let (commit_oid, commit) = entry?;

            if oneline {
                self.show_commit_oneline(&commit_oid, &commit, &decorations)?;
            } else {
                if position > 0 {
                    writeln!(self.writer())?;
                }
                self.show_commit_medium(&commit_oid, &commit, &decorations)?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        decorations: &Decorations,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}{}",
            format!("commit {commit_oid}").yellow(),
            self.commit_decoration(commit_oid, decorations)
        )?;
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        decorations: &Decorations,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}{} {}",
            commit_oid.to_short_oid().yellow(),
            self.commit_decoration(commit_oid, decorations),
            commit.short_message()
        )?;

        Ok(())
    }

    fn commit_decoration(&self, commit_oid: &ObjectId, decorations: &Decorations) -> String {
        let mut names = Vec::new();

        if let Head::Detached(head_oid) = &decorations.head
            && head_oid == commit_oid
        {
            names.push("HEAD".cyan().bold().to_string());
        }

        for branch in decorations.reverse_refs.get(commit_oid).into_iter().flatten() {
            let name = branch.to_string().green().bold();
            if decorations.head.branch() == Some(branch) {
                names.push(format!("{} {}", "HEAD ->".cyan().bold(), name));
            } else {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            String::new()
        } else {
            format!(" ({})", names.join(", "))
        }
    }
}
