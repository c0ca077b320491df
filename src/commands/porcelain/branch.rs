use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::branch::revision::Revision;
use crate::errors::BitError;
use colored::Colorize;

impl Repository {
    /// Create `branch_name` at `source_revision`, or at HEAD when omitted
    pub fn create_branch(
        &self,
        branch_name: &str,
        source_revision: Option<&str>,
    ) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let source_oid = match source_revision {
            Some(source_revision) => Revision::try_parse(source_revision)?.resolve(self)?,
            None => self.refs().read_head()?.ok_or(BitError::NoCommitsYet)?,
        };

        self.refs().create_branch(&branch_name, &source_oid)?;
        tracing::info!(branch = %branch_name, oid = %source_oid, "created branch");

        Ok(())
    }

    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let oid = self.refs().delete_branch(&branch_name)?;
        tracing::info!(branch = %branch_name, oid = %oid, "deleted branch");

        writeln!(
            self.writer(),
            "Deleted branch {} (was {}).",
            branch_name,
            oid.to_short_oid()
        )?;

        Ok(())
    }

    /// Print every branch, marking the checked-out one
    pub fn list_branches(&self) -> anyhow::Result<()> {
        let head = self.refs().head()?;

        if let Head::Detached(oid) = &head {
            writeln!(
                self.writer(),
                "* {}",
                format!("(HEAD detached at {})", oid.to_short_oid()).green()
            )?;
        }

        for branch in self.refs().list_branches()? {
            if head.branch() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {branch}")?;
            }
        }

        Ok(())
    }
}
