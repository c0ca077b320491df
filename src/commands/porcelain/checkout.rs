use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    twig branch <new-branch-name>
"#;

impl Repository {
    /// Switch the working tree, the index and HEAD to `target`
    ///
    /// An existing branch name yields a symbolic HEAD, `HEAD` keeps the
    /// current one, any other revision detaches HEAD. On a conflict nothing
    /// is modified and `UncommittedChanges` lists every offending path.
    pub fn checkout(&self, target: &str) -> anyhow::Result<Head> {
        let current_head = self.refs().head()?;
        let current_oid = self.refs().read_head()?;

        let target_revision = Revision::try_parse(target)?;
        let target_oid = target_revision.resolve(self)?;
        let new_head = match &target_revision {
            Revision::Head => current_head.clone(),
            _ => match target_revision.as_branch(self)? {
                Some(branch) => Head::Symbolic(branch),
                None => Head::Detached(target_oid.clone()),
            },
        };

        if current_oid.as_ref() != Some(&target_oid) {
            let database = self.database();
            let head_tree = database.load_commit_tree(current_oid.as_ref())?;
            let target_tree = database.load_commit_tree(Some(&target_oid))?;

            let mut index = self.load_index()?;
            let mut migration = Migration::new(self, &head_tree, &target_tree);
            migration.apply_changes(&mut index)?;
        }

        self.refs().set_head(&new_head)?;
        tracing::info!(from = %current_head, to = %new_head, "checked out");

        if let Some(current_oid) = &current_oid {
            self.print_previous_head(&current_head, current_oid, &target_oid)?;
        }
        self.print_detachment_notice(&current_head, &new_head, target)?;
        self.print_new_head(&current_head, &new_head, &target_oid)?;

        Ok(new_head)
    }

    fn print_previous_head(
        &self,
        current_head: &Head,
        current_oid: &ObjectId,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        if current_head.is_detached() && current_oid != target_oid {
            self.print_head_position("Previous HEAD position was", current_oid)?;
        }

        Ok(())
    }

    fn print_detachment_notice(
        &self,
        current_head: &Head,
        new_head: &Head,
        target: &str,
    ) -> anyhow::Result<()> {
        if !current_head.is_detached() && new_head.is_detached() {
            writeln!(
                self.writer(),
                "Note: switching to '{}'.\n{}",
                target,
                DETACHMENT_NOTICE
            )?;
        }

        Ok(())
    }

    fn print_new_head(
        &self,
        current_head: &Head,
        new_head: &Head,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        match new_head {
            Head::Detached(_) => self.print_head_position("HEAD is now at", target_oid)?,
            Head::Symbolic(branch) if new_head == current_head => {
                writeln!(self.writer(), "Already on '{branch}'")?
            }
            Head::Symbolic(branch) => writeln!(self.writer(), "Switched to branch '{branch}'")?,
        }

        Ok(())
    }

    fn print_head_position(&self, message: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self.database().parse_object_as_commit(oid)?;

        writeln!(
            self.writer(),
            "{} {} {}",
            message,
            oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
