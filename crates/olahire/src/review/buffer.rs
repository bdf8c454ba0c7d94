use std::collections::HashMap;

use crate::remote::{ApplicationStatus, JobNumber};
use crate::session::ApplicantId;

/// Identifies one edit: which applicant, at which job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditKey {
    pub applicant_id: ApplicantId,
    pub job_number: JobNumber,
}

/// Staged-but-uncommitted status selections, one slot per row.
///
/// Each key lives its own lifecycle: staging, committing, or discarding one
/// row never touches another. A rejected commit leaves the entry staged so
/// the admin's selection survives for a manual retry.
#[derive(Debug, Default)]
pub struct StatusEditBuffer {
    staged: HashMap<EditKey, ApplicationStatus>,
}

impl StatusEditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert; re-staging the same key overwrites the earlier selection.
    pub fn stage(&mut self, key: EditKey, status: ApplicationStatus) {
        self.staged.insert(key, status);
    }

    /// The staged value for `key`, if any.
    pub fn pending(&self, key: &EditKey) -> Option<ApplicationStatus> {
        self.staged.get(key).copied()
    }

    /// What the control should display: the staged value wins over the row's
    /// committed one, so the selection never reverts mid-edit.
    pub fn effective(
        &self,
        key: &EditKey,
        committed: Option<ApplicationStatus>,
    ) -> Option<ApplicationStatus> {
        self.pending(key).or(committed)
    }

    /// Drop the staged value for `key`. Returns whether anything was staged.
    pub fn discard(&mut self, key: &EditKey) -> bool {
        self.staged.remove(key).is_some()
    }

    /// Remove the entry after a successful commit, handing back the value the
    /// caller must apply to the underlying row.
    pub fn resolve(&mut self, key: &EditKey) -> Option<ApplicationStatus> {
        self.staged.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(applicant: &str, job: &str) -> EditKey {
        EditKey {
            applicant_id: ApplicantId(applicant.to_string()),
            job_number: JobNumber(job.to_string()),
        }
    }

    #[test]
    fn latest_stage_wins() {
        let mut buffer = StatusEditBuffer::new();
        buffer.stage(key("u-1", "J-1"), ApplicationStatus::Received);
        buffer.stage(key("u-1", "J-1"), ApplicationStatus::Reviewed);
        assert_eq!(
            buffer.pending(&key("u-1", "J-1")),
            Some(ApplicationStatus::Reviewed)
        );
    }

    #[test]
    fn keys_are_independent() {
        let mut buffer = StatusEditBuffer::new();
        buffer.stage(key("u-1", "J-1"), ApplicationStatus::Reviewed);
        buffer.stage(key("u-2", "J-1"), ApplicationStatus::Considered);
        buffer.stage(key("u-1", "J-2"), ApplicationStatus::Received);

        assert_eq!(
            buffer.resolve(&key("u-1", "J-1")),
            Some(ApplicationStatus::Reviewed)
        );
        // Same applicant at another job and another applicant at the same
        // job both survive the resolve.
        assert_eq!(
            buffer.pending(&key("u-2", "J-1")),
            Some(ApplicationStatus::Considered)
        );
        assert_eq!(
            buffer.pending(&key("u-1", "J-2")),
            Some(ApplicationStatus::Received)
        );
    }

    #[test]
    fn effective_prefers_staged_over_committed() {
        let mut buffer = StatusEditBuffer::new();
        let k = key("u-1", "J-1");
        assert_eq!(
            buffer.effective(&k, Some(ApplicationStatus::Received)),
            Some(ApplicationStatus::Received)
        );

        buffer.stage(k.clone(), ApplicationStatus::SelectedForInterview);
        assert_eq!(
            buffer.effective(&k, Some(ApplicationStatus::Received)),
            Some(ApplicationStatus::SelectedForInterview)
        );

        buffer.discard(&k);
        assert_eq!(
            buffer.effective(&k, Some(ApplicationStatus::Received)),
            Some(ApplicationStatus::Received)
        );
    }

    #[test]
    fn discard_on_an_empty_slot_is_a_no_op() {
        let mut buffer = StatusEditBuffer::new();
        assert!(!buffer.discard(&key("u-1", "J-1")));
        assert!(buffer.is_empty());
    }
}
