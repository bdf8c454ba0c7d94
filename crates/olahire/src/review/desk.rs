use std::sync::Arc;

use tracing::debug;

use super::buffer::{EditKey, StatusEditBuffer};
use crate::config::UiConfig;
use crate::listing::{ListEngine, SortDirection};
use crate::remote::{fields, ApplicantMatch, ApplicationStatus, RemoteCollaborator, RemoteError};

/// Ways a commit can fail.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Commit requested for a row nothing was staged on.
    #[error("no status staged for that row")]
    NothingStaged,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Screen core for the admin's applicant-review view.
///
/// Composes the list engine over the company's match rows with the status
/// edit buffer. The snapshot row is only updated after the backend accepted
/// the write; until then the staged value lives in the buffer alone.
pub struct ReviewDesk<R> {
    remote: Arc<R>,
    engine: ListEngine<ApplicantMatch>,
    edits: StatusEditBuffer,
}

impl<R: RemoteCollaborator> ReviewDesk<R> {
    pub fn new(remote: Arc<R>, ui: &UiConfig) -> Self {
        Self {
            remote,
            engine: ListEngine::new(ui),
            edits: StatusEditBuffer::new(),
        }
    }

    /// Fetch the company's match rows and replace the snapshot, best match
    /// first.
    pub async fn load(&mut self, company: &str, credential: &str) -> Result<(), RemoteError> {
        let rows = self.remote.applicants_for_company(company, credential).await?;
        debug!(company, rows = rows.len(), "loaded applicant matches");
        self.engine.replace_items(rows);
        self.engine
            .set_sort(fields::MATCH_PERCENT, SortDirection::Descending);
        Ok(())
    }

    /// Stage a status selection locally; nothing is sent yet.
    pub fn stage_status(&mut self, key: EditKey, status: ApplicationStatus) {
        self.edits.stage(key, status);
    }

    /// What the status control for `key` should display right now.
    pub fn effective_status(&self, key: &EditKey) -> Option<ApplicationStatus> {
        let committed = self
            .engine
            .items()
            .iter()
            .find(|row| row.applicant_id == key.applicant_id && row.job_number == key.job_number)
            .and_then(|row| row.status);
        self.edits.effective(key, committed)
    }

    pub fn staged_status(&self, key: &EditKey) -> Option<ApplicationStatus> {
        self.edits.pending(key)
    }

    /// Push the staged status for one row to the backend. On success the
    /// staged entry is resolved and the snapshot row updated in the same
    /// step; on failure both are left exactly as they were, so the admin can
    /// retry or discard. Other rows' staged edits are never touched.
    pub async fn commit_status(
        &mut self,
        key: &EditKey,
        credential: &str,
    ) -> Result<(), ReviewError> {
        let staged = self.edits.pending(key).ok_or(ReviewError::NothingStaged)?;
        self.remote
            .put_applicant_status(&key.applicant_id, &key.job_number, staged, credential)
            .await?;
        self.edits.resolve(key);
        self.engine.amend(
            |row| row.applicant_id == key.applicant_id && row.job_number == key.job_number,
            |row| row.status = Some(staged),
        );
        Ok(())
    }

    /// Throw away the staged status for one row.
    pub fn discard_status(&mut self, key: &EditKey) -> bool {
        self.edits.discard(key)
    }

    pub fn list(&self) -> &ListEngine<ApplicantMatch> {
        &self.engine
    }

    /// Mutable access for criteria, sort, paging, and poll.
    pub fn list_mut(&mut self) -> &mut ListEngine<ApplicantMatch> {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{InMemoryRemote, JobNumber};
    use crate::session::ApplicantId;

    fn key(applicant: &str, job: &str) -> EditKey {
        EditKey {
            applicant_id: ApplicantId(applicant.to_string()),
            job_number: JobNumber(job.to_string()),
        }
    }

    async fn loaded_desk() -> (Arc<InMemoryRemote>, ReviewDesk<InMemoryRemote>, String) {
        let remote = Arc::new(InMemoryRemote::seeded());
        let grant = remote
            .admin_login("bill@initech.example", "tps-reports")
            .await
            .expect("admin login");
        let mut desk = ReviewDesk::new(remote.clone(), &UiConfig::default());
        desk.load("Initech", &grant.token).await.expect("load");
        (remote, desk, grant.token)
    }

    #[tokio::test]
    async fn load_sorts_best_match_first_with_stable_ties() {
        let (_, desk, _) = loaded_desk().await;
        let view = desk.list().visible();
        let order: Vec<(&str, f64)> = view
            .items
            .iter()
            .map(|row| (row.applicant_id.0.as_str(), row.match_percent))
            .collect();
        // 0.91 first; the two 0.58 rows keep their fetch order.
        assert_eq!(
            order,
            vec![("u-100", 0.91), ("u-205", 0.58), ("u-310", 0.58)]
        );
    }

    #[tokio::test]
    async fn commit_applies_staged_value_to_the_row() {
        let (remote, mut desk, token) = loaded_desk().await;
        let k = key("u-205", "J-1001");

        desk.stage_status(k.clone(), ApplicationStatus::SelectedForInterview);
        assert_eq!(
            desk.effective_status(&k),
            Some(ApplicationStatus::SelectedForInterview)
        );

        desk.commit_status(&k, &token).await.expect("commit");
        assert_eq!(desk.staged_status(&k), None);
        assert_eq!(
            desk.effective_status(&k),
            Some(ApplicationStatus::SelectedForInterview)
        );
        assert_eq!(remote.recorded_status_puts().len(), 1);
    }

    #[tokio::test]
    async fn failed_commit_keeps_the_staged_value_for_retry() {
        let (remote, mut desk, token) = loaded_desk().await;
        let k = key("u-205", "J-1001");

        desk.stage_status(k.clone(), ApplicationStatus::Reviewed);
        remote.fail_next_status_put();
        let err = desk.commit_status(&k, &token).await.unwrap_err();
        assert!(matches!(err, ReviewError::Remote(RemoteError::Unavailable(_))));

        // Staged entry and snapshot row are both untouched.
        assert_eq!(desk.staged_status(&k), Some(ApplicationStatus::Reviewed));
        let committed = desk
            .list()
            .items()
            .iter()
            .find(|row| row.applicant_id.0 == "u-205")
            .and_then(|row| row.status);
        assert_eq!(committed, None);

        desk.commit_status(&k, &token).await.expect("retry");
        assert_eq!(desk.staged_status(&k), None);
    }

    #[tokio::test]
    async fn committing_one_row_leaves_other_staged_edits_alone() {
        let (_, mut desk, token) = loaded_desk().await;
        let first = key("u-205", "J-1001");
        let second = key("u-310", "J-1003");

        desk.stage_status(first.clone(), ApplicationStatus::Reviewed);
        desk.stage_status(second.clone(), ApplicationStatus::Considered);

        desk.commit_status(&first, &token).await.expect("commit");
        assert_eq!(
            desk.staged_status(&second),
            Some(ApplicationStatus::Considered)
        );
    }

    #[tokio::test]
    async fn commit_without_a_staged_value_is_an_error() {
        let (_, mut desk, token) = loaded_desk().await;
        let err = desk
            .commit_status(&key("u-100", "J-1001"), &token)
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::NothingStaged);
    }

    #[tokio::test]
    async fn discard_reverts_to_the_committed_value() {
        let (_, mut desk, _) = loaded_desk().await;
        let k = key("u-100", "J-1001");
        desk.stage_status(k.clone(), ApplicationStatus::NotSelected);
        assert!(desk.discard_status(&k));
        assert_eq!(desk.effective_status(&k), None);
    }
}
