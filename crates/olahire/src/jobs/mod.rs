//! Screen cores for browsing jobs: the public/applicant job board and the
//! admin's posted-jobs management view.

use std::sync::Arc;

use tracing::debug;

use crate::config::UiConfig;
use crate::listing::ListEngine;
use crate::remote::{
    ApplicantMatch, JobDraft, JobNumber, JobPosting, RemoteCollaborator, RemoteError,
};
use crate::session::ApplicantId;

/// Applicant-facing job list: the full marketplace snapshot behind the
/// debounced filter engine, plus the distinct values the filter dropdowns
/// offer.
pub struct JobBoard<R> {
    remote: Arc<R>,
    engine: ListEngine<JobPosting>,
}

impl<R: RemoteCollaborator> JobBoard<R> {
    pub fn new(remote: Arc<R>, ui: &UiConfig) -> Self {
        Self {
            remote,
            engine: ListEngine::new(ui),
        }
    }

    /// Fetch the open jobs and replace the snapshot.
    pub async fn load(&mut self) -> Result<(), RemoteError> {
        let jobs = self.remote.jobs().await?;
        debug!(jobs = jobs.len(), "loaded job board");
        self.engine.replace_items(jobs);
        Ok(())
    }

    /// Distinct locations in first-seen order, for the location dropdown.
    pub fn locations(&self) -> Vec<&str> {
        distinct(self.engine.items().iter().map(|job| job.location.as_str()))
    }

    /// Distinct companies in first-seen order, for the company dropdown.
    pub fn companies(&self) -> Vec<&str> {
        distinct(self.engine.items().iter().map(|job| job.company.as_str()))
    }

    /// One job's full posting, for the details screen.
    pub async fn job(&self, job_number: &JobNumber) -> Result<JobPosting, RemoteError> {
        self.remote.job(job_number).await
    }

    /// Submit an application for one job on the applicant's behalf, for the
    /// apply-now screen.
    pub async fn apply(
        &self,
        applicant_id: &ApplicantId,
        job_number: &JobNumber,
        credential: &str,
    ) -> Result<ApplicantMatch, RemoteError> {
        self.remote.apply(applicant_id, job_number, credential).await
    }

    /// The applicant's own application rows, for the my-jobs screen.
    pub async fn my_applications(
        &self,
        applicant_id: &ApplicantId,
        credential: &str,
    ) -> Result<Vec<ApplicantMatch>, RemoteError> {
        self.remote.my_applications(applicant_id, credential).await
    }

    pub fn list(&self) -> &ListEngine<JobPosting> {
        &self.engine
    }

    /// Mutable access for criteria, sort, paging, and poll.
    pub fn list_mut(&mut self) -> &mut ListEngine<JobPosting> {
        &mut self.engine
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Admin-facing list of the company's own postings. The title search here is
/// a plain substring filter applied on every keystroke; this list is small
/// and owned, so none of the job board's debounce/page machinery applies.
pub struct PostedJobsDesk<R> {
    remote: Arc<R>,
    jobs: Vec<JobPosting>,
    query: String,
}

impl<R: RemoteCollaborator> PostedJobsDesk<R> {
    pub fn new(remote: Arc<R>) -> Self {
        Self {
            remote,
            jobs: Vec::new(),
            query: String::new(),
        }
    }

    /// Fetch the company's postings and replace the local list.
    pub async fn load(&mut self, company: &str, credential: &str) -> Result<(), RemoteError> {
        self.jobs = self.remote.company_jobs(company, credential).await?;
        Ok(())
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Postings whose title contains the query, case-insensitively. An empty
    /// query shows everything.
    pub fn visible(&self) -> Vec<&JobPosting> {
        let needle = self.query.to_lowercase();
        self.jobs
            .iter()
            .filter(|job| needle.is_empty() || job.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Publish a new posting; on success the returned row joins the local
    /// list.
    pub async fn post(
        &mut self,
        draft: &JobDraft,
        credential: &str,
    ) -> Result<JobPosting, RemoteError> {
        let posting = self.remote.post_job(draft, credential).await?;
        self.jobs.push(posting.clone());
        Ok(posting)
    }

    /// Take a posting down; the local row goes only once the backend agreed.
    pub async fn delete(
        &mut self,
        job_number: &JobNumber,
        credential: &str,
    ) -> Result<(), RemoteError> {
        self.remote.delete_job(job_number, credential).await?;
        self.jobs.retain(|job| &job.job_number != job_number);
        Ok(())
    }
}
