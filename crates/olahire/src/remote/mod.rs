//! The backend contract: wire types, the collaborator trait every screen
//! core is generic over, and the error taxonomy the rest of the client maps
//! UI states from. Transport is somebody else's problem; an in-memory fake
//! lives in [`memory`] for tests and the console demo.

mod memory;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::listing::{numeric_key, ListRecord};
use crate::profile::{ResumeProfile, SignupForm};
use crate::session::{AdminId, ApplicantId, Session};

pub use memory::InMemoryRemote;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobNumber(pub String);

impl fmt::Display for JobNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field names the list engine filters and sorts on.
pub mod fields {
    pub const LOCATION: &str = "location";
    pub const COMPANY: &str = "company";
    pub const SALARY: &str = "salary";
    pub const STATUS: &str = "status";
    pub const YEARS_OF_EXPERIENCE: &str = "years_of_experience";
    pub const MATCH_PERCENT: &str = "match_percent";
}

/// A job as the marketplace advertises it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_number: JobNumber,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_estimate: String,
    pub description: String,
    pub posted_on: NaiveDate,
}

impl ListRecord for JobPosting {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.title, &self.company, &self.description]
    }

    fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            fields::LOCATION => Some(&self.location),
            fields::COMPANY => Some(&self.company),
            _ => None,
        }
    }

    fn numeric(&self, field: &str) -> i64 {
        match field {
            fields::SALARY => numeric_key(&self.salary_estimate),
            _ => 0,
        }
    }

    fn sort_key(&self, field: &str) -> f64 {
        match field {
            fields::SALARY => numeric_key(&self.salary_estimate) as f64,
            _ => 0.0,
        }
    }
}

/// Review status an admin assigns to one applicant's run at one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Received,
    Reviewed,
    Considered,
    NotSelected,
    SelectedForInterview,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Received => "received",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Considered => "considered",
            ApplicationStatus::NotSelected => "not selected",
            ApplicationStatus::SelectedForInterview => "selected for interview",
        }
    }
}

/// One applicant-to-job match row as the scoring backend reports it.
/// `match_percent` is an opaque relevance value in `[0, 1]`; `status: None`
/// means no admin has touched the row yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantMatch {
    pub applicant_id: ApplicantId,
    pub job_number: JobNumber,
    pub job_title: String,
    pub years_of_experience: u8,
    pub match_percent: f64,
    pub status: Option<ApplicationStatus>,
}

impl ListRecord for ApplicantMatch {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.job_title, &self.applicant_id.0]
    }

    fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            fields::STATUS => self.status.map(ApplicationStatus::label),
            _ => None,
        }
    }

    fn numeric(&self, field: &str) -> i64 {
        match field {
            fields::YEARS_OF_EXPERIENCE => i64::from(self.years_of_experience),
            _ => 0,
        }
    }

    fn sort_key(&self, field: &str) -> f64 {
        match field {
            fields::MATCH_PERCENT => self.match_percent,
            _ => 0.0,
        }
    }
}

/// What a successful login returns. Admin grants carry the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    pub id: String,
    pub display_name: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl LoginGrant {
    /// Build the applicant identity this grant backs. Field-level validation
    /// happens in [`crate::session::SessionStore::establish`].
    pub fn applicant_session(self) -> Session {
        Session::Applicant {
            applicant_id: ApplicantId(self.id),
            display_name: self.display_name,
            token: self.token,
        }
    }

    /// Build the admin identity this grant backs. A grant without a company
    /// yields a session `establish` will reject.
    pub fn admin_session(self) -> Session {
        Session::Admin {
            admin_id: AdminId(self.id),
            company: self.company.unwrap_or_default(),
            display_name: self.display_name,
            token: self.token,
        }
    }
}

/// Fields an admin submits when posting a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_estimate: String,
    pub description: String,
}

/// How the backend can fail, from the client's point of view.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RemoteError {
    /// 401-class: the credential is no longer good. The caller must clear
    /// the session and re-run the access guard.
    #[error("credential rejected")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    /// 4xx-class rejection of an otherwise well-formed request.
    #[error("request rejected: {0}")]
    Rejected(String),
    /// Network trouble or 5xx; retryable, nothing local is discarded.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// The logical request/response contract with the backend. Bearer
/// credentials are passed explicitly so the session store stays the single
/// place that knows who is acting.
#[allow(async_fn_in_trait)]
pub trait RemoteCollaborator {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, RemoteError>;
    async fn admin_login(&self, email: &str, password: &str) -> Result<LoginGrant, RemoteError>;
    async fn signup(&self, form: &SignupForm) -> Result<(), RemoteError>;

    async fn jobs(&self) -> Result<Vec<JobPosting>, RemoteError>;
    async fn job(&self, job_number: &JobNumber) -> Result<JobPosting, RemoteError>;
    async fn company_jobs(
        &self,
        company: &str,
        credential: &str,
    ) -> Result<Vec<JobPosting>, RemoteError>;
    async fn post_job(&self, draft: &JobDraft, credential: &str)
        -> Result<JobPosting, RemoteError>;
    async fn delete_job(&self, job_number: &JobNumber, credential: &str)
        -> Result<(), RemoteError>;

    async fn applicants_for_company(
        &self,
        company: &str,
        credential: &str,
    ) -> Result<Vec<ApplicantMatch>, RemoteError>;
    async fn put_applicant_status(
        &self,
        subject: &ApplicantId,
        context: &JobNumber,
        status: ApplicationStatus,
        credential: &str,
    ) -> Result<(), RemoteError>;
    /// Submit an application for a job. The scoring backend owns the
    /// resulting `match_percent`; the created row is returned as it will
    /// appear in `my_applications` and `applicants_for_company`.
    async fn apply(
        &self,
        applicant_id: &ApplicantId,
        job_number: &JobNumber,
        credential: &str,
    ) -> Result<ApplicantMatch, RemoteError>;
    async fn my_applications(
        &self,
        applicant_id: &ApplicantId,
        credential: &str,
    ) -> Result<Vec<ApplicantMatch>, RemoteError>;

    async fn fetch_profile(
        &self,
        applicant_id: &ApplicantId,
        credential: &str,
    ) -> Result<ResumeProfile, RemoteError>;
    async fn save_profile(
        &self,
        profile: &ResumeProfile,
        credential: &str,
    ) -> Result<(), RemoteError>;
    async fn delete_profile(
        &self,
        applicant_id: &ApplicantId,
        credential: &str,
    ) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_form_is_snake_case_and_labels_are_spaced() {
        let wire = serde_json::to_string(&ApplicationStatus::SelectedForInterview)
            .expect("serializes");
        assert_eq!(wire, "\"selected_for_interview\"");
        let parsed: ApplicationStatus =
            serde_json::from_str("\"not_selected\"").expect("deserializes");
        assert_eq!(parsed, ApplicationStatus::NotSelected);
        assert_eq!(parsed.label(), "not selected");
    }

    #[test]
    fn admin_grant_without_a_company_cannot_back_a_session() {
        let grant = LoginGrant {
            id: "adm-9".to_string(),
            display_name: "Pat".to_string(),
            token: "tok".to_string(),
            company: None,
        };
        let session = grant.admin_session();
        let store = crate::session::SessionStore::new();
        assert!(store.establish(session).is_err());
    }

    #[test]
    fn grant_company_is_omitted_from_the_wire_when_absent() {
        let grant = LoginGrant {
            id: "u-1".to_string(),
            display_name: "Ada".to_string(),
            token: "tok".to_string(),
            company: None,
        };
        let wire = serde_json::to_value(&grant).expect("serializes");
        assert!(wire.get("company").is_none());
    }
}
