//! In-memory stand-in for the backend, used by unit and integration tests,
//! the console demo, and the HTTP stub server.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use super::{
    ApplicantMatch, ApplicationStatus, JobDraft, JobNumber, JobPosting, LoginGrant,
    RemoteCollaborator, RemoteError,
};
use crate::profile::{ResumeProfile, SignupForm};
use crate::session::ApplicantId;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    grant: LoginGrant,
    admin: bool,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    live_tokens: Vec<String>,
    jobs: Vec<JobPosting>,
    // (company, row)
    matches: Vec<(String, ApplicantMatch)>,
    profiles: HashMap<ApplicantId, ResumeProfile>,
    status_puts: Vec<(ApplicantId, JobNumber, ApplicationStatus)>,
    fail_next_status_put: bool,
    next_job_number: u32,
}

/// Backend fake with just enough behavior to exercise the client contract:
/// credential checks, conflict/not-found answers, and a switch to make the
/// next status write fail.
#[derive(Default)]
pub struct InMemoryRemote {
    inner: Mutex<Inner>,
}

impl InMemoryRemote {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A small, fixed dataset: one applicant, one Initech admin, three jobs,
    /// and three scored matches.
    pub fn seeded() -> Self {
        let remote = Self::empty();
        {
            let mut inner = remote.inner.lock().expect("remote mutex poisoned");
            inner.next_job_number = 1004;
            inner.accounts.insert(
                "ada@example.com".to_string(),
                Account {
                    password: "hunter22".to_string(),
                    grant: LoginGrant {
                        id: "u-100".to_string(),
                        display_name: "Ada".to_string(),
                        token: "tok-applicant-100".to_string(),
                        company: None,
                    },
                    admin: false,
                },
            );
            inner.accounts.insert(
                "bill@initech.example".to_string(),
                Account {
                    password: "tps-reports".to_string(),
                    grant: LoginGrant {
                        id: "adm-7".to_string(),
                        display_name: "Bill".to_string(),
                        token: "tok-admin-7".to_string(),
                        company: Some("Initech".to_string()),
                    },
                    admin: true,
                },
            );
            inner.jobs = vec![
                job("J-1001", "Software Engineer", "Initech", "Austin, TX", "$90k - $120k",
                    "Build and maintain reporting systems."),
                job("J-1002", "Registered Nurse", "Mercy Health", "Orlando, FL", "$40k",
                    "Provide patient care on the night shift."),
                job("J-1003", "Staff Engineer", "Initech", "Remote", "$150k",
                    "Own the matching pipeline end to end."),
            ];
            inner.matches = vec![
                (
                    "Initech".to_string(),
                    matched("u-100", "J-1001", "Software Engineer", 4, 0.91),
                ),
                (
                    "Initech".to_string(),
                    matched("u-205", "J-1001", "Software Engineer", 7, 0.58),
                ),
                (
                    "Initech".to_string(),
                    matched("u-310", "J-1003", "Staff Engineer", 11, 0.58),
                ),
            ];
        }
        remote
    }

    /// Make the next `put_applicant_status` answer `Unavailable`, then
    /// behave normally again.
    pub fn fail_next_status_put(&self) {
        self.inner
            .lock()
            .expect("remote mutex poisoned")
            .fail_next_status_put = true;
    }

    /// Status writes the backend accepted, in order.
    pub fn recorded_status_puts(&self) -> Vec<(ApplicantId, JobNumber, ApplicationStatus)> {
        self.inner
            .lock()
            .expect("remote mutex poisoned")
            .status_puts
            .clone()
    }

    fn check_credential(inner: &Inner, credential: &str) -> Result<(), RemoteError> {
        if inner.live_tokens.iter().any(|token| token == credential) {
            Ok(())
        } else {
            Err(RemoteError::Unauthorized)
        }
    }
}

fn job(
    number: &str,
    title: &str,
    company: &str,
    location: &str,
    salary: &str,
    description: &str,
) -> JobPosting {
    JobPosting {
        job_number: JobNumber(number.to_string()),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        salary_estimate: salary.to_string(),
        description: description.to_string(),
        posted_on: NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid date"),
    }
}

fn matched(
    applicant: &str,
    job: &str,
    title: &str,
    years: u8,
    percent: f64,
) -> ApplicantMatch {
    ApplicantMatch {
        applicant_id: ApplicantId(applicant.to_string()),
        job_number: JobNumber(job.to_string()),
        job_title: title.to_string(),
        years_of_experience: years,
        match_percent: percent,
        status: None,
    }
}

impl RemoteCollaborator for InMemoryRemote {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        let account = inner
            .accounts
            .get(email)
            .filter(|account| !account.admin && account.password == password)
            .cloned()
            .ok_or(RemoteError::Unauthorized)?;
        inner.live_tokens.push(account.grant.token.clone());
        Ok(account.grant)
    }

    async fn admin_login(&self, email: &str, password: &str) -> Result<LoginGrant, RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        let account = inner
            .accounts
            .get(email)
            .filter(|account| account.admin && account.password == password)
            .cloned()
            .ok_or(RemoteError::Unauthorized)?;
        inner.live_tokens.push(account.grant.token.clone());
        Ok(account.grant)
    }

    async fn signup(&self, form: &SignupForm) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        if inner.accounts.contains_key(&form.email) {
            return Err(RemoteError::Rejected("account already exists".to_string()));
        }
        let id = format!("u-{}", 500 + inner.accounts.len());
        inner.accounts.insert(
            form.email.clone(),
            Account {
                password: form.password.clone(),
                grant: LoginGrant {
                    id: id.clone(),
                    display_name: form.first_name.clone(),
                    token: format!("tok-applicant-{id}"),
                    company: None,
                },
                admin: false,
            },
        );
        Ok(())
    }

    async fn jobs(&self) -> Result<Vec<JobPosting>, RemoteError> {
        Ok(self
            .inner
            .lock()
            .expect("remote mutex poisoned")
            .jobs
            .clone())
    }

    async fn job(&self, job_number: &JobNumber) -> Result<JobPosting, RemoteError> {
        self.inner
            .lock()
            .expect("remote mutex poisoned")
            .jobs
            .iter()
            .find(|job| &job.job_number == job_number)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    async fn company_jobs(
        &self,
        company: &str,
        credential: &str,
    ) -> Result<Vec<JobPosting>, RemoteError> {
        let inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        Ok(inner
            .jobs
            .iter()
            .filter(|job| job.company == company)
            .cloned()
            .collect())
    }

    async fn post_job(
        &self,
        draft: &JobDraft,
        credential: &str,
    ) -> Result<JobPosting, RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        let number = JobNumber(format!("J-{}", inner.next_job_number));
        inner.next_job_number += 1;
        let posting = JobPosting {
            job_number: number,
            title: draft.title.clone(),
            company: draft.company.clone(),
            location: draft.location.clone(),
            salary_estimate: draft.salary_estimate.clone(),
            description: draft.description.clone(),
            posted_on: chrono::Local::now().date_naive(),
        };
        inner.jobs.push(posting.clone());
        Ok(posting)
    }

    async fn delete_job(
        &self,
        job_number: &JobNumber,
        credential: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        let before = inner.jobs.len();
        inner.jobs.retain(|job| &job.job_number != job_number);
        if inner.jobs.len() == before {
            return Err(RemoteError::NotFound);
        }
        Ok(())
    }

    async fn applicants_for_company(
        &self,
        company: &str,
        credential: &str,
    ) -> Result<Vec<ApplicantMatch>, RemoteError> {
        let inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        Ok(inner
            .matches
            .iter()
            .filter(|(owner, _)| owner == company)
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn put_applicant_status(
        &self,
        subject: &ApplicantId,
        context: &JobNumber,
        status: ApplicationStatus,
        credential: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        if inner.fail_next_status_put {
            inner.fail_next_status_put = false;
            return Err(RemoteError::Unavailable("injected failure".to_string()));
        }
        let row = inner
            .matches
            .iter_mut()
            .find(|(_, row)| &row.applicant_id == subject && &row.job_number == context)
            .map(|(_, row)| row)
            .ok_or(RemoteError::NotFound)?;
        row.status = Some(status);
        inner
            .status_puts
            .push((subject.clone(), context.clone(), status));
        Ok(())
    }

    async fn apply(
        &self,
        applicant_id: &ApplicantId,
        job_number: &JobNumber,
        credential: &str,
    ) -> Result<ApplicantMatch, RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        if inner
            .matches
            .iter()
            .any(|(_, row)| &row.applicant_id == applicant_id && &row.job_number == job_number)
        {
            return Err(RemoteError::Rejected(
                "already applied to this job".to_string(),
            ));
        }
        let job = inner
            .jobs
            .iter()
            .find(|job| &job.job_number == job_number)
            .cloned()
            .ok_or(RemoteError::NotFound)?;
        // Scoring belongs to the real backend; the fake pins a mid-band score.
        let row = ApplicantMatch {
            applicant_id: applicant_id.clone(),
            job_number: job.job_number,
            job_title: job.title,
            years_of_experience: 0,
            match_percent: 0.5,
            status: None,
        };
        inner.matches.push((job.company, row.clone()));
        Ok(row)
    }

    async fn my_applications(
        &self,
        applicant_id: &ApplicantId,
        credential: &str,
    ) -> Result<Vec<ApplicantMatch>, RemoteError> {
        let inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        Ok(inner
            .matches
            .iter()
            .filter(|(_, row)| &row.applicant_id == applicant_id)
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn fetch_profile(
        &self,
        applicant_id: &ApplicantId,
        credential: &str,
    ) -> Result<ResumeProfile, RemoteError> {
        let inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        inner
            .profiles
            .get(applicant_id)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    async fn save_profile(
        &self,
        profile: &ResumeProfile,
        credential: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        inner
            .profiles
            .insert(profile.applicant_id.clone(), profile.clone());
        Ok(())
    }

    async fn delete_profile(
        &self,
        applicant_id: &ApplicantId,
        credential: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().expect("remote mutex poisoned");
        Self::check_credential(&inner, credential)?;
        inner
            .profiles
            .remove(applicant_id)
            .map(|_| ())
            .ok_or(RemoteError::NotFound)
    }
}
