//! Resume profile model and local form validation.
//!
//! The origin stored work history as numerically-suffixed field names
//! (`company1..company3`), branching per index in every screen. Here it is a
//! bounded ordered sequence instead; the cap of three entries is kept as the
//! documented product limit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::session::ApplicantId;

/// Most experience entries the marketplace accepts per resume.
pub const MAX_EXPERIENCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub highest_degree: String,
    pub field_of_study: String,
    pub started: NaiveDate,
    pub finished: Option<NaiveDate>,
}

/// One work-history entry. `finished = None` renders as "Present".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub started: NaiveDate,
    pub finished: Option<NaiveDate>,
    pub responsibilities: String,
}

/// The applicant's resume as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub applicant_id: ApplicantId,
    pub display_name: String,
    pub contact: ContactInfo,
    pub education: Education,
    pub experiences: Vec<Experience>,
    pub skills: String,
}

impl ResumeProfile {
    /// Local validation run before any save call leaves the client.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.experiences.len() > MAX_EXPERIENCES {
            return Err(ValidationError::TooManyExperiences {
                count: self.experiences.len(),
            });
        }
        for (index, experience) in self.experiences.iter().enumerate() {
            if let Some(finished) = experience.finished {
                if finished < experience.started {
                    return Err(ValidationError::EndsBeforeStart { index });
                }
            }
        }
        if let Some(finished) = self.education.finished {
            if finished < self.education.started {
                return Err(ValidationError::EducationEndsBeforeStart);
            }
        }
        Ok(())
    }
}

/// New-account form; mirrors the origin signup fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl SignupForm {
    /// Inline, non-fatal validation; surfaced next to the form, never raised.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::RequiredField { field });
            }
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("{field} is required")]
    RequiredField { field: &'static str },
    #[error("a resume holds at most {MAX_EXPERIENCES} experiences, got {count}")]
    TooManyExperiences { count: usize },
    #[error("experience #{index} ends before it starts")]
    EndsBeforeStart { index: usize },
    #[error("education ends before it starts")]
    EducationEndsBeforeStart,
}
