//! Route authorization: a pure predicate over the screen classification and
//! the live session, replacing the origin's implicit wrapper-component
//! redirects with something testable without rendering anything.

use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Every navigable view in the client, mirrored from the origin router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    Signup,
    AdminLogin,
    Jobs,
    JobDetails,
    ApplyNow,
    Profile,
    MyJobs,
    AdminHome,
    PostJob,
    Applicants,
    PostedJobs,
    AdminJobDetails,
    ApplicantProfile,
}

/// Static access-level tag attached to each screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenClass {
    Public,
    ApplicantOnly,
    AdminOnly,
}

impl Screen {
    /// Total, compile-time mapping; there is no registration step and no
    /// screen without a classification.
    pub const fn classification(self) -> ScreenClass {
        match self {
            Screen::Home | Screen::Signup | Screen::AdminLogin => ScreenClass::Public,
            Screen::Jobs
            | Screen::JobDetails
            | Screen::ApplyNow
            | Screen::Profile
            | Screen::MyJobs => ScreenClass::ApplicantOnly,
            Screen::AdminHome
            | Screen::PostJob
            | Screen::Applicants
            | Screen::PostedJobs
            | Screen::AdminJobDetails
            | Screen::ApplicantProfile => ScreenClass::AdminOnly,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Signup => "signup",
            Screen::AdminLogin => "admin_login",
            Screen::Jobs => "jobs",
            Screen::JobDetails => "job_details",
            Screen::ApplyNow => "apply_now",
            Screen::Profile => "profile",
            Screen::MyJobs => "my_jobs",
            Screen::AdminHome => "admin_home",
            Screen::PostJob => "post_job",
            Screen::Applicants => "applicants",
            Screen::PostedJobs => "posted_jobs",
            Screen::AdminJobDetails => "admin_job_details",
            Screen::ApplicantProfile => "applicant_profile",
        }
    }

    pub const ALL: [Screen; 14] = [
        Screen::Home,
        Screen::Signup,
        Screen::AdminLogin,
        Screen::Jobs,
        Screen::JobDetails,
        Screen::ApplyNow,
        Screen::Profile,
        Screen::MyJobs,
        Screen::AdminHome,
        Screen::PostJob,
        Screen::Applicants,
        Screen::PostedJobs,
        Screen::AdminJobDetails,
        Screen::ApplicantProfile,
    ];
}

/// Outcome of an authorization check. A denial is a navigation, never an
/// error, so a denied screen is never partially rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Screen),
}

/// Pure function of `(screen, session)`; callers re-run it on every
/// navigation attempt rather than caching the result, since the session can
/// change without a reload.
pub fn authorize(screen: Screen, session: &Session) -> Decision {
    match screen.classification() {
        ScreenClass::Public => Decision::Allow,
        ScreenClass::ApplicantOnly => {
            if session.is_applicant() {
                Decision::Allow
            } else {
                Decision::Redirect(Screen::Home)
            }
        }
        // An admin screen never falls back to applicant access; the session
        // enum makes a mixed identity unrepresentable.
        ScreenClass::AdminOnly => {
            if session.is_admin() {
                Decision::Allow
            } else {
                Decision::Redirect(Screen::Home)
            }
        }
    }
}
