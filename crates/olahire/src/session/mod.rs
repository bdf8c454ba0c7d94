//! Single source of truth for "who is acting".
//!
//! The origin client kept both identities in one shared key-value space, so a
//! stale admin token could leak into an applicant's guard check (and vice
//! versa). Here the whole identity is one enum value: establishing either
//! authenticated variant structurally erases every field of the other.

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for applicant accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for company administrator accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminId(pub String);

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The currently authenticated identity. Exactly one variant is ever live.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Applicant {
        applicant_id: ApplicantId,
        display_name: String,
        token: String,
    },
    Admin {
        admin_id: AdminId,
        company: String,
        display_name: String,
        token: String,
    },
}

impl Session {
    /// Bearer token of the active identity, if any.
    pub fn credential(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Applicant { token, .. } | Session::Admin { token, .. } => Some(token),
        }
    }

    pub fn is_applicant(&self) -> bool {
        matches!(self, Session::Applicant { .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin { .. })
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Applicant { display_name, .. } | Session::Admin { display_name, .. } => {
                Some(display_name)
            }
        }
    }

    /// Company of an admin session.
    pub fn company(&self) -> Option<&str> {
        match self {
            Session::Admin { company, .. } => Some(company),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SessionError> {
        match self {
            // An explicit login never yields an anonymous identity; use `clear` for that.
            Session::Anonymous => Err(SessionError::InvalidVariant {
                missing: "authenticated variant",
            }),
            Session::Applicant {
                applicant_id,
                token,
                ..
            } => {
                if applicant_id.0.trim().is_empty() {
                    return Err(SessionError::InvalidVariant {
                        missing: "applicant_id",
                    });
                }
                if token.trim().is_empty() {
                    return Err(SessionError::InvalidVariant { missing: "token" });
                }
                Ok(())
            }
            Session::Admin {
                admin_id,
                company,
                token,
                ..
            } => {
                if admin_id.0.trim().is_empty() {
                    return Err(SessionError::InvalidVariant { missing: "admin_id" });
                }
                if company.trim().is_empty() {
                    return Err(SessionError::InvalidVariant { missing: "company" });
                }
                if token.trim().is_empty() {
                    return Err(SessionError::InvalidVariant { missing: "token" });
                }
                Ok(())
            }
        }
    }
}

/// Error raised when a login response cannot back a coherent session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("login response missing required field: {missing}")]
    InvalidVariant { missing: &'static str },
}

type Listener = Box<dyn Fn(&Session) + Send + Sync>;

/// Holds the one live [`Session`] and pushes every change to subscribers
/// synchronously, so a navigation check in the same tick sees the new
/// identity.
pub struct SessionStore {
    current: Mutex<Session>,
    listeners: Mutex<Vec<Listener>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Session::Anonymous),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Atomically replace the whole session with a validated authenticated
    /// variant. Subscribers observe the new identity before this returns.
    pub fn establish(&self, session: Session) -> Result<(), SessionError> {
        session.validate()?;
        {
            let mut guard = self.current.lock().expect("session mutex poisoned");
            *guard = session.clone();
        }
        self.notify(&session);
        Ok(())
    }

    /// Reset to anonymous. Unconditional and idempotent.
    pub fn clear(&self) {
        let session = {
            let mut guard = self.current.lock().expect("session mutex poisoned");
            *guard = Session::Anonymous;
            guard.clone()
        };
        self.notify(&session);
    }

    /// Snapshot of the active identity.
    pub fn current(&self) -> Session {
        self.current.lock().expect("session mutex poisoned").clone()
    }

    /// Bearer token of the active identity, if any.
    pub fn credential(&self) -> Option<String> {
        self.current
            .lock()
            .expect("session mutex poisoned")
            .credential()
            .map(str::to_owned)
    }

    /// Register a synchronous observer invoked on every mutation.
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .expect("listener mutex poisoned")
            .push(Box::new(listener));
    }

    fn notify(&self, session: &Session) {
        let listeners = self.listeners.lock().expect("listener mutex poisoned");
        for listener in listeners.iter() {
            listener(session);
        }
    }
}
