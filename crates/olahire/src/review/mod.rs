//! Admin-side review of applicant matches: the per-row status edit buffer
//! and the screen core that ties it to the list engine and the backend.

mod buffer;
mod desk;

pub use buffer::{EditKey, StatusEditBuffer};
pub use desk::{ReviewDesk, ReviewError};

/// How a match score reads to a human. Both sides of the marketplace render
/// the same bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBand {
    HighlyQualified,
    Qualified,
    MightBeQualified,
    NotQualified,
}

impl MatchBand {
    /// Band for a raw `match_percent` in `[0, 1]`.
    pub fn of(match_percent: f64) -> Self {
        if match_percent >= 0.90 {
            MatchBand::HighlyQualified
        } else if match_percent >= 0.65 {
            MatchBand::Qualified
        } else if match_percent >= 0.50 {
            MatchBand::MightBeQualified
        } else {
            MatchBand::NotQualified
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchBand::HighlyQualified => "Highly qualified",
            MatchBand::Qualified => "Qualified",
            MatchBand::MightBeQualified => "Might be qualified",
            MatchBand::NotQualified => "Not qualified",
        }
    }
}
