//! Rental status policy.
//!
//! Statuses run `pending → approved → rented → returned`. Which moves a
//! moderator may make is decided by a [`TransitionPolicy`], chosen at startup.
//! Self-service submissions never pick a status; they always land on
//! [`RentalStatus::Pending`].

use std::str::FromStr;

use chrono::{Local, NaiveDate};

use crate::models::dress_rentals::RentalStatus;

/// Lifecycle order of rental statuses.
pub const ORDER: [RentalStatus; 4] = [
    RentalStatus::Pending,
    RentalStatus::Approved,
    RentalStatus::Rented,
    RentalStatus::Returned,
];

impl RentalStatus {
    /// Position of this status in [`ORDER`].
    pub fn ordinal(self) -> usize {
        match self {
            RentalStatus::Pending => 0,
            RentalStatus::Approved => 1,
            RentalStatus::Rented => 2,
            RentalStatus::Returned => 3,
        }
    }

    /// The status that follows this one, if any.
    pub fn next(self) -> Option<RentalStatus> {
        ORDER.get(self.ordinal() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Approved => "approved",
            RentalStatus::Rented => "rented",
            RentalStatus::Returned => "returned",
        }
    }
}

/// Which status changes a moderator is allowed to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may be set from any status.
    #[default]
    FreeForm,
    /// Only a step forward to the next status, or re-saving the current one.
    Sequential,
}

impl TransitionPolicy {
    /// Every status reachable from `from` in one moderator update.
    pub fn allowed_targets(self, from: RentalStatus) -> Vec<RentalStatus> {
        match self {
            TransitionPolicy::FreeForm => ORDER.to_vec(),
            TransitionPolicy::Sequential => {
                std::iter::once(from).chain(from.next()).collect()
            }
        }
    }

    pub fn permits(self, from: RentalStatus, to: RentalStatus) -> bool {
        self.allowed_targets(from).contains(&to)
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" | "free-form" | "freeform" => Ok(TransitionPolicy::FreeForm),
            "sequential" | "strict" => Ok(TransitionPolicy::Sequential),
            other => Err(format!(
                "unknown rental transition policy '{other}' (expected 'free' or 'sequential')"
            )),
        }
    }
}

/// Today's date on the server clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A rental is overdue when its return date is set and strictly before `today`.
pub fn is_overdue(return_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    matches!(return_date, Some(date) if date < today)
}
