//! [`Installment`] definitions.

use common::{define_kind, Date, DateTime, DateTimeOf, Offset};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::Contract;

/// Monthly rent payment scheduled by a [`Contract`].
///
/// Schedules are generated and paid outside, so an [`Installment`] is only
/// ever read here to derive its [`Status`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Installment {
    /// ID of this [`Installment`].
    pub id: Id,

    /// ID of the [`Contract`] this [`Installment`] belongs to.
    pub contract_id: contract::Id,

    /// [`DueDate`] of this [`Installment`].
    pub due_date: DueDate,

    /// [`Amount`] due.
    pub amount: Amount,

    /// Indicator whether this [`Installment`] is paid.
    pub is_paid: bool,
}

impl Installment {
    /// Returns [`Status`] of this [`Installment`] at the provided `now`,
    /// observing calendar dates in UTC.
    #[must_use]
    pub fn status(&self, now: DateTime) -> Status {
        self.status_in(now, Offset::UTC)
    }

    /// Returns [`Status`] of this [`Installment`] at the provided `now`,
    /// observing calendar dates at the provided [`Offset`].
    ///
    /// Being paid dominates everything else. Otherwise, only the calendar
    /// dates are compared, so an [`Installment`] due today is still
    /// [`Status::Pending`].
    #[must_use]
    pub fn status_in(&self, now: DateTime, offset: Offset) -> Status {
        if self.is_paid {
            return Status::Paid;
        }

        if self.due_date.date(offset) < now.date(offset) {
            Status::Overdue
        } else {
            Status::Pending
        }
    }
}

/// ID of an [`Installment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Amount of money due by an [`Installment`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
pub struct Amount(Decimal);

/// Marker type indicating an [`Installment`] becoming due.
#[derive(Clone, Copy, Debug)]
pub struct Due;

/// [`DateTime`] when an [`Installment`] becomes due.
pub type DueDateTime = DateTimeOf<(Installment, Due)>;

/// Date an [`Installment`] is payable by.
///
/// Persistence layers may store it either as a plain calendar [`Date`] or as
/// a [`DateTime`] carrying some time of day.
#[derive(Clone, Copy, Debug, Eq, From, PartialEq)]
pub enum DueDate {
    /// Calendar [`Date`].
    Day(Date),

    /// [`DateTime`] with a time of day, which is ignored.
    Instant(DueDateTime),
}

impl DueDate {
    /// Returns the calendar [`Date`] of this [`DueDate`] observed at the
    /// provided [`Offset`].
    ///
    /// [`DueDate::Day`] is returned as is, regardless of the [`Offset`].
    #[must_use]
    pub fn date(&self, offset: Offset) -> Date {
        match self {
            Self::Day(date) => *date,
            Self::Instant(at) => at.date(offset),
        }
    }
}

define_kind! {
    #[doc = "Status of an [`Installment`], derived and never stored."]
    #[case = "PascalCase"]
    enum Status {
        #[doc = "[`Installment`] is paid."]
        Paid = 1,

        #[doc = "[`Installment`] isn't paid and its due date has passed."]
        Overdue = 2,

        #[doc = "[`Installment`] isn't paid and is due today or later."]
        Pending = 3,
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Offset};
    use rust_decimal::Decimal;

    use crate::domain::contract;

    use super::{Amount, DueDate, DueDateTime, Id, Installment, Status};

    fn installment(due_date: &str, is_paid: bool) -> Installment {
        let due_date = if due_date.contains('T') {
            DueDate::Instant(DueDateTime::from_rfc3339(due_date).unwrap())
        } else {
            DueDate::Day(due_date.parse().unwrap())
        };
        Installment {
            id: Id::new(),
            contract_id: contract::Id::new(),
            due_date,
            amount: Amount::from(Decimal::ONE_HUNDRED),
            is_paid,
        }
    }

    fn now(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    #[test]
    fn paid_dominates_date() {
        assert_eq!(
            installment("2020-01-01", true)
                .status(now("2024-01-01T00:00:00Z")),
            Status::Paid,
        );
        assert_eq!(
            installment("2030-01-01", true)
                .status(now("2024-01-01T00:00:00Z")),
            Status::Paid,
        );
    }

    #[test]
    fn due_today_is_pending() {
        assert_eq!(
            installment("2024-01-01", false)
                .status(now("2024-01-01T00:00:00Z")),
            Status::Pending,
        );
        assert_eq!(
            installment("2024-01-01", false)
                .status(now("2024-01-01T23:59:59Z")),
            Status::Pending,
        );
        assert_eq!(
            installment("2024-01-01T00:00:00Z", false)
                .status(now("2024-01-01T23:59:00Z")),
            Status::Pending,
        );
    }

    #[test]
    fn due_in_future_is_pending() {
        assert_eq!(
            installment("2024-02-05", false)
                .status(now("2024-01-01T12:00:00Z")),
            Status::Pending,
        );
    }

    #[test]
    fn past_due_is_overdue() {
        assert_eq!(
            installment("2024-01-01", false)
                .status(now("2024-01-02T00:00:00Z")),
            Status::Overdue,
        );
        assert_eq!(
            installment("2024-01-01T23:59:00Z", false)
                .status(now("2024-01-02T00:01:00Z")),
            Status::Overdue,
        );
    }

    #[test]
    fn compares_dates_at_offset() {
        let offset = Offset::from_hm(-3, 0).unwrap();

        // 01:30 UTC on January 2nd is still January 1st at -03:00.
        let now = now("2024-01-02T01:30:00Z");
        let due = installment("2024-01-01", false);
        assert_eq!(due.status(now), Status::Overdue);
        assert_eq!(due.status_in(now, offset), Status::Pending);

        let due = installment("2024-01-01T23:00:00Z", false);
        assert_eq!(due.status(now), Status::Overdue);
        assert_eq!(due.status_in(now, offset), Status::Pending);
    }

    #[test]
    fn is_idempotent() {
        let due = installment("2024-01-01", false);
        let now = now("2024-03-01T08:00:00Z");

        assert_eq!(due.status(now), due.status(now));
    }

    #[test]
    fn displays_status() {
        assert_eq!(Status::Paid.to_string(), "Paid");
        assert_eq!(Status::Overdue.to_string(), "Overdue");
        assert_eq!(Status::Pending.to_string(), "Pending");
    }
}
