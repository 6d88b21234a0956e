//! [`Contract`] definitions.

pub mod validation;

use common::Date;
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, tenant};
#[cfg(doc)]
use crate::{
    domain::{Installment, Property, Tenant},
    infra::Registry,
};

pub use self::validation::{
    defaults_for_create, validate_for_create, validate_for_edit, Changes,
    Edit, Field, Input, Payload, Rule, Validated, ValidationError,
    ValidationErrors,
};

/// Rental agreement between a [`Tenant`] and the owner of a [`Property`],
/// paid in monthly [`Installment`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// Human-facing [`Number`] of this [`Contract`], if the [`Registry`]
    /// assigned one.
    ///
    /// Shown in listings only, never edited nor validated by forms.
    pub number: Option<Number>,

    /// ID of the [`Tenant`] renting the [`Property`].
    ///
    /// Immutable once this [`Contract`] is created.
    pub tenant_id: tenant::Id,

    /// ID of the rented [`Property`].
    ///
    /// Immutable once this [`Contract`] is created.
    pub property_id: property::Id,

    /// [`Date`] this [`Contract`] begins.
    pub start_date: Date,

    /// Length of this [`Contract`].
    pub duration: DurationMonths,

    /// Day of month the rent is due on.
    pub due_day: DueDay,

    /// Base rent of this [`Contract`].
    pub monthly_amount: MonthlyAmount,

    /// Indicator whether this [`Contract`] is in force.
    ///
    /// Toggled by an administrator only, never derived from dates.
    pub is_active: bool,
}

impl Contract {
    /// Indicates whether this [`Contract`] is shown in listings unless an
    /// administrator asks for inactive [`Contract`]s too.
    #[must_use]
    pub fn is_listed_by_default(&self) -> bool {
        self.is_active
    }

    /// Applies the validated [`Changes`] to this [`Contract`].
    ///
    /// Fields absent from the [`Changes`] are left untouched.
    pub fn apply(&mut self, changes: Changes) {
        let Changes {
            start_date,
            duration,
            due_day,
            monthly_amount,
            is_active,
        } = changes;

        if let Some(start_date) = start_date {
            self.start_date = start_date;
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
        if let Some(due_day) = due_day {
            self.due_day = due_day;
        }
        if let Some(monthly_amount) = monthly_amount {
            self.monthly_amount = monthly_amount;
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
    }
}

/// ID of a [`Contract`].
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

/// Human-facing number of a [`Contract`], as printed on paper.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Number`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number && !number.is_empty() && number.len() <= 64
    }
}

/// Length of a [`Contract`] in months, at least `1`.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct DurationMonths(u16);

impl DurationMonths {
    /// Creates a new [`DurationMonths`] if the given `months` is at least `1`.
    #[must_use]
    pub fn new(months: u16) -> Option<Self> {
        (months >= 1).then_some(Self(months))
    }

    /// Creates a new [`DurationMonths`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided `months` must be at least `1`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(months: u16) -> Self {
        Self(months)
    }

    /// Returns the number of months.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Day of month the rent of a [`Contract`] is due on, in `1..=31`.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct DueDay(u8);

impl DueDay {
    /// Earliest possible [`DueDay`].
    pub const FIRST: Self = Self(1);

    /// Latest possible [`DueDay`].
    pub const LAST: Self = Self(31);

    /// Creates a new [`DueDay`] if the given `day` is in `1..=31`.
    #[must_use]
    pub fn new(day: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&day)
            .then_some(Self(day))
    }

    /// Creates a new [`DueDay`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided `day` must be in `1..=31`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(day: u8) -> Self {
        Self(day)
    }

    /// Returns the day of month.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Non-negative base rent of a [`Contract`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
pub struct MonthlyAmount(Decimal);

impl MonthlyAmount {
    /// Creates a new [`MonthlyAmount`] if the given `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then_some(Self(amount))
    }

    /// Creates a new [`MonthlyAmount`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided `amount` must not be negative.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount.
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

pub mod list {
    //! [`Contract`]s list definitions.

    use crate::domain::{property, tenant, Contract};
    #[cfg(doc)]
    use crate::domain::{Property, Tenant};

    /// Filter narrowing a list of [`Contract`]s.
    ///
    /// An empty [`Filter`] matches every [`Contract`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the [`Tenant`] the [`Contract`]s belong to.
        pub tenant_id: Option<tenant::Id>,

        /// ID of the [`Property`] the [`Contract`]s belong to.
        pub property_id: Option<property::Id>,
    }

    impl Filter {
        /// Checks whether the provided [`Contract`] matches this [`Filter`].
        #[must_use]
        pub fn matches(&self, contract: &Contract) -> bool {
            self.tenant_id
                .as_ref()
                .map_or(true, |id| *id == contract.tenant_id)
                && self
                    .property_id
                    .as_ref()
                    .map_or(true, |id| *id == contract.property_id)
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Date;
    use rust_decimal::Decimal;

    use crate::domain::{property, tenant};

    use super::{
        list, Changes, Contract, DueDay, DurationMonths, Id, MonthlyAmount,
        Number,
    };

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn contract() -> Contract {
        Contract {
            id: Id::new(),
            number: Number::new("2024/001"),
            tenant_id: tenant::Id::new("T1").unwrap(),
            property_id: property::Id::new("P1").unwrap(),
            start_date: Date::from_calendar_date(2024, 1, 1).unwrap(),
            duration: DurationMonths::new(12).unwrap(),
            due_day: DueDay::new(5).unwrap(),
            monthly_amount: MonthlyAmount::new(decimal("1000")).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn lists_only_active_by_default() {
        let mut contract = contract();
        assert!(contract.is_listed_by_default());

        contract.is_active = false;
        assert!(!contract.is_listed_by_default());
    }

    #[test]
    fn checks_value_bounds() {
        assert!(DurationMonths::new(0).is_none());
        assert_eq!(DurationMonths::new(1).unwrap().get(), 1);

        assert!(DueDay::new(0).is_none());
        assert!(DueDay::new(32).is_none());
        assert_eq!(DueDay::new(1), Some(DueDay::FIRST));
        assert_eq!(DueDay::new(31), Some(DueDay::LAST));

        assert!(MonthlyAmount::new(decimal("-0.01")).is_none());
        assert_eq!(
            MonthlyAmount::new(Decimal::ZERO).unwrap().get(),
            Decimal::ZERO,
        );
    }

    #[test]
    fn checks_number() {
        assert_eq!(Number::new("2024/001").unwrap().as_ref(), "2024/001");
        assert!(Number::new("").is_none());
        assert!(Number::new(" 7").is_none());
        assert!(Number::new("7".repeat(65)).is_none());
    }

    #[test]
    fn applies_only_present_changes() {
        let original = contract();

        let mut edited = original.clone();
        edited.apply(Changes::default());
        assert_eq!(edited, original);

        edited.apply(Changes {
            due_day: DueDay::new(10),
            is_active: Some(false),
            ..Changes::default()
        });
        assert_eq!(edited.due_day.get(), 10);
        assert!(!edited.is_active);
        assert_eq!(edited.monthly_amount, original.monthly_amount);
        assert_eq!(edited.duration, original.duration);
        assert_eq!(edited.start_date, original.start_date);
        assert_eq!(edited.tenant_id, original.tenant_id);
        assert_eq!(edited.number, original.number);
    }

    #[test]
    fn filters_by_references() {
        let contract = contract();

        assert!(list::Filter::default().matches(&contract));
        assert!(list::Filter {
            tenant_id: tenant::Id::new("T1"),
            property_id: property::Id::new("P1"),
        }
        .matches(&contract));
        assert!(!list::Filter {
            tenant_id: tenant::Id::new("T2"),
            ..list::Filter::default()
        }
        .matches(&contract));
        assert!(!list::Filter {
            property_id: property::Id::new("P2"),
            ..list::Filter::default()
        }
        .matches(&contract));
    }
}
