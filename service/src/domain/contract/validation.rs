//! Validation of [`Contract`] payloads submitted for creation or edit.
//!
//! Every field is checked independently and all the violations are
//! collected, so a caller can surface them at once.

use std::{fmt, str::FromStr};

use common::{define_kind, Date};
use derive_more::{Deref, Display, Error, IntoIterator};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use crate::domain::{property, tenant};
#[cfg(doc)]
use crate::domain::{Property, Tenant};

use super::{Contract, DueDay, DurationMonths, Id, MonthlyAmount};

/// Raw value of a form field.
///
/// Either an already typed value, or the text a form submitted, which is
/// parsed strictly and never defaulted.
///
/// When deserialized, an integer which isn't a `T` is taken as its decimal
/// text, and any other value is kept as [`Input::Unexpected`], so a form
/// can't make the whole [`Payload`] unreadable by a single field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input<T> {
    /// Typed value.
    Value(T),

    /// Text to be parsed into a value.
    Text(String),

    /// Value being neither a `T` nor text.
    Unexpected,
}

impl<T> Input<T> {
    /// Creates a new [`Input::Text`].
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl<T: Clone + FromStr> Input<T> {
    /// Returns the typed value of this [`Input`].
    ///
    /// # Errors
    ///
    /// Errors with [`Rule::Malformed`] if the text cannot be parsed.
    fn value(&self) -> Result<T, Rule> {
        match self {
            Self::Value(v) => Ok(v.clone()),
            Self::Text(s) => s.parse().map_err(|_| Rule::Malformed),
            Self::Unexpected => Err(Rule::Malformed),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Input<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        /// Shapes a form field may arrive in, tried in order.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Value(T),
            Text(String),
            Signed(i64),
            Unsigned(u64),
            Other(de::IgnoredAny),
        }

        Ok(match Raw::deserialize(d)? {
            Raw::Value(v) => Self::Value(v),
            Raw::Text(s) => Self::Text(s),
            Raw::Signed(n) => Self::Text(n.to_string()),
            Raw::Unsigned(n) => Self::Text(n.to_string()),
            Raw::Other(_) => Self::Unexpected,
        })
    }
}

impl<T> From<T> for Input<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

/// Candidate [`Contract`] submitted for creation.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// ID of the [`Tenant`] renting the [`Property`].
    pub tenant: Option<Input<String>>,

    /// ID of the rented [`Property`].
    pub property: Option<Input<String>>,

    /// [`Date`] the [`Contract`] begins.
    pub start_date: Option<Input<Date>>,

    /// Length of the [`Contract`] in months.
    pub duration_months: Option<Input<i64>>,

    /// Day of month the rent is due on.
    pub due_day: Option<Input<i64>>,

    /// Base rent.
    pub monthly_amount: Option<Input<Decimal>>,

    /// Indicator whether the [`Contract`] is in force.
    ///
    /// Defaults to `true` when absent.
    pub active: Option<bool>,
}

/// Changes to an existing [`Contract`] submitted for edit.
///
/// [`Tenant`] and [`Property`] of a [`Contract`] cannot be changed, so they
/// have no place here. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Edit {
    /// New [`Date`] the [`Contract`] begins.
    pub start_date: Option<Input<Date>>,

    /// New length of the [`Contract`] in months.
    pub duration_months: Option<Input<i64>>,

    /// New day of month the rent is due on.
    pub due_day: Option<Input<i64>>,

    /// New base rent.
    pub monthly_amount: Option<Input<Decimal>>,

    /// New indicator whether the [`Contract`] is in force.
    pub active: Option<bool>,
}

/// [`Payload`] which passed [`validate_for_create()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Validated {
    /// ID of the [`Tenant`] renting the [`Property`].
    pub tenant_id: tenant::Id,

    /// ID of the rented [`Property`].
    pub property_id: property::Id,

    /// [`Date`] the [`Contract`] begins.
    pub start_date: Date,

    /// Length of the [`Contract`].
    pub duration: DurationMonths,

    /// Day of month the rent is due on.
    pub due_day: DueDay,

    /// Base rent.
    pub monthly_amount: MonthlyAmount,

    /// Indicator whether the [`Contract`] is in force.
    pub is_active: bool,
}

impl Validated {
    /// Turns this [`Validated`] payload into a [`Contract`] with the [`Id`]
    /// assigned by the persistence layer.
    #[must_use]
    pub fn into_contract(self, id: Id) -> Contract {
        let Self {
            tenant_id,
            property_id,
            start_date,
            duration,
            due_day,
            monthly_amount,
            is_active,
        } = self;

        Contract {
            id,
            number: None,
            tenant_id,
            property_id,
            start_date,
            duration,
            due_day,
            monthly_amount,
            is_active,
        }
    }
}

/// [`Edit`] which passed [`validate_for_edit()`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Changes {
    /// New [`Date`] the [`Contract`] begins.
    pub start_date: Option<Date>,

    /// New length of the [`Contract`].
    pub duration: Option<DurationMonths>,

    /// New day of month the rent is due on.
    pub due_day: Option<DueDay>,

    /// New base rent.
    pub monthly_amount: Option<MonthlyAmount>,

    /// New indicator whether the [`Contract`] is in force.
    pub is_active: Option<bool>,
}

impl Changes {
    /// Indicates whether these [`Changes`] change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

define_kind! {
    #[doc = "Field of a [`Contract`] payload."]
    #[case = "camelCase"]
    enum Field {
        #[doc = "ID of the [`Tenant`]."]
        Tenant = 1,

        #[doc = "ID of the [`Property`]."]
        Property = 2,

        #[doc = "[`Date`] the [`Contract`] begins."]
        StartDate = 3,

        #[doc = "Length of the [`Contract`] in months."]
        DurationMonths = 4,

        #[doc = "Day of month the rent is due on."]
        DueDay = 5,

        #[doc = "Base rent."]
        MonthlyAmount = 6,
    }
}

define_kind! {
    #[doc = "Rule a [`Field`] may violate."]
    #[case = "kebab-case"]
    enum Rule {
        #[doc = "Field is absent."]
        Required = 1,

        #[doc = "Field is blank."]
        Empty = 2,

        #[doc = "Field cannot be parsed into a value of its type."]
        Malformed = 3,

        #[doc = "Field is below its minimum."]
        BelowMinimum = 4,

        #[doc = "Field is outside of its allowed range."]
        OutOfRange = 5,
    }
}

/// Violation of a [`Rule`] by a [`Field`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, Hash, PartialEq)]
#[display("{field}: {rule}")]
pub struct ValidationError {
    /// [`Field`] violating the [`Rule`].
    pub field: Field,

    /// Violated [`Rule`].
    pub rule: Rule,
}

/// Non-empty list of [`ValidationError`]s, in the order of [`Field`]s.
#[derive(Clone, Debug, Deref, Eq, Error, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct ValidationErrors(#[error(not(source))] Vec<ValidationError>);

impl ValidationErrors {
    /// Checks whether the provided [`Field`] violates the provided [`Rule`].
    #[must_use]
    pub fn contains(&self, field: Field, rule: Rule) -> bool {
        self.0.contains(&ValidationError { field, rule })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format(", "))
    }
}

/// Returns the pre-filled [`Payload`] of a new [`Contract`] form.
///
/// The values are suggestions only and still have to pass
/// [`validate_for_create()`].
#[must_use]
pub fn defaults_for_create(today: Date) -> Payload {
    Payload {
        start_date: Some(today.into()),
        due_day: Some(i64::from(DueDay::FIRST.get()).into()),
        monthly_amount: Some(Decimal::new(0, 2).into()),
        active: Some(true),
        ..Payload::default()
    }
}

/// Validates the provided [`Payload`] of a new [`Contract`].
///
/// # Errors
///
/// Errors with every [`ValidationError`] the [`Payload`] has.
pub fn validate_for_create(
    payload: &Payload,
) -> Result<Validated, ValidationErrors> {
    let mut errors = Vec::new();

    let tenant_id = check(
        &mut errors,
        Field::Tenant,
        reference(payload.tenant.as_ref(), tenant::Id::new),
    );
    let property_id = check(
        &mut errors,
        Field::Property,
        reference(payload.property.as_ref(), property::Id::new),
    );
    let start_date = check(
        &mut errors,
        Field::StartDate,
        required(payload.start_date.as_ref()).and_then(parse_start_date),
    );
    let duration = check(
        &mut errors,
        Field::DurationMonths,
        required(payload.duration_months.as_ref()).and_then(parse_duration),
    );
    let due_day = check(
        &mut errors,
        Field::DueDay,
        required(payload.due_day.as_ref()).and_then(parse_due_day),
    );
    let monthly_amount = check(
        &mut errors,
        Field::MonthlyAmount,
        required(payload.monthly_amount.as_ref())
            .and_then(parse_monthly_amount),
    );

    match (
        tenant_id,
        property_id,
        start_date,
        duration,
        due_day,
        monthly_amount,
    ) {
        (
            Some(tenant_id),
            Some(property_id),
            Some(start_date),
            Some(duration),
            Some(due_day),
            Some(monthly_amount),
        ) if errors.is_empty() => Ok(Validated {
            tenant_id,
            property_id,
            start_date,
            duration,
            due_day,
            monthly_amount,
            is_active: payload.active.unwrap_or(true),
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

/// Validates the provided [`Edit`] of an existing [`Contract`].
///
/// Present fields are checked by the same rules as in
/// [`validate_for_create()`].
///
/// # Errors
///
/// Errors with every [`ValidationError`] the [`Edit`] has.
pub fn validate_for_edit(edit: &Edit) -> Result<Changes, ValidationErrors> {
    let mut errors = Vec::new();

    let changes = Changes {
        start_date: check(
            &mut errors,
            Field::StartDate,
            edit.start_date.as_ref().map(parse_start_date).transpose(),
        )
        .flatten(),
        duration: check(
            &mut errors,
            Field::DurationMonths,
            edit.duration_months.as_ref().map(parse_duration).transpose(),
        )
        .flatten(),
        due_day: check(
            &mut errors,
            Field::DueDay,
            edit.due_day.as_ref().map(parse_due_day).transpose(),
        )
        .flatten(),
        monthly_amount: check(
            &mut errors,
            Field::MonthlyAmount,
            edit.monthly_amount.as_ref().map(parse_monthly_amount).transpose(),
        )
        .flatten(),
        is_active: edit.active,
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Records the violated [`Rule`] of the provided [`Field`], if any.
fn check<T>(
    errors: &mut Vec<ValidationError>,
    field: Field,
    result: Result<T, Rule>,
) -> Option<T> {
    result
        .map_err(|rule| errors.push(ValidationError { field, rule }))
        .ok()
}

/// Requires the provided field to be present.
fn required<T>(input: Option<T>) -> Result<T, Rule> {
    input.ok_or(Rule::Required)
}

/// Checks a reference to an entity owned by an external registry.
fn reference<T>(
    input: Option<&Input<String>>,
    new: impl FnOnce(String) -> Option<T>,
) -> Result<T, Rule> {
    new(required(input)?.value()?).ok_or(Rule::Empty)
}

/// Checks the [`Date`] a [`Contract`] begins.
fn parse_start_date(input: &Input<Date>) -> Result<Date, Rule> {
    input.value()
}

/// Checks the length of a [`Contract`].
fn parse_duration(input: &Input<i64>) -> Result<DurationMonths, Rule> {
    let months = input.value()?;
    if months < 1 {
        return Err(Rule::BelowMinimum);
    }
    u16::try_from(months)
        .ok()
        .and_then(DurationMonths::new)
        .ok_or(Rule::OutOfRange)
}

/// Checks the day of month the rent is due on.
fn parse_due_day(input: &Input<i64>) -> Result<DueDay, Rule> {
    u8::try_from(input.value()?)
        .ok()
        .and_then(DueDay::new)
        .ok_or(Rule::OutOfRange)
}

/// Checks the base rent.
fn parse_monthly_amount(
    input: &Input<Decimal>,
) -> Result<MonthlyAmount, Rule> {
    MonthlyAmount::new(input.value()?).ok_or(Rule::BelowMinimum)
}
