//! Rental contracts of tenants and properties, and the status of their
//! installments.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod config;
pub mod domain;
pub mod infra;
pub mod query;

use common::DateTime;

#[cfg(doc)]
use crate::domain::Contract;
#[cfg(doc)]
use infra::Registry;

pub use self::{command::Command, config::Config, query::Query};
use self::domain::contract;

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<R> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Registry`] of this [`Service`].
    registry: R,
}

impl<R> Service<R> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, registry: R) -> Self {
        Self { config, registry }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Registry`] of this [`Service`].
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Returns the pre-filled [`contract::Payload`] of a new [`Contract`]
    /// form, starting on the calendar day of the provided `now`.
    #[must_use]
    pub fn contract_defaults(&self, now: DateTime) -> contract::Payload {
        contract::defaults_for_create(
            now.date(self.config.calendar.utc_offset),
        )
    }
}
