//! Domain definitions.

pub mod contract;
pub mod installment;
pub mod property;
pub mod tenant;

pub use self::{
    contract::Contract, installment::Installment, property::Property,
    tenant::Tenant,
};
