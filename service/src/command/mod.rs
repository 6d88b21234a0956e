//! [`Command`] definition.

pub mod create_contract;
pub mod edit_contract;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_contract::CreateContract, edit_contract::EditContract,
};
