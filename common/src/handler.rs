//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous handler of `Args`, used for both the lookups injected into a
/// service and the commands and queries it exposes.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Handles the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
