//! [`Command`] for creating a new [`Contract`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, property, tenant, Property, Tenant},
    infra::{registry, Registry},
    Service,
};
#[cfg(doc)]
use crate::domain::Contract;

use super::Command;

/// [`Command`] for creating a new [`Contract`].
///
/// Only checks the submitted [`contract::Payload`], so persisting the
/// resulting [`contract::Validated`] is up to the caller.
#[derive(Clone, Debug)]
pub struct CreateContract {
    /// Submitted [`contract::Payload`].
    pub payload: contract::Payload,
}

impl<R> Command<CreateContract> for Service<R>
where
    R: Registry<
            Select<By<Option<Tenant>, tenant::Id>>,
            Ok = Option<Tenant>,
            Err = Traced<registry::Error>,
        > + Registry<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<registry::Error>,
        >,
{
    type Ok = contract::Validated;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateContract { payload } = cmd;

        let validated = contract::validate_for_create(&payload)
            .inspect_err(|e| {
                log::debug!("`Contract` payload rejected: {e}");
            })
            .map_err(|e| tracerr::new!(E::Invalid(e)))?;

        let tenant_id = validated.tenant_id.clone();
        self.registry()
            .execute(Select(By::<Option<Tenant>, _>::new(tenant_id.clone())))
            .await
            .inspect_err(|e| log::error!("failed to select `Tenant`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TenantNotExists(tenant_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let property_id = validated.property_id.clone();
        self.registry()
            .execute(Select(By::<Option<Property>, _>::new(
                property_id.clone(),
            )))
            .await
            .inspect_err(|e| log::error!("failed to select `Property`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(validated)
    }
}

/// Error of [`CreateContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Registry`] error.
    #[display("`Registry` operation failed: {_0}")]
    #[from]
    Registry(registry::Error),

    /// Submitted [`contract::Payload`] is invalid.
    #[display("`Contract` payload is invalid: {_0}")]
    Invalid(contract::ValidationErrors),

    /// [`Tenant`] with the provided ID does not exist.
    #[display("`Tenant(id: {_0})` does not exist")]
    TenantNotExists(#[error(not(source))] tenant::Id),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use rust_decimal::Decimal;
    use tracerr::Traced;

    use crate::{
        domain::{
            contract::{self, Field, Input, Rule},
            property, tenant, Property, Tenant,
        },
        infra::{registry, InMemory, Registry},
        Command as _, Config, Service,
    };

    use super::{CreateContract, ExecutionError};

    fn service() -> Service<InMemory> {
        let registry = InMemory::new()
            .with_tenant(Tenant {
                id: tenant::Id::new("T1").unwrap(),
                name: tenant::Name::new("Alice").unwrap(),
            })
            .with_property(Property {
                id: property::Id::new("P1").unwrap(),
                description: property::Description::new("Flat 1").unwrap(),
            });
        Service::new(Config::default(), registry)
    }

    fn payload() -> contract::Payload {
        contract::Payload {
            tenant: Some(Input::text("T1")),
            property: Some(Input::text("P1")),
            start_date: Some(Input::text("2024-01-01")),
            duration_months: Some(Input::Value(12)),
            due_day: Some(Input::Value(5)),
            monthly_amount: Some(Input::Value(Decimal::ONE_THOUSAND)),
            active: None,
        }
    }

    #[tokio::test]
    async fn accepts_resolvable_payload() {
        let validated = service()
            .execute(CreateContract { payload: payload() })
            .await
            .unwrap();

        assert_eq!(validated.tenant_id.as_ref(), "T1");
        assert_eq!(validated.property_id.as_ref(), "P1");
        assert!(validated.is_active);
    }

    #[tokio::test]
    async fn rejects_invalid_payload() {
        let err = service()
            .execute(CreateContract {
                payload: contract::Payload {
                    tenant: None,
                    due_day: Some(Input::Value(0)),
                    ..payload()
                },
            })
            .await
            .unwrap_err();

        let ExecutionError::Invalid(errors) = err.as_ref() else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(Field::Tenant, Rule::Required));
        assert!(errors.contains(Field::DueDay, Rule::OutOfRange));
    }

    #[tokio::test]
    async fn rejects_unknown_tenant() {
        let err = service()
            .execute(CreateContract {
                payload: contract::Payload {
                    tenant: Some(Input::text("T2")),
                    ..payload()
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::TenantNotExists(id) if id.as_ref() == "T2",
        ));
        assert_eq!(err.as_ref().to_string(), "`Tenant(id: T2)` does not exist");
    }

    #[tokio::test]
    async fn rejects_unknown_property() {
        let err = service()
            .execute(CreateContract {
                payload: contract::Payload {
                    property: Some(Input::text("P2")),
                    ..payload()
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PropertyNotExists(id) if id.as_ref() == "P2",
        ));
    }

    /// [`Registry`] failing every lookup.
    #[derive(Clone, Copy, Debug)]
    struct Unavailable;

    impl Registry<Select<By<Option<Tenant>, tenant::Id>>> for Unavailable {
        type Ok = Option<Tenant>;
        type Err = Traced<registry::Error>;

        async fn execute(
            &self,
            _: Select<By<Option<Tenant>, tenant::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            Err(tracerr::new!(registry::Error::new("unavailable")))
        }
    }

    impl Registry<Select<By<Option<Property>, property::Id>>> for Unavailable {
        type Ok = Option<Property>;
        type Err = Traced<registry::Error>;

        async fn execute(
            &self,
            _: Select<By<Option<Property>, property::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            Err(tracerr::new!(registry::Error::new("unavailable")))
        }
    }

    #[tokio::test]
    async fn propagates_registry_failure() {
        let err = Service::new(Config::default(), Unavailable)
            .execute(CreateContract { payload: payload() })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Registry(_)));
        assert_eq!(
            err.as_ref().to_string(),
            "`Registry` operation failed: unavailable",
        );
    }

    #[tokio::test]
    async fn validates_before_lookups() {
        let err = Service::new(Config::default(), Unavailable)
            .execute(CreateContract {
                payload: contract::Payload::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Invalid(_)));
    }
}
