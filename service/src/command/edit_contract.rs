//! [`Command`] for editing an existing [`Contract`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, property, tenant, Contract, Property, Tenant},
    infra::{registry, Registry},
    Service,
};

use super::Command;

/// [`Command`] for editing an existing [`Contract`].
///
/// Returns the [`Contract`] with the [`contract::Edit`] applied, leaving
/// persisting it up to the caller.
#[derive(Clone, Debug)]
pub struct EditContract {
    /// ID of the [`Contract`] to be edited.
    pub contract_id: contract::Id,

    /// Submitted [`contract::Edit`].
    pub edit: contract::Edit,
}

impl<R> Command<EditContract> for Service<R>
where
    R: Registry<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<registry::Error>,
        > + Registry<
            Select<By<Option<Tenant>, tenant::Id>>,
            Ok = Option<Tenant>,
            Err = Traced<registry::Error>,
        > + Registry<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<registry::Error>,
        >,
{
    type Ok = Contract;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: EditContract) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EditContract { contract_id, edit } = cmd;

        let mut contract = self
            .registry()
            .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
            .await
            .inspect_err(|e| log::error!("failed to select `Contract`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())?;

        let changes = contract::validate_for_edit(&edit)
            .inspect_err(|e| {
                log::debug!(
                    "`Contract(id: {contract_id})` edit rejected: {e}",
                );
            })
            .map_err(|e| tracerr::new!(E::Invalid(e)))?;

        let tenant_id = contract.tenant_id.clone();
        self.registry()
            .execute(Select(By::<Option<Tenant>, _>::new(tenant_id.clone())))
            .await
            .inspect_err(|e| log::error!("failed to select `Tenant`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| {
                log::warn!(
                    "`Contract(id: {contract_id})` refers to missing \
                     `Tenant(id: {tenant_id})`",
                );
                E::TenantNotExists(tenant_id)
            })
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let property_id = contract.property_id.clone();
        self.registry()
            .execute(Select(By::<Option<Property>, _>::new(
                property_id.clone(),
            )))
            .await
            .inspect_err(|e| log::error!("failed to select `Property`: {e}"))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| {
                log::warn!(
                    "`Contract(id: {contract_id})` refers to missing \
                     `Property(id: {property_id})`",
                );
                E::PropertyNotExists(property_id)
            })
            .map_err(tracerr::wrap!())
            .map(drop)?;

        contract.apply(changes);

        Ok(contract)
    }
}

/// Error of [`EditContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Registry`] error.
    #[display("`Registry` operation failed: {_0}")]
    #[from]
    Registry(registry::Error),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// Submitted [`contract::Edit`] is invalid.
    #[display("`Contract` edit is invalid: {_0}")]
    Invalid(contract::ValidationErrors),

    /// [`Tenant`] of the [`Contract`] does not exist.
    #[display("`Tenant(id: {_0})` does not exist")]
    TenantNotExists(#[error(not(source))] tenant::Id),

    /// [`Property`] of the [`Contract`] does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            contract::{
                self, DueDay, DurationMonths, Field, Input, MonthlyAmount,
                Rule,
            },
            property, tenant, Contract, Property, Tenant,
        },
        infra::InMemory,
        Command as _, Config, Service,
    };

    use super::{EditContract, ExecutionError};

    fn contract(tenant: &str, property: &str) -> Contract {
        Contract {
            id: contract::Id::new(),
            number: None,
            tenant_id: tenant::Id::new(tenant).unwrap(),
            property_id: property::Id::new(property).unwrap(),
            start_date: "2024-01-01".parse().unwrap(),
            duration: DurationMonths::new(12).unwrap(),
            due_day: DueDay::new(5).unwrap(),
            monthly_amount: MonthlyAmount::new(Decimal::ONE_THOUSAND)
                .unwrap(),
            is_active: true,
        }
    }

    fn service(contracts: &[Contract]) -> Service<InMemory> {
        let registry = contracts.iter().cloned().fold(
            InMemory::new()
                .with_tenant(Tenant {
                    id: tenant::Id::new("T1").unwrap(),
                    name: tenant::Name::new("Alice").unwrap(),
                })
                .with_property(Property {
                    id: property::Id::new("P1").unwrap(),
                    description: property::Description::new("Flat 1")
                        .unwrap(),
                }),
            InMemory::with_contract,
        );
        Service::new(Config::default(), registry)
    }

    #[tokio::test]
    async fn applies_present_fields_only() {
        let original = contract("T1", "P1");
        let edited = service(&[original.clone()])
            .execute(EditContract {
                contract_id: original.id,
                edit: contract::Edit {
                    due_day: Some(Input::text("10")),
                    active: Some(false),
                    ..contract::Edit::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.due_day.get(), 10);
        assert!(!edited.is_active);
        assert_eq!(edited.start_date, original.start_date);
        assert_eq!(edited.duration, original.duration);
        assert_eq!(edited.monthly_amount, original.monthly_amount);
    }

    #[tokio::test]
    async fn accepts_empty_edit() {
        let original = contract("T1", "P1");
        let edited = service(&[original.clone()])
            .execute(EditContract {
                contract_id: original.id,
                edit: contract::Edit::default(),
            })
            .await
            .unwrap();

        assert_eq!(edited, original);
    }

    #[tokio::test]
    async fn rejects_unknown_contract() {
        let id = contract::Id::new();
        let err = service(&[])
            .execute(EditContract {
                contract_id: id,
                edit: contract::Edit::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::ContractNotExists(missing) if *missing == id,
        ));
    }

    #[tokio::test]
    async fn rejects_invalid_edit() {
        let original = contract("T1", "P1");
        let err = service(&[original.clone()])
            .execute(EditContract {
                contract_id: original.id,
                edit: contract::Edit {
                    duration_months: Some(Input::Value(0)),
                    monthly_amount: Some(Input::text("free")),
                    ..contract::Edit::default()
                },
            })
            .await
            .unwrap_err();

        let ExecutionError::Invalid(errors) = err.as_ref() else {
            panic!("unexpected error: {err}");
        };
        assert!(errors.contains(Field::DurationMonths, Rule::BelowMinimum));
        assert!(errors.contains(Field::MonthlyAmount, Rule::Malformed));
    }

    #[tokio::test]
    async fn rejects_dangling_tenant() {
        let original = contract("T9", "P1");
        let err = service(&[original.clone()])
            .execute(EditContract {
                contract_id: original.id,
                edit: contract::Edit::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::TenantNotExists(id) if id.as_ref() == "T9",
        ));
    }

    #[tokio::test]
    async fn rejects_dangling_property() {
        let original = contract("T1", "P9");
        let err = service(&[original.clone()])
            .execute(EditContract {
                contract_id: original.id,
                edit: contract::Edit {
                    active: Some(false),
                    ..contract::Edit::default()
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PropertyNotExists(id) if id.as_ref() == "P9",
        ));
    }
}
