use cosmwasm_std::{Addr, CustomQuery, QuerierWrapper, StdResult, Storage, Uint128};
use cw_storage_plus::Item;
use staking::{
    bond_provider::{BondProvider, Provider},
    core::{PendingRequest, RequestKind},
    ContractError,
};

/// Registration order is also selection order
const BOND_PROVIDERS: Item<Vec<Addr>> = Item::new("bond_providers");

pub struct Registry;

impl Registry {
    pub fn init(storage: &mut dyn Storage) -> StdResult<()> {
        BOND_PROVIDERS.save(storage, &vec![])
    }

    pub fn addresses(storage: &dyn Storage) -> StdResult<Vec<Addr>> {
        Ok(BOND_PROVIDERS.may_load(storage)?.unwrap_or_default())
    }

    pub fn all(storage: &dyn Storage) -> StdResult<Vec<Provider>> {
        Ok(Self::addresses(storage)?
            .into_iter()
            .map(Provider::from)
            .collect())
    }

    pub fn add(storage: &mut dyn Storage, address: Addr) -> Result<(), ContractError> {
        let mut providers = Self::addresses(storage)?;
        if providers.contains(&address) {
            return Err(ContractError::ProviderAlreadyAdded {
                address: address.to_string(),
            });
        }
        providers.push(address);
        BOND_PROVIDERS.save(storage, &providers)?;
        Ok(())
    }

    pub fn remove(storage: &mut dyn Storage, address: &Addr) -> Result<(), ContractError> {
        let mut providers = Self::addresses(storage)?;
        let position = providers
            .iter()
            .position(|p| p == address)
            .ok_or_else(|| ContractError::not_found("bond_provider", address))?;
        providers.remove(position);
        BOND_PROVIDERS.save(storage, &providers)?;
        Ok(())
    }
}

/// A provider may only leave the registry when nothing it dispatched is in flight
pub fn ensure_not_busy<P: BondProvider, C: CustomQuery>(
    provider: &P,
    address: &Addr,
    querier: QuerierWrapper<C>,
    pending: Option<&PendingRequest>,
) -> Result<(), ContractError> {
    let awaited = matches!(
        pending.map(|p| &p.kind),
        Some(RequestKind::Peripheral { provider: advanced }) if advanced == address
    );
    if awaited || !provider.tx_state(querier)?.is_idle() {
        return Err(ContractError::ProviderBusy {
            address: address.to_string(),
        });
    }
    Ok(())
}

/// The first provider, in registration order, that accepts `denom`
pub fn select_for_bond<'a, P: BondProvider, C: CustomQuery>(
    providers: &'a [P],
    querier: QuerierWrapper<C>,
    denom: &str,
) -> Result<&'a P, ContractError> {
    for provider in providers {
        if provider.can_bond(querier, denom)? {
            return Ok(provider);
        }
    }
    Err(ContractError::NoEligibleBondProvider {
        denom: denom.to_string(),
    })
}

/// The first idle provider with work to push to the remote chain
pub fn select_for_advance<'a, P: BondProvider, C: CustomQuery>(
    providers: &'a [P],
    querier: QuerierWrapper<C>,
) -> Result<Option<&'a P>, ContractError> {
    for provider in providers {
        if provider.tx_state(querier)?.is_idle() && provider.can_process_on_idle(querier)? {
            return Ok(Some(provider));
        }
    }
    Ok(None)
}

pub fn total_async_tokens<P: BondProvider, C: CustomQuery>(
    providers: &[P],
    querier: QuerierWrapper<C>,
) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for provider in providers {
        total = total.checked_add(provider.async_tokens_amount(querier)?)?;
    }
    Ok(total)
}
