use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage, Uint128};
use cw_storage_plus::Item;
use staking::{puppeteer::DelegationsResponse, ContractError};

/// A change to the ICA delegations, acknowledged at a local height
#[cw_serde]
pub struct IcaChange {
    pub height: u64,
    pub delegated: Uint128,
    pub undelegated: Uint128,
}

const UNSEEN_CHANGES: Item<Vec<IcaChange>> = Item::new("unseen_ica_changes");

/// The first delegations ICQ height that reflects an ICA change made at `height`
pub fn seen_height(height: u64, icq_update_delay: u64) -> u64 {
    height.saturating_add(icq_update_delay.max(1))
}

/// Acknowledged delegation changes that the delegations ICQ has not caught up
/// with yet. Until it does they are applied on top of the queried total, so
/// value never disappears from the exchange rate between an ack and the next
/// ICQ update.
pub struct Unseen;

impl Unseen {
    pub fn record_delegated(
        storage: &mut dyn Storage,
        height: u64,
        amount: Uint128,
    ) -> StdResult<()> {
        Self::record(
            storage,
            IcaChange {
                height,
                delegated: amount,
                undelegated: Uint128::zero(),
            },
        )
    }

    pub fn record_undelegated(
        storage: &mut dyn Storage,
        height: u64,
        amount: Uint128,
    ) -> StdResult<()> {
        Self::record(
            storage,
            IcaChange {
                height,
                delegated: Uint128::zero(),
                undelegated: amount,
            },
        )
    }

    fn record(storage: &mut dyn Storage, change: IcaChange) -> StdResult<()> {
        let mut changes = Self::all(storage)?;
        changes.push(change);
        UNSEEN_CHANGES.save(storage, &changes)
    }

    pub fn all(storage: &dyn Storage) -> StdResult<Vec<IcaChange>> {
        Ok(UNSEEN_CHANGES.may_load(storage)?.unwrap_or_default())
    }

    /// The delegated total of `delegations`, corrected by the changes it does not reflect
    pub fn delegated(
        storage: &dyn Storage,
        delegations: &DelegationsResponse,
        icq_update_delay: u64,
    ) -> Result<Uint128, ContractError> {
        let mut added = Uint128::zero();
        let mut removed = Uint128::zero();
        for change in Self::all(storage)? {
            if seen_height(change.height, icq_update_delay) > delegations.local_height {
                added = added.checked_add(change.delegated)?;
                removed = removed.checked_add(change.undelegated)?;
            }
        }
        // a slash seen by the ICQ may leave less than what is being undelegated
        Ok(delegations
            .total
            .checked_add(added)?
            .saturating_sub(removed))
    }

    /// Forgets the changes an ICQ taken at `local_height` already reflects
    pub fn prune(
        storage: &mut dyn Storage,
        local_height: u64,
        icq_update_delay: u64,
    ) -> StdResult<()> {
        let changes = Self::all(storage)?;
        let unseen: Vec<IcaChange> = changes
            .iter()
            .filter(|c| seen_height(c.height, icq_update_delay) > local_height)
            .cloned()
            .collect();
        if unseen.len() != changes.len() {
            UNSEEN_CHANGES.save(storage, &unseen)?;
        }
        Ok(())
    }
}
