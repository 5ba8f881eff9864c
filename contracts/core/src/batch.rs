use cosmwasm_std::{Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Bound, Item, Map};
use staking::{
    core::{BatchWithdrawal, UnbondBatch, UnbondBatchStatus, UnbondBatchStatusTimestamps},
    rates::slashing_effect,
    ContractError,
};

const UNBOND_BATCHES: Map<u64, UnbondBatch> = Map::new("unbond_batches");
const CURRENT_BATCH_ID: Item<u64> = Item::new("current_batch_id");
/// Batches in `unbonding`, waiting to be withdrawn from the remote chain
const UNBONDING: Map<u64, ()> = Map::new("unbonding");
pub const FAILED_BATCH_ID: Item<u64> = Item::new("failed_batch_id");

pub const DEFAULT_PAGE_LIMIT: u64 = 30;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// The Unbond Batch Ledger. One `new` batch accepts unbond requests, older
/// batches move forward through the remote settlement pipeline.
pub struct Ledger;

fn new_batch(now: u64) -> UnbondBatch {
    UnbondBatch {
        status: UnbondBatchStatus::New,
        total_dasset_amount_to_withdraw: Uint128::zero(),
        expected_native_asset_amount: Uint128::zero(),
        expected_release_time: None,
        total_unbond_items: 0,
        slashing_effect: None,
        unbonded_amount: None,
        withdrawn_amount: None,
        status_timestamps: UnbondBatchStatusTimestamps {
            new: now,
            ..Default::default()
        },
    }
}

fn transition(
    batch_id: u64,
    batch: &mut UnbondBatch,
    from: &[UnbondBatchStatus],
    to: UnbondBatchStatus,
    now: u64,
) -> Result<(), ContractError> {
    if !from.contains(&batch.status) {
        return Err(ContractError::invalid_state(format!(
            "batch {} is {}, cannot move to {}",
            batch_id, batch.status, to
        )));
    }
    batch.status = to;
    let ts = &mut batch.status_timestamps;
    match to {
        UnbondBatchStatus::New => ts.new = now,
        UnbondBatchStatus::UnbondRequested => ts.unbond_requested = Some(now),
        UnbondBatchStatus::UnbondFailed => ts.unbond_failed = Some(now),
        UnbondBatchStatus::Unbonding => ts.unbonding = Some(now),
        UnbondBatchStatus::Withdrawing => ts.withdrawing = Some(now),
        UnbondBatchStatus::Withdrawn => ts.withdrawn = Some(now),
        UnbondBatchStatus::WithdrawingEmergency => ts.withdrawing_emergency = Some(now),
        UnbondBatchStatus::WithdrawnEmergency => ts.withdrawn_emergency = Some(now),
    }
    Ok(())
}

impl Ledger {
    pub fn init(storage: &mut dyn Storage, now: u64) -> StdResult<()> {
        CURRENT_BATCH_ID.save(storage, &0)?;
        UNBOND_BATCHES.save(storage, 0, &new_batch(now))
    }

    pub fn current_batch_id(storage: &dyn Storage) -> StdResult<u64> {
        CURRENT_BATCH_ID.load(storage)
    }

    pub fn load(storage: &dyn Storage, batch_id: u64) -> Result<UnbondBatch, ContractError> {
        UNBOND_BATCHES
            .may_load(storage, batch_id)?
            .ok_or_else(|| ContractError::not_found("unbond_batch", batch_id))
    }

    fn save(storage: &mut dyn Storage, batch_id: u64, batch: &UnbondBatch) -> StdResult<()> {
        UNBOND_BATCHES.save(storage, batch_id, batch)
    }

    /// Adds one unbond request of `amount` dAsset. Returns the item's sequence within the batch
    pub fn append_unbond(
        storage: &mut dyn Storage,
        batch_id: u64,
        amount: Uint128,
    ) -> Result<u64, ContractError> {
        let mut batch = Self::load(storage, batch_id)?;
        if batch.status != UnbondBatchStatus::New {
            return Err(ContractError::invalid_state(format!(
                "batch {} is {}, not accepting unbonds",
                batch_id, batch.status
            )));
        }
        batch.total_dasset_amount_to_withdraw =
            batch.total_dasset_amount_to_withdraw.checked_add(amount)?;
        batch.total_unbond_items += 1;
        Self::save(storage, batch_id, &batch)?;
        Ok(batch.total_unbond_items)
    }

    /// Whether the current batch has been open long enough and has something to unbond.
    /// An empty batch is never switched out: closing it would only reconcile
    /// to nothing, so it keeps accepting requests past its window instead.
    pub fn is_switch_due(
        storage: &dyn Storage,
        now: u64,
        switch_time: u64,
    ) -> Result<bool, ContractError> {
        let batch = Self::load(storage, Self::current_batch_id(storage)?)?;
        Ok(batch.total_unbond_items > 0
            && batch.status_timestamps.new.saturating_add(switch_time) <= now)
    }

    /// Switches out the current batch and opens a fresh one. Returns the closed batch id
    pub fn close_current_batch(storage: &mut dyn Storage, now: u64) -> Result<u64, ContractError> {
        let batch_id = Self::current_batch_id(storage)?;
        let mut batch = Self::load(storage, batch_id)?;
        transition(
            batch_id,
            &mut batch,
            &[UnbondBatchStatus::New],
            UnbondBatchStatus::UnbondRequested,
            now,
        )?;
        Self::save(storage, batch_id, &batch)?;

        let next_id = batch_id + 1;
        CURRENT_BATCH_ID.save(storage, &next_id)?;
        Self::save(storage, next_id, &new_batch(now))?;
        Ok(batch_id)
    }

    pub fn begin_unbonding(
        storage: &mut dyn Storage,
        batch_id: u64,
        native_amount: Uint128,
        now: u64,
        release_time: u64,
    ) -> Result<UnbondBatch, ContractError> {
        let mut batch = Self::load(storage, batch_id)?;
        if batch.expected_release_time.is_some() {
            return Err(ContractError::invalid_state(format!(
                "batch {} already has a release time",
                batch_id
            )));
        }
        transition(
            batch_id,
            &mut batch,
            &[
                UnbondBatchStatus::UnbondRequested,
                UnbondBatchStatus::UnbondFailed,
            ],
            UnbondBatchStatus::Unbonding,
            now,
        )?;
        batch.expected_native_asset_amount = native_amount;
        batch.expected_release_time = Some(release_time);
        Self::save(storage, batch_id, &batch)?;
        UNBONDING.save(storage, batch_id, &())?;
        if FAILED_BATCH_ID.may_load(storage)? == Some(batch_id) {
            FAILED_BATCH_ID.remove(storage);
        }
        Ok(batch)
    }

    /// The undelegation of `batch_id` failed remotely. It stays retryable
    pub fn mark_failed(
        storage: &mut dyn Storage,
        batch_id: u64,
        now: u64,
    ) -> Result<(), ContractError> {
        let mut batch = Self::load(storage, batch_id)?;
        transition(
            batch_id,
            &mut batch,
            &[
                UnbondBatchStatus::UnbondRequested,
                UnbondBatchStatus::UnbondFailed,
            ],
            UnbondBatchStatus::UnbondFailed,
            now,
        )?;
        Self::save(storage, batch_id, &batch)?;
        FAILED_BATCH_ID.save(storage, &batch_id)?;
        Ok(())
    }

    pub fn failed_batch_id(storage: &dyn Storage) -> StdResult<Option<u64>> {
        FAILED_BATCH_ID.may_load(storage)
    }

    /// The unbonded funds of `batch_id` arrived home
    pub fn record_unbonded(
        storage: &mut dyn Storage,
        batch_id: u64,
        unbonded_amount: Uint128,
        now: u64,
    ) -> Result<UnbondBatch, ContractError> {
        Self::settle(
            storage,
            batch_id,
            unbonded_amount,
            now,
            UnbondBatchStatus::Withdrawing,
        )
    }

    /// Manual recovery of a batch the remote chain never delivered
    pub fn process_emergency(
        storage: &mut dyn Storage,
        batch_id: u64,
        unbonded_amount: Uint128,
        now: u64,
    ) -> Result<UnbondBatch, ContractError> {
        let batch = Self::load(storage, batch_id)?;
        match batch.expected_release_time {
            Some(release) if release <= now => {}
            _ => {
                return Err(ContractError::invalid_state(format!(
                    "batch {} is not due for release",
                    batch_id
                )))
            }
        }
        Self::settle(
            storage,
            batch_id,
            unbonded_amount,
            now,
            UnbondBatchStatus::WithdrawingEmergency,
        )
    }

    fn settle(
        storage: &mut dyn Storage,
        batch_id: u64,
        unbonded_amount: Uint128,
        now: u64,
        to: UnbondBatchStatus,
    ) -> Result<UnbondBatch, ContractError> {
        let mut batch = Self::load(storage, batch_id)?;
        transition(
            batch_id,
            &mut batch,
            &[UnbondBatchStatus::Unbonding],
            to,
            now,
        )?;
        batch.slashing_effect =
            slashing_effect(unbonded_amount, batch.expected_native_asset_amount)?;
        batch.unbonded_amount = Some(unbonded_amount);
        Self::save(storage, batch_id, &batch)?;
        UNBONDING.remove(storage, batch_id);
        Ok(batch)
    }

    /// The withdrawal manager has accounted for the funds of `batch_id`
    pub fn record_withdrawn(
        storage: &mut dyn Storage,
        batch_id: u64,
        withdrawn_amount: Uint128,
        now: u64,
    ) -> Result<UnbondBatch, ContractError> {
        let mut batch = Self::load(storage, batch_id)?;
        let to = match batch.status {
            UnbondBatchStatus::Withdrawing => UnbondBatchStatus::Withdrawn,
            UnbondBatchStatus::WithdrawingEmergency => UnbondBatchStatus::WithdrawnEmergency,
            UnbondBatchStatus::Withdrawn | UnbondBatchStatus::WithdrawnEmergency => {
                return Err(ContractError::AlreadyWithdrawn { batch_id })
            }
            _ => return Err(ContractError::NotWithdrawnYet { batch_id }),
        };
        let from = batch.status;
        transition(batch_id, &mut batch, &[from], to, now)?;
        batch.withdrawn_amount = Some(withdrawn_amount);
        Self::save(storage, batch_id, &batch)?;
        Ok(batch)
    }

    /// dAsset already burned into batches that have not been undelegated yet
    pub fn unbond_liability(storage: &dyn Storage) -> Result<Uint128, ContractError> {
        let current_id = Self::current_batch_id(storage)?;
        let mut ids = vec![current_id];
        if current_id > 0 {
            ids.push(current_id - 1);
        }
        if let Some(failed) = Self::failed_batch_id(storage)? {
            if !ids.contains(&failed) {
                ids.push(failed);
            }
        }

        let mut total = Uint128::zero();
        for id in ids {
            let batch = Self::load(storage, id)?;
            if matches!(
                batch.status,
                UnbondBatchStatus::New
                    | UnbondBatchStatus::UnbondRequested
                    | UnbondBatchStatus::UnbondFailed
            ) {
                total = total.checked_add(batch.total_dasset_amount_to_withdraw)?;
            }
        }
        Ok(total)
    }

    /// Unbonding batches whose release time has passed and whose funds the
    /// ICA balance query (taken at `balance_time`) can already see. Oldest first
    pub fn withdrawable(
        storage: &dyn Storage,
        now: u64,
        balance_time: u64,
    ) -> Result<Vec<(u64, UnbondBatch)>, ContractError> {
        let ids = UNBONDING
            .keys(storage, None, None, Order::Ascending)
            .collect::<StdResult<Vec<u64>>>()?;
        let mut due = vec![];
        for id in ids {
            let batch = Self::load(storage, id)?;
            if let Some(release) = batch.expected_release_time {
                if release <= now && balance_time > release {
                    due.push((id, batch));
                }
            }
        }
        Ok(due)
    }

    /// Batches in ascending id order, starting at `page_key`. A zero limit reads as one
    pub fn page(
        storage: &dyn Storage,
        limit: Option<u64>,
        page_key: Option<u64>,
    ) -> Result<(Vec<UnbondBatch>, Option<u64>), ContractError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT) as usize;
        if let Some(key) = page_key {
            if !UNBOND_BATCHES.has(storage, key) {
                return Err(ContractError::not_found("page_key", key));
            }
        }
        let mut items = UNBOND_BATCHES
            .range(
                storage,
                page_key.map(Bound::inclusive),
                None,
                Order::Ascending,
            )
            .take(limit + 1)
            .collect::<StdResult<Vec<(u64, UnbondBatch)>>>()?;

        let next_page_key = if items.len() > limit {
            items.pop().map(|(id, _)| id)
        } else {
            None
        };
        Ok((
            items.into_iter().map(|(_, batch)| batch).collect(),
            next_page_key,
        ))
    }
}

/// Shares an ICA `balance` between due batches. A batch never receives more
/// than it expects; a short balance is split pro rata, rounding down.
pub fn split_withdrawals(
    due: &[(u64, UnbondBatch)],
    balance: Uint128,
) -> Result<Vec<BatchWithdrawal>, ContractError> {
    let mut expected_total = Uint128::zero();
    for (_, batch) in due {
        expected_total = expected_total.checked_add(batch.expected_native_asset_amount)?;
    }
    let mut withdrawals = Vec::with_capacity(due.len());
    for (batch_id, batch) in due {
        let expected = batch.expected_native_asset_amount;
        let unbonded_amount = if balance >= expected_total {
            expected
        } else {
            expected.checked_multiply_ratio(balance, expected_total)?
        };
        withdrawals.push(BatchWithdrawal {
            batch_id: *batch_id,
            unbonded_amount,
        });
    }
    Ok(withdrawals)
}
