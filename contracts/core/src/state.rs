use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::Item;
use staking::{
    core::{ContractState, Pause},
    ContractError,
};

pub const PAUSE: Item<Pause> = Item::new("pause");
pub const TOTAL_BONDED: Item<Uint128> = Item::new("total_bonded");
/// Outstanding dAsset. Core is the only minter and burner of the denom
pub const LD_SUPPLY: Item<Uint128> = Item::new("ld_supply");
pub const BOND_HOOKS: Item<Vec<Addr>> = Item::new("bond_hooks");
/// Block time of the last claiming cycle
pub const LAST_IDLE_CALL: Item<u64> = Item::new("last_idle_call");
/// Local height at which the ICA state last changed
pub const LAST_ICA_CHANGE_HEIGHT: Item<u64> = Item::new("last_ica_change_height");

const CONTRACT_STATE: Item<ContractState> = Item::new("contract_state");

const TRANSITIONS: &[(ContractState, ContractState)] = &[
    (ContractState::Idle, ContractState::Peripheral),
    (ContractState::Idle, ContractState::Claiming),
    (ContractState::Peripheral, ContractState::Idle),
    (ContractState::Claiming, ContractState::Unbonding),
    (ContractState::Claiming, ContractState::Idle),
    (ContractState::Unbonding, ContractState::Idle),
];

/// The Core state machine. Exactly one state is held at a time
pub struct Fsm;

impl Fsm {
    pub fn init(storage: &mut dyn Storage) -> StdResult<()> {
        CONTRACT_STATE.save(storage, &ContractState::Idle)
    }

    pub fn current(storage: &dyn Storage) -> StdResult<ContractState> {
        CONTRACT_STATE.load(storage)
    }

    pub fn go_to(storage: &mut dyn Storage, to: ContractState) -> Result<(), ContractError> {
        let from = Self::current(storage)?;
        if !TRANSITIONS.contains(&(from, to)) {
            return Err(ContractError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        CONTRACT_STATE.save(storage, &to)?;
        Ok(())
    }
}

pub enum PauseAction {
    Bond,
    Unbond,
    Tick,
}

pub fn ensure_not_paused(storage: &dyn Storage, action: PauseAction) -> Result<(), ContractError> {
    let pause = PAUSE.may_load(storage)?.unwrap_or_default();
    let (paused, name) = match action {
        PauseAction::Bond => (pause.bond, "bond"),
        PauseAction::Unbond => (pause.unbond, "unbond"),
        PauseAction::Tick => (pause.tick, "tick"),
    };
    if paused {
        return Err(ContractError::ContractPaused {
            action: name.to_string(),
        });
    }
    Ok(())
}
