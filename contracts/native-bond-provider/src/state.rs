use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdResult, Storage, Uint128};
use cw_storage_plus::Item;
use staking::bond_provider::TxState;

use crate::msg::{ConfigOptional, InstantiateMsg};

static CONFIG: Item<Config> = Item::new("config");

/// Base denom held here and not yet sent to the puppeteer
pub const NON_STAKED_BALANCE: Item<Uint128> = Item::new("non_staked_balance");
/// Sent to the puppeteer, waiting for the delegation to be acknowledged
pub const IN_FLIGHT: Item<Uint128> = Item::new("in_flight");
pub const TX_STATE: Item<TxState> = Item::new("tx_state");

#[cw_serde]
pub struct Config {
    pub base_denom: String,
    pub core_contract: Addr,
    pub puppeteer_contract: Addr,
    pub min_stake_amount: Uint128,
}

impl Config {
    pub fn new(msg: &InstantiateMsg, api: &dyn Api) -> StdResult<Self> {
        Ok(Self {
            base_denom: msg.base_denom.clone(),
            core_contract: api.addr_validate(&msg.core_contract)?,
            puppeteer_contract: api.addr_validate(&msg.puppeteer_contract)?,
            min_stake_amount: msg.min_stake_amount,
        })
    }

    pub fn load(storage: &dyn Storage) -> StdResult<Self> {
        CONFIG.load(storage)
    }

    pub fn save(&self, storage: &mut dyn Storage) -> StdResult<()> {
        CONFIG.save(storage, self)
    }

    pub fn update(&mut self, api: &dyn Api, new: ConfigOptional) -> StdResult<()> {
        if let Some(base_denom) = new.base_denom {
            self.base_denom = base_denom
        }
        if let Some(core_contract) = new.core_contract {
            self.core_contract = api.addr_validate(&core_contract)?
        }
        if let Some(puppeteer_contract) = new.puppeteer_contract {
            self.puppeteer_contract = api.addr_validate(&puppeteer_contract)?
        }
        if let Some(min_stake_amount) = new.min_stake_amount {
            self.min_stake_amount = min_stake_amount
        }
        Ok(())
    }
}
