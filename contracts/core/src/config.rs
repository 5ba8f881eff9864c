use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, Env, StdResult, Storage, Uint128};
use cw_storage_plus::Item;
use kujira::Denom;
use staking::{
    core::{ConfigOptional, ConfigResponse, InstantiateMsg},
    helpers::Puppeteer,
};

static CONFIG: Item<Config> = Item::new("config");

#[cw_serde]
pub struct Config {
    pub factory_contract: Addr,
    pub puppeteer_contract: Addr,
    pub withdrawal_voucher_contract: Addr,
    pub withdrawal_manager_contract: Addr,
    pub ld_denom: Denom,
    pub base_denom: String,
    pub remote_denom: String,
    pub transfer_channel_id: String,
    pub icq_update_delay: u64,
    pub idle_min_interval: u64,
    pub unbond_batch_switch_time: u64,
    pub unbonding_period: u64,
    pub unbonding_safe_period: u64,
    pub bond_limit: Option<Uint128>,
    pub emergency_address: Option<String>,
    pub pump_ica_address: Option<String>,
}

impl Config {
    pub fn new(msg: InstantiateMsg, api: &dyn Api, env: &Env) -> StdResult<Self> {
        Ok(Self {
            factory_contract: api.addr_validate(&msg.factory_contract)?,
            puppeteer_contract: api.addr_validate(&msg.puppeteer_contract)?,
            withdrawal_voucher_contract: api.addr_validate(&msg.withdrawal_voucher_contract)?,
            withdrawal_manager_contract: api.addr_validate(&msg.withdrawal_manager_contract)?,
            ld_denom: Denom::from(format!(
                "factory/{}/{}",
                env.contract.address, msg.subdenom
            )),
            base_denom: msg.base_denom,
            remote_denom: msg.remote_denom,
            transfer_channel_id: msg.transfer_channel_id,
            icq_update_delay: msg.icq_update_delay,
            idle_min_interval: msg.idle_min_interval,
            unbond_batch_switch_time: msg.unbond_batch_switch_time,
            unbonding_period: msg.unbonding_period,
            unbonding_safe_period: msg.unbonding_safe_period,
            bond_limit: msg.bond_limit,
            emergency_address: msg.emergency_address,
            pump_ica_address: msg.pump_ica_address,
        })
    }

    pub fn load(storage: &dyn Storage) -> StdResult<Self> {
        CONFIG.load(storage)
    }

    pub fn save(&self, storage: &mut dyn Storage) -> StdResult<()> {
        CONFIG.save(storage, self)
    }

    pub fn update(&mut self, api: &dyn Api, new: ConfigOptional) -> StdResult<()> {
        if let Some(factory_contract) = new.factory_contract {
            self.factory_contract = api.addr_validate(&factory_contract)?
        }
        if let Some(puppeteer_contract) = new.puppeteer_contract {
            self.puppeteer_contract = api.addr_validate(&puppeteer_contract)?
        }
        if let Some(voucher) = new.withdrawal_voucher_contract {
            self.withdrawal_voucher_contract = api.addr_validate(&voucher)?
        }
        if let Some(manager) = new.withdrawal_manager_contract {
            self.withdrawal_manager_contract = api.addr_validate(&manager)?
        }
        if let Some(base_denom) = new.base_denom {
            self.base_denom = base_denom
        }
        if let Some(remote_denom) = new.remote_denom {
            self.remote_denom = remote_denom
        }
        if let Some(transfer_channel_id) = new.transfer_channel_id {
            self.transfer_channel_id = transfer_channel_id
        }
        if let Some(icq_update_delay) = new.icq_update_delay {
            self.icq_update_delay = icq_update_delay
        }
        if let Some(idle_min_interval) = new.idle_min_interval {
            self.idle_min_interval = idle_min_interval
        }
        if let Some(switch_time) = new.unbond_batch_switch_time {
            self.unbond_batch_switch_time = switch_time
        }
        if let Some(unbonding_period) = new.unbonding_period {
            self.unbonding_period = unbonding_period
        }
        if let Some(safe_period) = new.unbonding_safe_period {
            self.unbonding_safe_period = safe_period
        }
        if new.bond_limit.is_some() {
            self.bond_limit = new.bond_limit
        }
        if new.emergency_address.is_some() {
            self.emergency_address = new.emergency_address
        }
        if new.pump_ica_address.is_some() {
            self.pump_ica_address = new.pump_ica_address
        }
        Ok(())
    }

    pub fn puppeteer(&self) -> Puppeteer {
        Puppeteer(self.puppeteer_contract.clone())
    }

    /// When a batch that starts unbonding at `started` can be withdrawn
    pub fn release_time(&self, started: u64) -> u64 {
        started
            .saturating_add(self.unbonding_period)
            .saturating_add(self.unbonding_safe_period)
    }
}

impl From<Config> for ConfigResponse {
    fn from(value: Config) -> Self {
        Self {
            factory_contract: value.factory_contract,
            puppeteer_contract: value.puppeteer_contract,
            withdrawal_voucher_contract: value.withdrawal_voucher_contract,
            withdrawal_manager_contract: value.withdrawal_manager_contract,
            ld_denom: value.ld_denom.to_string(),
            base_denom: value.base_denom,
            remote_denom: value.remote_denom,
            transfer_channel_id: value.transfer_channel_id,
            icq_update_delay: value.icq_update_delay,
            idle_min_interval: value.idle_min_interval,
            unbond_batch_switch_time: value.unbond_batch_switch_time,
            unbonding_period: value.unbonding_period,
            unbonding_safe_period: value.unbonding_safe_period,
            bond_limit: value.bond_limit,
            emergency_address: value.emergency_address,
            pump_ica_address: value.pump_ica_address,
        }
    }
}
