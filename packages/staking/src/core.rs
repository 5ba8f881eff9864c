use std::fmt;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal, Uint128, Uint64};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::puppeteer::ResponseHookMsg;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// The factory that deployed this Core. Owner actions are normally routed through it
    pub factory_contract: String,
    pub puppeteer_contract: String,
    pub withdrawal_voucher_contract: String,
    pub withdrawal_manager_contract: String,
    /// Subdenom of the dAsset token-factory denom
    pub subdenom: String,
    pub base_denom: String,
    pub remote_denom: String,
    pub transfer_channel_id: String,
    /// Blocks the delegations ICQ must advance past the last ICA change
    pub icq_update_delay: u64,
    /// Seconds between two claiming cycles
    pub idle_min_interval: u64,
    /// Seconds a batch accepts unbond requests before it is switched out
    pub unbond_batch_switch_time: u64,
    pub unbonding_period: u64,
    pub unbonding_safe_period: u64,
    pub bond_limit: Option<Uint128>,
    pub emergency_address: Option<String>,
    pub pump_ica_address: Option<String>,
}

#[cw_serde]
#[derive(Default)]
pub struct ConfigOptional {
    pub factory_contract: Option<String>,
    pub puppeteer_contract: Option<String>,
    pub withdrawal_voucher_contract: Option<String>,
    pub withdrawal_manager_contract: Option<String>,
    pub base_denom: Option<String>,
    pub remote_denom: Option<String>,
    pub transfer_channel_id: Option<String>,
    pub icq_update_delay: Option<u64>,
    pub idle_min_interval: Option<u64>,
    pub unbond_batch_switch_time: Option<u64>,
    pub unbonding_period: Option<u64>,
    pub unbonding_safe_period: Option<u64>,
    pub bond_limit: Option<Uint128>,
    pub emergency_address: Option<String>,
    pub pump_ica_address: Option<String>,
}

#[cw_serde]
pub struct ConfigResponse {
    pub factory_contract: Addr,
    pub puppeteer_contract: Addr,
    pub withdrawal_voucher_contract: Addr,
    pub withdrawal_manager_contract: Addr,
    pub ld_denom: String,
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

#[cw_serde]
#[derive(Default)]
pub struct Pause {
    pub bond: bool,
    pub unbond: bool,
    pub tick: bool,
}

#[cw_serde]
#[derive(Copy, Default)]
pub enum ContractState {
    #[default]
    Idle,
    Peripheral,
    Claiming,
    Unbonding,
}

impl fmt::Display for ContractState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractState::Idle => write!(f, "idle"),
            ContractState::Peripheral => write!(f, "peripheral"),
            ContractState::Claiming => write!(f, "claiming"),
            ContractState::Unbonding => write!(f, "unbonding"),
        }
    }
}

#[cw_serde]
#[derive(Copy)]
pub enum UnbondBatchStatus {
    New,
    UnbondRequested,
    UnbondFailed,
    Unbonding,
    Withdrawing,
    Withdrawn,
    WithdrawingEmergency,
    WithdrawnEmergency,
}

impl fmt::Display for UnbondBatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnbondBatchStatus::New => "new",
            UnbondBatchStatus::UnbondRequested => "unbond_requested",
            UnbondBatchStatus::UnbondFailed => "unbond_failed",
            UnbondBatchStatus::Unbonding => "unbonding",
            UnbondBatchStatus::Withdrawing => "withdrawing",
            UnbondBatchStatus::Withdrawn => "withdrawn",
            UnbondBatchStatus::WithdrawingEmergency => "withdrawing_emergency",
            UnbondBatchStatus::WithdrawnEmergency => "withdrawn_emergency",
        };
        write!(f, "{}", s)
    }
}

/// Block time (seconds) at which a batch entered each status
#[cw_serde]
#[derive(Default)]
pub struct UnbondBatchStatusTimestamps {
    pub new: u64,
    pub unbond_requested: Option<u64>,
    pub unbond_failed: Option<u64>,
    pub unbonding: Option<u64>,
    pub withdrawing: Option<u64>,
    pub withdrawn: Option<u64>,
    pub withdrawing_emergency: Option<u64>,
    pub withdrawn_emergency: Option<u64>,
}

#[cw_serde]
pub struct UnbondBatch {
    pub status: UnbondBatchStatus,
    /// dAsset burned into this batch
    pub total_dasset_amount_to_withdraw: Uint128,
    /// Native asset undelegated for this batch
    pub expected_native_asset_amount: Uint128,
    /// Seconds. Set once, when the batch starts unbonding
    pub expected_release_time: Option<u64>,
    pub total_unbond_items: u64,
    pub slashing_effect: Option<Decimal>,
    pub unbonded_amount: Option<Uint128>,
    pub withdrawn_amount: Option<Uint128>,
    pub status_timestamps: UnbondBatchStatusTimestamps,
}

/// Sent to every registered bond hook after a successful bond
#[cw_serde]
pub struct BondHook {
    pub r#ref: Option<String>,
    pub sender: Addr,
    pub denom: String,
    pub amount: Uint128,
    pub dasset_minted: Uint128,
}

#[cw_serde]
pub enum BondCallbackMsg {
    BondCallback(BondHook),
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    Bond {
        receiver: Option<String>,
        r#ref: Option<String>,
    },
    Unbond {
        receiver: Option<String>,
    },
    Tick {},
    AddBondProvider {
        bond_provider_address: String,
    },
    RemoveBondProvider {
        bond_provider_address: String,
    },
    UpdateConfig {
        new_config: Box<ConfigOptional>,
    },
    UpdateWithdrawnAmount {
        batch_id: u64,
        withdrawn_amount: Uint128,
    },
    PeripheralHook(Box<ResponseHookMsg>),
    ResetBondedAmount {},
    ProcessEmergencyBatch {
        batch_id: u64,
        unbonded_amount: Uint128,
    },
    SetPause(Pause),
    SetBondHooks {
        hooks: Vec<String>,
    },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(String)]
    Owner {},
    #[returns(Decimal)]
    ExchangeRate {},
    #[returns(Uint64)]
    CurrentUnbondBatch {},
    #[returns(UnbondBatch)]
    UnbondBatch { batch_id: Uint64 },
    #[returns(UnbondBatchesResponse)]
    UnbondBatches {
        limit: Option<Uint64>,
        page_key: Option<Uint64>,
    },
    #[returns(ContractState)]
    ContractState {},
    #[returns(LastPuppeteerResponse)]
    LastPuppeteerResponse {},
    #[returns(Option<PendingRequest>)]
    PendingRequest {},
    #[returns(Uint128)]
    TotalBonded {},
    #[returns(Uint128)]
    TotalLdSupply {},
    #[returns(Vec<String>)]
    BondProviders {},
    #[returns(Uint128)]
    TotalAsyncTokens {},
    #[returns(FailedBatchResponse)]
    FailedBatch {},
    #[returns(Pause)]
    Pause {},
    #[returns(Vec<String>)]
    BondHooks {},
}

#[cw_serde]
pub struct UnbondBatchesResponse {
    pub unbond_batches: Vec<UnbondBatch>,
    pub next_page_key: Option<Uint64>,
}

#[cw_serde]
pub struct LastPuppeteerResponse {
    pub response: Option<ResponseHookMsg>,
}

#[cw_serde]
pub struct FailedBatchResponse {
    pub response: Option<u64>,
}

/// The remote operation Core is currently waiting on
#[cw_serde]
pub struct PendingRequest {
    pub request_id: u64,
    pub kind: RequestKind,
    /// The first qualifying response, once it arrives
    pub response: Option<ResponseHookMsg>,
}

#[cw_serde]
pub enum RequestKind {
    /// A bond provider was advanced and dispatched its own operation
    Peripheral { provider: Addr },
    /// Rewards claim, optionally transferring unbonded batches home
    Claim {
        withdrawals: Vec<BatchWithdrawal>,
        unbond_batch_id: Option<u64>,
    },
    Undelegate { batch_id: u64, amount: Uint128 },
}

#[cw_serde]
pub struct BatchWithdrawal {
    pub batch_id: u64,
    pub unbonded_amount: Uint128,
}
