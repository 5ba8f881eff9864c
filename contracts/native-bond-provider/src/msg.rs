use cosmwasm_schema::{
    cw_serde,
    serde::{Deserialize, Serialize},
};
use cosmwasm_std::Uint128;
use staking::{
    bond_provider::{BondProviderMsg, BondProviderQueryMsg},
    puppeteer::ResponseHookMsg,
};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub base_denom: String,
    pub core_contract: String,
    pub puppeteer_contract: String,
    /// Smallest balance worth a remote delegation
    pub min_stake_amount: Uint128,
}

#[cw_serde]
#[derive(Default)]
pub struct ConfigOptional {
    pub base_denom: Option<String>,
    pub core_contract: Option<String>,
    pub puppeteer_contract: Option<String>,
    pub min_stake_amount: Option<Uint128>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    deny_unknown_fields,
    rename_all = "snake_case",
    crate = "cosmwasm_schema::serde"
)]
#[allow(clippy::derive_partial_eq_without_eq)]
pub enum ExecuteMsg {
    UpdateConfig {
        new_config: ConfigOptional,
    },
    PeripheralHook(Box<ResponseHookMsg>),
    UpdateOwnership(cw_ownable::Action),
    /// Interface driven by Core
    #[serde(untagged)]
    BondProvider(BondProviderMsg),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    deny_unknown_fields,
    rename_all = "snake_case",
    crate = "cosmwasm_schema::serde"
)]
#[allow(clippy::derive_partial_eq_without_eq)]
pub enum QueryMsg {
    Config {},
    Ownership {},
    /// Interface queried by Core
    #[serde(untagged)]
    BondProvider(BondProviderQueryMsg),
}
