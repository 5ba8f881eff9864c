use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Coin, CosmosMsg, CustomQuery, Decimal, QuerierWrapper, StdResult,
    Uint128, WasmMsg,
};

use crate::puppeteer::Transaction;

/// The part of a bond provider's execute surface that Core drives
#[cw_serde]
pub enum BondProviderMsg {
    /// Accept the attached funds on behalf of Core
    Bond {},
    /// Move pending funds towards the remote chain. The puppeteer answers
    /// with `request_id`.
    ProcessOnIdle { request_id: u64 },
}

/// The part of a bond provider's query surface that Core relies on
#[cw_serde]
#[derive(QueryResponses)]
pub enum BondProviderQueryMsg {
    #[returns(bool)]
    CanBond { denom: String },
    /// Whether the provider has pending work for Core to advance, such as a
    /// non-zero non-staked balance or shares waiting to be redeemed
    #[returns(bool)]
    CanProcessOnIdle {},
    /// Funds held locally that have not been sent anywhere yet
    #[returns(Uint128)]
    NonStakedBalance {},
    /// Funds accepted by the provider and not yet visible as delegations
    #[returns(Uint128)]
    AsyncTokensAmount {},
    /// dAsset to issue for `coin` at `exchange_rate`
    #[returns(Uint128)]
    TokensAmount { coin: Coin, exchange_rate: Decimal },
    #[returns(TxState)]
    TxState {},
}

#[cw_serde]
#[derive(Default)]
pub enum TxStatus {
    #[default]
    Idle,
    WaitingForAck,
}

#[cw_serde]
#[derive(Default)]
pub struct TxState {
    pub status: TxStatus,
    pub request_id: Option<u64>,
    pub transaction: Option<Transaction>,
}

impl TxState {
    pub fn is_idle(&self) -> bool {
        self.status == TxStatus::Idle
    }
}

/// Capabilities of a pluggable bond provider
pub trait BondProvider {
    fn can_bond<C: CustomQuery>(&self, querier: QuerierWrapper<C>, denom: &str)
        -> StdResult<bool>;
    fn can_process_on_idle<C: CustomQuery>(&self, querier: QuerierWrapper<C>) -> StdResult<bool>;
    fn async_tokens_amount<C: CustomQuery>(&self, querier: QuerierWrapper<C>)
        -> StdResult<Uint128>;
    fn tokens_amount<C: CustomQuery>(
        &self,
        querier: QuerierWrapper<C>,
        coin: &Coin,
        exchange_rate: Decimal,
    ) -> StdResult<Uint128>;
    fn tx_state<C: CustomQuery>(&self, querier: QuerierWrapper<C>) -> StdResult<TxState>;
    fn bond<T>(&self, funds: Coin) -> StdResult<CosmosMsg<T>>;
    fn process_on_idle<T>(&self, request_id: u64) -> StdResult<CosmosMsg<T>>;
}

/// A registered bond provider contract
#[cw_serde]
pub struct Provider(pub Addr);

impl Provider {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    fn query<C: CustomQuery, R: serde::de::DeserializeOwned>(
        &self,
        querier: QuerierWrapper<C>,
        msg: &BondProviderQueryMsg,
    ) -> StdResult<R> {
        querier.query_wasm_smart(self.0.to_string(), msg)
    }

    fn call<T>(&self, msg: &BondProviderMsg, funds: Vec<Coin>) -> StdResult<CosmosMsg<T>> {
        Ok(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_json_binary(msg)?,
            funds,
        }
        .into())
    }
}

impl BondProvider for Provider {
    fn can_bond<C: CustomQuery>(
        &self,
        querier: QuerierWrapper<C>,
        denom: &str,
    ) -> StdResult<bool> {
        self.query(
            querier,
            &BondProviderQueryMsg::CanBond {
                denom: denom.to_string(),
            },
        )
    }

    fn can_process_on_idle<C: CustomQuery>(&self, querier: QuerierWrapper<C>) -> StdResult<bool> {
        self.query(querier, &BondProviderQueryMsg::CanProcessOnIdle {})
    }

    fn async_tokens_amount<C: CustomQuery>(
        &self,
        querier: QuerierWrapper<C>,
    ) -> StdResult<Uint128> {
        self.query(querier, &BondProviderQueryMsg::AsyncTokensAmount {})
    }

    fn tokens_amount<C: CustomQuery>(
        &self,
        querier: QuerierWrapper<C>,
        coin: &Coin,
        exchange_rate: Decimal,
    ) -> StdResult<Uint128> {
        self.query(
            querier,
            &BondProviderQueryMsg::TokensAmount {
                coin: coin.clone(),
                exchange_rate,
            },
        )
    }

    fn tx_state<C: CustomQuery>(&self, querier: QuerierWrapper<C>) -> StdResult<TxState> {
        self.query(querier, &BondProviderQueryMsg::TxState {})
    }

    fn bond<T>(&self, funds: Coin) -> StdResult<CosmosMsg<T>> {
        self.call(&BondProviderMsg::Bond {}, vec![funds])
    }

    fn process_on_idle<T>(&self, request_id: u64) -> StdResult<CosmosMsg<T>> {
        self.call(&BondProviderMsg::ProcessOnIdle { request_id }, vec![])
    }
}

impl From<Addr> for Provider {
    fn from(value: Addr) -> Self {
        Self(value)
    }
}
