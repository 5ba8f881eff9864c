use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{
    to_json_binary, Addr, Coin, CosmosMsg, CustomQuery, QuerierWrapper, StdResult, WasmMsg,
};

use crate::puppeteer::{BalancesResponse, DelegationsResponse, QueryMsg};
use crate::ContractError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Puppeteer(pub Addr);

impl Puppeteer {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<crate::puppeteer::ExecuteMsg>, U>(
        &self,
        msg: T,
        funds: Vec<Coin>,
    ) -> Result<CosmosMsg<U>, ContractError> {
        let msg = to_json_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds,
        }
        .into())
    }

    pub fn delegations<C: CustomQuery>(
        &self,
        querier: QuerierWrapper<C>,
    ) -> StdResult<DelegationsResponse> {
        querier.query_wasm_smart(self.0.to_string(), &QueryMsg::Delegations {})
    }

    pub fn balances<C: CustomQuery>(
        &self,
        querier: QuerierWrapper<C>,
    ) -> StdResult<BalancesResponse> {
        querier.query_wasm_smart(self.0.to_string(), &QueryMsg::Balances {})
    }
}

/// Execute `msg` on `contract` without funds
pub fn execute<T: Serialize, U>(contract: &Addr, msg: &T) -> StdResult<CosmosMsg<U>> {
    Ok(WasmMsg::Execute {
        contract_addr: contract.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}
