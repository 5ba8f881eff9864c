use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
};
use cw_storage_plus::Item;
use kujira::{KujiraMsg, KujiraQuery};
use staking::core::{BondCallbackMsg, BondHook};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum QueryMsg {
    Calls {},
}

static CALLS: Item<Vec<BondHook>> = Item::new("calls");

pub fn instantiate(
    _deps: DepsMut<KujiraQuery>,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> StdResult<Response<KujiraMsg>> {
    Ok(Response::default())
}

pub fn execute(
    deps: DepsMut<KujiraQuery>,
    _env: Env,
    _info: MessageInfo,
    msg: BondCallbackMsg,
) -> StdResult<Response<KujiraMsg>> {
    let BondCallbackMsg::BondCallback(hook) = msg;
    if hook.r#ref.as_deref() == Some("fail") {
        return Err(StdError::generic_err("hook rejected bond"));
    }
    let mut calls = CALLS.may_load(deps.storage)?.unwrap_or_default();
    calls.push(hook);
    CALLS.save(deps.storage, &calls)?;
    Ok(Response::default())
}

pub fn query(deps: Deps<KujiraQuery>, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Calls {} => to_json_binary(&CALLS.may_load(deps.storage)?.unwrap_or_default()),
    }
}
