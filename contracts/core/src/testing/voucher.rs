use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw_storage_plus::Map;
use kujira::{KujiraMsg, KujiraQuery};
use staking::voucher::{ExecuteMsg, Extension};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum QueryMsg {
    Token { token_id: String },
}

#[cw_serde]
pub struct Token {
    pub owner: String,
    pub extension: Option<Extension>,
}

static TOKENS: Map<String, Token> = Map::new("tokens");

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
    msg: ExecuteMsg,
) -> StdResult<Response<KujiraMsg>> {
    match msg {
        ExecuteMsg::Mint {
            token_id,
            owner,
            extension,
            ..
        } => {
            TOKENS.save(deps.storage, token_id, &Token { owner, extension })?;
            Ok(Response::default())
        }
    }
}

pub fn query(deps: Deps<KujiraQuery>, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Token { token_id } => to_json_binary(&TOKENS.may_load(deps.storage, token_id)?),
    }
}
