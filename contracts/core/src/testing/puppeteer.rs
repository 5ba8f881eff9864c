use cosmwasm_schema::{
    cw_serde,
    serde::{Deserialize, Serialize},
};
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo,
    Response, StdResult, Timestamp, Uint128,
};
use cw_storage_plus::Item;
use kujira::{KujiraMsg, KujiraQuery};
use staking::{
    helpers,
    puppeteer::{
        BalancesResponse, DelegationsResponse, ExecuteMsg as PuppeteerMsg, QueryMsg,
        ReceiverExecuteMsg, RequestPacket, ResponseAnswer, ResponseHookErrorMsg, ResponseHookMsg,
        ResponseHookSuccessMsg, Transaction,
    },
};

#[cw_serde]
pub struct InstantiateMsg {}

/// Test controls, plus the real puppeteer interface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", crate = "cosmwasm_schema::serde")]
#[allow(clippy::derive_partial_eq_without_eq)]
pub enum ExecuteMsg {
    /// Publishes ICQ results at the current block
    SetIcq {
        delegated: Uint128,
        balance: Uint128,
    },
    /// Answers the last instruction. `request_id` overrides the echoed id
    Respond {
        success: bool,
        request_id: Option<u64>,
    },
    SetCore {
        core: String,
    },
    #[serde(untagged)]
    Puppeteer(PuppeteerMsg),
}

#[cw_serde]
struct Icq {
    delegated: Uint128,
    balance: Uint128,
    height: u64,
    time: Timestamp,
}

#[cw_serde]
struct Instruction {
    sender: Addr,
    request_id: u64,
    transaction: Transaction,
    funds: Vec<Coin>,
}

static CORE: Item<Addr> = Item::new("core");
static ICQ: Item<Icq> = Item::new("icq");
static LAST: Item<Instruction> = Item::new("last");

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
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response<KujiraMsg>> {
    match msg {
        ExecuteMsg::SetCore { core } => {
            CORE.save(deps.storage, &deps.api.addr_validate(&core)?)?;
            Ok(Response::default())
        }
        ExecuteMsg::SetIcq { delegated, balance } => {
            ICQ.save(
                deps.storage,
                &Icq {
                    delegated,
                    balance,
                    height: env.block.height,
                    time: env.block.time,
                },
            )?;
            Ok(Response::default())
        }
        ExecuteMsg::Puppeteer(msg) => {
            let (request_id, transaction) = match msg {
                PuppeteerMsg::Delegate { request_id } => {
                    let amount = info.funds.iter().map(|c| c.amount).sum::<Uint128>();
                    (request_id, Transaction::Delegate { amount })
                }
                PuppeteerMsg::Undelegate {
                    request_id,
                    batch_id,
                    amount,
                } => (request_id, Transaction::Undelegate { batch_id, amount }),
                PuppeteerMsg::ClaimRewardsAndOptionalyTransfer {
                    request_id,
                    transfer,
                } => (
                    request_id,
                    Transaction::ClaimRewardsAndOptionalyTransfer { transfer },
                ),
            };
            LAST.save(
                deps.storage,
                &Instruction {
                    sender: info.sender,
                    request_id,
                    transaction,
                    funds: info.funds,
                },
            )?;
            Ok(Response::default())
        }
        ExecuteMsg::Respond {
            success,
            request_id,
        } => {
            let last = LAST.load(deps.storage)?;
            let core = CORE.load(deps.storage)?;
            let request_id = request_id.unwrap_or(last.request_id);
            let request = RequestPacket {
                sequence: Some(last.request_id),
                source_port: Some("icacontroller".to_string()),
                source_channel: Some("channel-0".to_string()),
                destination_port: Some("icahost".to_string()),
                destination_channel: Some("channel-0".to_string()),
                data: None,
            };
            let hook = if success {
                let answer = match &last.transaction {
                    Transaction::Delegate { .. } => ResponseAnswer::DelegateResponse {},
                    Transaction::Undelegate { .. } => ResponseAnswer::UndelegateResponse {
                        completion_time: None,
                    },
                    Transaction::ClaimRewardsAndOptionalyTransfer { .. } => {
                        ResponseAnswer::ClaimResponse {}
                    }
                };
                ResponseHookMsg::Success(ResponseHookSuccessMsg {
                    request_id,
                    request,
                    transaction: last.transaction.clone(),
                    answers: vec![answer],
                    local_height: env.block.height,
                    remote_height: env.block.height,
                })
            } else {
                ResponseHookMsg::Error(ResponseHookErrorMsg {
                    request_id,
                    request,
                    transaction: last.transaction.clone(),
                    details: "remote execution failed".to_string(),
                })
            };

            let receiver = ReceiverExecuteMsg::PeripheralHook(Box::new(hook));
            let mut msgs: Vec<CosmosMsg<KujiraMsg>> = vec![];
            if last.sender != core {
                if !success && !last.funds.is_empty() {
                    msgs.push(
                        BankMsg::Send {
                            to_address: last.sender.to_string(),
                            amount: last.funds.clone(),
                        }
                        .into(),
                    );
                }
                msgs.push(helpers::execute(&last.sender, &receiver)?);
            }
            msgs.push(helpers::execute(&core, &receiver)?);
            Ok(Response::default().add_messages(msgs))
        }
    }
}

pub fn query(deps: Deps<KujiraQuery>, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    let icq = ICQ.may_load(deps.storage)?.unwrap_or(Icq {
        delegated: Uint128::zero(),
        balance: Uint128::zero(),
        height: 0,
        time: Timestamp::from_seconds(0),
    });
    match msg {
        QueryMsg::Delegations {} => to_json_binary(&DelegationsResponse {
            total: icq.delegated,
            remote_height: icq.height,
            local_height: icq.height,
            timestamp: icq.time,
        }),
        QueryMsg::Balances {} => to_json_binary(&BalancesResponse {
            amount: icq.balance,
            remote_height: icq.height,
            local_height: icq.height,
            timestamp: icq.time,
        }),
    }
}
