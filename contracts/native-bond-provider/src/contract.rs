#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coins, ensure, ensure_eq, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, Event,
    MessageInfo, Response, Uint128,
};
use cw2::set_contract_version;
use cw_utils::must_pay;
use kujira::{KujiraMsg, KujiraQuery};
use staking::{
    bond_provider::{BondProviderMsg, BondProviderQueryMsg, TxState, TxStatus},
    helpers::Puppeteer,
    puppeteer::{self, ResponseHookMsg, Transaction},
    rates::issue_amount,
    ContractError,
};

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{Config, IN_FLIGHT, NON_STAKED_BALANCE, TX_STATE};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:staking-native-bond-provider";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut<KujiraQuery>,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response<KujiraMsg>, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;
    Config::new(&msg, deps.api)?.save(deps.storage)?;
    NON_STAKED_BALANCE.save(deps.storage, &Uint128::zero())?;
    IN_FLIGHT.save(deps.storage, &Uint128::zero())?;
    TX_STATE.save(deps.storage, &TxState::default())?;
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut<KujiraQuery>,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response<KujiraMsg>, ContractError> {
    let config = Config::load(deps.storage)?;
    match msg {
        ExecuteMsg::BondProvider(BondProviderMsg::Bond {}) => {
            ensure_eq!(
                info.sender,
                config.core_contract,
                ContractError::Unauthorized {}
            );
            let amount = must_pay(&info, &config.base_denom)?;
            let balance = NON_STAKED_BALANCE.load(deps.storage)?.checked_add(amount)?;
            NON_STAKED_BALANCE.save(deps.storage, &balance)?;
            Ok(Response::default().add_event(
                Event::new("staking/native-bond-provider/bond")
                    .add_attribute("amount", amount)
                    .add_attribute("non_staked_balance", balance),
            ))
        }
        ExecuteMsg::BondProvider(BondProviderMsg::ProcessOnIdle { request_id }) => {
            ensure_eq!(
                info.sender,
                config.core_contract,
                ContractError::Unauthorized {}
            );
            let tx_state = TX_STATE.load(deps.storage)?;
            ensure!(
                tx_state.is_idle(),
                ContractError::invalid_state("a delegation is waiting for ack")
            );
            let balance = NON_STAKED_BALANCE.load(deps.storage)?;
            ensure!(
                !balance.is_zero() && balance >= config.min_stake_amount,
                ContractError::BalanceTooLow {
                    balance,
                    minimum: config.min_stake_amount,
                }
            );

            NON_STAKED_BALANCE.save(deps.storage, &Uint128::zero())?;
            IN_FLIGHT.save(deps.storage, &balance)?;
            TX_STATE.save(
                deps.storage,
                &TxState {
                    status: TxStatus::WaitingForAck,
                    request_id: Some(request_id),
                    transaction: Some(Transaction::Delegate { amount: balance }),
                },
            )?;

            let delegate_msg: CosmosMsg<KujiraMsg> = Puppeteer(config.puppeteer_contract).call(
                puppeteer::ExecuteMsg::Delegate { request_id },
                coins(balance.u128(), config.base_denom),
            )?;
            Ok(Response::default().add_message(delegate_msg).add_event(
                Event::new("staking/native-bond-provider/process_on_idle")
                    .add_attribute("request_id", request_id.to_string())
                    .add_attribute("amount", balance),
            ))
        }
        ExecuteMsg::PeripheralHook(msg) => {
            ensure_eq!(
                info.sender,
                config.puppeteer_contract,
                ContractError::Unauthorized {}
            );
            peripheral_hook(deps, env, *msg)
        }
        ExecuteMsg::UpdateConfig { new_config } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            let mut config = config;
            config.update(deps.api, new_config)?;
            config.save(deps.storage)?;
            Ok(Response::default()
                .add_event(Event::new("staking/native-bond-provider/update_config")))
        }
        ExecuteMsg::UpdateOwnership(action) => {
            let ownership =
                cw_ownable::update_ownership(deps.into_empty(), &env.block, &info.sender, action)?;
            Ok(Response::default().add_attributes(ownership.into_attributes()))
        }
    }
}

fn peripheral_hook(
    deps: DepsMut<KujiraQuery>,
    _env: Env,
    msg: ResponseHookMsg,
) -> Result<Response<KujiraMsg>, ContractError> {
    let tx_state = TX_STATE.load(deps.storage)?;
    if tx_state.request_id != Some(msg.request_id()) {
        deps.api.debug(&format!(
            "ignoring response {} while waiting for {:?}",
            msg.request_id(),
            tx_state.request_id
        ));
        return Ok(Response::default());
    }

    let in_flight = IN_FLIGHT.load(deps.storage)?;
    if !msg.is_success() {
        // the puppeteer returns the funds of a failed delegation
        let balance = NON_STAKED_BALANCE.load(deps.storage)?.checked_add(in_flight)?;
        NON_STAKED_BALANCE.save(deps.storage, &balance)?;
    }
    IN_FLIGHT.save(deps.storage, &Uint128::zero())?;
    TX_STATE.save(deps.storage, &TxState::default())?;

    Ok(Response::default().add_event(
        Event::new("staking/native-bond-provider/peripheral_hook")
            .add_attribute("request_id", msg.request_id().to_string())
            .add_attribute("success", msg.is_success().to_string())
            .add_attribute("amount", in_flight),
    ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps<KujiraQuery>, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let config = Config::load(deps.storage)?;
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&config)?),
        QueryMsg::Ownership {} => Ok(to_json_binary(&cw_ownable::get_ownership(deps.storage)?)?),
        QueryMsg::BondProvider(msg) => match msg {
            BondProviderQueryMsg::CanBond { denom } => {
                Ok(to_json_binary(&(denom == config.base_denom))?)
            }
            BondProviderQueryMsg::CanProcessOnIdle {} => {
                let balance = NON_STAKED_BALANCE.load(deps.storage)?;
                let ready = TX_STATE.load(deps.storage)?.is_idle()
                    && !balance.is_zero()
                    && balance >= config.min_stake_amount;
                Ok(to_json_binary(&ready)?)
            }
            BondProviderQueryMsg::NonStakedBalance {} => {
                Ok(to_json_binary(&NON_STAKED_BALANCE.load(deps.storage)?)?)
            }
            BondProviderQueryMsg::AsyncTokensAmount {} => {
                let total = NON_STAKED_BALANCE
                    .load(deps.storage)?
                    .checked_add(IN_FLIGHT.load(deps.storage)?)?;
                Ok(to_json_binary(&total)?)
            }
            BondProviderQueryMsg::TokensAmount {
                coin,
                exchange_rate,
            } => {
                ensure_eq!(
                    coin.denom,
                    config.base_denom,
                    ContractError::InvalidDenom {
                        expected: config.base_denom
                    }
                );
                Ok(to_json_binary(&issue_amount(coin.amount, exchange_rate)?)?)
            }
            BondProviderQueryMsg::TxState {} => {
                Ok(to_json_binary(&TX_STATE.load(deps.storage)?)?)
            }
        },
    }
}
