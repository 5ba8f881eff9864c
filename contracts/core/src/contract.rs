#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, Event,
    MessageInfo, Response, Uint128, Uint64,
};
use cw2::set_contract_version;
use cw_ownable::OwnershipError;
use cw_utils::{must_pay, one_coin};
use kujira::{DenomMsg, KujiraMsg, KujiraQuery};
use staking::{
    bond_provider::{BondProvider, Provider},
    core::{
        BondCallbackMsg, BondHook, ConfigOptional, ConfigResponse, ContractState, ExecuteMsg,
        FailedBatchResponse, InstantiateMsg, LastPuppeteerResponse, Pause, QueryMsg, RequestKind,
        UnbondBatchStatus, UnbondBatchesResponse,
    },
    helpers,
    puppeteer::{self, ResponseHookMsg, Transaction, TransferReadyBatchesMsg},
    rates::{native_amount, RateInputs},
    voucher, ContractError,
};

use crate::batch::{split_withdrawals, Ledger};
use crate::config::Config;
use crate::gate::Gate;
use crate::ica::{seen_height, Unseen};
use crate::providers::{
    ensure_not_busy, select_for_advance, select_for_bond, total_async_tokens, Registry,
};
use crate::state::{
    ensure_not_paused, Fsm, PauseAction, BOND_HOOKS, LAST_ICA_CHANGE_HEIGHT, LAST_IDLE_CALL,
    LD_SUPPLY, PAUSE, TOTAL_BONDED,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:staking-core";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

fn event(action: &str) -> Event {
    Event::new(format!("staking/core/{}", action))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut<KujiraQuery>,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response<KujiraMsg>, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;

    let subdenom = msg.subdenom.clone();
    let config = Config::new(msg, deps.api, &env)?;
    config.save(deps.storage)?;

    Fsm::init(deps.storage)?;
    Ledger::init(deps.storage, env.block.time.seconds())?;
    Registry::init(deps.storage)?;
    TOTAL_BONDED.save(deps.storage, &Uint128::zero())?;
    LD_SUPPLY.save(deps.storage, &Uint128::zero())?;
    PAUSE.save(deps.storage, &Pause::default())?;
    BOND_HOOKS.save(deps.storage, &vec![])?;
    LAST_ICA_CHANGE_HEIGHT.save(deps.storage, &0)?;

    Ok(Response::default()
        .add_message(DenomMsg::Create {
            subdenom: subdenom.into(),
        })
        .add_event(event("instantiate").add_attribute("ld_denom", config.ld_denom.to_string())))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut<KujiraQuery>,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response<KujiraMsg>, ContractError> {
    match msg {
        ExecuteMsg::Bond { receiver, r#ref } => bond(deps, info, receiver, r#ref),
        ExecuteMsg::Unbond { receiver } => unbond(deps, info, receiver),
        ExecuteMsg::Tick {} => tick(deps, env),
        ExecuteMsg::PeripheralHook(msg) => peripheral_hook(deps, env, info, *msg),
        ExecuteMsg::UpdateWithdrawnAmount {
            batch_id,
            withdrawn_amount,
        } => {
            let config = Config::load(deps.storage)?;
            ensure_eq!(
                info.sender,
                config.withdrawal_manager_contract,
                ContractError::Unauthorized {}
            );
            let batch = Ledger::record_withdrawn(
                deps.storage,
                batch_id,
                withdrawn_amount,
                env.block.time.seconds(),
            )?;
            Ok(Response::default().add_event(
                event("update_withdrawn_amount")
                    .add_attribute("batch_id", batch_id.to_string())
                    .add_attribute("status", batch.status.to_string())
                    .add_attribute("withdrawn_amount", withdrawn_amount),
            ))
        }
        ExecuteMsg::AddBondProvider {
            bond_provider_address,
        } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            let address = deps.api.addr_validate(&bond_provider_address)?;
            Registry::add(deps.storage, address.clone())?;
            Ok(Response::default()
                .add_event(event("add_bond_provider").add_attribute("provider", address)))
        }
        ExecuteMsg::RemoveBondProvider {
            bond_provider_address,
        } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            let address = deps.api.addr_validate(&bond_provider_address)?;
            let pending = Gate::pending(deps.storage)?;
            ensure_not_busy(
                &Provider::from(address.clone()),
                &address,
                deps.querier,
                pending.as_ref(),
            )?;
            Registry::remove(deps.storage, &address)?;
            Ok(Response::default()
                .add_event(event("remove_bond_provider").add_attribute("provider", address)))
        }
        ExecuteMsg::UpdateConfig { new_config } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            update_config(deps, *new_config)
        }
        ExecuteMsg::ResetBondedAmount {} => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            TOTAL_BONDED.save(deps.storage, &Uint128::zero())?;
            Ok(Response::default().add_event(event("reset_bonded_amount")))
        }
        ExecuteMsg::ProcessEmergencyBatch {
            batch_id,
            unbonded_amount,
        } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            let config = Config::load(deps.storage)?;
            ensure!(
                config.emergency_address.is_some(),
                ContractError::EmergencyAddressIsNotSet {}
            );
            let batch = Ledger::process_emergency(
                deps.storage,
                batch_id,
                unbonded_amount,
                env.block.time.seconds(),
            )?;
            let mut event = event("process_emergency_batch")
                .add_attribute("batch_id", batch_id.to_string())
                .add_attribute("unbonded_amount", unbonded_amount);
            if let Some(slashing_effect) = batch.slashing_effect {
                event = event.add_attribute("slashing_effect", slashing_effect.to_string());
            }
            Ok(Response::default().add_event(event))
        }
        ExecuteMsg::SetPause(pause) => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            PAUSE.save(deps.storage, &pause)?;
            Ok(Response::default().add_event(
                event("set_pause")
                    .add_attribute("bond", pause.bond.to_string())
                    .add_attribute("unbond", pause.unbond.to_string())
                    .add_attribute("tick", pause.tick.to_string()),
            ))
        }
        ExecuteMsg::SetBondHooks { hooks } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            let hooks = hooks
                .iter()
                .map(|hook| deps.api.addr_validate(hook))
                .collect::<Result<Vec<Addr>, _>>()?;
            BOND_HOOKS.save(deps.storage, &hooks)?;
            Ok(Response::default()
                .add_event(event("set_bond_hooks").add_attribute("count", hooks.len().to_string())))
        }
        ExecuteMsg::UpdateOwnership(action) => {
            let ownership =
                cw_ownable::update_ownership(deps.into_empty(), &env.block, &info.sender, action)?;
            Ok(Response::default().add_attributes(ownership.into_attributes()))
        }
    }
}

fn update_config(
    deps: DepsMut<KujiraQuery>,
    new_config: ConfigOptional,
) -> Result<Response<KujiraMsg>, ContractError> {
    let mut config = Config::load(deps.storage)?;
    config.update(deps.api, new_config)?;
    config.save(deps.storage)?;
    Ok(Response::default().add_event(event("update_config")))
}

fn rate_inputs(deps: Deps<KujiraQuery>, config: &Config) -> Result<RateInputs, ContractError> {
    let delegations = config.puppeteer().delegations(deps.querier)?;
    let providers = Registry::all(deps.storage)?;
    Ok(RateInputs {
        delegated: Unseen::delegated(deps.storage, &delegations, config.icq_update_delay)?,
        async_tokens: total_async_tokens(&providers, deps.querier)?,
        ld_supply: LD_SUPPLY.load(deps.storage)?,
        unbond_liability: Ledger::unbond_liability(deps.storage)?,
    })
}

fn bond(
    deps: DepsMut<KujiraQuery>,
    info: MessageInfo,
    receiver: Option<String>,
    r#ref: Option<String>,
) -> Result<Response<KujiraMsg>, ContractError> {
    ensure_not_paused(deps.storage, PauseAction::Bond)?;
    let config = Config::load(deps.storage)?;
    let coin = one_coin(&info)?;

    let total_bonded = TOTAL_BONDED.load(deps.storage)?.checked_add(coin.amount)?;
    if let Some(limit) = config.bond_limit {
        ensure!(total_bonded <= limit, ContractError::BondLimitExceeded {});
    }

    let providers = Registry::all(deps.storage)?;
    let provider = select_for_bond(&providers, deps.querier, &coin.denom)?;

    // priced before these funds count towards async tokens
    let inputs = rate_inputs(deps.as_ref(), &config)?;
    let exchange_rate = inputs.exchange_rate()?;
    deps.api
        .debug(&format!("bond rate inputs {}", String::from(inputs)));
    let issue_amount = provider.tokens_amount(deps.querier, &coin, exchange_rate)?;
    ensure!(!issue_amount.is_zero(), ContractError::ZeroIssueAmount {});

    let receiver = match receiver {
        Some(receiver) => deps.api.addr_validate(&receiver)?,
        None => info.sender.clone(),
    };

    TOTAL_BONDED.save(deps.storage, &total_bonded)?;
    let ld_supply = LD_SUPPLY.load(deps.storage)?.checked_add(issue_amount)?;
    LD_SUPPLY.save(deps.storage, &ld_supply)?;

    let mut msgs: Vec<CosmosMsg<KujiraMsg>> = vec![
        provider.bond(coin.clone())?,
        DenomMsg::Mint {
            denom: config.ld_denom.clone(),
            amount: issue_amount,
            recipient: receiver.clone(),
        }
        .into(),
    ];

    let hook = BondCallbackMsg::BondCallback(BondHook {
        r#ref: r#ref.clone(),
        sender: info.sender.clone(),
        denom: coin.denom.clone(),
        amount: coin.amount,
        dasset_minted: issue_amount,
    });
    for address in BOND_HOOKS.load(deps.storage)? {
        msgs.push(helpers::execute(&address, &hook)?);
    }

    let mut event = event("bond")
        .add_attribute("sender", info.sender)
        .add_attribute("receiver", receiver)
        .add_attribute("provider", provider.addr())
        .add_attribute("amount", coin.to_string())
        .add_attribute("exchange_rate", exchange_rate.to_string())
        .add_attribute("issue_amount", issue_amount);
    if let Some(r#ref) = r#ref {
        event = event.add_attribute("ref", r#ref);
    }

    Ok(Response::default().add_messages(msgs).add_event(event))
}

fn unbond(
    deps: DepsMut<KujiraQuery>,
    info: MessageInfo,
    receiver: Option<String>,
) -> Result<Response<KujiraMsg>, ContractError> {
    ensure_not_paused(deps.storage, PauseAction::Unbond)?;
    let config = Config::load(deps.storage)?;
    let amount = must_pay(&info, &config.ld_denom.to_string())?;
    let owner = match receiver {
        Some(receiver) => deps.api.addr_validate(&receiver)?,
        None => info.sender.clone(),
    };

    let batch_id = Ledger::current_batch_id(deps.storage)?;
    let sequence = Ledger::append_unbond(deps.storage, batch_id, amount)?;
    let ld_supply = LD_SUPPLY.load(deps.storage)?.checked_sub(amount)?;
    LD_SUPPLY.save(deps.storage, &ld_supply)?;

    let burn_msg = DenomMsg::Burn {
        denom: config.ld_denom,
        amount,
    };
    let token_id = voucher::token_id(batch_id, owner.as_str(), sequence);
    let voucher_msg: CosmosMsg<KujiraMsg> = helpers::execute(
        &config.withdrawal_voucher_contract,
        &voucher::ExecuteMsg::Mint {
            token_id: token_id.clone(),
            owner: owner.to_string(),
            token_uri: None,
            extension: Some(voucher::Extension {
                unbond_batch_id: batch_id.to_string(),
                received_amount: amount,
            }),
        },
    )?;

    Ok(Response::default()
        .add_message(burn_msg)
        .add_message(voucher_msg)
        .add_event(
            event("unbond")
                .add_attribute("owner", owner)
                .add_attribute("batch_id", batch_id.to_string())
                .add_attribute("amount", amount)
                .add_attribute("token_id", token_id),
        ))
}

fn peripheral_hook(
    deps: DepsMut<KujiraQuery>,
    env: Env,
    info: MessageInfo,
    msg: ResponseHookMsg,
) -> Result<Response<KujiraMsg>, ContractError> {
    let config = Config::load(deps.storage)?;
    ensure_eq!(
        info.sender,
        config.puppeteer_contract,
        ContractError::Unauthorized {}
    );
    let request_id = msg.request_id();
    let success = msg.is_success();
    let delegated = match msg.transaction() {
        Transaction::Delegate { amount } if success => Some(*amount),
        _ => None,
    };
    let correlated = Gate::record_response(deps.storage, msg)?;
    if correlated {
        // the provider stops counting these tokens as soon as it sees the ack
        if let Some(amount) = delegated {
            Unseen::record_delegated(deps.storage, env.block.height, amount)?;
        }
    } else {
        deps.api
            .debug(&format!("puppeteer response {} answers nothing pending", request_id));
    }
    Ok(Response::default().add_event(
        event("peripheral_hook")
            .add_attribute("request_id", request_id.to_string())
            .add_attribute("success", success.to_string())
            .add_attribute("correlated", correlated.to_string()),
    ))
}

fn tick(deps: DepsMut<KujiraQuery>, env: Env) -> Result<Response<KujiraMsg>, ContractError> {
    ensure_not_paused(deps.storage, PauseAction::Tick)?;
    let config = Config::load(deps.storage)?;
    match Fsm::current(deps.storage)? {
        ContractState::Idle => tick_idle(deps, env, config),
        ContractState::Peripheral => tick_peripheral(deps, env),
        ContractState::Claiming => tick_claiming(deps, env, config),
        ContractState::Unbonding => tick_unbonding(deps, env, config),
    }
}

fn tick_event(from: ContractState, to: ContractState) -> Event {
    event("tick")
        .add_attribute("from", from.to_string())
        .add_attribute("to", to.to_string())
}

fn idle_noop(reason: &str) -> Response<KujiraMsg> {
    Response::default().add_event(
        tick_event(ContractState::Idle, ContractState::Idle).add_attribute("skipped", reason),
    )
}

fn tick_idle(
    deps: DepsMut<KujiraQuery>,
    env: Env,
    config: Config,
) -> Result<Response<KujiraMsg>, ContractError> {
    let now = env.block.time.seconds();

    let providers = Registry::all(deps.storage)?;
    if let Some(provider) = select_for_advance(&providers, deps.querier)? {
        let request_id = Gate::dispatch(
            deps.storage,
            RequestKind::Peripheral {
                provider: provider.addr(),
            },
        )?;
        Fsm::go_to(deps.storage, ContractState::Peripheral)?;
        return Ok(Response::default()
            .add_message(provider.process_on_idle::<KujiraMsg>(request_id)?)
            .add_event(
                tick_event(ContractState::Idle, ContractState::Peripheral)
                    .add_attribute("provider", provider.addr())
                    .add_attribute("request_id", request_id.to_string()),
            ));
    }

    if let Some(last_idle_call) = LAST_IDLE_CALL.may_load(deps.storage)? {
        if now < last_idle_call.saturating_add(config.idle_min_interval) {
            return Ok(idle_noop("idle_min_interval"));
        }
    }

    let puppeteer = config.puppeteer();
    let delegations = puppeteer.delegations(deps.querier)?;
    Unseen::prune(
        deps.storage,
        delegations.local_height,
        config.icq_update_delay,
    )?;
    let last_ica_change = LAST_ICA_CHANGE_HEIGHT.load(deps.storage)?;
    if delegations.local_height < seen_height(last_ica_change, config.icq_update_delay) {
        deps.api.debug(&format!(
            "delegations at {} not past ica change at {}",
            delegations.local_height, last_ica_change
        ));
        return Ok(idle_noop("icq_not_updated"));
    }

    let mut withdrawals = vec![];
    let mut transfer = None;
    if let Some(pump) = config.pump_ica_address.clone() {
        let balances = puppeteer.balances(deps.querier)?;
        if !balances.amount.is_zero() {
            let due = Ledger::withdrawable(deps.storage, now, balances.timestamp.seconds())?;
            withdrawals = split_withdrawals(&due, balances.amount)?;
        }
        if !withdrawals.is_empty() {
            let mut amount = Uint128::zero();
            for withdrawal in &withdrawals {
                amount = amount.checked_add(withdrawal.unbonded_amount)?;
            }
            transfer = Some(TransferReadyBatchesMsg {
                batch_ids: withdrawals.iter().map(|w| w.batch_id).collect(),
                emergency: false,
                amount,
                recipient: pump,
            });
        }
    }

    let unbond_batch_id = match Ledger::failed_batch_id(deps.storage)? {
        Some(failed) => Some(failed),
        None if Ledger::is_switch_due(deps.storage, now, config.unbond_batch_switch_time)? => {
            Some(Ledger::close_current_batch(deps.storage, now)?)
        }
        None => None,
    };

    if withdrawals.is_empty() && unbond_batch_id.is_none() {
        return Ok(idle_noop("nothing_to_do"));
    }

    let withdrawing = withdrawals.len();
    let request_id = Gate::dispatch(
        deps.storage,
        RequestKind::Claim {
            withdrawals,
            unbond_batch_id,
        },
    )?;
    LAST_IDLE_CALL.save(deps.storage, &now)?;
    Fsm::go_to(deps.storage, ContractState::Claiming)?;

    let claim_msg: CosmosMsg<KujiraMsg> = puppeteer.call(
        puppeteer::ExecuteMsg::ClaimRewardsAndOptionalyTransfer {
            request_id,
            transfer,
        },
        vec![],
    )?;
    let mut event = tick_event(ContractState::Idle, ContractState::Claiming)
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("withdrawing_batches", withdrawing.to_string());
    if let Some(batch_id) = unbond_batch_id {
        event = event.add_attribute("unbond_batch_id", batch_id.to_string());
    }
    Ok(Response::default().add_message(claim_msg).add_event(event))
}

fn tick_peripheral(
    deps: DepsMut<KujiraQuery>,
    env: Env,
) -> Result<Response<KujiraMsg>, ContractError> {
    let (pending, response) = Gate::require_fresh_response(deps.storage)?;
    Gate::consume(deps.storage);
    if response.is_success() {
        LAST_ICA_CHANGE_HEIGHT.save(deps.storage, &env.block.height)?;
    }
    Fsm::go_to(deps.storage, ContractState::Idle)?;
    Ok(Response::default().add_event(
        tick_event(ContractState::Peripheral, ContractState::Idle)
            .add_attribute("request_id", pending.request_id.to_string())
            .add_attribute("success", response.is_success().to_string()),
    ))
}

fn tick_claiming(
    deps: DepsMut<KujiraQuery>,
    env: Env,
    config: Config,
) -> Result<Response<KujiraMsg>, ContractError> {
    let (pending, response) = Gate::require_fresh_response(deps.storage)?;
    let RequestKind::Claim {
        withdrawals,
        unbond_batch_id,
    } = pending.kind
    else {
        return Err(ContractError::invalid_state(
            "claiming without a pending claim",
        ));
    };
    Gate::consume(deps.storage);
    let now = env.block.time.seconds();

    if response.is_success() {
        for withdrawal in &withdrawals {
            // an emergency recovery may have settled the batch meanwhile
            if Ledger::load(deps.storage, withdrawal.batch_id)?.status
                != UnbondBatchStatus::Unbonding
            {
                continue;
            }
            Ledger::record_unbonded(
                deps.storage,
                withdrawal.batch_id,
                withdrawal.unbonded_amount,
                now,
            )?;
        }
        LAST_ICA_CHANGE_HEIGHT.save(deps.storage, &env.block.height)?;
    }

    let Some(batch_id) = unbond_batch_id else {
        Fsm::go_to(deps.storage, ContractState::Idle)?;
        return Ok(Response::default().add_event(
            tick_event(ContractState::Claiming, ContractState::Idle)
                .add_attribute("request_id", pending.request_id.to_string())
                .add_attribute("success", response.is_success().to_string()),
        ));
    };

    let batch = Ledger::load(deps.storage, batch_id)?;
    let exchange_rate = rate_inputs(deps.as_ref(), &config)?.exchange_rate()?;
    let amount = native_amount(batch.total_dasset_amount_to_withdraw, exchange_rate)?;
    let request_id = Gate::dispatch(deps.storage, RequestKind::Undelegate { batch_id, amount })?;
    Fsm::go_to(deps.storage, ContractState::Unbonding)?;

    let undelegate_msg: CosmosMsg<KujiraMsg> = config.puppeteer().call(
        puppeteer::ExecuteMsg::Undelegate {
            request_id,
            batch_id,
            amount,
        },
        vec![],
    )?;
    Ok(Response::default().add_message(undelegate_msg).add_event(
        tick_event(ContractState::Claiming, ContractState::Unbonding)
            .add_attribute("claim_success", response.is_success().to_string())
            .add_attribute("request_id", request_id.to_string())
            .add_attribute("batch_id", batch_id.to_string())
            .add_attribute("exchange_rate", exchange_rate.to_string())
            .add_attribute("amount", amount),
    ))
}

fn tick_unbonding(
    deps: DepsMut<KujiraQuery>,
    env: Env,
    config: Config,
) -> Result<Response<KujiraMsg>, ContractError> {
    let (pending, response) = Gate::require_fresh_response(deps.storage)?;
    let RequestKind::Undelegate { batch_id, amount } = pending.kind else {
        return Err(ContractError::invalid_state(
            "unbonding without a pending undelegation",
        ));
    };
    Gate::consume(deps.storage);
    let now = env.block.time.seconds();

    let mut event = tick_event(ContractState::Unbonding, ContractState::Idle)
        .add_attribute("request_id", pending.request_id.to_string())
        .add_attribute("batch_id", batch_id.to_string());
    if response.is_success() {
        let batch =
            Ledger::begin_unbonding(deps.storage, batch_id, amount, now, config.release_time(now))?;
        Unseen::record_undelegated(deps.storage, env.block.height, amount)?;
        LAST_ICA_CHANGE_HEIGHT.save(deps.storage, &env.block.height)?;
        event = event.add_attribute("status", batch.status.to_string());
    } else {
        Ledger::mark_failed(deps.storage, batch_id, now)?;
        event = event.add_attribute("status", UnbondBatchStatus::UnbondFailed.to_string());
    }
    Fsm::go_to(deps.storage, ContractState::Idle)?;
    Ok(Response::default().add_event(event))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps<KujiraQuery>, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&ConfigResponse::from(Config::load(
            deps.storage,
        )?))?),
        QueryMsg::Owner {} => {
            let owner = cw_ownable::get_ownership(deps.storage)?
                .owner
                .ok_or(OwnershipError::NoOwner)?;
            Ok(to_json_binary(&owner.to_string())?)
        }
        QueryMsg::Ownership {} => Ok(to_json_binary(&cw_ownable::get_ownership(deps.storage)?)?),
        QueryMsg::ExchangeRate {} => {
            let config = Config::load(deps.storage)?;
            Ok(to_json_binary(&rate_inputs(deps, &config)?.exchange_rate()?)?)
        }
        QueryMsg::CurrentUnbondBatch {} => Ok(to_json_binary(&Uint64::from(
            Ledger::current_batch_id(deps.storage)?,
        ))?),
        QueryMsg::UnbondBatch { batch_id } => {
            Ok(to_json_binary(&Ledger::load(deps.storage, batch_id.u64())?)?)
        }
        QueryMsg::UnbondBatches { limit, page_key } => {
            let (unbond_batches, next_page_key) = Ledger::page(
                deps.storage,
                limit.map(|l| l.u64()),
                page_key.map(|k| k.u64()),
            )?;
            Ok(to_json_binary(&UnbondBatchesResponse {
                unbond_batches,
                next_page_key: next_page_key.map(Uint64::from),
            })?)
        }
        QueryMsg::ContractState {} => Ok(to_json_binary(&Fsm::current(deps.storage)?)?),
        QueryMsg::LastPuppeteerResponse {} => Ok(to_json_binary(&LastPuppeteerResponse {
            response: Gate::last_response(deps.storage)?,
        })?),
        QueryMsg::PendingRequest {} => Ok(to_json_binary(&Gate::pending(deps.storage)?)?),
        QueryMsg::TotalBonded {} => Ok(to_json_binary(&TOTAL_BONDED.load(deps.storage)?)?),
        QueryMsg::TotalLdSupply {} => Ok(to_json_binary(&LD_SUPPLY.load(deps.storage)?)?),
        QueryMsg::BondProviders {} => {
            let providers = Registry::addresses(deps.storage)?
                .into_iter()
                .map(|a| a.to_string())
                .collect::<Vec<String>>();
            Ok(to_json_binary(&providers)?)
        }
        QueryMsg::TotalAsyncTokens {} => {
            let providers = Registry::all(deps.storage)?;
            Ok(to_json_binary(&total_async_tokens(
                &providers,
                deps.querier,
            )?)?)
        }
        QueryMsg::FailedBatch {} => Ok(to_json_binary(&FailedBatchResponse {
            response: Ledger::failed_batch_id(deps.storage)?,
        })?),
        QueryMsg::Pause {} => Ok(to_json_binary(
            &PAUSE.may_load(deps.storage)?.unwrap_or_default(),
        )?),
        QueryMsg::BondHooks {} => {
            let hooks = BOND_HOOKS
                .may_load(deps.storage)?
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.to_string())
                .collect::<Vec<String>>();
            Ok(to_json_binary(&hooks)?)
        }
    }
}
