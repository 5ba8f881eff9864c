use cosmwasm_std::{coins, Addr, Decimal, Uint128, Uint64};
use cw_multi_test::{AppResponse, Executor};
use kujira_rs_testing::mock::CustomApp;
use staking::{
    core::{
        ConfigOptional, ConfigResponse, ContractState, ExecuteMsg, FailedBatchResponse,
        LastPuppeteerResponse, Pause, PendingRequest, QueryMsg, UnbondBatch,
        UnbondBatchesResponse,
    },
    ContractError,
};

use super::puppeteer::ExecuteMsg as PuppeteerControl;
use super::tests::Contracts;

pub fn assert_error(err: anyhow::Error, expected: ContractError) {
    assert_eq!(err.root_cause().to_string(), expected.to_string());
}

pub fn next_block(app: &mut CustomApp, blocks: u64, seconds: u64) {
    app.update_block(|block| {
        block.height += blocks;
        block.time = block.time.plus_seconds(seconds);
    });
}

pub fn bond(
    app: &mut CustomApp,
    contracts: &Contracts,
    sender: &Addr,
    amount: u128,
    denom: &str,
    r#ref: Option<&str>,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        sender.clone(),
        contracts.core.clone(),
        &ExecuteMsg::Bond {
            receiver: None,
            r#ref: r#ref.map(String::from),
        },
        &coins(amount, denom),
    )
}

pub fn unbond(
    app: &mut CustomApp,
    contracts: &Contracts,
    sender: &Addr,
    amount: u128,
) -> anyhow::Result<AppResponse> {
    let ld_denom = query_config(app, contracts).ld_denom;
    app.execute_contract(
        sender.clone(),
        contracts.core.clone(),
        &ExecuteMsg::Unbond { receiver: None },
        &coins(amount, ld_denom),
    )
}

pub fn tick(app: &mut CustomApp, contracts: &Contracts) -> anyhow::Result<AppResponse> {
    let keeper = app.api().addr_make("keeper");
    app.execute_contract(keeper, contracts.core.clone(), &ExecuteMsg::Tick {}, &[])
}

pub fn owner_execute(
    app: &mut CustomApp,
    contracts: &Contracts,
    msg: ExecuteMsg,
) -> anyhow::Result<AppResponse> {
    let owner = app.api().addr_make("owner");
    app.execute_contract(owner, contracts.core.clone(), &msg, &[])
}

pub fn set_pause(
    app: &mut CustomApp,
    contracts: &Contracts,
    pause: Pause,
) -> anyhow::Result<AppResponse> {
    owner_execute(app, contracts, ExecuteMsg::SetPause(pause))
}

pub fn update_config(
    app: &mut CustomApp,
    contracts: &Contracts,
    new_config: ConfigOptional,
) -> anyhow::Result<AppResponse> {
    owner_execute(
        app,
        contracts,
        ExecuteMsg::UpdateConfig {
            new_config: Box::new(new_config),
        },
    )
}

pub fn update_withdrawn_amount(
    app: &mut CustomApp,
    contracts: &Contracts,
    sender: &Addr,
    batch_id: u64,
    withdrawn_amount: u128,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        sender.clone(),
        contracts.core.clone(),
        &ExecuteMsg::UpdateWithdrawnAmount {
            batch_id,
            withdrawn_amount: Uint128::new(withdrawn_amount),
        },
        &[],
    )
}

/// Publishes delegations and ICA balance as seen at the current block
pub fn set_icq(
    app: &mut CustomApp,
    contracts: &Contracts,
    delegated: u128,
    balance: u128,
) -> anyhow::Result<AppResponse> {
    let relayer = app.api().addr_make("relayer");
    app.execute_contract(
        relayer,
        contracts.puppeteer.clone(),
        &PuppeteerControl::SetIcq {
            delegated: Uint128::new(delegated),
            balance: Uint128::new(balance),
        },
        &[],
    )
}

pub fn respond(
    app: &mut CustomApp,
    contracts: &Contracts,
    success: bool,
) -> anyhow::Result<AppResponse> {
    respond_as(app, contracts, success, None)
}

pub fn respond_as(
    app: &mut CustomApp,
    contracts: &Contracts,
    success: bool,
    request_id: Option<u64>,
) -> anyhow::Result<AppResponse> {
    let relayer = app.api().addr_make("relayer");
    app.execute_contract(
        relayer,
        contracts.puppeteer.clone(),
        &PuppeteerControl::Respond {
            success,
            request_id,
        },
        &[],
    )
}

pub fn query_config(app: &CustomApp, contracts: &Contracts) -> ConfigResponse {
    app.wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::Config {})
        .unwrap()
}

pub fn query_state(app: &CustomApp, contracts: &Contracts) -> ContractState {
    app.wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::ContractState {})
        .unwrap()
}

pub fn query_exchange_rate(app: &CustomApp, contracts: &Contracts) -> Decimal {
    app.wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::ExchangeRate {})
        .unwrap()
}

pub fn query_batch(app: &CustomApp, contracts: &Contracts, batch_id: u64) -> UnbondBatch {
    app.wrap()
        .query_wasm_smart(
            &contracts.core,
            &QueryMsg::UnbondBatch {
                batch_id: Uint64::new(batch_id),
            },
        )
        .unwrap()
}

pub fn query_batches(
    app: &CustomApp,
    contracts: &Contracts,
    limit: Option<u64>,
    page_key: Option<u64>,
) -> UnbondBatchesResponse {
    app.wrap()
        .query_wasm_smart(
            &contracts.core,
            &QueryMsg::UnbondBatches {
                limit: limit.map(Uint64::new),
                page_key: page_key.map(Uint64::new),
            },
        )
        .unwrap()
}

pub fn query_current_batch(app: &CustomApp, contracts: &Contracts) -> u64 {
    let id: Uint64 = app
        .wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::CurrentUnbondBatch {})
        .unwrap();
    id.u64()
}

pub fn query_pending(app: &CustomApp, contracts: &Contracts) -> Option<PendingRequest> {
    app.wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::PendingRequest {})
        .unwrap()
}

pub fn query_last_response(app: &CustomApp, contracts: &Contracts) -> LastPuppeteerResponse {
    app.wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::LastPuppeteerResponse {})
        .unwrap()
}

pub fn query_failed_batch(app: &CustomApp, contracts: &Contracts) -> Option<u64> {
    let res: FailedBatchResponse = app
        .wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::FailedBatch {})
        .unwrap();
    res.response
}

pub fn query_total_bonded(app: &CustomApp, contracts: &Contracts) -> Uint128 {
    app.wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::TotalBonded {})
        .unwrap()
}

pub fn query_ld_supply(app: &CustomApp, contracts: &Contracts) -> Uint128 {
    app.wrap()
        .query_wasm_smart(&contracts.core, &QueryMsg::TotalLdSupply {})
        .unwrap()
}

pub fn query_ld_balance(app: &CustomApp, contracts: &Contracts, owner: &Addr) -> Uint128 {
    let ld_denom = query_config(app, contracts).ld_denom;
    app.wrap().query_balance(owner, ld_denom).unwrap().amount
}

/// The reason a tick skipped its work, if it did
pub fn skipped_reason(res: &AppResponse) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm-staking/core/tick")
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == "skipped")
        .map(|a| a.value.clone())
}
