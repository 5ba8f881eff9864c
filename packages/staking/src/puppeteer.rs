use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Timestamp, Uint128};

/// Instructions the puppeteer executes on the remote chain through its ICA.
/// Every instruction carries the `request_id` of whoever dispatched it; the
/// puppeteer echoes it back in the [`ResponseHookMsg`].
#[cw_serde]
pub enum ExecuteMsg {
    /// Delegate the attached funds once they reach the ICA
    Delegate { request_id: u64 },
    Undelegate {
        request_id: u64,
        batch_id: u64,
        amount: Uint128,
    },
    ClaimRewardsAndOptionalyTransfer {
        request_id: u64,
        transfer: Option<TransferReadyBatchesMsg>,
    },
}

#[cw_serde]
pub struct TransferReadyBatchesMsg {
    pub batch_ids: Vec<u64>,
    pub emergency: bool,
    pub amount: Uint128,
    pub recipient: String,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Interchain query of everything delegated by the ICA
    #[returns(DelegationsResponse)]
    Delegations {},
    /// Interchain query of the ICA's liquid balance in the remote denom
    #[returns(BalancesResponse)]
    Balances {},
}

#[cw_serde]
pub struct DelegationsResponse {
    pub total: Uint128,
    pub remote_height: u64,
    pub local_height: u64,
    pub timestamp: Timestamp,
}

#[cw_serde]
pub struct BalancesResponse {
    pub amount: Uint128,
    pub remote_height: u64,
    pub local_height: u64,
    pub timestamp: Timestamp,
}

/// What the puppeteer did, as reported back to the dispatcher
#[cw_serde]
pub enum Transaction {
    Delegate {
        amount: Uint128,
    },
    Undelegate {
        batch_id: u64,
        amount: Uint128,
    },
    ClaimRewardsAndOptionalyTransfer {
        transfer: Option<TransferReadyBatchesMsg>,
    },
}

#[cw_serde]
pub struct RequestPacket {
    pub sequence: Option<u64>,
    pub source_port: Option<String>,
    pub source_channel: Option<String>,
    pub destination_port: Option<String>,
    pub destination_channel: Option<String>,
    pub data: Option<Binary>,
}

#[cw_serde]
pub enum ResponseAnswer {
    DelegateResponse {},
    UndelegateResponse { completion_time: Option<Timestamp> },
    ClaimResponse {},
    TransferResponse {},
    UnknownResponse {},
}

#[cw_serde]
pub enum ResponseHookMsg {
    Success(ResponseHookSuccessMsg),
    Error(ResponseHookErrorMsg),
}

#[cw_serde]
pub struct ResponseHookSuccessMsg {
    pub request_id: u64,
    pub request: RequestPacket,
    pub transaction: Transaction,
    pub answers: Vec<ResponseAnswer>,
    pub local_height: u64,
    pub remote_height: u64,
}

#[cw_serde]
pub struct ResponseHookErrorMsg {
    pub request_id: u64,
    pub request: RequestPacket,
    pub transaction: Transaction,
    pub details: String,
}

impl ResponseHookMsg {
    pub fn request_id(&self) -> u64 {
        match self {
            ResponseHookMsg::Success(success) => success.request_id,
            ResponseHookMsg::Error(error) => error.request_id,
        }
    }

    pub fn transaction(&self) -> &Transaction {
        match self {
            ResponseHookMsg::Success(success) => &success.transaction,
            ResponseHookMsg::Error(error) => &error.transaction,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseHookMsg::Success(_))
    }
}

/// The message a hook receiver must accept
#[cw_serde]
pub enum ReceiverExecuteMsg {
    PeripheralHook(Box<ResponseHookMsg>),
}
