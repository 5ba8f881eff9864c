use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Item;
use staking::{
    core::{PendingRequest, RequestKind},
    puppeteer::{ResponseHookMsg, Transaction},
    ContractError,
};

const PENDING_REQUEST: Item<PendingRequest> = Item::new("pending_request");
const LAST_PUPPETEER_RESPONSE: Item<ResponseHookMsg> = Item::new("last_puppeteer_response");
const REQUEST_SEQ: Item<u64> = Item::new("request_seq");

/// Tracks the single remote operation Core is waiting on, and the puppeteer
/// response that answers it.
pub struct Gate;

fn qualifies(kind: &RequestKind, transaction: &Transaction) -> bool {
    match (kind, transaction) {
        // providers choose their own remote operation
        (RequestKind::Peripheral { .. }, _) => true,
        (RequestKind::Claim { .. }, Transaction::ClaimRewardsAndOptionalyTransfer { .. }) => true,
        (
            RequestKind::Undelegate { batch_id, .. },
            Transaction::Undelegate {
                batch_id: answered, ..
            },
        ) => batch_id == answered,
        _ => false,
    }
}

impl Gate {
    /// Opens a new request and returns its correlation id
    pub fn dispatch(storage: &mut dyn Storage, kind: RequestKind) -> Result<u64, ContractError> {
        if let Some(pending) = PENDING_REQUEST.may_load(storage)? {
            return Err(ContractError::invalid_state(format!(
                "request {} is still in flight",
                pending.request_id
            )));
        }
        let request_id = REQUEST_SEQ.may_load(storage)?.unwrap_or_default() + 1;
        REQUEST_SEQ.save(storage, &request_id)?;
        PENDING_REQUEST.save(
            storage,
            &PendingRequest {
                request_id,
                kind,
                response: None,
            },
        )?;
        Ok(request_id)
    }

    /// Stores `msg` as the latest response. Returns true when it answers the
    /// pending request; anything else is kept for observability only.
    pub fn record_response(
        storage: &mut dyn Storage,
        msg: ResponseHookMsg,
    ) -> Result<bool, ContractError> {
        LAST_PUPPETEER_RESPONSE.save(storage, &msg)?;
        match PENDING_REQUEST.may_load(storage)? {
            Some(mut pending)
                if pending.response.is_none()
                    && pending.request_id == msg.request_id()
                    && qualifies(&pending.kind, msg.transaction()) =>
            {
                pending.response = Some(msg);
                PENDING_REQUEST.save(storage, &pending)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn require_fresh_response(
        storage: &dyn Storage,
    ) -> Result<(PendingRequest, ResponseHookMsg), ContractError> {
        let pending = PENDING_REQUEST
            .may_load(storage)?
            .ok_or(ContractError::PuppeteerResponseNotReceived {})?;
        let response = pending
            .response
            .clone()
            .ok_or(ContractError::PuppeteerResponseNotReceived {})?;
        Ok((pending, response))
    }

    /// Closes the pending request so its response cannot be acted on twice
    pub fn consume(storage: &mut dyn Storage) {
        PENDING_REQUEST.remove(storage)
    }

    pub fn pending(storage: &dyn Storage) -> StdResult<Option<PendingRequest>> {
        PENDING_REQUEST.may_load(storage)
    }

    pub fn last_response(storage: &dyn Storage) -> StdResult<Option<ResponseHookMsg>> {
        LAST_PUPPETEER_RESPONSE.may_load(storage)
    }
}
