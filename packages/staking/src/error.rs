use cosmwasm_std::{
    CheckedFromRatioError, CheckedMultiplyFractionError, CheckedMultiplyRatioError, OverflowError,
    StdError,
};
use cw_ownable::OwnershipError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ownership(#[from] OwnershipError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Overflow {0}")]
    Overflow(#[from] OverflowError),

    #[error("CheckedFromRatio {0}")]
    CheckedFromRatio(#[from] CheckedFromRatioError),

    #[error("CheckedMultiplyFraction {0}")]
    CheckedMultiplyFraction(#[from] CheckedMultiplyFractionError),

    #[error("CheckedMultiplyRatio {0}")]
    CheckedMultiplyRatio(#[from] CheckedMultiplyRatioError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("ContractPaused: {action} is paused")]
    ContractPaused { action: String },

    #[error("PuppeteerResponseNotReceived")]
    PuppeteerResponseNotReceived {},

    #[error("NoEligibleBondProvider for {denom}")]
    NoEligibleBondProvider { denom: String },

    #[error("InvalidState: {reason}")]
    InvalidState { reason: String },

    #[error("InvalidTransition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("AlreadyWithdrawn: batch {batch_id}")]
    AlreadyWithdrawn { batch_id: u64 },

    #[error("NotWithdrawnYet: batch {batch_id}")]
    NotWithdrawnYet { batch_id: u64 },

    #[error("NotFound: {kind} {key}")]
    NotFound { kind: String, key: String },

    #[error("ProviderBusy: {address}")]
    ProviderBusy { address: String },

    #[error("ProviderAlreadyAdded: {address}")]
    ProviderAlreadyAdded { address: String },

    #[error("BondLimitExceeded")]
    BondLimitExceeded {},

    #[error("ZeroIssueAmount")]
    ZeroIssueAmount {},

    #[error("ExchangeRateIsZero")]
    ExchangeRateIsZero {},

    #[error("EmergencyAddressIsNotSet")]
    EmergencyAddressIsNotSet {},

    #[error("InvalidDenom: expected {expected}")]
    InvalidDenom { expected: String },

    #[error("BalanceTooLow: {balance} < {minimum}")]
    BalanceTooLow {
        balance: cosmwasm_std::Uint128,
        minimum: cosmwasm_std::Uint128,
    },
}

impl ContractError {
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &str, key: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            key: key.to_string(),
        }
    }
}
