use cosmwasm_schema::cw_serde;
use cosmwasm_std::{ensure, Decimal, Uint128};

use crate::ContractError;

/// Everything the exchange rate depends on. Native amounts are in the remote
/// staking denom, liquid amounts in the dAsset denom.
#[cw_serde]
#[derive(Default)]
pub struct RateInputs {
    /// Native asset currently delegated on the remote chain
    pub delegated: Uint128,
    /// Native asset bonded locally but not delegated yet
    pub async_tokens: Uint128,
    /// Outstanding dAsset supply
    pub ld_supply: Uint128,
    /// dAsset burned into batches that have not been undelegated yet
    pub unbond_liability: Uint128,
}

impl RateInputs {
    /// Native asset per unit of dAsset. An empty protocol trades at exactly 1.
    pub fn exchange_rate(&self) -> Result<Decimal, ContractError> {
        let numerator = self.delegated.checked_add(self.async_tokens)?;
        let denominator = self.ld_supply.checked_add(self.unbond_liability)?;
        if denominator.is_zero() {
            return Ok(Decimal::one());
        }
        Ok(Decimal::checked_from_ratio(numerator, denominator)?)
    }
}

impl From<RateInputs> for String {
    fn from(value: RateInputs) -> Self {
        format!(
            "delegated:{},async_tokens:{},ld_supply:{},unbond_liability:{}",
            value.delegated, value.async_tokens, value.ld_supply, value.unbond_liability
        )
    }
}

/// The amount of dAsset issued for a native `amount` bonded at `rate`
pub fn issue_amount(amount: Uint128, rate: Decimal) -> Result<Uint128, ContractError> {
    ensure!(!rate.is_zero(), ContractError::ExchangeRateIsZero {});
    Ok(amount.checked_div_floor(rate)?)
}

/// The native value of `dasset_amount` at `rate`
pub fn native_amount(dasset_amount: Uint128, rate: Decimal) -> Result<Uint128, ContractError> {
    Ok(dasset_amount.checked_mul_floor(rate)?)
}

/// Ratio of what actually came back from unbonding to what was expected.
/// Anything at or above the expectation is not a slash.
pub fn slashing_effect(
    unbonded: Uint128,
    expected: Uint128,
) -> Result<Option<Decimal>, ContractError> {
    if expected.is_zero() || unbonded >= expected {
        return Ok(None);
    }
    Ok(Some(Decimal::checked_from_ratio(unbonded, expected)?))
}
