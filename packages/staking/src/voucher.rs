use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// Attributes carried by every withdrawal voucher
#[cw_serde]
pub struct Extension {
    pub unbond_batch_id: String,
    pub received_amount: Uint128,
}

/// The subset of the voucher NFT contract that Core calls
#[cw_serde]
pub enum ExecuteMsg {
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
        extension: Option<Extension>,
    },
}

/// Vouchers are keyed `{batch_id}_{owner}_{sequence}`
pub fn token_id(batch_id: u64, owner: &str, sequence: u64) -> String {
    format!("{}_{}_{}", batch_id, owner, sequence)
}
