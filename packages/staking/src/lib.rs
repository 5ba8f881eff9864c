pub mod bond_provider;
pub mod core;
pub mod error;
pub mod helpers;
pub mod puppeteer;
pub mod rates;
pub mod voucher;

pub use error::ContractError;
