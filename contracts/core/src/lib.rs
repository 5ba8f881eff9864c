pub mod batch;
pub mod config;
pub mod contract;
pub mod gate;
pub mod ica;
pub mod providers;
pub mod state;

#[cfg(test)]
mod testing;
