pub mod contract;
pub mod draw;
pub mod error;
pub mod msg;
pub mod query;
pub mod rounds;
pub mod state;

pub use crate::error::ContractError;
