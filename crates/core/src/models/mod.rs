pub mod asset;
pub mod portfolio;
pub mod quote;
pub mod transaction;
