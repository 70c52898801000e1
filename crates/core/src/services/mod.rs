pub mod quote_service;
pub mod refresh_service;
pub mod scheduler;
pub mod valuation_service;
