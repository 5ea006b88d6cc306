//! # Transactions Hex
//!
//! Application service layer and HTTP adapter for the transactions service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - Generated API documentation
//!
//! The service is generic over `R: TransactionRepository` and
//! `P: ExchangeRateProvider`, allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::TransactionService;
