//! Typed Rust client for the Verimor Bulutsantralim HTTP API.
//!
//! The design follows a small layered layout: a domain layer of strong types,
//! a transport layer for wire-format quirks, and a client layer orchestrating
//! requests.
//!
//! ```rust,no_run
//! use verimor::{ApiKey, BeginCall, BeginCallOptions, Config, PhoneNumber, VerimorClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), verimor::VerimorError> {
//!     let client = VerimorClient::new(Config::new(ApiKey::new("...")?))?;
//!     let source = PhoneNumber::normalize("908500001000")?;
//!     let destination = PhoneNumber::normalize("0555 001 122")?;
//!     let request = BeginCall::new(source, destination, BeginCallOptions::default());
//!     let _resp = client.begin_call(request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Config, VerimorClient, VerimorClientBuilder, VerimorError};
pub use domain::{
    ApiKey, AreaCode, AvailableNumbers, AvailableNumbersResponse, BaseUrl, BeginCall,
    BeginCallOptions, BeginCallResponse, PhoneNumber, ValidationError,
};
