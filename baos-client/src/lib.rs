//! # BAOS client
//!
//! A client for the JSON web services of a KNX BAOS building automation
//! gateway. Datapoints are addressed by small integer identifiers; the
//! read services accept one contiguous block of identifiers per call, so
//! requests for arbitrary identifier lists are split into runs
//! ([`runs::compress`]) and fetched one run at a time
//! ([`client::BaosClient::fetch_batched`]).

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod runs;
pub mod transport;

pub use client::BaosClient;
pub use error::Error;
