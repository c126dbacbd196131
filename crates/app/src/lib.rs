//! Process bootstrap for the token reconciler: configuration, logging and the
//! HTTP token service client.

pub mod client;
pub mod config;
pub mod observability;
