//! `TaskSync` — client-side task state synchronization for a remote to-do store.

pub mod busy;
pub mod config;
pub mod create;
pub mod edit;
pub mod gateway;
pub mod model;
pub mod notify;
pub mod store;
