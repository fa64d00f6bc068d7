//! Teller Shift Engine
//!
//! This crate manages bank teller cash-drawer shifts: opening a shift with an
//! initial cash count, recording deposits and withdrawals against it, and
//! closing it by reconciling the counted drawer against the balance computed
//! from the ledger.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;
