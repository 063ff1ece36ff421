//! Core domain types and logic.

pub mod security;
pub mod holding;
pub mod ledger;
pub mod simulation;
pub mod sample;
pub mod config_validation;
pub mod error;
