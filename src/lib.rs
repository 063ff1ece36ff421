//! stockfolio: single-user stock portfolio tracker.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], with [`cli`] and [`interactive`]
//! as the user-facing front ends.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod interactive;
