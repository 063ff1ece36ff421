//! Configuration validation.
//!
//! Every key is optional; these checks only reject values that are present
//! and out of range.

use crate::domain::error::PortfolioError;
use crate::ports::config_port::ConfigPort;

pub fn validate_app_config(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    validate_ledger(config)?;
    validate_simulation_config(config)?;
    validate_display(config)?;
    Ok(())
}

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    validate_rounds(config)?;
    validate_volatility(config)?;
    validate_interval(config)?;
    validate_seed(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> PortfolioError {
    PortfolioError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_ledger(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    if let Some(path) = config.get_string("ledger", "path") {
        if path.trim().is_empty() {
            return Err(invalid("ledger", "path", "path must not be empty"));
        }
    }
    Ok(())
}

fn validate_rounds(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    let value = config.get_int("simulation", "rounds", 5);
    if value < 1 {
        return Err(invalid("simulation", "rounds", "rounds must be at least 1"));
    }
    Ok(())
}

fn validate_volatility(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    let value = config.get_double("simulation", "volatility", 0.05);
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "simulation",
            "volatility",
            "volatility must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    let value = config.get_int("simulation", "interval_ms", 1000);
    if value < 0 {
        return Err(invalid(
            "simulation",
            "interval_ms",
            "interval_ms must be non-negative",
        ));
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    match config.get_string("simulation", "seed") {
        Some(s) if !s.trim().is_empty() && s.trim().parse::<u64>().is_err() => Err(invalid(
            "simulation",
            "seed",
            "seed must be a non-negative integer",
        )),
        _ => Ok(()),
    }
}

fn validate_display(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    let value = config.get_int("display", "top_count", 5);
    if value < 1 {
        return Err(invalid("display", "top_count", "top_count must be at least 1"));
    }
    Ok(())
}
