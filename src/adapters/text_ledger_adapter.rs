//! Line-oriented ledger file adapter.
//!
//! Layout:
//!
//! ```text
//! <ledger name>
//! <total initial investment>
//! <holding count N>
//! <symbol>,<name>,<current>,<previous>,<shares>,<avg cost>,<total invested>   (N lines)
//! ```
//!
//! A bad header fails the whole load. A bad holding line is logged and
//! skipped.

use crate::domain::error::PortfolioError;
use crate::domain::holding::Holding;
use crate::domain::ledger::Ledger;
use crate::domain::security::Security;
use crate::ports::ledger_store::LedgerStore;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

const HOLDING_FIELDS: usize = 7;

#[derive(Debug, Default, Clone, Copy)]
pub struct TextLedgerAdapter;

impl TextLedgerAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl LedgerStore for TextLedgerAdapter {
    fn load(&self, path: &Path) -> Result<Ledger, PortfolioError> {
        let content = fs::read_to_string(path)?;
        let ledger = parse_ledger(&content)?;
        info!(
            "loaded ledger '{}' with {} holdings from {}",
            ledger.name(),
            ledger.len(),
            path.display()
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger, path: &Path) -> Result<(), PortfolioError> {
        fs::write(path, format_ledger(ledger))?;
        info!(
            "saved ledger '{}' with {} holdings to {}",
            ledger.name(),
            ledger.len(),
            path.display()
        );
        Ok(())
    }
}

/// Delimiters inside free text would break the line layout on reload.
fn clean_field(text: &str) -> String {
    text.replace([',', '\n', '\r'], " ")
}

pub fn format_ledger(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", ledger.name().replace(['\n', '\r'], " ")));
    out.push_str(&format!("{}\n", ledger.total_initial_investment()));
    out.push_str(&format!("{}\n", ledger.len()));
    for holding in ledger {
        let security = holding.security();
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            clean_field(security.symbol()),
            clean_field(security.name()),
            security.current_price(),
            security.previous_price(),
            holding.shares_owned(),
            holding.average_cost(),
            holding.total_invested(),
        ));
    }
    out
}

fn header_error(reason: impl Into<String>) -> PortfolioError {
    PortfolioError::LoadFormat {
        reason: reason.into(),
    }
}

pub fn parse_ledger(content: &str) -> Result<Ledger, PortfolioError> {
    let mut lines = content.lines().map(|l| l.trim_end_matches('\r'));

    let name = lines
        .next()
        .ok_or_else(|| header_error("missing ledger name"))?;

    let total_line = lines
        .next()
        .ok_or_else(|| header_error("missing total investment"))?;
    let total: f64 = total_line
        .trim()
        .parse()
        .map_err(|_| header_error(format!("invalid total investment '{}'", total_line)))?;
    if !total.is_finite() {
        return Err(header_error(format!("invalid total investment '{}'", total_line)));
    }

    let count_line = lines
        .next()
        .ok_or_else(|| header_error("missing holding count"))?;
    let count: usize = count_line
        .trim()
        .parse()
        .map_err(|_| header_error(format!("invalid holding count '{}'", count_line)))?;

    let mut holdings = Vec::with_capacity(count);
    for index in 0..count {
        let Some(line) = lines.next() else {
            warn!(
                "ledger file ends after {} of {} holding lines",
                index, count
            );
            break;
        };
        match parse_holding(line) {
            Ok(holding) => holdings.push(holding),
            Err(reason) => warn!("skipping holding line {}: {}", index + 1, reason),
        }
    }

    let trailing = lines.filter(|l| !l.trim().is_empty()).count();
    if trailing > 0 {
        debug!("ignoring {} lines after the declared holdings", trailing);
    }

    Ledger::restore(name, total, holdings)
}

fn parse_number<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("invalid {} '{}'", what, field))
}

fn parse_holding(line: &str) -> Result<Holding, String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != HOLDING_FIELDS {
        return Err(format!(
            "expected {} fields, found {}",
            HOLDING_FIELDS,
            fields.len()
        ));
    }

    let current: f64 = parse_number(fields[2], "current price")?;
    let previous: f64 = parse_number(fields[3], "previous price")?;
    let shares: u64 = parse_number(fields[4], "share count")?;
    let average_cost: f64 = parse_number(fields[5], "average cost")?;
    let total_invested: f64 = parse_number(fields[6], "total invested")?;

    let mut security =
        Security::new(fields[0].trim(), fields[1], current).map_err(|e| e.to_string())?;
    security
        .set_previous_price(previous)
        .map_err(|e| e.to_string())?;
    Holding::restore(security, shares, average_cost, total_invested).map_err(|e| e.to_string())
}
