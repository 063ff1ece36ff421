//! CSV export adapter for spreadsheet consumption.

use crate::domain::error::PortfolioError;
use crate::domain::ledger::Ledger;
use crate::ports::report_port::ExportPort;
use log::info;
use std::io;
use std::path::Path;

pub const CSV_HEADER: [&str; 8] = [
    "Symbol",
    "Company",
    "Shares",
    "Purchase Price",
    "Current Price",
    "Current Value",
    "Gain/Loss",
    "Return %",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ExportPort for CsvExportAdapter {
    fn export(&self, ledger: &Ledger, output_path: &Path) -> Result<(), PortfolioError> {
        let mut wtr = csv::Writer::from_path(output_path)?;
        write_rows(&mut wtr, ledger)?;
        wtr.flush()?;
        info!(
            "exported {} holdings to {}",
            ledger.len(),
            output_path.display()
        );
        Ok(())
    }
}

/// Renders the export to a string, e.g. for printing to stdout.
pub fn export_to_string(ledger: &Ledger) -> Result<String, PortfolioError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_rows(&mut wtr, ledger)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| PortfolioError::Io(io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| PortfolioError::Io(io::Error::other(e)))
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, ledger: &Ledger) -> Result<(), PortfolioError> {
    wtr.write_record(CSV_HEADER)?;
    for holding in ledger {
        let security = holding.security();
        wtr.write_record([
            security.symbol().to_string(),
            security.name().to_string(),
            holding.shares_owned().to_string(),
            format!("{:.2}", holding.average_cost()),
            format!("{:.2}", security.current_price()),
            format!("{:.2}", holding.current_value()),
            format!("{:.2}", holding.gain_loss()),
            format!("{:.2}", holding.percentage_return()),
        ])?;
    }
    Ok(())
}
