//! One-way ledger export port trait.

use std::path::Path;

use crate::domain::error::PortfolioError;
use crate::domain::ledger::Ledger;

/// Port for writing a ledger out for external consumption.
pub trait ExportPort {
    fn export(&self, ledger: &Ledger, output_path: &Path) -> Result<(), PortfolioError>;
}
