//! Ledger persistence port trait.

use std::path::Path;

use crate::domain::error::PortfolioError;
use crate::domain::ledger::Ledger;

pub trait LedgerStore {
    /// Reads a whole ledger. A failure leaves any in-memory ledger untouched.
    fn load(&self, path: &Path) -> Result<Ledger, PortfolioError>;

    fn save(&self, ledger: &Ledger, path: &Path) -> Result<(), PortfolioError>;
}
