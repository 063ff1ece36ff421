#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use stockfolio::adapters::text_ledger_adapter::{format_ledger, parse_ledger};
use stockfolio::domain::error::PortfolioError;
pub use stockfolio::domain::holding::Holding;
pub use stockfolio::domain::ledger::Ledger;
pub use stockfolio::domain::security::Security;
use stockfolio::ports::ledger_store::LedgerStore;

/// In-memory ledger store keyed by path, using the real text layout.
pub struct MockLedgerStore {
    pub files: RefCell<HashMap<PathBuf, String>>,
}

impl MockLedgerStore {
    pub fn new() -> Self {
        Self {
            files: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl LedgerStore for MockLedgerStore {
    fn load(&self, path: &Path) -> Result<Ledger, PortfolioError> {
        let files = self.files.borrow();
        let content = files.get(path).ok_or_else(|| {
            PortfolioError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })?;
        parse_ledger(content)
    }

    fn save(&self, ledger: &Ledger, path: &Path) -> Result<(), PortfolioError> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), format_ledger(ledger));
        Ok(())
    }
}

pub fn make_holding(symbol: &str, shares: u64, purchase: f64, current: f64) -> Holding {
    let security = Security::new(symbol, format!("{symbol} Holdings"), current).unwrap();
    Holding::new(security, shares, purchase).unwrap()
}

pub fn symbols(ledger: &Ledger) -> Vec<String> {
    ledger.iter().map(|h| h.symbol().to_string()).collect()
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
