//! INI file configuration adapter.
//!
//! An absent config file is not an error for stockfolio: [`FileConfigAdapter::empty`]
//! answers every lookup with the caller's default.

use crate::domain::error::PortfolioError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PortfolioError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| PortfolioError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, PortfolioError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| PortfolioError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        match self.config.getint(section, key) {
            Ok(Some(v)) => v,
            _ => default,
        }
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        match self.config.getfloat(section, key) {
            Ok(Some(v)) => v,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[ledger]
name = Retirement Fund
path = /var/lib/stockfolio/retirement.txt

[simulation]
rounds = 3
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("ledger", "name"),
            Some("Retirement Fund".to_string())
        );
        assert_eq!(
            adapter.get_string("ledger", "path"),
            Some("/var/lib/stockfolio/retirement.txt".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[ledger]\nname = Main\n").unwrap();
        assert_eq!(adapter.get_string("ledger", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[simulation]\nrounds = 7\n").unwrap();
        assert_eq!(adapter.get_int("simulation", "rounds", 0), 7);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[simulation]\n").unwrap();
        assert_eq!(adapter.get_int("simulation", "rounds", 5), 5);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[simulation]\nrounds = many\n").unwrap();
        assert_eq!(adapter.get_int("simulation", "rounds", 5), 5);
    }

    #[test]
    fn get_double_returns_value() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nvolatility = 0.125\n").unwrap();
        assert_eq!(adapter.get_double("simulation", "volatility", 0.0), 0.125);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nvolatility = high\n").unwrap();
        assert_eq!(adapter.get_double("simulation", "volatility", 0.05), 0.05);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[display]\ntop_count = 3\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("display", "top_count", 5), 3);
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/stockfolio.ini");
        assert!(matches!(result, Err(PortfolioError::ConfigParse { .. })));
    }

    #[test]
    fn empty_adapter_uses_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("ledger", "name"), None);
        assert_eq!(adapter.get_int("simulation", "rounds", 5), 5);
        assert_eq!(adapter.get_double("simulation", "volatility", 0.05), 0.05);
    }
}
