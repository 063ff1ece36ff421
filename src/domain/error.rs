//! Domain error types.

/// Top-level error type for stockfolio.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("invalid value: {reason}")]
    Validation { reason: String },

    #[error("index {index} out of range for ledger of {len} holdings")]
    OutOfRange { index: usize, len: usize },

    #[error("portfolio is empty")]
    EmptyLedger,

    #[error("no holding for symbol {symbol}")]
    NotFound { symbol: String },

    #[error("malformed ledger file: {reason}")]
    LoadFormat { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PortfolioError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        PortfolioError::Validation {
            reason: reason.into(),
        }
    }
}

/// Rejects negative and non-finite prices.
pub(crate) fn check_price(price: f64, what: &str) -> Result<(), PortfolioError> {
    if !price.is_finite() {
        return Err(PortfolioError::validation(format!("{what} must be a finite number")));
    }
    if price < 0.0 {
        return Err(PortfolioError::validation(format!("{what} cannot be negative")));
    }
    Ok(())
}

impl From<&PortfolioError> for std::process::ExitCode {
    fn from(err: &PortfolioError) -> Self {
        let code: u8 = match err {
            PortfolioError::Io(_) => 1,
            PortfolioError::ConfigParse { .. } | PortfolioError::ConfigInvalid { .. } => 2,
            PortfolioError::Validation { .. } | PortfolioError::OutOfRange { .. } => 3,
            PortfolioError::NotFound { .. } | PortfolioError::EmptyLedger => 4,
            PortfolioError::LoadFormat { .. } | PortfolioError::Csv(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_price_accepts_zero_and_positive() {
        assert!(check_price(0.0, "price").is_ok());
        assert!(check_price(150.25, "price").is_ok());
    }

    #[test]
    fn check_price_rejects_negative() {
        let err = check_price(-0.01, "price").unwrap_err();
        assert!(matches!(err, PortfolioError::Validation { .. }));
        assert_eq!(err.to_string(), "invalid value: price cannot be negative");
    }

    #[test]
    fn check_price_rejects_nan_and_infinity() {
        assert!(check_price(f64::NAN, "price").is_err());
        assert!(check_price(f64::INFINITY, "price").is_err());
    }

    #[test]
    fn error_messages() {
        let err = PortfolioError::OutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "index 3 out of range for ledger of 2 holdings"
        );
        let err = PortfolioError::NotFound {
            symbol: "AAPL".into(),
        };
        assert_eq!(err.to_string(), "no holding for symbol AAPL");
        assert_eq!(PortfolioError::EmptyLedger.to_string(), "portfolio is empty");
    }

    #[test]
    fn exit_codes_are_distinct_per_category() {
        use std::process::ExitCode;
        let io: ExitCode = (&PortfolioError::Io(std::io::Error::other("x"))).into();
        let empty: ExitCode = (&PortfolioError::EmptyLedger).into();
        assert_eq!(io, ExitCode::from(1));
        assert_eq!(empty, ExitCode::from(4));
        let invalid: ExitCode = (&PortfolioError::validation("bad")).into();
        assert_eq!(invalid, ExitCode::from(3));
    }
}
