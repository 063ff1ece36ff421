//! Built-in demonstration holdings.

use super::error::PortfolioError;
use super::holding::Holding;
use super::ledger::Ledger;
use super::security::Security;

/// (symbol, company, current price, shares, purchase price)
const SAMPLE_HOLDINGS: [(&str, &str, f64, u64, f64); 5] = [
    ("AAPL", "Apple Inc.", 150.25, 100, 145.00),
    ("MSFT", "Microsoft Corporation", 305.50, 50, 280.25),
    ("AMZN", "Amazon.com Inc.", 3100.75, 10, 3200.00),
    ("GOOGL", "Alphabet Inc.", 2650.25, 25, 2500.50),
    ("TSLA", "Tesla Inc.", 800.50, 30, 750.75),
];

pub fn sample_holdings() -> Result<Vec<Holding>, PortfolioError> {
    SAMPLE_HOLDINGS
        .iter()
        .map(|&(symbol, company, current, shares, purchase)| {
            let security = Security::new(symbol, company, current)?;
            Holding::new(security, shares, purchase)
        })
        .collect()
}

/// Merges the sample holdings into `ledger`.
pub fn add_sample_data(ledger: &mut Ledger) -> Result<(), PortfolioError> {
    for holding in sample_holdings()? {
        ledger.add(holding)?;
    }
    Ok(())
}

pub fn sample_ledger(name: &str) -> Result<Ledger, PortfolioError> {
    let mut ledger = Ledger::new(name);
    add_sample_data(&mut ledger)?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sample_ledger_contents() {
        let ledger = sample_ledger("Demo").unwrap();
        assert_eq!(ledger.len(), 5);
        let symbols: Vec<&str> = ledger.iter().map(Holding::symbol).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "AMZN", "GOOGL", "TSLA"]);
        // 14500 + 14012.5 + 32000 + 62512.5 + 22522.5
        assert_relative_eq!(ledger.total_initial_investment(), 145547.5, epsilon = 1e-6);
    }

    #[test]
    fn amazon_is_the_only_loser() {
        let ledger = sample_ledger("Demo").unwrap();
        let losers = ledger.losers();
        assert_eq!(losers.len(), 1);
        assert_eq!(losers[0].symbol(), "AMZN");
        assert_eq!(ledger.worst_performer().unwrap().symbol(), "AMZN");
    }

    #[test]
    fn adding_twice_merges() {
        let mut ledger = sample_ledger("Demo").unwrap();
        add_sample_data(&mut ledger).unwrap();
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.get("AAPL").unwrap().shares_owned(), 200);
    }
}
