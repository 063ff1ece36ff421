//! Tradable instruments and their price movement.

use std::hash::{Hash, Hasher};

use super::error::{check_price, PortfolioError};

/// An instrument identified by its symbol.
///
/// Equality and hashing consider only the symbol, so two values describing the
/// same ticker compare equal even when their names or prices differ.
#[derive(Debug, Clone)]
pub struct Security {
    symbol: String,
    name: String,
    current_price: f64,
    previous_price: f64,
}

impl Security {
    /// Creates a security whose previous price starts equal to `current_price`.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        current_price: f64,
    ) -> Result<Self, PortfolioError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(PortfolioError::validation("symbol cannot be empty"));
        }
        check_price(current_price, "stock price")?;
        Ok(Security {
            symbol,
            name: name.into(),
            current_price,
            previous_price: current_price,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn previous_price(&self) -> f64 {
        self.previous_price
    }

    /// Moves the current price into the previous slot, then stores `price`.
    ///
    /// Only one step of history is kept.
    pub fn set_current_price(&mut self, price: f64) -> Result<(), PortfolioError> {
        check_price(price, "stock price")?;
        self.previous_price = self.current_price;
        self.current_price = price;
        Ok(())
    }

    pub fn set_previous_price(&mut self, price: f64) -> Result<(), PortfolioError> {
        check_price(price, "stock price")?;
        self.previous_price = price;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn price_change(&self) -> f64 {
        self.current_price - self.previous_price
    }

    /// Percentage move since the previous price; zero when there is no base.
    pub fn percentage_change(&self) -> f64 {
        if self.previous_price == 0.0 {
            return 0.0;
        }
        (self.price_change() / self.previous_price) * 100.0
    }
}

impl PartialEq for Security {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Security {}

impl Hash for Security {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn apple() -> Security {
        Security::new("AAPL", "Apple Inc.", 150.25).unwrap()
    }

    #[test]
    fn new_sets_previous_to_current() {
        let s = apple();
        assert_eq!(s.symbol(), "AAPL");
        assert_eq!(s.name(), "Apple Inc.");
        assert!((s.current_price() - 150.25).abs() < f64::EPSILON);
        assert!((s.previous_price() - 150.25).abs() < f64::EPSILON);
        assert!(s.price_change().abs() < f64::EPSILON);
    }

    #[test]
    fn new_rejects_negative_price() {
        let err = Security::new("AAPL", "Apple Inc.", -1.0).unwrap_err();
        assert!(matches!(err, PortfolioError::Validation { .. }));
    }

    #[test]
    fn new_rejects_blank_symbol() {
        assert!(Security::new("  ", "Nothing", 1.0).is_err());
    }

    #[test]
    fn new_accepts_zero_price() {
        let s = Security::new("ZERO", "Zero Corp", 0.0).unwrap();
        assert!(s.current_price().abs() < f64::EPSILON);
    }

    #[test]
    fn set_current_price_shifts_previous() {
        let mut s = apple();
        s.set_current_price(160.0).unwrap();
        assert!((s.previous_price() - 150.25).abs() < f64::EPSILON);
        assert!((s.current_price() - 160.0).abs() < f64::EPSILON);

        s.set_current_price(155.0).unwrap();
        assert!((s.previous_price() - 160.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_current_price_negative_leaves_state_untouched() {
        let mut s = apple();
        assert!(s.set_current_price(-5.0).is_err());
        assert!((s.current_price() - 150.25).abs() < f64::EPSILON);
        assert!((s.previous_price() - 150.25).abs() < f64::EPSILON);
    }

    #[test]
    fn set_previous_price_validates() {
        let mut s = apple();
        s.set_previous_price(100.0).unwrap();
        assert!((s.previous_price() - 100.0).abs() < f64::EPSILON);
        assert!(s.set_previous_price(-100.0).is_err());
        assert!((s.previous_price() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_name() {
        let mut s = apple();
        s.set_name("Apple");
        assert_eq!(s.name(), "Apple");
    }

    #[test]
    fn price_change_and_percentage() {
        let mut s = Security::new("MSFT", "Microsoft Corporation", 200.0).unwrap();
        s.set_current_price(210.0).unwrap();
        assert_relative_eq!(s.price_change(), 10.0, epsilon = 1e-10);
        assert_relative_eq!(s.percentage_change(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn percentage_change_zero_base() {
        let mut s = Security::new("ZERO", "Zero Corp", 0.0).unwrap();
        s.set_current_price(10.0).unwrap();
        assert!(s.percentage_change().abs() < f64::EPSILON);
        assert_relative_eq!(s.price_change(), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn equality_by_symbol_only() {
        let a = apple();
        let b = Security::new("AAPL", "Different Name", 1.0).unwrap();
        let c = Security::new("MSFT", "Apple Inc.", 150.25).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_by_symbol_only() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(apple());
        set.insert(Security::new("AAPL", "Other", 2.0).unwrap());
        assert_eq!(set.len(), 1);
    }
}
