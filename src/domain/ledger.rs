//! The named, ordered collection of holdings and its aggregate metrics.

use log::{debug, warn};

use super::error::PortfolioError;
use super::holding::Holding;

pub const DEFAULT_LEDGER_NAME: &str = "My Portfolio";

/// Holdings in insertion order, at most one per symbol.
#[derive(Debug, Clone)]
pub struct Ledger {
    name: String,
    holdings: Vec<Holding>,
    total_initial_investment: f64,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(DEFAULT_LEDGER_NAME)
    }
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        Ledger {
            name: name.into(),
            holdings: Vec::new(),
            total_initial_investment: 0.0,
        }
    }

    /// Reassembles a ledger from persisted parts.
    ///
    /// The recorded `total_initial_investment` is kept as given, including a
    /// slightly negative value left by rounding on add/remove. Repeated
    /// symbols are merged into the first occurrence; a repeat that cannot be
    /// merged is dropped.
    pub fn restore(
        name: impl Into<String>,
        total_initial_investment: f64,
        holdings: Vec<Holding>,
    ) -> Result<Self, PortfolioError> {
        if !total_initial_investment.is_finite() {
            return Err(PortfolioError::validation(
                "total initial investment must be a finite number",
            ));
        }
        let mut ledger = Ledger::new(name);
        for holding in holdings {
            match ledger.position(holding.symbol()) {
                Some(idx) => {
                    let existing = &mut ledger.holdings[idx];
                    if let Err(e) =
                        existing.add_shares(holding.shares_owned(), holding.average_cost())
                    {
                        warn!("dropping duplicate holding {}: {}", holding.symbol(), e);
                    }
                }
                None => ledger.holdings.push(holding),
            }
        }
        ledger.total_initial_investment = total_initial_investment;
        Ok(ledger)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn total_initial_investment(&self) -> f64 {
        self.total_initial_investment
    }

    fn position(&self, symbol: &str) -> Option<usize> {
        self.holdings.iter().position(|h| h.symbol() == symbol)
    }

    /// Adds a holding, merging it into an existing one with the same symbol.
    ///
    /// A merge buys the incoming shares at the incoming average cost. On error
    /// the ledger is unchanged.
    pub fn add(&mut self, holding: Holding) -> Result<(), PortfolioError> {
        let invested = holding.total_invested();
        match self.position(holding.symbol()) {
            Some(idx) => {
                self.holdings[idx].add_shares(holding.shares_owned(), holding.average_cost())?;
                debug!("merged {} shares into {}", holding.shares_owned(), holding.symbol());
            }
            None => {
                debug!("added new holding {}", holding.symbol());
                self.holdings.push(holding);
            }
        }
        self.total_initial_investment += invested;
        Ok(())
    }

    /// Removes the holding for `symbol` and returns it.
    pub fn remove(&mut self, symbol: &str) -> Result<Holding, PortfolioError> {
        let idx = self.position(symbol).ok_or_else(|| PortfolioError::NotFound {
            symbol: symbol.to_string(),
        })?;
        let removed = self.holdings.remove(idx);
        self.total_initial_investment -= removed.total_invested();
        Ok(removed)
    }

    pub fn update_price(&mut self, symbol: &str, new_price: f64) -> Result<(), PortfolioError> {
        let holding = self.get_mut(symbol).ok_or_else(|| PortfolioError::NotFound {
            symbol: symbol.to_string(),
        })?;
        holding.security_mut().set_current_price(new_price)
    }

    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.symbol() == symbol)
    }

    pub fn get_mut(&mut self, symbol: &str) -> Option<&mut Holding> {
        self.holdings.iter_mut().find(|h| h.symbol() == symbol)
    }

    pub fn holding_at(&self, index: usize) -> Result<&Holding, PortfolioError> {
        let len = self.holdings.len();
        self.holdings
            .get(index)
            .ok_or(PortfolioError::OutOfRange { index, len })
    }

    pub fn holding_at_mut(&mut self, index: usize) -> Result<&mut Holding, PortfolioError> {
        let len = self.holdings.len();
        self.holdings
            .get_mut(index)
            .ok_or(PortfolioError::OutOfRange { index, len })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Holding> {
        self.holdings.iter_mut()
    }

    pub fn current_value(&self) -> f64 {
        self.holdings.iter().map(Holding::current_value).sum()
    }

    pub fn total_gain_loss(&self) -> f64 {
        self.current_value() - self.total_initial_investment
    }

    pub fn percentage_return(&self) -> f64 {
        if self.total_initial_investment == 0.0 {
            return 0.0;
        }
        (self.total_gain_loss() / self.total_initial_investment) * 100.0
    }

    pub fn sort_by_value(&mut self, ascending: bool) {
        if ascending {
            self.holdings.sort_by(|a, b| a.value_cmp(b));
        } else {
            self.holdings.sort_by(|a, b| b.value_cmp(a));
        }
    }

    pub fn sort_by_symbol(&mut self) {
        self.holdings.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    }

    /// Holding with the highest percentage return; the earliest wins ties.
    pub fn top_performer(&self) -> Result<&Holding, PortfolioError> {
        self.holdings
            .iter()
            .reduce(|best, h| if h.return_cmp(best).is_gt() { h } else { best })
            .ok_or(PortfolioError::EmptyLedger)
    }

    /// Holding with the lowest percentage return; the earliest wins ties.
    pub fn worst_performer(&self) -> Result<&Holding, PortfolioError> {
        self.holdings
            .iter()
            .min_by(|a, b| a.return_cmp(b))
            .ok_or(PortfolioError::EmptyLedger)
    }

    /// Up to `count` holdings ordered by descending return. The ledger's own
    /// order is untouched.
    pub fn top_performers(&self, count: usize) -> Vec<&Holding> {
        let mut ranked: Vec<&Holding> = self.holdings.iter().collect();
        ranked.sort_by(|a, b| b.return_cmp(a));
        ranked.truncate(count);
        ranked
    }

    pub fn losers(&self) -> Vec<&Holding> {
        self.holdings.iter().filter(|h| h.gain_loss() < 0.0).collect()
    }

    pub fn average_return(&self) -> f64 {
        if self.holdings.is_empty() {
            return 0.0;
        }
        let total: f64 = self.holdings.iter().map(Holding::percentage_return).sum();
        total / self.holdings.len() as f64
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}

impl<'a> IntoIterator for &'a mut Ledger {
    type Item = &'a mut Holding;
    type IntoIter = std::slice::IterMut<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter_mut()
    }
}
