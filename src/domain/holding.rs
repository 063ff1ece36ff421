//! A position in one security with its weighted-average cost basis.

use std::cmp::Ordering;

use super::error::{check_price, PortfolioError};
use super::security::Security;

#[derive(Debug, Clone)]
pub struct Holding {
    security: Security,
    shares_owned: u64,
    average_cost: f64,
    total_invested: f64,
}

impl Holding {
    pub fn new(
        security: Security,
        shares: u64,
        purchase_price: f64,
    ) -> Result<Self, PortfolioError> {
        check_price(purchase_price, "purchase price")?;
        Ok(Holding {
            security,
            shares_owned: shares,
            average_cost: purchase_price,
            total_invested: shares as f64 * purchase_price,
        })
    }

    /// Rebuilds a holding from persisted figures without recomputing the
    /// invested total.
    pub fn restore(
        security: Security,
        shares: u64,
        average_cost: f64,
        total_invested: f64,
    ) -> Result<Self, PortfolioError> {
        check_price(average_cost, "purchase price")?;
        check_price(total_invested, "total invested")?;
        Ok(Holding {
            security,
            shares_owned: shares,
            average_cost,
            total_invested,
        })
    }

    pub fn security(&self) -> &Security {
        &self.security
    }

    pub fn security_mut(&mut self) -> &mut Security {
        &mut self.security
    }

    pub fn symbol(&self) -> &str {
        self.security.symbol()
    }

    pub fn shares_owned(&self) -> u64 {
        self.shares_owned
    }

    pub fn average_cost(&self) -> f64 {
        self.average_cost
    }

    pub fn total_invested(&self) -> f64 {
        self.total_invested
    }

    /// Overwrites the share count; the cost basis is left as is.
    pub fn set_shares_owned(&mut self, shares: u64) {
        self.shares_owned = shares;
    }

    /// Buys `shares` more at `price`, folding them into the average cost.
    pub fn add_shares(&mut self, shares: u64, price: f64) -> Result<(), PortfolioError> {
        if shares == 0 {
            return Err(PortfolioError::validation(
                "number of shares to add must be positive",
            ));
        }
        check_price(price, "price per share")?;
        let new_total_shares = self
            .shares_owned
            .checked_add(shares)
            .ok_or_else(|| PortfolioError::validation("share count overflow"))?;

        let new_investment = shares as f64 * price;
        self.average_cost = (self.total_invested + new_investment) / new_total_shares as f64;
        self.shares_owned = new_total_shares;
        self.total_invested += new_investment;
        Ok(())
    }

    /// Sells `shares`, scaling the invested total down proportionally.
    pub fn remove_shares(&mut self, shares: u64) -> Result<(), PortfolioError> {
        if shares == 0 {
            return Err(PortfolioError::validation(
                "number of shares to remove must be positive",
            ));
        }
        if shares > self.shares_owned {
            return Err(PortfolioError::validation(format!(
                "cannot remove {} shares of {}, only {} owned",
                shares,
                self.symbol(),
                self.shares_owned
            )));
        }

        let proportion_removed = shares as f64 / self.shares_owned as f64;
        self.total_invested *= 1.0 - proportion_removed;
        self.shares_owned -= shares;
        Ok(())
    }

    pub fn current_value(&self) -> f64 {
        self.shares_owned as f64 * self.security.current_price()
    }

    pub fn gain_loss(&self) -> f64 {
        self.current_value() - self.total_invested
    }

    pub fn percentage_return(&self) -> f64 {
        if self.total_invested == 0.0 {
            return 0.0;
        }
        (self.gain_loss() / self.total_invested) * 100.0
    }

    /// Default ordering: ascending by current market value.
    pub fn value_cmp(&self, other: &Holding) -> Ordering {
        self.current_value().total_cmp(&other.current_value())
    }

    pub(crate) fn return_cmp(&self, other: &Holding) -> Ordering {
        self.percentage_return().total_cmp(&other.percentage_return())
    }
}
