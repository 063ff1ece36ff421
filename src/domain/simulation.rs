//! Randomised price movement for demonstrating live updates.
//!
//! Each simulator owns its generator; nothing here touches global RNG state.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::PortfolioError;
use super::ledger::Ledger;

pub const MIN_SIMULATED_PRICE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub rounds: usize,
    pub volatility: f64,
    pub interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            rounds: 5,
            volatility: 0.05,
            interval_ms: 1000,
            seed: None,
        }
    }
}

pub struct PriceSimulator {
    rng: StdRng,
    volatility: f64,
}

impl PriceSimulator {
    pub fn new(volatility: f64, seed: Option<u64>) -> Result<Self, PortfolioError> {
        if !(0.0..1.0).contains(&volatility) {
            return Err(PortfolioError::validation(
                "volatility must be at least 0 and below 1",
            ));
        }
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(PriceSimulator { rng, volatility })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, PortfolioError> {
        Self::new(config.volatility, config.seed)
    }

    /// A random move of at most `volatility` in either direction, floored at one cent.
    pub fn next_price(&mut self, base: f64) -> f64 {
        if self.volatility == 0.0 {
            return base.max(MIN_SIMULATED_PRICE);
        }
        let factor = self.rng.gen_range(-self.volatility..=self.volatility);
        (base + base * factor).max(MIN_SIMULATED_PRICE)
    }

    /// Moves every holding's price once.
    pub fn tick(&mut self, ledger: &mut Ledger) -> Result<(), PortfolioError> {
        for holding in ledger.iter_mut() {
            let current = holding.security().current_price();
            let next = self.next_price(current);
            debug!("{}: {:.2} -> {:.2}", holding.symbol(), current, next);
            holding.security_mut().set_current_price(next)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::Holding;
    use crate::domain::security::Security;

    fn two_stock_ledger() -> Ledger {
        let mut ledger = Ledger::new("Sim");
        let a = Security::new("AAA", "Alpha", 100.0).unwrap();
        let b = Security::new("BBB", "Beta", 0.0).unwrap();
        ledger.add(Holding::new(a, 10, 90.0).unwrap()).unwrap();
        ledger.add(Holding::new(b, 10, 1.0).unwrap()).unwrap();
        ledger
    }

    #[test]
    fn rejects_out_of_range_volatility() {
        assert!(PriceSimulator::new(-0.1, Some(1)).is_err());
        assert!(PriceSimulator::new(1.0, Some(1)).is_err());
        assert!(PriceSimulator::new(f64::NAN, Some(1)).is_err());
        assert!(PriceSimulator::new(0.0, Some(1)).is_ok());
    }

    #[test]
    fn next_price_stays_within_band() {
        let mut sim = PriceSimulator::new(0.05, Some(42)).unwrap();
        for _ in 0..1000 {
            let p = sim.next_price(100.0);
            assert!((95.0..=105.0).contains(&p), "price {p} outside band");
        }
    }

    #[test]
    fn next_price_has_floor() {
        let mut sim = PriceSimulator::new(0.5, Some(7)).unwrap();
        for _ in 0..100 {
            assert!(sim.next_price(0.0) >= MIN_SIMULATED_PRICE);
        }
    }

    #[test]
    fn zero_volatility_keeps_price() {
        let mut sim = PriceSimulator::new(0.0, Some(3)).unwrap();
        assert!((sim.next_price(123.45) - 123.45).abs() < f64::EPSILON);
    }

    #[test]
    fn same_seed_same_path() {
        let mut a = PriceSimulator::new(0.1, Some(99)).unwrap();
        let mut b = PriceSimulator::new(0.1, Some(99)).unwrap();
        for _ in 0..20 {
            assert_eq!(a.next_price(50.0), b.next_price(50.0));
        }
    }

    #[test]
    fn tick_moves_every_holding_and_shifts_previous() {
        let mut ledger = two_stock_ledger();
        let mut sim = PriceSimulator::new(0.05, Some(11)).unwrap();
        sim.tick(&mut ledger).unwrap();

        let a = ledger.get("AAA").unwrap().security();
        assert!((a.previous_price() - 100.0).abs() < f64::EPSILON);
        assert!((95.0..=105.0).contains(&a.current_price()));

        let b = ledger.get("BBB").unwrap().security();
        assert!((b.current_price() - MIN_SIMULATED_PRICE).abs() < f64::EPSILON);
    }

    #[test]
    fn default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.rounds, 5);
        assert!((config.volatility - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.interval_ms, 1000);
        assert_eq!(config.seed, None);
    }
}
