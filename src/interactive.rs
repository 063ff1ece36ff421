//! Numbered menu loop over any line-based input and output.

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::adapters::console_report;
use crate::cli::{path_or_default, run_simulation, AppSettings};
use crate::domain::error::PortfolioError;
use crate::domain::holding::Holding;
use crate::domain::ledger::Ledger;
use crate::domain::sample::add_sample_data;
use crate::domain::security::Security;
use crate::ports::ledger_store::LedgerStore;
use crate::ports::report_port::ExportPort;

const MENU: &str = "\
1.  Add Investment
2.  Remove Investment
3.  Update Stock Price
4.  View Portfolio
5.  View Portfolio Summary
6.  View Detailed Report
7.  Sort Investments by Value
8.  Sort Investments by Symbol
9.  View Top Performers
10. View Losing Investments
11. Simulate Real-time Updates
12. Save Portfolio
13. Load Portfolio
14. Export to CSV
15. Load Sample Data
0.  Exit
";

/// Outcome of one prompt.
enum Answer<T> {
    Value(T),
    Invalid,
    Eof,
}

pub struct Menu<'a, R, W> {
    ledger: Ledger,
    settings: &'a AppSettings,
    store: &'a dyn LedgerStore,
    exporter: &'a dyn ExportPort,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        ledger: Ledger,
        settings: &'a AppSettings,
        store: &'a dyn LedgerStore,
        exporter: &'a dyn ExportPort,
        input: R,
        output: W,
    ) -> Self {
        Menu {
            ledger,
            settings,
            store,
            exporter,
            input,
            output,
        }
    }

    /// Runs until the user picks 0 or input ends, returning the final ledger.
    pub fn run(mut self) -> Result<Ledger, PortfolioError> {
        writeln!(self.output, "Welcome to Stock Portfolio Manager!")?;
        loop {
            self.show_menu()?;
            let choice = match self.read_line()? {
                None => break,
                Some(line) => line,
            };
            let keep_going = match choice.trim() {
                "0" => {
                    writeln!(self.output, "\nThank you for using Stock Portfolio Manager!")?;
                    false
                }
                "1" => self.add_investment()?,
                "2" => self.remove_investment()?,
                "3" => self.update_price()?,
                "4" => self.print(console_report::render_table(&self.ledger))?,
                "5" => self.print(console_report::render_summary(&self.ledger))?,
                "6" => self.print(console_report::render_detailed_report(&self.ledger))?,
                "7" => self.sort_by_value()?,
                "8" => {
                    self.ledger.sort_by_symbol();
                    writeln!(self.output, "Investments sorted by symbol.")?;
                    true
                }
                "9" => self.top_performers()?,
                "10" => self.print(console_report::render_losers(&self.ledger))?,
                "11" => {
                    let config = self.settings.simulation.clone();
                    run_simulation(&mut self.ledger, &config, &mut self.output)?;
                    true
                }
                "12" => self.save()?,
                "13" => self.load()?,
                "14" => self.export()?,
                "15" => {
                    writeln!(self.output, "\nLoading sample portfolio data...")?;
                    add_sample_data(&mut self.ledger)?;
                    writeln!(self.output, "Sample data loaded successfully!")?;
                    true
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        Ok(self.ledger)
    }

    fn show_menu(&mut self) -> Result<(), PortfolioError> {
        writeln!(self.output, "\n{}", "=".repeat(50))?;
        writeln!(self.output, "STOCK PORTFOLIO MANAGER")?;
        writeln!(self.output, "{}", "=".repeat(50))?;
        write!(self.output, "{MENU}")?;
        writeln!(self.output, "{}", "-".repeat(50))?;
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn print(&mut self, text: String) -> Result<bool, PortfolioError> {
        write!(self.output, "{text}")?;
        Ok(true)
    }

    fn read_line(&mut self) -> Result<Option<String>, PortfolioError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn ask_text(&mut self, prompt: &str) -> Result<Answer<String>, PortfolioError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(match self.read_line()? {
            Some(line) => Answer::Value(line.trim().to_string()),
            None => Answer::Eof,
        })
    }

    fn ask<T: FromStr>(&mut self, prompt: &str) -> Result<Answer<T>, PortfolioError> {
        Ok(match self.ask_text(prompt)? {
            Answer::Value(text) => match text.parse() {
                Ok(v) => Answer::Value(v),
                Err(_) => {
                    writeln!(self.output, "Invalid input '{}'.", text)?;
                    Answer::Invalid
                }
            },
            Answer::Invalid => Answer::Invalid,
            Answer::Eof => Answer::Eof,
        })
    }

    fn add_investment(&mut self) -> Result<bool, PortfolioError> {
        macro_rules! answer {
            ($e:expr) => {
                match $e {
                    Answer::Value(v) => v,
                    Answer::Invalid => return Ok(true),
                    Answer::Eof => return Ok(false),
                }
            };
        }
        let symbol = answer!(self.ask_text("\nEnter stock symbol: ")?);
        let company = answer!(self.ask_text("Enter company name: ")?);
        let shares: u64 = answer!(self.ask("Enter number of shares: ")?);
        let purchase: f64 = answer!(self.ask("Enter purchase price per share: $")?);
        let current: f64 = answer!(self.ask("Enter current price per share: $")?);

        let result = Security::new(symbol, company, current)
            .and_then(|security| Holding::new(security, shares, purchase))
            .and_then(|holding| self.ledger.add(holding));
        match result {
            Ok(()) => writeln!(self.output, "Investment added successfully!")?,
            Err(e) => writeln!(self.output, "Failed to add investment: {e}")?,
        }
        Ok(true)
    }

    fn remove_investment(&mut self) -> Result<bool, PortfolioError> {
        let Answer::Value(symbol) = self.ask_text("\nEnter stock symbol to remove: ")? else {
            return Ok(false);
        };
        match self.ledger.remove(&symbol) {
            Ok(_) => writeln!(self.output, "Investment removed successfully!")?,
            Err(_) => writeln!(self.output, "Investment not found.")?,
        }
        Ok(true)
    }

    fn update_price(&mut self) -> Result<bool, PortfolioError> {
        let Answer::Value(symbol) = self.ask_text("\nEnter stock symbol: ")? else {
            return Ok(false);
        };
        let price: f64 = match self.ask("Enter new price: $")? {
            Answer::Value(p) => p,
            Answer::Invalid => return Ok(true),
            Answer::Eof => return Ok(false),
        };
        match self.ledger.update_price(&symbol, price) {
            Ok(()) => writeln!(self.output, "Stock price updated successfully!")?,
            Err(e) => writeln!(self.output, "Failed to update stock price: {e}")?,
        }
        Ok(true)
    }

    fn sort_by_value(&mut self) -> Result<bool, PortfolioError> {
        let Answer::Value(choice) =
            self.ask_text("\nSort by value: (a)scending or (d)escending? ")?
        else {
            return Ok(false);
        };
        let ascending = choice.eq_ignore_ascii_case("a");
        self.ledger.sort_by_value(ascending);
        writeln!(self.output, "Investments sorted by value.")?;
        Ok(true)
    }

    fn top_performers(&mut self) -> Result<bool, PortfolioError> {
        let count: usize = match self.ask("\nEnter number of top performers to display: ")? {
            Answer::Value(n) => n,
            Answer::Invalid => return Ok(true),
            Answer::Eof => return Ok(false),
        };
        let text = console_report::render_top_performers(&self.ledger, count);
        self.print(text)
    }

    fn save(&mut self) -> Result<bool, PortfolioError> {
        let Answer::Value(answer) = self.ask_text("\nEnter filename to save: ")? else {
            return Ok(false);
        };
        let path = path_or_default(&answer, &self.settings.ledger_path);
        match self.store.save(&self.ledger, &path) {
            Ok(()) => writeln!(self.output, "Portfolio saved successfully!")?,
            Err(e) => {
                warn!("save to {} failed: {}", path.display(), e);
                writeln!(self.output, "Failed to save portfolio.")?
            }
        }
        Ok(true)
    }

    fn load(&mut self) -> Result<bool, PortfolioError> {
        let Answer::Value(answer) = self.ask_text("\nEnter filename to load: ")? else {
            return Ok(false);
        };
        let path = path_or_default(&answer, &self.settings.ledger_path);
        match self.store.load(&path) {
            Ok(ledger) => {
                self.ledger = ledger;
                writeln!(self.output, "Portfolio loaded successfully!")?
            }
            Err(e) => {
                warn!("load from {} failed: {}", path.display(), e);
                writeln!(self.output, "Failed to load portfolio.")?
            }
        }
        Ok(true)
    }

    fn export(&mut self) -> Result<bool, PortfolioError> {
        let Answer::Value(answer) = self.ask_text("\nEnter CSV filename: ")? else {
            return Ok(false);
        };
        if answer.is_empty() {
            writeln!(self.output, "No filename given.")?;
            return Ok(true);
        }
        match self.exporter.export(&self.ledger, Path::new(&answer)) {
            Ok(()) => writeln!(self.output, "Portfolio exported to CSV successfully!")?,
            Err(e) => {
                warn!("export to {} failed: {}", answer, e);
                writeln!(self.output, "Failed to export portfolio.")?
            }
        }
        Ok(true)
    }
}
