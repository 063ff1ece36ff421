//! Plain-text tables and summaries for the terminal.

use crate::domain::holding::Holding;
use crate::domain::ledger::Ledger;
use crate::domain::security::Security;

const COMPANY_WIDTH: usize = 24;

fn rule(ch: char, width: usize) -> String {
    format!("{}\n", ch.to_string().repeat(width))
}

fn banner(title: &str, width: usize) -> String {
    format!("\n{}{}\n{}", rule('=', width), title, rule('=', width))
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn render_security(security: &Security) -> String {
    let mut out = String::new();
    out.push_str(&format!("Symbol: {}\n", security.symbol()));
    out.push_str(&format!("Company: {}\n", security.name()));
    out.push_str(&format!("Current Price: ${:.2}\n", security.current_price()));
    out.push_str(&format!("Previous Price: ${:.2}\n", security.previous_price()));
    out.push_str(&format!(
        "Price Change: ${:.2} ({:.2}%)\n",
        security.price_change(),
        security.percentage_change()
    ));
    out
}

pub fn render_holding(holding: &Holding) -> String {
    let security = holding.security();
    let mut out = String::new();
    out.push_str(&format!("Symbol: {}\n", security.symbol()));
    out.push_str(&format!("Company: {}\n", security.name()));
    out.push_str(&format!("Shares Owned: {}\n", holding.shares_owned()));
    out.push_str(&format!("Purchase Price: ${:.2}\n", holding.average_cost()));
    out.push_str(&format!("Current Price: ${:.2}\n", security.current_price()));
    out.push_str(&format!("Total Invested: ${:.2}\n", holding.total_invested()));
    out.push_str(&format!("Current Value: ${:.2}\n", holding.current_value()));
    out.push_str(&format!(
        "Gain/Loss: ${:.2} ({:.2}%)\n",
        holding.gain_loss(),
        holding.percentage_return()
    ));
    out
}

pub fn render_table(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str(&banner(&format!("PORTFOLIO: {}", ledger.name()), 60));

    if ledger.is_empty() {
        out.push_str("No investments in portfolio.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<8}{:<25}{:<8}{:<12}{:<12}{:<12}{:<12}Return%\n",
        "Symbol", "Company", "Shares", "Avg Cost", "Curr Price", "Value", "Gain/Loss"
    ));
    out.push_str(&rule('-', 100));
    for holding in ledger {
        let security = holding.security();
        out.push_str(&format!(
            "{:<8}{:<25}{:<8}${:<11.2}${:<11.2}${:<11.2}${:<11.2}{:.2}%\n",
            security.symbol(),
            truncate(security.name(), COMPANY_WIDTH),
            holding.shares_owned(),
            holding.average_cost(),
            security.current_price(),
            holding.current_value(),
            holding.gain_loss(),
            holding.percentage_return()
        ));
    }
    out
}

pub fn render_summary(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str(&banner(&format!("PORTFOLIO SUMMARY: {}", ledger.name()), 50));
    out.push_str(&format!("Total Investments: {}\n", ledger.len()));
    out.push_str(&format!("Total Invested: ${:.2}\n", ledger.total_initial_investment()));
    out.push_str(&format!("Current Value: ${:.2}\n", ledger.current_value()));
    out.push_str(&format!("Total Gain/Loss: ${:.2}\n", ledger.total_gain_loss()));
    out.push_str(&format!("Portfolio Return: {:.2}%\n", ledger.percentage_return()));
    out.push_str(&format!("Average Return: {:.2}%\n", ledger.average_return()));
    out
}

pub fn render_detailed_report(ledger: &Ledger) -> String {
    let mut out = render_summary(ledger);
    out.push_str(&render_table(ledger));

    if let (Ok(top), Ok(worst)) = (ledger.top_performer(), ledger.worst_performer()) {
        out.push_str(&banner("PERFORMANCE ANALYSIS", 50));
        out.push_str(&format!(
            "Top Performer: {} ({:.2}%)\n",
            top.symbol(),
            top.percentage_return()
        ));
        out.push_str(&format!(
            "Worst Performer: {} ({:.2}%)\n",
            worst.symbol(),
            worst.percentage_return()
        ));
        out.push_str(&format!("Losing Investments: {}\n", ledger.losers().len()));
    }
    out
}

pub fn render_top_performers(ledger: &Ledger, count: usize) -> String {
    let top = ledger.top_performers(count);
    let mut out = String::new();
    out.push_str(&format!("Top {} Performers:\n", top.len()));
    out.push_str(&rule('-', 80));
    for holding in top {
        out.push_str(&format!(
            "{} ({}): {:.2}%\n",
            holding.symbol(),
            holding.security().name(),
            holding.percentage_return()
        ));
    }
    out
}

pub fn render_losers(ledger: &Ledger) -> String {
    let losers = ledger.losers();
    if losers.is_empty() {
        return "No losing investments found!\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!("Losing Investments ({}):\n", losers.len()));
    out.push_str(&rule('-', 80));
    for holding in losers {
        out.push_str(&format!(
            "{} ({}): ${:.2} ({:.2}%)\n",
            holding.symbol(),
            holding.security().name(),
            holding.gain_loss(),
            holding.percentage_return()
        ));
    }
    out
}
