// src/extractors/trades.rs
use crate::extractors::rules::{parse_amount, parse_quantity, AMOUNT};
use crate::statement::{Direction, Trade, TradeBook};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// DATE  US  [BUY QTY] [SELL QTY]  <MON> <DD> CME MICRO S&P  <EX>  <PRICE>
//
// Both quantity columns are optional. When the text collapses the columns
// into single spaces a lone quantity always lands in `buy`; `sell` is only
// filled when the buy column prints a value (usually 0) as well.
static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        concat!(
            r"(?P<date>\d{{1,2}}/\d{{1,2}}/\d{{1,2}})\s+US\s+",
            r"(?:(?P<buy>\d*)\s*)?",
            r"(?:(?P<sell>\d*)\s+)?",
            r"(?P<contract>[A-Z]{{3}} \d{{2}} CME MICRO S&P)\s+\d+\s+",
            r"(?P<price>{amount})",
        ),
        amount = AMOUNT
    );
    Regex::new(&pattern).expect("Failed to compile TRADE_LINE_RE")
});

/// Collects every trade line, bucketed by `"{date} - {contract}"` in text order.
pub fn extract_trades(text: &str) -> Result<TradeBook, ExtractError> {
    let mut book = TradeBook::new();

    for caps in TRADE_LINE_RE.captures_iter(text) {
        let buy = parse_quantity("buy_quantity", caps.name("buy"))?;
        let sell = parse_quantity("sell_quantity", caps.name("sell"))?;

        // A zero buy quantity falls through to the sell column
        let (direction, quantity) = if buy > 0 {
            (Direction::Buy, buy)
        } else {
            (Direction::Sell, sell)
        };
        if quantity == 0 {
            tracing::warn!(
                "Trade line has no buy or sell quantity, recorded as SELL 0: '{}'",
                &caps[0]
            );
        }

        let trade = Trade {
            date: caps["date"].to_string(),
            contract: caps["contract"].trim().to_string(),
            direction,
            quantity,
            price: parse_amount("price", &caps["price"])?,
        };
        tracing::trace!("Trade: {:?}", trade);
        book.push(trade);
    }

    tracing::debug!(
        "Found {} trades in {} groups: {:?}",
        book.trade_count(),
        book.len(),
        book.keys().collect::<Vec<_>>()
    );
    Ok(book)
}

pub(crate) fn patterns() -> Vec<(&'static str, &'static Regex)> {
    vec![("trade", Lazy::force(&TRADE_LINE_RE))]
}
