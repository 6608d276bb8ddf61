// src/extractors/summary.rs
//! Fees, gross profit/loss and account balances. Each value is one named
//! [`AmountRule`]; a label missing from the statement leaves its field at 0.0.

use crate::extractors::rules::{apply_all, AmountRule, AMOUNT};
use crate::statement::{Balances, Fees};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// Fees are printed as debits ("12.50-"); the minus stays outside the capture.
static FEE_RULES: Lazy<Vec<AmountRule<Fees>>> = Lazy::new(|| {
    vec![
        AmountRule::new(
            "commission",
            &format!(r"COMMISSION\s+US\s+({AMOUNT})-"),
            |fees: &mut Fees, v: f64| fees.commission = v,
        ),
        AmountRule::new(
            "exchange_fee",
            &format!(r"EXCHANGE FEE\s+US\s+({AMOUNT})-"),
            |fees: &mut Fees, v: f64| fees.exchange_fee = v,
        ),
        AmountRule::new(
            "nfa_fee",
            &format!(r"NFA FEE\s+US\s+({AMOUNT})-"),
            |fees: &mut Fees, v: f64| fees.nfa_fee = v,
        ),
        AmountRule::new(
            "total_fees",
            &format!(r"TOTAL COMMISSION AND FEES\s+({AMOUNT})-"),
            |fees: &mut Fees, v: f64| fees.total_fees = v,
        ),
    ]
});

static GROSS_PROFIT_LOSS_RULE: Lazy<AmountRule<f64>> = Lazy::new(|| {
    AmountRule::new(
        "gross_profit_loss",
        &format!(r"GROSS PROFIT OR LOSS\s+US\s+(-?{AMOUNT}-?)"),
        |total: &mut f64, v: f64| *total = v,
    )
});

static BALANCE_RULES: Lazy<Vec<AmountRule<Balances>>> = Lazy::new(|| {
    vec![
        AmountRule::new(
            "beginning_balance",
            &format!(r"BEGINNING BALANCE\s+({AMOUNT})"),
            |b: &mut Balances, v: f64| b.beginning_balance = v,
        ),
        AmountRule::new(
            "ending_balance",
            &format!(r"ENDING BALANCE\s+({AMOUNT})"),
            |b: &mut Balances, v: f64| b.ending_balance = v,
        ),
        AmountRule::new(
            "total_equity",
            &format!(r"TOTAL EQUITY\s+({AMOUNT})"),
            |b: &mut Balances, v: f64| b.total_equity = v,
        ),
        AmountRule::new(
            "account_value",
            &format!(r"ACCOUNT VALUE AT MARKET\s+({AMOUNT})"),
            |b: &mut Balances, v: f64| b.account_value = v,
        ),
        AmountRule::new(
            "excess_equity",
            &format!(r"EXCESS EQUITY\s+({AMOUNT})"),
            |b: &mut Balances, v: f64| b.excess_equity = v,
        ),
    ]
});

pub fn extract_fees(text: &str) -> Result<Fees, ExtractError> {
    let fees = apply_all(FEE_RULES.as_slice(), text)?;
    tracing::debug!("Fees: {:?}", fees);
    Ok(fees)
}

/// Signed: a leading or trailing minus is kept as a loss.
pub fn extract_gross_profit_loss(text: &str) -> Result<f64, ExtractError> {
    let mut total = 0.0;
    GROSS_PROFIT_LOSS_RULE.apply(text, &mut total)?;
    Ok(total)
}

pub fn extract_balances(text: &str) -> Result<Balances, ExtractError> {
    let balances = apply_all(BALANCE_RULES.as_slice(), text)?;
    tracing::debug!("Balances: {:?}", balances);
    Ok(balances)
}

pub(crate) fn patterns() -> Vec<(&'static str, &'static Regex)> {
    let fees: &'static [AmountRule<Fees>] = &FEE_RULES;
    let balances: &'static [AmountRule<Balances>] = &BALANCE_RULES;
    let gross: &'static AmountRule<f64> = &GROSS_PROFIT_LOSS_RULE;

    fees.iter()
        .map(|r| (r.field, &r.regex))
        .chain(std::iter::once((gross.field, &gross.regex)))
        .chain(balances.iter().map(|r| (r.field, &r.regex)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_sign_is_stripped() {
        let fees = extract_fees("COMMISSION US 12.50-").unwrap();
        assert_eq!(fees.commission, 12.50);
        assert_eq!(fees.exchange_fee, 0.0);
    }

    #[test]
    fn test_all_fees() {
        let text = concat!(
            "COMMISSION                 US         4.20-\n",
            "EXCHANGE FEE               US         3.00-\n",
            "NFA FEE                    US         0.12-\n",
            "TOTAL COMMISSION AND FEES             7.32-\n",
        );
        let fees = extract_fees(text).unwrap();

        assert_eq!(fees, Fees { commission: 4.20, exchange_fee: 3.00, nfa_fee: 0.12, total_fees: 7.32 });
    }

    #[test]
    fn test_fee_without_debit_marker_is_ignored() {
        let fees = extract_fees("COMMISSION US 12.50\n").unwrap();
        assert_eq!(fees.commission, 0.0);
    }

    #[test]
    fn test_gross_profit_loss_keeps_sign() {
        assert_eq!(extract_gross_profit_loss("GROSS PROFIT OR LOSS US -45.00").unwrap(), -45.00);
        assert_eq!(extract_gross_profit_loss("GROSS PROFIT OR LOSS US 45.00-").unwrap(), -45.00);
        assert_eq!(extract_gross_profit_loss("GROSS PROFIT OR LOSS US 1,045.00").unwrap(), 1045.00);
        assert_eq!(extract_gross_profit_loss("no totals").unwrap(), 0.0);
    }

    #[test]
    fn test_balances() {
        let text = concat!(
            "BEGINNING BALANCE          10,000.00\n",
            "ENDING BALANCE              9,950.18\n",
            "TOTAL EQUITY                9,950.18\n",
            "ACCOUNT VALUE AT MARKET     9,950.18\n",
        );
        let balances = extract_balances(text).unwrap();

        assert_eq!(balances.beginning_balance, 10_000.00);
        assert_eq!(balances.ending_balance, 9_950.18);
        assert_eq!(balances.total_equity, 9_950.18);
        assert_eq!(balances.account_value, 9_950.18);
        assert_eq!(balances.excess_equity, 0.0, "Missing label should stay at zero");
    }

    #[test]
    fn test_every_rule_is_listed_for_debugging() {
        let names: Vec<&str> = patterns().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"gross_profit_loss"));
        assert!(names.contains(&"excess_equity"));
    }
}
