//! Reads a transaction dataset: one transaction per line, item ids
//! separated by spaces, commas, or tabs.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EclatError, Result};
use crate::types::{ItemId, Transaction, TransactionBag};

/// Parses `path` into a transaction bag, keeping only the first
/// `round(frac * line_count)` transactions. Blank lines are skipped; a
/// non-numeric token or an empty transaction is an input error carrying
/// the 1-based line number. A file with no transactions at all is an
/// input error: there is nothing to derive a support threshold from.
pub fn read_transactions(path: &Path, frac: f64) -> Result<TransactionBag> {
    let raw = fs::read_to_string(path).map_err(|e| {
        EclatError::input(format!("can not read {}: {}", path.display(), e))
    })?;
    parse_transactions(&raw, frac)
}

fn parse_transactions(raw: &str, frac: f64) -> Result<TransactionBag> {
    let lines: Vec<&str> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let keep = (frac * lines.len() as f64).round() as usize;

    let mut transactions: Vec<Transaction> = Vec::with_capacity(keep);
    for (lineno, line) in raw.lines().enumerate() {
        if transactions.len() == keep {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let transaction = parse_line(line, lineno + 1)?;
        transactions.push(transaction);
    }

    if transactions.is_empty() {
        return Err(EclatError::input("no transactions in input"));
    }

    debug!(transactions = transactions.len(), "dataset read");
    Ok(TransactionBag::new(transactions))
}

fn parse_line(line: &str, lineno: usize) -> Result<Transaction> {
    let items: Transaction = line
        .split(|c| c == ' ' || c == ',' || c == '\t')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<ItemId>().map_err(|_| {
                EclatError::input_at(format!("invalid item {:?}", token), lineno)
            })
        })
        .collect::<Result<_>>()?;

    if items.is_empty() {
        return Err(EclatError::input_at("empty transaction", lineno));
    }
    Ok(items)
}
