//! The `report` command: monthly activity rollup for the session client.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Utc};

use crate::api::Services;
use crate::model::{parse_timestamp, Transaction, TransactionType};
use crate::session::SessionUser;

use super::format_amount;

/// One month of activity. Only deposits, withdrawals, and transfers are
/// bucketed; other transaction types still surface the month with zeros.
#[derive(Debug, Default)]
pub(crate) struct MonthlySummary {
    pub label: String,
    pub deposits: f64,
    pub withdrawals: f64,
    pub transfers: f64,
}

impl MonthlySummary {
    pub fn net(&self) -> f64 {
        self.deposits - self.withdrawals - self.transfers
    }
}

/// Group the last `days` of transactions by calendar month, oldest first.
/// Entries with unparseable timestamps fall outside every window.
pub(crate) fn monthly_activity(
    transactions: &[Transaction],
    days: i64,
    now: DateTime<Utc>,
) -> Vec<MonthlySummary> {
    let cutoff = now - Duration::days(days);
    let mut months: BTreeMap<(i32, u32), MonthlySummary> = BTreeMap::new();

    for tx in transactions {
        let ts = match parse_timestamp(&tx.created_at) {
            Some(ts) if ts >= cutoff => ts,
            _ => continue,
        };

        let entry = months.entry((ts.year(), ts.month())).or_insert_with(|| {
            MonthlySummary {
                label: ts.format("%b %Y").to_string(),
                ..MonthlySummary::default()
            }
        });

        match tx.transaction_type {
            TransactionType::Deposit => entry.deposits += tx.amount,
            TransactionType::Withdrawal => entry.withdrawals += tx.amount,
            TransactionType::Transfer => entry.transfers += tx.amount,
            _ => {}
        }
    }

    months.into_values().collect()
}

pub async fn cmd_report(services: &Services, user: &SessionUser, days: i64) -> Result<()> {
    let (accounts, transactions) = tokio::try_join!(
        services.banking.accounts_for_client(user.id),
        services.banking.transactions_for_client(user.id),
    )?;

    let total_balance: f64 = accounts.iter().map(|account| account.balance).sum();
    let total_deposits: f64 = transactions
        .iter()
        .filter(|tx| tx.transaction_type == TransactionType::Deposit)
        .map(|tx| tx.amount)
        .sum();
    let total_withdrawals: f64 = transactions
        .iter()
        .filter(|tx| tx.transaction_type == TransactionType::Withdrawal)
        .map(|tx| tx.amount)
        .sum();

    let monthly = monthly_activity(&transactions, days, Utc::now());

    println!();
    println!("=== Financial Reports ===");
    println!();
    println!("Activity for the last {} days.", days);
    println!();
    println!("Total balance:     {}", format_amount(total_balance));
    println!("Active accounts:   {}", accounts.len());
    println!("Total deposits:    {}", format_amount(total_deposits));
    println!("Total withdrawals: {}", format_amount(total_withdrawals));
    println!();

    println!("Monthly Activity");
    println!("{}", "-".repeat(76));
    if monthly.is_empty() {
        println!("No activity in the selected period.");
    } else {
        println!(
            "{:<9}  {:>14}  {:>14}  {:>14}  {:>14}",
            "MONTH", "DEPOSITS", "WITHDRAWALS", "TRANSFERS", "NET"
        );
        for month in &monthly {
            println!(
                "{:<9}  {:>14}  {:>14}  {:>14}  {:>14}",
                month.label,
                format_amount(month.deposits),
                format_amount(month.withdrawals),
                format_amount(month.transfers),
                format_amount(month.net())
            );
        }
    }
    println!();

    Ok(())
}
