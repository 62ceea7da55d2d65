//! Transaction commands: history with filters, deposit, withdraw, transfer.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use crate::api::Services;
use crate::cli::TxCommands;
use crate::model::{parse_timestamp, Transaction, TransactionType};
use crate::session::SessionUser;

use super::{format_amount, format_timestamp, truncate, validation};

pub async fn run(services: &Services, user: &SessionUser, command: &TxCommands) -> Result<()> {
    match command {
        TxCommands::List {
            account,
            tx_type,
            days,
            search,
        } => cmd_list(services, user, *account, *tx_type, *days, search.as_deref()).await,
        TxCommands::Deposit {
            account_id,
            amount,
            description,
        } => cmd_deposit(services, *account_id, *amount, description.clone()).await,
        TxCommands::Withdraw {
            account_id,
            amount,
            description,
        } => cmd_withdraw(services, *account_id, *amount, description.clone()).await,
        TxCommands::Transfer {
            from_account,
            to_account,
            amount,
            description,
        } => {
            cmd_transfer(services, *from_account, *to_account, *amount, description.clone()).await
        }
        TxCommands::Show { transaction_id } => cmd_show(services, *transaction_id).await,
    }
}

/// Apply the history filters locally: exact type match, a last-N-days
/// cutoff, and a case-insensitive search over description, reference and
/// type. Entries whose timestamp does not parse fall outside any cutoff.
pub(crate) fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    tx_type: Option<TransactionType>,
    days: i64,
    search: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<&'a Transaction> {
    let cutoff = now - Duration::days(days);
    let term = search.map(str::to_lowercase);

    transactions
        .iter()
        .filter(|tx| match tx_type {
            Some(wanted) => tx.transaction_type == wanted,
            None => true,
        })
        .filter(|tx| match parse_timestamp(&tx.created_at) {
            Some(ts) => ts >= cutoff,
            None => false,
        })
        .filter(|tx| match &term {
            Some(term) => {
                tx.description
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(term)
                    || tx.reference_number.to_lowercase().contains(term)
                    || tx.transaction_type.as_str().to_lowercase().contains(term)
            }
            None => true,
        })
        .collect()
}

/// Signed display amount: deposits count up, everything else counts down.
fn signed_amount(tx: &Transaction) -> String {
    if tx.transaction_type == TransactionType::Deposit {
        format!("+{}", format_amount(tx.amount))
    } else {
        format!("-{}", format_amount(tx.amount))
    }
}

async fn cmd_list(
    services: &Services,
    user: &SessionUser,
    account: Option<i64>,
    tx_type: Option<TransactionType>,
    days: i64,
    search: Option<&str>,
) -> Result<()> {
    let transactions = match account {
        Some(account_id) => services.banking.transactions_for_account(account_id).await?,
        None => services.banking.transactions_for_client(user.id).await?,
    };

    let filtered = filter_transactions(&transactions, tx_type, days, search, Utc::now());

    if filtered.is_empty() {
        println!("No transactions found.");
        if filtered.len() != transactions.len() {
            println!("Try adjusting your filters or search terms.");
        }
        return Ok(());
    }

    println!();
    println!(
        "{:<17}  {:<11}  {:>14}  {:>14}  {:<16}  {:<28}",
        "DATE", "TYPE", "AMOUNT", "BALANCE AFTER", "REFERENCE", "DESCRIPTION"
    );
    println!("{}", "-".repeat(110));

    for tx in &filtered {
        println!(
            "{:<17}  {:<11}  {:>14}  {:>14}  {:<16}  {:<28}",
            format_timestamp(&tx.created_at),
            tx.transaction_type.as_str(),
            signed_amount(tx),
            format_amount(tx.balance_after),
            tx.reference_number,
            truncate(tx.description.as_deref().unwrap_or("-"), 28)
        );
    }

    println!();
    println!(
        "Showing {} of {} transactions",
        filtered.len(),
        transactions.len()
    );
    println!();

    Ok(())
}

async fn cmd_deposit(
    services: &Services,
    account_id: i64,
    amount: f64,
    description: Option<String>,
) -> Result<()> {
    if let Err(message) = validation::validate_amount(amount) {
        anyhow::bail!(message);
    }

    let tx = services.banking.deposit(account_id, amount, description).await?;

    println!();
    println!("[OK] Deposit complete!");
    println!();
    println!("Reference:     {}", tx.reference_number);
    println!("Amount:        {}", format_amount(tx.amount));
    println!("Balance after: {}", format_amount(tx.balance_after));
    println!();

    Ok(())
}

async fn cmd_withdraw(
    services: &Services,
    account_id: i64,
    amount: f64,
    description: Option<String>,
) -> Result<()> {
    if let Err(message) = validation::validate_amount(amount) {
        anyhow::bail!(message);
    }

    let tx = services.banking.withdraw(account_id, amount, description).await?;

    println!();
    println!("[OK] Withdrawal complete!");
    println!();
    println!("Reference:     {}", tx.reference_number);
    println!("Amount:        {}", format_amount(tx.amount));
    println!("Balance after: {}", format_amount(tx.balance_after));
    println!();

    Ok(())
}

async fn cmd_transfer(
    services: &Services,
    from_account: i64,
    to_account: i64,
    amount: f64,
    description: Option<String>,
) -> Result<()> {
    if let Err(message) = validation::validate_amount(amount) {
        anyhow::bail!(message);
    }
    if from_account == to_account {
        anyhow::bail!("Source and destination accounts must differ.");
    }

    let tx = services
        .banking
        .transfer(from_account, to_account, amount, description)
        .await?;

    println!();
    println!("[OK] Transfer complete!");
    println!();
    println!("Reference:     {}", tx.reference_number);
    println!("From account:  {}", from_account);
    println!("To account:    {}", to_account);
    println!("Amount:        {}", format_amount(tx.amount));
    println!("Balance after: {}", format_amount(tx.balance_after));
    println!();

    Ok(())
}

async fn cmd_show(services: &Services, transaction_id: i64) -> Result<()> {
    let tx = services.banking.transaction(transaction_id).await?;

    println!();
    println!("=== Transaction {} ===", tx.reference_number);
    println!();
    println!("Type:          {}", tx.transaction_type.as_str());
    println!("Amount:        {}", format_amount(tx.amount));
    println!("Balance after: {}", format_amount(tx.balance_after));
    println!("Account:       {}", tx.account_id);
    if let Some(from) = &tx.from_account {
        println!("From:          {}", from);
    }
    if let Some(to) = &tx.to_account {
        println!("To:            {}", to);
    }
    if let Some(description) = &tx.description {
        println!("Description:   {}", description);
    }
    println!("Date:          {}", format_timestamp(&tx.created_at));
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(id: i64, tx_type: TransactionType, description: &str, created_at: &str) -> Transaction {
        Transaction {
            id,
            transaction_type: tx_type,
            amount: 25.0,
            balance_after: 100.0,
            description: Some(description.to_string()),
            account_id: 1,
            reference_number: format!("TXN-{}", id),
            from_account: None,
            to_account: None,
            created_at: created_at.to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_filter_by_type() {
        let txs = vec![
            tx(1, TransactionType::Deposit, "payday", "2024-03-14T09:00:00"),
            tx(2, TransactionType::Withdrawal, "rent", "2024-03-14T10:00:00"),
            tx(3, TransactionType::Deposit, "refund", "2024-03-14T11:00:00"),
        ];
        let filtered =
            filter_transactions(&txs, Some(TransactionType::Deposit), 30, None, fixed_now());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|t| t.transaction_type == TransactionType::Deposit));
    }

    #[test]
    fn test_filter_by_date_window() {
        let txs = vec![
            tx(1, TransactionType::Deposit, "recent", "2024-03-10T09:00:00"),
            tx(2, TransactionType::Deposit, "old", "2024-01-05T09:00:00"),
        ];
        let filtered = filter_transactions(&txs, None, 30, None, fixed_now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);

        // widen the window and the old one comes back
        let filtered = filter_transactions(&txs, None, 90, None, fixed_now());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_unparseable_timestamp_is_excluded() {
        let txs = vec![
            tx(1, TransactionType::Deposit, "good", "2024-03-14T09:00:00"),
            tx(2, TransactionType::Deposit, "bad date", "soon"),
        ];
        let filtered = filter_transactions(&txs, None, 30, None, fixed_now());
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_search_covers_description_reference_and_type() {
        let txs = vec![
            tx(1, TransactionType::Deposit, "march payday", "2024-03-14T09:00:00"),
            tx(2, TransactionType::Withdrawal, "rent", "2024-03-14T10:00:00"),
            tx(3, TransactionType::Transfer, "savings move", "2024-03-14T11:00:00"),
        ];

        // description, case-insensitive
        let by_description = filter_transactions(&txs, None, 30, Some("PAYDAY"), fixed_now());
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, 1);

        // reference number
        let by_reference = filter_transactions(&txs, None, 30, Some("txn-2"), fixed_now());
        assert_eq!(by_reference.len(), 1);
        assert_eq!(by_reference[0].id, 2);

        // transaction type text
        let by_type = filter_transactions(&txs, None, 30, Some("transfer"), fixed_now());
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].id, 3);
    }

    #[test]
    fn test_filters_combine() {
        let txs = vec![
            tx(1, TransactionType::Deposit, "payday", "2024-03-14T09:00:00"),
            tx(2, TransactionType::Deposit, "payday", "2023-12-01T09:00:00"),
            tx(3, TransactionType::Withdrawal, "payday", "2024-03-14T10:00:00"),
        ];
        let filtered = filter_transactions(
            &txs,
            Some(TransactionType::Deposit),
            30,
            Some("payday"),
            fixed_now(),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_only_deposits_display_positive() {
        let deposit = tx(1, TransactionType::Deposit, "in", "2024-03-14T09:00:00");
        let withdrawal = tx(2, TransactionType::Withdrawal, "out", "2024-03-14T09:00:00");
        let transfer = tx(3, TransactionType::Transfer, "move", "2024-03-14T09:00:00");

        assert_eq!(signed_amount(&deposit), "+$25.00");
        assert_eq!(signed_amount(&withdrawal), "-$25.00");
        assert_eq!(signed_amount(&transfer), "-$25.00");
    }
}
