//! Account commands: list, open, balance, transact check.

use anyhow::Result;

use crate::api::Services;
use crate::cli::AccountCommands;
use crate::model::AccountType;
use crate::session::SessionUser;

use super::{format_amount, format_timestamp};

pub async fn run(
    services: &Services,
    user: &SessionUser,
    command: &AccountCommands,
) -> Result<()> {
    match command {
        AccountCommands::List => cmd_list(services, user).await,
        AccountCommands::Open { account_type } => cmd_open(services, user, *account_type).await,
        AccountCommands::Balance { account_id } => cmd_balance(services, *account_id).await,
        AccountCommands::Check { account_id } => cmd_check(services, *account_id).await,
    }
}

async fn cmd_list(services: &Services, user: &SessionUser) -> Result<()> {
    let accounts = services.banking.accounts_for_client(user.id).await?;

    if accounts.is_empty() {
        println!("No accounts found.");
        println!("Open one with 'bankctl account open savings'.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<18}  {:<10}  {:<10}  {:>14}",
        "ID", "ACCOUNT NUMBER", "TYPE", "STATUS", "BALANCE"
    );
    println!("{}", "-".repeat(68));

    let mut total = 0.0;
    for account in &accounts {
        total += account.balance;
        println!(
            "{:<6}  {:<18}  {:<10}  {:<10}  {:>14}",
            account.id,
            account.account_number,
            account.account_type.as_str(),
            account.status,
            format_amount(account.balance)
        );
    }

    println!("{}", "-".repeat(68));
    println!("{:>54}  {:>14}", "Total:", format_amount(total));
    println!();

    Ok(())
}

async fn cmd_open(services: &Services, user: &SessionUser, account_type: AccountType) -> Result<()> {
    let account = services.banking.create_account(user.id, account_type).await?;

    println!();
    println!("[OK] Account opened!");
    println!();
    println!("Account Number: {}", account.account_number);
    println!("Type:           {}", account.account_type.as_str());
    println!("Balance:        {}", format_amount(account.balance));
    if let Some(created) = &account.created_at {
        println!("Created:        {}", format_timestamp(created));
    }
    println!();

    Ok(())
}

async fn cmd_balance(services: &Services, account_id: i64) -> Result<()> {
    let balance = services.banking.account_balance(account_id).await?;
    println!("Account {} balance: {}", account_id, format_amount(balance));
    Ok(())
}

async fn cmd_check(services: &Services, account_id: i64) -> Result<()> {
    let allowed = services.banking.can_transact(account_id).await?;
    if allowed {
        println!("[OK] Account {} can transact.", account_id);
    } else {
        println!("[!!] Account {} cannot transact.", account_id);
        println!("Please contact customer support for assistance.");
    }
    Ok(())
}
