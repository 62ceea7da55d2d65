//! The `dashboard` command: a role-aware overview.
//!
//! Clients get balances and recent activity; admins get the client
//! statistics summary and never touch a banking endpoint.

use anyhow::Result;

use crate::api::Services;
use crate::model::{Account, Transaction};
use crate::session::SessionUser;

use super::{format_amount, format_timestamp, truncate};

pub async fn cmd_dashboard(services: &Services, user: &SessionUser) -> Result<()> {
    if user.is_admin() {
        admin_dashboard(services, user).await
    } else {
        client_dashboard(services, user).await
    }
}

async fn admin_dashboard(services: &Services, user: &SessionUser) -> Result<()> {
    let stats = services.admin.statistics().await?;

    println!();
    println!("=== Admin Dashboard ===");
    println!();
    println!("Welcome back, {}!", user.first_name);
    println!("Administrative access only. Administrator accounts do not hold banking accounts.");
    println!();
    println!("Total clients:       {}", stats.total_clients);
    println!("Active:              {}", stats.active_clients);
    println!("Inactive:            {}", stats.inactive_clients);
    println!("Suspended:           {}", stats.suspended_clients);
    println!("Blacklisted:         {}", stats.blacklisted_clients);
    println!();
    println!("See 'bankctl admin' and 'bankctl audit' for management commands.");
    println!();

    Ok(())
}

async fn client_dashboard(services: &Services, user: &SessionUser) -> Result<()> {
    let fetched = tokio::try_join!(
        services.banking.accounts_for_client(user.id),
        services.banking.transactions_for_client(user.id),
    );

    // A standing restriction on the client degrades the dashboard to a
    // read-only notice instead of failing the command outright.
    let mut suspended = false;
    let (accounts, transactions) = match fetched {
        Ok(data) => data,
        Err(err) => {
            if err.access_restriction().is_none() {
                return Err(err.into());
            }
            suspended = true;
            (Vec::new(), Vec::new())
        }
    };

    let recent: Vec<&Transaction> = transactions.iter().take(5).collect();
    let total_balance: f64 = accounts.iter().map(|account| account.balance).sum();

    println!();
    println!("=== Dashboard ===");
    println!();
    println!("Welcome back, {}!", user.first_name);

    if suspended {
        println!();
        println!("[!!] Account Temporarily Suspended");
        println!("     Your account has been temporarily suspended. You can still view your");
        println!("     account information, but you cannot perform any transactions. Please");
        println!("     contact customer support for assistance.");
    }

    println!();
    println!("Total balance:       {}", format_amount(total_balance));
    println!("Active accounts:     {}", accounts.len());
    println!("Recent transactions: {}", recent.len());
    println!();

    print_accounts(&accounts);
    print_recent(&recent);

    Ok(())
}

fn print_accounts(accounts: &[Account]) {
    println!("Your Accounts");
    println!("{}", "-".repeat(50));
    if accounts.is_empty() {
        println!("No accounts yet.");
    } else {
        for account in accounts {
            println!(
                "{:<18}  {:<10}  {:>14}",
                account.account_number,
                account.account_type.as_str(),
                format_amount(account.balance)
            );
        }
    }
    println!();
}

fn print_recent(recent: &[&Transaction]) {
    println!("Recent Transactions");
    println!("{}", "-".repeat(50));
    if recent.is_empty() {
        println!("No recent transactions.");
    } else {
        for tx in recent {
            println!(
                "{:<17}  {:<11}  {:>14}  {:<24}",
                format_timestamp(&tx.created_at),
                tx.transaction_type.as_str(),
                format_amount(tx.amount),
                truncate(tx.description.as_deref().unwrap_or("-"), 24)
            );
        }
    }
    println!();
}
