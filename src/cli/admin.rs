//! Admin commands: client roster, blacklisting, status changes, statistics.

use anyhow::Result;

use crate::api::Services;
use crate::cli::AdminCommands;
use crate::model::{AdminClient, ClientStatistics, ClientStatus};

use super::{format_timestamp, truncate, validation};

pub async fn run(services: &Services, command: &AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Clients => cmd_clients(services).await,
        AdminCommands::Client { client_id } => cmd_client(services, *client_id).await,
        AdminCommands::Search { query } => cmd_search(services, query).await,
        AdminCommands::Blacklist { client_id, reason } => {
            cmd_blacklist(services, *client_id, reason).await
        }
        AdminCommands::Unblacklist { client_id } => cmd_unblacklist(services, *client_id).await,
        AdminCommands::Status { client_id, status } => {
            cmd_status(services, *client_id, *status).await
        }
        AdminCommands::Stats => cmd_stats(services).await,
    }
}

async fn cmd_clients(services: &Services) -> Result<()> {
    let (clients, stats) = tokio::try_join!(
        services.admin.clients(),
        services.admin.statistics()
    )?;

    print_stats(&stats);
    if clients.is_empty() {
        println!("No clients registered.");
        return Ok(());
    }
    print_client_table(&clients);
    Ok(())
}

async fn cmd_client(services: &Services, client_id: i64) -> Result<()> {
    let client = services.admin.client(client_id).await?;

    println!();
    println!("=== Client {} ===", client.id);
    println!();
    println!("Name:    {} {}", client.first_name, client.last_name);
    println!("Email:   {}", client.email);
    println!("Phone:   {}", client.phone);
    println!("Status:  {}", client.status);
    if let Some(created_at) = &client.created_at {
        println!("Created: {}", format_timestamp(created_at));
    }
    if client.blacklisted {
        println!();
        println!("[!!] BLACKLISTED");
        if let Some(reason) = &client.blacklist_reason {
            println!("     Reason: {}", reason);
        }
    }
    println!();

    Ok(())
}

async fn cmd_search(services: &Services, query: &str) -> Result<()> {
    let clients = services.admin.search(query).await?;
    if clients.is_empty() {
        println!("No clients matched '{}'.", query);
        return Ok(());
    }
    print_client_table(&clients);
    Ok(())
}

async fn cmd_blacklist(services: &Services, client_id: i64, reason: &str) -> Result<()> {
    if let Err(message) = validation::validate_blacklist_reason(reason) {
        anyhow::bail!(message);
    }

    let client = services.admin.blacklist(client_id, reason).await?;
    println!();
    println!(
        "[OK] Client {} {} blacklisted.",
        client.first_name, client.last_name
    );

    // Counts change on blacklist, so show fresh numbers.
    let stats = services.admin.statistics().await?;
    print_stats(&stats);

    Ok(())
}

async fn cmd_unblacklist(services: &Services, client_id: i64) -> Result<()> {
    let client = services.admin.unblacklist(client_id).await?;
    println!();
    println!(
        "[OK] Client {} {} removed from the blacklist.",
        client.first_name, client.last_name
    );

    let stats = services.admin.statistics().await?;
    print_stats(&stats);

    Ok(())
}

async fn cmd_status(services: &Services, client_id: i64, status: ClientStatus) -> Result<()> {
    let client = services.admin.set_status(client_id, status).await?;
    println!(
        "[OK] Client {} {} status set to {}.",
        client.first_name,
        client.last_name,
        status.as_str()
    );
    Ok(())
}

async fn cmd_stats(services: &Services) -> Result<()> {
    let stats = services.admin.statistics().await?;
    print_stats(&stats);
    Ok(())
}

fn print_client_table(clients: &[AdminClient]) {
    println!();
    println!(
        "{:<6}  {:<24}  {:<28}  {:<10}  {:<12}",
        "ID", "NAME", "EMAIL", "STATUS", "BLACKLIST"
    );
    println!("{}", "-".repeat(88));

    for client in clients {
        let name = format!("{} {}", client.first_name, client.last_name);
        println!(
            "{:<6}  {:<24}  {:<28}  {:<10}  {:<12}",
            client.id,
            truncate(&name, 24),
            truncate(&client.email, 28),
            client.status,
            if client.blacklisted { "BLACKLISTED" } else { "-" }
        );
    }

    let active = clients.iter().filter(|c| c.status == "ACTIVE").count();
    let blacklisted = clients.iter().filter(|c| c.blacklisted).count();
    println!();
    println!(
        "{} clients ({} active, {} blacklisted)",
        clients.len(),
        active,
        blacklisted
    );
    println!();
}

fn print_stats(stats: &ClientStatistics) {
    println!();
    println!("=== Client Statistics ===");
    println!();
    println!("Total clients: {}", stats.total_clients);
    println!("Active:        {}", stats.active_clients);
    println!("Inactive:      {}", stats.inactive_clients);
    println!("Suspended:     {}", stats.suspended_clients);
    println!("Blacklisted:   {}", stats.blacklisted_clients);
    println!();
}
