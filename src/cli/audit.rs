//! Audit commands: trail browsing, statistics, CSV export, and the
//! compliance report presets.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::api::Services;
use crate::cli::{AuditCommands, AuditReportCommands};
use crate::model::{AuditLog, AuditPage, AuditSearchQuery, AuditStatistics};

use super::{format_timestamp, truncate};

pub async fn run(services: &Services, command: &AuditCommands) -> Result<()> {
    match command {
        AuditCommands::List { page, size } => cmd_list(services, *page, *size).await,
        AuditCommands::Search {
            term,
            entity_type,
            action,
            from,
            to,
            page,
            size,
        } => {
            let filters = AuditSearchQuery {
                search_term: term.clone(),
                entity_type: entity_type.clone(),
                action: *action,
                start_date: from.as_deref().map(parse_day).transpose()?.map(day_start),
                end_date: to.as_deref().map(parse_day).transpose()?.map(day_end),
                page: *page,
                size: *size,
            };
            cmd_search(services, &filters).await
        }
        AuditCommands::Recent => cmd_recent(services).await,
        AuditCommands::Security { page, size } => cmd_security(services, *page, *size).await,
        AuditCommands::Failed { page, size } => cmd_failed(services, *page, *size).await,
        AuditCommands::Stats { from, to } => {
            cmd_stats(services, from.as_deref(), to.as_deref()).await
        }
        AuditCommands::Export { from, to, output } => {
            cmd_export(services, from, to, output.clone()).await
        }
        AuditCommands::Report(report) => cmd_report(services, report).await,
    }
}

/// Parse a `YYYY-MM-DD` command argument.
fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Use YYYY-MM-DD.", value))
}

/// Start of day in the wire format the audit service expects.
fn day_start(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// End of day, inclusive to the millisecond.
fn day_end(date: NaiveDate) -> String {
    format!("{}T23:59:59.999Z", date.format("%Y-%m-%d"))
}

fn iso_millis(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

async fn cmd_list(services: &Services, page: u32, size: u32) -> Result<()> {
    let logs = services.audit.logs(page, size).await?;
    print_page(&logs, page);
    Ok(())
}

async fn cmd_search(services: &Services, filters: &AuditSearchQuery) -> Result<()> {
    let logs = services.audit.search(filters).await?;
    print_page(&logs, filters.page);
    Ok(())
}

async fn cmd_recent(services: &Services) -> Result<()> {
    let logs = services.audit.recent().await?;
    if logs.is_empty() {
        println!("No recent audit activity.");
        return Ok(());
    }
    print_log_table(&logs);
    println!("{} recent events", logs.len());
    println!();
    Ok(())
}

async fn cmd_security(services: &Services, page: u32, size: u32) -> Result<()> {
    let logs = services.audit.security_logs(page, size).await?;
    print_page(&logs, page);
    Ok(())
}

async fn cmd_failed(services: &Services, page: u32, size: u32) -> Result<()> {
    let logs = services.audit.failed_logs(page, size).await?;
    print_page(&logs, page);
    Ok(())
}

async fn cmd_stats(services: &Services, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let start = from.map(parse_day).transpose()?.map(day_start);
    let end = to.map(parse_day).transpose()?.map(day_end);
    let stats = services
        .audit
        .statistics(start.as_deref(), end.as_deref())
        .await?;
    print_stats(&stats);
    Ok(())
}

async fn cmd_export(
    services: &Services,
    from: &str,
    to: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let start = day_start(parse_day(from)?);
    let end = day_end(parse_day(to)?);

    let bytes = services.audit.export_csv(&start, &end).await?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!("audit_logs_{}.csv", Utc::now().format("%Y-%m-%d")))
    });
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("[OK] Exported {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

async fn cmd_report(services: &Services, command: &AuditReportCommands) -> Result<()> {
    let report = match command {
        AuditReportCommands::Compliance { from, to } => {
            let start = day_start(parse_day(from)?);
            let end = day_end(parse_day(to)?);
            services.audit.compliance_report(&start, &end).await?
        }
        AuditReportCommands::Daily => {
            let end = Utc::now();
            let start = end - Duration::hours(24);
            services
                .audit
                .compliance_report(&iso_millis(start), &iso_millis(end))
                .await?
        }
        AuditReportCommands::Security => {
            let end = Utc::now();
            let start = end - Duration::days(30);
            services
                .audit
                .compliance_report(&iso_millis(start), &iso_millis(end))
                .await?
        }
    };

    println!("{}", report);
    Ok(())
}

fn print_page(page_data: &AuditPage, page: u32) {
    if page_data.content.is_empty() {
        println!("No audit logs found.");
        return;
    }

    print_log_table(&page_data.content);
    println!(
        "Page {} of {} ({} entries)",
        page + 1,
        page_data.total_pages,
        page_data.total_elements
    );
    println!();
}

fn print_log_table(logs: &[AuditLog]) {
    println!();
    println!(
        "{:<8}  {:<17}  {:<26}  {:<11}  {:<18}  {:<8}",
        "ID", "TIME", "USER", "ACTION", "ENTITY", "STATUS"
    );
    println!("{}", "-".repeat(98));

    for log in logs {
        let entity = match log.entity_id {
            Some(id) => format!("{}#{}", log.entity_type, id),
            None => log.entity_type.clone(),
        };
        println!(
            "{:<8}  {:<17}  {:<26}  {:<11}  {:<18}  {:<8}",
            log.id,
            format_timestamp(&log.created_at),
            truncate(log.user_email.as_deref().unwrap_or("-"), 26),
            log.action.as_str(),
            truncate(&entity, 18),
            log.status
        );
        if let Some(reason) = &log.failure_reason {
            println!("          {}", truncate(reason, 88));
        }
    }
    println!();
}

fn print_stats(stats: &AuditStatistics) {
    println!();
    println!("=== Audit Statistics ===");
    println!();
    println!("Window:          {} to {}", stats.start_date, stats.end_date);
    println!("Total events:    {}", stats.total_events);
    println!("Security events: {}", stats.security_events);
    println!("Failed events:   {}", stats.failed_events);
    println!("Success rate:    {:.1}%", stats.success_rate);
    println!("Generated at:    {}", format_timestamp(&stats.generated_at));
    println!();
}
