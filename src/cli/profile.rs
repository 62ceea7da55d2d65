//! Profile commands: show and update the signed-in client's details.

use anyhow::Result;

use crate::api::Services;
use crate::cli::ProfileCommands;
use crate::model::{ClientRecord, ProfileUpdateRequest};

use super::{format_timestamp, validation};

pub async fn run(services: &Services, command: &ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Show => cmd_show(services).await,
        ProfileCommands::Update { name, email, phone } => {
            cmd_update(services, name.as_deref(), email.as_deref(), phone.as_deref()).await
        }
    }
}

async fn cmd_show(services: &Services) -> Result<()> {
    let profile = services.auth.profile().await?;
    print_profile(&profile);
    Ok(())
}

async fn cmd_update(
    services: &Services,
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    if name.is_none() && email.is_none() && phone.is_none() {
        anyhow::bail!("Nothing to update. Pass --name, --email, or --phone.");
    }

    if let Some(name) = name {
        if let Err(message) = validation::validate_name(name) {
            anyhow::bail!(message);
        }
    }
    if let Some(email) = email {
        if let Err(message) = validation::validate_email(email) {
            anyhow::bail!(message);
        }
    }

    // Unchanged fields keep their current values; the endpoint replaces
    // the whole record.
    let current = services.auth.profile().await?;
    let request = ProfileUpdateRequest {
        name: name.map(str::to_string).unwrap_or(current.name),
        email: email.map(str::to_string).unwrap_or(current.email),
        phone: phone.map(str::to_string).or(current.phone),
    };

    let updated = services.auth.update_profile(&request).await?;

    println!();
    println!("[OK] Profile updated successfully!");
    print_profile(&updated);

    Ok(())
}

fn print_profile(profile: &ClientRecord) {
    println!();
    println!("=== Profile ===");
    println!();
    println!("Name:    {}", profile.name);
    println!("Email:   {}", profile.email);
    println!("Phone:   {}", profile.phone.as_deref().unwrap_or("-"));
    if let Some(role) = profile.role {
        println!("Role:    {}", role.as_str());
    }
    println!("Status:  {}", profile.status);
    if let Some(created_at) = &profile.created_at {
        println!("Member since: {}", format_timestamp(created_at));
    }
    if profile.blacklisted {
        println!();
        println!("[!!] This account is blacklisted.");
        if let Some(reason) = &profile.blacklist_reason {
            println!("     Reason: {}", reason);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_services;
    use crate::session::TokenStore;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile_body() -> serde_json::Value {
        json!({
            "id": 7,
            "email": "jane@example.com",
            "name": "Jane Doe",
            "phone": "555-0100",
            "blacklisted": false,
            "status": "ACTIVE",
            "role": "CLIENT"
        })
    }

    #[tokio::test]
    async fn test_update_merges_unchanged_fields_from_current_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/clients/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/clients/profile"))
            .and(body_json(json!({
                "name": "Jane Smith",
                "email": "jane@example.com",
                "phone": "555-0100"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "email": "jane@example.com",
                "name": "Jane Smith",
                "phone": "555-0100",
                "blacklisted": false,
                "status": "ACTIVE"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let services = test_services(&server.uri(), TokenStore::in_memory(Some("tok".to_string())));
        cmd_update(&services, Some("Jane Smith"), None, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_requires_at_least_one_field() {
        let server = MockServer::start().await;
        let services = test_services(&server.uri(), TokenStore::in_memory(Some("tok".to_string())));
        let err = cmd_update(&services, None, None, None).await.unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[tokio::test]
    async fn test_update_validates_email_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/clients/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .expect(0)
            .mount(&server)
            .await;

        let services = test_services(&server.uri(), TokenStore::in_memory(Some("tok".to_string())));
        let err = cmd_update(&services, None, Some("not-an-email"), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }
}
