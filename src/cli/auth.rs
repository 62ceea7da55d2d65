//! Session commands: login, logout, register, whoami and first-admin setup.

use anyhow::Result;
use reqwest::StatusCode;

use crate::api::{ApiError, Services};
use crate::model::RegisterRequest;
use crate::session::{Session, SessionUser};

use super::validation;

/// Log in and persist the session token for later commands.
pub async fn cmd_login(
    services: &Services,
    session: &mut Session,
    email: &str,
    password: Option<&str>,
) -> Result<()> {
    if let Err(message) = validation::validate_email(email) {
        anyhow::bail!(message);
    }
    let password = match password {
        Some(password) => password,
        None => anyhow::bail!("Password required. Use --password or set BANKCTL_PASSWORD."),
    };

    let response = match services.auth.login(email, password).await {
        Ok(response) => response,
        Err(err) => anyhow::bail!(login_failure_message(&err)),
    };

    let user = session.establish(&response)?;

    println!();
    println!("[OK] Logged in as {} ({})", user.full_name(), user.email);
    println!("Role: {}", user.role.as_str());
    println!();
    println!("Run 'bankctl dashboard' for an overview.");
    println!();

    Ok(())
}

/// Register a new client account. Registration does not log in; the
/// service only hands out tokens through login.
pub async fn cmd_register(
    services: &Services,
    email: &str,
    name: &str,
    password: Option<&str>,
    confirm_password: Option<&str>,
) -> Result<()> {
    if let Err(message) = validation::validate_email(email) {
        anyhow::bail!(message);
    }
    if let Err(message) = validation::validate_name(name) {
        anyhow::bail!(message);
    }
    let password = match password {
        Some(password) => password,
        None => anyhow::bail!("Password required. Use --password or set BANKCTL_PASSWORD."),
    };
    if let Some(confirmation) = confirm_password {
        if let Err(message) = validation::validate_password_confirmation(password, confirmation) {
            anyhow::bail!(message);
        }
    }
    if let Err(message) = validation::validate_password(password) {
        anyhow::bail!(message);
    }

    let request = RegisterRequest {
        email: email.to_string(),
        name: name.trim().to_string(),
        password: password.to_string(),
    };
    let client = match services.auth.register(&request).await {
        Ok(client) => client,
        Err(err) => anyhow::bail!(register_failure_message(&err)),
    };

    println!();
    println!("[OK] Registration successful! Please log in.");
    println!();
    println!("Account created for {}", client.email);
    println!("Log in with 'bankctl login {}'.", client.email);
    println!();

    Ok(())
}

/// Create the first administrator on a fresh platform. The password
/// checks run in the same order the service applies them: confirmation
/// first, then length, both before any request goes out.
pub async fn cmd_setup(
    services: &Services,
    email: &str,
    name: &str,
    password: Option<&str>,
    confirm_password: Option<&str>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => anyhow::bail!("Password required. Use --password or set BANKCTL_PASSWORD."),
    };
    if let Some(confirmation) = confirm_password {
        if let Err(message) = validation::validate_password_confirmation(password, confirmation) {
            anyhow::bail!(message);
        }
    }
    if let Err(message) = validation::validate_password(password) {
        anyhow::bail!(message);
    }
    if let Err(message) = validation::validate_email(email) {
        anyhow::bail!(message);
    }
    if let Err(message) = validation::validate_name(name) {
        anyhow::bail!(message);
    }

    let request = RegisterRequest {
        email: email.to_string(),
        name: name.trim().to_string(),
        password: password.to_string(),
    };
    let admin = match services.auth.setup_first_admin(&request).await {
        Ok(admin) => admin,
        Err(err) => anyhow::bail!(setup_failure_message(&err)),
    };

    println!();
    println!("[OK] Administrator account created for {}", admin.email);
    println!("Log in with 'bankctl login {}'.", admin.email);
    println!();

    Ok(())
}

/// Discard the stored session token. Logging out while logged out is fine.
pub fn cmd_logout(session: &mut Session) -> Result<()> {
    session.logout()?;
    println!("[OK] Logged out.");
    Ok(())
}

/// Show who the stored session token belongs to.
pub fn cmd_whoami(user: &SessionUser) -> Result<()> {
    println!();
    println!("=== Session ===");
    println!();
    println!("Name:    {}", user.full_name());
    println!("Email:   {}", user.email);
    if !user.phone.is_empty() {
        println!("Phone:   {}", user.phone);
    }
    println!("Role:    {}", user.role.as_str());
    println!("Status:  {}", user.status);
    if user.blacklisted {
        println!();
        println!("[!] This account is blacklisted.");
    }
    println!();
    Ok(())
}

/// Message for a failed login. The service's own message wins; otherwise
/// the status picks a fixed explanation.
fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::AccessRestricted { message, .. } => message.clone(),
        ApiError::Api {
            status,
            message: None,
            ..
        } => match *status {
            StatusCode::UNAUTHORIZED => "Invalid email or password".to_string(),
            StatusCode::FORBIDDEN => "Account is blocked. Please contact support.".to_string(),
            _ => "Login failed. Please try again.".to_string(),
        },
        _ => "Login failed. Please try again.".to_string(),
    }
}

fn register_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::AccessRestricted { message, .. } => message.clone(),
        ApiError::Api {
            status,
            message: None,
            ..
        } => match *status {
            StatusCode::BAD_REQUEST => "Registration failed. Please check your information.".to_string(),
            StatusCode::CONFLICT => "Email already exists. Please use a different email.".to_string(),
            _ => "Registration failed. Please try again.".to_string(),
        },
        _ => "Registration failed. Please try again.".to_string(),
    }
}

fn setup_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::AccessRestricted { message, .. } => message.clone(),
        _ => "Failed to create admin account".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_services;
    use crate::session::TokenStore;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_error(status: u16, message: Option<&str>) -> ApiError {
        ApiError::Api {
            status: StatusCode::from_u16(status).unwrap(),
            code: None,
            message: message.map(String::from),
        }
    }

    #[test]
    fn test_login_failure_uses_body_message() {
        let err = api_error(401, Some("Account locked after 5 attempts"));
        assert_eq!(login_failure_message(&err), "Account locked after 5 attempts");
    }

    #[test]
    fn test_login_failure_status_fallbacks() {
        assert_eq!(
            login_failure_message(&api_error(401, None)),
            "Invalid email or password"
        );
        assert_eq!(
            login_failure_message(&api_error(403, None)),
            "Account is blocked. Please contact support."
        );
        assert_eq!(
            login_failure_message(&api_error(500, None)),
            "Login failed. Please try again."
        );
    }

    #[test]
    fn test_register_failure_status_fallbacks() {
        assert_eq!(
            register_failure_message(&api_error(400, None)),
            "Registration failed. Please check your information."
        );
        assert_eq!(
            register_failure_message(&api_error(409, None)),
            "Email already exists. Please use a different email."
        );
        assert_eq!(
            register_failure_message(&api_error(503, None)),
            "Registration failed. Please try again."
        );
        assert_eq!(
            register_failure_message(&api_error(409, Some("taken"))),
            "taken"
        );
    }

    #[test]
    fn test_setup_failure_fallback() {
        assert_eq!(
            setup_failure_message(&api_error(403, None)),
            "Failed to create admin account"
        );
        assert_eq!(
            setup_failure_message(&api_error(400, Some("Admin already exists"))),
            "Admin already exists"
        );
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/clients/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-login",
                "client": {
                    "id": 4,
                    "email": "jane@example.com",
                    "name": "Jane Doe",
                    "role": "CLIENT",
                },
            })))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("token"));
        let services = test_services(&server.uri(), store.clone());
        let mut session = Session::new(store.clone());

        cmd_login(&services, &mut session, "jane@example.com", Some("secret-123"))
            .await
            .unwrap();

        assert_eq!(store.load(), Some("jwt-login".to_string()));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_validates_email_before_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/clients/login"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = TokenStore::in_memory(None);
        let services = test_services(&server.uri(), store.clone());
        let mut session = Session::new(store);

        let err = cmd_login(&services, &mut session, "not-an-email", Some("secret-123"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[tokio::test]
    async fn test_setup_checks_confirmation_before_length() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/clients/setup/first-admin"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = TokenStore::in_memory(None);
        let services = test_services(&server.uri(), store);

        // both problems present: mismatch wins
        let err = cmd_setup(
            &services,
            "admin@example.com",
            "Admin User",
            Some("short"),
            Some("different"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        // matching but too short: length message
        let err = cmd_setup(
            &services,
            "admin@example.com",
            "Admin User",
            Some("short"),
            Some("short"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters long");
    }
}
