//! Authentication command handlers

use crate::cli::commands::RegisterOptions;
use crate::error::Result;
use crate::output::listing::render_user;
use crate::output::{json_output, print_auth, print_info, print_success};
use dialoguer::{Input, Password};
use marketplace_sdk::{LoginRequest, MarketplaceClient, RegisterRequest, UserRole};
use tracing::debug;

fn prompt_text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
}

fn prompt_password(confirm: bool) -> Result<String> {
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Handle login command
pub async fn handle_login(
    client: &MarketplaceClient,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    let password = match password {
        Some(password) => password,
        None => prompt_password(false)?,
    };

    debug!("Logging in as {}", email);
    let credential = client.login(&LoginRequest { email, password }).await?;

    if json {
        return json_output(&credential.user);
    }
    print_success(&format!("Logged in as {}", render_user(&credential.user)));
    Ok(())
}

/// Handle register command
pub async fn handle_register(
    client: &MarketplaceClient,
    options: RegisterOptions,
    json: bool,
) -> Result<()> {
    let email = match options.email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    let name = match options.name {
        Some(name) => name,
        None => prompt_text("Name")?,
    };
    let password = match options.password {
        Some(password) => password,
        None => prompt_password(true)?,
    };

    let role = UserRole::from(options.role);
    let company_name = match (role, options.company) {
        (UserRole::Vendor, None) => Some(prompt_text("Company name")?),
        (_, company) => company,
    };

    let request = RegisterRequest {
        email,
        password,
        name,
        role,
        company_name,
    };
    let credential = client.register(&request).await?;

    if json {
        return json_output(&credential.user);
    }
    print_success(&format!(
        "Account created for {}",
        render_user(&credential.user)
    ));
    Ok(())
}

/// Handle logout command
pub async fn handle_logout(client: &MarketplaceClient) -> Result<()> {
    if !client.session().is_authenticated() {
        print_info("Not logged in");
        return Ok(());
    }

    client.logout().await?;
    print_success("Logged out");
    Ok(())
}

/// Handle whoami command
pub async fn handle_whoami(client: &MarketplaceClient, json: bool) -> Result<()> {
    if !client.session().is_authenticated() {
        print_info("Not logged in. Run 'market login' to sign in.");
        return Ok(());
    }

    let user = client.current_user().await?;
    if json {
        return json_output(&user);
    }
    print_auth(&render_user(&user));
    Ok(())
}
