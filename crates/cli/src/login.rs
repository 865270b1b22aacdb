use anyhow::{Context, Result};
use jobwatch_api_client::types::RegisterRequest;

use crate::config::{api_client, config_path, load_config, save_config};

/// Exchange credentials for a token and persist it in the config.
pub async fn run_login(username: Option<String>) -> Result<()> {
    let mut config = load_config()?;

    let username = match username {
        Some(u) => u,
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };
    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .context("Failed to read password")?;

    let client = api_client(&config)?;
    let token = client
        .login(&username, &password)
        .await
        .context("Login failed")?;

    config.server.token = token.access_token;
    save_config(&config)?;

    println!(
        "Logged in as {username}. Token saved to {}",
        config_path()?.display()
    );
    Ok(())
}

/// Create an account, then log straight in.
pub async fn run_register(username: String, email: String) -> Result<()> {
    let mut config = load_config()?;
    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .context("Failed to read password")?;

    let client = api_client(&config)?;
    let profile = client
        .register(&RegisterRequest {
            username: username.clone(),
            email,
            password: password.clone(),
        })
        .await
        .context("Registration failed")?;
    println!("Registered {} (user id {})", profile.username, profile.id);

    let token = client.login(&username, &password).await?;
    config.server.token = token.access_token;
    save_config(&config)?;
    println!("Logged in as {username}.");
    Ok(())
}

pub async fn run_whoami() -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    let profile = client.me().await.context("Not logged in")?;
    println!("{} <{}> (user id {})", profile.username, profile.email, profile.id);
    Ok(())
}
