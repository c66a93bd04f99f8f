use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};

use feedsite_core::{api::RegisterRequest, AppConfig};

use super::Backend;

pub async fn login(config: &AppConfig, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    let mut backend = Backend::new(config)?;
    let user = backend.session.login(username, &password).await?;
    println!("Logged in as {}", user.username);
    Ok(())
}

pub async fn register(
    config: &AppConfig,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            let first = prompt("Password: ")?;
            let again = prompt("Confirm password: ")?;
            if first != again {
                return Err(anyhow!("Passwords do not match"));
            }
            first
        }
    };

    let request = RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password,
    }
    .validated()?;

    let backend = Backend::new(config)?;
    let user = backend.session.register(&request).await?;
    println!("Registered {} (id {})", user.username, user.id);
    println!("\nLog in with:");
    println!("  feedsite login -u {}", user.username);
    Ok(())
}

pub async fn logout(config: &AppConfig) -> Result<()> {
    let mut backend = Backend::new(config)?;
    if backend.session.restore().await?.is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    backend.session.logout().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(config: &AppConfig) -> Result<()> {
    let backend = Backend::connect(config).await?;
    match backend.session.current_user() {
        Some(user) => {
            println!("{}", user.username);
            if let Some(email) = &user.email {
                println!("  Email: {}", email);
            }
            if let Some(created) = user.created_at {
                println!("  Member since: {}", created.format("%Y-%m-%d"));
            }
        }
        None => {
            println!("Not logged in.");
            println!("\nTo log in, run:");
            println!("  feedsite login -u <username>");
        }
    }
    Ok(())
}

/// Read one line from stdin after printing `label`
fn prompt(label: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
