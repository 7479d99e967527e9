//! Session command implementations

use anyhow::Result;

use super::{print_json, Ctx};

pub async fn cmd_login(ctx: &Ctx, email: &str, password: &str) -> Result<()> {
    match ctx.auth.login(email, password).await {
        Ok(session) => {
            if ctx.json {
                return print_json(session.user());
            }
            println!("Signed in as {}", session.user().email);
            Ok(())
        }
        Err(e) => {
            anyhow::bail!("Login failed: {}", e.message)
        }
    }
}

pub async fn cmd_register(ctx: &Ctx, email: &str, password: &str, name: &str) -> Result<()> {
    match ctx.auth.register(email, password, name).await {
        Ok(session) => {
            if ctx.json {
                return print_json(session.user());
            }
            println!("Account created. Signed in as {}", session.user().email);
            Ok(())
        }
        Err(e) => {
            anyhow::bail!("Registration failed: {}", e.message)
        }
    }
}

pub async fn cmd_logout(ctx: &Ctx) -> Result<()> {
    ctx.auth.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub async fn cmd_whoami(ctx: &Ctx) -> Result<()> {
    match ctx.auth.current_user().await? {
        Some(session) => {
            let user = session.user();
            if ctx.json {
                return print_json(user);
            }
            println!("{} <{}>", user.username, user.email);
            let name = [user.first_name.as_deref(), user.last_name.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if !name.is_empty() {
                println!("   {}", name);
            }
            Ok(())
        }
        None => {
            println!("Not signed in.");
            Ok(())
        }
    }
}

pub async fn cmd_password_change(ctx: &Ctx, new_password: &str) -> Result<()> {
    let session = ctx.session().await?;
    let detail = ctx
        .auth
        .change_password(&session, new_password)
        .await
        .map_err(|e| anyhow::anyhow!("Password change failed: {}", e.message))?;
    println!("{}", detail);
    Ok(())
}

pub async fn cmd_password_reset(ctx: &Ctx, email: &str) -> Result<()> {
    // Reset works without a session; the backend emails a confirmation link
    let detail = ctx
        .client
        .reset_password(&moneta_core::models::PasswordResetRequest {
            email: email.to_string(),
        })
        .await?;
    println!("{}", detail.detail);
    Ok(())
}
