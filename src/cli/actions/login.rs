use crate::{
    cli::{actions::build_manager, globals::GlobalArgs},
    session::{error::AuthError, types::PendingLogin, SessionManager},
};
use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

/// Handle the login action: password step, optional active-session takeover,
/// then the one-time code step.
pub async fn handle(username: &str, globals: &GlobalArgs) -> Result<()> {
    let manager = build_manager(globals)?;

    let password = prompt("Password: ")?;
    if password.is_empty() {
        bail!("a password is required");
    }

    let pending = password_step(&manager, username, &password).await?;
    println!("A one-time code was sent to {}", pending.email);

    let profile = code_step(&manager, &pending).await?;
    println!(
        "Signed in as {} ({:?}), home: {}",
        profile.username,
        profile.role,
        profile.role.home_path()
    );

    Ok(())
}

async fn password_step(
    manager: &SessionManager,
    username: &str,
    password: &str,
) -> Result<PendingLogin> {
    match manager.login(username, password).await {
        Ok(pending) => Ok(pending),
        Err(AuthError::ActiveSessionConflict) => {
            let answer = prompt(
                "Another session is already active for this user. Sign it out and continue? [y/N] ",
            )?;
            if !answer.eq_ignore_ascii_case("y") {
                bail!("login cancelled, the other session stays active");
            }
            Ok(manager.force_login(username, password).await?)
        }
        Err(AuthError::AccountLocked {
            remaining: Some(remaining),
        }) => bail!(
            "account temporarily locked, try again in {} seconds",
            remaining.as_secs()
        ),
        Err(err) => Err(err.into()),
    }
}

async fn code_step(
    manager: &SessionManager,
    pending: &PendingLogin,
) -> Result<crate::session::types::UserProfile> {
    let email = {
        let entered = prompt(&format!("Email [{}]: ", pending.email))?;
        if entered.is_empty() {
            pending.email.clone()
        } else {
            entered
        }
    };

    loop {
        let entered = prompt("Code (empty to cancel): ")?;
        if entered.is_empty() {
            manager.cancel_login();
            bail!("login cancelled");
        }

        let otp: u32 = match entered.parse() {
            Ok(otp) => otp,
            Err(_) => {
                eprintln!("the code must be numeric");
                continue;
            }
        };

        match manager.verify_login(&email, otp).await {
            Ok(profile) => return Ok(profile),
            // challenge stays pending, a fresh code can be tried
            Err(AuthError::InvalidCode) => eprintln!("invalid or expired code, try again"),
            Err(err) => return Err(err.into()),
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read input")?;

    Ok(line.trim().to_string())
}
