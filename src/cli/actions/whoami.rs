use crate::cli::{actions::build_manager, globals::GlobalArgs};
use anyhow::{bail, Result};

/// Handle the whoami action: print the cached profile of the current
/// session. Reads only local state, never the network.
pub fn handle(globals: &GlobalArgs) -> Result<()> {
    let manager = build_manager(globals)?;

    if !manager.is_authenticated() {
        bail!("no active session, run `dms-session login <username>`");
    }

    let Some(profile) = manager.current_user() else {
        bail!("session cache is unreadable, run `dms-session login <username>`");
    };

    println!("id:         {}", profile.id);
    println!("username:   {}", profile.username);
    println!("email:      {}", profile.email);
    println!("role:       {:?}", profile.role);
    if let Some(last_login) = &profile.last_login {
        println!("last login: {last_login}");
    }

    Ok(())
}
