use crate::cli::{actions::build_manager, globals::GlobalArgs};
use anyhow::Result;

/// Handle the logout action. Local state is gone even when the backend is
/// unreachable; ending a session that does not exist is fine too.
pub async fn handle(globals: &GlobalArgs) -> Result<()> {
    let manager = build_manager(globals)?;

    let had_session = manager.is_authenticated();
    manager.logout_and_wait().await;

    if had_session {
        println!("Signed out");
    } else {
        println!("No active session");
    }

    Ok(())
}
