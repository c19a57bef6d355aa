use anyhow::Result;
use dms_session::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    match action {
        Action::Login { username } => actions::login::handle(&username, &globals).await?,
        Action::Logout => actions::logout::handle(&globals).await?,
        Action::Whoami => actions::whoami::handle(&globals)?,
    }

    Ok(())
}
