pub mod login;
pub mod logout;
pub mod whoami;

use crate::{
    cli::globals::GlobalArgs,
    session::{client::AuthClient, store::FileStore, SessionManager},
};
use anyhow::Result;
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Login { username: String },
    Logout,
    Whoami,
}

pub(crate) fn build_manager(globals: &GlobalArgs) -> Result<SessionManager> {
    let client = AuthClient::new(&globals.api_url)?;
    let store = Arc::new(FileStore::new(globals.session_dir.clone()));
    Ok(SessionManager::new(client, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_manager_rejects_bad_url() {
        let globals = GlobalArgs::new("nonsense".to_string(), PathBuf::from("/tmp/dms"));
        assert!(build_manager(&globals).is_err());
    }

    #[test]
    fn test_build_manager_starts_anonymous() {
        let dir = std::env::temp_dir().join(format!("dms-session-{}", uuid::Uuid::new_v4()));
        let globals = GlobalArgs::new("http://localhost:8080/api".to_string(), dir);
        let manager = build_manager(&globals).unwrap();
        assert!(!manager.is_authenticated());
    }
}
