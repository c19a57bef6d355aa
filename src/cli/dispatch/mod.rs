use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let api_url = matches
        .get_one::<String>("api-url")
        .map(|s: &String| s.to_string())
        .ok_or_else(|| anyhow!("missing required argument: --api-url"))?;

    let session_dir = matches
        .get_one::<PathBuf>("session-dir")
        .cloned()
        .unwrap_or_else(default_session_dir);

    let globals = GlobalArgs::new(api_url, session_dir);

    let action = match matches.subcommand() {
        Some(("login", sub)) => Action::Login {
            username: sub
                .get_one::<String>("username")
                .map(|s: &String| s.to_string())
                .ok_or_else(|| anyhow!("missing required argument: username"))?,
        },
        Some(("logout", _)) => Action::Logout,
        Some(("whoami", _)) => Action::Whoami,
        _ => return Err(anyhow!("no subcommand provided")),
    };

    Ok((action, globals))
}

fn default_session_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dms-session")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_login() {
        let matches = commands::new().get_matches_from(vec![
            "dms-session",
            "--api-url",
            "https://dms.example.com/api",
            "--session-dir",
            "/tmp/dms",
            "login",
            "dealer1",
        ]);

        let (action, globals) = handler(&matches).unwrap();
        assert_eq!(globals.api_url, "https://dms.example.com/api");
        assert_eq!(globals.session_dir, PathBuf::from("/tmp/dms"));
        assert!(matches!(action, Action::Login { username } if username == "dealer1"));
    }

    #[test]
    fn test_handler_logout_and_whoami() {
        let matches = commands::new().get_matches_from(vec!["dms-session", "logout"]);
        let (action, _) = handler(&matches).unwrap();
        assert!(matches!(action, Action::Logout));

        let matches = commands::new().get_matches_from(vec!["dms-session", "whoami"]);
        let (action, _) = handler(&matches).unwrap();
        assert!(matches!(action, Action::Whoami));
    }

    #[test]
    fn test_default_session_dir_falls_back_to_home() {
        temp_env::with_vars([("HOME", Some("/home/dealer"))], || {
            assert_eq!(
                default_session_dir(),
                PathBuf::from("/home/dealer/.dms-session")
            );
        });
    }
}
