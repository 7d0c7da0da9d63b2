use clap::{Parser, Subcommand};
use contact_manager_api::constants::{DEFAULT_NOTIFICATION_DURATION_MS, DEFAULT_SERVER_URL};
use contact_manager_api::data::FilterSelector;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[arg(long, env = "CONTACTS_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,
    /// How long a notification stays visible
    #[arg(long, env = "CONTACTS_NOTIFICATION_DURATION_MS", default_value_t = DEFAULT_NOTIFICATION_DURATION_MS)]
    pub notification_duration_ms: u64,
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    pub fn api_config(&self) -> contact_manager_api::Config {
        contact_manager_api::Config::new(&self.server_url)
            .with_notification_duration(Duration::from_millis(self.notification_duration_ms))
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List contacts
    List {
        /// none, favorite or blocked
        #[arg(long, default_value = "none")]
        filter: FilterSelector,
    },
    /// Show a single contact
    Show { id: String },
    /// Add a new contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        favorite: bool,
        #[arg(long)]
        blocked: bool,
    },
    /// Edit the fields of a contact, unset fields keep their value
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        favorite: Option<bool>,
        #[arg(long)]
        blocked: Option<bool>,
    },
    /// Toggle the favorite flag of a contact
    Favorite { id: String },
    /// Toggle the blocked flag of a contact
    Block { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let conf = Config::try_parse_from(["contact-manager", "list"]).unwrap();
        assert_eq!(conf.notification_duration_ms, 3000);
        assert!(matches!(
            conf.command,
            Command::List {
                filter: FilterSelector::None
            }
        ));
        assert_eq!(
            conf.api_config().notification_duration,
            Duration::from_millis(3000)
        );
    }

    #[test]
    fn parses_filter_and_server_url() {
        let conf = Config::try_parse_from([
            "contact-manager",
            "--server-url",
            "http://localhost:3000/",
            "list",
            "--filter",
            "blocked",
        ])
        .unwrap();
        assert_eq!(conf.api_config().server_url, "http://localhost:3000");
        assert!(matches!(
            conf.command,
            Command::List {
                filter: FilterSelector::Blocked
            }
        ));
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(Config::try_parse_from(["contact-manager", "list", "--filter", "friends"]).is_err());
    }

    #[test]
    fn parses_edit() {
        let conf = Config::try_parse_from([
            "contact-manager",
            "edit",
            "3",
            "--name",
            "Anna",
            "--favorite",
            "true",
        ])
        .unwrap();
        match conf.command {
            Command::Edit {
                id,
                name,
                favorite,
                phone,
                ..
            } => {
                assert_eq!(id, "3");
                assert_eq!(name.as_deref(), Some("Anna"));
                assert_eq!(favorite, Some(true));
                assert!(phone.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
