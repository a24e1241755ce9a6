use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "applytrack")]
#[command(version)]
#[command(about = "Suivi de candidatures : entreprises, contacts, interactions et relances")]
pub struct Cli {
    /// API base URL for this invocation only
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path of the local store file
    #[arg(long, global = true, env = "APPLYTRACK_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "APPLYTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account, then log in
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "APPLYTRACK_PASSWORD", hide_env_values = true)]
        password: String,
        /// Password confirmation
        #[arg(long)]
        confirm: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the current user
    Whoami,

    /// Companies and follow-up reminders
    Dashboard,

    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },

    Contacts {
        #[command(subcommand)]
        action: ContactAction,
    },

    Interactions {
        #[command(subcommand)]
        action: InteractionAction,
    },

    /// API address settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompanyAction {
    List,
    Show { id: String },
    Add(CompanyFields),
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
    },
    /// Delete a company with its contacts and interactions
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct CompanyFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub postal_code: String,
}

#[derive(Subcommand, Debug)]
pub enum ContactAction {
    Add {
        company_id: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        job_title: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
    },
    Delete { company_id: String, contact_id: String },
}

#[derive(Subcommand, Debug)]
pub enum InteractionAction {
    Add {
        company_id: String,
        /// YYYY-MM-DD, today when omitted
        #[arg(long)]
        date: Option<String>,
        /// Email, Téléphone, LinkedIn or Entretien
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    Show,
    /// Save an API base URL override
    Set { url: String },
    /// Go back to the default API base URL
    Reset,
}

impl Commands {
    /// Commands reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Commands::Login { .. } | Commands::Register { .. } | Commands::Logout | Commands::Settings { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_login_with_global_url() {
        let cli = Cli::try_parse_from([
            "applytrack", "login", "-u", "alice", "-p", "secret", "--api-url", "http://localhost:4000",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:4000"));
        match cli.command {
            Commands::Login { username, password } => {
                assert_eq!(username, "alice");
                assert_eq!(password, "secret");
            }
            other => panic!("Expected Login, got {other:?}"),
        }
    }

    #[test]
    fn parse_interaction_type_flag() {
        let cli = Cli::try_parse_from([
            "applytrack", "interactions", "add", "c1", "--type", "Entretien", "--description", "RH",
        ])
        .unwrap();
        let Commands::Interactions { action: InteractionAction::Add { company_id, date, kind, .. } } = cli.command
        else {
            panic!("Expected interactions add");
        };
        assert_eq!(company_id, "c1");
        assert!(date.is_none());
        assert_eq!(kind, "Entretien");
    }

    #[test]
    fn public_and_protected_commands() {
        let dashboard = Cli::try_parse_from(["applytrack", "dashboard"]).unwrap();
        assert!(!dashboard.command.is_public());
        let settings = Cli::try_parse_from(["applytrack", "settings"]).unwrap();
        assert!(settings.command.is_public());
    }

    #[test]
    fn edit_accepts_partial_fields() {
        let cli = Cli::try_parse_from(["applytrack", "companies", "edit", "c1", "--postal-code", "75010"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Companies { action: CompanyAction::Edit { name: None, postal_code: Some(_), .. } }
        ));
    }
}
