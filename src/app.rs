use std::io::Write;

use chrono::Utc;
use log::{debug, warn};

use crate::api::ApiClient;
use crate::cli::{Cli, Commands, CompanyAction, ContactAction, InteractionAction, SettingsAction};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::forms;
use crate::session::{SessionManager, SessionState};
use crate::storage::LocalStore;
use crate::ui::company_view::CompanyPage;
use crate::ui::dashboard::{self, DashboardView};
use crate::ui::settings::SettingsView;

/// Explicitly passed state for one invocation: the session (with its store) and the gateway.
pub struct App {
    pub session: SessionManager,
    pub client: ApiClient,
    /// One-shot `--api-url` value; it outranks the saved override for this run only.
    api_override: Option<String>,
}

impl App {
    pub fn open(cli: &Cli) -> Result<Self> {
        let store = match &cli.store {
            Some(path) => LocalStore::open(path),
            None => LocalStore::open_default()?,
        };
        Self::with_store(store, cli.api_url.as_deref())
    }

    pub fn with_store(store: LocalStore, api_url: Option<&str>) -> Result<Self> {
        let mut session = SessionManager::new(store);
        session.restore();
        let config = ApiConfig::resolve(session.store(), api_url)?;
        debug!("using API at {}", config.base_url);
        let client = ApiClient::new(config.base_url, session.token().map(str::to_string))?;
        Ok(Self { session, client, api_override: api_url.map(str::to_string) })
    }

    /// Runs one command, writing user-facing output to `out`.
    pub async fn run<W: Write>(&mut self, command: Commands, out: &mut W) -> Result<()> {
        if !command.is_public() {
            self.session.require_authenticated()?;
        }
        match command {
            Commands::Login { username, password } => {
                let username = forms::credentials(&username, &password)?;
                let session = self.session.login(&self.client, &username, &password).await?;
                writeln!(out, "Connecté en tant que {}.", session.username)?;
            }
            Commands::Register { username, password, confirm } => {
                let username = forms::registration(&username, &password, &confirm)?;
                let session = self.session.register(&self.client, &username, &password).await?;
                writeln!(out, "Compte créé. Connecté en tant que {}.", session.username)?;
            }
            Commands::Logout => {
                self.session.logout()?;
                writeln!(out, "Déconnecté.")?;
            }
            Commands::Whoami => match self.session.state() {
                SessionState::Authenticated(s) => writeln!(out, "{}", s.username)?,
                _ => return Err(Error::NotAuthenticated),
            },
            Commands::Dashboard | Commands::Companies { action: CompanyAction::List } => {
                self.show_dashboard(out).await?;
            }
            Commands::Companies { action } => self.run_company(action, out).await?,
            Commands::Contacts { action } => self.run_contact(action, out).await?,
            Commands::Interactions { action } => self.run_interaction(action, out).await?,
            Commands::Settings { action } => self.run_settings(action, out)?,
        }
        Ok(())
    }

    async fn show_dashboard<W: Write>(&self, out: &mut W) -> Result<()> {
        let companies = dashboard::load(&self.client).await?;
        write!(out, "{}", DashboardView::new(&companies, Utc::now()))?;
        Ok(())
    }

    /// Re-render after a mutation that already succeeded; a failed reload is logged, not reported.
    async fn refresh_dashboard<W: Write>(&self, out: &mut W) -> Result<()> {
        match dashboard::load(&self.client).await {
            Ok(companies) => write!(out, "{}", DashboardView::new(&companies, Utc::now()))?,
            Err(e) => warn!("could not refresh companies: {e}"),
        }
        Ok(())
    }

    async fn show_company<W: Write>(&self, id: &str, out: &mut W) -> Result<()> {
        let page = CompanyPage::load(&self.client, id).await;
        write!(out, "{}", page.view(Utc::now()))?;
        Ok(())
    }

    async fn run_company<W: Write>(&self, action: CompanyAction, out: &mut W) -> Result<()> {
        match action {
            CompanyAction::List => self.show_dashboard(out).await,
            CompanyAction::Show { id } => self.show_company(&id, out).await,
            CompanyAction::Add(fields) => {
                let company = forms::company(&fields.name, &fields.address, &fields.postal_code)?;
                self.client.create_company(&company).await?;
                writeln!(out, "Entreprise ajoutée.\n")?;
                self.refresh_dashboard(out).await
            }
            CompanyAction::Edit { id, name, address, postal_code } => {
                let update = forms::company_update(name.as_deref(), address.as_deref(), postal_code.as_deref())?;
                self.client.update_company(&id, &update).await?;
                writeln!(out, "Entreprise modifiée.\n")?;
                self.show_company(&id, out).await
            }
            CompanyAction::Delete { id } => {
                self.client.delete_company(&id).await?;
                writeln!(out, "Entreprise supprimée, avec ses contacts et interactions.\n")?;
                self.refresh_dashboard(out).await
            }
        }
    }

    async fn run_contact<W: Write>(&self, action: ContactAction, out: &mut W) -> Result<()> {
        match action {
            ContactAction::Add { company_id, first_name, last_name, job_title, phone, email } => {
                let contact = forms::contact(&first_name, &last_name, &job_title, &phone, &email)?;
                self.client.create_contact(&company_id, &contact).await?;
                writeln!(out, "Contact ajouté.\n")?;
                self.show_company(&company_id, out).await
            }
            ContactAction::Delete { company_id, contact_id } => {
                self.client.delete_contact(&company_id, &contact_id).await?;
                writeln!(out, "Contact supprimé.\n")?;
                self.show_company(&company_id, out).await
            }
        }
    }

    async fn run_interaction<W: Write>(&self, action: InteractionAction, out: &mut W) -> Result<()> {
        let InteractionAction::Add { company_id, date, kind, description } = action;
        let interaction = forms::interaction(date.as_deref(), &kind, &description, Utc::now().date_naive())?;
        self.client.create_interaction(&company_id, &interaction).await?;
        writeln!(out, "Interaction ajoutée.\n")?;
        self.show_company(&company_id, out).await
    }

    fn run_settings<W: Write>(&mut self, action: Option<SettingsAction>, out: &mut W) -> Result<()> {
        match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => {}
            SettingsAction::Set { url } => {
                let saved = ApiConfig::save_override(self.session.store_mut(), &url)?;
                writeln!(out, "Paramètres enregistrés : {saved}")?;
            }
            SettingsAction::Reset => {
                ApiConfig::reset_override(self.session.store_mut())?;
                writeln!(out, "URL de l'API réinitialisée.")?;
            }
        }
        let config = ApiConfig::resolve(self.session.store(), self.api_override.as_deref())?;
        write!(out, "{}", SettingsView { config: &config })?;
        Ok(())
    }
}
