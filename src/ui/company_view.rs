use std::fmt;

use chrono::{DateTime, Utc};
use log::warn;

use crate::api::ApiClient;
use crate::api::models::{Company, Contact, Interaction};
use crate::error::Result;
use crate::followup::{last_interaction, needs_follow_up, sort_interactions};
use crate::ui::{FOLLOW_UP_BADGE, format_date};

/// The three independently fetched parts of a company page.
/// A failed part only blanks its own section.
pub struct CompanyPage {
    pub company: Result<Company>,
    pub contacts: Result<Vec<Contact>>,
    pub interactions: Result<Vec<Interaction>>,
}

impl CompanyPage {
    /// Issues the three requests concurrently; completion order does not matter.
    pub async fn load(client: &ApiClient, id: &str) -> Self {
        let (company, contacts, interactions) = tokio::join!(
            client.get_company(id),
            client.list_contacts(id),
            client.list_interactions(id),
        );
        if let Err(e) = &company {
            warn!("company {id} unavailable: {e}");
        }
        let interactions = interactions.map(|mut list| {
            sort_interactions(&mut list);
            list
        });
        Self { company, contacts, interactions }
    }

    pub fn view(&self, now: DateTime<Utc>) -> CompanyView<'_> {
        CompanyView { page: self, now }
    }
}

pub struct CompanyView<'a> {
    page: &'a CompanyPage,
    now: DateTime<Utc>,
}

impl CompanyView<'_> {
    fn write_contacts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contacts = match &self.page.contacts {
            Ok(list) => list,
            Err(_) => return writeln!(f, "Contacts\n  Impossible de charger les contacts."),
        };
        writeln!(f, "Contacts ({})", contacts.len())?;
        if contacts.is_empty() {
            return writeln!(f, "  Aucun contact pour le moment.");
        }
        for c in contacts {
            writeln!(f, "  - {} ({}) [{}]", c.full_name(), c.job_title, c.id)?;
            writeln!(f, "      {} | {}", c.email, c.phone)?;
        }
        Ok(())
    }

    fn write_timeline(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interactions = match &self.page.interactions {
            Ok(list) => list,
            Err(_) => return writeln!(f, "Historique des interactions\n  Impossible de charger les interactions."),
        };
        writeln!(f, "Historique des interactions ({})", interactions.len())?;
        if interactions.is_empty() {
            return writeln!(f, "  Aucune interaction enregistrée.");
        }
        for (index, i) in interactions.iter().enumerate() {
            let marker = if index == 0 { "  (Dernière interaction)" } else { "" };
            writeln!(f, "  o {} - {}{}", format_date(i.date), i.kind, marker)?;
            if !i.description.is_empty() {
                writeln!(f, "      {}", i.description)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CompanyView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let company = match &self.page.company {
            Ok(c) => c,
            Err(_) => return writeln!(f, "Entreprise introuvable."),
        };

        // A failed interaction fetch leaves the follow-up state undetermined.
        let last = self.page.interactions.as_deref().ok().and_then(last_interaction);
        let stale = self.page.interactions.is_ok() && needs_follow_up(last.map(|i| i.date), self.now);

        if stale {
            match last {
                Some(i) => writeln!(
                    f,
                    "! Relance nécessaire ! La dernière interaction avec cette entreprise remonte au {}.",
                    format_date(i.date)
                )?,
                None => writeln!(
                    f,
                    "! Relance nécessaire ! La dernière interaction avec cette entreprise n'a pas encore eu lieu."
                )?,
            }
            writeln!(f)?;
        }

        let badge = if stale { FOLLOW_UP_BADGE } else { "" };
        writeln!(f, "{} {}", company.name, badge)?;
        writeln!(f, "  {}, {}", company.address, company.postal_code)?;
        if let Some(i) = last {
            writeln!(f, "  Dernière interaction : {}", format_date(i.date))?;
        }
        writeln!(f)?;
        self.write_contacts(f)?;
        writeln!(f)?;
        self.write_timeline(f)
    }
}
