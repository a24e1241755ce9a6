use std::fmt;

use chrono::{DateTime, Utc};

use crate::api::ApiClient;
use crate::api::models::Company;
use crate::error::Result;
use crate::followup::{company_last_interaction, company_needs_follow_up, days_since, stale_companies};
use crate::ui::{FOLLOW_UP_BADGE, NO_INTERACTION, format_date};

pub async fn load(client: &ApiClient) -> Result<Vec<Company>> {
    client.list_companies().await
}

/// Reminder panel plus the company cards, all flagged against the same `now`.
pub struct DashboardView<'a> {
    pub companies: &'a [Company],
    pub now: DateTime<Utc>,
}

impl<'a> DashboardView<'a> {
    pub fn new(companies: &'a [Company], now: DateTime<Utc>) -> Self {
        Self { companies, now }
    }

    fn write_follow_up_panel(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stale = stale_companies(self.companies, self.now);
        if stale.is_empty() {
            return Ok(());
        }
        writeln!(f, "! Relances nécessaires ({})", stale.len())?;
        writeln!(f, "  Ces entreprises n'ont pas eu d'interaction depuis plus de 7 jours :")?;
        for company in stale {
            let since = match company_last_interaction(company) {
                Some(last) => format!("{} jours", days_since(last.date, self.now)),
                None => NO_INTERACTION.to_string(),
            };
            writeln!(f, "  - {} ({})  [{}]", company.name, since, company.id)?;
        }
        writeln!(f)
    }

    fn write_card(&self, f: &mut fmt::Formatter<'_>, company: &Company) -> fmt::Result {
        let badge = if company_needs_follow_up(company, self.now) { FOLLOW_UP_BADGE } else { "" };
        writeln!(f, "* {} [{}] {}", company.name, company.id, badge)?;
        writeln!(f, "    {}, {}", company.address, company.postal_code)?;
        match company_last_interaction(company) {
            Some(last) => writeln!(f, "    Dernière interaction : {}", format_date(last.date)),
            None => writeln!(f, "    {NO_INTERACTION}"),
        }
    }
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tableau de bord")?;
        writeln!(f)?;
        self.write_follow_up_panel(f)?;
        writeln!(f, "Mes entreprises ({})", self.companies.len())?;
        if self.companies.is_empty() {
            writeln!(f, "  Aucune entreprise")?;
            return writeln!(f, "  Commencez par ajouter une entreprise pour suivre vos candidatures.");
        }
        for company in self.companies {
            self.write_card(f, company)?;
        }
        Ok(())
    }
}
