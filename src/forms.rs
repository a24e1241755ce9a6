//! Client-side checks run before any request is sent.

use chrono::NaiveDate;

use crate::api::models::{CompanyUpdate, InteractionType, NewCompany, NewContact, NewInteraction};
use crate::error::{Error, Result};

pub const MIN_PASSWORD_LEN: usize = 6;

fn required(value: &str, label: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("Le champ « {label} » est requis.")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>, label: &str) -> Result<Option<String>> {
    value.map(|v| required(v, label)).transpose()
}

pub fn company(name: &str, address: &str, postal_code: &str) -> Result<NewCompany> {
    Ok(NewCompany {
        name: required(name, "Nom")?,
        address: required(address, "Adresse")?,
        postal_code: required(postal_code, "Code postal")?,
    })
}

pub fn company_update(name: Option<&str>, address: Option<&str>, postal_code: Option<&str>) -> Result<CompanyUpdate> {
    let update = CompanyUpdate {
        name: optional(name, "Nom")?,
        address: optional(address, "Adresse")?,
        postal_code: optional(postal_code, "Code postal")?,
    };
    if update.is_empty() {
        return Err(Error::validation("Aucune modification à enregistrer."));
    }
    Ok(update)
}

pub fn contact(first_name: &str, last_name: &str, job_title: &str, phone: &str, email: &str) -> Result<NewContact> {
    Ok(NewContact {
        first_name: required(first_name, "Prénom")?,
        last_name: required(last_name, "Nom")?,
        job_title: required(job_title, "Poste")?,
        phone: required(phone, "Téléphone")?,
        email: required(email, "Email")?,
    })
}

/// `date` defaults to `today` when absent. Typed dates must be exactly `YYYY-MM-DD`.
pub fn interaction(date: Option<&str>, kind: &str, description: &str, today: NaiveDate) -> Result<NewInteraction> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| Error::validation("Date invalide (format AAAA-MM-JJ)."))?,
        None => today,
    };
    let kind = kind
        .parse::<InteractionType>()
        .map_err(|_| Error::validation("Veuillez sélectionner un type d'interaction."))?;
    Ok(NewInteraction {
        date,
        kind,
        description: required(description, "Description")?,
    })
}

pub fn registration(username: &str, password: &str, confirm: &str) -> Result<String> {
    let username = required(username, "Nom d'utilisateur")?;
    required(password, "Mot de passe")?;
    if password != confirm {
        return Err(Error::validation("Les mots de passe ne correspondent pas."));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation("Le mot de passe doit contenir au moins 6 caractères."));
    }
    Ok(username)
}

pub fn credentials(username: &str, password: &str) -> Result<String> {
    let username = required(username, "Nom d'utilisateur")?;
    required(password, "Mot de passe")?;
    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[test]
    fn company_requires_every_field() {
        assert!(company("Acme", "1 rue", "75001").is_ok());
        let err = company("Acme", "   ", "75001").unwrap_err();
        assert_eq!(err.user_message(), "Le champ « Adresse » est requis.");
    }

    #[test]
    fn update_needs_at_least_one_field() {
        assert!(matches!(company_update(None, None, None), Err(Error::Validation(_))));
        let update = company_update(Some(" Nouveau "), None, None).unwrap();
        assert_eq!(update.name.as_deref(), Some("Nouveau"));
        assert!(company_update(Some(""), None, None).is_err());
    }

    #[test]
    fn contact_requires_email() {
        assert!(contact("Jean", "Dupont", "RH", "0600000000", "").is_err());
    }

    #[test]
    fn interaction_defaults_to_today() {
        let i = interaction(None, "entretien", "Premier échange", today()).unwrap();
        assert_eq!(i.date, today());
        assert_eq!(i.kind, InteractionType::Interview);
    }

    #[test]
    fn interaction_rejects_unknown_type() {
        let err = interaction(Some("2024-05-01"), "fax", "x", today()).unwrap_err();
        assert_eq!(err.user_message(), "Veuillez sélectionner un type d'interaction.");
        assert!(interaction(Some("01/05/2024"), "email", "x", today()).is_err());
    }

    #[test]
    fn interaction_date_must_be_exact() {
        let i = interaction(Some(" 2024-01-10 "), "email", "x", today()).unwrap();
        assert_eq!(i.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        for bad in ["2024-01-10foo", "2024-01-10T09:00:00Z", "2024-02-30"] {
            let err = interaction(Some(bad), "email", "x", today()).unwrap_err();
            assert_eq!(err.user_message(), "Date invalide (format AAAA-MM-JJ).");
        }
    }

    #[test]
    fn registration_rules() {
        assert_eq!(
            registration("bob", "secret1", "secret2").unwrap_err().user_message(),
            "Les mots de passe ne correspondent pas."
        );
        assert_eq!(
            registration("bob", "abc", "abc").unwrap_err().user_message(),
            "Le mot de passe doit contenir au moins 6 caractères."
        );
        assert_eq!(registration(" bob ", "secret", "secret").unwrap(), "bob");
    }
}
