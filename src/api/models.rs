use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Company {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    /// Only present when the backend embeds them in list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<Interaction>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Interaction {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(serialize_with = "ser_date", deserialize_with = "de_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionType {
    Email,
    #[serde(rename = "Téléphone")]
    Phone,
    LinkedIn,
    #[serde(rename = "Entretien")]
    Interview,
}

impl InteractionType {
    pub fn label(self) -> &'static str {
        match self {
            InteractionType::Email => "Email",
            InteractionType::Phone => "Téléphone",
            InteractionType::LinkedIn => "LinkedIn",
            InteractionType::Interview => "Entretien",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" | "e-mail" => Ok(InteractionType::Email),
            "téléphone" | "telephone" | "phone" => Ok(InteractionType::Phone),
            "linkedin" => Ok(InteractionType::LinkedIn),
            "entretien" | "interview" => Ok(InteractionType::Interview),
            other => Err(format!("unknown interaction type: {other}")),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub postal_code: String,
}

/// Partial update body; absent fields are left untouched by the backend.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl CompanyUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.postal_code.is_none()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NewInteraction {
    #[serde(serialize_with = "ser_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub description: String,
}

// Backends differ on whether ids are strings or integers.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

fn ser_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

fn de_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

/// Wire dates: `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping the day only.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn company_accepts_numeric_id_and_embedded_interactions() {
        let c: Company = serde_json::from_value(json!({
            "id": 42,
            "name": "Acme",
            "address": "8 Rue de Londres",
            "postal_code": "75009",
            "interactions": [
                {"id": "i1", "date": "2024-01-10T00:00:00.000Z", "type": "Entretien", "description": "RH"}
            ]
        }))
        .unwrap();
        assert_eq!(c.id, "42");
        let interactions = c.interactions.unwrap();
        assert_eq!(interactions[0].kind, InteractionType::Interview);
        assert_eq!(interactions[0].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn company_without_interactions_field() {
        let c: Company = serde_json::from_value(json!({
            "id": "c1", "name": "Acme", "address": "a", "postal_code": "p"
        }))
        .unwrap();
        assert!(c.interactions.is_none());
    }

    #[test]
    fn new_interaction_uses_wire_names() {
        let body = NewInteraction {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            kind: InteractionType::Phone,
            description: "Appel".into(),
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, json!({"date": "2024-03-05", "type": "Téléphone", "description": "Appel"}));
    }

    #[test]
    fn partial_update_skips_missing_fields() {
        let update = CompanyUpdate { name: Some("Nouveau".into()), ..Default::default() };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"name": "Nouveau"}));
    }

    #[test]
    fn interaction_type_parses_aliases() {
        assert_eq!("telephone".parse::<InteractionType>(), Ok(InteractionType::Phone));
        assert_eq!("Interview".parse::<InteractionType>(), Ok(InteractionType::Interview));
        assert_eq!("LINKEDIN".parse::<InteractionType>(), Ok(InteractionType::LinkedIn));
        assert!("fax".parse::<InteractionType>().is_err());
    }
}
