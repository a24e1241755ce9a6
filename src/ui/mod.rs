pub mod company_view;
pub mod dashboard;
pub mod settings;

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre", "octobre",
    "novembre", "décembre",
];

/// `2024-01-10` → `10 janvier 2024`
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

pub const FOLLOW_UP_BADGE: &str = "[À relancer]";
pub const NO_INTERACTION: &str = "Aucune interaction";
