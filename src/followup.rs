//! Follow-up policy: a company needs a reminder when its most recent
//! interaction is more than seven days old, or when it has none at all.
//!
//! Every function takes the evaluation instant explicitly so a single
//! render pass can flag the dashboard and the detail view consistently.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::api::models::{Company, Interaction};

pub const FOLLOW_UP_AFTER_DAYS: i64 = 7;

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// True when there is no interaction, or strictly more than seven days elapsed
/// since the start of `last`. Exactly seven days is not yet stale.
pub fn needs_follow_up(last: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(date) => now - start_of_day(date) > Duration::days(FOLLOW_UP_AFTER_DAYS),
    }
}

/// Whole days elapsed since `date`, rounded down.
pub fn days_since(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    (now - start_of_day(date)).num_days()
}

/// Most recent interaction by date. On equal dates the earliest in input order wins.
pub fn last_interaction(interactions: &[Interaction]) -> Option<&Interaction> {
    let mut best: Option<&Interaction> = None;
    for candidate in interactions {
        match best {
            Some(b) if b.date >= candidate.date => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Stable sort, most recent first.
pub fn sort_interactions(interactions: &mut [Interaction]) {
    interactions.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn company_last_interaction(company: &Company) -> Option<&Interaction> {
    company.interactions.as_deref().and_then(last_interaction)
}

pub fn company_needs_follow_up(company: &Company, now: DateTime<Utc>) -> bool {
    needs_follow_up(company_last_interaction(company).map(|i| i.date), now)
}

/// Companies needing a follow-up, in input order.
pub fn stale_companies(companies: &[Company], now: DateTime<Utc>) -> Vec<&Company> {
    companies
        .iter()
        .filter(|c| company_needs_follow_up(c, now))
        .collect()
}
