use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use waymark_core::models::{country_code_to_flag, flag_to_country_code};
use waymark_core::{City, CityId, RemoteCityStore, Session, StoreConfig, SyncState};

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct CityListItem {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub emoji: String,
    pub country_code: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub date: String,
    pub notes: String,
}

pub fn city_to_list_item(city: &City) -> CityListItem {
    CityListItem {
        id: city.id.as_i64(),
        name: city.name.clone(),
        country: city.country.clone(),
        emoji: city.emoji.clone(),
        country_code: flag_to_country_code(&city.emoji),
        lat: city.position.lat,
        lng: city.position.lng,
        date: city.date.to_rfc3339(),
        notes: city.notes.clone(),
    }
}

/// Pick the store URL: explicit flag first, environment second.
pub fn resolve_store_url(
    flag: Option<String>,
    env: Option<String>,
) -> Result<String, CliError> {
    flag.or(env)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(CliError::StoreNotConfigured)
}

/// Open a session against the configured remote store.
pub fn open_session(base_url: &str) -> Result<Session<RemoteCityStore>, CliError> {
    let config = StoreConfig::new(base_url)?;
    tracing::debug!(base_url = config.base_url(), "opening store session");
    let backend = RemoteCityStore::new(&config)?;
    Ok(Session::new(backend))
}

/// Fail if the last operation settled with an error.
pub fn ensure_settled(state: &SyncState) -> Result<(), CliError> {
    if state.error.is_empty() {
        Ok(())
    } else {
        Err(CliError::Store(state.error.clone()))
    }
}

pub fn parse_city_id(raw: &str) -> Result<CityId, CliError> {
    raw.parse()
        .map_err(|_| CliError::InvalidCityId(raw.to_string()))
}

/// Accept either a flag emoji or a two-letter country code for `--emoji`.
pub fn normalize_emoji(input: &str) -> Result<String, CliError> {
    let input = input.trim();
    if flag_to_country_code(input).is_some() {
        return Ok(input.to_string());
    }
    country_code_to_flag(input).ok_or_else(|| CliError::InvalidEmoji(input.to_string()))
}

/// Parse a visit date; absent means now.
pub fn parse_visit_date(input: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    let Some(raw) = input else {
        return Ok(Utc::now());
    };
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| Utc.from_utc_datetime(&datetime))
        .ok_or_else(|| CliError::InvalidDate(raw.to_string()))
}

pub fn format_city_line(city: &City) -> String {
    format!(
        "{}  {}, {}  {}  [{}]",
        city.emoji,
        city.name,
        city.country,
        city.date.format("%Y-%m-%d"),
        city.id
    )
}

pub fn format_city_detail(city: &City) -> Vec<String> {
    let mut lines = vec![
        format!("{}  {}", city.emoji, city.name),
        format!("Country:  {}", city.country),
        format!("Visited:  {}", city.date.format("%Y-%m-%d %H:%M UTC")),
        format!("Position: {:.5}, {:.5}", city.position.lat, city.position.lng),
        format!("Id:       {}", city.id),
    ];
    if let Some(url) = flag_png_url(&city.emoji) {
        lines.push(format!("Flag:     {url}"));
    }
    if !city.notes.is_empty() {
        lines.push(format!("Notes:    {}", city.notes));
    }
    lines
}

/// PNG rendition of a flag emoji, the way the map popups render it.
pub fn flag_png_url(emoji: &str) -> Option<String> {
    let code = flag_to_country_code(emoji)?;
    Some(format!("https://flagcdn.com/24x18/{code}.png"))
}
