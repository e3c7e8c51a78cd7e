use waymark_core::{CityDraft, Position};

use crate::commands::common::{
    ensure_settled, format_city_line, normalize_emoji, open_session, parse_visit_date,
};
use crate::error::CliError;

pub struct AddArgs<'a> {
    pub name: &'a str,
    pub country: &'a str,
    pub emoji: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub date: Option<&'a str>,
    pub notes: &'a str,
}

pub async fn run_add(args: AddArgs<'_>, base_url: &str) -> Result<(), CliError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::EmptyCityName);
    }
    let country = args.country.trim();
    if country.is_empty() {
        return Err(CliError::EmptyCountry);
    }

    let draft = CityDraft {
        name: name.to_string(),
        country: country.to_string(),
        emoji: normalize_emoji(args.emoji)?,
        position: Position { lat: args.lat, lng: args.lng },
        date: parse_visit_date(args.date)?,
        notes: args.notes.trim().to_string(),
    };

    let session = open_session(base_url)?;
    let scope = session.scope();
    scope.create_city(draft).await?;

    let state = scope.snapshot()?;
    ensure_settled(&state)?;

    let city = state.current_city.ok_or(CliError::CityUnavailable)?;
    println!("{}", format_city_line(&city));

    Ok(())
}
