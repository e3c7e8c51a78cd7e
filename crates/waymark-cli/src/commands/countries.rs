use crate::commands::common::{ensure_settled, open_session};
use crate::error::CliError;

pub async fn run_countries(as_json: bool, base_url: &str) -> Result<(), CliError> {
    let session = open_session(base_url)?;
    let scope = session.scope();
    scope.load().await?;

    let state = scope.snapshot()?;
    ensure_settled(&state)?;

    let countries = state.countries();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&countries)?);
    } else if countries.is_empty() {
        println!("No countries yet. Mark your first visit with `waymark add`.");
    } else {
        for country in &countries {
            println!("{}  {}", country.emoji, country.country);
        }
    }

    Ok(())
}
