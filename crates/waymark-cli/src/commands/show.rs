use crate::commands::common::{ensure_settled, format_city_detail, open_session, parse_city_id};
use crate::error::CliError;

pub async fn run_show(id: &str, base_url: &str) -> Result<(), CliError> {
    let id = parse_city_id(id)?;
    let session = open_session(base_url)?;
    let scope = session.scope();
    scope.get_city(id).await?;

    let state = scope.snapshot()?;
    ensure_settled(&state)?;

    let city = state.current_city.ok_or(CliError::CityUnavailable)?;
    for line in format_city_detail(&city) {
        println!("{line}");
    }

    Ok(())
}
