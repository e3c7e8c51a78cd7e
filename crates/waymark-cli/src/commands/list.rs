use crate::commands::common::{
    city_to_list_item, ensure_settled, format_city_line, open_session, CityListItem,
};
use crate::error::CliError;

pub async fn run_list(as_json: bool, base_url: &str) -> Result<(), CliError> {
    let session = open_session(base_url)?;
    let scope = session.scope();
    scope.load().await?;

    let state = scope.snapshot()?;
    ensure_settled(&state)?;

    if as_json {
        let json_items = state
            .cities
            .iter()
            .map(city_to_list_item)
            .collect::<Vec<CityListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if state.cities.is_empty() {
        println!("No cities yet. Mark your first visit with `waymark add`.");
    } else {
        for city in &state.cities {
            println!("{}", format_city_line(city));
        }
    }

    Ok(())
}
