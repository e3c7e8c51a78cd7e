use crate::commands::common::{ensure_settled, open_session, parse_city_id};
use crate::error::CliError;

pub async fn run_delete(id: &str, base_url: &str) -> Result<(), CliError> {
    let id = parse_city_id(id)?;
    let session = open_session(base_url)?;
    let scope = session.scope();
    scope.delete_city(id).await?;

    let state = scope.snapshot()?;
    ensure_settled(&state)?;

    println!("{id}");
    Ok(())
}
