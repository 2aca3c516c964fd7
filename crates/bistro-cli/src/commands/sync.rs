use crate::commands::common::CliApp;
use crate::error::CliError;

pub async fn run_sync(app: &CliApp) -> Result<(), CliError> {
    let report = app.sync_outbox().await?;
    tracing::info!("Outbox drain applied {} change(s)", report.applied);
    if report.applied == 0 {
        println!("Nothing to sync");
    } else {
        println!("Synced {} change(s)", report.applied);
    }
    Ok(())
}

pub async fn run_outbox(app: &CliApp, as_json: bool) -> Result<(), CliError> {
    let changes = app.pending_changes()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
        return Ok(());
    }

    if changes.is_empty() {
        println!("Outbox is empty");
        return Ok(());
    }

    for change in &changes {
        let mut pieces = Vec::new();
        if let Some(favorite) = change.favorite {
            pieces.push(format!("favorite -> {favorite}"));
        }
        if !change.reviews.is_empty() {
            pieces.push(format!("{} review(s)", change.reviews.len()));
        }
        println!("restaurant {}: {}", change.restaurant_id, pieces.join(", "));
    }

    Ok(())
}
