use bistro_core::ReviewDraft;

use crate::commands::common::{describe_status, CliApp};
use crate::error::CliError;

pub async fn run_favorite(app: &CliApp, id: u32, favorite: bool) -> Result<(), CliError> {
    let status = app.toggle_favorite(id, favorite).await?;
    let verb = if favorite { "Favorited" } else { "Unfavorited" };
    println!("{verb} restaurant {id}: {}", describe_status(status));
    Ok(())
}

pub async fn run_review(
    app: &CliApp,
    id: u32,
    name: String,
    rating: u8,
    comments: String,
) -> Result<(), CliError> {
    let status = app
        .submit_review(ReviewDraft {
            restaurant_id: id,
            name,
            rating,
            comments,
        })
        .await?;
    println!("Review for restaurant {id}: {}", describe_status(status));
    Ok(())
}
