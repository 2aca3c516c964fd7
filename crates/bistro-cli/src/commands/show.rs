use crate::commands::common::{format_timestamp, CliApp};
use crate::error::CliError;

pub async fn run_show(app: &CliApp, id: u32, as_json: bool) -> Result<(), CliError> {
    let restaurant = app
        .fetch_restaurant_by_id(id)
        .await
        .ok_or(CliError::RestaurantNotFound(id))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&restaurant)?);
        return Ok(());
    }

    println!("{} ({})", restaurant.name, restaurant.cuisine_type);
    if !restaurant.address.is_empty() {
        println!("{} - {}", restaurant.address, restaurant.neighborhood);
    }
    println!("Favorite: {}", if restaurant.is_favorite { "yes" } else { "no" });

    if restaurant.reviews.is_empty() {
        println!("No reviews yet");
    } else {
        println!("Reviews:");
        for review in &restaurant.reviews {
            let state = if review.id.is_some() { "" } else { " (not yet synced)" };
            println!(
                "  {} [{}/5] {}{state}: {}",
                format_timestamp(review.created_at),
                review.rating,
                review.name,
                review.comments
            );
        }
    }

    Ok(())
}
