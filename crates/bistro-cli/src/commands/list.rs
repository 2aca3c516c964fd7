use crate::commands::common::{format_restaurant_line, restaurant_to_list_item, CliApp, RestaurantListItem};
use crate::error::CliError;

pub async fn run_list(
    app: &CliApp,
    cuisine: &str,
    neighborhood: &str,
    as_json: bool,
) -> Result<(), CliError> {
    let restaurants = app
        .fetch_restaurant_by_cuisine_and_neighborhood(cuisine, neighborhood)
        .await;

    if as_json {
        let items = restaurants
            .iter()
            .map(restaurant_to_list_item)
            .collect::<Vec<RestaurantListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if restaurants.is_empty() {
        println!("No restaurants known (offline with an empty cache?)");
    } else {
        for restaurant in &restaurants {
            println!("{}", format_restaurant_line(restaurant));
        }
    }

    Ok(())
}
