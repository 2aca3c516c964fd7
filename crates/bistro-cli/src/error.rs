use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] bistro_core::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(u32),
}
