pub mod common;
pub mod list;
pub mod mutate;
pub mod show;
pub mod sync;
pub mod taxonomy;
