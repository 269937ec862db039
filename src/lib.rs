pub mod app;
pub mod config;
pub mod error;
pub mod items;
pub mod nutrition;
pub mod profiles;
pub mod recommendations;
pub mod state;
pub mod store;
