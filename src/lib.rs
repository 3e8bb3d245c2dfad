pub mod auction;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod store;
pub mod view;
