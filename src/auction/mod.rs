pub mod commands;
pub mod model;
pub mod rules;
pub mod service;

pub use service::AuctionService;
