use crate::auction::AuctionService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AuctionService>,
}

impl AppState {
    pub fn new(service: Arc<AuctionService>) -> Self {
        Self { service }
    }
}
