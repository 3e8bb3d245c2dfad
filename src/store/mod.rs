// region:    --- Imports
use crate::auction::commands::{NewBid, NewComment, NewListing, NewUser};
use crate::auction::model::{Bid, Comment, Listing, User};
use crate::error::AuctionError;
use async_trait::async_trait;

// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;
pub mod queries;

pub use memory::MemoryAuctionStore;
pub use postgres::PgAuctionStore;

// endregion: --- Modules

// region:    --- Auction Store Trait
/// 경매 저장소 트레이트
///
/// `place_bid` 와 `close_listing` 은 상품 단위로 직렬화되어야 한다.
/// 구현체는 잠금을 잡은 상태에서 `auction::rules` 로 검증한 뒤 기록한다.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// 사용자명이 이미 존재하면 `AuctionError::Validation`
    async fn create_user(&self, user: NewUser) -> Result<User, AuctionError>;

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AuctionError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AuctionError>;

    async fn create_listing(&self, listing: NewListing) -> Result<Listing, AuctionError>;

    async fn find_listing(&self, listing_id: i64) -> Result<Option<Listing>, AuctionError>;

    /// 진행 중인 상품 (최신순). 카테고리가 주어지면 정확히 일치하는 것만
    async fn active_listings(&self, category: Option<&str>) -> Result<Vec<Listing>, AuctionError>;

    async fn active_categories(&self) -> Result<Vec<String>, AuctionError>;

    async fn place_bid(&self, bid: NewBid) -> Result<Bid, AuctionError>;

    /// 입찰 이력 (오래된 순)
    async fn bids_for(&self, listing_id: i64) -> Result<Vec<Bid>, AuctionError>;

    async fn close_listing(&self, listing_id: i64, requester_id: i64)
        -> Result<Listing, AuctionError>;

    async fn add_comment(&self, comment: NewComment) -> Result<Comment, AuctionError>;

    async fn comments_for(&self, listing_id: i64) -> Result<Vec<Comment>, AuctionError>;

    /// 관심 목록 추가/제거 (멱등)
    async fn set_watched(
        &self,
        user_id: i64,
        listing_id: i64,
        watched: bool,
    ) -> Result<(), AuctionError>;

    async fn is_watched(&self, user_id: i64, listing_id: i64) -> Result<bool, AuctionError>;

    async fn watchlist(&self, user_id: i64) -> Result<Vec<Listing>, AuctionError>;
}

// endregion: --- Auction Store Trait
