// region:    --- Imports
use super::{queries, AuctionStore};
use crate::auction::commands::{NewBid, NewComment, NewListing, NewUser};
use crate::auction::model::{Bid, Comment, Listing, User};
use crate::auction::rules;
use crate::database::DatabaseManager;
use crate::error::AuctionError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Postgres Auction Store
/// Postgres 경매 저장소
pub struct PgAuctionStore {
    db_manager: Arc<DatabaseManager>,
}

impl PgAuctionStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl AuctionStore for PgAuctionStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AuctionError> {
        info!("{:<12} --> 사용자 생성: {}", "Store", user.username);
        sqlx::query_as::<_, User>(queries::INSERT_USER)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_optional(self.db_manager.pool())
            .await?
            .ok_or_else(|| AuctionError::validation("Username already taken."))
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AuctionError> {
        let user = sqlx::query_as::<_, User>(queries::GET_USER)
            .bind(user_id)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AuctionError> {
        let user = sqlx::query_as::<_, User>(queries::GET_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(user)
    }

    async fn create_listing(&self, listing: NewListing) -> Result<Listing, AuctionError> {
        info!("{:<12} --> 상품 생성: {}", "Store", listing.title);
        self.db_manager
            .transaction(move |tx| {
                Box::pin(async move {
                    let listing_id: i64 = sqlx::query_scalar(queries::INSERT_LISTING)
                        .bind(&listing.title)
                        .bind(&listing.description)
                        .bind(listing.starting_bid)
                        .bind(&listing.image_url)
                        .bind(&listing.category)
                        .bind(listing.owner_id)
                        .fetch_one(&mut **tx)
                        .await?;

                    let created = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                        .bind(listing_id)
                        .fetch_one(&mut **tx)
                        .await?;
                    Ok(created)
                })
            })
            .await
    }

    async fn find_listing(&self, listing_id: i64) -> Result<Option<Listing>, AuctionError> {
        let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
            .bind(listing_id)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(listing)
    }

    async fn active_listings(&self, category: Option<&str>) -> Result<Vec<Listing>, AuctionError> {
        let listings = match category {
            Some(category) => {
                sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS_BY_CATEGORY)
                    .bind(category)
                    .fetch_all(self.db_manager.pool())
                    .await?
            }
            None => {
                sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS)
                    .fetch_all(self.db_manager.pool())
                    .await?
            }
        };
        Ok(listings)
    }

    async fn active_categories(&self) -> Result<Vec<String>, AuctionError> {
        let categories = sqlx::query_scalar::<_, String>(queries::GET_ACTIVE_CATEGORIES)
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(categories)
    }

    async fn place_bid(&self, bid: NewBid) -> Result<Bid, AuctionError> {
        info!("{:<12} --> 입찰 처리: {:?}", "Store", bid);
        self.db_manager
            .transaction(move |tx| {
                Box::pin(async move {
                    // 같은 상품에 대한 동시 입찰은 행 잠금으로 직렬화
                    sqlx::query_scalar::<_, i64>(queries::LOCK_LISTING)
                        .bind(bid.listing_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| AuctionError::listing_not_found(bid.listing_id))?;

                    let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                        .bind(bid.listing_id)
                        .fetch_one(&mut **tx)
                        .await?;

                    let highest_bid = sqlx::query_scalar::<_, Option<i64>>(queries::GET_HIGHEST_BID)
                        .bind(bid.listing_id)
                        .fetch_one(&mut **tx)
                        .await?;

                    rules::check_bid(&listing, highest_bid, bid.bidder_id, bid.amount)?;

                    let created = sqlx::query_as::<_, Bid>(queries::INSERT_BID)
                        .bind(bid.listing_id)
                        .bind(bid.bidder_id)
                        .bind(bid.amount)
                        .fetch_one(&mut **tx)
                        .await?;
                    Ok(created)
                })
            })
            .await
    }

    async fn bids_for(&self, listing_id: i64) -> Result<Vec<Bid>, AuctionError> {
        let bids = sqlx::query_as::<_, Bid>(queries::GET_BIDS)
            .bind(listing_id)
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(bids)
    }

    async fn close_listing(
        &self,
        listing_id: i64,
        requester_id: i64,
    ) -> Result<Listing, AuctionError> {
        info!("{:<12} --> 경매 종료 id: {}", "Store", listing_id);
        self.db_manager
            .transaction(move |tx| {
                Box::pin(async move {
                    sqlx::query_scalar::<_, i64>(queries::LOCK_LISTING)
                        .bind(listing_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| AuctionError::listing_not_found(listing_id))?;

                    let mut listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                        .bind(listing_id)
                        .fetch_one(&mut **tx)
                        .await?;

                    if rules::check_close(&listing, requester_id)? {
                        sqlx::query(queries::CLOSE_LISTING)
                            .bind(listing_id)
                            .execute(&mut **tx)
                            .await?;
                        listing.active = false;
                    } else {
                        debug!("{:<12} --> 이미 종료된 경매 id: {}", "Store", listing_id);
                    }
                    Ok(listing)
                })
            })
            .await
    }

    async fn add_comment(&self, comment: NewComment) -> Result<Comment, AuctionError> {
        let comment = sqlx::query_as::<_, Comment>(queries::INSERT_COMMENT)
            .bind(comment.listing_id)
            .bind(comment.author_id)
            .bind(&comment.body)
            .fetch_one(self.db_manager.pool())
            .await?;
        Ok(comment)
    }

    async fn comments_for(&self, listing_id: i64) -> Result<Vec<Comment>, AuctionError> {
        let comments = sqlx::query_as::<_, Comment>(queries::GET_COMMENTS)
            .bind(listing_id)
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(comments)
    }

    async fn set_watched(
        &self,
        user_id: i64,
        listing_id: i64,
        watched: bool,
    ) -> Result<(), AuctionError> {
        let query = if watched {
            queries::ADD_WATCH
        } else {
            queries::REMOVE_WATCH
        };
        self.db_manager
            .transaction(move |tx| {
                Box::pin(async move {
                    let exists = sqlx::query_scalar::<_, bool>(queries::LISTING_EXISTS)
                        .bind(listing_id)
                        .fetch_one(&mut **tx)
                        .await?;
                    if !exists {
                        return Err(AuctionError::listing_not_found(listing_id));
                    }

                    sqlx::query(query)
                        .bind(user_id)
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?;
                    Ok(())
                })
            })
            .await
    }

    async fn is_watched(&self, user_id: i64, listing_id: i64) -> Result<bool, AuctionError> {
        let watched = sqlx::query_scalar::<_, bool>(queries::IS_WATCHED)
            .bind(user_id)
            .bind(listing_id)
            .fetch_one(self.db_manager.pool())
            .await?;
        Ok(watched)
    }

    async fn watchlist(&self, user_id: i64) -> Result<Vec<Listing>, AuctionError> {
        let listings = sqlx::query_as::<_, Listing>(queries::GET_WATCHLIST)
            .bind(user_id)
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(listings)
    }
}

// endregion: --- Postgres Auction Store
