// region:    --- Imports
use super::AuctionStore;
use crate::auction::commands::{NewBid, NewComment, NewListing, NewUser};
use crate::auction::model::{Bid, Comment, Listing, User};
use crate::auction::rules;
use crate::error::AuctionError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeSet, HashSet};
use tokio::sync::Mutex;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Memory State
#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    listings: Vec<Listing>,
    bids: Vec<Bid>,
    comments: Vec<Comment>,
    watchlist: HashSet<(i64, i64)>,
}

impl MemoryState {
    fn highest_bid(&self, listing_id: i64) -> Option<i64> {
        self.bids
            .iter()
            .filter(|bid| bid.listing_id == listing_id)
            .map(|bid| bid.amount)
            .max()
    }

    /// 현재 가격을 계산해서 반환
    fn hydrate(&self, listing: &Listing) -> Listing {
        Listing {
            current_price: rules::current_price(listing.starting_bid, self.highest_bid(listing.id)),
            ..listing.clone()
        }
    }

    fn listing_index(&self, listing_id: i64) -> Result<usize, AuctionError> {
        self.listings
            .iter()
            .position(|listing| listing.id == listing_id)
            .ok_or_else(|| AuctionError::listing_not_found(listing_id))
    }

    /// 최신순 정렬
    fn newest_first<'a>(&self, listings: impl Iterator<Item = &'a Listing>) -> Vec<Listing> {
        let mut listings: Vec<Listing> = listings.map(|listing| self.hydrate(listing)).collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        listings
    }
}

// endregion: --- Memory State

// region:    --- Memory Auction Store
/// 인메모리 경매 저장소
///
/// 모든 연산이 하나의 뮤텍스로 직렬화된다.
#[derive(Default)]
pub struct MemoryAuctionStore {
    state: Mutex<MemoryState>,
}

impl MemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuctionStore for MemoryAuctionStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AuctionError> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(AuctionError::validation("Username already taken."));
        }

        info!("{:<12} --> 사용자 생성: {}", "Store", user.username);
        let created = User {
            id: state.users.len() as i64 + 1,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AuctionError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AuctionError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_listing(&self, listing: NewListing) -> Result<Listing, AuctionError> {
        let mut state = self.state.lock().await;
        info!("{:<12} --> 상품 생성: {}", "Store", listing.title);
        let created = Listing {
            id: state.listings.len() as i64 + 1,
            title: listing.title,
            description: listing.description,
            starting_bid: listing.starting_bid,
            image_url: listing.image_url,
            category: listing.category,
            owner_id: listing.owner_id,
            active: true,
            created_at: Utc::now(),
            current_price: listing.starting_bid,
        };
        state.listings.push(created.clone());
        Ok(created)
    }

    async fn find_listing(&self, listing_id: i64) -> Result<Option<Listing>, AuctionError> {
        let state = self.state.lock().await;
        Ok(state
            .listings
            .iter()
            .find(|listing| listing.id == listing_id)
            .map(|listing| state.hydrate(listing)))
    }

    async fn active_listings(&self, category: Option<&str>) -> Result<Vec<Listing>, AuctionError> {
        let state = self.state.lock().await;
        Ok(state.newest_first(state.listings.iter().filter(|listing| {
            listing.active && category.map_or(true, |category| listing.category == category)
        })))
    }

    async fn active_categories(&self) -> Result<Vec<String>, AuctionError> {
        let state = self.state.lock().await;
        let categories: BTreeSet<&str> = state
            .listings
            .iter()
            .filter(|listing| listing.active)
            .map(|listing| listing.category.as_str())
            .collect();
        Ok(categories.into_iter().map(str::to_string).collect())
    }

    async fn place_bid(&self, bid: NewBid) -> Result<Bid, AuctionError> {
        let mut state = self.state.lock().await;
        let index = state.listing_index(bid.listing_id)?;
        let highest_bid = state.highest_bid(bid.listing_id);

        rules::check_bid(
            &state.listings[index],
            highest_bid,
            bid.bidder_id,
            bid.amount,
        )?;

        info!("{:<12} --> 입찰 처리: {:?}", "Store", bid);
        let created = Bid {
            id: state.bids.len() as i64 + 1,
            listing_id: bid.listing_id,
            bidder_id: bid.bidder_id,
            amount: bid.amount,
            created_at: Utc::now(),
        };
        state.bids.push(created.clone());
        Ok(created)
    }

    async fn bids_for(&self, listing_id: i64) -> Result<Vec<Bid>, AuctionError> {
        let state = self.state.lock().await;
        Ok(state
            .bids
            .iter()
            .filter(|bid| bid.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn close_listing(
        &self,
        listing_id: i64,
        requester_id: i64,
    ) -> Result<Listing, AuctionError> {
        let mut state = self.state.lock().await;
        let index = state.listing_index(listing_id)?;

        if rules::check_close(&state.listings[index], requester_id)? {
            info!("{:<12} --> 경매 종료 id: {}", "Store", listing_id);
            state.listings[index].active = false;
        } else {
            debug!("{:<12} --> 이미 종료된 경매 id: {}", "Store", listing_id);
        }
        Ok(state.hydrate(&state.listings[index]))
    }

    async fn add_comment(&self, comment: NewComment) -> Result<Comment, AuctionError> {
        let mut state = self.state.lock().await;
        state.listing_index(comment.listing_id)?;
        let author = state
            .users
            .iter()
            .find(|u| u.id == comment.author_id)
            .map(|u| u.username.clone())
            .ok_or(AuctionError::NotFound {
                entity: "User",
                id: comment.author_id,
            })?;

        let created = Comment {
            id: state.comments.len() as i64 + 1,
            listing_id: comment.listing_id,
            author_id: comment.author_id,
            author,
            body: comment.body,
            created_at: Utc::now(),
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn comments_for(&self, listing_id: i64) -> Result<Vec<Comment>, AuctionError> {
        let state = self.state.lock().await;
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn set_watched(
        &self,
        user_id: i64,
        listing_id: i64,
        watched: bool,
    ) -> Result<(), AuctionError> {
        let mut state = self.state.lock().await;
        state.listing_index(listing_id)?;
        if watched {
            state.watchlist.insert((user_id, listing_id));
        } else {
            state.watchlist.remove(&(user_id, listing_id));
        }
        Ok(())
    }

    async fn is_watched(&self, user_id: i64, listing_id: i64) -> Result<bool, AuctionError> {
        let state = self.state.lock().await;
        Ok(state.watchlist.contains(&(user_id, listing_id)))
    }

    async fn watchlist(&self, user_id: i64) -> Result<Vec<Listing>, AuctionError> {
        let state = self.state.lock().await;
        Ok(state.newest_first(
            state
                .listings
                .iter()
                .filter(|listing| state.watchlist.contains(&(user_id, listing.id))),
        ))
    }
}

// endregion: --- Memory Auction Store
