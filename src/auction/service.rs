/// 경매 도메인 서비스
/// 각 연산은 요청마다 명시적으로 전달된 사용자 ID 로 수행된다.
// region:    --- Imports
use super::commands::{
    parse_amount, CommentCommand, CreateListingCommand, LoginCommand, NewBid, NewUser,
    RegisterUserCommand,
};
use super::model::{Bid, Comment, Listing, ListingDetails, User, WatchAction};
use crate::auth::password;
use crate::error::AuctionError;
use crate::store::AuctionStore;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Auction Service
pub struct AuctionService {
    store: Arc<dyn AuctionStore>,
}

impl AuctionService {
    pub fn new(store: Arc<dyn AuctionStore>) -> Self {
        Self { store }
    }

    /// 1. 회원 가입
    pub async fn register_user(&self, cmd: RegisterUserCommand) -> Result<User, AuctionError> {
        info!("{:<12} --> 회원 가입: {}", "Service", cmd.username);
        cmd.validate()?;

        let password_hash = password::hash_password(&cmd.password)?;
        self.store
            .create_user(NewUser {
                username: cmd.username.trim().to_string(),
                email: cmd.email.trim().to_string(),
                password_hash,
            })
            .await
    }

    /// 로그인
    pub async fn authenticate(&self, cmd: LoginCommand) -> Result<User, AuctionError> {
        let user = self.store.find_user_by_username(cmd.username.trim()).await?;
        match user {
            Some(user) if password::verify_password(&cmd.password, &user.password_hash) => {
                info!("{:<12} --> 로그인 성공: {}", "Service", user.username);
                Ok(user)
            }
            _ => {
                warn!("{:<12} --> 로그인 실패: {}", "Service", cmd.username);
                Err(AuctionError::validation(
                    "Invalid username and/or password.",
                ))
            }
        }
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, AuctionError> {
        self.store.find_user(user_id).await
    }

    /// 2. 상품 등록
    pub async fn create_listing(
        &self,
        owner_id: i64,
        cmd: CreateListingCommand,
    ) -> Result<Listing, AuctionError> {
        let new_listing = cmd.into_new_listing(owner_id)?;
        info!(
            "{:<12} --> 상품 등록: {} (시작가 {})",
            "Service", new_listing.title, new_listing.starting_bid
        );
        self.store.create_listing(new_listing).await
    }

    /// 3. 입찰
    pub async fn place_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        raw_amount: &str,
    ) -> Result<Bid, AuctionError> {
        let amount = parse_amount(raw_amount)?;
        info!(
            "{:<12} --> 입찰 요청 listing: {}, bidder: {}, amount: {}",
            "Service", listing_id, bidder_id, amount
        );

        let result = self
            .store
            .place_bid(NewBid {
                listing_id,
                bidder_id,
                amount,
            })
            .await;

        if let Err(AuctionError::BusinessRule(violation)) = &result {
            info!("{:<12} --> 입찰 거절: {}", "Service", violation);
        }
        result
    }

    /// 4. 관심 목록 추가/제거
    pub async fn toggle_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
        action: WatchAction,
    ) -> Result<(), AuctionError> {
        info!(
            "{:<12} --> 관심 목록 {:?} user: {}, listing: {}",
            "Service", action, user_id, listing_id
        );
        self.store
            .set_watched(user_id, listing_id, action == WatchAction::Add)
            .await
    }

    pub async fn watchlist(&self, user_id: i64) -> Result<Vec<Listing>, AuctionError> {
        self.store.watchlist(user_id).await
    }

    /// 5. 경매 종료 (판매자만 가능, 이미 종료된 경우 변화 없음)
    pub async fn close_auction(
        &self,
        listing_id: i64,
        requester_id: i64,
    ) -> Result<Listing, AuctionError> {
        self.store.close_listing(listing_id, requester_id).await
    }

    /// 6. 카테고리별 진행 중인 상품
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Listing>, AuctionError> {
        self.store.active_listings(Some(category)).await
    }

    pub async fn active_listings(&self) -> Result<Vec<Listing>, AuctionError> {
        self.store.active_listings(None).await
    }

    pub async fn categories(&self) -> Result<Vec<String>, AuctionError> {
        self.store.active_categories().await
    }

    /// 댓글 작성
    pub async fn add_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        cmd: CommentCommand,
    ) -> Result<Comment, AuctionError> {
        let new_comment = cmd.into_new_comment(listing_id, author_id)?;
        if self.store.find_listing(listing_id).await?.is_none() {
            return Err(AuctionError::listing_not_found(listing_id));
        }
        self.store.add_comment(new_comment).await
    }

    /// 상품 상세 정보
    pub async fn listing_details(
        &self,
        listing_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<ListingDetails, AuctionError> {
        let listing = self
            .store
            .find_listing(listing_id)
            .await?
            .ok_or_else(|| AuctionError::listing_not_found(listing_id))?;

        let owner = self.username(listing.owner_id).await?;
        let bids = self.store.bids_for(listing_id).await?;
        let highest_bidder = match bids.iter().max_by_key(|bid| bid.amount) {
            Some(bid) => Some(self.username(bid.bidder_id).await?),
            None => None,
        };
        let comments = self.store.comments_for(listing_id).await?;
        let watched = match viewer_id {
            Some(viewer_id) => self.store.is_watched(viewer_id, listing_id).await?,
            None => false,
        };

        Ok(ListingDetails {
            is_owner: viewer_id == Some(listing.owner_id),
            winner: highest_bidder.clone().filter(|_| !listing.active),
            listing,
            owner,
            bid_count: bids.len(),
            highest_bidder,
            comments,
            watched,
        })
    }

    async fn username(&self, user_id: i64) -> Result<String, AuctionError> {
        self.store
            .find_user(user_id)
            .await?
            .map(|user| user.username)
            .ok_or(AuctionError::NotFound {
                entity: "User",
                id: user_id,
            })
    }
}

// endregion: --- Auction Service
