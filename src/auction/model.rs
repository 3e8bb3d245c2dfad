use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 카테고리가 지정되지 않은 상품의 기본 카테고리
pub const UNSPECIFIED_CATEGORY: &str = "Unspecified";

// 사용자 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// 경매 상품 모델
// current_price 는 저장하지 않고 조회할 때마다 입찰 기록에서 계산한다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starting_bid: i64,
    pub image_url: Option<String>,
    pub category: String,
    pub owner_id: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub current_price: i64,
}

// 입찰 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub listing_id: i64,
    pub bidder_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

// 댓글 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub author_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// 관심 목록 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchAction {
    Add,
    Remove,
}

/// 상품 상세 정보
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetails {
    pub listing: Listing,
    pub owner: String,
    pub bid_count: usize,
    pub highest_bidder: Option<String>,
    pub comments: Vec<Comment>,
    pub watched: bool,
    pub is_owner: bool,
    /// 경매가 종료된 경우의 낙찰자
    pub winner: Option<String>,
}
