// region:    --- Imports
use crate::view;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{debug, error};

// endregion: --- Imports

// region:    --- Rule Violation
/// 경매 규칙 위반
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Your bid of {amount} must be greater than {minimum}.")]
    BidTooLow { amount: i64, minimum: i64 },
    #[error("You cannot bid on your own listing.")]
    OwnListing,
    #[error("This auction is closed.")]
    ListingClosed,
}

// endregion: --- Rule Violation

// region:    --- Auction Error
#[derive(Error, Debug)]
pub enum AuctionError {
    /// 잘못되었거나 누락된 입력
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    BusinessRule(#[from] RuleViolation),
    #[error("Login required.")]
    Unauthenticated,
    #[error("{0}")]
    Forbidden(String),
    #[error("{entity} {id} not found.")]
    NotFound { entity: &'static str, id: i64 },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Session(#[from] tower_sessions::session::Error),
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

impl AuctionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn listing_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Listing",
            id,
        }
    }

    /// 폼을 다시 렌더링해서 사용자에게 보여줄 수 있는 오류인지 여부
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::BusinessRule(_) | Self::Forbidden(_)
        )
    }
}

impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => view::found("/login"),
            Self::NotFound { .. } => {
                debug!("{:<12} --> {}", "Error", self);
                (
                    StatusCode::NOT_FOUND,
                    Json(view::ErrorPage::new(self.to_string())),
                )
                    .into_response()
            }
            // 폼 문맥이 없는 곳에서도 복구 가능한 오류는 200 으로 메시지를 보여준다
            err if err.is_recoverable() => (
                StatusCode::OK,
                Json(view::ErrorPage::new(err.to_string())),
            )
                .into_response(),
            err => {
                error!("{:<12} --> 내부 오류: {}", "Error", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(view::ErrorPage::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

// endregion: --- Auction Error
