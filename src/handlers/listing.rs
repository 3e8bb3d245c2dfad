// region:    --- Imports
use super::{listing_error, render_listing};
use crate::auction::commands::{CommentCommand, CreateListingCommand, PlaceBidCommand};
use crate::auth::{AuthUser, MaybeUser};
use crate::state::AppState;
use crate::view::{self, CategoriesPage, FormPage, ListingsPage, MessagePage, Viewer};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Form, Json};
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers
/// 진행 중인 상품 목록
pub async fn index(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> impl IntoResponse {
    info!("{:<12} --> 진행 중인 상품 조회", "HandlerQuery");
    match state.service.active_listings().await {
        Ok(listings) => Json(ListingsPage {
            heading: "Active Listings".to_string(),
            viewer: user.as_ref().map(Viewer::from),
            listings,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// 카테고리 목록
pub async fn categories(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.categories().await {
        Ok(categories) => Json(CategoriesPage { categories }).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 카테고리별 상품 조회
pub async fn category(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(name): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 카테고리 조회: {}", "HandlerQuery", name);
    match state.service.list_by_category(&name).await {
        Ok(listings) => Json(ListingsPage {
            heading: name,
            viewer: user.as_ref().map(Viewer::from),
            listings,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// 상품 상세(입찰) 페이지
pub async fn bid_page(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(listing_id): Path<i64>,
) -> impl IntoResponse {
    render_listing(&state, listing_id, &user, None).await
}

/// 요청 성공 페이지
pub async fn success(AuthUser(_user): AuthUser) -> impl IntoResponse {
    Json(MessagePage {
        message: "Your request was successful.".to_string(),
    })
}

// endregion: --- Query Handlers

// region:    --- Command Handlers
/// 상품 등록 폼
pub async fn create_form(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(FormPage::new("create", Some(Viewer::from(&user))))
}

/// 상품 등록 요청 처리
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Form(cmd): Form<CreateListingCommand>,
) -> impl IntoResponse {
    match state.service.create_listing(user.id, cmd).await {
        Ok(listing) => view::found(&format!("/bid/{}", listing.id)),
        Err(e) if e.is_recoverable() => {
            Json(FormPage::new("create", Some(Viewer::from(&user))).with_error(e)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 입찰 요청 처리
pub async fn bid(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(listing_id): Path<i64>,
    Form(cmd): Form<PlaceBidCommand>,
) -> impl IntoResponse {
    match state.service.place_bid(listing_id, user.id, &cmd.bid).await {
        Ok(_) => view::found("/success"),
        Err(e) => listing_error(&state, listing_id, &user, e).await,
    }
}

/// 경매 종료
pub async fn close(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(listing_id): Path<i64>,
) -> impl IntoResponse {
    match state.service.close_auction(listing_id, user.id).await {
        Ok(_) => view::found(&format!("/bid/{}", listing_id)),
        Err(e) => listing_error(&state, listing_id, &user, e).await,
    }
}

/// 댓글 작성
pub async fn comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(listing_id): Path<i64>,
    Form(cmd): Form<CommentCommand>,
) -> impl IntoResponse {
    match state.service.add_comment(listing_id, user.id, cmd).await {
        Ok(_) => view::found(&format!("/bid/{}", listing_id)),
        Err(e) => listing_error(&state, listing_id, &user, e).await,
    }
}

// endregion: --- Command Handlers
