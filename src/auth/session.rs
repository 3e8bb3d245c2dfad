// region:    --- Imports
use crate::auction::model::User;
use crate::error::AuctionError;
use crate::state::AppState;
use crate::view;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::debug;

// endregion: --- Imports

// region:    --- Session User Id
pub const SESSION_USER_ID_KEY: &str = "auction:user:id";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub i64);

impl SessionUserId {
    /// 세션에 사용자 ID 저장 (세션 ID 갱신)
    pub async fn insert(session: &Session, user_id: i64) -> Result<(), AuctionError> {
        session.cycle_id().await?;
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id))
            .await?;
        Ok(())
    }

    /// 세션에서 사용자 ID 조회
    pub async fn get(session: &Session) -> Result<Option<i64>, AuctionError> {
        Ok(session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id)| id))
    }
}

/// 세션의 사용자 조회. 세션은 있지만 사용자가 없으면 세션을 비운다.
pub async fn user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<Option<User>, AuctionError> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Ok(None);
    };

    let user = state.service.get_user(user_id).await?;
    if user.is_none() {
        debug!(
            "{:<12} --> 존재하지 않는 사용자 {}의 세션 삭제",
            "Auth", user_id
        );
        session.flush().await?;
    }
    Ok(user)
}

// endregion: --- Session User Id

// region:    --- Extractors
/// 로그인한 사용자
///
/// 로그인하지 않은 경우 `/login?next=<경로>` 로 리다이렉트한다.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match user_from_session(state, &session).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => Err(view::found(&login_url(parts.uri.path()))),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// 로그인 여부와 무관하게 사용자 조회
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        user_from_session(state, &session)
            .await
            .map(MaybeUser)
            .map_err(IntoResponse::into_response)
    }
}

/// 로그인 페이지 주소
pub fn login_url(next: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("/login?{}", query)
}

/// 로그인 후 이동할 경로. 외부 주소는 허용하지 않는다.
pub fn safe_next(next: Option<&str>) -> &str {
    // 브라우저는 역슬래시를 '/' 로 바꾸고 탭과 개행은 지운다
    let is_local = |path: &str| {
        path.starts_with('/')
            && !path.starts_with("//")
            && !path.chars().any(|c| c == '\\' || c.is_control())
    };
    match next {
        Some(path) if is_local(path) => path,
        _ => "/",
    }
}

// endregion: --- Extractors
