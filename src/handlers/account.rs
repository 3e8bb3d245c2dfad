// region:    --- Imports
use crate::auction::commands::{LoginCommand, RegisterUserCommand};
use crate::auth::session::safe_next;
use crate::auth::{MaybeUser, SessionUserId};
use crate::state::AppState;
use crate::view::{self, FormPage, Viewer};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info};

// endregion: --- Imports

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// region:    --- Register
/// 회원 가입 폼
pub async fn register_form(MaybeUser(user): MaybeUser) -> impl IntoResponse {
    Json(FormPage::new("register", user.as_ref().map(Viewer::from)))
}

/// 회원 가입 요청 처리
pub async fn register(
    State(state): State<AppState>,
    Form(cmd): Form<RegisterUserCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 회원 가입 요청: {}", "Handler", cmd.username);
    match state.service.register_user(cmd).await {
        Ok(user) => {
            info!("{:<12} --> 회원 가입 완료 id: {}", "Handler", user.id);
            view::found("/login")
        }
        Err(e) if e.is_recoverable() => {
            Json(FormPage::new("register", None).with_error(e)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// endregion: --- Register

// region:    --- Login
/// 로그인 폼
pub async fn login_form(MaybeUser(user): MaybeUser) -> impl IntoResponse {
    Json(FormPage::new("login", user.as_ref().map(Viewer::from)))
}

/// 로그인 요청 처리
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NextQuery>,
    Form(cmd): Form<LoginCommand>,
) -> impl IntoResponse {
    match state.service.authenticate(cmd).await {
        Ok(user) => match SessionUserId::insert(&session, user.id).await {
            Ok(()) => view::found(safe_next(query.next.as_deref())),
            Err(e) => e.into_response(),
        },
        Err(e) if e.is_recoverable() => {
            Json(FormPage::new("login", None).with_error(e)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 로그아웃
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = session.flush().await {
        error!("{:<12} --> 세션 삭제 실패: {:?}", "Handler", e);
    }
    view::found("/")
}

// endregion: --- Login
