//! 핸들러가 반환하는 페이지 모델.
//!
//! 화면 렌더링은 클라이언트가 담당하고, 서버는 페이지 단위의 JSON 문서를 돌려준다.

use crate::auction::model::{Listing, ListingDetails, User};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// 302 Found 리다이렉트
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// 로그인 사용자 요약
#[derive(Debug, Serialize)]
pub struct Viewer {
    pub id: i64,
    pub username: String,
}

impl From<&User> for Viewer {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// 상품 목록 페이지 (메인, 카테고리, 관심 목록)
#[derive(Debug, Serialize)]
pub struct ListingsPage {
    pub heading: String,
    pub viewer: Option<Viewer>,
    pub listings: Vec<Listing>,
}

/// 입력 폼 페이지 (회원 가입, 로그인, 상품 등록)
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: &'static str,
    pub viewer: Option<Viewer>,
    pub error: Option<String>,
}

impl FormPage {
    pub fn new(form: &'static str, viewer: Option<Viewer>) -> Self {
        Self {
            form,
            viewer,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

/// 상품 상세(입찰) 페이지
#[derive(Debug, Serialize)]
pub struct ListingPage {
    #[serde(flatten)]
    pub details: ListingDetails,
    pub viewer: Option<Viewer>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesPage {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessagePage {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorPage {
    pub error: String,
}

impl ErrorPage {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
