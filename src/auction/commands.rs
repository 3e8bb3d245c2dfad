/// 경매 관련 커맨드
/// 1. 회원 가입
/// 2. 상품 등록
/// 3. 입찰
/// 4. 댓글 작성
// region:    --- Imports
use super::model::UNSPECIFIED_CATEGORY;
use crate::error::AuctionError;
use serde::Deserialize;

// endregion: --- Imports

// region:    --- Commands
/// 회원 가입 명령
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

/// 로그인 명령
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// 상품 등록 명령
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CreateListingCommand {
    pub title: String,
    #[serde(alias = "discription")]
    pub description: String,
    pub starting_bid: String,
    pub image_url: String,
    pub category: String,
}

/// 입찰 명령
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PlaceBidCommand {
    pub bid: String,
}

/// 댓글 작성 명령
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CommentCommand {
    pub comment: String,
}

// endregion: --- Commands

// region:    --- Validated Inputs
/// 검증이 끝난 신규 사용자
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// 검증이 끝난 신규 상품
#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub starting_bid: i64,
    pub image_url: Option<String>,
    pub category: String,
}

/// 검증이 끝난 신규 입찰
#[derive(Debug, Clone, Copy)]
pub struct NewBid {
    pub listing_id: i64,
    pub bidder_id: i64,
    pub amount: i64,
}

/// 검증이 끝난 신규 댓글
#[derive(Debug, Clone)]
pub struct NewComment {
    pub listing_id: i64,
    pub author_id: i64,
    pub body: String,
}

impl RegisterUserCommand {
    /// 입력값 검증 (비밀번호 해싱 전)
    pub fn validate(&self) -> Result<(), AuctionError> {
        if self.username.trim().is_empty() {
            return Err(AuctionError::validation("Username is required."));
        }
        if self.password.is_empty() {
            return Err(AuctionError::validation("Password is required."));
        }
        if self.password != self.confirmation {
            return Err(AuctionError::validation("Passwords must match."));
        }
        Ok(())
    }
}

impl CreateListingCommand {
    pub fn into_new_listing(self, owner_id: i64) -> Result<NewListing, AuctionError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AuctionError::validation("Title is required."));
        }

        let starting_bid = parse_amount(&self.starting_bid)
            .map_err(|_| AuctionError::validation("Starting bid must be a non-negative number."))?;

        let image_url = Some(self.image_url.trim().to_string()).filter(|url| !url.is_empty());

        let category = match self.category.trim() {
            "" => UNSPECIFIED_CATEGORY.to_string(),
            category => category.to_string(),
        };

        Ok(NewListing {
            owner_id,
            title,
            description: self.description.trim().to_string(),
            starting_bid,
            image_url,
            category,
        })
    }
}

impl CommentCommand {
    pub fn into_new_comment(
        self,
        listing_id: i64,
        author_id: i64,
    ) -> Result<NewComment, AuctionError> {
        let body = self.comment.trim().to_string();
        if body.is_empty() {
            return Err(AuctionError::validation("Comment cannot be empty."));
        }
        Ok(NewComment {
            listing_id,
            author_id,
            body,
        })
    }
}

/// 금액 파싱 (0 이상의 정수)
pub fn parse_amount(raw: &str) -> Result<i64, AuctionError> {
    let amount: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AuctionError::validation("Amount must be a whole number."))?;
    if amount < 0 {
        return Err(AuctionError::validation("Amount cannot be negative."));
    }
    Ok(amount)
}

// endregion: --- Validated Inputs

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_command(title: &str, starting_bid: &str, category: &str) -> CreateListingCommand {
        CreateListingCommand {
            title: title.to_string(),
            description: "A nice item".to_string(),
            starting_bid: starting_bid.to_string(),
            image_url: String::new(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("15").unwrap(), 15);
        assert_eq!(parse_amount(" 0 ").unwrap(), 0);
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("10.5").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_register_requires_matching_passwords() {
        let cmd = RegisterUserCommand {
            username: "tester".into(),
            email: "tester@example.com".into(),
            password: "password123".into(),
            confirmation: "password124".into(),
        };
        let err = cmd.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords must match.");
    }

    #[test]
    fn test_register_requires_username() {
        let cmd = RegisterUserCommand {
            username: "   ".into(),
            password: "pw".into(),
            confirmation: "pw".into(),
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(AuctionError::Validation(_))));
    }

    #[test]
    fn test_listing_defaults() {
        let listing = listing_command(" Test Item ", "10", "")
            .into_new_listing(3)
            .unwrap();

        assert_eq!(listing.title, "Test Item");
        assert_eq!(listing.starting_bid, 10);
        assert_eq!(listing.category, UNSPECIFIED_CATEGORY);
        assert_eq!(listing.image_url, None);
        assert_eq!(listing.owner_id, 3);
    }

    #[test]
    fn test_listing_rejects_bad_input() {
        assert!(listing_command("", "10", "Cars").into_new_listing(1).is_err());
        assert!(listing_command("Car", "-5", "Cars").into_new_listing(1).is_err());
        assert!(listing_command("Car", "cheap", "Cars").into_new_listing(1).is_err());
    }

    #[test]
    fn test_empty_comment_rejected() {
        let cmd = CommentCommand {
            comment: "  ".into(),
        };
        assert!(cmd.into_new_comment(1, 1).is_err());
    }
}
