//! 입찰 및 경매 종료 규칙.
//!
//! 저장소 구현체는 상품 단위로 직렬화된 상태에서 이 함수들을 호출한다.

use super::model::Listing;
use crate::error::{AuctionError, RuleViolation};

/// 현재 가격: 최고 입찰가, 입찰이 없으면 시작가
pub fn current_price(starting_bid: i64, highest_bid: Option<i64>) -> i64 {
    highest_bid.map_or(starting_bid, |highest| highest.max(starting_bid))
}

/// 입찰 가능 여부 검증
pub fn check_bid(
    listing: &Listing,
    highest_bid: Option<i64>,
    bidder_id: i64,
    amount: i64,
) -> Result<(), RuleViolation> {
    if !listing.active {
        return Err(RuleViolation::ListingClosed);
    }
    if listing.owner_id == bidder_id {
        return Err(RuleViolation::OwnListing);
    }

    let minimum = current_price(listing.starting_bid, highest_bid);
    if amount <= minimum {
        return Err(RuleViolation::BidTooLow { amount, minimum });
    }
    Ok(())
}

/// 경매 종료 권한 검증
///
/// 이미 종료된 경매는 `Ok(false)`를 반환한다.
pub fn check_close(listing: &Listing, requester_id: i64) -> Result<bool, AuctionError> {
    if listing.owner_id != requester_id {
        return Err(AuctionError::Forbidden(
            "Only the seller can close this auction.".to_string(),
        ));
    }
    Ok(listing.active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const OWNER: i64 = 1;
    const BIDDER: i64 = 2;

    fn listing(starting_bid: i64, active: bool) -> Listing {
        Listing {
            id: 1,
            title: "Widget".into(),
            description: "Useful".into(),
            starting_bid,
            image_url: None,
            category: "Unspecified".into(),
            owner_id: OWNER,
            active,
            created_at: Utc::now(),
            current_price: starting_bid,
        }
    }

    #[test]
    fn test_current_price() {
        assert_eq!(current_price(10, None), 10);
        assert_eq!(current_price(10, Some(15)), 15);
        assert_eq!(current_price(10, Some(3)), 10);
    }

    #[test]
    fn test_bid_must_exceed_starting_bid() {
        let listing = listing(10, true);

        assert_eq!(
            check_bid(&listing, None, BIDDER, 10),
            Err(RuleViolation::BidTooLow {
                amount: 10,
                minimum: 10
            })
        );
        assert!(check_bid(&listing, None, BIDDER, 11).is_ok());
    }

    #[test]
    fn test_bid_must_exceed_highest_bid() {
        let listing = listing(10, true);

        assert!(check_bid(&listing, Some(15), BIDDER, 15).is_err());
        assert!(check_bid(&listing, Some(15), BIDDER, 5).is_err());
        assert!(check_bid(&listing, Some(15), BIDDER, 16).is_ok());
    }

    #[test]
    fn test_owner_can_never_bid() {
        let listing = listing(10, true);

        for amount in [0, 11, 1_000_000] {
            assert_eq!(
                check_bid(&listing, None, OWNER, amount),
                Err(RuleViolation::OwnListing)
            );
        }
    }

    #[test]
    fn test_closed_listing_rejects_bids() {
        let listing = listing(10, false);
        assert_eq!(
            check_bid(&listing, None, BIDDER, 100),
            Err(RuleViolation::ListingClosed)
        );
    }

    #[test]
    fn test_close_permissions() {
        assert!(check_close(&listing(10, true), OWNER).unwrap());
        assert!(!check_close(&listing(10, false), OWNER).unwrap());
        assert!(matches!(
            check_close(&listing(10, true), BIDDER),
            Err(AuctionError::Forbidden(_))
        ));
    }
}
