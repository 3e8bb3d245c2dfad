//! `PgAuctionStore` 테스트. `DATABASE_URL` 이 설정된 경우에만 실행된다.
use auction_webapp::auction::commands::{CreateListingCommand, RegisterUserCommand};
use auction_webapp::auction::model::{Listing, User, WatchAction};
use auction_webapp::auction::AuctionService;
use auction_webapp::config::Config;
use auction_webapp::database::DatabaseManager;
use auction_webapp::error::{AuctionError, RuleViolation};
use auction_webapp::store::PgAuctionStore;
use std::sync::Arc;
use tokio::sync::OnceCell;

static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// 트레이싱 초기화
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Postgres 저장소 서비스. DATABASE_URL 이 없으면 None
async fn pg_service() -> Option<Arc<AuctionService>> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL 미설정: Postgres 테스트 건너뜀");
            return None;
        }
    };
    init_tracing();

    let config = Config {
        database_max_connections: 10,
        ..Config::default()
    };
    let db_manager = Arc::new(
        DatabaseManager::new(&database_url, &config)
            .await
            .expect("데이터베이스 연결 실패"),
    );

    // 스키마는 테스트 실행마다 한 번만 생성
    SCHEMA
        .get_or_init(|| async {
            db_manager
                .initialize_database(false)
                .await
                .expect("스키마 생성 실패");
        })
        .await;

    Some(Arc::new(AuctionService::new(Arc::new(PgAuctionStore::new(
        db_manager,
    )))))
}

/// 실행마다 겹치지 않는 사용자 이름
fn unique(name: &str) -> String {
    format!("{}-{:08x}", name, rand::random::<u32>())
}

async fn register(service: &AuctionService, username: &str) -> User {
    service
        .register_user(RegisterUserCommand {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "secret".to_string(),
            confirmation: "secret".to_string(),
        })
        .await
        .unwrap()
}

async fn listing(
    service: &AuctionService,
    owner: &User,
    starting_bid: i64,
    category: &str,
) -> Listing {
    service
        .create_listing(
            owner.id,
            CreateListingCommand {
                title: "Widget".to_string(),
                description: "pg test".to_string(),
                starting_bid: starting_bid.to_string(),
                image_url: String::new(),
                category: category.to_string(),
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_pg_duplicate_username_rejected() {
    let Some(service) = pg_service().await else {
        return;
    };
    let username = unique("dup");
    register(&service, &username).await;

    let result = service
        .register_user(RegisterUserCommand {
            username: username.clone(),
            password: "x".into(),
            confirmation: "x".into(),
            ..Default::default()
        })
        .await;
    assert_eq!(result.unwrap_err().to_string(), "Username already taken.");
}

#[tokio::test]
async fn test_pg_bid_sequence_derives_current_price() {
    let Some(service) = pg_service().await else {
        return;
    };
    let seller = register(&service, &unique("seller")).await;
    let bidder = register(&service, &unique("bidder")).await;
    let item = listing(&service, &seller, 10, "").await;
    assert_eq!(item.current_price, 10);

    let low = service.place_bid(item.id, bidder.id, "10").await;
    assert!(matches!(
        low,
        Err(AuctionError::BusinessRule(RuleViolation::BidTooLow {
            amount: 10,
            minimum: 10
        }))
    ));

    service.place_bid(item.id, bidder.id, "15").await.unwrap();
    let own = service.place_bid(item.id, seller.id, "50").await;
    assert!(matches!(
        own,
        Err(AuctionError::BusinessRule(RuleViolation::OwnListing))
    ));

    let details = service.listing_details(item.id, None).await.unwrap();
    assert_eq!(details.listing.current_price, 15);
    assert_eq!(details.bid_count, 1);
    assert_eq!(details.highest_bidder.as_deref(), Some(bidder.username.as_str()));
}

#[tokio::test]
async fn test_pg_bid_on_missing_listing() {
    let Some(service) = pg_service().await else {
        return;
    };
    let bidder = register(&service, &unique("bidder")).await;

    let result = service.place_bid(i64::MAX, bidder.id, "100").await;
    assert!(matches!(result, Err(AuctionError::NotFound { .. })));
}

#[tokio::test]
async fn test_pg_concurrent_bids_are_serialized() {
    let Some(service) = pg_service().await else {
        return;
    };
    let seller = register(&service, &unique("seller")).await;
    let item = listing(&service, &seller, 10, "").await;

    let mut bidders = Vec::new();
    for i in 0..4 {
        bidders.push(register(&service, &unique(&format!("bidder{}", i))).await);
    }

    let listing_id = item.id;
    let mut handles = Vec::new();
    for (i, bidder) in bidders.iter().enumerate() {
        for step in 1..=5 {
            let service = Arc::clone(&service);
            let bidder_id = bidder.id;
            let amount = 10 + (i as i64 * 5 + step) * 3;
            handles.push(tokio::spawn(async move {
                service
                    .place_bid(listing_id, bidder_id, &amount.to_string())
                    .await
                    .map(|bid| bid.amount)
            }));
        }
    }

    let mut accepted = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(amount) => accepted.push(amount),
            Err(err) => assert!(
                matches!(err, AuctionError::BusinessRule(RuleViolation::BidTooLow { .. })),
                "unexpected error: {}",
                err
            ),
        }
    }
    assert!(!accepted.is_empty());

    let details = service.listing_details(listing_id, None).await.unwrap();
    assert_eq!(details.bid_count, accepted.len());
    assert_eq!(
        details.listing.current_price,
        accepted.iter().copied().max().unwrap()
    );
}

#[tokio::test]
async fn test_pg_watchlist_toggle_and_unknown_listing() {
    let Some(service) = pg_service().await else {
        return;
    };
    let owner = register(&service, &unique("owner")).await;
    let watcher = register(&service, &unique("watcher")).await;
    let item = listing(&service, &owner, 10, "").await;

    for _ in 0..2 {
        service
            .toggle_watchlist(watcher.id, item.id, WatchAction::Add)
            .await
            .unwrap();
    }
    let watched = service.watchlist(watcher.id).await.unwrap();
    assert_eq!(watched.len(), 1);
    assert_eq!(watched[0].id, item.id);

    service
        .toggle_watchlist(watcher.id, item.id, WatchAction::Remove)
        .await
        .unwrap();
    assert!(service.watchlist(watcher.id).await.unwrap().is_empty());

    for action in [WatchAction::Add, WatchAction::Remove] {
        let result = service.toggle_watchlist(watcher.id, i64::MAX, action).await;
        assert!(matches!(result, Err(AuctionError::NotFound { .. })));
    }
}

#[tokio::test]
async fn test_pg_close_is_owner_only_and_one_way() {
    let Some(service) = pg_service().await else {
        return;
    };
    let seller = register(&service, &unique("seller")).await;
    let bidder = register(&service, &unique("bidder")).await;
    let category = unique("Cars");
    let item = listing(&service, &seller, 10, &category).await;
    service.place_bid(item.id, bidder.id, "12").await.unwrap();
    assert_eq!(service.list_by_category(&category).await.unwrap().len(), 1);

    let forbidden = service.close_auction(item.id, bidder.id).await;
    assert!(matches!(forbidden, Err(AuctionError::Forbidden(_))));

    assert!(!service.close_auction(item.id, seller.id).await.unwrap().active);
    assert!(!service.close_auction(item.id, seller.id).await.unwrap().active);

    let late_bid = service.place_bid(item.id, bidder.id, "100").await;
    assert!(matches!(
        late_bid,
        Err(AuctionError::BusinessRule(RuleViolation::ListingClosed))
    ));
    assert!(service.list_by_category(&category).await.unwrap().is_empty());

    let details = service.listing_details(item.id, None).await.unwrap();
    assert_eq!(details.winner.as_deref(), Some(bidder.username.as_str()));
}
