/// 사용자 생성 (중복 사용자명은 무시)
pub const INSERT_USER: &str = r#"
    INSERT INTO users (username, email, password_hash)
    VALUES ($1, $2, $3)
    ON CONFLICT (username) DO NOTHING
    RETURNING id, username, email, password_hash, created_at
"#;

/// 사용자 조회
pub const GET_USER: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1";

/// 사용자명으로 사용자 조회
pub const GET_USER_BY_USERNAME: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1";

/// 상품 생성
pub const INSERT_LISTING: &str = r#"
    INSERT INTO listings (title, description, starting_bid, image_url, category, owner_id)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id
"#;

/// 상품 조회 공통 부분 (현재 가격은 입찰 기록에서 계산)
macro_rules! select_listings {
    ($tail:literal) => {
        concat!(
            "SELECT l.id, l.title, l.description, l.starting_bid, l.image_url, l.category, ",
            "l.owner_id, l.active, l.created_at, ",
            "GREATEST(l.starting_bid, COALESCE(MAX(b.amount), l.starting_bid)) AS current_price ",
            "FROM listings l LEFT JOIN bids b ON b.listing_id = l.id ",
            $tail
        )
    };
}

/// 상품 조회
pub const GET_LISTING: &str = select_listings!("WHERE l.id = $1 GROUP BY l.id");

/// 진행 중인 상품 조회
pub const GET_ACTIVE_LISTINGS: &str =
    select_listings!("WHERE l.active GROUP BY l.id ORDER BY l.created_at DESC, l.id DESC");

/// 카테고리별 진행 중인 상품 조회
pub const GET_ACTIVE_LISTINGS_BY_CATEGORY: &str = select_listings!(
    "WHERE l.active AND l.category = $1 GROUP BY l.id ORDER BY l.created_at DESC, l.id DESC"
);

/// 관심 목록 상품 조회
pub const GET_WATCHLIST: &str = select_listings!(
    "JOIN watchlist w ON w.listing_id = l.id WHERE w.user_id = $1 GROUP BY l.id ORDER BY l.created_at DESC, l.id DESC"
);

/// 진행 중인 상품의 카테고리 목록
pub const GET_ACTIVE_CATEGORIES: &str =
    "SELECT DISTINCT category FROM listings WHERE active ORDER BY category";

/// 상품 행 잠금 (입찰/종료 직렬화)
pub const LOCK_LISTING: &str = "SELECT id FROM listings WHERE id = $1 FOR UPDATE";

/// 최고 입찰가 조회
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(amount) AS highest_bid FROM bids WHERE listing_id = $1";

/// 입찰 생성
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (listing_id, bidder_id, amount)
    VALUES ($1, $2, $3)
    RETURNING id, listing_id, bidder_id, amount, created_at
"#;

/// 입찰 이력 조회
pub const GET_BIDS: &str = r#"
    SELECT id, listing_id, bidder_id, amount, created_at
    FROM bids
    WHERE listing_id = $1
    ORDER BY id ASC
"#;

/// 경매 종료
pub const CLOSE_LISTING: &str = "UPDATE listings SET active = FALSE WHERE id = $1";

/// 댓글 생성
pub const INSERT_COMMENT: &str = r#"
    WITH inserted AS (
        INSERT INTO comments (listing_id, author_id, body)
        VALUES ($1, $2, $3)
        RETURNING id, listing_id, author_id, body, created_at
    )
    SELECT i.id, i.listing_id, i.author_id, u.username AS author, i.body, i.created_at
    FROM inserted i JOIN users u ON u.id = i.author_id
"#;

/// 댓글 조회
pub const GET_COMMENTS: &str = r#"
    SELECT c.id, c.listing_id, c.author_id, u.username AS author, c.body, c.created_at
    FROM comments c JOIN users u ON u.id = c.author_id
    WHERE c.listing_id = $1
    ORDER BY c.id ASC
"#;

/// 상품 존재 여부
pub const LISTING_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM listings WHERE id = $1)";

/// 관심 목록 추가
pub const ADD_WATCH: &str = r#"
    INSERT INTO watchlist (user_id, listing_id)
    VALUES ($1, $2)
    ON CONFLICT (user_id, listing_id) DO NOTHING
"#;

/// 관심 목록 제거
pub const REMOVE_WATCH: &str = "DELETE FROM watchlist WHERE user_id = $1 AND listing_id = $2";

/// 관심 목록 포함 여부
pub const IS_WATCHED: &str =
    "SELECT EXISTS (SELECT 1 FROM watchlist WHERE user_id = $1 AND listing_id = $2)";
