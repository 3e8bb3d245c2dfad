pub mod password;
pub mod session;

pub use session::{AuthUser, MaybeUser, SessionUserId};
