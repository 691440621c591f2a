pub mod competition;
pub mod error;
pub mod leaderboard;
pub mod user;

pub use competition::*;
pub use error::*;
pub use leaderboard::*;
pub use user::*;
