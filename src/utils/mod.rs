pub mod text;

pub use text::{rank_medal, rank_text};
