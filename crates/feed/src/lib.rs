mod channel;
mod error;
mod filter;
mod item;

pub use channel::{assemble, CHANNEL_LINK, CHANNEL_TITLE};
pub use error::FeedError;
pub use filter::VesselFilter;
pub use item::{guid_for, render, FeedItem};

pub type Result<T> = std::result::Result<T, FeedError>;
