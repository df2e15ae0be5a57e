pub mod feeds;
pub mod seasonal;

pub use feeds::FeedValidator;
pub use seasonal::SeasonalService;
