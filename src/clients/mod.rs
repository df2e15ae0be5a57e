pub mod http;
pub mod jikan;
pub mod nyaa;
pub mod rate_limit;

pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use jikan::JikanClient;
pub use nyaa::format_feed_url;
pub use rate_limit::RateLimiter;
