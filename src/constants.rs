/// Series with fewer upstream members than this are never emitted.
pub const MIN_MEMBERS: u64 = 10_000;

pub mod text {

    /// Upper bound for a synopsis, ellipsis included.
    pub const SYNOPSIS_MAX_CHARS: usize = 300;

    pub const ELLIPSIS: &str = "...";

    pub const UNKNOWN_DATE: &str = "Unknown";

    pub const NO_SYNOPSIS: &str = "No synopsis";

    pub const AIR_DATE_FORMAT: &str = "%b %d, %Y";
}

pub mod intervals {
    use std::time::Duration;

    /// Minimum spacing between two requests to the Jikan API.
    pub const JIKAN_MIN_INTERVAL: Duration = Duration::from_millis(400);

    pub const FEED_CHECK_TIMEOUT: Duration = Duration::from_secs(5);
}

pub mod limits {

    pub const MIN_YEAR: i32 = 1950;

    pub const MAX_YEAR: i32 = 2050;
}
