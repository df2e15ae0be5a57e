use url::form_urlencoded;

const NYAA_RSS_BASE: &str = "https://nyaa.si/?page=rss";

/// Prepended to every title: drops batch releases, pins the release group.
const QUERY_PREFIX: &str = "-batch ember";

/// All categories.
const CATEGORY: &str = "0_0";

/// No filter (remakes and untrusted uploads included).
const FILTER: &str = "0";

fn encode_query(query: &str) -> String {
    form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

/// Builds the Nyaa search feed URL for a title.
///
/// The title is form-encoded (spaces become `+`), so the result never
/// contains raw whitespace and depends on nothing but `title`.
#[must_use]
pub fn format_feed_url(title: &str) -> String {
    let query = encode_query(&format!("{QUERY_PREFIX} {title}"));
    format!("{NYAA_RSS_BASE}&q={query}&c={CATEGORY}&f={FILTER}")
}
