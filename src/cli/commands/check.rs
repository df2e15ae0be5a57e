use crate::state::SharedState;

pub async fn cmd_check(state: &SharedState, url: &str) {
    println!("Validating RSS feed: {url}");

    if state.feeds.validate_feed(url).await {
        println!("✓ RSS feed is valid");
    } else {
        println!("✗ RSS feed is invalid or inaccessible");
    }
}
