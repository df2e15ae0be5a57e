use crate::clients::nyaa::format_feed_url;

pub fn cmd_feed_url(title: &str) {
    println!("{}", format_feed_url(title));
}
