//! Normalization of raw scraping-provider payloads.
//!
//! Provider items are duck-typed JSON with provider-specific field
//! names; different actor versions spell the same field differently.
//! Every field of [`ProfileRecord`] is a pure function of the raw
//! payload with an explicit default, so partial payloads never
//! propagate un-normalized.

use serde_json::Value;

use crate::model::{ProfileRecord, RecentPost};
use crate::proxy::proxy_image_url;

/// Maximum number of recent posts carried into a ProfileRecord.
pub const MAX_RECENT_POSTS: usize = 5;

/// Build a ProfileRecord from one raw provider item.
///
/// `fallback_username` is the username the lookup ran for, used when
/// the payload omits its own.
pub fn normalize_profile(raw: &Value, fallback_username: &str) -> ProfileRecord {
    let username = {
        let u = str_field(raw, &["username", "userName", "ownerUsername"]);
        if u.is_empty() { fallback_username.to_string() } else { u }
    };

    let posts = raw
        .get("latestPosts")
        .or_else(|| raw.get("recentPosts"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(MAX_RECENT_POSTS)
                .map(normalize_post)
                .collect()
        })
        .unwrap_or_default();

    ProfileRecord {
        username,
        full_name: str_field(raw, &["fullName", "full_name", "name"]),
        biography: str_field(raw, &["biography", "bio"]),
        profile_pic_url: proxy_image_url(&str_field(
            raw,
            &["profilePicUrl", "profilePicUrlHD", "profile_pic_url"],
        )),
        posts_count: num_field(raw, &["postsCount", "posts_count", "mediaCount"]),
        followers_count: num_field(raw, &["followersCount", "followers_count", "followers"]),
        follows_count: num_field(
            raw,
            &["followsCount", "followingCount", "follows_count", "following"],
        ),
        is_private: bool_field(raw, &["private", "isPrivate", "is_private"]),
        is_verified: bool_field(raw, &["verified", "isVerified", "is_verified"]),
        recent_posts: posts,
    }
}

fn normalize_post(raw: &Value) -> RecentPost {
    RecentPost {
        caption: str_field(raw, &["caption", "text"]),
        likes_count: num_field(raw, &["likesCount", "likes_count", "likes"]),
        comments_count: num_field(raw, &["commentsCount", "comments_count", "comments"]),
        image_url: proxy_image_url(&str_field(raw, &["displayUrl", "imageUrl", "image_url"])),
    }
}

// Field extraction: first alias that is present and of the right type
// wins; anything else falls back to the default.

fn str_field(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

fn num_field(raw: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_u64))
        .unwrap_or(0)
}

fn bool_field(raw: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_bool))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_get_defaults() {
        let p = normalize_profile(&json!({"username": "foo"}), "foo");
        assert_eq!(p.username, "foo");
        assert_eq!(p.full_name, "");
        assert_eq!(p.biography, "");
        assert_eq!(p.profile_pic_url, "");
        assert_eq!(p.posts_count, 0);
        assert_eq!(p.followers_count, 0);
        assert_eq!(p.follows_count, 0);
        assert!(!p.is_private);
        assert!(!p.is_verified);
        assert!(p.recent_posts.is_empty());
    }

    #[test]
    fn alias_field_names() {
        let p = normalize_profile(
            &json!({
                "userName": "foo",
                "full_name": "Foo Bar",
                "followers": 42,
                "followingCount": 7,
                "private": true,
                "verified": true,
            }),
            "ignored",
        );
        assert_eq!(p.username, "foo");
        assert_eq!(p.full_name, "Foo Bar");
        assert_eq!(p.followers_count, 42);
        assert_eq!(p.follows_count, 7);
        assert!(p.is_private);
        assert!(p.is_verified);
    }

    #[test]
    fn negative_or_wrongly_typed_counts_default_to_zero() {
        let p = normalize_profile(
            &json!({"username": "foo", "followersCount": -5, "postsCount": "12"}),
            "foo",
        );
        assert_eq!(p.followers_count, 0);
        assert_eq!(p.posts_count, 0);
    }

    #[test]
    fn posts_truncated_to_five() {
        let posts: Vec<_> = (0..7)
            .map(|i| json!({"caption": format!("post {}", i), "likesCount": i}))
            .collect();
        let p = normalize_profile(&json!({"username": "foo", "latestPosts": posts}), "foo");
        assert_eq!(p.recent_posts.len(), 5);
        // Provider order (most-recent-first) preserved.
        assert_eq!(p.recent_posts[0].caption, "post 0");
        assert_eq!(p.recent_posts[4].caption, "post 4");
    }

    #[test]
    fn non_http_image_urls_normalize_to_empty() {
        let p = normalize_profile(
            &json!({
                "username": "foo",
                "profilePicUrl": "ftp://cdn.example/x.jpg",
                "latestPosts": [{"displayUrl": "data:image/png;base64,AA"}],
            }),
            "foo",
        );
        assert_eq!(p.profile_pic_url, "");
        assert_eq!(p.recent_posts[0].image_url, "");
    }

    #[test]
    fn end_to_end_vector() {
        // Normalization of a representative provider payload: counts kept,
        // posts truncated, image URL rewritten through the proxy.
        let posts: Vec<_> = (0..7).map(|i| json!({"caption": format!("p{}", i)})).collect();
        let p = normalize_profile(
            &json!({
                "username": "foo",
                "followersCount": 100,
                "latestPosts": posts,
                "profilePicUrl": "https://cdn.example/x.jpg",
            }),
            "foo",
        );
        assert_eq!(p.followers_count, 100);
        assert_eq!(p.recent_posts.len(), 5);
        assert_eq!(
            p.profile_pic_url,
            "/api/image-proxy?url=https%3A%2F%2Fcdn.example%2Fx.jpg"
        );
    }
}
