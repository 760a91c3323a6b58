use serde::{Deserialize, Serialize};

/// One of the profile's latest posts, most-recent-first as delivered
/// by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPost {
    #[serde(default)]
    pub caption: String,

    #[serde(default)]
    pub likes_count: u64,

    #[serde(default)]
    pub comments_count: u64,

    /// Proxied image reference, or empty. Never a raw third-party URL.
    #[serde(default)]
    pub image_url: String,
}

/// ProfileRecord — the canonical, provider-agnostic account summary.
///
/// Produced by normalization (see `normalize`), consumed by the roast
/// generator and the UI. Every optional provider field has an explicit
/// default here; absence of a field upstream is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub username: String,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub biography: String,

    /// Proxied image reference, or empty. Never a raw third-party URL.
    #[serde(default)]
    pub profile_pic_url: String,

    #[serde(default)]
    pub posts_count: u64,

    #[serde(default)]
    pub followers_count: u64,

    #[serde(default)]
    pub follows_count: u64,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub is_verified: bool,

    /// At most 5 entries.
    #[serde(default)]
    pub recent_posts: Vec<RecentPost>,
}

impl ProfileRecord {
    /// A record with all-zero counters and no name/bio/picture carries
    /// no usable data. Such records are treated as "profile not found"
    /// and never reach the generator.
    pub fn is_empty_profile(&self) -> bool {
        self.posts_count == 0
            && self.followers_count == 0
            && self.follows_count == 0
            && self.full_name.is_empty()
            && self.biography.is_empty()
            && self.profile_pic_url.is_empty()
    }
}

/// One logged interaction, appended to the external dataset sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub username: String,

    pub roast: String,

    /// RFC 3339 instant captured when logging is attempted.
    #[serde(default)]
    pub timestamp: String,
}

// ── Boundary request/response shapes ────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastRequest {
    pub profile_data: ProfileRecord,
}

#[derive(Debug, Serialize)]
pub struct RoastResponse {
    pub roast: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_json_roundtrip() {
        let p = ProfileRecord {
            username: "foo".into(),
            full_name: "Foo Bar".into(),
            biography: "bio".into(),
            profile_pic_url: "/api/image-proxy?url=https%3A%2F%2Fx".into(),
            posts_count: 3,
            followers_count: 100,
            follows_count: 50,
            is_private: false,
            is_verified: true,
            recent_posts: vec![RecentPost {
                caption: "hi".into(),
                likes_count: 10,
                comments_count: 2,
                image_url: String::new(),
            }],
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"followersCount\":100"));
        let back: ProfileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn missing_optional_fields_default() {
        let p: ProfileRecord = serde_json::from_str(r#"{"username":"foo"}"#).unwrap();
        assert_eq!(p.posts_count, 0);
        assert_eq!(p.followers_count, 0);
        assert!(!p.is_private);
        assert!(!p.is_verified);
        assert!(p.recent_posts.is_empty());
    }

    #[test]
    fn empty_profile_invariant() {
        let empty: ProfileRecord = serde_json::from_str(r#"{"username":"foo"}"#).unwrap();
        assert!(empty.is_empty_profile());

        let mut with_bio = empty.clone();
        with_bio.biography = "hello".into();
        assert!(!with_bio.is_empty_profile());

        let mut with_followers = empty;
        with_followers.followers_count = 1;
        assert!(!with_followers.is_empty_profile());
    }
}
