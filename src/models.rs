//! Database models

use serde::{Deserialize, Serialize};

/// A user profile on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub guid: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    /// RFC 3339 UTC
    pub created_at: String,
    /// RFC 3339 UTC
    pub updated_at: String,
}

/// A message posted to the board by a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub guid: String,
    pub profile_guid: String,
    pub body: String,
    /// RFC 3339 UTC
    pub created_at: String,
}

/// One entry of the board feed: a post joined with its author's name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardEntry {
    pub post_guid: String,
    pub profile_guid: String,
    pub display_name: String,
    pub body: String,
    pub created_at: String,
}
