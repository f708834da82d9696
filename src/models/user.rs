//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Identity provider user ID (also used as document ID)
    pub auth_user_id: String,
    /// Display name
    pub username: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// When the profile was first stored
    pub created_at: String,
    /// Last profile update
    pub updated_at: String,
}
