//! Wire formats for the guide endpoint

use serde::{Deserialize, Serialize};
use tourguide_core::models::UserPreferences;

/// Response body of `POST /chat`. Exactly one field is expected to be set.
#[derive(Debug, Deserialize)]
pub struct ChatResponseBody {
    pub response: Option<String>,
    pub error: Option<String>,
}

/// Request body of `POST /set_preferences`
#[derive(Debug, Serialize)]
pub struct PreferencesRequest<'a> {
    pub user_id: &'a str,
    #[serde(flatten)]
    pub preferences: &'a UserPreferences,
}
