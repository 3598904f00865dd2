//! Mock identity helpers for router tests.
//!
//! The gateway injects `x-larder-user-id` + `x-larder-user-role`; tests set
//! the same headers directly so no identity provider is needed.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use larder_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};

/// Identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    /// Regular member with a fresh id.
    pub fn member() -> Self {
        Self::new(Uuid::now_v7(), 0)
    }

    /// Header pairs as the gateway would inject them.
    pub fn headers(&self) -> [(HeaderName, HeaderValue); 2] {
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string())
                    .expect("uuid is a valid header value"),
            ),
            (
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from_str(&self.user_role.to_string())
                    .expect("role is a valid header value"),
            ),
        ]
    }
}
