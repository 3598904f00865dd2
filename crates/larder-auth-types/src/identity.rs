//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-larder-user-id";
pub const USER_ROLE_HEADER: &str = "x-larder-user-role";

/// Authenticated principal injected by the gateway via `x-larder-user-id` and
/// `x-larder-user-role`.
///
/// As a plain extractor it rejects anonymous requests with 401. As
/// `Option<IdentityHeaders>` both headers absent means anonymous (`None`),
/// while a present-but-malformed pair is still rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: u8,
}

enum Parsed {
    Anonymous,
    Identity(IdentityHeaders),
    Malformed,
}

fn parse(parts: &Parts) -> Parsed {
    let user_id = parts.headers.get(USER_ID_HEADER);
    let user_role = parts.headers.get(USER_ROLE_HEADER);
    if user_id.is_none() && user_role.is_none() {
        return Parsed::Anonymous;
    }
    let user_id = user_id
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<Uuid>().ok());
    let user_role = user_role
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u8>().ok());
    match (user_id, user_role) {
        (Some(user_id), Some(user_role)) => Parsed::Identity(IdentityHeaders { user_id, user_role }),
        _ => Parsed::Malformed,
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares `fn -> impl Future + Send`; parse synchronously and
    // return a 'static future so no borrow of `parts` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let parsed = parse(parts);
        async move {
            match parsed {
                Parsed::Identity(identity) => Ok(identity),
                Parsed::Anonymous | Parsed::Malformed => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let parsed = parse(parts);
        async move {
            match parsed {
                Parsed::Identity(identity) => Ok(Some(identity)),
                Parsed::Anonymous => Ok(None),
                Parsed::Malformed => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}
