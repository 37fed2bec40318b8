use crate::server::{ServerError, ServerState};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    middleware::{FromExtractorLayer, from_extractor_with_state},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Basic};
use soho_common::model::auth::AdminCredentials;
use std::sync::Arc;
use tracing::warn;

type AuthorizationHeader = TypedHeader<Authorization<Basic>>;

/// Proof that the request carried the admin's Basic credentials.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct AdminAuthorized;

impl<S> FromRequestParts<S> for AdminAuthorized
where
    Arc<AdminCredentials>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = AuthorizationHeader::from_request_parts(parts, state)
            .await
            .map_err(ServerError::InvalidAuthorizationHeader)?;

        if Arc::<AdminCredentials>::from_ref(state).verify(header.username(), header.password()) {
            Ok(Self)
        } else {
            warn!(username = header.username(), "Rejected admin credentials");
            Err(ServerError::InvalidCredentials)
        }
    }
}

/// Route layer that turns away requests without the admin credentials before
/// the handler runs.
pub fn require_admin(state: &ServerState) -> FromExtractorLayer<AdminAuthorized, ServerState> {
    from_extractor_with_state(state.clone())
}
