use crate::server::{Result, ServerError, ServerRouter};
use axum::{Json, extract::State};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use soho_common::model::{
    Id,
    post::{Post, PostMarker},
};
use soho_db::store::Store;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(get_post)
}

/// The detail view of a post, and the target of every comment redirect.
#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
pub(super) struct GetPostPath {
    pub id: Id<PostMarker>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Post>> {
    let post = store
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}
