use crate::server::{
    Result, ServerError, ServerRouter, ServerState, auth::require_admin, params::CommentParams,
    routes::posts::GetPostPath,
};
use axum::{extract::State, response::Redirect};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use soho_common::model::{Id, comment::CommentMarker, post::PostMarker};
use soho_db::store::Store;
use std::sync::Arc;
use tracing::info;

pub fn routes(state: &ServerState) -> ServerRouter {
    let destroy = ServerRouter::new()
        .typed_delete(destroy_comment)
        .route_layer(require_admin(state));

    ServerRouter::new()
        .typed_post(create_comment)
        .merge(destroy)
}

fn redirect_to_post(id: Id<PostMarker>) -> Redirect {
    Redirect::to(&GetPostPath { id }.to_string())
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{post_id}/comments", rejection(ServerError))]
struct CreateCommentPath {
    post_id: Id<PostMarker>,
}

async fn create_comment(
    CreateCommentPath { post_id }: CreateCommentPath,
    State(store): State<Arc<dyn Store>>,
    CommentParams(comment): CommentParams,
) -> Result<Redirect> {
    let post = store
        .fetch_partial_post(post_id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(post_id))?;

    let comment = store.create_comment(post.id, &comment).await?;
    info!(post_id = %post.id, comment_id = %comment.id, "Created comment");

    Ok(redirect_to_post(post.id))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{post_id}/comments/{id}", rejection(ServerError))]
struct DestroyCommentPath {
    post_id: Id<PostMarker>,
    id: Id<CommentMarker>,
}

async fn destroy_comment(
    DestroyCommentPath { post_id, id }: DestroyCommentPath,
    State(store): State<Arc<dyn Store>>,
) -> Result<Redirect> {
    let post = store
        .fetch_partial_post(post_id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(post_id))?;

    let comment = store
        .fetch_comment(post.id, id)
        .await?
        .ok_or(ServerError::CommentByIdNotFound(id))?;

    // Someone else may have removed it since the lookup.
    store
        .delete_comment(post.id, comment.id)
        .await?
        .ok_or(ServerError::CommentByIdNotFound(comment.id))?;
    info!(post_id = %post.id, comment_id = %comment.id, "Destroyed comment");

    Ok(redirect_to_post(post.id))
}
