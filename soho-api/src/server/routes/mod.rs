use crate::server::{ServerRouter, ServerState};

mod comments;
mod posts;

pub fn routes(state: &ServerState) -> ServerRouter {
    ServerRouter::new()
        .merge(posts::routes())
        .merge(comments::routes(state))
}
