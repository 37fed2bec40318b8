use crate::server::ServerError;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
};
use headers::{ContentType, HeaderMapExt};
use mime::Mime;
use serde::Deserialize;
use soho_common::model::comment::CommentContent;

/// The permitted `comment` parameters of a create request.
///
/// Accepts either an HTML form (`comment[username]=..&comment[body]=..`) or a
/// JSON object nested under `comment`. Any other parameter is discarded. Both
/// fields are required, and a form may carry each of them only once.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct CommentParams(pub CommentContent);

#[derive(Deserialize)]
struct CommentForm {
    #[serde(rename = "comment[username]")]
    username: String,
    #[serde(rename = "comment[body]")]
    body: String,
}

#[derive(Deserialize)]
struct CommentJson {
    comment: CommentContent,
}

impl<S> FromRequest<S> for CommentParams
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Some(content_type) = request.headers().typed_get::<ContentType>().map(Mime::from)
        else {
            return Err(ServerError::UnsupportedContentType(None));
        };

        let is_application = content_type.type_() == mime::APPLICATION;

        if is_application && content_type.subtype() == mime::WWW_FORM_URLENCODED {
            let Form(CommentForm { username, body }) = Form::from_request(request, state).await?;
            Ok(Self(CommentContent { username, body }))
        } else if is_application && content_type.subtype() == mime::JSON {
            let Json(CommentJson { comment }) = Json::from_request(request, state).await?;
            Ok(Self(comment))
        } else {
            Err(ServerError::UnsupportedContentType(Some(
                content_type.essence_str().to_owned(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{ServerError, params::CommentParams};
    use axum::{
        body::Body,
        extract::{FromRequest, Request},
        http::header::CONTENT_TYPE,
    };
    use soho_common::model::comment::CommentContent;

    fn request(content_type: &str, body: &str) -> Request {
        Request::post("/posts/1/comments")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn alice() -> CommentContent {
        CommentContent {
            username: "alice".to_owned(),
            body: "hi".to_owned(),
        }
    }

    #[tokio::test]
    async fn form_keeps_only_comment_fields() {
        let request = request(
            "application/x-www-form-urlencoded; charset=utf-8",
            "utf8=%E2%9C%93&comment%5Busername%5D=alice&comment%5Bbody%5D=hi&comment%5Bid%5D=5",
        );

        let CommentParams(comment) = CommentParams::from_request(request, &()).await.unwrap();
        assert_eq!(comment, alice());
    }

    #[tokio::test]
    async fn json_keeps_only_comment_fields() {
        let request = request(
            "application/json",
            r#"{"comment": {"username": "alice", "body": "hi", "id": 5}, "post_id": 2}"#,
        );

        let CommentParams(comment) = CommentParams::from_request(request, &()).await.unwrap();
        assert_eq!(comment, alice());
    }

    #[tokio::test]
    async fn form_missing_a_field() {
        let request = request(
            "application/x-www-form-urlencoded",
            "comment%5Busername%5D=alice",
        );

        let result = CommentParams::from_request(request, &()).await;
        assert!(matches!(result, Err(ServerError::FormRejection(_))));
    }

    #[tokio::test]
    async fn form_repeating_a_field() {
        let request = request(
            "application/x-www-form-urlencoded",
            "comment%5Busername%5D=alice&comment%5Busername%5D=bob&comment%5Bbody%5D=hi",
        );

        let result = CommentParams::from_request(request, &()).await;
        assert!(matches!(result, Err(ServerError::FormRejection(_))));
    }

    #[tokio::test]
    async fn missing_content_type() {
        let request = Request::post("/posts/1/comments")
            .body(Body::from("comment[username]=alice"))
            .unwrap();

        let result = CommentParams::from_request(request, &()).await;
        assert!(matches!(result, Err(ServerError::UnsupportedContentType(None))));
    }
}
