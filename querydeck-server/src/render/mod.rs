//! Response rendering: JSON arrays or server-rendered HTML documents.

pub mod html;
pub mod value;
pub mod views;
pub mod vitals;

use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub use html::{escape, HtmlView, Markup};
pub use vitals::{vital_status, VitalKind, VitalStatus};

use crate::query::QueryResult;

/// How a route's rows become a response body.
#[derive(Clone)]
pub enum Renderer {
    /// Array of row objects, columns in select-list order.
    Json,
    /// Full HTML document from a view.
    Html(Arc<dyn HtmlView>),
}

impl Renderer {
    pub fn html(view: impl HtmlView) -> Self {
        Self::Html(Arc::new(view))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html(_) => "html",
        }
    }

    /// Successful response for `result`. Zero rows is `[]` or the view's
    /// empty state, never an error.
    pub fn render(&self, result: &QueryResult) -> Response {
        match self {
            Self::Json => Json(&result.rows).into_response(),
            Self::Html(view) => Html(html::document(view.as_ref(), &result.rows)).into_response(),
        }
    }

    /// Error response in this renderer's shape.
    pub fn render_error(&self, status: StatusCode, message: &str) -> Response {
        match self {
            Self::Json => (status, Json(json!({ "error": message }))).into_response(),
            Self::Html(view) => (
                status,
                Html(html::error_fragment(view.error_heading(), message)),
            )
                .into_response(),
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("Json"),
            Self::Html(view) => f.debug_tuple("Html").field(&view.title()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;
    use serde_json::Value;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn rows(values: Vec<Value>) -> QueryResult {
        QueryResult::new(
            values
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn empty_json_is_an_empty_array() {
        let response = Renderer::Json.render(&QueryResult::default());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn json_keeps_column_order_and_names() {
        let result = rows(vec![
            json!({"SSN": "333445555", "Fname": "Franklin", "Lname": "Wong"}),
            json!({"SSN": "123456789", "Fname": "John", "Lname": "Smith"}),
        ]);
        let response = Renderer::Json.render(&result);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            body_text(response).await,
            r#"[{"SSN":"333445555","Fname":"Franklin","Lname":"Wong"},{"SSN":"123456789","Fname":"John","Lname":"Smith"}]"#
        );
    }

    #[tokio::test]
    async fn html_renders_a_document() {
        let renderer = Renderer::html(views::DispatchSummary);
        let response = renderer.render(&QueryResult::default());
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let body = body_text(response).await;
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("empty-state"));
    }

    #[tokio::test]
    async fn errors_follow_the_renderer_shape() {
        let response = Renderer::Json.render_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch active alert data.",
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            r#"{"error":"Failed to fetch active alert data."}"#
        );

        let response = Renderer::html(views::AuthorizationSummary)
            .render_error(StatusCode::BAD_REQUEST, "SSN is required");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.contains("alert alert-danger"));
        assert!(body.contains("SSN is required"));
    }
}
