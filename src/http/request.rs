//! Request identity.
//!
//! Every request carries an `x-request-id`, generated here when the
//! client did not send one, and echoed on the response so log lines and
//! client reports can be correlated.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = match request.headers().get(REQUEST_ID_HEADER) {
        Some(existing) => existing.clone(),
        None => {
            let generated = Uuid::new_v4().to_string();
            match HeaderValue::from_str(&generated) {
                Ok(value) => {
                    request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
                    value
                }
                Err(_) => HeaderValue::from_static("invalid"),
            }
        }
    };

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, id);
    response
}
