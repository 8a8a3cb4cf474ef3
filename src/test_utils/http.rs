use axum::{body::Body, http::StatusCode, response::Response};

/// Check that `response` tells htmx to load `endpoint`.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get("hx-redirect")
        .expect("response is missing the hx-redirect header")
        .to_str()
        .expect("hx-redirect header is not valid text");
    assert_eq!(location, endpoint);
}
