//! A local stand-in for the remote speller, and a proxy in front of it.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    Form, Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::post,
};
use hwpx_spell::UpstreamSpeller;
use hwpx_spell::server::{ProxyState, build_router};

/// Marks every "되요" as an error; any other text comes back as sent.
pub async fn stub_speller(Form(form): Form<HashMap<String, String>>) -> Response {
    let text = form.get("text1").cloned().unwrap_or_default();
    if text.contains("fail") {
        return (StatusCode::SERVICE_UNAVAILABLE, "down").into_response();
    }
    if text.contains("no-region") {
        return Html("<html><body>busy</body></html>".to_string()).into_response();
    }

    let marked = text.replace("되요", r#"<span class="error_color">돼요</span>"#);
    Html(format!(
        r#"<html><body><div class="result_text">{marked}</div><div class="footer">end</div></body></html>"#
    ))
    .into_response()
}

pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start the stub speller and a proxy in front of it; returns the proxy endpoint.
pub async fn start_proxy() -> String {
    let upstream = spawn(Router::new().route("/results", post(stub_speller))).await;
    let speller = UpstreamSpeller::new(format!("http://{upstream}/results"), None).unwrap();
    let proxy = spawn(build_router(ProxyState::new(speller))).await;
    format!("http://{proxy}/api/spell-check")
}

pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/spell-check")
}
