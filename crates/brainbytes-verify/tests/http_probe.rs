//! `HttpProbe` against local stub endpoints.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;

use brainbytes_verify::{verify, HttpProbe, Probe, Target, VerifyPlan};

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/moved", get(|| async { Redirect::temporary("/health") }))
        .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn probe() -> HttpProbe {
    HttpProbe::new(Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn reports_status_codes() {
    let addr = spawn_stub().await;
    let p = probe();

    let ok = p.probe(&Target::new("ok", format!("http://{addr}/health"))).await;
    assert_eq!(ok.status, Some(200));
    assert!(ok.is_healthy());

    let moved = p.probe(&Target::new("moved", format!("http://{addr}/moved"))).await;
    assert_eq!(moved.status, Some(307));
    assert!(moved.is_healthy());

    let broken = p.probe(&Target::new("broken", format!("http://{addr}/broken"))).await;
    assert_eq!(broken.status, Some(500));
    assert!(!broken.is_healthy());

    let missing = p.probe(&Target::new("missing", format!("http://{addr}/nope"))).await;
    assert_eq!(missing.status, Some(404));
}

#[tokio::test]
async fn connection_refused_is_unhealthy() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let out = probe().probe(&Target::new("gone", format!("http://{addr}/"))).await;
    assert_eq!(out.status, None);
    assert!(out.error.is_some());
    assert!(!out.is_healthy());
}

#[tokio::test]
async fn end_to_end_against_live_stub() {
    let addr = spawn_stub().await;
    let plan = VerifyPlan {
        targets: vec![
            Target::new("a", format!("http://{addr}/health")),
            Target::new("b", format!("http://{addr}/moved")),
        ],
        max_attempts: 2,
        delay: Duration::from_millis(10),
    };
    assert_eq!(verify(&probe(), &plan).await.exit_code(), 0);

    let plan = VerifyPlan {
        targets: vec![Target::new("c", format!("http://{addr}/broken"))],
        ..plan
    };
    assert_eq!(verify(&probe(), &plan).await.exit_code(), 1);
}
