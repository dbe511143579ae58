use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use std::{
    fs,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

#[tokio::test]
async fn activities_routes_cover_listing_signup_and_unregister() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "rosterd-routes-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let db = rosterd::db::spawn(&database_url).await.unwrap();

    let state = rosterd::server::router::RosterState::new(db);
    let app = rosterd::server::router::roster_router(state);

    // 1) GET /activities -> 200 with all seeded activities keyed by name.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/activities")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let activities = body.as_object().expect("expected a JSON object");
    assert_eq!(activities.len(), 9);
    assert_eq!(
        activities["Chess Club"]["participants"],
        serde_json::json!(["michael@mergington.edu", "daniel@mergington.edu"])
    );
    assert_eq!(activities["Math Club"]["max_participants"], 10);

    // 2) signup without an email query parameter -> 400 (extractor rejection)
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/activities/Chess%20Club/signup")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 3) valid signup -> 200 with a confirmation message
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/activities/Chess%20Club/signup?email=lucas@mergington.edu")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(
        body["message"],
        "Signed up lucas@mergington.edu for Chess Club"
    );

    // 4) duplicate signup -> 400 ALREADY_SIGNED_UP
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/activities/Chess%20Club/signup?email=lucas@mergington.edu")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "ALREADY_SIGNED_UP");

    // 5) signup against an unknown activity -> 404 ACTIVITY_NOT_FOUND
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/activities/Knitting%20Circle/signup?email=lucas@mergington.edu")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "ACTIVITY_NOT_FOUND");

    // 6) unregister -> 200, then a second attempt -> 400 NOT_SIGNED_UP
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/activities/Chess%20Club/unregister?email=lucas@mergington.edu")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(
        body["message"],
        "Unregistered lucas@mergington.edu from Chess Club"
    );

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/activities/Chess%20Club/unregister?email=lucas@mergington.edu")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "NOT_SIGNED_UP");

    // 7) root redirects to the activities listing
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()["location"], "/activities");

    // 8) unknown path falls back to 404
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/nope")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Clean up the temporary database file
    let _ = fs::remove_file(format!("{}-wal", temp_path.display()));
    let _ = fs::remove_file(format!("{}-shm", temp_path.display()));
    let _ = fs::remove_file(&temp_path);
}
