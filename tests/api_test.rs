mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_public_endpoints_start_empty() {
    let app = TestApp::new();

    let (status, profile) = app.get_json("/api/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(profile.is_null());

    for uri in [
        "/api/social-links",
        "/api/sponsors",
        "/api/discount-codes",
        "/api/games",
    ] {
        let (status, body) = app.get_json(uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }

    let (status, body) = app.get("/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_admin_routes_require_admin_session() {
    let app = TestApp::new();

    let (status, _) = app.get_json("/api/admin/social-links", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .json("PUT", "/api/admin/profile", Some("biolink_session=bogus"), json!({}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.add_user("viewer", "viewer-pass");
    let cookie = app.login("viewer", "viewer-pass").await.unwrap();
    let (status, _) = app.get_json("/api/admin/games", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .json("POST", "/api/admin/games", Some(&cookie), json!({ "name": "Chess" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_cookie().await;
    let (status, _) = app.get_json("/api/admin/games", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_logout_flow() {
    let app = TestApp::new();

    assert!(app.login(common::ADMIN_USER, "wrong").await.is_none());

    let cookie = app.admin_cookie().await;
    assert!(cookie.starts_with("biolink_session="));

    let (status, user) = app.get_json("/api/auth/user", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], "admin");
    assert_eq!(user["isAdmin"], true);

    let (status, _) = app.json("POST", "/api/auth/logout", Some(&cookie), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get_json("/api/auth/user", Some(&cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_logins_each_get_a_session() {
    let app = TestApp::new();

    let (first, second, wrong) = tokio::join!(
        app.login(common::ADMIN_USER, common::ADMIN_PASSWORD),
        app.login(common::ADMIN_USER, common::ADMIN_PASSWORD),
        app.login(common::ADMIN_USER, "wrong"),
    );
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_ne!(first, second);
    assert!(wrong.is_none());

    for cookie in [&first, &second] {
        let (status, _) = app.get_json("/api/auth/user", Some(cookie)).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_social_link_crud_round_trip() {
    let app = TestApp::new();
    let admin = app.admin_cookie().await;

    let (status, created) = app
        .json(
            "POST",
            "/api/admin/social-links",
            Some(&admin),
            json!({
                "platform": "YouTube",
                "url": "https://youtube.com/@someone",
                "followerCount": "120K",
                "displayStyle": "grid",
                "columnSpan": 2
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["displayOrder"], 0);
    assert_eq!(created["isActive"], true);
    assert_eq!(created["displayStyle"], "grid");

    let (_, public) = app.get_json("/api/social-links", None).await;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["followerCount"], "120K");

    let (status, updated) = app
        .json(
            "PUT",
            &format!("/api/admin/social-links/{id}"),
            Some(&admin),
            json!({ "isActive": false, "followerCount": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isActive"], false);
    assert!(updated["followerCount"].is_null());
    assert_eq!(updated["platform"], "YouTube");

    let (_, public) = app.get_json("/api/social-links", None).await;
    assert_eq!(public, json!([]));
    let (_, all) = app.get_json("/api/admin/social-links", Some(&admin)).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let uri = format!("/api/admin/social-links/{id}");
    assert_eq!(app.delete(&uri, Some(&admin)).await, StatusCode::NO_CONTENT);
    assert_eq!(app.delete(&uri, Some(&admin)).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_payloads_are_bad_requests() {
    let app = TestApp::new();
    let admin = app.admin_cookie().await;

    let (status, body) = app
        .json(
            "POST",
            "/api/admin/social-links",
            Some(&admin),
            json!({ "platform": "X", "url": "javascript:alert(1)", "columnSpan": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f.as_str())
        .collect();
    assert!(fields.contains(&"url"));
    assert!(fields.contains(&"column_span"));

    let (status, _) = app
        .json("POST", "/api/admin/sponsors", Some(&admin), json!({ "name": "No site" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            "POST",
            "/api/admin/discount-codes",
            Some(&admin),
            json!({ "code": "GHOST", "sponsorId": "does-not-exist" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_sponsor_keeps_codes_as_general() {
    let app = TestApp::new();
    let admin = app.admin_cookie().await;

    let (_, sponsor) = app
        .json(
            "POST",
            "/api/admin/sponsors",
            Some(&admin),
            json!({ "name": "Acme", "websiteUrl": "https://acme.example" }),
        )
        .await;
    let sponsor_id = sponsor["id"].as_str().unwrap().to_string();

    for code in ["ACME10", "ACME20"] {
        let (status, _) = app
            .json(
                "POST",
                "/api/admin/discount-codes",
                Some(&admin),
                json!({ "code": code, "sponsorId": sponsor_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let status = app
        .delete(&format!("/api/admin/sponsors/{sponsor_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, sponsors) = app.get_json("/api/sponsors", None).await;
    assert_eq!(sponsors, json!([]));
    let (_, codes) = app.get_json("/api/discount-codes", None).await;
    let codes = codes.as_array().unwrap();
    assert_eq!(codes.len(), 2);
    assert!(codes.iter().all(|c| c["sponsorId"].is_null()));
}

#[tokio::test]
async fn test_reorder_is_atomic() {
    let app = TestApp::new();
    let admin = app.admin_cookie().await;

    let mut ids = Vec::new();
    for name in ["First", "Second", "Third"] {
        let (_, game) = app
            .json("POST", "/api/admin/games", Some(&admin), json!({ "name": name }))
            .await;
        ids.push(game["id"].as_str().unwrap().to_string());
    }

    let reversed: Vec<&String> = ids.iter().rev().collect();
    let (status, _) = app
        .json(
            "POST",
            "/api/admin/games/reorder",
            Some(&admin),
            json!({ "ids": reversed }),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let names = |games: serde_json::Value| -> Vec<String> {
        games
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["name"].as_str().unwrap().to_string())
            .collect()
    };
    let (_, games) = app.get_json("/api/games", None).await;
    assert_eq!(names(games), vec!["Third", "Second", "First"]);

    let (status, _) = app
        .json(
            "POST",
            "/api/admin/games/reorder",
            Some(&admin),
            json!({ "ids": [ids[0], "missing"] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, games) = app.get_json("/api/games", None).await;
    assert_eq!(names(games), vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_profile_update_hides_api_key() {
    let app = TestApp::new();
    let admin = app.admin_cookie().await;

    let (status, saved) = app
        .json(
            "PUT",
            "/api/admin/profile",
            Some(&admin),
            json!({
                "name": "Nova",
                "themeColor": "#ff0000",
                "lolEnabled": true,
                "lolSummonerName": "Nova",
                "lolApiKey": "RGAPI-secret-key"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["name"], "Nova");
    assert!(saved.get("lolApiKey").is_none());

    let (_, body) = app.get("/api/profile", None).await;
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("\"themeColor\":\"#ff0000\""));
    assert!(!text.contains("RGAPI-secret-key"));

    let (status, _) = app
        .json(
            "PUT",
            "/api/admin/profile",
            Some(&admin),
            json!({ "lolRegion": "atlantis" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .json(
            "PUT",
            "/api/admin/profile",
            Some(&admin),
            json!({ "backgroundImage": "/uploads/a.png'); color: red; ('" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"], json!(["background_image"]));
}

#[tokio::test]
async fn test_lol_lookup_without_key_serves_fallback() {
    let app = TestApp::new();

    let (status, body) = app
        .get_json("/api/lol/summoner/euw1/Faker/KR1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summonerName"], "Faker#KR1");
    assert_eq!(body["isFallback"], true);
    assert_eq!(body["rank"]["tier"], "Diamond");
    assert_eq!(body["recentMatches"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_lol_lookup_tolerates_odd_match_counts() {
    let app = TestApp::new();

    for count in ["999", "abc", "-3", ""] {
        let uri = format!("/api/lol/summoner/tr1/Someone/TR1?count={count}");
        let (status, body) = app.get_json(&uri, None).await;
        assert_eq!(status, StatusCode::OK, "count={count}");
        assert_eq!(body["summonerName"], "Someone#TR1");
        assert_eq!(body["isFallback"], true);
    }
}

fn multipart_request(cookie: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    let boundary = "biolinkboundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/admin/upload")
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_accepts_images_only() {
    let app = TestApp::new();
    let admin = app.admin_cookie().await;

    let (status, _, _) = app
        .send(multipart_request(&admin, "evil.html", b"<script></script>"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let png = b"\x89PNG\r\n\x1a\nfake";
    let (status, body, _) = app.send(multipart_request(&admin, "Avatar.PNG", png)).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let path = body["path"].as_str().unwrap().to_string();
    assert!(path.starts_with("/uploads/"));
    assert!(path.ends_with(".png"));

    let request = Request::builder().uri(&path).body(Body::empty()).unwrap();
    let (status, served, headers) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, png);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");

    let (status, _) = app.get("/uploads/..%2Ftest.db", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .send(multipart_request("biolink_session=nope", "a.png", png))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
