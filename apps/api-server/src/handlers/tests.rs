use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};

use folio_core::domain::{MAX_UPLOAD_BYTES, MediaObject, NewPost};
use folio_core::error::StorageError;
use folio_core::ports::{AuthError, IdentityProvider, MediaStore, PostRepository};
use folio_infra::{
    AccessAuthenticator, AccessConfig, InMemoryMediaStore, InMemoryPostRepository,
    SessionAuthenticator,
};

use super::configure_routes;
use crate::middleware::cors::cors;
use crate::state::{AppState, LoginFlow};

const OWNER: &str = "owner@example.com";
const BOUNDARY: &str = "folio-test-boundary";
const NO_STORE: &str = "private, no-store, max-age=0";

struct FakeProvider;

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn authorize_url(&self, redirect_uri: &str) -> Result<String, AuthError> {
        Ok(format!("https://github.test/authorize?redirect_uri={redirect_uri}"))
    }

    async fn resolve_email(&self, code: &str) -> Result<String, AuthError> {
        match code {
            "owner-code" => Ok(OWNER.to_string()),
            "stranger-code" => Ok("stranger@example.com".to_string()),
            _ => Err(AuthError::Provider("bad_verification_code".to_string())),
        }
    }
}

struct Harness {
    state: AppState,
    posts: Arc<InMemoryPostRepository>,
    media: Arc<InMemoryMediaStore>,
    sessions: Arc<SessionAuthenticator>,
}

impl Harness {
    fn new() -> Self {
        let posts = Arc::new(InMemoryPostRepository::new());
        let media = Arc::new(InMemoryMediaStore::new());
        let sessions = Arc::new(SessionAuthenticator::new("handler-test-secret", OWNER));
        let login = LoginFlow {
            provider: Arc::new(FakeProvider),
            sessions: sessions.clone(),
        };
        let state = AppState::from_parts(
            posts.clone(),
            media.clone(),
            sessions.clone(),
            Some(Arc::new(login)),
        );

        Self {
            state,
            posts,
            media,
            sessions,
        }
    }

    fn owner_cookie(&self) -> Cookie<'static> {
        Cookie::new("session", self.sessions.issue(OWNER, Utc::now()).unwrap())
    }

    async fn seed(&self, slug: &str, published: bool) {
        self.posts
            .create(NewPost {
                slug: slug.to_string(),
                title: format!("Title of {slug}"),
                excerpt: None,
                content: "<p>body</p>".to_string(),
                cover_image: None,
                published,
            })
            .await
            .unwrap();
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(cors())
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn multipart_body(file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(file_name: &str, content_type: &str, data: &[u8]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(file_name, content_type, data))
}

#[actix_web::test]
async fn test_create_requires_authentication() {
    let h = Harness::new();
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "T", "slug": "t", "content": "c" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(h.posts.is_empty().await);
}

#[actix_web::test]
async fn test_create_missing_fields_rejected_without_write() {
    let h = Harness::new();
    let app = app!(h.state);

    for body in [
        json!({ "slug": "s", "content": "c" }),
        json!({ "title": "T", "content": "c" }),
        json!({ "title": "T", "slug": "s" }),
        json!({ "title": "  ", "slug": "s", "content": "c" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .cookie(h.owner_cookie())
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    assert!(h.posts.is_empty().await);
}

#[actix_web::test]
async fn test_create_and_duplicate_slug() {
    let h = Harness::new();
    let app = app!(h.state);
    let body = json!({ "title": "Hello", "slug": "hello", "content": "<p>hi</p>", "published": true });

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .cookie(h.owner_cookie())
        .set_json(&body)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["success"], true);
    assert!(created["id"].as_i64().is_some());

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .cookie(h.owner_cookie())
        .set_json(&body)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let problem: Value = test::read_body_json(res).await;
    assert_eq!(problem["detail"], "A post with this slug already exists");
    assert_eq!(h.posts.len().await, 1);
}

#[actix_web::test]
async fn test_unpublished_post_visibility() {
    let h = Harness::new();
    h.seed("draft", false).await;
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/posts/draft").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/posts/draft")
        .cookie(h.owner_cookie())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CACHE_CONTROL).unwrap(),
        NO_STORE
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["post"]["slug"], "draft");
    assert_eq!(body["post"]["content"], "<p>body</p>");
}

#[actix_web::test]
async fn test_published_post_is_cacheable_and_revalidates() {
    let h = Harness::new();
    h.seed("hello", true).await;
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/posts/hello").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .starts_with("public, max-age=3600")
    );
    let etag = res.headers().get(header::ETAG).unwrap().clone();

    let req = test::TestRequest::get()
        .uri("/api/posts/hello")
        .insert_header((header::IF_NONE_MATCH, etag.clone()))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(res.headers().get(header::ETAG), Some(&etag));
    let body = test::read_body(res).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_listing_hides_drafts_from_anonymous_callers() {
    let h = Harness::new();
    h.seed("public", true).await;
    h.seed("draft", false).await;
    let app = app!(h.state);

    let req = test::TestRequest::get()
        .uri("/api/posts?all=true")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    // Same URL as the admin console, so never a shared cache entry.
    assert_eq!(res.headers().get(header::CACHE_CONTROL).unwrap(), NO_STORE);
    assert_eq!(res.headers().get("cdn-cache-control").unwrap(), "no-store");
    let body: Value = test::read_body_json(res).await;
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "public");
    assert!(posts[0].get("content").is_none());

    let req = test::TestRequest::get()
        .uri("/api/posts?all=true")
        .cookie(h.owner_cookie())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(
        res.headers().get("cdn-cache-control").unwrap(),
        "no-store"
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_limited_listing_is_private() {
    let h = Harness::new();
    h.seed("one", true).await;
    h.seed("two", true).await;
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/posts?limit=1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(
        res.headers().get(header::CACHE_CONTROL).unwrap(),
        "private, no-cache"
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_bare_listing_is_public() {
    let h = Harness::new();
    h.seed("one", true).await;
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .starts_with("public")
    );

    let req = test::TestRequest::get()
        .uri("/api/posts?all=false")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.headers().get(header::CACHE_CONTROL).unwrap(), NO_STORE);
}

#[actix_web::test]
async fn test_out_of_range_limit_rejected() {
    let h = Harness::new();
    h.seed("one", true).await;
    let app = app!(h.state);

    for uri in [
        "/api/posts?limit=18446744073709551615",
        "/api/posts?limit=-1",
        "/api/posts?limit=ten",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
        let problem: Value = test::read_body_json(res).await;
        assert_eq!(problem["status"], 400);
    }

    let req = test::TestRequest::get()
        .uri("/api/posts?limit=4294967295")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_owner_view_of_published_post_is_not_cached() {
    let h = Harness::new();
    h.seed("hello", true).await;
    let app = app!(h.state);

    let req = test::TestRequest::get()
        .uri("/api/posts/hello")
        .cookie(h.owner_cookie())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(header::CACHE_CONTROL).unwrap(), NO_STORE);
    assert_eq!(res.headers().get("cdn-cache-control").unwrap(), "no-store");
}

#[actix_web::test]
async fn test_update_rejects_blank_required_fields() {
    let h = Harness::new();
    h.seed("hello", true).await;
    let app = app!(h.state);

    for body in [
        json!({ "title": "" }),
        json!({ "slug": "   " }),
        json!({ "content": "", "excerpt": "kept?" }),
    ] {
        let req = test::TestRequest::put()
            .uri("/api/posts/hello")
            .cookie(h.owner_cookie())
            .set_json(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    let post = h.posts.find_by_slug("hello").await.unwrap().unwrap();
    assert_eq!(post.title, "Title of hello");
    assert_eq!(post.content, "<p>body</p>");
    assert_eq!(post.excerpt, None);
}

#[actix_web::test]
async fn test_update_post() {
    let h = Harness::new();
    h.seed("hello", true).await;
    let app = app!(h.state);

    let req = test::TestRequest::put()
        .uri("/api/posts/hello")
        .cookie(h.owner_cookie())
        .set_json(json!({}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::put()
        .uri("/api/posts/missing")
        .cookie(h.owner_cookie())
        .set_json(json!({ "title": "New" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::put()
        .uri("/api/posts/hello")
        .cookie(h.owner_cookie())
        .set_json(json!({ "title": "Renamed", "excerpt": "short" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let post = h.posts.find_by_slug("hello").await.unwrap().unwrap();
    assert_eq!(post.title, "Renamed");
    assert_eq!(post.excerpt.as_deref(), Some("short"));
    assert_eq!(post.content, "<p>body</p>");
}

#[actix_web::test]
async fn test_delete_post() {
    let h = Harness::new();
    h.seed("keep", true).await;
    h.seed("gone", true).await;
    let app = app!(h.state);

    let req = test::TestRequest::delete()
        .uri("/api/posts/unknown")
        .cookie(h.owner_cookie())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(h.posts.len().await, 2);

    let req = test::TestRequest::delete()
        .uri("/api/posts/gone")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::delete()
        .uri("/api/posts/gone")
        .cookie(h.owner_cookie())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(h.posts.len().await, 1);

    let req = test::TestRequest::get().uri("/api/posts/gone").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_upload_rejections_store_nothing() {
    let h = Harness::new();
    let app = app!(h.state);

    let req = upload_request("notes.txt", "text/plain", b"hello")
        .cookie(h.owner_cookie())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let oversized = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let req = upload_request("huge.png", "image/png", &oversized)
        .cookie(h.owner_cookie())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = upload_request("photo.png", "image/png", b"\x89PNG")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    assert!(h.media.is_empty().await);
}

#[actix_web::test]
async fn test_upload_and_serve() {
    let h = Harness::new();
    let app = app!(h.state);
    let png = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    let req = upload_request("Photo.PNG", "image/png", png)
        .cookie(h.owner_cookie())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;

    let key = body["key"].as_str().unwrap().to_string();
    assert!(key.starts_with("uploads/"));
    assert!(key.ends_with(".png"));
    assert_eq!(body["url"], format!("/media/{key}"));

    let stored = h.media.get(&key).await.unwrap().unwrap();
    assert_eq!(stored.content_type, "image/png");

    let req = test::TestRequest::get()
        .uri(&format!("/media/{key}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        res.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=31536000, immutable"
    );
    assert_eq!(&test::read_body(res).await[..], &png[..]);

    let req = test::TestRequest::get()
        .uri("/media/uploads/missing.png")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

/// Bucket stand-in that reports its own entity tag, like R2 or S3 do.
struct TaggedMediaStore;

#[async_trait]
impl MediaStore for TaggedMediaStore {
    async fn put(&self, _key: &str, _content_type: &str, _data: Vec<u8>) -> Result<(), StorageError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<MediaObject>, StorageError> {
        Ok((key == "uploads/tagged.png").then(|| MediaObject {
            content_type: "image/png".to_string(),
            data: b"\x89PNGtagged".to_vec(),
            etag: Some("\"bucket-etag\"".to_string()),
        }))
    }

    fn backend(&self) -> &'static str {
        "tagged"
    }
}

#[actix_web::test]
async fn test_media_revalidates_with_computed_etag() {
    let h = Harness::new();
    h.media
        .put("uploads/plain.png", "image/png", b"\x89PNGplain".to_vec())
        .await
        .unwrap();
    let app = app!(h.state);

    let req = test::TestRequest::get()
        .uri("/media/uploads/plain.png")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let etag = res.headers().get(header::ETAG).unwrap().clone();
    assert!(etag.to_str().unwrap().starts_with("W/\""));

    let req = test::TestRequest::get()
        .uri("/media/uploads/plain.png")
        .insert_header((header::IF_NONE_MATCH, etag.clone()))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(res.headers().get(header::ETAG), Some(&etag));
    assert!(test::read_body(res).await.is_empty());
}

#[actix_web::test]
async fn test_media_revalidates_with_store_etag() {
    let h = Harness::new();
    let state = AppState::from_parts(
        h.posts.clone(),
        Arc::new(TaggedMediaStore),
        h.sessions.clone(),
        None,
    );
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/media/uploads/tagged.png")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(header::ETAG).unwrap(), "\"bucket-etag\"");

    let req = test::TestRequest::get()
        .uri("/media/uploads/tagged.png")
        .insert_header((header::IF_NONE_MATCH, "\"bucket-etag\""))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
    assert!(test::read_body(res).await.is_empty());

    let req = test::TestRequest::get()
        .uri("/media/uploads/tagged.png")
        .insert_header((header::IF_NONE_MATCH, "\"stale\""))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_oauth_callback() {
    let h = Harness::new();
    let app = app!(h.state);

    let req = test::TestRequest::get()
        .uri("/api/auth/callback?error=access_denied")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/auth/callback?code=expired")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/auth/callback?code=stranger-code")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::get()
        .uri("/api/auth/callback?code=owner-code")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/admin");

    let cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .unwrap()
        .into_owned();
    assert!(cookie.http_only().unwrap_or(false));
    assert!(cookie.secure().unwrap_or(false));

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], true);
}

#[actix_web::test]
async fn test_login_redirects_to_provider() {
    let h = Harness::new();
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/auth/login").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.ends_with("/api/auth/callback"));
}

#[actix_web::test]
async fn test_logout_clears_cookie() {
    let h = Harness::new();
    let app = app!(h.state);

    let req = test::TestRequest::get()
        .uri("/api/auth/logout")
        .cookie(h.owner_cookie())
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .unwrap();
    assert!(cookie.value().is_empty());
}

#[actix_web::test]
async fn test_me_without_credentials() {
    let h = Harness::new();
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authenticated"], false);
}

#[actix_web::test]
async fn test_access_mode_trusts_proxy_header_and_disables_login() {
    let access = AccessAuthenticator::with_http(
        AccessConfig {
            team_domain: "team.example.com".to_string(),
            audience: "aud".to_string(),
        },
        reqwest::Client::new(),
    );
    let posts = Arc::new(InMemoryPostRepository::new());
    let state = AppState::from_parts(
        posts.clone(),
        Arc::new(InMemoryMediaStore::new()),
        Arc::new(access),
        None,
    );
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/auth/login").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Cf-Access-Authenticated-User-Email", OWNER))
        .set_json(json!({ "title": "T", "slug": "t", "content": "c" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
    assert_eq!(posts.len().await, 1);
}

#[actix_web::test]
async fn test_preflight_and_cors_headers() {
    let h = Harness::new();
    let app = app!(h.state);

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/posts/anything")
        .insert_header((header::ORIGIN, "https://blog.example.com"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    assert!(h.posts.is_empty().await);

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header((header::ORIGIN, "https://blog.example.com"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["storage"]["posts"], "memory");
}
