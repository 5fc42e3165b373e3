use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::observe::MethodHooks;
use server::routes::{self, ServerState};
use service::jobs::{InMemoryJobStore, JobService};
use service::products::{InMemoryProductStore, ProductService};
use service::students::{InMemoryStudentStore, StudentService};

#[derive(Default)]
struct CountingHooks {
    enter: AtomicUsize,
    success: AtomicUsize,
    failure: AtomicUsize,
}

impl MethodHooks for CountingHooks {
    fn on_enter(&self, _method: &str) {
        self.enter.fetch_add(1, Ordering::SeqCst);
    }
    fn on_success(&self, _method: &str, _elapsed: Duration) {
        self.success.fetch_add(1, Ordering::SeqCst);
    }
    fn on_failure(&self, _method: &str, _error: &str, _elapsed: Duration) {
        self.failure.fetch_add(1, Ordering::SeqCst);
    }
}

struct TestApp {
    base_url: String,
    hooks: Arc<CountingHooks>,
}

/// Boot the router on an ephemeral port with empty in-memory stores.
async fn start_server() -> TestApp {
    let hooks = Arc::new(CountingHooks::default());
    let state = ServerState {
        jobs: JobService::new(InMemoryJobStore::new()),
        students: StudentService::new(InMemoryStudentStore::new()),
        products: ProductService::new(InMemoryProductStore::new()),
        hooks: hooks.clone(),
    };
    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    TestApp { base_url: format!("http://{}", addr), hooks }
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn sample_post(id: i32) -> serde_json::Value {
    json!({
        "postId": id,
        "postProfile": "Rust Engineer",
        "postDesc": "Own the billing services",
        "reqExperience": 2,
        "postTechStack": ["Rust", "Postgres"]
    })
}

fn product_form(name: &str, category: &str, image: Vec<u8>) -> reqwest::multipart::Form {
    let payload = json!({"name": name, "price": 249.5, "category": category}).to_string();
    reqwest::multipart::Form::new()
        .part(
            "product",
            reqwest::multipart::Part::text(payload)
                .mime_str("application/json")
                .expect("mime"),
        )
        .part(
            "imageFile",
            reqwest::multipart::Part::bytes(image)
                .file_name("cam.png")
                .mime_str("image/png")
                .expect("mime"),
        )
}

#[tokio::test]
async fn e2e_health() {
    let app = start_server().await;
    let res = client().get(format!("{}/health", app.base_url)).send().await.expect("send");
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await.expect("json");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn e2e_job_post_roundtrip_and_delete() {
    let app = start_server().await;
    let c = client();

    // Create, then read back the exact same JSON
    let res = c
        .post(format!("{}/posts", app.base_url))
        .json(&sample_post(10))
        .send()
        .await
        .expect("create");
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<serde_json::Value>().await.expect("json");

    let res = c.get(format!("{}/posts/10", app.base_url)).send().await.expect("get");
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await.expect("json");
    assert_eq!(created, fetched);

    // Duplicate id is rejected
    let res = c
        .post(format!("{}/posts", app.base_url))
        .json(&sample_post(10))
        .send()
        .await
        .expect("dup");
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // Delete via query param, then the id is gone; repeating stays a no-op
    let res = c.delete(format!("{}/posts?id=10", app.base_url)).send().await.expect("delete");
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(format!("{}/posts/10", app.base_url)).send().await.expect("get");
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(format!("{}/posts?id=10", app.base_url)).send().await.expect("redelete");
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
}

#[tokio::test]
async fn e2e_job_post_search_and_threshold() {
    let app = start_server().await;
    let c = client();

    for (id, profile, exp) in [(1, "Rust Engineer", 1), (2, "Java Engineer", 4), (3, "QA Analyst", 2)] {
        let mut post = sample_post(id);
        post["postProfile"] = json!(profile);
        post["reqExperience"] = json!(exp);
        let res = c.post(format!("{}/posts", app.base_url)).json(&post).send().await.expect("create");
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    let hits = c
        .get(format!("{}/posts?keyword=Engineer", app.base_url))
        .send()
        .await
        .expect("search")
        .json::<Vec<serde_json::Value>>()
        .await
        .expect("json");
    assert_eq!(hits.len(), 2);

    // Case-sensitive: lowercase finds nothing
    let hits = c
        .get(format!("{}/posts?keyword=engineer", app.base_url))
        .send()
        .await
        .expect("search")
        .json::<Vec<serde_json::Value>>()
        .await
        .expect("json");
    assert!(hits.is_empty());

    let hits = c
        .get(format!("{}/posts?experience=2", app.base_url))
        .send()
        .await
        .expect("threshold")
        .json::<Vec<serde_json::Value>>()
        .await
        .expect("json");
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn e2e_job_post_put_upserts() {
    let app = start_server().await;
    let c = client();

    // PUT on a missing id inserts
    let res = c
        .put(format!("{}/posts/77", app.base_url))
        .json(&sample_post(77))
        .send()
        .await
        .expect("upsert insert");
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(format!("{}/posts/77", app.base_url)).send().await.expect("get");
    assert_eq!(res.status(), HttpStatusCode::OK);

    // PUT on an existing id overwrites fields, keeps the id; the path wins
    // over a stale body id
    let mut changed = sample_post(9999);
    changed["postProfile"] = json!("Staff Engineer");
    let res = c
        .put(format!("{}/posts/77", app.base_url))
        .json(&changed)
        .send()
        .await
        .expect("upsert update");
    assert_eq!(res.status(), HttpStatusCode::OK);
    let stored = res.json::<serde_json::Value>().await.expect("json");
    assert_eq!(stored["postId"], 77);
    assert_eq!(stored["postProfile"], "Staff Engineer");

    let all = c
        .get(format!("{}/posts", app.base_url))
        .send()
        .await
        .expect("list")
        .json::<Vec<serde_json::Value>>()
        .await
        .expect("json");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn e2e_student_lifecycle() {
    let app = start_server().await;
    let c = client();

    let david = json!({"rollNo": 104, "name": "David", "marks": 100});
    let res = c.post(format!("{}/students", app.base_url)).json(&david).send().await.expect("create");
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/students/104", app.base_url)).send().await.expect("get");
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await.expect("json"), david);

    // Update an existing record
    let res = c
        .put(format!("{}/students/104", app.base_url))
        .json(&json!({"rollNo": 104, "name": "David", "marks": 88}))
        .send()
        .await
        .expect("update");
    assert_eq!(res.status(), HttpStatusCode::OK);

    // Update on a missing roll number is 404, no upsert
    let res = c
        .put(format!("{}/students/999", app.base_url))
        .json(&json!({"rollNo": 999, "name": "Ghost", "marks": 0}))
        .send()
        .await
        .expect("update missing");
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(format!("{}/students/999", app.base_url)).send().await.expect("get");
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/students/104", app.base_url)).send().await.expect("delete");
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.delete(format!("{}/students/104", app.base_url)).send().await.expect("redelete");
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn e2e_product_multipart_lifecycle() {
    let app = start_server().await;
    let c = client();

    let res = c
        .post(format!("{}/api/product", app.base_url))
        .multipart(product_form("Camera", "electronics", vec![1, 2, 3, 4]))
        .send()
        .await
        .expect("create");
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await.expect("json");
    let id = created["id"].as_i64().expect("id") as i32;
    assert_eq!(created["name"], "Camera");
    assert_eq!(created["imageName"], "cam.png");
    // Raw bytes never leak into JSON responses
    assert!(created.get("imageData").is_none());

    // The image endpoint serves the original bytes with the stored type
    let res = c
        .get(format!("{}/api/product/{}/image", app.base_url, id))
        .send()
        .await
        .expect("image");
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(res.bytes().await.expect("bytes").to_vec(), vec![1, 2, 3, 4]);

    // Search by category
    let hits = c
        .get(format!("{}/api/products/search?keyword=electro", app.base_url))
        .send()
        .await
        .expect("search")
        .json::<Vec<serde_json::Value>>()
        .await
        .expect("json");
    assert_eq!(hits.len(), 1);

    // Update replaces entity and image
    let res = c
        .put(format!("{}/api/product/{}", app.base_url, id))
        .multipart(product_form("Camera Mk2", "electronics", vec![9, 9]))
        .send()
        .await
        .expect("update");
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await.expect("json");
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Camera Mk2");

    // Update on a missing id is 404
    let res = c
        .put(format!("{}/api/product/424242", app.base_url))
        .multipart(product_form("Nope", "none", vec![0]))
        .send()
        .await
        .expect("update missing");
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    // Delete returns the plain confirmation, then 404
    let res = c.delete(format!("{}/api/product/{}", app.base_url, id)).send().await.expect("delete");
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await.expect("text"), "Deleted");
    let res = c.delete(format!("{}/api/product/{}", app.base_url, id)).send().await.expect("redelete");
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn e2e_product_missing_image_part_is_bad_request() {
    let app = start_server().await;
    let payload = json!({"name": "NoImage", "price": 1.0, "category": "misc"}).to_string();
    let form = reqwest::multipart::Form::new().part(
        "product",
        reqwest::multipart::Part::text(payload)
            .mime_str("application/json")
            .expect("mime"),
    );
    let res = client()
        .post(format!("{}/api/product", app.base_url))
        .multipart(form)
        .send()
        .await
        .expect("create");
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    // The body carries a stable title, not the internal cause
    let body = res.json::<serde_json::Value>().await.expect("json");
    assert_eq!(body["error"], "Invalid Submission");
}

#[tokio::test]
async fn e2e_observer_hooks_fire_for_product_calls_only() {
    let app = start_server().await;
    let c = client();

    // Job routes are not observed
    let res = c.get(format!("{}/posts", app.base_url)).send().await.expect("list posts");
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(app.hooks.enter.load(Ordering::SeqCst), 0);

    // A successful catalog call fires enter + success
    let res = c.get(format!("{}/api/products", app.base_url)).send().await.expect("list products");
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(app.hooks.enter.load(Ordering::SeqCst), 1);
    assert_eq!(app.hooks.success.load(Ordering::SeqCst), 1);
    assert_eq!(app.hooks.failure.load(Ordering::SeqCst), 0);

    // A failing submission fires enter + failure, success stays put
    let res = c
        .post(format!("{}/api/product", app.base_url))
        .multipart(reqwest::multipart::Form::new())
        .send()
        .await
        .expect("bad create");
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(app.hooks.enter.load(Ordering::SeqCst), 2);
    assert_eq!(app.hooks.success.load(Ordering::SeqCst), 1);
    assert_eq!(app.hooks.failure.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn e2e_home_pages_and_openapi() {
    let app = start_server().await;
    let c = client();

    let res = c.get(format!("{}/", app.base_url)).send().await.expect("index");
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await.expect("text").contains("<form"));

    let res = c.get(format!("{}/add?num1=2&num2=40", app.base_url)).send().await.expect("add");
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await.expect("text").contains("Result: 42"));

    let res = c.get(format!("{}/hello", app.base_url)).send().await.expect("hello");
    assert_eq!(res.text().await.expect("text"), "Hello!");

    let res = c
        .get(format!("{}/api-docs/openapi.json", app.base_url))
        .send()
        .await
        .expect("openapi");
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<serde_json::Value>().await.expect("json");
    assert!(doc.get("openapi").is_some());
    assert!(doc["paths"].get("/posts").is_some());
}
