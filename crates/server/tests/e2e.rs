use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use configs::AppConfig;
use server::startup;

struct TestApp {
    base_url: String,
    data_dir: PathBuf,
}

impl TestApp {
    async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.data_dir).await;
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated data dir per test run
    let data_dir = std::env::temp_dir().join(format!("shop-api-e2e-{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = data_dir.clone();
    cfg.normalize_and_validate()?;

    let app: Router = startup::build_app(&cfg);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_product_lifecycle_persists_to_disk() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create
    let res = c.post(format!("{}/api/products", app.base_url))
        .json(&json!({"title": "A", "description": "d", "code": "c1", "price": 10, "stock": 5, "category": "x"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["status"], true);
    assert_eq!(created["thumbnails"], json!([]));

    // The file is pretty-printed JSON holding one record
    let raw = tokio::fs::read_to_string(app.data_dir.join("products.json")).await?;
    assert!(raw.starts_with("[\n  {"));
    assert!(raw.contains("\"price\": 10,"));
    let on_disk: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0]["id"], id.as_str());

    // Get
    let res = c.get(format!("{}/api/products/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["title"], "A");

    // Update
    let res = c.put(format!("{}/api/products/{}", app.base_url, id))
        .json(&json!({"title": "B", "thumbnails": ["a.png"]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["title"], "B");
    assert_eq!(updated["code"], serde_json::Value::Null);
    assert_eq!(updated["status"], true);
    assert_eq!(updated["thumbnails"], json!(["a.png"]));

    // Delete twice
    let res = c.delete(format!("{}/api/products/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["message"], "Product deleted successfully");
    let res = c.delete(format!("{}/api/products/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(format!("{}/api/products", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_cart_add_same_product_twice() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/api/carts", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let cart = res.json::<serde_json::Value>().await?;
    let cid = cart["id"].as_str().unwrap_or_default().to_string();
    assert_eq!(cart["products"], json!([]));

    let pid = "p-1";
    for _ in 0..2 {
        let res = c.post(format!("{}/api/carts/{}/product/{}", app.base_url, cid, pid)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(format!("{}/api/carts/{}", app.base_url, cid)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let cart = res.json::<serde_json::Value>().await?;
    assert_eq!(cart["products"], json!([{"product": pid, "quantity": 2}]));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_corrupt_products_file_reads_empty() -> anyhow::Result<()> {
    let app = start_server().await?;
    tokio::fs::create_dir_all(&app.data_dir).await?;
    tokio::fs::write(app.data_dir.join("products.json"), "not json at all").await?;

    let res = client().get(format!("{}/api/products", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    app.cleanup().await;
    Ok(())
}
