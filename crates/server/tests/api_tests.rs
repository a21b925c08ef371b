use reqwest::{Client, StatusCode};
use serde_json::Value;
use sift_core::storage::SnapshotPaths;
use sift_core::{IndexMode, SearchService};
use sift_server::api::create_router;
use sift_server::api::handlers::AppState;
use std::fmt::Write as _;
use std::sync::Arc;
use tempfile::TempDir;

const JOBS_HEADER: &str = "url,job_title,company_name,job_location,job_summary,job_seniority_level,job_employment_type,company_logo";

fn news_csv() -> String {
    let mut csv = String::from("headlines,read_more,text,date\n");
    for i in 0..15 {
        writeln!(
            csv,
            "Rust release {i},https://news.example/{i},The Rust team shipped version 1.{i},2024-02-{:02}",
            i + 1
        )
        .unwrap();
    }
    csv.push_str("Markets rally,https://news.example/markets,Shares climbed on Friday,2024-03-01\n");
    csv
}

fn jobs_csv() -> String {
    let rows = [
        "https://jobs.example/0,React Developer,Acme,\"London, England\",Build React front ends,Senior level,Full-time,acme.png",
        "https://jobs.example/1,React Developer,Globex,Manchester,Build React front ends,Senior level,Full-time,globex.png",
        "https://jobs.example/2,Senior React Engineer,Initech,London,React and TypeScript developer,Senior level,Contract,initech.png",
        "https://jobs.example/3,React Developer,Hooli,London,Junior React developer role,Entry level,Full-time,hooli.png",
        "https://jobs.example/4,Barista,,London,Coffee,Entry level,Part-time,cafe.png",
    ];
    format!("{JOBS_HEADER}\n{}\n", rows.join("\n"))
}

async fn spawn_app() -> (String, TempDir) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let news = tmp_dir.path().join("news.csv");
    let jobs = tmp_dir.path().join("jobs.csv");
    std::fs::write(&news, news_csv()).unwrap();
    std::fs::write(&jobs, jobs_csv()).unwrap();

    let service = SearchService::open(
        &tmp_dir.path().join("indices"),
        &SnapshotPaths { news, jobs },
        IndexMode::BuildOrLoad,
    )
    .unwrap_or_else(|e| panic!("Failed to open service: {e}"));

    let prometheus_handle =
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => handle,
            Err(_) => metrics_exporter_prometheus::PrometheusBuilder::new()
                .build_recorder()
                .handle(),
        };

    let state = AppState {
        service: Arc::new(service),
        prometheus_handle,
        start_time: std::time::Instant::now(),
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, tmp_dir)
}

fn client() -> Client {
    Client::new()
}

async fn get_search(base_url: &str, query: &[(&str, &str)]) -> reqwest::Response {
    client()
        .get(format!("{}/search", base_url))
        .query(query)
        .send()
        .await
        .expect("Failed to send search request")
}

async fn error_message(resp: reqwest::Response) -> String {
    let body: Value = resp.json().await.unwrap();
    body["error"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_missing_term() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = get_search(&base_url, &[("type", "news")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(resp).await, "Term is required");

    let resp = get_search(&base_url, &[("type", "news"), ("term", "")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(resp).await, "Term is required");
}

#[tokio::test]
async fn test_invalid_search_type() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = get_search(&base_url, &[("type", "videos"), ("term", "rust")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(resp).await, "Invalid search type");

    let resp = get_search(&base_url, &[("term", "rust")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(resp).await, "Invalid search type");
}

#[tokio::test]
async fn test_term_checked_before_type() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = get_search(&base_url, &[("type", "videos")]).await;
    assert_eq!(error_message(resp).await, "Term is required");
}

#[tokio::test]
async fn test_invalid_start() {
    let (base_url, _tmp) = spawn_app().await;
    for start in ["abc", "-1"] {
        let resp = get_search(&base_url, &[("type", "news"), ("term", "rust"), ("start", start)]).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "start={start}");
        assert!(!error_message(resp).await.is_empty());
    }
}

#[tokio::test]
async fn test_term_too_long() {
    let (base_url, _tmp) = spawn_app().await;
    let term = "a".repeat(sift_core::config::MAX_TERM_LEN + 1);
    let resp = get_search(&base_url, &[("type", "news"), ("term", &term)]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_news_search_first_page() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = get_search(&base_url, &[("type", "news"), ("term", "rust")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["total"], 15);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 10);
    for result in results {
        for field in ["title", "description", "link", "date", "score"] {
            assert!(result.get(field).is_some(), "missing {field}");
        }
    }
    let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_pagination() {
    let (base_url, _tmp) = spawn_app().await;

    let resp = get_search(&base_url, &[("type", "news"), ("term", "rust"), ("start", "10")]).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["total"], 15);
    assert_eq!(body["results"].as_array().unwrap().len(), 5);

    let resp = get_search(&base_url, &[("type", "news"), ("term", "rust"), ("start", "20")]).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["total"], 15);
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let (base_url, _tmp) = spawn_app().await;
    let mut links = Vec::new();
    for start in ["0", "10"] {
        let resp = get_search(&base_url, &[("type", "news"), ("term", "rust"), ("start", start)]).await;
        let body: Value = resp.json().await.unwrap();
        for r in body["results"].as_array().unwrap() {
            links.push(r["link"].as_str().unwrap().to_string());
        }
    }
    let before = links.len();
    links.sort();
    links.dedup();
    assert_eq!(links.len(), before);
    assert_eq!(before, 15);
}

#[tokio::test]
async fn test_jobs_search_filters_location() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = get_search(
        &base_url,
        &[("type", "jobs"), ("term", "senior react developer in london")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();

    let results = body["results"].as_array().unwrap();
    assert_eq!(body["total"], 2);
    assert_eq!(results.len(), 2);
    for r in results {
        let location = r["location"].as_str().unwrap().to_lowercase();
        assert!(location.contains("london"), "unexpected location {location}");
        assert_eq!(r["job_seniority_level"], "Senior level");
        assert!(r.get("job_employment_type").is_some());
    }
    // The exact title match is boosted above the near miss.
    assert_eq!(results[0]["url"], "https://jobs.example/0");
}

#[tokio::test]
async fn test_jobs_search_employment_type() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = get_search(&base_url, &[("type", "jobs"), ("term", "react contract")]).await;
    let body: Value = resp.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["company"], "Initech");
}

#[tokio::test]
async fn test_jobs_search_no_matches() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = get_search(&base_url, &[("type", "jobs"), ("term", "astronaut in berlin")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["total"], 0);
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = client()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["documents"]["news"], 16);
    // The row without a company is dropped at load.
    assert_eq!(body["documents"]["jobs"], 4);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = client()
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_header() {
    let (base_url, _tmp) = spawn_app().await;
    let first = get_search(&base_url, &[("type", "news"), ("term", "rust")]).await;
    let second = get_search(&base_url, &[("type", "news")]).await;

    let a = first.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
    let b = second.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
    assert_eq!(a.len(), 36);
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_cors_headers() {
    let (base_url, _tmp) = spawn_app().await;
    let resp = client()
        .get(format!("{}/search", base_url))
        .query(&[("type", "news"), ("term", "rust")])
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}
