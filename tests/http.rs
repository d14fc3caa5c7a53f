use chrono::{Duration as ChronoDuration, FixedOffset, Utc};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct AchievedView {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TrackerView {
    id: String,
    title: String,
    display: String,
    achieved: Vec<AchievedView>,
    achieved_count: usize,
}

#[derive(Debug, Deserialize)]
struct TimerResponse {
    running: bool,
    start_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SavedTracker {
    id: String,
}

struct TestServer {
    base_url: String,
    data_path: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("proof_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/trackers")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_proof_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", &data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_path,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn list(client: &Client, server: &TestServer) -> Vec<TrackerView> {
    client
        .get(format!("{}/api/trackers", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn create(client: &Client, server: &TestServer, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{}/api/trackers", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

fn saved_ids(server: &TestServer) -> Vec<String> {
    let Ok(bytes) = std::fs::read(&server.data_path) else {
        return Vec::new();
    };
    let entries: BTreeMap<String, String> = serde_json::from_slice(&bytes).unwrap();
    match entries.get("proof-trackers") {
        Some(raw) => serde_json::from_str::<Vec<SavedTracker>>(raw)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect(),
        None => Vec::new(),
    }
}

#[tokio::test]
async fn http_create_now_starts_at_zero() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = create(&client, &server, serde_json::json!({ "title": "  NoFap " })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tracker: TrackerView = response.json().await.unwrap();

    assert_eq!(tracker.title, "NoFap");
    assert_eq!(tracker.display, "00d 00h 00m 00s");
    assert!(tracker.achieved.is_empty());
    assert!(list(&client, &server).await.iter().any(|t| t.id == tracker.id));
    assert!(saved_ids(&server).contains(&tracker.id));
}

#[tokio::test]
async fn http_past_start_reaches_milestones() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let start = Utc::now() - ChronoDuration::days(3) - ChronoDuration::seconds(1);
    let response = create(
        &client,
        &server,
        serde_json::json!({ "title": "Quit Smoking", "start": start.to_rfc3339() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tracker: TrackerView = response.json().await.unwrap();

    assert!(tracker.display.starts_with("03d 00h 00m 0"), "{}", tracker.display);
    assert_eq!(tracker.achieved_count, 5);
    let messages: Vec<&str> = tracker.achieved.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(messages.first(), Some(&"1 hour completed. Proof of initial control."));
    assert_eq!(messages.last(), Some(&"3 days. Momentum building."));
}

#[tokio::test]
async fn http_future_start_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let start = Utc::now() + ChronoDuration::hours(1);
    let response = create(
        &client,
        &server,
        serde_json::json!({ "title": "Time Traveller", "start": start.to_rfc3339() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Future dates not allowed");

    let trackers = list(&client, &server).await;
    assert!(trackers.iter().all(|t| t.title != "Time Traveller"));
}

#[tokio::test]
async fn http_past_start_keeps_the_browser_offset() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let east = FixedOffset::east_opt(3 * 3_600).unwrap();
    let half_hour_ago = (Utc::now() - ChronoDuration::minutes(30)).with_timezone(&east);

    let response = create(
        &client,
        &server,
        serde_json::json!({ "title": "Early Riser", "start": half_hour_ago.to_rfc3339() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tracker: TrackerView = response.json().await.unwrap();
    assert!(tracker.display.starts_with("00d 00h 30m"), "{}", tracker.display);

    let wall_clock = half_hour_ago.format("%Y-%m-%dT%H:%M").to_string();
    let response = create(
        &client,
        &server,
        serde_json::json!({ "title": "Zoneless", "start": wall_clock }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Invalid date");
}

#[tokio::test]
async fn http_blank_title_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = create(&client, &server, serde_json::json!({ "title": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Please enter a title");
}

#[tokio::test]
async fn http_reset_requires_confirmation() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let tracker: TrackerView = create(&client, &server, serde_json::json!({ "title": "Early Wake-up" }))
        .await
        .json()
        .await
        .unwrap();
    let reset_url = format!("{}/api/trackers/{}/reset", server.base_url, tracker.id);

    let response = client
        .post(&reset_url)
        .json(&serde_json::json!({ "confirm": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list(&client, &server).await.iter().any(|t| t.id == tracker.id));
    assert!(saved_ids(&server).contains(&tracker.id));

    let response = client
        .post(&reset_url)
        .json(&serde_json::json!({ "confirm": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(list(&client, &server).await.iter().all(|t| t.id != tracker.id));
    assert!(!saved_ids(&server).contains(&tracker.id));

    let response = client
        .post(&reset_url)
        .json(&serde_json::json!({ "confirm": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_milestone_table_and_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let milestones: Vec<serde_json::Value> = client
        .get(format!("{}/api/milestones", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(milestones.len(), 9);
    assert_eq!(milestones[0]["label"], "1 hour");
    assert_eq!(milestones[8]["threshold_secs"], 30 * 86_400);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Proof Tracker"));
    assert!(page.contains("30 days. Milestone achieved."));
}

#[tokio::test]
async fn http_single_timer_lifecycle() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let timer_url = format!("{}/api/timer", server.base_url);

    let started: TimerResponse = client.post(&timer_url).send().await.unwrap().json().await.unwrap();
    assert!(started.running);
    let again: TimerResponse = client.post(&timer_url).send().await.unwrap().json().await.unwrap();
    assert_eq!(again.start_time, started.start_time);

    let response = client
        .post(format!("{timer_url}/reset"))
        .json(&serde_json::json!({ "confirm": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let idle: TimerResponse = client.get(&timer_url).send().await.unwrap().json().await.unwrap();
    assert!(!idle.running);
    assert_eq!(idle.start_time, None);
}
