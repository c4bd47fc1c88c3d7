use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        Self::spawn_with_env(&[])
    }

    /// Spawn with extra env vars layered over the test defaults, for suites
    /// that point the server at local stub endpoints.
    pub fn spawn_with_env(extra_env: &[(&str, String)]) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/sheetgate");
        cmd.env("SHEETGATE_PORT", port.to_string())
            // Point the directory at a closed port so directory fetches fail
            // fast instead of hitting the network from tests.
            .env("DIRECTORY_CSV_URL", "http://127.0.0.1:9/roster.csv")
            .env("GOOGLE_CLIENT_ID", "test-client-id.apps.googleusercontent.com")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        for (key, value) in extra_env {
            cmd.env(key, value);
        }

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// A dedicated server instance with custom env, killed on drop.
#[allow(dead_code)]
pub async fn start_with_env(extra_env: &[(&str, String)]) -> Result<TestServer> {
    let server = TestServer::spawn_with_env(extra_env)?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// A well-formed session cookie value, as the Session Issuer would write it.
/// The session is stateless JSON, so tests can mint one directly.
#[allow(dead_code)]
pub fn session_cookie(email: &str, data_link: Option<&str>) -> String {
    let session = serde_json::json!({
        "user": {
            "email": email,
            "name": "Test User",
            "picture": "",
            "dataLink": data_link,
        },
        "token": null,
    });
    format!("session={}", session)
}

/// True if any Set-Cookie header on the response clears the session cookie.
#[allow(dead_code)]
pub fn clears_session_cookie(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("session=") && (v.contains("Max-Age=0") || v.contains("session=;")))
}
