//! Deployment health checks
//!
//! Probes a running server over HTTP and reports one outcome per check.
//! A failing check is recorded and the remaining checks still run.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Result of a single probe
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub detail: String,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub base_url: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Human-readable report, one line per check
    pub fn render_text(&self) -> String {
        let mut out = format!("Checking {}\n", self.base_url);
        for outcome in &self.outcomes {
            let mark = if outcome.passed { "PASS" } else { "FAIL" };
            let status = outcome
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "---".to_string());
            out.push_str(&format!(
                "  [{}] {:<10} {} {:>5}ms  {}\n",
                mark, outcome.name, status, outcome.elapsed_ms, outcome.detail
            ));
        }
        out
    }
}

/// Outcome of a probe before timing is attached
struct Probe {
    status: Option<StatusCode>,
    result: std::result::Result<String, String>,
}

impl Probe {
    fn fail(status: Option<StatusCode>, detail: impl Into<String>) -> Self {
        Self {
            status,
            result: Err(detail.into()),
        }
    }

    fn pass(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            result: Ok(detail.into()),
        }
    }
}

pub struct HealthChecker {
    client: Client,
    base_url: String,
}

impl HealthChecker {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("citynav-check/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::invalid_argument(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run every check in order
    pub async fn run(&self) -> CheckReport {
        let mut outcomes = Vec::with_capacity(3);

        outcomes.push(self.timed("health", self.check_health()).await);

        let start = Instant::now();
        let (probe, place_ids) = self.check_locations().await;
        outcomes.push(finish("locations", probe, start));

        outcomes.push(self.timed("routes", self.check_route(&place_ids)).await);

        CheckReport {
            base_url: self.base_url.clone(),
            outcomes,
        }
    }

    async fn timed(
        &self,
        name: &'static str,
        probe: impl std::future::Future<Output = Probe>,
    ) -> CheckOutcome {
        let start = Instant::now();
        let probe = probe.await;
        finish(name, probe, start)
    }

    async fn check_health(&self) -> Probe {
        let (status, body) = match self.get_json("/health").await {
            Ok(ok) => ok,
            Err(probe) => return probe,
        };

        match body.get("status").and_then(Value::as_str) {
            Some("healthy") => {
                let version = body.get("version").and_then(Value::as_str).unwrap_or("?");
                Probe::pass(status, format!("healthy (version {})", version))
            }
            Some(other) => Probe::fail(Some(status), format!("reported status '{}'", other)),
            None => Probe::fail(Some(status), "response has no status field"),
        }
    }

    async fn check_locations(&self) -> (Probe, Vec<String>) {
        let (status, body) = match self.get_json("/api/locations").await {
            Ok(ok) => ok,
            Err(probe) => return (probe, Vec::new()),
        };

        let Some(places) = body.as_array() else {
            return (
                Probe::fail(Some(status), "expected a JSON array of places"),
                Vec::new(),
            );
        };
        if places.is_empty() {
            return (Probe::fail(Some(status), "no places returned"), Vec::new());
        }

        let ids: Vec<String> = places
            .iter()
            .filter_map(|p| p.get("id").and_then(Value::as_str).map(str::to_string))
            .collect();

        (
            Probe::pass(status, format!("{} places", places.len())),
            ids,
        )
    }

    async fn check_route(&self, place_ids: &[String]) -> Probe {
        let [from, to, ..] = place_ids else {
            return Probe::fail(None, "need at least two places to request a route");
        };

        let url = format!("{}/api/routes", self.base_url);
        let payload = json!({
            "from": { "place_id": from },
            "to": { "place_id": to },
        });

        let response = match self.client.post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => return Probe::fail(None, format!("request failed: {}", e)),
        };

        let (status, body) = match read_json(response).await {
            Ok(ok) => ok,
            Err(probe) => return probe,
        };

        match body.get("distance_km").and_then(Value::as_f64) {
            Some(d) if d >= 0.0 => Probe::pass(status, format!("{} -> {}: {:.2} km", from, to, d)),
            Some(d) => Probe::fail(Some(status), format!("negative distance {}", d)),
            None => Probe::fail(Some(status), "response has no distance_km field"),
        }
    }

    async fn get_json(&self, path: &str) -> std::result::Result<(StatusCode, Value), Probe> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Probe::fail(None, format!("request failed: {}", e)))?;
        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> std::result::Result<(StatusCode, Value), Probe> {
    let status = response.status();
    if !status.is_success() {
        return Err(Probe::fail(Some(status), format!("unexpected status {}", status)));
    }
    let body = response
        .json::<Value>()
        .await
        .map_err(|e| Probe::fail(Some(status), format!("invalid JSON body: {}", e)))?;
    Ok((status, body))
}

fn finish(name: &'static str, probe: Probe, start: Instant) -> CheckOutcome {
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = probe.status.map(|s| s.as_u16());

    match probe.result {
        Ok(detail) => {
            tracing::debug!(check = name, ?status, elapsed_ms, "Check passed");
            CheckOutcome {
                name,
                passed: true,
                status,
                detail,
                elapsed_ms,
            }
        }
        Err(detail) => {
            tracing::warn!(check = name, ?status, elapsed_ms, %detail, "Check failed");
            CheckOutcome {
                name,
                passed: false,
                status,
                detail,
                elapsed_ms,
            }
        }
    }
}
