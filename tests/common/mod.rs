//! Shared fakes and mock servers for integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use net_monitor::monitor::{Monitor, MonitorHandle};
use net_monitor::probe::{ProbeError, ProbeOutcome, Prober, Target};
use net_monitor::sink::{MetricsSink, Point, SinkError};

/// Scripted result of one probe call.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Up(f64),
    Refused,
}

/// Prober that replays a script; the last step repeats forever.
pub struct ScriptedProber {
    steps: Vec<Step>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
    stop_after: Option<usize>,
    handle: Arc<OnceLock<MonitorHandle>>,
}

impl ScriptedProber {
    pub fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty());
        Self {
            steps,
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
            stop_after: None,
            handle: Arc::new(OnceLock::new()),
        }
    }

    /// Simulated connect time, during which the probe is in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Request a stop from inside the n-th probe call (1-based).
    pub fn stop_after(mut self, n: usize) -> Self {
        self.stop_after = Some(n);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn handle_slot(&self) -> Arc<OnceLock<MonitorHandle>> {
        self.handle.clone()
    }
}

impl Prober for ScriptedProber {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stop_after == Some(call + 1) {
            if let Some(handle) = self.handle.get() {
                handle.stop();
            }
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.steps[call.min(self.steps.len() - 1)] {
            Step::Up(latency_ms) => ProbeOutcome::Success { latency_ms },
            Step::Refused => ProbeOutcome::Failure(refused(target)),
        }
    }
}

pub fn refused(target: &Target) -> ProbeError {
    ProbeError::Connect {
        addr: target.address(),
        source: io::Error::from(io::ErrorKind::ConnectionRefused),
    }
}

/// Sink that keeps every accepted point in memory.
#[derive(Clone, Default)]
pub struct RecordingSink {
    points: Arc<Mutex<Vec<Point>>>,
    reject: Arc<AtomicBool>,
}

impl RecordingSink {
    pub fn rejecting() -> Self {
        let sink = Self::default();
        sink.set_rejecting(true);
        sink
    }

    pub fn set_rejecting(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    pub fn points(&self) -> Vec<Point> {
        self.points.lock().clone()
    }

    pub fn measurements(&self) -> Vec<String> {
        self.points
            .lock()
            .iter()
            .map(|p| p.measurement().to_string())
            .collect()
    }
}

impl MetricsSink for RecordingSink {
    async fn write(&self, point: &Point) -> Result<(), SinkError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected {
                status: 503,
                body: "backend unavailable".into(),
            });
        }
        self.points.lock().push(point.clone());
        Ok(())
    }
}

pub fn target(interval: Duration) -> Target {
    Target::new("example.invalid", 9999, Duration::from_secs(1), interval)
}

/// Build a monitor whose prober can stop it.
pub fn scripted_monitor(
    prober: ScriptedProber,
    sink: RecordingSink,
    interval: Duration,
) -> Arc<Monitor<ScriptedProber, RecordingSink>> {
    let slot = prober.handle_slot();
    let monitor = Arc::new(Monitor::new(target(interval), prober, sink));
    let _ = slot.set(monitor.handle());
    monitor
}

/// Run the monitor to completion, failing the test if it never stops.
pub async fn run_to_completion(monitor: Arc<Monitor<ScriptedProber, RecordingSink>>) {
    tokio::time::timeout(Duration::from_secs(10), async move { monitor.run().await })
        .await
        .expect("monitor loop did not stop");
}

/// Poll `cond` until it holds or a second elapses.
pub async fn wait_for<F: Fn() -> bool>(cond: F) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

/// A request captured by the mock write endpoint.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Start a mock InfluxDB write endpoint answering every request with
/// `status` and recording what it received.
pub async fn start_mock_influx(
    status: u16,
    response_body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<CapturedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        sink.lock().push(request);

                        let status_text = match status {
                            204 => "204 No Content",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            response_body.len(),
                            response_body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}
