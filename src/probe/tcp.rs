//! TCP connect prober.

use std::time::Instant;
use tokio::net::TcpStream;
use tokio::time;

use super::{ProbeError, ProbeOutcome, Prober, Target};

/// Measures the time to complete a TCP handshake with the target.
///
/// The connection is dropped as soon as it is established.
#[derive(Debug, Clone, Default)]
pub struct TcpProber;

impl TcpProber {
    pub fn new() -> Self {
        Self
    }
}

impl Prober for TcpProber {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        let start = Instant::now();
        let connect = TcpStream::connect((target.host.as_str(), target.port));

        match time::timeout(target.timeout, connect).await {
            Ok(Ok(stream)) => {
                let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
                drop(stream);
                ProbeOutcome::Success { latency_ms }
            }
            Ok(Err(source)) => ProbeOutcome::Failure(ProbeError::Connect {
                addr: target.address(),
                source,
            }),
            Err(_) => ProbeOutcome::Failure(ProbeError::Timeout {
                addr: target.address(),
                timeout: target.timeout,
            }),
        }
    }
}
