//! Raw access to the two dataset sources.
//!
//! `HttpFetcher` reads `http(s)://` locations through a blocking `reqwest`
//! client and anything else from the local filesystem. The `Fetch` trait is the
//! seam the loader is generic over, so a cache can be driven by in-memory
//! fixtures in tests.
//!
//! ### Notes
//! - Transient failures (5xx, network errors) are retried three times with a
//!   short backoff; 4xx responses fail immediately.
//! - Timeouts: 30s total, 10s connect.
//!
//! Typical usage:
//! ```no_run
//! # use wpop_rs::fetch::{Fetch, HttpFetcher};
//! let body = HttpFetcher::default().fetch("data/world_population.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::is_remote;
use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Returns the full text body stored at `location`.
pub trait Fetch {
    fn fetch(&self, location: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: HttpClient,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("wpop_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { http })
    }

    fn get_text(&self, url: &str) -> Result<String> {
        with_retry(&BACKOFF_MS, || match self.http.get(url).send() {
            Ok(r) if r.status().is_success() => match r.text() {
                Ok(body) => Attempt::Done(body),
                Err(e) => Attempt::Fail(anyhow::Error::new(e).context("read response body")),
            },
            Ok(r) if r.status().is_server_error() => {
                log::debug!("GET {} -> HTTP {}, retrying", url, r.status());
                Attempt::Retry(anyhow!("request failed with HTTP {}", r.status()))
            }
            Ok(r) => Attempt::Fail(anyhow!("request failed with HTTP {}", r.status())),
            Err(e) => Attempt::Retry(anyhow::Error::new(e).context("network error")),
        })
    }
}

/// Pause after each failed attempt except the last.
const BACKOFF_MS: [u64; 3] = [100, 300, 700];

enum Attempt<T> {
    Done(T),
    /// Transient; try again if attempts remain.
    Retry(anyhow::Error),
    Fail(anyhow::Error),
}

/// Run `attempt` once per backoff step until it succeeds or fails for good.
/// The error of the last transient failure is kept.
fn with_retry<T>(backoff_ms: &[u64], mut attempt: impl FnMut() -> Attempt<T>) -> Result<T> {
    let mut last_err = None;
    for (i, &ms) in backoff_ms.iter().enumerate() {
        match attempt() {
            Attempt::Done(v) => return Ok(v),
            Attempt::Fail(e) => return Err(e),
            Attempt::Retry(e) => last_err = Some(e),
        }
        if i + 1 < backoff_ms.len() {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
    let err = last_err.unwrap_or_else(|| anyhow!("no attempts made"));
    Err(err.context(format!("giving up after {} attempts", backoff_ms.len())))
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new().expect("reqwest client build")
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<String> {
        if is_remote(location) {
            log::info!("fetching {}", location);
            self.get_text(location)
                .with_context(|| format!("GET {}", location))
        } else {
            log::info!("reading {}", location);
            std::fs::read_to_string(location).with_context(|| format!("read {}", location))
        }
    }
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, location: &str) -> Result<String> {
        (**self).fetch(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_local_files() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("a.csv");
        std::fs::write(&p, "x,y\n1,2\n").unwrap();
        let body = HttpFetcher::default().fetch(p.to_str().unwrap()).unwrap();
        assert_eq!(body, "x,y\n1,2\n");
    }

    #[test]
    fn retry_keeps_last_transient_error_and_skips_final_sleep() {
        let mut calls = 0;
        let started = std::time::Instant::now();
        let err = with_retry::<()>(&[0, 0, 30_000], || {
            calls += 1;
            Attempt::Retry(anyhow!("request failed with HTTP 503 Service Unavailable"))
        })
        .unwrap_err();
        assert_eq!(calls, 3);
        assert!(started.elapsed() < Duration::from_secs(5));
        let msg = format!("{:#}", err);
        assert!(msg.contains("giving up after 3 attempts"), "{msg}");
        assert!(msg.contains("HTTP 503"), "{msg}");
    }

    #[test]
    fn retry_stops_on_success_or_hard_failure() {
        let mut calls = 0;
        let v = with_retry(&[0, 0, 0], || {
            calls += 1;
            if calls < 2 {
                Attempt::Retry(anyhow!("flaky"))
            } else {
                Attempt::Done(calls)
            }
        })
        .unwrap();
        assert_eq!(v, 2);

        let mut calls = 0;
        let err = with_retry::<()>(&[0, 0, 0], || {
            calls += 1;
            Attempt::Fail(anyhow!("request failed with HTTP 404 Not Found"))
        })
        .unwrap_err();
        assert_eq!(calls, 1);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn missing_file_is_an_error_with_location() {
        let err = HttpFetcher::default()
            .fetch("/definitely/not/here.geojson")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.geojson"));
    }
}
