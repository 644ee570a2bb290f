use std::thread;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use super::consensus::{ChainFetcher, PeerChain};
use crate::error::FetchError;

/// Fetches `GET http://{peer}/chain` with a bounded timeout and optional retries.
///
/// Blocking: call it from a worker thread (e.g. `web::block`), never directly
/// on an async executor.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    timeout: Duration,
    retries: u32,
    backoff: Duration,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration, retries: u32, backoff: Duration) -> Self {
        Self {
            timeout,
            retries,
            backoff,
        }
    }

    fn fetch_once(&self, client: &Client, peer: &str) -> Result<PeerChain, FetchError> {
        let response = client
            .get(chain_url(peer))
            .send()
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<PeerChain>()
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

impl ChainFetcher for HttpChainFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError> {
        // Built per call so the client's runtime lives on this worker thread.
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let mut attempt = 0;
        loop {
            match self.fetch_once(&client, peer) {
                Ok(chain) => return Ok(chain),
                // a malformed body will not improve on retry
                Err(e @ FetchError::Malformed(_)) => return Err(e),
                Err(e) if attempt >= self.retries => return Err(e),
                Err(e) => {
                    attempt += 1;
                    debug!("FETCH - {peer} attempt {attempt} failed: {e}; retrying");
                    thread::sleep(self.backoff * attempt);
                }
            }
        }
    }
}

fn chain_url(peer: &str) -> String {
    format!("http://{peer}/chain")
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Unreachable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpChainFetcher, chain_url};
    use crate::error::FetchError;
    use crate::node::ChainFetcher;
    use std::net::TcpListener;
    use std::time::Duration;

    #[test]
    fn builds_chain_url_from_authority() {
        assert_eq!(chain_url("10.0.0.1:9000"), "http://10.0.0.1:9000/chain");
    }

    #[test]
    fn closed_port_is_unreachable() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let fetcher = HttpChainFetcher::new(Duration::from_millis(500), 1, Duration::from_millis(1));
        let result = fetcher.fetch_chain(&format!("127.0.0.1:{port}"));
        assert!(matches!(
            result,
            Err(FetchError::Unreachable(_)) | Err(FetchError::Timeout)
        ));
    }
}
