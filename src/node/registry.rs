use std::collections::HashSet;

use url::Url;

use crate::error::LedgerError;

/// Known peer addresses (`host:port`), deduplicated, iterated in the order
/// they were first registered.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer. Re-registering a known address is a no-op.
    pub fn register(&mut self, address: &str) -> Result<(), LedgerError> {
        let normalized = normalize_address(address)?;
        if self.seen.insert(normalized.clone()) {
            self.order.push(normalized);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn contains(&self, address: &str) -> bool {
        self.seen.contains(address)
    }

    /// Peers in registration order.
    pub fn peers(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Reduce an address to the `host[:port]` authority used to reach the peer.
///
/// `http://10.0.0.1:9000/` and `10.0.0.1:9000/` both become `10.0.0.1:9000`.
pub fn normalize_address(address: &str) -> Result<String, LedgerError> {
    let invalid = || LedgerError::InvalidAddress(address.to_string());
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if trimmed.contains("://") {
        let url = Url::parse(trimmed).map_err(|_| invalid())?;
        return authority(&url).ok_or_else(invalid);
    }

    // Bare form: it must parse as the authority of a URL with nothing after it.
    let as_url = Url::parse(&format!("http://{trimmed}")).map_err(|_| invalid())?;
    let usable = as_url.path() == "/"
        && as_url.query().is_none()
        && as_url.fragment().is_none()
        && as_url.username().is_empty()
        && as_url.password().is_none();
    if !usable {
        return Err(invalid());
    }
    authority(&as_url).ok_or_else(invalid)
}

fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
