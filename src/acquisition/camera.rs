use std::{fmt, time::Duration};

use log::debug;

use crate::error::{Result, WetnessError};

const SNAPSHOT_PATH: &str = "/cgi-bin/snapshot.cgi?channel=1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A network camera exposing a CGI still-image endpoint behind HTTP basic auth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraEndpoint {
    host: String,
    credentials: Credentials,
}

impl CameraEndpoint {
    /// `host` is an address with optional port, e.g. `192.168.1.20` or `cam.local:8080`.
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            credentials,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn snapshot_url(&self) -> String {
        format!("http://{}{}", self.host, SNAPSHOT_PATH)
    }

    /// Downloads the current frame as raw encoded bytes.
    pub fn fetch_snapshot(&self) -> Result<Vec<u8>> {
        let url = self.snapshot_url();
        let failure = |e: reqwest::Error| WetnessError::acquisition(format!("camera {}", self.host), e);

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(failure)?;

        debug!("Requesting snapshot from {}", url);
        let response = client
            .get(&url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(failure)?;

        let bytes = response.bytes().map_err(failure)?;
        debug!("Received {} bytes from {}", bytes.len(), self.host);

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_url_keeps_port() {
        let endpoint = CameraEndpoint::new("10.0.0.5:8080", Credentials::new("admin", "pw"));
        assert_eq!(
            endpoint.snapshot_url(),
            "http://10.0.0.5:8080/cgi-bin/snapshot.cgi?channel=1"
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = Credentials::new("admin", "hunter2");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
