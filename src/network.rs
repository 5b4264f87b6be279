//! Network identity lookups: public IP and local page reachability
//!
//! The public IP comes from the EC2 instance metadata service. IMDSv2
//! (session token) is tried first; instances that still allow IMDSv1 are
//! queried without a token as a fallback.

use std::net::IpAddr;
use std::time::Duration;

use crate::config::NetworkConfig;

const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";
const TOKEN_TTL_SECS: &str = "60";

/// Fact lookups that need the network
pub trait NetworkProbe {
    /// Public IPv4 address of this instance, if one can be determined
    fn public_ip(&self) -> Option<String>;

    /// Whether `url` answers with a success status
    fn page_reachable(&self, url: &str) -> bool;
}

/// Blocking client for the instance metadata service
pub struct MetadataClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl MetadataClient {
    pub fn new(config: &NetworkConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            endpoint: config.metadata_endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn token_url(&self) -> String {
        format!("{}/api/token", self.endpoint)
    }

    fn public_ip_url(&self) -> String {
        format!("{}/meta-data/public-ipv4", self.endpoint)
    }

    fn session_token(&self) -> Result<String, ureq::Error> {
        let token = self
            .agent
            .put(&self.token_url())
            .header(TOKEN_TTL_HEADER, TOKEN_TTL_SECS)
            .send_empty()?
            .body_mut()
            .read_to_string()?;
        Ok(token.trim().to_string())
    }

    fn fetch_public_ip(&self) -> Result<String, ureq::Error> {
        let url = self.public_ip_url();
        let request = self.agent.get(&url);

        let request = match self.session_token() {
            Ok(token) => request.header(TOKEN_HEADER, &token),
            Err(e) => {
                log::debug!("IMDSv2 token unavailable, trying IMDSv1: {e}");
                request
            }
        };

        request.call()?.body_mut().read_to_string()
    }
}

impl NetworkProbe for MetadataClient {
    fn public_ip(&self) -> Option<String> {
        match self.fetch_public_ip() {
            Ok(body) => parse_ip(&body),
            Err(e) => {
                log::warn!("could not retrieve public IP address: {e}");
                None
            }
        }
    }

    fn page_reachable(&self, url: &str) -> bool {
        match self.agent.get(url).call() {
            Ok(_) => true,
            Err(e) => {
                log::debug!("{url} not reachable: {e}");
                false
            }
        }
    }
}

/// Accept the body only if it is a bare IP address
fn parse_ip(body: &str) -> Option<String> {
    let trimmed = body.trim();
    trimmed.parse::<IpAddr>().ok().map(|ip| ip.to_string())
}
