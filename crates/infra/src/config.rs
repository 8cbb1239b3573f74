use helsa_notify_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Url of the external push transport provider that delivers
    /// notifications to user devices
    pub push_gateway_url: String,
    /// Secret attached to every push delivery request so the gateway
    /// can authenticate this service
    pub push_gateway_key: String,
    /// Timeout in millis for a single push delivery attempt. A timed
    /// out delivery counts as a transport failure and is retried by
    /// the job dispatcher.
    pub push_timeout_millis: u64,
    /// Interval in seconds between job dispatcher poll ticks
    pub job_poll_interval_secs: u64,
}

const DEFAULT_PORT: &str = "5000";
const DEFAULT_PUSH_GATEWAY_URL: &str = "http://localhost:8100/api/v1/push";
const DEFAULT_PUSH_TIMEOUT_MILLIS: u64 = 5000;
const DEFAULT_JOB_POLL_INTERVAL_SECS: u64 = 30;

impl Config {
    pub fn new() -> Self {
        let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, DEFAULT_PORT
                );
                DEFAULT_PORT.parse::<usize>().unwrap()
            }
        };
        let push_gateway_url = match std::env::var("PUSH_GATEWAY_URL") {
            Ok(url) => url,
            Err(_) => {
                warn!(
                    "Did not find PUSH_GATEWAY_URL environment variable. Falling back to: {}.",
                    DEFAULT_PUSH_GATEWAY_URL
                );
                DEFAULT_PUSH_GATEWAY_URL.into()
            }
        };
        let push_gateway_key = match std::env::var("PUSH_GATEWAY_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find PUSH_GATEWAY_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!("Push gateway key was generated and set to: {}", key);
                key
            }
        };
        let push_timeout_millis = std::env::var("PUSH_TIMEOUT_MILLIS")
            .ok()
            .and_then(|timeout| timeout.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PUSH_TIMEOUT_MILLIS);
        let job_poll_interval_secs = std::env::var("JOB_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|interval| interval.parse::<u64>().ok())
            .unwrap_or(DEFAULT_JOB_POLL_INTERVAL_SECS);

        Self {
            port,
            push_gateway_url,
            push_gateway_key,
            push_timeout_millis,
            job_poll_interval_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
