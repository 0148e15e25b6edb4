//! Datadog DogStatsD client
//!
//! Sends metrics to a Datadog agent (or any statsd server that accepts the
//! DogStatsD tag extension) using raw UDP sockets.
//!
//! ## Design
//! - **Raw UDP sockets** - one datagram per emission, no buffering
//! - **Non-blocking** - a full socket buffer drops the metric instead of
//!   stalling the caller
//! - **Best-effort delivery** - UDP is fire-and-forget, no retry logic
//! - **Tag support** - client-wide tags first, then per-metric tags
//! - **Client-side sampling** - rates below 1.0 drop emissions randomly and
//!   annotate the rest so the agent scales them back up
//!
//! ## DogStatsD Protocol
//! ```text
//! <NAMESPACE><METRIC_NAME>:<VALUE>|<TYPE>|@<SAMPLE_RATE>|#<TAG1>:<VALUE1>,<TAG2>:<VALUE2>
//! ```
//!
//! Examples:
//! - Counter: `hystrix.attempts:12|c|#hystrixcircuit:payments`
//! - Gauge: `hystrix.circuitOpen:1|g|#hystrixcircuit:payments`
//! - Timer: `hystrix.runDuration:37|ms|#hystrixcircuit:payments`

use std::fmt::{Display, Write as _};
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::Arc;

use circuitstat_core::{datadog_collector_factory, CollectorFactory, MetricsClientPort};
use circuitstat_domain::constants::DEFAULT_STATSD_ADDR;
use circuitstat_domain::{MetricTag, Result, StatsdConfig};

use crate::observability::{MetricsError, MetricsResult};

/// Default Datadog agent address (DogStatsD default port)
pub const DEFAULT_DATADOG_ADDR: &str = DEFAULT_STATSD_ADDR;

/// Environment variables mapped onto client-wide tags
const ENV_TAGS: [(&str, &str); 3] =
    [("DD_ENV", "env"), ("DD_SERVICE", "service"), ("DD_VERSION", "version")];

/// Datadog DogStatsD client using raw UDP sockets
///
/// Thread-safe: sending only needs `&self`, so one client is shared by every
/// collector in the process.
#[derive(Debug)]
pub struct DatadogClient {
    /// UDP socket for sending metrics
    socket: UdpSocket,
    /// Datadog agent address
    agent_addr: SocketAddr,
    /// Prepended verbatim to every metric name (e.g. "checkout.")
    namespace: String,
    /// Tags applied to all metrics, already rendered as `key:value`
    default_tags: Vec<String>,
}

impl DatadogClient {
    /// Create a client for the local agent with no namespace.
    ///
    /// Picks up `env`/`service`/`version` tags from `DD_ENV`, `DD_SERVICE`
    /// and `DD_VERSION`.
    ///
    /// # Errors
    /// Fails if no local UDP socket can be bound.
    pub fn new() -> MetricsResult<Self> {
        Self::from_config(&StatsdConfig::default())
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Fails if the address is empty, cannot be resolved, or no local UDP
    /// socket can be bound. Nothing is sent at construction time, so an
    /// agent that is not running is not an error.
    pub fn from_config(config: &StatsdConfig) -> MetricsResult<Self> {
        let agent_addr = resolve_agent(&config.address)?;
        let mut client = Self::with_config(&config.prefix, agent_addr)?;

        if config.inherit_env_tags {
            for (var, key) in ENV_TAGS {
                if let Ok(value) = std::env::var(var) {
                    client.add_default_tag(key, &value);
                }
            }
        }
        client.default_tags.extend(config.global_tags.iter().cloned());

        tracing::debug!(
            agent = %client.agent_addr,
            namespace = %client.namespace,
            tags = ?client.default_tags,
            "DogStatsD client ready"
        );
        Ok(client)
    }

    /// Create a client with an explicit namespace and agent address and no
    /// client-wide tags.
    ///
    /// # Errors
    /// Returns `SocketSetup` if the socket cannot be bound or made
    /// non-blocking.
    pub fn with_config(namespace: &str, agent_addr: SocketAddr) -> MetricsResult<Self> {
        // Bind to any available port (OS will assign), same family as the agent
        let bind_addr = if agent_addr.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket =
            UdpSocket::bind(bind_addr).map_err(|source| MetricsError::SocketSetup { source })?;

        // Set non-blocking to avoid blocking on send
        socket.set_nonblocking(true).map_err(|source| MetricsError::SocketSetup { source })?;

        Ok(Self { socket, agent_addr, namespace: namespace.to_string(), default_tags: Vec::new() })
    }

    /// Add a default tag applied to all metrics
    pub fn add_default_tag(&mut self, key: &str, value: &str) {
        self.default_tags.push(format!("{key}:{value}"));
    }

    /// Agent the client sends to
    #[must_use]
    pub const fn agent_addr(&self) -> SocketAddr {
        self.agent_addr
    }

    /// Namespace prepended to metric names
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Client-wide tags in `key:value` form
    #[must_use]
    pub fn default_tags(&self) -> &[String] {
        &self.default_tags
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Sample, format, and send one metric
    fn send_metric<V: Display>(
        &self,
        name: &str,
        value: V,
        metric_type: &str,
        tags: &[MetricTag],
        sample_rate: f64,
    ) -> MetricsResult<()> {
        // Draws are in [0, 1), so a rate of 0.0 drops every emission
        if sample_rate < 1.0 && rand::random::<f64>() >= sample_rate {
            return Ok(());
        }

        let metric = self.format_metric(name, value, metric_type, tags, sample_rate);

        // Send via UDP (non-blocking, best-effort)
        match self.socket.send_to(metric.as_bytes(), self.agent_addr) {
            Ok(_) => {
                tracing::trace!(%metric, "Sent metric to DogStatsD agent");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                // Non-blocking socket would block, drop metric
                tracing::debug!(metric = %name, error = %e, "Dropped metric: send would block");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(metric = %name, error = %e, "Failed to send metric");
                Err(MetricsError::SendFailed { source: e })
            }
        }
    }

    /// Render `<namespace><name>:<value>|<type>[|@<rate>][|#<tags>]`
    fn format_metric<V: Display>(
        &self,
        name: &str,
        value: V,
        metric_type: &str,
        tags: &[MetricTag],
        sample_rate: f64,
    ) -> String {
        let mut metric = format!("{}{}:{}|{}", self.namespace, name, value, metric_type);

        if sample_rate < 1.0 {
            let _ = write!(metric, "|@{sample_rate}");
        }

        if !self.default_tags.is_empty() || !tags.is_empty() {
            metric.push_str("|#");
            let rendered = self
                .default_tags
                .iter()
                .cloned()
                .chain(tags.iter().map(MetricTag::to_string))
                .collect::<Vec<_>>()
                .join(",");
            metric.push_str(&rendered);
        }

        metric
    }
}

impl MetricsClientPort for DatadogClient {
    fn count(&self, name: &str, value: i64, tags: &[MetricTag], sample_rate: f64) -> Result<()> {
        Ok(self.send_metric(name, value, "c", tags, sample_rate)?)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[MetricTag], sample_rate: f64) -> Result<()> {
        Ok(self.send_metric(name, value, "g", tags, sample_rate)?)
    }

    fn timing(
        &self,
        name: &str,
        value_ms: f64,
        tags: &[MetricTag],
        sample_rate: f64,
    ) -> Result<()> {
        Ok(self.send_metric(name, value_ms, "ms", tags, sample_rate)?)
    }
}

/// Build a collector factory backed by a new [`DatadogClient`].
///
/// Every collector produced by the factory shares the one client.
///
/// # Example
/// ```no_run
/// use circuitstat_core::CollectorRegistry;
/// use circuitstat_domain::StatsdConfig;
/// use circuitstat_infra::new_datadog_collector;
///
/// let config = StatsdConfig { prefix: "checkout.".into(), ..StatsdConfig::default() };
/// let registry = CollectorRegistry::new();
/// registry.register(new_datadog_collector(&config)?);
/// # Ok::<(), circuitstat_domain::CircuitStatError>(())
/// ```
///
/// # Errors
/// Returns the construction failure of the client: `InvalidInput` for an
/// empty address, `Network` when it cannot be resolved or no socket can be
/// bound.
pub fn new_datadog_collector(config: &StatsdConfig) -> Result<CollectorFactory> {
    let client = DatadogClient::from_config(config)?;
    tracing::info!(
        agent = %client.agent_addr(),
        namespace = %client.namespace(),
        "Datadog collector factory created"
    );
    Ok(datadog_collector_factory(Arc::new(client)))
}

fn resolve_agent(address: &str) -> MetricsResult<SocketAddr> {
    let address = address.trim();
    if address.is_empty() {
        return Err(MetricsError::MissingAddress);
    }

    address
        .to_socket_addrs()
        .map_err(|e| MetricsError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?
        .next()
        .ok_or_else(|| MetricsError::InvalidAddress {
            address: address.to_string(),
            reason: "resolved to no addresses".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn local_client(namespace: &str) -> DatadogClient {
        let addr: SocketAddr = "127.0.0.1:8125".parse().unwrap();
        DatadogClient::with_config(namespace, addr).unwrap()
    }

    fn circuit_tag() -> Vec<MetricTag> {
        vec![MetricTag::new("hystrixcircuit", "payments")]
    }

    #[test]
    fn test_datadog_client_creation() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        // Should not fail even if the agent is not running
        let client = DatadogClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_format_counter_with_tag() {
        let client = local_client("");
        let line = client.format_metric("hystrix.attempts", 12_i64, "c", &circuit_tag(), 1.0);
        assert_eq!(line, "hystrix.attempts:12|c|#hystrixcircuit:payments");
    }

    #[test]
    fn test_format_whole_float_has_no_fraction() {
        let client = local_client("");
        let gauge = client.format_metric("hystrix.circuitOpen", 1.0_f64, "g", &[], 1.0);
        assert_eq!(gauge, "hystrix.circuitOpen:1|g");

        let timer = client.format_metric("hystrix.runDuration", 37.0_f64, "ms", &[], 1.0);
        assert_eq!(timer, "hystrix.runDuration:37|ms");
    }

    #[test]
    fn test_format_prepends_namespace_verbatim() {
        let client = local_client("checkout.");
        let line = client.format_metric("hystrix.errors", 1_i64, "c", &[], 1.0);
        assert_eq!(line, "checkout.hystrix.errors:1|c");
    }

    #[test]
    fn test_format_sample_rate_only_below_one() {
        let client = local_client("");
        let sampled = client.format_metric("hystrix.attempts", 3_i64, "c", &circuit_tag(), 0.5);
        assert_eq!(sampled, "hystrix.attempts:3|c|@0.5|#hystrixcircuit:payments");
    }

    #[test]
    fn test_default_tags_precede_metric_tags() {
        let mut client = local_client("");
        client.add_default_tag("env", "prod");
        client.add_default_tag("region", "eu-west-1");

        let line = client.format_metric("hystrix.timeouts", 2_i64, "c", &circuit_tag(), 1.0);
        assert_eq!(line, "hystrix.timeouts:2|c|#env:prod,region:eu-west-1,hystrixcircuit:payments");
    }

    #[test]
    fn test_from_config_applies_prefix_and_global_tags() {
        let config = StatsdConfig {
            address: "127.0.0.1:9125".to_string(),
            prefix: "orders.".to_string(),
            global_tags: vec!["team:core".to_string()],
            inherit_env_tags: false,
        };

        let client = DatadogClient::from_config(&config).unwrap();

        assert_eq!(client.namespace(), "orders.");
        assert_eq!(client.agent_addr().port(), 9125);
        assert_eq!(client.default_tags(), ["team:core".to_string()]);
    }

    #[test]
    fn test_empty_address_is_rejected() {
        let config = StatsdConfig { address: "  ".to_string(), ..StatsdConfig::default() };
        let err = DatadogClient::from_config(&config).unwrap_err();
        assert!(matches!(err, MetricsError::MissingAddress));
    }

    #[test]
    fn test_address_without_port_is_rejected() {
        let config = StatsdConfig { address: "127.0.0.1".to_string(), ..StatsdConfig::default() };
        let err = DatadogClient::from_config(&config).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidAddress { .. }));
    }

    #[test]
    fn test_factory_construction_failure_is_surfaced() {
        let config = StatsdConfig { address: String::new(), ..StatsdConfig::default() };
        let err = new_datadog_collector(&config).err().unwrap();
        assert!(matches!(err, circuitstat_domain::CircuitStatError::InvalidInput(_)));
    }

    #[test]
    fn test_from_config_inherits_datadog_env_tags_before_global_tags() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var("DD_ENV", "prod");
        std::env::set_var("DD_SERVICE", "svc");
        std::env::remove_var("DD_VERSION");

        let config = StatsdConfig {
            global_tags: vec!["team:core".to_string()],
            inherit_env_tags: true,
            ..StatsdConfig::default()
        };
        let result = DatadogClient::from_config(&config);
        std::env::remove_var("DD_ENV");
        std::env::remove_var("DD_SERVICE");

        let client = result.unwrap();
        assert_eq!(client.default_tags().to_vec(), vec!["env:prod", "service:svc", "team:core"]);
    }

    #[test]
    fn test_zero_sample_rate_drops_without_error() {
        let client = local_client("");
        for _ in 0..20 {
            assert!(client.count("hystrix.attempts", 1, &circuit_tag(), 0.0).is_ok());
        }
    }
}