//! Service health check for startup verification.
//!
//! Runs before the interactive session starts, and on its own with
//! `--health`.

use crate::client::ChatClient;
use crate::traits::HttpClient;

/// Result of health check operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckResult {
    pub service_healthy: bool,
    pub response_time_ms: Option<u64>,
    /// Welcome message from the service root, when it answers
    pub service_message: Option<String>,
    pub error_message: Option<String>,
}

/// Check `/health`, then fetch the root message if the service is up.
pub async fn run_health_check<H: HttpClient>(client: &ChatClient<H>) -> HealthCheckResult {
    let mut result = HealthCheckResult {
        service_healthy: false,
        response_time_ms: None,
        service_message: None,
        error_message: None,
    };

    let start = std::time::Instant::now();
    match client.health_check().await {
        Ok(healthy) => {
            result.service_healthy = healthy;
            result.response_time_ms = Some(start.elapsed().as_millis() as u64);
        }
        Err(err) => {
            tracing::warn!(code = err.error_code(), error = %err, "Health check failed");
            result.error_message = Some(err.user_message());
            return result;
        }
    }

    if !result.service_healthy {
        result.error_message = Some("The chat service reported it is not healthy.".to_string());
        return result;
    }

    // The root message is informational only
    match client.service_info().await {
        Ok(info) => result.service_message = Some(info.message),
        Err(err) => tracing::debug!(error = %err, "Service info unavailable"),
    }

    result
}

/// Print health check results to stdout
pub fn display_health_check_results(result: &HealthCheckResult, base_url: &str) {
    if result.service_healthy {
        match result.response_time_ms {
            Some(ms) => println!("✓ Chat service at {} is healthy ({}ms)", base_url, ms),
            None => println!("✓ Chat service at {} is healthy", base_url),
        }
        if let Some(message) = &result.service_message {
            println!("  {}", message);
        }
    } else {
        println!("✗ Chat service at {} is unavailable", base_url);
        if let Some(message) = &result.error_message {
            println!("  {}", message);
        }
    }
}
