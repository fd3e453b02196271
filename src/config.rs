use std::str::FromStr;
use std::time::Duration;

/// Endpoint the dashboard reads when nothing else is configured.
pub const DEFAULT_DATA_URL: &str = "https://dashboard-one-delta-61.vercel.app/";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// JSON endpoint returning the full dataset (`DASHBOARD_DATA_URL`).
    pub data_url: String,
    /// Overall request timeout (`DASHBOARD_TIMEOUT_SECS`).
    pub timeout: Duration,
    /// Height of every chart in points (`DASHBOARD_CHART_HEIGHT`).
    pub chart_height: f32,
    /// Upper bound for the per-record chart width (`DASHBOARD_MAX_CHART_WIDTH`).
    pub max_chart_width: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            timeout: Duration::from_secs(30),
            chart_height: 400.0,
            max_chart_width: 5000.0,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or invalid values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_url = lookup("DASHBOARD_DATA_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.data_url);
        let timeout_secs: u64 =
            parse_or("DASHBOARD_TIMEOUT_SECS", &lookup, defaults.timeout.as_secs());

        Self {
            data_url,
            timeout: Duration::from_secs(timeout_secs.max(1)),
            chart_height: parse_or("DASHBOARD_CHART_HEIGHT", &lookup, defaults.chart_height),
            max_chart_width: parse_or(
                "DASHBOARD_MAX_CHART_WIDTH",
                &lookup,
                defaults.max_chart_width,
            ),
        }
    }

    /// Horizontal room for per-record charts: 100 points per record, capped.
    pub fn chart_width(&self, records: usize) -> f32 {
        (records as f32 * 100.0).min(self.max_chart_width)
    }
}

fn parse_or<T: FromStr + Copy>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {key}={raw:?}");
            default
        }),
    }
}
