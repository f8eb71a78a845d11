//! Visibility filters
//!
//! A [`FilterState`] is a plain value: the graph is rebuilt from scratch
//! every time it changes, so it carries no memory of earlier states.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::location::LocationKind;
use crate::Provider;

/// Latency band post-filter applied when a graph is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyRange {
    /// Keep every connection
    #[default]
    All,
    /// Keep `latency < 50`
    Low,
    /// Keep `50 <= latency <= 150`
    Medium,
    /// Keep `latency > 150`
    High,
}

impl LatencyRange {
    /// Every band, in display order
    pub const ALL: [LatencyRange; 4] = [Self::All, Self::Low, Self::Medium, Self::High];

    /// Whether a latency falls inside this band
    ///
    /// 50 belongs to `Medium` only; 150 belongs to `Medium` only.
    pub fn matches(&self, latency_ms: u32) -> bool {
        match self {
            Self::All => true,
            Self::Low => latency_ms < 50,
            Self::Medium => (50..=150).contains(&latency_ms),
            Self::High => latency_ms > 150,
        }
    }

    /// Get the wire name
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for LatencyRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown latency range: {}", s))
    }
}

/// Which points and connections are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Show AWS-hosted exchanges and AWS regions
    pub aws_enabled: bool,
    /// Show GCP-hosted exchanges and GCP regions
    pub gcp_enabled: bool,
    /// Show Azure-hosted exchanges and Azure regions
    pub azure_enabled: bool,
    /// Show exchanges at all
    pub show_exchanges: bool,
    /// Show regions at all
    pub show_regions: bool,
    /// Latency band post-filter
    pub latency_range: LatencyRange,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            aws_enabled: true,
            gcp_enabled: true,
            azure_enabled: true,
            show_exchanges: true,
            show_regions: true,
            latency_range: LatencyRange::All,
        }
    }
}

impl FilterState {
    /// Whether a provider is enabled
    pub fn provider_enabled(&self, provider: Provider) -> bool {
        match provider {
            Provider::Aws => self.aws_enabled,
            Provider::Gcp => self.gcp_enabled,
            Provider::Azure => self.azure_enabled,
        }
    }

    /// Whether a location category is shown
    pub fn shows(&self, kind: LocationKind) -> bool {
        match kind {
            LocationKind::Exchange => self.show_exchanges,
            LocationKind::Region => self.show_regions,
        }
    }

    /// Whether a location of this kind and provider is visible
    pub fn is_visible(&self, kind: LocationKind, provider: Provider) -> bool {
        self.shows(kind) && self.provider_enabled(provider)
    }

    /// Enable or disable a provider
    pub fn set_provider(&mut self, provider: Provider, enabled: bool) {
        match provider {
            Provider::Aws => self.aws_enabled = enabled,
            Provider::Gcp => self.gcp_enabled = enabled,
            Provider::Azure => self.azure_enabled = enabled,
        }
    }

    /// Flip a provider
    pub fn toggle_provider(&mut self, provider: Provider) {
        let enabled = self.provider_enabled(provider);
        self.set_provider(provider, !enabled);
    }

    /// Flip exchange visibility
    pub fn toggle_exchanges(&mut self) {
        self.show_exchanges = !self.show_exchanges;
    }

    /// Flip region visibility
    pub fn toggle_regions(&mut self) {
        self.show_regions = !self.show_regions;
    }

    /// Replace the latency band
    pub fn set_latency_range(&mut self, range: LatencyRange) {
        self.latency_range = range;
    }

    /// Builder-style provider toggle
    pub fn with_provider(mut self, provider: Provider, enabled: bool) -> Self {
        self.set_provider(provider, enabled);
        self
    }

    /// Builder-style latency band
    pub fn with_latency_range(mut self, range: LatencyRange) -> Self {
        self.latency_range = range;
        self
    }
}
