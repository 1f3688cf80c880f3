//! Artificial latency standing in for network round-trips.

use std::str::FromStr;
use std::time::Duration;

use taskflow_core::StoreError;

/// Suspends the calling task for `duration` without blocking the runtime.
/// A zero duration returns immediately.
pub async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Per-operation latency of one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub reorder: Duration,
}

impl Latency {
    pub const fn instant() -> Self {
        Self {
            get_all: Duration::ZERO,
            get_by_id: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            reorder: Duration::ZERO,
        }
    }

    pub const fn simulated_tasks() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(300),
            reorder: Duration::from_millis(200),
        }
    }

    pub const fn simulated_categories() -> Self {
        Self {
            get_all: Duration::from_millis(250),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(300),
            update: Duration::from_millis(250),
            delete: Duration::from_millis(300),
            reorder: Duration::ZERO,
        }
    }
}

/// Latency preset selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LatencyProfile {
    #[default]
    Simulated,
    Instant,
}

impl LatencyProfile {
    pub fn tasks(self) -> Latency {
        match self {
            LatencyProfile::Simulated => Latency::simulated_tasks(),
            LatencyProfile::Instant => Latency::instant(),
        }
    }

    pub fn categories(self) -> Latency {
        match self {
            LatencyProfile::Simulated => Latency::simulated_categories(),
            LatencyProfile::Instant => Latency::instant(),
        }
    }
}

impl FromStr for LatencyProfile {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(LatencyProfile::Simulated),
            "instant" | "none" => Ok(LatencyProfile::Instant),
            other => Err(StoreError::validation(
                "latency",
                format!("expected simulated|instant, got `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delay_waits_for_the_given_duration() {
        let start = tokio::time::Instant::now();
        delay(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_does_not_advance_time() {
        let start = tokio::time::Instant::now();
        delay(Duration::ZERO).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn profiles_parse_and_map_to_latencies() {
        let instant: LatencyProfile = "instant".parse().unwrap();
        assert_eq!(instant.tasks(), Latency::instant());
        let simulated: LatencyProfile = "Simulated".parse().unwrap();
        assert_eq!(simulated.tasks().create, Duration::from_millis(400));
        assert_eq!(simulated.categories().get_all, Duration::from_millis(250));
        assert!("slow".parse::<LatencyProfile>().is_err());
    }
}
