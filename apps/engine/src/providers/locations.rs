//! Location provider boundary.

use async_trait::async_trait;

use crate::domain::geo::Coordinates;
use crate::domain::state::TargetLocation;
use crate::errors::domain::DomainError;

/// Supplies candidate target locations for new sessions.
///
/// Implementations may return fewer locations than requested; the caller
/// decides whether a shortfall is fatal. Difficulty and category filters are
/// provider-defined strings.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn get_candidate_locations(
        &self,
        count: usize,
        difficulty: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<TargetLocation>, DomainError>;
}

/// Fixed-pool provider for tests and embedding demos.
///
/// Respects the filters and hands out locations in pool order, so tests can
/// predict which target backs which round.
pub struct StaticLocationProvider {
    pool: Vec<TargetLocation>,
}

impl StaticLocationProvider {
    pub fn new(pool: Vec<TargetLocation>) -> Self {
        Self { pool }
    }

    /// A pool of well-known cities with real coordinates.
    pub fn with_world_cities() -> Self {
        let cities: [(&str, &str, f64, f64, &str); 10] = [
            ("Paris", "France", 48.8566, 2.3522, "easy"),
            ("London", "United Kingdom", 51.5074, -0.1278, "easy"),
            ("New York", "United States", 40.7128, -74.0060, "easy"),
            ("Tokyo", "Japan", 35.6762, 139.6503, "medium"),
            ("Sydney", "Australia", -33.8688, 151.2093, "medium"),
            ("Cairo", "Egypt", 30.0444, 31.2357, "medium"),
            ("Rio de Janeiro", "Brazil", -22.9068, -43.1729, "hard"),
            ("Moscow", "Russia", 55.7558, 37.6173, "medium"),
            ("Cape Town", "South Africa", -33.9249, 18.4241, "hard"),
            ("Reykjavik", "Iceland", 64.1466, -21.9426, "hard"),
        ];

        let pool = cities
            .iter()
            .enumerate()
            .map(|(ix, (name, country, lat, lon, difficulty))| TargetLocation {
                id: ix as i64 + 1,
                name: (*name).to_string(),
                country: (*country).to_string(),
                difficulty: Some((*difficulty).to_string()),
                category: Some("city".to_string()),
                coords: Coordinates::new(*lat, *lon),
            })
            .collect();

        Self { pool }
    }

    pub fn pool(&self) -> &[TargetLocation] {
        &self.pool
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn get_candidate_locations(
        &self,
        count: usize,
        difficulty: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<TargetLocation>, DomainError> {
        Ok(self
            .pool
            .iter()
            .filter(|l| difficulty.is_none_or(|d| l.difficulty.as_deref() == Some(d)))
            .filter(|l| category.is_none_or(|c| l.category.as_deref() == Some(c)))
            .take(count)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_pool_order_up_to_count() {
        let provider = StaticLocationProvider::with_world_cities();
        let locations = provider.get_candidate_locations(3, None, None).await.unwrap();
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0].name, "Paris");
        assert_eq!(locations[1].name, "London");
    }

    #[tokio::test]
    async fn difficulty_filter_may_return_fewer_than_requested() {
        let provider = StaticLocationProvider::with_world_cities();
        let locations = provider
            .get_candidate_locations(10, Some("hard"), None)
            .await
            .unwrap();
        assert!(locations.len() < 10);
        assert!(locations
            .iter()
            .all(|l| l.difficulty.as_deref() == Some("hard")));
    }
}
