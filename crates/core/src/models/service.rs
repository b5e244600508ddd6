use serde::{Deserialize, Serialize};

pub type ServiceId = i64;

/// A bookable service offered by an establishment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    #[serde(default)]
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
}

/// Services chosen for one appointment, kept in the order they were picked.
///
/// A service appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceSelection {
    services: Vec<Service>,
}

impl ServiceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ServiceId) -> bool {
        self.services.iter().any(|s| s.id == id)
    }

    /// Adds the service; returns `false` if it was already selected.
    pub fn insert(&mut self, service: Service) -> bool {
        if self.contains(service.id) {
            return false;
        }
        self.services.push(service);
        true
    }

    /// Removes the service; returns `false` if it was not selected.
    pub fn remove(&mut self, id: ServiceId) -> bool {
        let before = self.services.len();
        self.services.retain(|s| s.id != id);
        self.services.len() != before
    }

    pub fn clear(&mut self) {
        self.services.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn ids(&self) -> Vec<ServiceId> {
        self.services.iter().map(|s| s.id).collect()
    }

    /// Sum of the selected durations, saturating at `u32::MAX`.
    pub fn total_duration_minutes(&self) -> u32 {
        self.services
            .iter()
            .try_fold(0u32, |total, s| total.checked_add(s.duration_minutes))
            .unwrap_or(u32::MAX)
    }

    pub fn total_price(&self) -> f64 {
        self.services.iter().map(|s| s.price).sum()
    }
}

impl FromIterator<Service> for ServiceSelection {
    fn from_iter<I: IntoIterator<Item = Service>>(iter: I) -> Self {
        let mut selection = ServiceSelection::new();
        for service in iter {
            selection.insert(service);
        }
        selection
    }
}
