//! # Data Storage Abstraction
//!
//! This module provides the storage abstraction for the farm registry. It defines the
//! `DataStore` trait and an in-memory implementation holding three independent
//! collections: farms, sensors, and readings.
//!
//! ## Storage Model
//!
//! ```text
//! Farm (FarmId) ──── Sensor (SensorId, farm_id) ──── Reading (sensor_id, append-only)
//! ```
//!
//! References between collections are checked by the request handlers at creation
//! time only. Nothing is ever removed, so a reference that was valid once stays valid.
//!
//! ## Usage Examples
//!
//! ```rust
//! use digifarm::{DataStore, Farm, InMemoryDataStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn DataStore> = Arc::new(InMemoryDataStore::new());
//! let farm = Farm::new("Acme".to_string(), "Field A".to_string(), 12.5);
//!
//! store.put_farm(&farm).unwrap();
//! assert_eq!(store.get_farm(&farm.farm_id).unwrap(), Some(farm));
//! assert_eq!(store.list_farms().unwrap().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{DataStoreError, Farm, FarmId, Reading, Sensor, SensorId};

/// Trait defining the storage interface of the farm registry.
///
/// Implementors must be safe to share across request handlers; the trait requires
/// `Send + Sync` so a single store can sit behind an `Arc` in router state.
///
/// No operation spans more than one collection. Callers that need a check-then-insert
/// across collections (for example "farm exists, then insert sensor") rely on the fact
/// that no entity is ever deleted.
pub trait DataStore: Send + Sync {
    // Farm operations

    /// Inserts a farm, replacing any farm with the same identifier.
    fn put_farm(&self, farm: &Farm) -> Result<(), DataStoreError>;

    /// Retrieves a farm by identifier.
    ///
    /// # Returns
    /// * `Ok(Some(Farm))` - Farm found
    /// * `Ok(None)` - No farm with this identifier
    fn get_farm(&self, farm_id: &FarmId) -> Result<Option<Farm>, DataStoreError>;

    /// Lists every stored farm. Order is unspecified.
    fn list_farms(&self) -> Result<Vec<Farm>, DataStoreError>;

    // Sensor operations

    /// Inserts a sensor, replacing any sensor with the same identifier.
    fn put_sensor(&self, sensor: &Sensor) -> Result<(), DataStoreError>;

    /// Retrieves a sensor by identifier.
    fn get_sensor(&self, sensor_id: &SensorId) -> Result<Option<Sensor>, DataStoreError>;

    /// Lists the sensors whose farm reference equals `farm_id`.
    ///
    /// An unknown farm yields an empty list, not an error.
    fn list_sensors_by_farm(&self, farm_id: &FarmId) -> Result<Vec<Sensor>, DataStoreError>;

    // Reading operations

    /// Appends a reading. Readings are never deduplicated.
    fn append_reading(&self, reading: &Reading) -> Result<(), DataStoreError>;

    /// Lists the readings of one sensor in the order they were appended.
    fn list_readings_by_sensor(&self, sensor_id: &SensorId)
    -> Result<Vec<Reading>, DataStoreError>;

    /// Returns the total number of stored readings.
    fn count_readings(&self) -> Result<usize, DataStoreError>;
}

/// Thread-safe in-memory implementation of the `DataStore` trait.
///
/// Each collection sits behind its own `Mutex`, so operations on farms, sensors, and
/// readings never contend with one another. All state is lost when the store is dropped.
///
/// # Storage Structure
///
/// - **Farms**: `HashMap<FarmId, Farm>`
/// - **Sensors**: `HashMap<SensorId, Sensor>`
/// - **Readings**: `Vec<Reading>` in receipt order
///
/// Listing sensors by farm and readings by sensor are linear scans.
pub struct InMemoryDataStore {
    farms: Mutex<HashMap<FarmId, Farm>>,
    sensors: Mutex<HashMap<SensorId, Sensor>>,
    readings: Mutex<Vec<Reading>>,
}

impl InMemoryDataStore {
    /// Creates a new empty in-memory data store.
    pub fn new() -> Self {
        Self {
            farms: Mutex::new(HashMap::new()),
            sensors: Mutex::new(HashMap::new()),
            readings: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryDataStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<'a, T>(
    mutex: &'a Mutex<T>,
    collection: &'static str,
) -> Result<MutexGuard<'a, T>, DataStoreError> {
    mutex
        .lock()
        .map_err(|_| DataStoreError::LockPoisoned(collection))
}

impl DataStore for InMemoryDataStore {
    fn put_farm(&self, farm: &Farm) -> Result<(), DataStoreError> {
        let mut farms = lock(&self.farms, "farms")?;
        farms.insert(farm.farm_id.clone(), farm.clone());
        Ok(())
    }

    fn get_farm(&self, farm_id: &FarmId) -> Result<Option<Farm>, DataStoreError> {
        let farms = lock(&self.farms, "farms")?;
        Ok(farms.get(farm_id).cloned())
    }

    fn list_farms(&self) -> Result<Vec<Farm>, DataStoreError> {
        let farms = lock(&self.farms, "farms")?;
        Ok(farms.values().cloned().collect())
    }

    fn put_sensor(&self, sensor: &Sensor) -> Result<(), DataStoreError> {
        let mut sensors = lock(&self.sensors, "sensors")?;
        sensors.insert(sensor.sensor_id.clone(), sensor.clone());
        Ok(())
    }

    fn get_sensor(&self, sensor_id: &SensorId) -> Result<Option<Sensor>, DataStoreError> {
        let sensors = lock(&self.sensors, "sensors")?;
        Ok(sensors.get(sensor_id).cloned())
    }

    fn list_sensors_by_farm(&self, farm_id: &FarmId) -> Result<Vec<Sensor>, DataStoreError> {
        let sensors = lock(&self.sensors, "sensors")?;
        Ok(sensors
            .values()
            .filter(|sensor| &sensor.farm_id == farm_id)
            .cloned()
            .collect())
    }

    fn append_reading(&self, reading: &Reading) -> Result<(), DataStoreError> {
        let mut readings = lock(&self.readings, "readings")?;
        readings.push(reading.clone());
        Ok(())
    }

    fn list_readings_by_sensor(
        &self,
        sensor_id: &SensorId,
    ) -> Result<Vec<Reading>, DataStoreError> {
        let readings = lock(&self.readings, "readings")?;
        Ok(readings
            .iter()
            .filter(|reading| &reading.sensor_id == sensor_id)
            .cloned()
            .collect())
    }

    fn count_readings(&self) -> Result<usize, DataStoreError> {
        let readings = lock(&self.readings, "readings")?;
        Ok(readings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn test_farm(name: &str) -> Farm {
        Farm::new(name.to_string(), "Field A".to_string(), 12.5)
    }

    fn test_sensor(farm: &Farm) -> Sensor {
        Sensor::new(
            farm.farm_id.clone(),
            "soil-moisture".to_string(),
            "Row 3".to_string(),
        )
    }

    fn test_reading(sensor: &Sensor, value: f64) -> Reading {
        let timestamp = DateTime::parse_from_rfc3339("2023-10-27T10:00:00+00:00").unwrap();
        Reading::new(sensor.sensor_id.clone(), timestamp, value, "%".to_string())
    }

    #[test]
    fn farm_put_and_get() {
        let store = InMemoryDataStore::new();
        let farm = test_farm("Acme");

        store.put_farm(&farm).unwrap();

        assert_eq!(store.get_farm(&farm.farm_id).unwrap(), Some(farm));
        assert_eq!(store.get_farm(&FarmId::from("missing")).unwrap(), None);
    }

    #[test]
    fn farm_list() {
        let store = InMemoryDataStore::new();
        assert!(store.list_farms().unwrap().is_empty());

        let acme = test_farm("Acme");
        let other = test_farm("Other");
        store.put_farm(&acme).unwrap();
        store.put_farm(&other).unwrap();

        let mut names: Vec<String> = store
            .list_farms()
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Acme".to_string(), "Other".to_string()]);
    }

    #[test]
    fn sensors_filtered_by_farm() {
        let store = InMemoryDataStore::new();
        let acme = test_farm("Acme");
        let other = test_farm("Other");
        store.put_farm(&acme).unwrap();
        store.put_farm(&other).unwrap();

        let s1 = test_sensor(&acme);
        let s2 = test_sensor(&acme);
        let s3 = test_sensor(&other);
        for sensor in [&s1, &s2, &s3] {
            store.put_sensor(sensor).unwrap();
        }

        let acme_sensors = store.list_sensors_by_farm(&acme.farm_id).unwrap();
        assert_eq!(acme_sensors.len(), 2);
        assert!(acme_sensors.iter().all(|s| s.farm_id == acme.farm_id));

        assert_eq!(store.get_sensor(&s3.sensor_id).unwrap(), Some(s3));
        assert!(
            store
                .list_sensors_by_farm(&FarmId::from("nowhere"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn readings_append_only_in_order() {
        let store = InMemoryDataStore::new();
        let farm = test_farm("Acme");
        let sensor = test_sensor(&farm);
        let other = test_sensor(&farm);

        store.append_reading(&test_reading(&sensor, 1.0)).unwrap();
        store.append_reading(&test_reading(&other, 2.0)).unwrap();
        store.append_reading(&test_reading(&sensor, 3.0)).unwrap();
        // identical readings are kept
        store.append_reading(&test_reading(&sensor, 3.0)).unwrap();

        assert_eq!(store.count_readings().unwrap(), 4);
        let values: Vec<f64> = store
            .list_readings_by_sensor(&sensor.sensor_id)
            .unwrap()
            .iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(values, vec![1.0, 3.0, 3.0]);
    }

    #[test]
    fn shared_across_threads() {
        let store = std::sync::Arc::new(InMemoryDataStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    let farm = test_farm(&format!("farm-{}", i));
                    store.put_farm(&farm).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.list_farms().unwrap().len(), 8);
    }
}
