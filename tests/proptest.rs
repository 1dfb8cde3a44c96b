use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use proptest::prelude::*;
use serde_json::{Value, json};

use digifarm::{
    CreateFarmResponse, DataStore, ErrorResponse, Farm, FarmId, InMemoryDataStore,
    RegisterSensorResponse, Sensor, create_router, parse_timestamp,
};

/// Test infrastructure for property testing the digifarm API
pub struct ApiTestServer {
    pub server: TestServer,
    pub data_store: Arc<InMemoryDataStore>,
}

impl Default for ApiTestServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiTestServer {
    /// Create a new test server with a fresh in-memory data store
    pub fn new() -> Self {
        let data_store = Arc::new(InMemoryDataStore::new());
        let app = create_router(data_store.clone());
        let server = TestServer::new(app).unwrap();
        Self { server, data_store }
    }

    async fn create_farm(&self, body: &Value) -> CreateFarmResponse {
        let response = self.server.post("/api/farms").json(body).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    async fn register_sensor(&self, farm_id: &FarmId) -> RegisterSensorResponse {
        let response = self
            .server
            .post("/api/sensors")
            .json(&json!({
                "farmId": farm_id,
                "sensorType": "soil-moisture",
                "location": "Row 3"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }
}

/// Property test strategies for generating test data
pub mod strategies {
    use super::*;
    use proptest::string::string_regex;

    /// Free text as a client might send it
    pub fn text_strategy() -> impl Strategy<Value = String> {
        string_regex(r"[A-Za-z0-9 \-]{0,32}").unwrap()
    }

    /// Sizes that survive a JSON round trip exactly, including zero and negatives
    pub fn size_strategy() -> impl Strategy<Value = f64> {
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64 / 4.0)
    }

    /// A complete farm creation body
    pub fn farm_body_strategy() -> impl Strategy<Value = Value> {
        (text_strategy(), text_strategy(), size_strategy()).prop_map(|(name, location, size)| {
            json!({"name": name, "location": location, "size": size})
        })
    }

    /// Strings that are not offset-aware ISO-8601 date-times
    pub fn invalid_timestamp_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            string_regex(r"[a-z \-:]{0,24}").unwrap(),
            Just("2023-10-27T10:00:00".to_string()),
            Just("2023-10-27".to_string()),
            Just("27/10/2023 10:00".to_string()),
            Just("2023-10-27 10:00:00+00:00".to_string()),
            Just("2023-10-27T23:59:60+00:00".to_string()),
        ]
        .prop_filter("must not parse", |s| parse_timestamp(s).is_none())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn farm_creation_roundtrip(
        bodies in proptest::collection::vec(strategies::farm_body_strategy(), 1..6)
    ) {
        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let test_server = ApiTestServer::new();
            let mut seen = HashSet::new();

            for body in &bodies {
                let created = test_server.create_farm(body).await;
                prop_assert!(seen.insert(created.farm_id.clone()));

                let response = test_server.server
                    .get(&format!("/api/farms/{}", created.farm_id))
                    .await;
                response.assert_status_ok();
                let farm: Farm = response.json();

                prop_assert_eq!(&farm.farm_id, &created.farm_id);
                prop_assert_eq!(json!(farm.name), body["name"].clone());
                prop_assert_eq!(json!(farm.location), body["location"].clone());
                prop_assert_eq!(json!(farm.size), body["size"].clone());
            }

            prop_assert_eq!(test_server.data_store.list_farms().unwrap().len(), bodies.len());
            Ok(())
        }).unwrap()
    }

    #[test]
    fn farm_missing_field_rejected(
        body in strategies::farm_body_strategy(),
        dropped in 0usize..3
    ) {
        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let test_server = ApiTestServer::new();
            let field = ["name", "location", "size"][dropped];

            let mut body = body;
            body.as_object_mut().unwrap().remove(field);

            let response = test_server.server.post("/api/farms").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let error: ErrorResponse = response.json();

            prop_assert_eq!(error.error, format!("Missing required field: {}", field));
            prop_assert!(test_server.data_store.list_farms().unwrap().is_empty());
            Ok(())
        }).unwrap()
    }

    #[test]
    fn sensor_against_unknown_farm_rejected(
        farm_id in "unknown-[a-z0-9]{1,20}"
    ) {
        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let test_server = ApiTestServer::new();
            let existing = test_server
                .create_farm(&json!({"name": "Acme", "location": "Field A", "size": 12.5}))
                .await;

            let response = test_server.server
                .post("/api/sensors")
                .json(&json!({
                    "farmId": farm_id,
                    "sensorType": "soil-moisture",
                    "location": "Row 3"
                }))
                .await;
            response.assert_status(StatusCode::NOT_FOUND);

            let store = &test_server.data_store;
            prop_assert!(store.list_sensors_by_farm(&FarmId::from(farm_id.as_str())).unwrap().is_empty());
            prop_assert!(store.list_sensors_by_farm(&existing.farm_id).unwrap().is_empty());
            Ok(())
        }).unwrap()
    }

    #[test]
    fn sensors_listed_by_owning_farm(
        owners in proptest::collection::vec(0usize..3, 0..12)
    ) {
        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let test_server = ApiTestServer::new();
            let mut farms = Vec::new();
            for i in 0..3 {
                let created = test_server
                    .create_farm(&json!({"name": format!("farm-{}", i), "location": "here", "size": 1.0}))
                    .await;
                farms.push(created.farm_id);
            }

            let mut expected: Vec<HashSet<String>> = vec![HashSet::new(); 3];
            for owner in &owners {
                let created = test_server.register_sensor(&farms[*owner]).await;
                expected[*owner].insert(created.sensor_id.to_string());
            }

            for (farm_id, expected) in farms.iter().zip(expected.iter()) {
                let response = test_server.server
                    .get(&format!("/api/farms/{}/sensors", farm_id))
                    .await;
                response.assert_status_ok();
                let sensors: Vec<Sensor> = response.json();

                prop_assert!(sensors.iter().all(|s| &s.farm_id == farm_id));
                let actual: HashSet<String> =
                    sensors.iter().map(|s| s.sensor_id.to_string()).collect();
                prop_assert_eq!(&actual, expected);
            }
            Ok(())
        }).unwrap()
    }

    #[test]
    fn invalid_timestamp_appends_nothing(
        timestamp in strategies::invalid_timestamp_strategy(),
        value in -1000.0f64..1000.0
    ) {
        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let test_server = ApiTestServer::new();
            let farm = test_server
                .create_farm(&json!({"name": "Acme", "location": "Field A", "size": 12.5}))
                .await;
            let sensor = test_server.register_sensor(&farm.farm_id).await;

            let response = test_server.server
                .post("/api/readings")
                .json(&json!({
                    "sensorId": sensor.sensor_id,
                    "timestamp": timestamp,
                    "value": value,
                    "unit": "%"
                }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
            prop_assert_eq!(test_server.data_store.count_readings().unwrap(), 0);
            Ok(())
        }).unwrap()
    }
}
