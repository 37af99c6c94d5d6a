// Booking endpoint handlers
//
// Each handler is a single linear pass: parse the body or path parameter,
// call the collaborator, map the outcome. Known collaborator faults are
// mapped here; anything else escapes to the router's catch.

use chrono::NaiveTime;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use super::response;
use super::types::{Credentials, Reservation, Table};
use super::{ApiError, ApiRequest};
use crate::clients::AuthError;
use crate::config::AppState;
use crate::logger;

type HandlerResult = Result<Response<Full<Bytes>>, ApiError>;

/// POST /signup
pub async fn signup(req: &ApiRequest, state: &AppState) -> HandlerResult {
    let creds: Credentials = serde_json::from_slice(&req.body).unwrap_or_default();
    if creds.email.is_empty() || creds.password.is_empty() {
        return Ok(response::bad_request("Email and password are required."));
    }

    match state.identity.sign_up(&creds.email, &creds.password).await {
        Ok(()) => Ok(response::json_response(
            StatusCode::OK,
            &json!({"message": "Sign-up successful."}),
        )),
        Err(AuthError::UserExists) => Ok(response::bad_request("User already exists.")),
        Err(e) => {
            logger::log_error(&format!("Signup failed: {e}"));
            Ok(response::service_error())
        }
    }
}

/// POST /signin
pub async fn signin(req: &ApiRequest, state: &AppState) -> HandlerResult {
    let creds: Credentials = serde_json::from_slice(&req.body).unwrap_or_default();
    if creds.email.is_empty() || creds.password.is_empty() {
        return Ok(response::bad_request("Email and password are required."));
    }

    match state.identity.authenticate(&creds.email, &creds.password).await {
        Ok(tokens) => Ok(response::json_response(StatusCode::OK, &tokens)),
        Err(AuthError::NotAuthorized) => Ok(response::bad_request("Invalid email or password.")),
        Err(AuthError::UserNotFound) => Ok(response::bad_request("User does not exist.")),
        Err(e) => {
            logger::log_error(&format!("Signin failed: {e}"));
            Ok(response::service_error())
        }
    }
}

/// GET /tables
pub async fn list_tables(state: &AppState) -> HandlerResult {
    let mut tables = state.store.scan(&state.config.store.tables_table).await?;
    // Scan order is key order (lexicographic); present tables by numeric id.
    tables.sort_by_key(|doc| doc.get("id").and_then(Value::as_u64).unwrap_or(u64::MAX));
    Ok(response::json_response(
        StatusCode::OK,
        &json!({"tables": tables}),
    ))
}

/// POST /tables
pub async fn create_table(req: &ApiRequest, state: &AppState) -> HandlerResult {
    let Ok(table) = serde_json::from_slice::<Table>(&req.body) else {
        return Ok(response::bad_request(
            "Table id, number, places and isVip are required.",
        ));
    };

    let collection = &state.config.store.tables_table;
    let key = table.id.to_string();
    if state.store.get(collection, &key).await?.is_some() {
        return Ok(response::bad_request("Table already exists."));
    }

    let document = serde_json::to_value(&table)?;
    state.store.put(collection, &key, document).await?;
    Ok(response::json_response(
        StatusCode::CREATED,
        &json!({"id": table.id}),
    ))
}

/// GET /tables/{tableId}
pub async fn get_table_by_id(
    params: &HashMap<String, String>,
    state: &AppState,
) -> HandlerResult {
    let Some(id) = params.get("tableId").and_then(|v| v.parse::<u32>().ok()) else {
        return Ok(response::bad_request("Invalid table id."));
    };

    match state
        .store
        .get(&state.config.store.tables_table, &id.to_string())
        .await?
    {
        Some(document) => Ok(response::json_response(StatusCode::OK, &document)),
        None => Ok(response::not_found("Table not found.")),
    }
}

/// GET /reservations
pub async fn list_reservations(state: &AppState) -> HandlerResult {
    let reservations = state
        .store
        .scan(&state.config.store.reservations_table)
        .await?;
    Ok(response::json_response(
        StatusCode::OK,
        &json!({"reservations": reservations}),
    ))
}

/// POST /reservations
pub async fn create_reservation(req: &ApiRequest, state: &AppState) -> HandlerResult {
    let Ok(reservation) = serde_json::from_slice::<Reservation>(&req.body) else {
        return Ok(response::bad_request("Reservation fields are required."));
    };
    if reservation.client_name.is_empty()
        || reservation.phone_number.is_empty()
        || reservation.date.is_empty()
    {
        return Ok(response::bad_request("Reservation fields are required."));
    }
    let Some((start, end)) = parse_slot(&reservation) else {
        return Ok(response::bad_request("Invalid time slot."));
    };
    if start >= end {
        return Ok(response::bad_request("Invalid time slot."));
    }

    // Reservations reference tables by number, not by document key.
    let tables = state.store.scan(&state.config.store.tables_table).await?;
    let table_exists = tables.iter().any(|doc| {
        doc.get("number").and_then(Value::as_u64) == Some(u64::from(reservation.table_number))
    });
    if !table_exists {
        return Ok(response::bad_request("Table not found."));
    }

    let collection = &state.config.store.reservations_table;
    let existing = state.store.scan(collection).await?;
    for document in &existing {
        let Ok(other) = serde_json::from_value::<Reservation>(document.clone()) else {
            continue;
        };
        if other.table_number != reservation.table_number || other.date != reservation.date {
            continue;
        }
        let Some((other_start, other_end)) = parse_slot(&other) else {
            continue;
        };
        if start < other_end && other_start < end {
            return Ok(response::bad_request(
                "Reservation overlaps with an existing one.",
            ));
        }
    }

    let reservation_id = Uuid::new_v4().to_string();
    let mut document = serde_json::to_value(&reservation)?;
    if let Some(fields) = document.as_object_mut() {
        fields.insert("reservationId".to_string(), json!(reservation_id));
    }
    state.store.put(collection, &reservation_id, document).await?;
    Ok(response::json_response(
        StatusCode::CREATED,
        &json!({"reservationId": reservation_id}),
    ))
}

/// Slot boundaries as times of day, `None` if either fails to parse
fn parse_slot(reservation: &Reservation) -> Option<(NaiveTime, NaiveTime)> {
    let start = NaiveTime::parse_from_str(&reservation.slot_time_start, "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(&reservation.slot_time_end, "%H:%M").ok()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, Config, LoggingConfig, ServerConfig, StoreConfig};
    use http_body_util::BodyExt;
    use hyper::Method;

    fn test_state() -> AppState {
        AppState::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_file: None,
                error_log_file: None,
            },
            auth: AuthConfig {
                user_pool_id: "pool-1".to_string(),
                client_id: "client-1".to_string(),
            },
            store: StoreConfig {
                tables_table: "Tables".to_string(),
                reservations_table: "Reservations".to_string(),
            },
        })
    }

    fn post(path: &str, body: Value) -> ApiRequest {
        ApiRequest {
            method: Method::POST,
            path: path.to_string(),
            body: Bytes::from(body.to_string()),
        }
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_table(state: &AppState, id: u32, number: u32) {
        let req = post(
            "/tables",
            json!({"id": id, "number": number, "places": 4, "isVip": false}),
        );
        let resp = create_table(&req, state).await.unwrap();
        assert_eq!(resp.status(), 201);
    }

    fn reservation_body(table_number: u32, date: &str, start: &str, end: &str) -> Value {
        json!({
            "tableNumber": table_number,
            "clientName": "Ann",
            "phoneNumber": "+4855511",
            "date": date,
            "slotTimeStart": start,
            "slotTimeEnd": end,
        })
    }

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let state = test_state();
        let req = post("/signup", json!({"email": "a@b.c", "password": "pw"}));

        let resp = signup(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_json(resp).await,
            json!({"message": "Sign-up successful."})
        );

        let resp = signup(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(body_json(resp).await, json!({"error": "User already exists."}));
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let state = test_state();
        let req = post("/signup", json!({"email": "a@b.c"}));
        let resp = signup(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(
            body_json(resp).await,
            json!({"error": "Email and password are required."})
        );
    }

    #[tokio::test]
    async fn test_signin_round_trip() {
        let state = test_state();
        let req = post("/signup", json!({"email": "a@b.c", "password": "pw"}));
        signup(&req, &state).await.unwrap();

        let req = post("/signin", json!({"email": "a@b.c", "password": "pw"}));
        let resp = signin(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        assert!(body["accessToken"].is_string());
        assert_eq!(body["expiresIn"], 3600);
    }

    #[tokio::test]
    async fn test_create_table_then_get() {
        let state = test_state();
        let req = post(
            "/tables",
            json!({"id": 5, "number": 10, "places": 6, "isVip": true, "minOrder": 500.0}),
        );
        let resp = create_table(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 201);
        assert_eq!(body_json(resp).await, json!({"id": 5}));

        let params = HashMap::from([("tableId".to_string(), "5".to_string())]);
        let resp = get_table_by_id(&params, &state).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_json(resp).await,
            json!({"id": 5, "number": 10, "places": 6, "isVip": true, "minOrder": 500.0})
        );
    }

    #[tokio::test]
    async fn test_create_table_duplicate() {
        let state = test_state();
        seed_table(&state, 5, 10).await;

        let req = post(
            "/tables",
            json!({"id": 5, "number": 11, "places": 2, "isVip": false}),
        );
        let resp = create_table(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(body_json(resp).await, json!({"error": "Table already exists."}));
    }

    #[tokio::test]
    async fn test_create_table_missing_fields() {
        let state = test_state();
        let req = post("/tables", json!({"id": 5, "places": 2}));
        let resp = create_table(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn test_get_table_absent() {
        let state = test_state();
        let params = HashMap::from([("tableId".to_string(), "9".to_string())]);
        let resp = get_table_by_id(&params, &state).await.unwrap();
        assert_eq!(resp.status(), 404);
        assert_eq!(body_json(resp).await, json!({"error": "Table not found."}));
    }

    #[tokio::test]
    async fn test_get_table_invalid_id() {
        let state = test_state();
        let params = HashMap::from([("tableId".to_string(), "abc".to_string())]);
        let resp = get_table_by_id(&params, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn test_list_tables_sorted_by_id() {
        let state = test_state();
        seed_table(&state, 10, 1).await;
        seed_table(&state, 2, 2).await;

        let resp = list_tables(&state).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        let ids: Vec<u64> = body["tables"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 10]);
    }

    #[tokio::test]
    async fn test_create_reservation_unknown_table() {
        let state = test_state();
        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "10:00", "12:00"),
        );
        let resp = create_reservation(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(body_json(resp).await, json!({"error": "Table not found."}));
    }

    #[tokio::test]
    async fn test_create_reservation_then_list() {
        let state = test_state();
        seed_table(&state, 1, 7).await;

        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "10:00", "12:00"),
        );
        let resp = create_reservation(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 201);
        let created = body_json(resp).await;
        assert!(created["reservationId"].is_string());

        let resp = list_reservations(&state).await.unwrap();
        let body = body_json(resp).await;
        let listed = &body["reservations"][0];
        assert_eq!(listed["tableNumber"], 7);
        assert_eq!(listed["reservationId"], created["reservationId"]);
    }

    #[tokio::test]
    async fn test_create_reservation_overlap() {
        let state = test_state();
        seed_table(&state, 1, 7).await;

        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "10:00", "12:00"),
        );
        assert_eq!(create_reservation(&req, &state).await.unwrap().status(), 201);

        // Overlapping window on the same table and date
        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "11:00", "13:00"),
        );
        let resp = create_reservation(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(
            body_json(resp).await,
            json!({"error": "Reservation overlaps with an existing one."})
        );

        // Same window on another date is fine
        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-02", "11:00", "13:00"),
        );
        assert_eq!(create_reservation(&req, &state).await.unwrap().status(), 201);
    }

    #[tokio::test]
    async fn test_create_reservation_adjacent_slots() {
        let state = test_state();
        seed_table(&state, 1, 7).await;

        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "10:00", "12:00"),
        );
        assert_eq!(create_reservation(&req, &state).await.unwrap().status(), 201);

        // [12:00, 14:00) does not intersect [10:00, 12:00)
        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "12:00", "14:00"),
        );
        assert_eq!(create_reservation(&req, &state).await.unwrap().status(), 201);
    }

    #[tokio::test]
    async fn test_create_reservation_invalid_slot() {
        let state = test_state();
        seed_table(&state, 1, 7).await;

        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "25:99", "12:00"),
        );
        let resp = create_reservation(&req, &state).await.unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(body_json(resp).await, json!({"error": "Invalid time slot."}));

        // End before start
        let req = post(
            "/reservations",
            reservation_body(7, "2026-09-01", "12:00", "10:00"),
        );
        assert_eq!(create_reservation(&req, &state).await.unwrap().status(), 400);
    }
}
