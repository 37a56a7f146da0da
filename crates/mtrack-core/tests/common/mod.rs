//! In-process fake of the tracker REST API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const TOKEN: &str = "tok-123";
pub const PASSWORD: &str = "secret";

type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
pub struct FakeState {
    pub machines: Vec<Value>,
    pub repairs: Vec<Value>,
    pub repair_types: Vec<Value>,
    pub last_body: Option<Value>,
    pub last_upload: Option<String>,
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct FakeApi {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl FakeApi {
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }
}

/// Machines, repairs and types from the reporting examples.
pub fn seeded_state() -> FakeState {
    FakeState {
        machines: vec![
            json!({ "id": 1, "name": "Tractor A" }),
            json!({ "id": 2, "name": "Plow B" }),
        ],
        repairs: vec![
            json!({ "id": 10, "machine": 1, "repair_type": 1, "repair_type_name": "Engine",
                    "price": "500", "created_by": "bola", "updated_by": "bola",
                    "time_added": "2024-03-01T10:00:00Z", "time_updated": "2024-03-01T10:00:00Z" }),
            json!({ "id": 11, "machine": 1, "repair_type": 2, "repair_type_name": "Tire",
                    "price": "abc", "time_added": "2024-04-01T10:00:00Z" }),
            json!({ "id": 12, "machine": 2, "repair_type": 3,
                    "price": "300", "time_added": "2024-03-15T10:00:00Z" }),
            json!({ "id": 13, "machine": 99, "repair_type": 1, "price": "1000",
                    "time_added": "2024-03-02T10:00:00Z" }),
        ],
        repair_types: vec![
            json!({ "id": 1, "name": "Engine" }),
            json!({ "id": 2, "name": "Tire" }),
            json!({ "id": 3, "name": "Blade" }),
        ],
        ..FakeState::default()
    }
}

/// Serve the fake API on an ephemeral port from a background thread.
pub fn spawn(state: FakeState) -> FakeApi {
    let state: Shared = Arc::new(Mutex::new(state));
    let app = router(state.clone());
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime should build");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind should succeed");
            tx.send(listener.local_addr().expect("local addr"))
                .expect("send addr");
            axum::serve(listener, app).await.expect("serve");
        });
    });

    let addr = rx.recv().expect("server should start");
    FakeApi { addr, state }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/token/", post(token))
        .route("/api/register/", post(register))
        .route("/api/user-profile/", get(user_profile))
        .route("/api/user/details", get(user_details))
        .route("/api/machines/", get(list_machines).post(create_machine))
        .route("/api/repairs/", get(list_repairs).post(create_repair))
        .route(
            "/api/repairs/:id/",
            get(get_repair).put(update_repair).delete(delete_repair),
        )
        .route("/api/repair-types/", get(list_repair_types))
        .with_state(state)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Authentication credentials were not provided." })),
    )
}

fn not_found() -> Reply {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." })))
}

async fn token(Json(body): Json<Value>) -> Reply {
    if body["password"] == PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "access": TOKEN, "refresh": "ref-456" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "No active account found with the given credentials" })),
        )
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    state.lock().unwrap().last_body = Some(body.clone());
    (StatusCode::CREATED, Json(json!({ "username": body["username"] })))
}

async fn user_profile(headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "role": "Admin Staff", "id": 4 })))
}

async fn user_details(headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({ "username": "bola", "first_name": "Bola", "last_name": "Ade" })),
    )
}

async fn list_machines(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let machines = state.lock().unwrap().machines.clone();
    (StatusCode::OK, Json(Value::Array(machines)))
}

async fn create_machine(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let text = String::from_utf8_lossy(&body).to_string();
    let name = form_field(&text, "name").unwrap_or_default();
    let mut state = state.lock().unwrap();
    let machine = json!({ "id": state.machines.len() + 1, "name": name, "image": null });
    state.machines.push(machine.clone());
    state.last_upload = Some(text);
    (StatusCode::CREATED, Json(machine))
}

async fn list_repairs(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let repairs: Vec<Value> = state
        .lock()
        .unwrap()
        .repairs
        .iter()
        .filter(|r| match query.get("machine_id") {
            Some(id) => r["machine"].to_string() == *id,
            None => true,
        })
        .cloned()
        .collect();
    (StatusCode::OK, Json(Value::Array(repairs)))
}

async fn create_repair(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    let mut repair = body.clone();
    repair["id"] = json!(100 + state.repairs.len());
    state.repairs.push(repair.clone());
    state.last_body = Some(body);
    (StatusCode::CREATED, Json(repair))
}

fn find(state: &FakeState, id: &str) -> Option<usize> {
    state.repairs.iter().position(|r| r["id"].to_string() == id)
}

async fn get_repair(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    match find(&state, &id) {
        Some(index) => (StatusCode::OK, Json(state.repairs[index].clone())),
        None => not_found(),
    }
}

async fn update_repair(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    let Some(index) = find(&state, &id) else {
        return not_found();
    };
    if let (Some(target), Some(fields)) = (state.repairs[index].as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    let updated = state.repairs[index].clone();
    state.last_body = Some(body);
    (StatusCode::OK, Json(updated))
}

async fn delete_repair(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    match find(&state, &id) {
        Some(index) => {
            state.repairs.remove(index);
            (StatusCode::OK, Json(json!({})))
        }
        None => not_found(),
    }
}

async fn list_repair_types(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let types = state.lock().unwrap().repair_types.clone();
    (StatusCode::OK, Json(Value::Array(types)))
}

/// Value of a text field in a multipart body.
fn form_field(body: &str, field: &str) -> Option<String> {
    let marker = format!("name=\"{}\"\r\n\r\n", field);
    let start = body.find(&marker)? + marker.len();
    let end = body[start..].find("\r\n")? + start;
    Some(body[start..end].to_string())
}
