// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the portal API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use dashmap::DashMap;
use docportal::notify::NoticeLog;
use docportal::services::PortalClient;
use docportal::session::{Session, SessionFlagStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const SESSION_COOKIE: &str = "portal_session";
pub const PASSWORD: &str = "secret";
pub const EMAIL: &str = "ada@example.com";
/// Account with MFA enabled
pub const MFA_EMAIL: &str = "mfa@example.com";
pub const QR_CODE: &str = "123456";
pub const USER_ID: &str = "0b8c7c1e-1f0a-4a35-9b59-7d1a3c2e8f10";
/// Documents stored in the mock portal
pub const DOCUMENT_COUNT: u32 = 10;

/// Mock server state, shared with the test for inspection.
#[derive(Clone)]
pub struct MockPortal {
    hits: Arc<DashMap<String, usize>>,
    first_name: Arc<Mutex<String>>,
    role: Arc<Mutex<String>>,
    last_search: Arc<Mutex<Option<HashMap<String, String>>>>,
    uploads: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockPortal {
    fn new() -> Self {
        Self {
            hits: Arc::new(DashMap::new()),
            first_name: Arc::new(Mutex::new("Ada".to_string())),
            role: Arc::new(Mutex::new("USER".to_string())),
            last_search: Arc::new(Mutex::new(None)),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of requests seen by the named endpoint.
    pub fn hits(&self, endpoint: &str) -> usize {
        self.hits.get(endpoint).map(|hits| *hits).unwrap_or(0)
    }

    /// Query parameters of the last document search.
    pub fn last_search(&self) -> Option<HashMap<String, String>> {
        self.last_search.lock().unwrap().clone()
    }

    /// File names of every uploaded document part.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    fn hit(&self, endpoint: &str) {
        *self.hits.entry(endpoint.to_string()).or_insert(0) += 1;
    }

    fn user(&self, email: &str, mfa: bool) -> Value {
        json!({
            "id": 1,
            "userId": USER_ID,
            "firstName": self.first_name.lock().unwrap().clone(),
            "lastName": "Lovelace",
            "email": email,
            "phone": "555-0100",
            "bio": "",
            "imageUrl": "https://cdn.example.com/ada.png",
            "accountNonExpired": true,
            "accountNonLocked": true,
            "credentialsNonExpired": true,
            "enabled": true,
            "mfa": mfa,
            "role": self.role.lock().unwrap().clone(),
            "authorities": "document:create,document:read,user:update",
        })
    }
}

/// Portal response envelope.
pub fn envelope(code: StatusCode, path: &str, message: &str, data: Option<Value>) -> Response {
    let mut body = json!({
        "time": "2026-10-19T09:30:00",
        "code": code.as_u16(),
        "path": path,
        "status": status_text(code),
        "message": message,
    });
    if let Some(data) = data {
        body["data"] = data;
    }
    (code, Json(body)).into_response()
}

/// Reason phrase in the server's enum style, e.g. `BAD_REQUEST`.
fn status_text(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or("")
        .to_uppercase()
        .replace(' ', "_")
}

fn with_session(response: Response) -> Response {
    let cookie = format!("{}=ok; Path=/; HttpOnly", SESSION_COOKIE);
    ([(header::SET_COOKIE, cookie)], response).into_response()
}

fn not_logged_in(path: &str) -> Response {
    envelope(
        StatusCode::UNAUTHORIZED,
        path,
        "You are not logged in",
        None,
    )
}

fn document(document_id: &str, name: &str) -> Value {
    json!({
        "id": 1,
        "documentId": document_id,
        "name": name,
        "description": "Quarterly numbers",
        "uri": format!("/documents/download/{}", name),
        "size": 2048,
        "formattedSize": "2 KB",
        "icon": "pdf",
        "extension": "pdf",
        "referenceId": "ref-1",
        "createdAt": "2026-10-01T08:00:00",
        "updatedAt": "2026-10-02T08:00:00",
        "ownerName": "Ada Lovelace",
        "ownerEmail": EMAIL,
        "ownerPhone": "555-0100",
        "ownerLastLogin": "2026-10-18T08:00:00",
        "updaterName": "Ada Lovelace",
    })
}

// ─── User endpoints ──────────────────────────────────────────

async fn login(State(portal): State<MockPortal>, Json(body): Json<Value>) -> Response {
    portal.hit("login");
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"].as_str() != Some(PASSWORD) {
        return envelope(
            StatusCode::UNAUTHORIZED,
            "/user/login",
            "Incorrect email or password",
            None,
        );
    }

    let mfa = email == MFA_EMAIL;
    let response = envelope(
        StatusCode::OK,
        "/user/login",
        "Login success",
        Some(json!({ "user": portal.user(email, mfa) })),
    );
    if mfa {
        response
    } else {
        with_session(response)
    }
}

async fn verify_qr_code(State(portal): State<MockPortal>, Json(body): Json<Value>) -> Response {
    portal.hit("qrcode");
    if body["userId"].as_str() != Some(USER_ID) || body["qrCode"].as_str() != Some(QR_CODE) {
        return envelope(
            StatusCode::BAD_REQUEST,
            "/user/verify/qrcode",
            "Invalid QR code. Please try again.",
            None,
        );
    }
    with_session(envelope(
        StatusCode::OK,
        "/user/verify/qrcode",
        "QR code verified",
        Some(json!({ "user": portal.user(MFA_EMAIL, true) })),
    ))
}

async fn profile(State(portal): State<MockPortal>, jar: CookieJar) -> Response {
    portal.hit("profile");
    if jar.get(SESSION_COOKIE).is_none() {
        return not_logged_in("/user/profile");
    }
    envelope(
        StatusCode::OK,
        "/user/profile",
        "Profile retrieved",
        Some(json!({ "user": portal.user(EMAIL, false) })),
    )
}

async fn update_user(
    State(portal): State<MockPortal>,
    jar: CookieJar,
    Json(body): Json<Value>,
) -> Response {
    portal.hit("update");
    if jar.get(SESSION_COOKIE).is_none() {
        return not_logged_in("/user/update");
    }

    let first_name = body["firstName"].as_str().unwrap_or_default();
    if first_name == "fail" {
        return envelope(
            StatusCode::BAD_REQUEST,
            "/user/update",
            "Profile could not be updated",
            None,
        );
    }

    *portal.first_name.lock().unwrap() = first_name.to_string();
    envelope(
        StatusCode::OK,
        "/user/update",
        "User updated successfully",
        Some(json!({ "user": portal.user(EMAIL, false) })),
    )
}

async fn update_role(State(portal): State<MockPortal>, Json(body): Json<Value>) -> Response {
    portal.hit("updaterole");
    let role = body["role"].as_str().unwrap_or_default();
    if role == "SUPER_ADMIN" {
        return envelope(
            StatusCode::FORBIDDEN,
            "/user/updaterole",
            "You do not have permission to assign this role",
            None,
        );
    }
    *portal.role.lock().unwrap() = role.to_string();
    envelope(
        StatusCode::OK,
        "/user/updaterole",
        "Role updated successfully",
        Some(json!({})),
    )
}

async fn logout(State(portal): State<MockPortal>) -> Response {
    portal.hit("logout");
    let cookie = format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE);
    (
        [(header::SET_COOKIE, cookie)],
        envelope(
            StatusCode::OK,
            "/user/logout",
            "You have logged out successfully",
            Some(json!({})),
        ),
    )
        .into_response()
}

async fn list_users(State(portal): State<MockPortal>) -> Response {
    portal.hit("users");
    envelope(
        StatusCode::OK,
        "/user/list",
        "Users retrieved",
        Some(json!({ "users": [portal.user(EMAIL, false)] })),
    )
}

async fn verify_account(
    State(portal): State<MockPortal>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    portal.hit("verify_account");
    match params.get("key").map(String::as_str) {
        // Proxy failure without an envelope
        Some("broken") => (StatusCode::BAD_GATEWAY, "upstream exploded").into_response(),
        Some("valid") => envelope(
            StatusCode::OK,
            "/user/verify/account",
            "Account verified",
            Some(json!({})),
        ),
        _ => envelope(
            StatusCode::BAD_REQUEST,
            "/user/verify/account",
            "Link has expired. Please reset your password again.",
            None,
        ),
    }
}

// ─── Document endpoints ──────────────────────────────────────

async fn search_documents(
    State(portal): State<MockPortal>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    portal.hit("documents");
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: u32 = params
        .get("size")
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(4);
    *portal.last_search.lock().unwrap() = Some(params);

    let total_pages = DOCUMENT_COUNT.div_ceil(size);
    let first = page * size;
    let content: Vec<Value> = (first..DOCUMENT_COUNT.min(first + size))
        .map(|i| document(&format!("doc-{}", i), &format!("report-{}.pdf", i)))
        .collect();

    envelope(
        StatusCode::OK,
        "/documents/search",
        "Documents retrieved",
        Some(json!({
            "documents": {
                "content": content,
                "number": page,
                "size": size,
                "totalElements": DOCUMENT_COUNT,
                "totalPages": total_pages,
            }
        })),
    )
}

async fn fetch_document(State(portal): State<MockPortal>, Path(id): Path<String>) -> Response {
    portal.hit("document");
    envelope(
        StatusCode::OK,
        "/documents",
        "Document retrieved",
        Some(json!({ "document": document(&id, "report-0.pdf") })),
    )
}

async fn upload_documents(State(portal): State<MockPortal>, mut multipart: Multipart) -> Response {
    portal.hit("upload");
    let mut documents = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("files") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let _ = field.bytes().await;
        if name.ends_with(".exe") {
            return envelope(
                StatusCode::BAD_REQUEST,
                "/documents/upload",
                "File type not allowed",
                None,
            );
        }
        documents.push(document(&format!("new-{}", documents.len()), &name));
        portal.uploads.lock().unwrap().push(name);
    }
    envelope(
        StatusCode::CREATED,
        "/documents/upload",
        "Document(s) uploaded",
        Some(json!({ "documents": documents })),
    )
}

async fn update_document(State(portal): State<MockPortal>, Json(body): Json<Value>) -> Response {
    portal.hit("update_document");
    let id = body["documentId"].as_str().unwrap_or_default();
    let name = body["name"].as_str().unwrap_or_default();
    if name == "fail" {
        return envelope(
            StatusCode::BAD_REQUEST,
            "/documents",
            "Document name is not valid",
            None,
        );
    }
    envelope(
        StatusCode::OK,
        "/documents",
        "Document updated",
        Some(json!({ "document": document(id, name) })),
    )
}

async fn download_document(State(portal): State<MockPortal>, Path(name): Path<String>) -> Response {
    portal.hit("download");
    if name == "missing.pdf" {
        return envelope(
            StatusCode::NOT_FOUND,
            "/documents/download",
            "Document not found",
            None,
        );
    }
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        format!("contents of {}", name),
    )
        .into_response()
}

fn router(portal: MockPortal) -> Router {
    Router::new()
        .route("/user/login", post(login))
        .route("/user/verify/qrcode", post(verify_qr_code))
        .route("/user/verify/account", get(verify_account))
        .route("/user/profile", get(profile))
        .route("/user/update", patch(update_user))
        .route("/user/updaterole", patch(update_role))
        .route("/user/logout", post(logout))
        .route("/user/list", get(list_users))
        .route("/documents", patch(update_document))
        .route("/documents/search", get(search_documents))
        .route("/documents/upload", post(upload_documents))
        .route("/documents/download/{name}", get(download_document))
        .route("/documents/{id}", get(fetch_document))
        .with_state(portal)
}

/// Start the mock portal on an ephemeral port. Returns its base URL.
pub async fn spawn_portal() -> (String, MockPortal) {
    let portal = MockPortal::new();
    let app = router(portal.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock portal");
    let addr = listener.local_addr().expect("Mock portal has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock portal failed");
    });

    (format!("http://{}", addr), portal)
}

/// A client wired to a fresh mock portal.
#[allow(dead_code)]
pub struct TestClient {
    pub client: PortalClient,
    pub session: Arc<Session>,
    pub notices: NoticeLog,
    pub portal: MockPortal,
}

#[allow(dead_code)]
impl TestClient {
    /// Log in with the default account.
    pub async fn login(&self) {
        self.client
            .users()
            .login_user(&docportal::models::UserRequest {
                email: EMAIL.to_string(),
                password: Some(PASSWORD.to_string()),
            })
            .await
            .expect("Login should succeed");
    }
}

/// Create a client (with session and notice log) against a fresh mock
/// portal.
#[allow(dead_code)]
pub async fn test_client() -> TestClient {
    let (api_url, portal) = spawn_portal().await;
    let session = Arc::new(Session::new(SessionFlagStore::in_memory()));
    let notices = NoticeLog::new();
    let client = PortalClient::new(&api_url, session.clone(), Arc::new(notices.clone()))
        .expect("Failed to build client");

    TestClient {
        client,
        session,
        notices,
        portal,
    }
}
