//! In-memory stand-in for the activities backend, used by integration tests.
//!
//! Mirrors the real API under an `/api` prefix: bearer-token auth, FastAPI
//! style `{"detail": ...}` error envelopes, paginated list responses, and the
//! activities/categories/users resources. State lives in a `RwLock`-guarded
//! map per resource; tokens are minted per login and never expire.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const TIMESTAMP: &str = "2026-01-01T00:00:00";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id_user: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Activity {
    pub id_activity: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub due_date: Option<String>,
    pub id_user: Option<i64>,
    pub id_category: Option<i64>,
    pub state: String,
    pub created_by: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id_category: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Clone)]
struct Account {
    record: User,
    password: String,
}

#[derive(Default)]
pub struct Backend {
    accounts: HashMap<i64, Account>,
    activities: HashMap<i64, Activity>,
    categories: HashMap<i64, Category>,
    // bearer token -> user id
    sessions: HashMap<String, i64>,
    next_id: i64,
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Backend>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Backend::default()));
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/activities", get(list_activities).post(create_activity))
        .route(
            "/api/activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/api/activities/{id}/state", patch(change_activity_state))
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Error envelope and auth
// ---------------------------------------------------------------------------

type Rejection = (StatusCode, Json<serde_json::Value>);

fn detail(status: StatusCode, message: &str) -> Rejection {
    (status, Json(json!({ "detail": message })))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn require_user(db: &Db, headers: &HeaderMap) -> Result<i64, Rejection> {
    let token = bearer_token(headers)
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Not authenticated"))?;
    let guard = db.read().await;
    guard
        .sessions
        .get(token)
        .copied()
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Not authenticated"))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), Rejection> {
    let mut backend = db.write().await;
    if backend
        .accounts
        .values()
        .any(|a| a.record.email == input.email)
    {
        return Err(detail(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let id = backend.next_id();
    let record = User {
        id_user: id,
        username: input.username,
        email: input.email,
        role: "operador".to_string(),
        is_active: true,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    };
    backend.accounts.insert(
        id,
        Account {
            record: record.clone(),
            password: input.password,
        },
    );
    Ok((StatusCode::CREATED, Json(record)))
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, Rejection> {
    let mut backend = db.write().await;
    let id = backend
        .accounts
        .values()
        .find(|a| a.record.email == input.email && a.password == input.password)
        .map(|a| a.record.id_user)
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;

    let token = Uuid::new_v4().simple().to_string();
    backend.sessions.insert(token.clone(), id);
    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

async fn me(State(db): State<Db>, headers: HeaderMap) -> Result<Json<User>, Rejection> {
    let id = require_user(&db, &headers).await?;
    let backend = db.read().await;
    backend
        .accounts
        .get(&id)
        .map(|a| Json(a.record.clone()))
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Not authenticated"))
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

fn default_limit() -> usize {
    20
}

fn default_priority() -> String {
    "media".to_string()
}

#[derive(Deserialize)]
pub struct ActivityQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub state: Option<String>,
    pub priority: Option<String>,
    pub id_category: Option<i64>,
    pub id_user: Option<i64>,
    pub search: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Deserialize)]
pub struct ActivityCreate {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub due_date: Option<String>,
    pub id_user: Option<i64>,
    pub id_category: Option<i64>,
}

#[derive(Deserialize)]
pub struct ActivityUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub id_user: Option<i64>,
    pub id_category: Option<i64>,
}

#[derive(Deserialize)]
pub struct ChangeState {
    pub state: String,
}

#[derive(Serialize)]
pub struct ActivityPage {
    pub activities: Vec<Activity>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

async fn list_activities(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(q): Query<ActivityQuery>,
) -> Result<Json<ActivityPage>, Rejection> {
    require_user(&db, &headers).await?;
    let backend = db.read().await;

    let mut matched: Vec<Activity> = backend
        .activities
        .values()
        .filter(|a| q.include_inactive || a.is_active)
        .filter(|a| q.state.as_ref().is_none_or(|s| &a.state == s))
        .filter(|a| q.priority.as_ref().is_none_or(|p| &a.priority == p))
        .filter(|a| q.id_category.is_none_or(|c| a.id_category == Some(c)))
        .filter(|a| q.id_user.is_none_or(|u| a.id_user == Some(u)))
        .filter(|a| {
            q.search
                .as_ref()
                .is_none_or(|s| a.title.to_lowercase().contains(&s.to_lowercase()))
        })
        .cloned()
        .collect();
    matched.sort_by_key(|a| a.id_activity);

    let total = matched.len() as i64;
    let limit = q.limit.max(1);
    let page_items: Vec<Activity> = matched.into_iter().skip(q.skip).take(limit).collect();

    Ok(Json(ActivityPage {
        activities: page_items,
        total,
        page: (q.skip / limit) as i64 + 1,
        per_page: limit as i64,
    }))
}

async fn get_activity(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Activity>, Rejection> {
    require_user(&db, &headers).await?;
    let backend = db.read().await;
    backend
        .activities
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Activity not found"))
}

async fn create_activity(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ActivityCreate>,
) -> Result<(StatusCode, Json<Activity>), Rejection> {
    let user_id = require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    let id = backend.next_id();
    let activity = Activity {
        id_activity: id,
        title: input.title,
        description: input.description,
        priority: input.priority,
        due_date: input.due_date,
        id_user: input.id_user,
        id_category: input.id_category,
        state: "pendiente".to_string(),
        created_by: user_id,
        is_active: true,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    };
    backend.activities.insert(id, activity.clone());
    Ok((StatusCode::CREATED, Json(activity)))
}

async fn update_activity(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<ActivityUpdate>,
) -> Result<Json<Activity>, Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    let activity = backend
        .activities
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Activity not found"))?;
    if let Some(title) = input.title {
        activity.title = title;
    }
    if let Some(description) = input.description {
        activity.description = Some(description);
    }
    if let Some(priority) = input.priority {
        activity.priority = priority;
    }
    if let Some(due_date) = input.due_date {
        activity.due_date = Some(due_date);
    }
    if let Some(id_user) = input.id_user {
        activity.id_user = Some(id_user);
    }
    if let Some(id_category) = input.id_category {
        activity.id_category = Some(id_category);
    }
    Ok(Json(activity.clone()))
}

async fn change_activity_state(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<ChangeState>,
) -> Result<Json<Activity>, Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    let activity = backend
        .activities
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Activity not found"))?;
    activity.state = input.state;
    Ok(Json(activity.clone()))
}

async fn delete_activity(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    backend
        .activities
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Activity not found"))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

fn default_color() -> String {
    "#3498db".to_string()
}

#[derive(Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize)]
pub struct CategoryPage {
    pub categories: Vec<Category>,
    pub total: i64,
}

async fn list_categories(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<CategoryPage>, Rejection> {
    require_user(&db, &headers).await?;
    let backend = db.read().await;
    let mut categories: Vec<Category> = backend.categories.values().cloned().collect();
    categories.sort_by_key(|c| c.id_category);
    let total = categories.len() as i64;
    Ok(Json(CategoryPage { categories, total }))
}

async fn get_category(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Category>, Rejection> {
    require_user(&db, &headers).await?;
    let backend = db.read().await;
    backend
        .categories
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Category not found"))
}

async fn create_category(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<Category>), Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    let id = backend.next_id();
    let category = Category {
        id_category: id,
        name: input.name,
        description: input.description,
        color: input.color,
        is_active: true,
        created_at: TIMESTAMP.to_string(),
    };
    backend.categories.insert(id, category.clone());
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<CategoryUpdate>,
) -> Result<Json<Category>, Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    let category = backend
        .categories
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Category not found"))?;
    if let Some(name) = input.name {
        category.name = name;
    }
    if let Some(description) = input.description {
        category.description = Some(description);
    }
    if let Some(color) = input.color {
        category.color = color;
    }
    if let Some(is_active) = input.is_active {
        category.is_active = is_active;
    }
    Ok(Json(category.clone()))
}

async fn delete_category(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    backend
        .categories
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Category not found"))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub include_inactive: bool,
}

fn default_role() -> String {
    "operador".to_string()
}

#[derive(Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

async fn list_users(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(q): Query<UserQuery>,
) -> Result<Json<UserPage>, Rejection> {
    require_user(&db, &headers).await?;
    let backend = db.read().await;
    let mut users: Vec<User> = backend
        .accounts
        .values()
        .map(|a| a.record.clone())
        .filter(|u| q.include_inactive || u.is_active)
        .collect();
    users.sort_by_key(|u| u.id_user);

    let total = users.len() as i64;
    let limit = q.limit.max(1);
    let page_items: Vec<User> = users.into_iter().skip(q.skip).take(limit).collect();

    Ok(Json(UserPage {
        users: page_items,
        total,
        page: (q.skip / limit) as i64 + 1,
        per_page: limit as i64,
    }))
}

async fn get_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<User>, Rejection> {
    require_user(&db, &headers).await?;
    let backend = db.read().await;
    backend
        .accounts
        .get(&id)
        .map(|a| Json(a.record.clone()))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found"))
}

async fn create_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>), Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    if backend
        .accounts
        .values()
        .any(|a| a.record.email == input.email)
    {
        return Err(detail(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let id = backend.next_id();
    let record = User {
        id_user: id,
        username: input.username,
        email: input.email,
        role: input.role,
        is_active: true,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    };
    backend.accounts.insert(
        id,
        Account {
            record: record.clone(),
            password: input.password,
        },
    );
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<UserUpdate>,
) -> Result<Json<User>, Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    let account = backend
        .accounts
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found"))?;
    if let Some(username) = input.username {
        account.record.username = username;
    }
    if let Some(email) = input.email {
        account.record.email = email;
    }
    if let Some(role) = input.role {
        account.record.role = role;
    }
    if let Some(is_active) = input.is_active {
        account.record.is_active = is_active;
    }
    Ok(Json(account.record.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, Rejection> {
    require_user(&db, &headers).await?;
    let mut backend = db.write().await;
    backend
        .accounts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_without_password() {
        let user = User {
            id_user: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            role: "admin".to_string(),
            is_active: true,
            created_at: TIMESTAMP.to_string(),
            updated_at: TIMESTAMP.to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "ana");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn activity_create_defaults_priority_to_media() {
        let input: ActivityCreate = serde_json::from_str(r#"{"title":"Plan"}"#).unwrap();
        assert_eq!(input.priority, "media");
        assert!(input.due_date.is_none());
    }

    #[test]
    fn category_create_defaults_color() {
        let input: CategoryCreate = serde_json::from_str(r#"{"name":"Work"}"#).unwrap();
        assert_eq!(input.color, "#3498db");
    }

    #[test]
    fn bearer_token_requires_the_scheme_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert("authorization", "abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
