// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use frontend::{
    config::Config,
    session::{Identity, MemoryStorage},
    state::AppState,
};
use serde_json::{Value, json};

/// A request the fake API received.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    /// Path plus query string.
    pub target: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct Db {
    pub hits: Vec<Hit>,
    pub posts: Vec<Value>,
    pub categories: Vec<Value>,
    pub post_categories: Vec<Value>,
    pub profiles: HashMap<String, Value>,
    /// The next N `GET /profile/{id}` calls answer 500.
    pub profile_failures: usize,
    /// (reactionId, postId, userId)
    pub reactions: Vec<(String, String, String)>,
    pub comments: Vec<Value>,
    pub shares: Vec<Value>,
    /// (followerId, followedId)
    pub follows: Vec<(String, String)>,
    /// (userId, postId)
    pub bookmarks: Vec<(String, String)>,
    pub uploads: Vec<Value>,
    pub last_body: HashMap<String, Value>,
    pub fail_post_categories_create: bool,
    /// Report `userLiked` without the `userReactionId` needed to unlike.
    pub omit_reaction_ids: bool,
    /// Per-request latency for `GET /blog-posts/{id}`, popped in arrival order.
    /// The response is built before the delay, so a delayed answer is stale.
    pub post_delays: VecDeque<Duration>,
    pub next_id: usize,
    pub base_url: String,
}

impl Db {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn remember(&mut self, route: &str, body: &Value) {
        self.last_body.insert(route.to_string(), body.clone());
    }

    fn post_detail(&self, post_id: &str, viewer: Option<&str>) -> Option<Value> {
        let base = self.posts.iter().find(|p| p["postId"] == post_id)?;
        let mut detail = base.clone();

        let reactions: Vec<_> = self.reactions.iter().filter(|(_, p, _)| p == post_id).collect();
        let mine = viewer.and_then(|v| reactions.iter().find(|(_, _, u)| u == v));
        let author = base["authorId"].as_str().unwrap_or_default();

        detail["likes"] = json!(reactions.len());
        detail["userLiked"] = json!(mine.is_some());
        detail["userReactionId"] = match mine {
            Some((id, _, _)) if !self.omit_reaction_ids => json!(id),
            _ => Value::Null,
        };
        detail["shareCount"] = json!(self.shares.iter().filter(|s| s["postId"] == post_id).count());
        detail["comments"] = json!(
            self.comments
                .iter()
                .filter(|c| c["postId"] == post_id)
                .map(|c| json!({
                    "userId": c["userId"],
                    "username": self.profiles.get(c["userId"].as_str().unwrap_or_default()).map(|p| p["username"].clone()).unwrap_or(Value::Null),
                    "content": c["content"],
                    "createdAt": c["createdAt"],
                }))
                .collect::<Vec<_>>()
        );
        detail["isFollowingAuthor"] = json!(viewer.is_some_and(|v| self.follows.iter().any(|(f, a)| f == v && a == author)));
        detail["isBookmarked"] = json!(viewer.is_some_and(|v| self.bookmarks.iter().any(|(u, p)| u == v && p == post_id)));
        Some(detail)
    }
}

/// In-process stand-in for both remote services, recording every request.
#[derive(Clone, Default)]
pub struct FakeApi {
    db: Arc<Mutex<Db>>,
}

impl FakeApi {
    pub fn db(&self) -> MutexGuard<'_, Db> {
        self.db.lock().unwrap()
    }

    pub fn hits(&self) -> Vec<String> {
        self.db()
            .hits
            .iter()
            .map(|h| format!("{} {}", h.method, h.target))
            .collect()
    }

    /// Requests whose "METHOD target" starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.hits().iter().filter(|h| h.starts_with(prefix)).count()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.db().hits.last().and_then(|h| h.authorization.clone())
    }

    pub fn clear_hits(&self) {
        self.db().hits.clear();
    }

    pub fn last_body(&self, route: &str) -> Option<Value> {
        self.db().last_body.get(route).cloned()
    }

    pub fn seed_post(&self, post_id: &str, author_id: &str, title: &str) {
        self.db().posts.push(json!({
            "postId": post_id,
            "authorId": author_id,
            "title": title,
            "content": format!("<p>Body of {}</p>", title),
            "createdAt": "2024-03-05T10:00:00Z",
            "status": "published",
        }));
    }

    pub fn seed_profile(&self, user_id: &str, username: &str) {
        self.db().profiles.insert(
            user_id.to_string(),
            json!({ "userId": user_id, "username": username, "name": username.to_uppercase() }),
        );
    }

    pub fn seed_category(&self, category_id: &str, name: &str) {
        self.db().categories.push(json!({ "categoryId": category_id, "name": name }));
    }

    pub fn link(&self, post_id: &str, category_id: &str) {
        self.db()
            .post_categories
            .push(json!({ "postId": post_id, "categoryId": category_id }));
    }

    pub fn fail_next_profile_lookups(&self, n: usize) {
        self.db().profile_failures = n;
    }
}

/// Spawns the fake API on a random port.
/// Returns the base URL (e.g., "http://127.0.0.1:12345") and a handle on its state.
pub async fn spawn_api() -> (String, FakeApi) {
    let fake = FakeApi::default();

    let app = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/profile/upload-url", post(upload_url))
        .route("/profile/{id}", get(get_profile).put(put_profile))
        .route("/s3/{key}", put(s3_put))
        .route("/blog-posts", get(list_posts).post(create_post))
        .route("/blog-posts/{id}", get(get_post))
        .route("/categories", get(list_categories))
        .route("/post-categories", get(list_post_categories).post(create_post_category))
        .route("/users/{id}/posts", get(user_posts))
        .route("/users/{id}/bookmarks", get(user_bookmarks))
        .route("/post-reactions", post(create_reaction))
        .route("/post-reactions/{id}", delete(delete_reaction))
        .route("/post-comments", post(create_comment))
        .route("/post-shares", post(create_share))
        .route("/user-follows", post(create_follow))
        .route("/user-follows/{follower}/{followed}", delete(delete_follow))
        .route("/post-bookmarks", post(create_bookmark))
        .route("/post-bookmarks/{user}/{post}", delete(delete_bookmark))
        .route("/upload-media", post(upload_media))
        .layer(middleware::from_fn_with_state(fake.clone(), record))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    fake.db().base_url = address.clone();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, fake)
}

/// Client state with an in-memory session, pointed at `base_url`.
pub fn app_state(base_url: &str) -> AppState {
    AppState::new(Config::for_base_url(base_url), Arc::new(MemoryStorage::new()))
}

pub fn log_in(state: &AppState, user_id: &str, username: &str) {
    state
        .session
        .save(&Identity {
            user_id: user_id.to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            token: None,
        })
        .unwrap();
}

async fn record(State(fake): State<FakeApi>, req: Request, next: Next) -> Response {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.db().hits.push(Hit {
        method: req.method().to_string(),
        target,
        authorization,
    });
    next.run(req).await
}

fn created(id: &str, resource: &str) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Created", "id": id, "resource": resource })),
    )
        .into_response()
}

async fn register(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    db.remember("register", &body);
    if body["username"] == "taken" {
        return (StatusCode::CONFLICT, Json(json!({ "error": "Username already exists" }))).into_response();
    }
    let user_id = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    Json(json!({
        "message": "User registered successfully",
        "user": { "userId": user_id, "username": body["username"], "email": body["email"] },
    }))
    .into_response()
}

async fn login(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    fake.db().remember("login", &body);
    if body["password"] != "password123" {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid credentials" }))).into_response();
    }
    Json(json!({
        "message": "Login successful",
        "token": "issued-token",
        "user": { "userId": "u1", "username": "alice", "email": body["email"] },
    }))
    .into_response()
}

async fn forgot_password(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Json<Value> {
    fake.db().remember("forgot-password", &body);
    Json(json!({ "message": "Reset token sent" }))
}

async fn reset_password(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Json<Value> {
    fake.db().remember("reset-password", &body);
    Json(json!({}))
}

async fn get_profile(State(fake): State<FakeApi>, Path(id): Path<String>) -> Response {
    let mut db = fake.db();
    if db.profile_failures > 0 {
        db.profile_failures -= 1;
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))).into_response();
    }
    match db.profiles.get(&id) {
        Some(profile) => Json(profile.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "User not found" }))).into_response(),
    }
}

async fn put_profile(State(fake): State<FakeApi>, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    db.remember("put-profile", &body);
    let profile = db
        .profiles
        .entry(id.clone())
        .or_insert_with(|| json!({ "userId": id }));
    if let (Some(target), Some(fields)) = (profile.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(json!({ "message": "Profile updated" })).into_response()
}

async fn upload_url(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Json<Value> {
    let mut db = fake.db();
    db.remember("upload-url", &body);
    let upload_url = format!("{}/s3/avatar", db.base_url);
    Json(json!({ "uploadUrl": upload_url, "fileUrl": "https://cdn.example.com/avatar.png" }))
}

async fn s3_put(State(fake): State<FakeApi>, Path(key): Path<String>, body: Bytes) -> StatusCode {
    fake.db().uploads.push(json!({ "key": key, "size": body.len() }));
    StatusCode::OK
}

async fn list_posts(State(fake): State<FakeApi>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let db = fake.db();
    let offset = query.get("offset").and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
    let limit = query
        .get("limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(db.posts.len());
    let items: Vec<Value> = db.posts.iter().skip(offset).take(limit).cloned().collect();
    Json(json!({ "items": items, "count": items.len() }))
}

async fn create_post(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    db.remember("create-post", &body);
    let id = db.next_id("p_new");
    let mut post = body.clone();
    post["postId"] = json!(id);
    db.posts.push(post);
    created(&id, "blog-post")
}

async fn get_post(
    State(fake): State<FakeApi>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (detail, delay) = {
        let mut db = fake.db();
        let delay = db.post_delays.pop_front();
        (db.post_detail(&id, query.get("currentUserId").map(String::as_str)), delay)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    match detail {
        // The real service answers with a one-element array
        Some(detail) => Json(json!([detail])).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Post not found" }))).into_response(),
    }
}

async fn list_categories(State(fake): State<FakeApi>) -> Json<Value> {
    Json(json!({ "items": fake.db().categories.clone() }))
}

async fn list_post_categories(State(fake): State<FakeApi>) -> Json<Value> {
    Json(json!({ "items": fake.db().post_categories.clone() }))
}

async fn create_post_category(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    db.remember("post-categories", &body);
    if db.fail_post_categories_create {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "link failed" }))).into_response();
    }
    db.post_categories.push(body);
    Json(json!({ "message": "Linked" })).into_response()
}

async fn user_posts(State(fake): State<FakeApi>, Path(id): Path<String>) -> Json<Value> {
    let db = fake.db();
    let posts: Vec<Value> = db.posts.iter().filter(|p| p["authorId"] == id.as_str()).cloned().collect();
    Json(json!(posts))
}

async fn user_bookmarks(State(fake): State<FakeApi>, Path(id): Path<String>) -> Json<Value> {
    let db = fake.db();
    let items: Vec<Value> = db
        .bookmarks
        .iter()
        .filter(|(u, _)| *u == id)
        .filter_map(|(_, p)| db.posts.iter().find(|post| post["postId"] == p.as_str()))
        .map(|post| json!({ "postId": post["postId"], "title": post["title"], "authorUsername": "writer" }))
        .collect();
    Json(json!(items))
}

async fn create_reaction(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    db.remember("post-reactions", &body);
    let id = db.next_id("r");
    let post_id = body["postId"].as_str().unwrap_or_default().to_string();
    let user_id = body["userId"].as_str().unwrap_or_default().to_string();
    db.reactions.push((id.clone(), post_id, user_id));
    created(&id, "reaction")
}

async fn delete_reaction(State(fake): State<FakeApi>, Path(id): Path<String>) -> StatusCode {
    fake.db().reactions.retain(|(r, _, _)| *r != id);
    StatusCode::NO_CONTENT
}

async fn create_comment(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    db.remember("post-comments", &body);
    let id = db.next_id("c");
    db.comments.push(body);
    created(&id, "comment")
}

async fn create_share(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    db.remember("post-shares", &body);
    let id = db.next_id("s");
    db.shares.push(body);
    created(&id, "share")
}

async fn create_follow(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    let follower = body["followerId"].as_str().unwrap_or_default().to_string();
    let followed = body["followedId"].as_str().unwrap_or_default().to_string();
    db.follows.push((follower, followed));
    created("f", "follow")
}

async fn delete_follow(State(fake): State<FakeApi>, Path((follower, followed)): Path<(String, String)>) -> StatusCode {
    fake.db().follows.retain(|(f, a)| !(*f == follower && *a == followed));
    StatusCode::OK
}

async fn create_bookmark(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let mut db = fake.db();
    let user = body["userId"].as_str().unwrap_or_default().to_string();
    let post_id = body["postId"].as_str().unwrap_or_default().to_string();
    db.bookmarks.push((user, post_id));
    created("b", "bookmark")
}

async fn delete_bookmark(State(fake): State<FakeApi>, Path((user, post_id)): Path<(String, String)>) -> StatusCode {
    fake.db().bookmarks.retain(|(u, p)| !(*u == user && *p == post_id));
    StatusCode::OK
}

async fn upload_media(State(fake): State<FakeApi>, Json(body): Json<Value>) -> Json<Value> {
    let mut db = fake.db();
    db.remember("upload-media", &body);
    let name = body["fileName"].as_str().unwrap_or("file").to_string();
    Json(json!({ "url": format!("https://cdn.example.com/media/{}", name) }))
}
