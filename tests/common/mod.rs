#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use ironpass::router::init_router;
use ironpass::state::AppState;
use ironpass_config::AppConfig;
use ironpass_core::hash_password;
use ironpass_db::MemoryStore;
use ironpass_models::{NewPlan, NewSubscription, NewUser, Plan, PlanFeatures, Role, User};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "hunter22";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryStore,
}

pub fn config_for(env: &str) -> AppConfig {
    let env = env.to_string();
    AppConfig::from_lookup(move |key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "APP_ENV" => Some(env.clone()),
        _ => None,
    })
    .unwrap()
}

pub fn spawn_app() -> TestApp {
    spawn_app_in("development")
}

pub fn spawn_app_in(env: &str) -> TestApp {
    let store = MemoryStore::new();
    let state = AppState::new(config_for(env), store.clone());
    TestApp {
        router: init_router(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    /// Inserts a member directly and returns it with a freshly issued token.
    pub async fn seed_user(&self, email: &str, role: Role) -> (User, String) {
        let user = self
            .state
            .users
            .create(NewUser {
                name: "Test Member".to_string(),
                email: email.to_string(),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                city: "Lagos".to_string(),
                contact: "0801234567".to_string(),
                role,
            })
            .await
            .unwrap();
        let token = self.state.tokens.issue(user.id, user.role).unwrap();
        (user, token)
    }

    pub async fn seed_plan(&self, name: &str, created_by: Uuid) -> Plan {
        self.state
            .plans
            .create(NewPlan {
                plan_name: name.to_string(),
                monthly_plan_amount: 30.0,
                yearly_plan_amount: 300.0,
                is_popular: false,
                is_active: true,
                features: PlanFeatures::default(),
                created_by,
            })
            .await
            .unwrap()
    }

    pub async fn seed_subscription(&self, user: &User, plan: &Plan) -> Uuid {
        self.state
            .subscriptions
            .create(NewSubscription {
                user_id: user.id,
                plan_id: plan.id,
                user_name: user.name.clone(),
                plan_type: "monthly".to_string(),
                plan_amount: plan.monthly_plan_amount,
                start_date: None,
                end_date: None,
                status: "active".to_string(),
                payment_status: "paid".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub set_cookie: Option<String>,
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, None)
}

pub fn unique_email() -> String {
    format!("member-{}@example.com", Uuid::new_v4().simple())
}
