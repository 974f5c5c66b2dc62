//! Shared setup for portal-service integration tests.
//!
//! Tests run the full router against the in-memory store, so no external
//! services are needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use portal_core::middleware::rate_limit::create_ip_rate_limiter;
use portal_service::{
    build_router,
    config::{
        AuthTokenConfig, DatabaseConfig, Environment, PortalConfig, RateLimitConfig,
        SecurityConfig, SwaggerConfig,
    },
    models::{Admin, AppRole, Division, Program},
    services::{
        identity::IdentityClaims, AdminManagementService, AdminTokenService, AuthService,
        JwtIdentityProvider, MemberService, ProgramService,
    },
    store::{MemoryStore, PortalStore},
    utils::{hash_password, Password},
    AppState,
};
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TOKEN_SECRET: &str = "integration-test-token-secret-0123456789";
pub const IDENTITY_SECRET: &str = "integration-test-identity-secret";

pub fn test_config() -> PortalConfig {
    PortalConfig {
        common: portal_core::config::Config { port: 8080 },
        environment: Environment::Dev,
        service_name: "portal-service".to_string(),
        service_version: "test".to_string(),
        log_level: "error".to_string(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        auth: AuthTokenConfig {
            token_secret: TOKEN_SECRET.to_string(),
            identity_jwt_secret: IDENTITY_SECRET.to_string(),
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        swagger: SwaggerConfig { enabled: false },
        rate_limit: RateLimitConfig {
            login_attempts: 100,
            login_window_seconds: 60,
            global_ip_limit: 1000,
            global_ip_window_seconds: 60,
        },
    }
}

pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: AdminTokenService,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::spawn_with_config(test_config())
    }

    pub fn spawn_with_config(config: PortalConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let dyn_store: Arc<dyn PortalStore> = store.clone();

        let tokens = AdminTokenService::new(&config.auth.token_secret);
        let identity = Arc::new(JwtIdentityProvider::new(&config.auth.identity_jwt_secret));

        let state = AppState {
            config: config.clone(),
            store: dyn_store.clone(),
            identity,
            auth_service: AuthService::new(dyn_store.clone(), tokens.clone()),
            program_service: ProgramService::new(dyn_store.clone()),
            member_service: MemberService::new(dyn_store.clone()),
            admin_service: AdminManagementService::new(dyn_store.clone()),
            login_rate_limiter: create_ip_rate_limiter(
                config.rate_limit.login_attempts,
                config.rate_limit.login_window_seconds,
            ),
            ip_rate_limiter: create_ip_rate_limiter(
                config.rate_limit.global_ip_limit,
                config.rate_limit.global_ip_window_seconds,
            ),
        };

        let app = build_router(state).expect("Failed to build router");

        Self { app, store, tokens }
    }

    pub async fn seed_division(&self, name: &str) -> Division {
        let division = Division::new(name.to_string(), None);
        self.store.insert_division(&division).await.unwrap();
        division
    }

    pub async fn seed_admin(&self, division_id: Uuid, phone: &str, password: &str) -> Admin {
        let hash = hash_password(&Password::new(password.to_string()));
        let admin = Admin::new(Uuid::new_v4(), division_id, phone.to_string(), hash.into_string());
        self.store.insert_admin(&admin).await.unwrap();
        admin
    }

    pub async fn seed_super_admin(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        self.store
            .insert_user_role(user_id, AppRole::SuperAdmin)
            .await
            .unwrap();
        (user_id, mint_identity_jwt(user_id))
    }

    pub async fn seed_program(&self, division_id: Uuid, name: &str, active: bool) -> Program {
        let mut program = Program::new(
            division_id,
            None,
            true,
            name.to_string(),
            None,
            None,
            None,
            Uuid::new_v4(),
        );
        program.is_active = active;
        self.store.insert_program(&program).await.unwrap();
        program
    }

    pub async fn login(&self, phone: &str, password: &str) -> Response<Body> {
        self.post_json(
            "/admin/auth",
            serde_json::json!({ "phone": phone, "password": password }),
            &[],
        )
        .await
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
        headers: &[(&str, &str)],
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.app
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, path: &str, headers: &[(&str, &str)]) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn patch_json(
        &self,
        path: &str,
        body: serde_json::Value,
        headers: &[(&str, &str)],
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("PATCH")
            .uri(path)
            .header("content-type", "application/json");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.app
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }
}

/// Mint an identity-provider JWT against the test secret.
pub fn mint_identity_jwt(user_id: Uuid) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &IdentityClaims {
            sub: user_id,
            email: Some("test@example.org".to_string()),
            exp: Utc::now().timestamp() + 3600,
        },
        &EncodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_error_body(
    response: Response<Body>,
    status: StatusCode,
    message: &str,
) {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["error"], message);
}
