//! Test harnesses for integration testing.
//!
//! - `AppHarness`: memory stores, mock email and a real router, no containers
//! - `TestHarness`: PostgreSQL in a shared testcontainer. Each harness gets
//!   its own freshly migrated database so fallback writes never leak
//!   between tests.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use server_core::common::{Actor, MemberId};
use server_core::domains::customers::PostgresCustomerStore;
use server_core::domains::installers::PostgresInstallerStore;
use server_core::kernel::{MockEmailSender, ServerDeps, TestDependencies};
use server_core::server::build_app;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tower::ServiceExt;
use uuid::Uuid;

/// Route test logs through the test writer. Run with `RUST_LOG=debug` and
/// `--nocapture` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// In-memory application harness
// =============================================================================

pub struct AppHarness {
    pub fakes: TestDependencies,
    pub deps: ServerDeps,
    pub router: Router,
    pub admin_id: MemberId,
    pub staff_id: MemberId,
    pub worker: JoinHandle<()>,
}

impl AppHarness {
    pub fn new() -> Self {
        Self::with_email(MockEmailSender::new())
    }

    pub fn with_email(email: MockEmailSender) -> Self {
        Self::build(email, 16)
    }

    pub fn build(email: MockEmailSender, queue_capacity: usize) -> Self {
        init_tracing();

        let fakes = TestDependencies::with_email(email);
        let (deps, worker) = fakes.start_server_deps(queue_capacity);
        let router = build_app(deps.clone(), &[]);

        Self {
            fakes,
            deps,
            router,
            admin_id: MemberId::new(),
            staff_id: MemberId::new(),
            worker,
        }
    }

    pub fn admin(&self) -> Actor {
        Actor::new(self.admin_id, true)
    }

    /// Authenticated user without the admin role
    pub fn staff(&self) -> Actor {
        Actor::new(self.staff_id, false)
    }

    pub fn admin_token(&self) -> String {
        self.fakes
            .jwt_service
            .create_token(
                self.admin_id.into_uuid(),
                "admin@example.com".to_string(),
                true,
            )
            .expect("Failed to create admin token")
    }

    pub fn staff_token(&self) -> String {
        self.fakes
            .jwt_service
            .create_token(
                self.staff_id.into_uuid(),
                "staff@example.com".to_string(),
                false,
            )
            .expect("Failed to create staff token")
    }

    /// Send one request through the router and decode the JSON body.
    ///
    /// Empty bodies decode to `Null`; non-JSON bodies to a string.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = body.map(|json| json.to_string());
        self.request_raw(method, uri, token, body.as_deref()).await
    }

    /// Like `request`, but sends `body` verbatim as `application/json`
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(raw) => builder
                .header("content-type", "application/json")
                .body(Body::from(raw.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }
}

impl Default for AppHarness {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// PostgreSQL harness
// =============================================================================

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    admin_url: String,
    base_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let base_url = format!("postgresql://postgres:postgres@{}:{}", pg_host, pg_port);

        Ok(Self {
            admin_url: format!("{}/postgres", base_url),
            base_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// PostgreSQL-backed stores over a private database.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     ctx.installers.insert(&installer).await.unwrap();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub installers: PostgresInstallerStore,
    pub customers: PostgresCustomerStore,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_name = format!("test_{}", Uuid::new_v4().simple());
        let admin_pool = PgPool::connect(&infra.admin_url)
            .await
            .context("Failed to connect to Postgres")?;
        sqlx::query(&format!("CREATE DATABASE {}", db_name))
            .execute(&admin_pool)
            .await
            .context("Failed to create test database")?;
        admin_pool.close().await;

        let db_pool = PgPool::connect(&format!("{}/{}", infra.base_url, db_name))
            .await
            .context("Failed to connect to test database")?;

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            installers: PostgresInstallerStore::new(db_pool.clone()),
            customers: PostgresCustomerStore::new(db_pool.clone()),
            db_pool,
        })
    }
}
