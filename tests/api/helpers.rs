use ::config::{Config, Environment};
use libmailinglist::{
    adapters::InMemoryUserRepository, config::DatabaseSettings, startup::Application, telemetry,
};
use once_cell::sync::Lazy;
use reqwest::Url;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter = "info".to_string();
    let name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = telemetry::get_subscriber(name, default_filter, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber = telemetry::get_subscriber(name, default_filter, std::io::sink);
        telemetry::init_subscriber(subscriber);
    }
});

pub(crate) struct TestApp {
    pub(crate) addr: SocketAddr,
    pub(crate) client: reqwest::Client,
    pub(crate) repository: Arc<InMemoryUserRepository>,
}

impl TestApp {
    // Helper function to create URL from address and path.
    pub(crate) fn with_path(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path))
            .expect("Failed to parse URL from address and path")
    }

    pub(crate) async fn post_subscriptions<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize + ?Sized,
    {
        self.client
            .post(self.with_path("/subscriptions"))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

// Runs the server with an in-memory repository to test the public APIs.
pub(crate) async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
    let addr = listener.local_addr().expect("Failed to read local address");

    let repository = Arc::new(InMemoryUserRepository::default());
    let application = Application::with_listener(listener, repository.clone())
        .expect("Failed to build application");
    assert_eq!(addr.port(), application.port());
    tokio::spawn(application.run_until_stopped());

    TestApp {
        addr,
        client: reqwest::Client::new(),
        repository,
    }
}

// Local Postgres defaults, overridable with `TEST_DATABASE_HOST`,
// `TEST_DATABASE_PORT`, `TEST_DATABASE_USERNAME` and `TEST_DATABASE_PASSWORD`.
fn database_settings() -> DatabaseSettings {
    let mut settings = Config::default();
    settings
        .set_default("host", "127.0.0.1")
        .and_then(|s| s.set_default("port", "5432"))
        .and_then(|s| s.set_default("username", "postgres"))
        .and_then(|s| s.set_default("password", "password"))
        .and_then(|s| s.set_default("database_name", "mailing_list"))
        .expect("Failed to set default database settings");
    settings
        .merge(Environment::with_prefix("test_database"))
        .expect("Failed to read database settings from environment");
    settings
        .try_into()
        .expect("Failed to deserialize database settings")
}

// Creates a fresh, migrated database for a single test.
pub(crate) async fn spawn_database() -> PgPool {
    Lazy::force(&TRACING);

    let mut db_settings = database_settings();
    db_settings.database_name = Uuid::new_v4().to_string();
    configure_database(&db_settings).await
}

async fn configure_database(db_settings: &DatabaseSettings) -> PgPool {
    // Single connection to database.
    let mut conn = PgConnection::connect_with(&db_settings.connection_with_host())
        .await
        .expect("Failed to connect to database host");

    conn.execute(&*format!(
        r#"CREATE DATABASE "{}";"#,
        db_settings.database_name
    ))
    .await
    .expect("Failed to create database");

    let db_pool = PgPool::connect_with(db_settings.connection_with_db())
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to migrate the database");

    db_pool
}
