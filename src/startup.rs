use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing_actix_web::TracingLogger;

use crate::adapters::{InMemoryUserRepository, PostgresUserRepository};
use crate::config::{DatabaseSettings, Settings};
use crate::routes::{health_check, subscribe};
use crate::usecases::{RegisterUserOnMailingList, UserRepository};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let repository: Arc<dyn UserRepository> = match &config.database {
            Some(database) => {
                let db_pool = get_connection_pool(database).await?;
                sqlx::migrate!("./migrations").run(&db_pool).await?;
                Arc::new(PostgresUserRepository::new(db_pool))
            }
            None => {
                tracing::info!("No database configured, users are kept in memory");
                Arc::new(InMemoryUserRepository::default())
            }
        };

        let listener = TcpListener::bind(config.application.address())?;
        Self::with_listener(listener, repository)
    }

    /// Serves on an already bound listener with the given repository.
    pub fn with_listener(
        listener: TcpListener,
        repository: Arc<dyn UserRepository>,
    ) -> Result<Self, anyhow::Error> {
        let port = listener.local_addr()?.port();
        let server = run(listener, repository)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, repository: Arc<dyn UserRepository>) -> std::io::Result<Server> {
    let register_user = web::Data::new(RegisterUserOnMailingList::new(repository));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(register_user.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/subscriptions", web::post().to(subscribe))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub async fn get_connection_pool(database: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .connect_timeout(std::time::Duration::from_secs(2))
        .connect_with(database.connection_with_db())
        .await
}
