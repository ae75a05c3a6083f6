use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use quizpress::application::ports::QuizRepository;
use quizpress::application::services::{IngestionService, QuizService, SegmentationEngine};
use quizpress::infrastructure::observability::{TracingConfig, init_tracing};
use quizpress::infrastructure::persistence::{
    InMemoryQuizRepository, PgQuizRepository, connect_pool,
};
use quizpress::infrastructure::storage::ImageStoreFactory;
use quizpress::infrastructure::text_processing::ExtractorFactory;
use quizpress::presentation::config::DatabaseProvider;
use quizpress::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::default().with_settings(settings.logging.json_format),
        settings.server.port,
    );

    let repository: Arc<dyn QuizRepository> = match settings.database.provider {
        DatabaseProvider::Postgres => {
            let pool = connect_pool(&settings.database.url, &settings.database.pool_config())
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Running database migrations...");
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Migrations complete.");

            Arc::new(PgQuizRepository::new(pool))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory quiz repository; quizzes are lost on restart");
            Arc::new(InMemoryQuizRepository::new())
        }
    };

    let image_store =
        ImageStoreFactory::create(&settings.storage).context("Failed to create image store")?;

    let timeout = settings.ingestion.extraction_timeout();
    let limits = settings.ingestion.limits();
    let policy = settings.ingestion.policy();
    tracing::info!(?policy, "Segmentation policy configured");

    let ingestion_service = Arc::new(IngestionService::new(
        ExtractorFactory::text_extractor(timeout, limits),
        ExtractorFactory::image_extractor(timeout, limits),
        SegmentationEngine::new(policy),
    ));
    let quiz_service = Arc::new(QuizService::new(
        repository,
        image_store,
        settings.storage.public_base_url.clone(),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        ingestion_service,
        quiz_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!(%environment, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
