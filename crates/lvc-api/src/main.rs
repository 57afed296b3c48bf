use std::env;
use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use lvc_bedrock::{BedrockReportModel, ReportGenerator};
use lvc_core::provider::DocumentProvider;
use lvc_pdf::PdfTextExtractor;
use lvc_storage::{LocalProvider, S3Provider};
use tracing_subscriber::EnvFilter;

mod analyze;
mod config;
mod error;
mod middleware;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use analyze::Analyzer;
use config::{AppConfig, Backend};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(backend = ?config.backend, model_id = %config.model_id, "starting");

    let aws = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let provider: Arc<dyn DocumentProvider> = match &config.backend {
        Backend::Local { root } => Arc::new(LocalProvider::new(root.clone())),
        Backend::S3 { bucket, prefix } => Arc::new(
            S3Provider::new(&aws, bucket.clone())
                .prefix(prefix.clone())
                .scratch_dir(config.scratch_dir.clone())
                .presign_ttl(config.presign_ttl),
        ),
    };

    let model = BedrockReportModel::new(&aws, config.model_id.clone(), config.max_output_tokens);
    let generator =
        ReportGenerator::new(Arc::new(model)).max_prompt_chars(config.max_prompt_chars);
    let analyzer = Analyzer::new(Arc::clone(&provider), Arc::new(PdfTextExtractor), generator);

    let state = AppState {
        provider,
        analyzer: Arc::new(analyzer),
    };
    let app = routes::router(state);

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
