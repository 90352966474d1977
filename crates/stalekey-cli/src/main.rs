use std::process::ExitCode;
use std::sync::Arc;

use stalekey_aws::{IamDirectory, SnsNotifier, SqsRequestQueue, load_sdk_config, resolve_account_id};
use stalekey_core::app::{AppBuilder, BuildError, CredentialAgePolicy, RunReport};
use stalekey_core::domain::{RunError, UpstreamError};
use stalekey_core::impls::{InMemoryRequestQueue, RecordingNotifier};
use stalekey_core::ports::SystemClock;

mod config;
mod logging;

use config::{Config, ConfigError, Output};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("could not determine the AWS account: {0}")]
    Account(#[source] UpstreamError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Run(#[from] RunError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Config(_) | CliError::Build(_) => ExitCode::from(2),
            CliError::Account(_) | CliError::Run(_) => ExitCode::FAILURE,
        }
    }
}

/// スケジューラから 1 回呼ばれ、ディレクトリ全体を 1 回走査して終わる
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // logging の形式も設定から決まるので、ここでは stderr に直接出す
            eprintln!("stalekey: {e}");
            return CliError::from(e).exit_code();
        }
    };
    logging::init(config.log_format);

    match run(config).await {
        Ok(report) => {
            tracing::info!(run_id = %report.run_id, published = report.published, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "stalekey failed");
            e.exit_code()
        }
    }
}

async fn run(config: Config) -> Result<RunReport, CliError> {
    let sdk_config = load_sdk_config(&config.aws).await;
    let account_id = resolve_account_id(&sdk_config)
        .await
        .map_err(CliError::Account)?;

    let iam = Arc::new(IamDirectory::from_conf(&sdk_config));
    let staleness = Arc::new(CredentialAgePolicy::new(iam.clone(), Arc::new(SystemClock)));
    let builder = AppBuilder::new()
        .directory(iam)
        .staleness(staleness)
        .account_id(account_id)
        .defaults(config.defaults);

    match config.output {
        Output::Aws {
            queue_url,
            alert_topic_arn,
        } => {
            let dispatcher = builder
                .queue(Arc::new(SqsRequestQueue::from_conf(&sdk_config, queue_url)))
                .notifier(Arc::new(SnsNotifier::from_conf(&sdk_config, alert_topic_arn)))
                .build()?;
            Ok(dispatcher.run().await?)
        }
        Output::DryRun => {
            let queue = Arc::new(InMemoryRequestQueue::new());
            let dispatcher = builder
                .queue(queue.clone())
                .notifier(Arc::new(RecordingNotifier::new()))
                .build()?;
            let outcome = dispatcher.run().await;
            for body in queue.sent().await {
                tracing::info!(%body, "dry run: request not sent");
            }
            Ok(outcome?)
        }
    }
}
