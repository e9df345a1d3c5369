use std::process::ExitCode;

use dotenvy::dotenv;
use models::EntityKind;
use service::Storage;
use tracing::{error, info};

fn init_logging() {
    // load .env first so RUST_LOG and HBNB_* take effect
    dotenv().ok();
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
    info!(service = "storage", event = "logger_init", "tracing subscriber initialized");
}

async fn run() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;
    info!(
        service = "storage",
        event = "start",
        backend = %cfg.storage.backend,
        environment = %cfg.environment,
        version = env!("CARGO_PKG_VERSION"),
        "opening storage"
    );

    let storage = Storage::open(&cfg).await?;
    let mut total = 0;
    for kind in EntityKind::ALL {
        let count = storage.all(Some(kind)).await?.len();
        total += count;
        info!(service = "storage", event = "count", %kind, count, "objects loaded");
    }
    info!(service = "storage", event = "ready", backend = %storage.backend(), total, "storage ready");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "storage", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "storage", event = "run_failed", error = %e, "storage startup failed");
            ExitCode::FAILURE
        }
    }
}
