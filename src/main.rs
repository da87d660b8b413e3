use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;
use payslip_engine::payslip::OutboxMailTransport;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration directory holding service.yaml, employees.yaml and attendance/
    #[arg(long, default_value = "./config/payroll")]
    config: PathBuf,

    /// Address to listen on, overriding server.bind_address
    #[arg(long)]
    bind: Option<String>,
}

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payslip_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_telemetry();

    let config = ConfigLoader::load(&cli.config)?;
    let mail = &config.service().mail;
    let transport = OutboxMailTransport::new(&mail.outbox_dir, &mail.from_email, &mail.from_name);
    info!(
        config = %cli.config.display(),
        employees = config.employees().len(),
        attendance_records = config.attendance().len(),
        outbox = %transport.dir().display(),
        "Configuration loaded"
    );

    let state = AppState::from_config(&config, Arc::new(transport)).await?;
    let router = create_router(state);

    let bind = cli
        .bind
        .unwrap_or_else(|| config.service().server.bind_address.clone());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(address = %listener.local_addr()?, "Payslip engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
