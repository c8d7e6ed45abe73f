use clap::Parser;
use quillpost::cli::{Args, build_config, init_logging, load_session_secret, open_database};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(&args.log_format);

    let Some(secret) = load_session_secret(args.session_secret_file.as_deref()) else {
        std::process::exit(1);
    };

    let Some(db) = open_database(&args.database).await else {
        std::process::exit(1);
    };

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!(address = %addr, error = %e, "Failed to bind");
            std::process::exit(1);
        });

    let local_addr = listener.local_addr().unwrap();
    info!(address = %local_addr, "Listening");

    let config = build_config(&args, db, secret);
    if let Err(e) = quillpost::run_server(config, listener).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
