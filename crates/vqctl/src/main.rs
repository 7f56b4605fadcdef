use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn main() -> Result<(), anyhow::Error> {
    let cli = vqctl::Cli::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into()) // Otherwise it's ERROR.
        .from_env_lossy();

    tracing_subscriber::fmt::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .build()?;

    if let Err(err) = runtime.block_on(cli.run()) {
        tracing::error!(error = ?err, "execution failed");
        std::process::exit(1);
    }
    Ok(())
}
