use anyhow::Context;
use jdtls_provision::{HostEnv, ProvisionError, launch, prepare_launch};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

fn main() -> anyhow::Result<()> {
    // stdout belongs to the language server protocol once jdtls starts.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let env = HostEnv::from_process().context("Failed to inspect launcher environment")?;
    let config = match cli::parse_launch_config(std::env::args_os().skip(1), &env) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    let plan = match prepare_launch(&config, &env) {
        Ok(plan) => plan,
        Err(err @ ProvisionError::MissingLombokJar { .. }) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        Err(err) => return Err(err).context("Failed to prepare jdtls launch"),
    };

    let code = launch(&plan).context("Failed to start jdtls")?;
    if code != 0 {
        error!("jdtls exited with status {code}");
        std::process::exit(code);
    }
    Ok(())
}
