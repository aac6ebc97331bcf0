// Entrypoint for the lookup form.
// - Logging goes through `env_logger`; `RUST_LOG` overrides the default
//   `warn` filter.
// - Configuration comes from `IMEICHECK_API_URL` / `IMEICHECK_TIMEOUT_SECS`,
//   see `api::LookupConfig::from_env`.

use imeicheck_cli::{api::LookupClient, ui};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let client = LookupClient::from_env()?;
    log::info!("using lookup service at {}", client.base_url());

    // Blocks until the user picks "Exit".
    ui::run(ui::Shell::new(client))?;
    Ok(())
}
