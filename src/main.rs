use std::sync::Arc;

use devserve::config::{AppState, Config};
use devserve::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(&cfg)?);
    let addr = cfg.get_socket_addr()?;

    let listener = match server::create_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };
    let shutdown = server::ShutdownSignal::register()?;

    let url = cfg.public_url();
    logger::log_server_start(&url, &addr, &state.root);

    if cfg.browser.open_on_start {
        server::browser::launch(&url);
    }

    server::run_until(listener, state, shutdown.recv()).await;
    Ok(())
}
