//! ArpCast relay entry point.
//!
//! Wires configuration, logging, and the relay pipeline together, then
//! pumps newline-delimited JSON notification messages from standard input
//! until the stream closes or a shutdown signal arrives.  Standard input is
//! the seam the interactive capture shell attaches to; the relay itself has
//! no UI.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config() + env overrides   -- INTERFACE, CHANNEL_ID
//!  └─ EventRelay::new()               -- session (channel + sequence)
//!  └─ select_interface()              -- AF_PACKET socket, if configured
//!  └─ stdin line pump                 -- one message, one frame
//! ```

use tokio::io::AsyncBufReadExt;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use arpcast_core::RelaySession;
use arpcast_relay::application::EventRelay;
use arpcast_relay::infrastructure::storage::config::{self, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config must be read before logging is initialised so the file's
    // log_level can serve as the fallback filter; any load error is
    // reported once the subscriber exists.
    let (mut cfg, cfg_err) = match config::load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    // Write a starter file on first run so there is something to edit.
    // Done before the env overrides: those are per-launch, not settings.
    let wrote_default = match config::config_file_path() {
        Ok(path) if !path.exists() && cfg_err.is_none() => {
            config::save_config(&cfg).is_ok().then_some(path)
        }
        _ => None,
    };

    // Structured logging.  RUST_LOG overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.relay.log_level.clone())),
        )
        .init();

    config::apply_env_overrides(&mut cfg);

    info!("ArpCast relay starting");
    if let Some(e) = cfg_err {
        warn!("failed to load config, using defaults: {e}");
    }
    if let Some(path) = wrote_default {
        info!("wrote default config to {}", path.display());
    }

    let session = RelaySession::new(cfg.relay.channel_id);
    info!(
        "relay channel {} (wire byte {})",
        session.raw_channel(),
        session.channel()
    );

    let mut relay = EventRelay::new(session);
    if cfg.network.interface.is_empty() {
        warn!("no network interface selected; events are dropped until INTERFACE is set");
    } else if let Err(e) = relay.select_interface(&cfg.network.interface) {
        warn!("cannot open interface {:?}: {e}; events are dropped", cfg.network.interface);
    }

    // One message handled to completion before the next is read; the
    // pipeline owns the discard policy, so outcomes need no handling here.
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    relay.handle_message(line);
                }
                Ok(None) => {
                    info!("event stream closed");
                    break;
                }
                Err(e) => {
                    error!("event stream read error: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!(
        "ArpCast relay stopped: {} events relayed, {} dropped",
        relay.relayed(),
        relay.dropped()
    );
    Ok(())
}
