/*
 *  main.rs
 *
 *  BigTime - large digit clock
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use anyhow::Context;
use clap::Parser;
use embedded_graphics::geometry::Size;
use env_logger::Env;
use log::{error, info};

#[cfg(unix)] // Only compile this block on Unix-like systems
use tokio::signal::unix::{signal, SignalKind};

use bigtime::config::{self, Cli};
use bigtime::display::{BigClock, DateLabel, DisplaySurface, FrameSurface};
use bigtime::{DigitCatalog, MinuteTicker};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM or SIGHUP and logs which one arrived.
#[cfg(unix)]
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

/// Hand the latest frame to whichever outputs were asked for
fn publish(clock: &BigClock<FrameSurface>, cli: &Cli) {
    if let Some(path) = cli.snapshot.as_ref() {
        if let Err(e) = clock.surface().save_pbm(path) {
            error!("Failed to write snapshot {}: {}", path.display(), e);
        }
    }
    if cli.ascii {
        println!("{}", clock.surface().to_ascii());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_from(&cli).context("loading configuration")?;

    if cli.dump_config {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    let default_level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let (width, height) = cfg.display_size();
    let (digit_width, digit_height) = cfg.digit_size();
    let style = cfg.style();

    let catalog = DigitCatalog::new(digit_width, digit_height).context("digit catalog")?;
    let surface = FrameSurface::new(width, height).with_invert(cfg.invert());
    let grid = Size::new(digit_width * 2, digit_height * 2);
    let date_label = cfg.show_date().then(|| DateLabel::place(surface.size(), grid));
    let mut clock = BigClock::new(surface, catalog, date_label).context("clock face")?;

    info!("{}x{} display, {}x{} digits, {} style", width, height, digit_width, digit_height, style);

    let mut ticker = MinuteTicker::new(style);
    let first = ticker.startup_event();
    clock.start(first.at, style)?;
    publish(&clock, &cli);

    let shutdown = signal_handler();
    tokio::pin!(shutdown);
    let mut remaining = cli.ticks;

    loop {
        if remaining == Some(0) {
            info!("Tick limit reached");
            break;
        }
        tokio::select! {
            tick = ticker.next_tick() => {
                if let Err(e) = clock.on_tick(&tick) {
                    error!("Render failed at {}: {}", tick.at, e);
                }
                publish(&clock, &cli);
                remaining = remaining.map(|n| n.saturating_sub(1));
            }
            res = &mut shutdown => {
                if let Err(e) = res {
                    error!("Signal handler failed: {}", e);
                }
                break;
            }
        }
    }

    let released = clock.shutdown();
    let stats = clock.slots().stats();
    info!(
        "Shutdown: released {} images ({} acquired, {} released, {} rejected over {} renders)",
        released, stats.acquired, stats.released, stats.rejected, clock.renders()
    );
    Ok(())
}
