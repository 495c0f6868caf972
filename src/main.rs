/*
 *  main.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use env_logger::Env;
use log::{error, info};
use tokio::signal::unix::{signal, Signal, SignalKind};

use wxpaper::config;
use wxpaper::display::{DisplaySinkFactory, SvgAssets};
use wxpaper::pipeline::{host_address, Refresher, Station};
use wxpaper::weather::http_client;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// SIGINT, SIGTERM and SIGHUP, registered once at startup. A one-shot
/// refresh is cut short by them; in daemon mode a signal arriving
/// mid-cycle is held until the loop is idle.
struct Shutdown {
    sigint: Signal,
    sigterm: Signal,
    sighup: Signal,
}

impl Shutdown {
    fn register() -> std::io::Result<Self> {
        Ok(Shutdown {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
            sighup: signal(SignalKind::hangup())?,
        })
    }

    async fn recv(&mut self) {
        tokio::select! {
            _ = self.sigint.recv() => {
                info!("SIGINT received. Initiating graceful shutdown.");
            }
            _ = self.sigterm.recv() => {
                info!("SIGTERM received. Initiating graceful shutdown.");
            }
            _ = self.sighup.recv() => {
                info!("SIGHUP received. Initiating graceful shutdown.");
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (cfg, dump) = config::load()?;
    if dump {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_filter()))
        .format_timestamp_secs()
        .init();

    info!("{} - weather on e-paper", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    runtime.block_on(run(cfg))
}

async fn run(cfg: config::Config) -> anyhow::Result<()> {
    let display = cfg.display();
    let (width, height) = display.dimensions();

    let station = Station::from_config(&cfg, http_client()?)?;
    let assets = SvgAssets::new(&display.assets_dir(), display.font_file.as_deref())?;
    let sinks = DisplaySinkFactory::create_from_config(&display)?;
    let mut refresher = Refresher::new(assets, sinks, width, height, host_address(&cfg));

    let mut shutdown = Shutdown::register().context("registering signal handlers")?;

    if !cfg.daemon() {
        return refresher
            .run_once(&station, Local::now().naive_local(), shutdown.recv())
            .await
            .context("refresh failed");
    }

    let period = Duration::from_secs(cfg.refresh_mins() * 60);
    info!("Refreshing every {} minute(s)", cfg.refresh_mins());

    loop {
        // a cycle always runs to completion; signals are only seen while idle
        if let Err(e) = refresher.run_cycle(&station, Local::now().naive_local()).await {
            if e.is_fatal() {
                refresher.shutdown();
                return Err(e.into());
            }
            error!("Refresh cycle failed: {}", e);
        }

        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            _ = shutdown.recv() => break,
        }
    }

    info!("Putting display to sleep");
    refresher.shutdown();
    Ok(())
}
