/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::Context;
use log::{debug, error, info};

fn main() -> anyhow::Result<()> {
    let proc_args =
        g3mrelay::opts::parse_clap().context("failed to parse command line options")?;

    // set up the process logger early, only proc args is used inside
    g3mrelay::stdlog::setup(proc_args.verbose_level).context("failed to setup logger")?;

    let config = match g3mrelay::config::load(&proc_args.config_file) {
        Ok(c) => c,
        Err(e) => {
            return Err(e.context(format!(
                "failed to load config file {}",
                proc_args.config_file.display()
            )));
        }
    };
    debug!("loaded config from {}", proc_args.config_file.display());

    if proc_args.test_config {
        info!("the format of the config file is ok");
        return Ok(());
    }

    let ret = tokio_run(config);
    match ret {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("{e:?}");
            Err(e)
        }
    }
}

fn tokio_run(config: g3mrelay::config::AppConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    rt.block_on(g3mrelay::run::spawn_and_run(config))
}
