/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::{Context, anyhow};
use log::{info, warn};

use g3_metric_pipe::{NoopClose, copy_metrics, merge};

use crate::config::AppConfig;

/// Wires sources → merge → broadcast and pumps until the stream ends.
/// A failed sample or a failed batch write is logged and the pump is
/// re-entered; only stream exhaustion (after a close signal) stops the
/// process.
pub async fn spawn_and_run(config: AppConfig) -> anyhow::Result<()> {
    let exporters = crate::export::build_all(&config.exporters)
        .await
        .context("failed to build exporters")?;
    if exporters.is_empty() {
        warn!("no exporter configured, all metrics will be dropped");
    }

    let streams = crate::source::build_all(&config.sources)?;
    if streams.is_empty() {
        return Err(anyhow!("no source configured"));
    }

    let stream = merge(streams);
    crate::signal::register(stream.clone()).context("failed to setup signal handler")?;

    let sink = NoopClose(exporters);
    loop {
        match copy_metrics(&sink, stream.as_ref()).await {
            Ok(_) => {
                info!("metric stream finished");
                return Ok(());
            }
            Err(e) => warn!("{e}"),
        }
    }
}
