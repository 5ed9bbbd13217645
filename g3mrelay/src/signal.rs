/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use log::info;

use g3_metric_pipe::{ArcMetricReadCloser, MetricCloser};

/// Closes the merged metric stream on SIGINT or SIGTERM, which lets
/// the run loop drain and exit cleanly.
#[cfg(unix)]
pub(crate) fn register(stream: ArcMetricReadCloser) -> anyhow::Result<()> {
    use anyhow::Context;
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt =
        signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut terminate =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("got SIGINT, closing metric stream"),
            _ = terminate.recv() => info!("got SIGTERM, closing metric stream"),
        }
        stream.close();
    });
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn register(stream: ArcMetricReadCloser) -> anyhow::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("got interrupt, closing metric stream");
            stream.close();
        }
    });
    Ok(())
}
