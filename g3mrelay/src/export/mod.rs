/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use anyhow::Context;
use log::info;

use g3_metric_pipe::{ArcMetricWriter, BroadcastWriter, MetricWriter};
use g3_types::metrics::NodeName;

use crate::config::exporter::AnyExporterConfig;

mod console;
mod discard;
mod statsd;

pub(crate) trait Exporter: MetricWriter {
    fn name(&self) -> &NodeName;
    fn r#type(&self) -> &'static str;
}

pub(crate) type ArcExporter = Arc<dyn Exporter + Send + Sync>;

/// Builds every configured exporter and registers it on one broadcast
/// sink, in configuration order.
pub(crate) async fn build_all(configs: &[AnyExporterConfig]) -> anyhow::Result<BroadcastWriter> {
    let broadcast = BroadcastWriter::new();
    for config in configs {
        let exporter = build(config)
            .await
            .context(format!("failed to build exporter {}", config.name()))?;
        info!(
            "exporter {} ({}) is online",
            exporter.name(),
            exporter.r#type()
        );
        let writer: ArcMetricWriter = exporter.clone();
        broadcast.add_writer(exporter.name().as_str(), writer);
    }
    Ok(broadcast)
}

async fn build(config: &AnyExporterConfig) -> anyhow::Result<ArcExporter> {
    match config {
        AnyExporterConfig::Console(c) => Ok(console::ConsoleExporter::prepare(c.clone())),
        AnyExporterConfig::Discard(c) => Ok(discard::DiscardExporter::prepare(c.clone())),
        AnyExporterConfig::Statsd(c) => statsd::StatsdExporter::prepare(c.clone()).await,
    }
}
