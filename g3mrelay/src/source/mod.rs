/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::Context;
use log::info;

use g3_metric_pipe::{ArcMetricReadCloser, MetricPoller};

use crate::config::source::{AnySourceConfig, SourceConfig};

mod billing;
mod heartbeat;

/// Spawns one poller per configured source and returns their streams.
pub(crate) fn build_all(configs: &[AnySourceConfig]) -> anyhow::Result<Vec<ArcMetricReadCloser>> {
    let mut streams = Vec::with_capacity(configs.len());
    for config in configs {
        let stream = match config {
            AnySourceConfig::Billing(c) => {
                let sampler = billing::BillingSampler::new(c.clone())
                    .context(format!("failed to build source {}", c.name()))?;
                MetricPoller::new(c.interval(), sampler, c.buffer_capacity()).spawn()
            }
            AnySourceConfig::Heartbeat(c) => {
                let sampler = heartbeat::HeartbeatSampler::new(c.clone());
                MetricPoller::new(c.interval(), sampler, c.buffer_capacity()).spawn()
            }
        };
        info!(
            "source {} ({}) is polling",
            config.name(),
            config.source_type()
        );
        streams.push(stream);
    }
    Ok(streams)
}
