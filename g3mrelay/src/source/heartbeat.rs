/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;

use g3_metric_pipe::{Metric, MetricKind, MetricSampler, MetricWriter};

use crate::config::source::heartbeat::HeartbeatSourceConfig;

/// Emits one constant gauge per tick, for smoke testing a deployment
/// end to end.
pub(crate) struct HeartbeatSampler {
    metric: String,
}

impl HeartbeatSampler {
    pub(crate) fn new(config: HeartbeatSourceConfig) -> Self {
        HeartbeatSampler {
            metric: config.metric,
        }
    }
}

#[async_trait]
impl MetricSampler for HeartbeatSampler {
    async fn sample(&self, writer: &dyn MetricWriter) -> anyhow::Result<()> {
        let metric = Metric::new(MetricKind::Gauge, self.metric.as_str(), 1.0).with_unit("boolean");
        writer.write_metrics(&[metric]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g3_metric_pipe::{MetricBuffer, MetricReader};

    #[tokio::test]
    async fn emits_constant_gauge() {
        let config = HeartbeatSourceConfig::with_metric("up.test");
        let sampler = HeartbeatSampler::new(config);

        let buffer = MetricBuffer::new(1);
        sampler.sample(&buffer).await.unwrap();

        let metric = buffer.read_metric().await.unwrap();
        assert_eq!(metric.name, "up.test");
        assert_eq!(metric.kind, MetricKind::Gauge);
        assert_eq!(metric.value, 1.0);
        assert_eq!(metric.unit, "boolean");
    }
}
