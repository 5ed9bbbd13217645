/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use g3_metric_pipe::{Metric, MetricError, MetricWriter};
use g3_types::metrics::NodeName;

use super::{ArcExporter, Exporter};
use crate::config::exporter::ExporterConfig;
use crate::config::exporter::discard::DiscardExporterConfig;

pub(crate) struct DiscardExporter {
    config: DiscardExporterConfig,
}

impl DiscardExporter {
    pub(crate) fn prepare(config: DiscardExporterConfig) -> ArcExporter {
        Arc::new(DiscardExporter { config })
    }
}

#[async_trait]
impl MetricWriter for DiscardExporter {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
        debug!("exporter {} dropped {} metrics", self.name(), batch.len());
        Ok(())
    }
}

impl Exporter for DiscardExporter {
    #[inline]
    fn name(&self) -> &NodeName {
        self.config.name()
    }

    #[inline]
    fn r#type(&self) -> &'static str {
        self.config.exporter_type()
    }
}
