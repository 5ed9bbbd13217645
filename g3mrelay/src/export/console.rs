/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use async_trait::async_trait;

use g3_metric_pipe::{Metric, MetricError, MetricWriter};
use g3_types::metrics::NodeName;

use super::{ArcExporter, Exporter};
use crate::config::exporter::ExporterConfig;
use crate::config::exporter::console::ConsoleExporterConfig;

pub(crate) struct ConsoleExporter {
    config: ConsoleExporterConfig,
}

impl ConsoleExporter {
    pub(crate) fn prepare(config: ConsoleExporterConfig) -> ArcExporter {
        Arc::new(ConsoleExporter { config })
    }
}

#[async_trait]
impl MetricWriter for ConsoleExporter {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
        for metric in batch {
            println!("{metric}");
        }
        Ok(())
    }
}

impl Exporter for ConsoleExporter {
    #[inline]
    fn name(&self) -> &NodeName {
        self.config.name()
    }

    #[inline]
    fn r#type(&self) -> &'static str {
        self.config.exporter_type()
    }
}
