/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use tokio::net::UdpSocket;

use g3_metric_pipe::{Metric, MetricError, MetricWriter};
use g3_types::metrics::NodeName;

use super::{ArcExporter, Exporter};
use crate::config::exporter::ExporterConfig;
use crate::config::exporter::statsd::StatsdExporterConfig;

mod format;

pub(crate) struct StatsdExporter {
    config: StatsdExporterConfig,
    socket: UdpSocket,
}

impl StatsdExporter {
    pub(crate) async fn prepare(config: StatsdExporterConfig) -> anyhow::Result<ArcExporter> {
        let Some(target) = config.target else {
            return Err(anyhow!("target is not set"));
        };

        let bind = if target.is_ipv4() {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
        } else {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
        };
        let socket = UdpSocket::bind(bind)
            .await
            .context("failed to bind local udp socket")?;
        socket
            .connect(target)
            .await
            .context(format!("failed to connect udp socket to {target}"))?;

        Ok(Arc::new(StatsdExporter { config, socket }))
    }
}

#[async_trait]
impl MetricWriter for StatsdExporter {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
        let prefix = self.config.prefix.as_ref().map(|p| p.as_str());
        for datagram in format::build_datagrams(prefix, batch) {
            self.socket
                .send(&datagram)
                .await
                .map_err(|e| MetricError::Sink(anyhow!("failed to send to statsd: {e}")))?;
        }
        Ok(())
    }
}

impl Exporter for StatsdExporter {
    #[inline]
    fn name(&self) -> &NodeName {
        self.config.name()
    }

    #[inline]
    fn r#type(&self) -> &'static str {
        self.config.exporter_type()
    }
}
