/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use anyhow::anyhow;
use yaml_rust::{Yaml, yaml};

use g3_types::metrics::NodeName;

use super::SourceConfig;

const SOURCE_CONFIG_TYPE: &str = "Heartbeat";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
const DEFAULT_METRIC_NAME: &str = "relay.up";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HeartbeatSourceConfig {
    name: NodeName,
    pub(crate) metric: String,
    interval: Duration,
    buffer_capacity: usize,
}

impl HeartbeatSourceConfig {
    fn new() -> Self {
        HeartbeatSourceConfig {
            name: NodeName::default(),
            metric: DEFAULT_METRIC_NAME.to_string(),
            interval: DEFAULT_POLL_INTERVAL,
            buffer_capacity: super::DEFAULT_BUFFER_CAPACITY,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_metric(metric: &str) -> Self {
        let mut config = HeartbeatSourceConfig::new();
        config.metric = metric.to_string();
        config
    }

    pub(crate) fn parse(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut source = HeartbeatSourceConfig::new();

        g3_yaml::foreach_kv(map, |k, v| source.set(k, v))?;

        source.check()?;
        Ok(source)
    }

    fn set(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match g3_yaml::key::normalize(k).as_str() {
            super::CONFIG_KEY_SOURCE_TYPE => Ok(()),
            super::CONFIG_KEY_SOURCE_NAME => {
                self.name = g3_yaml::value::as_metric_node_name(v)?;
                Ok(())
            }
            "metric" => {
                self.metric = g3_yaml::value::as_metric_node_name(v)?.as_str().to_string();
                Ok(())
            }
            "interval" => {
                self.interval = g3_yaml::humanize::as_duration(v)?;
                Ok(())
            }
            "buffer_capacity" => {
                self.buffer_capacity = g3_yaml::value::as_usize(v)?;
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }

    fn check(&mut self) -> anyhow::Result<()> {
        if self.name.is_empty() {
            return Err(anyhow!("name is not set"));
        }
        Ok(())
    }
}

impl SourceConfig for HeartbeatSourceConfig {
    fn name(&self) -> &NodeName {
        &self.name
    }

    fn source_type(&self) -> &'static str {
        SOURCE_CONFIG_TYPE
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}
