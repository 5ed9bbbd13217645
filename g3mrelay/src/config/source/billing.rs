/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use anyhow::anyhow;
use yaml_rust::{Yaml, yaml};

use g3_types::metrics::NodeName;

use super::SourceConfig;

const SOURCE_CONFIG_TYPE: &str = "Billing";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BillingSourceConfig {
    name: NodeName,
    pub(crate) endpoint: String,
    interval: Duration,
    buffer_capacity: usize,
}

impl BillingSourceConfig {
    fn new() -> Self {
        BillingSourceConfig {
            name: NodeName::default(),
            endpoint: String::new(),
            interval: DEFAULT_POLL_INTERVAL,
            buffer_capacity: super::DEFAULT_BUFFER_CAPACITY,
        }
    }

    pub(crate) fn parse(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut source = BillingSourceConfig::new();

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
            "endpoint" => {
                self.endpoint = g3_yaml::value::as_url(v)?;
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
        if self.endpoint.is_empty() {
            return Err(anyhow!("endpoint is not set"));
        }
        Ok(())
    }
}

impl SourceConfig for BillingSourceConfig {
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

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    #[test]
    fn parse_full() {
        let mut docs = YamlLoader::load_from_str(
            "{ name: billing-uk, type: billing, endpoint: 'https://billing.example.net', interval: 2m, buffer-capacity: 16 }",
        )
        .unwrap();
        let Yaml::Hash(map) = docs.pop().unwrap() else {
            unreachable!()
        };

        let config = BillingSourceConfig::parse(&map).unwrap();
        assert_eq!(config.name().as_str(), "billing-uk");
        assert_eq!(config.endpoint, "https://billing.example.net");
        assert_eq!(config.interval(), Duration::from_secs(120));
        assert_eq!(config.buffer_capacity(), 16);
    }

    #[test]
    fn reject_plain_host_endpoint() {
        let mut docs = YamlLoader::load_from_str(
            "{ name: billing-uk, type: billing, endpoint: billing.example.net }",
        )
        .unwrap();
        let Yaml::Hash(map) = docs.pop().unwrap() else {
            unreachable!()
        };
        assert!(BillingSourceConfig::parse(&map).is_err());
    }
}
