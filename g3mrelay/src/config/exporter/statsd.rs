/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::net::SocketAddr;

use anyhow::anyhow;
use yaml_rust::{Yaml, yaml};

use g3_types::metrics::NodeName;

use super::ExporterConfig;

const EXPORTER_CONFIG_TYPE: &str = "Statsd";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StatsdExporterConfig {
    name: NodeName,
    pub(crate) target: Option<SocketAddr>,
    pub(crate) prefix: Option<NodeName>,
}

impl StatsdExporterConfig {
    fn new() -> Self {
        StatsdExporterConfig {
            name: NodeName::default(),
            target: None,
            prefix: None,
        }
    }

    pub(crate) fn parse(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut exporter = StatsdExporterConfig::new();

        g3_yaml::foreach_kv(map, |k, v| exporter.set(k, v))?;

        exporter.check()?;
        Ok(exporter)
    }

    fn set(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match g3_yaml::key::normalize(k).as_str() {
            super::CONFIG_KEY_EXPORTER_TYPE => Ok(()),
            super::CONFIG_KEY_EXPORTER_NAME => {
                self.name = g3_yaml::value::as_metric_node_name(v)?;
                Ok(())
            }
            "target" => {
                self.target = Some(g3_yaml::value::as_env_sockaddr(v)?);
                Ok(())
            }
            "prefix" => {
                self.prefix = Some(g3_yaml::value::as_metric_node_name(v)?);
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }

    fn check(&mut self) -> anyhow::Result<()> {
        if self.name.is_empty() {
            return Err(anyhow!("name is not set"));
        }
        if self.target.is_none() {
            return Err(anyhow!("target is not set"));
        }
        Ok(())
    }
}

impl ExporterConfig for StatsdExporterConfig {
    fn name(&self) -> &NodeName {
        &self.name
    }

    fn exporter_type(&self) -> &'static str {
        EXPORTER_CONFIG_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    #[test]
    fn parse_full() {
        let mut docs = YamlLoader::load_from_str(
            "{ name: statsd-main, type: statsd, target: '127.0.0.1:8125', prefix: paas }",
        )
        .unwrap();
        let Yaml::Hash(map) = docs.pop().unwrap() else {
            unreachable!()
        };

        let config = StatsdExporterConfig::parse(&map).unwrap();
        assert_eq!(config.name().as_str(), "statsd-main");
        assert_eq!(config.target.unwrap().port(), 8125);
        assert_eq!(config.prefix.as_ref().unwrap().as_str(), "paas");
    }

    #[test]
    fn reject_missing_target() {
        let mut docs =
            YamlLoader::load_from_str("{ name: statsd-main, type: statsd }").unwrap();
        let Yaml::Hash(map) = docs.pop().unwrap() else {
            unreachable!()
        };
        assert!(StatsdExporterConfig::parse(&map).is_err());
    }
}
