/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::anyhow;
use yaml_rust::{Yaml, yaml};

use g3_types::metrics::NodeName;

use super::ExporterConfig;

const EXPORTER_CONFIG_TYPE: &str = "Console";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ConsoleExporterConfig {
    name: NodeName,
}

impl ConsoleExporterConfig {
    fn new() -> Self {
        ConsoleExporterConfig {
            name: NodeName::default(),
        }
    }

    pub(crate) fn parse(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut exporter = ConsoleExporterConfig::new();

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

impl ExporterConfig for ConsoleExporterConfig {
    fn name(&self) -> &NodeName {
        &self.name
    }

    fn exporter_type(&self) -> &'static str {
        EXPORTER_CONFIG_TYPE
    }
}
