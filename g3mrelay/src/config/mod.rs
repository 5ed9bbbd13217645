/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, YamlLoader, yaml};

use g3_types::metrics::NodeName;

pub(crate) mod exporter;
pub(crate) mod source;

use exporter::AnyExporterConfig;
use source::AnySourceConfig;

pub struct AppConfig {
    pub(crate) exporters: Vec<AnyExporterConfig>,
    pub(crate) sources: Vec<AnySourceConfig>,
}

pub fn load(file: &Path) -> anyhow::Result<AppConfig> {
    let contents = std::fs::read_to_string(file)
        .map_err(|e| anyhow!("failed to read config file {}: {e}", file.display()))?;
    load_str(&contents)
}

fn load_str(contents: &str) -> anyhow::Result<AppConfig> {
    let docs =
        YamlLoader::load_from_str(contents).map_err(|e| anyhow!("failed to parse yaml: {e}"))?;

    let mut config = AppConfig {
        exporters: Vec::new(),
        sources: Vec::new(),
    };
    // allow multiple docs, and treat them as the same
    for doc in &docs {
        match doc {
            Yaml::Hash(map) => load_doc(map, &mut config)?,
            _ => return Err(anyhow!("yaml doc root should be hash")),
        }
    }

    config.check()?;
    Ok(config)
}

fn load_doc(map: &yaml::Hash, config: &mut AppConfig) -> anyhow::Result<()> {
    g3_yaml::foreach_kv(map, |k, v| match g3_yaml::key::normalize(k).as_str() {
        "exporter" => {
            let exporters = exporter::load_all(v).context("failed to load exporters")?;
            config.exporters.extend(exporters);
            Ok(())
        }
        "source" => {
            let sources = source::load_all(v).context("failed to load sources")?;
            config.sources.extend(sources);
            Ok(())
        }
        "log" => Ok(()),
        _ => Err(anyhow!("invalid key {k} in main conf")),
    })
}

impl AppConfig {
    fn check(&self) -> anyhow::Result<()> {
        let mut names: HashSet<NodeName> = HashSet::new();
        for exporter in &self.exporters {
            if !names.insert(exporter.name().clone()) {
                return Err(anyhow!("exporter with name {} already exists", exporter.name()));
            }
        }
        names.clear();
        for source in &self.sources {
            if !names.insert(source.name().clone()) {
                return Err(anyhow!("source with name {} already exists", source.name()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_full_config() {
        let config = load_str(
            r#"
exporter:
  - name: console
    type: console
  - name: statsd-main
    type: statsd
    target: 127.0.0.1:8125
    prefix: paas

source:
  - name: billing-uk
    type: billing
    endpoint: https://billing.example.net
    interval: 5m
  - name: up
    type: heartbeat
    interval: 10s
"#,
        )
        .unwrap();

        assert_eq!(config.exporters.len(), 2);
        assert_eq!(config.exporters[0].name().as_str(), "console");
        assert_eq!(config.exporters[1].exporter_type(), "Statsd");
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].source_type(), "Billing");
        assert_eq!(config.sources[1].name().as_str(), "up");
    }

    #[test]
    fn reject_duplicate_names() {
        let r = load_str(
            r#"
exporter:
  - name: console
    type: console
  - name: console
    type: discard
"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn reject_unknown_main_key() {
        assert!(load_str("collector: []").is_err());
    }
}
