/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, yaml};

use g3_types::metrics::NodeName;

pub(crate) mod console;
pub(crate) mod discard;
pub(crate) mod statsd;

const CONFIG_KEY_EXPORTER_TYPE: &str = "type";
const CONFIG_KEY_EXPORTER_NAME: &str = "name";

pub(crate) trait ExporterConfig {
    fn name(&self) -> &NodeName;
    fn exporter_type(&self) -> &'static str;
}

#[derive(Clone, Debug)]
pub(crate) enum AnyExporterConfig {
    Console(console::ConsoleExporterConfig),
    Discard(discard::DiscardExporterConfig),
    Statsd(statsd::StatsdExporterConfig),
}

impl AnyExporterConfig {
    pub(crate) fn name(&self) -> &NodeName {
        match self {
            AnyExporterConfig::Console(c) => c.name(),
            AnyExporterConfig::Discard(c) => c.name(),
            AnyExporterConfig::Statsd(c) => c.name(),
        }
    }

    pub(crate) fn exporter_type(&self) -> &'static str {
        match self {
            AnyExporterConfig::Console(c) => c.exporter_type(),
            AnyExporterConfig::Discard(c) => c.exporter_type(),
            AnyExporterConfig::Statsd(c) => c.exporter_type(),
        }
    }
}

pub(crate) fn load_all(v: &Yaml) -> anyhow::Result<Vec<AnyExporterConfig>> {
    let Yaml::Array(seq) = v else {
        return Err(anyhow!("the exporter section should be an array of maps"));
    };

    let mut exporters = Vec::with_capacity(seq.len());
    for (i, entry) in seq.iter().enumerate() {
        let Yaml::Hash(map) = entry else {
            return Err(anyhow!("exporter entry #{i} is not a map"));
        };
        exporters.push(load_exporter(map).context(format!("failed to load exporter #{i}"))?);
    }
    Ok(exporters)
}

fn load_exporter(map: &yaml::Hash) -> anyhow::Result<AnyExporterConfig> {
    let exporter_type = g3_yaml::hash_get_required_str(map, CONFIG_KEY_EXPORTER_TYPE)?;
    match g3_yaml::key::normalize(exporter_type).as_str() {
        "console" => {
            let exporter = console::ConsoleExporterConfig::parse(map)
                .context("failed to load this Console exporter")?;
            Ok(AnyExporterConfig::Console(exporter))
        }
        "discard" => {
            let exporter = discard::DiscardExporterConfig::parse(map)
                .context("failed to load this Discard exporter")?;
            Ok(AnyExporterConfig::Discard(exporter))
        }
        "statsd" => {
            let exporter = statsd::StatsdExporterConfig::parse(map)
                .context("failed to load this Statsd exporter")?;
            Ok(AnyExporterConfig::Statsd(exporter))
        }
        _ => Err(anyhow!("unsupported exporter type {}", exporter_type)),
    }
}
