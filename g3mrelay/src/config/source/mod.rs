/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, yaml};

use g3_types::metrics::NodeName;

pub(crate) mod billing;
pub(crate) mod heartbeat;

const CONFIG_KEY_SOURCE_TYPE: &str = "type";
const CONFIG_KEY_SOURCE_NAME: &str = "name";

/// Buffer slots between a poller and the merge stage; bounds how many
/// samples a stalled exporter can leave queued per source.
const DEFAULT_BUFFER_CAPACITY: usize = 8;

pub(crate) trait SourceConfig {
    fn name(&self) -> &NodeName;
    fn source_type(&self) -> &'static str;
    fn interval(&self) -> Duration;
    fn buffer_capacity(&self) -> usize;
}

#[derive(Clone, Debug)]
pub(crate) enum AnySourceConfig {
    Billing(billing::BillingSourceConfig),
    Heartbeat(heartbeat::HeartbeatSourceConfig),
}

impl AnySourceConfig {
    pub(crate) fn name(&self) -> &NodeName {
        match self {
            AnySourceConfig::Billing(c) => c.name(),
            AnySourceConfig::Heartbeat(c) => c.name(),
        }
    }

    pub(crate) fn source_type(&self) -> &'static str {
        match self {
            AnySourceConfig::Billing(c) => c.source_type(),
            AnySourceConfig::Heartbeat(c) => c.source_type(),
        }
    }
}

pub(crate) fn load_all(v: &Yaml) -> anyhow::Result<Vec<AnySourceConfig>> {
    let Yaml::Array(seq) = v else {
        return Err(anyhow!("the source section should be an array of maps"));
    };

    let mut sources = Vec::with_capacity(seq.len());
    for (i, entry) in seq.iter().enumerate() {
        let Yaml::Hash(map) = entry else {
            return Err(anyhow!("source entry #{i} is not a map"));
        };
        sources.push(load_source(map).context(format!("failed to load source #{i}"))?);
    }
    Ok(sources)
}

fn load_source(map: &yaml::Hash) -> anyhow::Result<AnySourceConfig> {
    let source_type = g3_yaml::hash_get_required_str(map, CONFIG_KEY_SOURCE_TYPE)?;
    match g3_yaml::key::normalize(source_type).as_str() {
        "billing" => {
            let source = billing::BillingSourceConfig::parse(map)
                .context("failed to load this Billing source")?;
            Ok(AnySourceConfig::Billing(source))
        }
        "heartbeat" => {
            let source = heartbeat::HeartbeatSourceConfig::parse(map)
                .context("failed to load this Heartbeat source")?;
            Ok(AnySourceConfig::Heartbeat(source))
        }
        _ => Err(anyhow!("unsupported source type {}", source_type)),
    }
}
