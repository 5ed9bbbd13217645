/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use g3_metric_pipe::{Metric, MetricKind, MetricSampler, MetricWriter};

use crate::config::source::billing::BillingSourceConfig;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct Plan {
    plan_guid: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CostByPlan {
    plan_guid: String,
    cost: f64,
}

#[derive(Debug, Deserialize)]
struct CurrencyRate {
    code: String,
    rate: f64,
}

/// Polls the billing API and renders its cost and currency data as
/// gauges. Request and decode failures are reported to the stream
/// consumer through the poller.
pub(crate) struct BillingSampler {
    config: BillingSourceConfig,
    client: reqwest::Client,
}

impl BillingSampler {
    pub(crate) fn new(config: BillingSourceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(BillingSampler { config, client })
    }

    async fn get_json<T>(&self, path: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{path}", self.config.endpoint.trim_end_matches('/'));
        let rsp = self
            .client
            .get(&url)
            .send()
            .await
            .context(format!("failed to fetch {path}"))?;
        if !rsp.status().is_success() {
            return Err(anyhow!("{path} request returned status {}", rsp.status()));
        }
        rsp.json::<T>()
            .await
            .context(format!("failed to decode {path} response"))
    }
}

#[async_trait]
impl MetricSampler for BillingSampler {
    async fn sample(&self, writer: &dyn MetricWriter) -> anyhow::Result<()> {
        let plans: Vec<Plan> = self.get_json("plans").await?;
        let costs: Vec<CostByPlan> = self.get_json("costs_by_plan").await?;
        let rates: Vec<CurrencyRate> = self.get_json("currency_rates").await?;

        let mut metrics = costs_by_plan_gauges(&costs, &plans);
        metrics.extend(currency_rate_gauges(&rates));

        debug!("writing {} billing metrics", metrics.len());
        writer.write_metrics(&metrics).await?;
        Ok(())
    }
}

fn costs_by_plan_gauges(costs: &[CostByPlan], plans: &[Plan]) -> Vec<Metric> {
    let plan_names: HashMap<&str, &str> = plans
        .iter()
        .map(|p| (p.plan_guid.as_str(), p.name.as_str()))
        .collect();

    costs
        .iter()
        .map(|c| {
            Metric::new(MetricKind::Gauge, "billing.total.costs", c.cost)
                .with_tag("plan_guid", c.plan_guid.as_str())
                .with_tag(
                    "name",
                    plan_names.get(c.plan_guid.as_str()).copied().unwrap_or(""),
                )
                .with_unit("pounds")
        })
        .collect()
}

fn currency_rate_gauges(rates: &[CurrencyRate]) -> Vec<Metric> {
    rates
        .iter()
        .map(|r| {
            Metric::new(MetricKind::Gauge, "billing.currency.configured", r.rate)
                .with_tag("code", r.code.as_str())
                .with_unit("ratio")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_and_map_costs() {
        let plans: Vec<Plan> = serde_json::from_str(
            r#"[{"plan_guid": "g1", "name": "small"}, {"plan_guid": "g2", "name": "large"}]"#,
        )
        .unwrap();
        let costs: Vec<CostByPlan> =
            serde_json::from_str(r#"[{"plan_guid": "g1", "cost": 12.5}]"#).unwrap();

        let metrics = costs_by_plan_gauges(&costs, &plans);
        assert_eq!(metrics.len(), 1);

        let m = &metrics[0];
        assert_eq!(m.name, "billing.total.costs");
        assert_eq!(m.kind, MetricKind::Gauge);
        assert_eq!(m.value, 12.5);
        assert_eq!(m.unit, "pounds");
        let tags = m.tags.to_map();
        assert_eq!(tags.get("plan_guid"), Some(&"g1"));
        assert_eq!(tags.get("name"), Some(&"small"));
    }

    #[test]
    fn unknown_plan_gets_empty_name() {
        let costs: Vec<CostByPlan> =
            serde_json::from_str(r#"[{"plan_guid": "missing", "cost": 1.0}]"#).unwrap();
        let metrics = costs_by_plan_gauges(&costs, &[]);
        assert_eq!(metrics[0].tags.to_map().get("name"), Some(&""));
    }

    #[test]
    fn decode_and_map_rates() {
        let rates: Vec<CurrencyRate> =
            serde_json::from_str(r#"[{"code": "USD", "rate": 1.3}]"#).unwrap();

        let metrics = currency_rate_gauges(&rates);
        assert_eq!(metrics.len(), 1);

        let m = &metrics[0];
        assert_eq!(m.name, "billing.currency.configured");
        assert_eq!(m.value, 1.3);
        assert_eq!(m.unit, "ratio");
        assert_eq!(m.tags.to_map().get("code"), Some(&"USD"));
    }
}
