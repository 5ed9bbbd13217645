/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use chrono::{DateTime, Utc};

use crate::tag::{MetricTag, MetricTags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sampled measurement. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Metric {
    /// producer-assigned identifier, may be empty
    pub id: String,
    pub kind: MetricKind,
    /// dotted series name, e.g. `billing.total.costs`
    pub name: String,
    pub time: DateTime<Utc>,
    pub value: f64,
    pub tags: MetricTags,
    pub unit: String,
}

impl Metric {
    pub fn new<N: Into<String>>(kind: MetricKind, name: N, value: f64) -> Self {
        Metric {
            id: String::new(),
            kind,
            name: name.into(),
            time: Utc::now(),
            value,
            tags: MetricTags::new(),
            unit: String::new(),
        }
    }

    pub fn with_id<T: Into<String>>(mut self, id: T) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn with_tag<L, V>(mut self, label: L, value: V) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        self.tags.push(MetricTag::new(label, value));
        self
    }

    pub fn with_unit<T: Into<String>>(mut self, unit: T) -> Self {
        self.unit = unit.into();
        self
    }

    /// Two metrics are equivalent if they describe the same series:
    /// same name, same kind, same tags as an unordered mapping.
    /// Value and timestamp are excluded so repeated samples of one
    /// series compare equal.
    pub fn equivalent(&self, other: &Metric) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.tags.to_map() == other.tags.to_map()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] id={} {}:{}={:.4} {} ({})",
            self.time.format("%Y-%m-%dT%H:%M:%S%z"),
            self.id,
            self.kind,
            self.name,
            self.value,
            self.unit,
            self.tags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn equivalence_ignores_value_and_time() {
        let m1 = Metric::new(MetricKind::Gauge, "x", 1.0).with_tag("a", "1");
        let m2 = Metric::new(MetricKind::Gauge, "x", 99.0)
            .with_tag("a", "1")
            .with_time(Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap());

        assert!(m1.equivalent(&m1));
        assert!(m1.equivalent(&m2));
        assert!(m2.equivalent(&m1));
    }

    #[test]
    fn equivalence_checks_series_identity() {
        let m1 = Metric::new(MetricKind::Gauge, "x", 1.0).with_tag("a", "1");

        let other_name = Metric::new(MetricKind::Gauge, "y", 1.0).with_tag("a", "1");
        assert!(!m1.equivalent(&other_name));

        let other_kind = Metric::new(MetricKind::Counter, "x", 1.0).with_tag("a", "1");
        assert!(!m1.equivalent(&other_kind));

        let extra_tag = Metric::new(MetricKind::Gauge, "x", 1.0)
            .with_tag("a", "1")
            .with_tag("b", "2");
        assert!(!m1.equivalent(&extra_tag));
    }

    #[test]
    fn equivalence_ignores_tag_order() {
        let m1 = Metric::new(MetricKind::Gauge, "x", 1.0)
            .with_tag("a", "1")
            .with_tag("b", "2");
        let m2 = Metric::new(MetricKind::Gauge, "x", 2.0)
            .with_tag("b", "2")
            .with_tag("a", "1");
        assert!(m1.equivalent(&m2));
    }

    #[test]
    fn display() {
        let time = Utc.with_ymd_and_hms(2019, 3, 4, 5, 6, 7).unwrap();
        let m = Metric::new(MetricKind::Gauge, "billing.total.costs", 12.5)
            .with_id("m1")
            .with_time(time)
            .with_tag("plan_guid", "g1")
            .with_unit("pounds");
        assert_eq!(
            m.to_string(),
            "[2019-03-04T05:06:07+0000] id=m1 gauge:billing.total.costs=12.5000 pounds (plan_guid:g1)"
        );
    }
}
