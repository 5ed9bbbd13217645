/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use smallvec::SmallVec;

use g3_metric_pipe::{Metric, MetricKind};

/// safe payload size for non-jumbo ethernet
const MAX_DATAGRAM_SIZE: usize = 1400;

fn kind_str(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Gauge => "g",
        MetricKind::Counter => "c",
    }
}

fn push_value(buf: &mut SmallVec<[u8; 256]>, value: f64) {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        let mut b = itoa::Buffer::new();
        buf.extend_from_slice(b.format(value as i64).as_bytes());
    } else {
        let mut b = ryu::Buffer::new();
        buf.extend_from_slice(b.format(value).as_bytes());
    }
}

fn format_metric(line: &mut SmallVec<[u8; 256]>, prefix: Option<&str>, metric: &Metric) {
    if let Some(prefix) = prefix {
        line.extend_from_slice(prefix.as_bytes());
        line.push(b'.');
    }
    line.extend_from_slice(metric.name.as_bytes());
    line.push(b':');
    push_value(line, metric.value);
    line.push(b'|');
    line.extend_from_slice(kind_str(metric.kind).as_bytes());

    if !metric.tags.is_empty() {
        line.extend_from_slice(b"|#");
        let mut iter = metric.tags.iter();
        if let Some(tag) = iter.next() {
            line.extend_from_slice(tag.label().as_bytes());
            line.push(b':');
            line.extend_from_slice(tag.value().as_bytes());
        }
        for tag in iter {
            line.push(b',');
            line.extend_from_slice(tag.label().as_bytes());
            line.push(b':');
            line.extend_from_slice(tag.value().as_bytes());
        }
    }
}

/// Renders a batch into newline separated statsd lines, packed into
/// datagrams of at most `MAX_DATAGRAM_SIZE` bytes.
pub(super) fn build_datagrams(prefix: Option<&str>, batch: &[Metric]) -> Vec<Vec<u8>> {
    let mut datagrams = Vec::new();
    let mut buf: Vec<u8> = Vec::with_capacity(MAX_DATAGRAM_SIZE);

    let mut line: SmallVec<[u8; 256]> = SmallVec::new();
    for metric in batch {
        line.clear();
        format_metric(&mut line, prefix, metric);

        if !buf.is_empty() {
            if buf.len() + 1 + line.len() > MAX_DATAGRAM_SIZE {
                datagrams.push(std::mem::replace(
                    &mut buf,
                    Vec::with_capacity(MAX_DATAGRAM_SIZE),
                ));
            } else {
                buf.push(b'\n');
            }
        }
        buf.extend_from_slice(&line);
    }
    if !buf.is_empty() {
        datagrams.push(buf);
    }
    datagrams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_simple() {
        let batch = [Metric::new(MetricKind::Gauge, "gauge", 20.0)];
        let datagrams = build_datagrams(None, &batch);
        assert_eq!(datagrams.len(), 1);
        assert_eq!(datagrams[0].as_slice(), b"gauge:20|g");
    }

    #[test]
    fn gauge_float_with_prefix_and_tags() {
        let batch = [Metric::new(MetricKind::Gauge, "billing.total.costs", 12.5)
            .with_tag("plan_guid", "g1")
            .with_tag("name", "small")];
        let datagrams = build_datagrams(Some("paas"), &batch);
        assert_eq!(
            datagrams[0].as_slice(),
            b"paas.billing.total.costs:12.5|g|#plan_guid:g1,name:small"
        );
    }

    #[test]
    fn count_multiple() {
        let batch = [
            Metric::new(MetricKind::Counter, "count", 20.0),
            Metric::new(MetricKind::Counter, "count", 30.0),
        ];
        let datagrams = build_datagrams(Some("test"), &batch);
        assert_eq!(
            datagrams[0].as_slice(),
            b"test.count:20|c\ntest.count:30|c"
        );
    }

    #[test]
    fn split_oversized_batch() {
        let batch: Vec<Metric> = (0..200)
            .map(|i| {
                Metric::new(MetricKind::Gauge, "some.rather.long.metric.name", i as f64)
                    .with_tag("instance", "instance-0123456789")
            })
            .collect();
        let datagrams = build_datagrams(None, &batch);
        assert!(datagrams.len() > 1);
        for datagram in &datagrams {
            assert!(datagram.len() <= MAX_DATAGRAM_SIZE);
            assert!(!datagram.starts_with(b"\n"));
            assert!(!datagram.ends_with(b"\n"));
        }
    }

    #[test]
    fn empty_batch() {
        assert!(build_datagrams(None, &[]).is_empty());
    }
}
