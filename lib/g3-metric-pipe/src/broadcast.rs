/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Mutex;

use async_trait::async_trait;

use crate::contract::{ArcMetricWriter, MetricWriter};
use crate::error::{BroadcastError, MetricError};
use crate::metric::Metric;

/// Forwards each batch to every registered writer in registration
/// order. A failing writer does not stop the broadcast: the batch is
/// still issued to the remaining writers and all failures are
/// aggregated into one [`BroadcastError`]. Registration is internally
/// synchronized and may happen while broadcasts are in flight; a
/// writer added mid-broadcast sees the next batch.
#[derive(Default)]
pub struct BroadcastWriter {
    writers: Mutex<Vec<(String, ArcMetricWriter)>>,
}

impl BroadcastWriter {
    pub fn new() -> Self {
        BroadcastWriter::default()
    }

    pub fn add_writer<N: Into<String>>(&self, name: N, writer: ArcMetricWriter) {
        let mut writers = self.writers.lock().unwrap();
        writers.push((name.into(), writer));
    }

    pub fn len(&self) -> usize {
        self.writers.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl MetricWriter for BroadcastWriter {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
        if batch.is_empty() {
            return Ok(());
        }
        let writers = self.writers.lock().unwrap().clone();

        let mut failed = BroadcastError::default();
        for (name, writer) in &writers {
            if let Err(e) = writer.write_metrics(batch).await {
                failed.push(name.clone(), e);
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(MetricError::Broadcast(failed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricKind;
    use anyhow::anyhow;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingWriter {
        received: Mutex<Vec<Metric>>,
    }

    #[async_trait]
    impl MetricWriter for RecordingWriter {
        async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
            self.received.lock().unwrap().extend_from_slice(batch);
            Ok(())
        }
    }

    struct FailingWriter;

    #[async_trait]
    impl MetricWriter for FailingWriter {
        async fn write_metrics(&self, _batch: &[Metric]) -> Result<(), MetricError> {
            Err(MetricError::Sink(anyhow!("connection refused")))
        }
    }

    #[tokio::test]
    async fn aggregates_failures_without_short_circuit() {
        let good = Arc::new(RecordingWriter::default());
        let bad = Arc::new(FailingWriter);
        let tail = Arc::new(RecordingWriter::default());

        let broadcast = BroadcastWriter::new();
        broadcast.add_writer("good", good.clone());
        broadcast.add_writer("bad", bad);
        broadcast.add_writer("tail", tail.clone());

        let batch = [Metric::new(MetricKind::Gauge, "g", 1.0)];
        let err = broadcast.write_metrics(&batch).await.unwrap_err();

        let MetricError::Broadcast(combined) = err else {
            panic!("expected broadcast error");
        };
        assert_eq!(combined.failures().len(), 1);
        let failure = &combined.failures()[0];
        assert_eq!(failure.sink, "bad");
        assert!(failure.error.to_string().contains("connection refused"));

        // writers before and after the failing one got the batch
        assert_eq!(good.received.lock().unwrap().len(), 1);
        assert_eq!(tail.received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn all_good_returns_ok() {
        let broadcast = BroadcastWriter::new();
        broadcast.add_writer("a", Arc::new(RecordingWriter::default()));
        broadcast.add_writer("b", Arc::new(RecordingWriter::default()));

        let batch = [Metric::new(MetricKind::Counter, "c", 1.0)];
        broadcast.write_metrics(&batch).await.unwrap();
    }

    #[tokio::test]
    async fn empty_batch_is_noop() {
        let broadcast = BroadcastWriter::new();
        broadcast.write_metrics(&[]).await.unwrap();

        broadcast.add_writer("bad", Arc::new(FailingWriter));
        broadcast.write_metrics(&[]).await.unwrap();
    }
}
