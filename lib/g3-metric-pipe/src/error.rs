/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use thiserror::Error;

/// Errors moving through the metric pipeline. Compared by kind, never
/// by identity: `EndOfStream` is an enum case, not a shared sentinel
/// value.
#[derive(Debug, Error)]
pub enum MetricError {
    /// graceful, permanent exhaustion of a bounded stream — not a failure
    #[error("end of stream")]
    EndOfStream,
    /// write against a buffer that was already closed
    #[error("metric sink is closed")]
    SinkClosed,
    /// a sampling function failed; carried through the stream as an
    /// event so the consumer decides whether it is fatal
    #[error("sample failed: {0}")]
    Sample(#[source] anyhow::Error),
    /// an individual export backend rejected a batch
    #[error("sink write failed: {0}")]
    Sink(#[source] anyhow::Error),
    /// one or more sinks of a broadcast failed
    #[error(transparent)]
    Broadcast(#[from] BroadcastError),
}

impl MetricError {
    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, MetricError::EndOfStream)
    }
}

/// One failed sink inside a broadcast write.
#[derive(Debug)]
pub struct SinkFailure {
    pub sink: String,
    pub error: MetricError,
}

/// Ordered collection of per-sink failures from a single broadcast
/// write. Sinks that succeeded do not appear.
#[derive(Debug, Default)]
pub struct BroadcastError {
    failures: Vec<SinkFailure>,
}

impl BroadcastError {
    pub(crate) fn push(&mut self, sink: String, error: MetricError) {
        self.failures.push(SinkFailure { sink, error });
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[SinkFailure] {
        &self.failures
    }
}

impl fmt::Display for BroadcastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sink(s) failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "; {}: {}", failure.sink, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for BroadcastError {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn broadcast_display() {
        let mut err = BroadcastError::default();
        err.push("statsd".to_string(), MetricError::Sink(anyhow!("io fault")));
        err.push("console".to_string(), MetricError::SinkClosed);

        assert_eq!(err.failures().len(), 2);
        assert_eq!(
            err.to_string(),
            "2 sink(s) failed; statsd: sink write failed: io fault; console: metric sink is closed"
        );
    }
}
