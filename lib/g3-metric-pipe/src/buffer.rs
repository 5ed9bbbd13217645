/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::contract::{MetricCloser, MetricReader, MetricWriter};
use crate::error::MetricError;
use crate::metric::Metric;

enum Event {
    Metric(Metric),
    Error(MetricError),
}

fn split_event(event: Option<Event>) -> Result<Metric, MetricError> {
    match event {
        Some(Event::Metric(metric)) => Ok(metric),
        Some(Event::Error(e)) => Err(e),
        None => Err(MetricError::EndOfStream),
    }
}

/// Bounded metric-or-error transport, the only concrete storage in the
/// pipeline. Writes suspend while the buffer is full; this is the sole
/// backpressure mechanism. One logical reader is expected per buffer.
///
/// Closing cancels the buffer lifetime: producers fail cleanly with
/// `SinkClosed` from then on, while events already queued are still
/// delivered in FIFO order before `EndOfStream` is reported.
pub struct MetricBuffer {
    sender: mpsc::Sender<Event>,
    receiver: Mutex<mpsc::Receiver<Event>>,
    closed: CancellationToken,
}

impl MetricBuffer {
    /// `capacity` bounds the queue and thereby the point at which
    /// producers stall. A capacity of 0 is clamped to 1: tokio
    /// channels have no rendezvous mode.
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        MetricBuffer {
            sender,
            receiver: Mutex::new(receiver),
            closed: CancellationToken::new(),
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    pub(crate) async fn wait_closed(&self) {
        self.closed.cancelled().await
    }

    async fn write_event(&self, event: Event) -> Result<(), MetricError> {
        tokio::select! {
            biased;
            _ = self.closed.cancelled() => Err(MetricError::SinkClosed),
            r = self.sender.send(event) => r.map_err(|_| MetricError::SinkClosed),
        }
    }

    /// Threads a producer-side failure through to the consumer without
    /// terminating the stream.
    pub async fn write_error(&self, error: MetricError) -> Result<(), MetricError> {
        self.write_event(Event::Error(error)).await
    }
}

#[async_trait]
impl MetricWriter for MetricBuffer {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
        for metric in batch {
            self.write_event(Event::Metric(metric.clone())).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl MetricReader for MetricBuffer {
    async fn read_metric(&self) -> Result<Metric, MetricError> {
        let mut receiver = self.receiver.lock().await;
        loop {
            if self.closed.is_cancelled() {
                // stop producers first, then drain what was queued
                // before the close; recv returns None once empty
                receiver.close();
                return split_event(receiver.recv().await);
            }
            tokio::select! {
                biased;
                event = receiver.recv() => return split_event(event),
                _ = self.closed.cancelled() => {}
            }
        }
    }
}

impl MetricCloser for MetricBuffer {
    fn close(&self) {
        self.closed.cancel()
    }
}
