/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::trace;

use crate::buffer::MetricBuffer;
use crate::contract::{ArcMetricReadCloser, MetricWriter};
use crate::error::MetricError;

/// Caller-supplied sampling routine. Each invocation gets a write
/// handle and either writes a batch of fresh samples or fails; a
/// failure is surfaced to the stream consumer, not to the poller.
#[async_trait]
pub trait MetricSampler {
    async fn sample(&self, writer: &dyn MetricWriter) -> anyhow::Result<()>;
}

/// Periodic sampling into a private buffer. The spawned task runs
/// until the buffer is closed; a failed sample never stops polling.
/// The next sample starts one full `interval` after the previous one
/// finished, so the effective period is elapsed time plus `interval`
/// and there is no catch-up on slow samples.
pub struct MetricPoller {
    interval: Duration,
    sampler: Box<dyn MetricSampler + Send + Sync>,
    buffer_capacity: usize,
}

impl MetricPoller {
    pub fn new<S>(interval: Duration, sampler: S, buffer_capacity: usize) -> Self
    where
        S: MetricSampler + Send + Sync + 'static,
    {
        MetricPoller {
            interval,
            sampler: Box::new(sampler),
            buffer_capacity,
        }
    }

    pub fn spawn(self) -> ArcMetricReadCloser {
        let buffer = Arc::new(MetricBuffer::new(self.buffer_capacity));
        let MetricPoller {
            interval, sampler, ..
        } = self;

        let poll_buffer = buffer.clone();
        tokio::spawn(async move {
            loop {
                if poll_buffer.is_closed() {
                    break;
                }
                if let Err(e) = sampler.sample(poll_buffer.as_ref()).await {
                    trace!("sample failed, forwarding error to consumer: {e:?}");
                    if poll_buffer
                        .write_error(MetricError::Sample(e))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                tokio::select! {
                    biased;
                    _ = poll_buffer.wait_closed() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        buffer
    }
}
