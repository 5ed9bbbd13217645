/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::MetricError;
use crate::metric::Metric;

/// Accepts metric batches. An empty batch is a successful no-op.
/// Shared components (buffers, broadcasts) take write calls from many
/// tasks at once.
#[async_trait]
pub trait MetricWriter: Send + Sync {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError>;
}

/// Pulls metrics one at a time. The call suspends until a metric is
/// available, a carried producer error is available, or the stream
/// ends. After `MetricError::EndOfStream` has been returned the caller
/// must stop reading.
#[async_trait]
pub trait MetricReader: Send + Sync {
    async fn read_metric(&self) -> Result<Metric, MetricError>;
}

/// Signals a component to stop producing or accepting metrics and to
/// release its task resources. Callers should call this at most once;
/// implementations are free to be stricter than idempotent.
pub trait MetricCloser {
    fn close(&self);
}

pub trait MetricReadCloser: MetricReader + MetricCloser {}
impl<T: MetricReader + MetricCloser + ?Sized> MetricReadCloser for T {}

pub trait MetricWriteCloser: MetricWriter + MetricCloser {}
impl<T: MetricWriter + MetricCloser + ?Sized> MetricWriteCloser for T {}

pub type ArcMetricWriter = Arc<dyn MetricWriter + Send + Sync>;
pub type ArcMetricReadCloser = Arc<dyn MetricReadCloser + Send + Sync>;
pub type ArcMetricWriteCloser = Arc<dyn MetricWriteCloser + Send + Sync>;

#[async_trait]
impl<T: MetricWriter + ?Sized> MetricWriter for Arc<T> {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
        self.as_ref().write_metrics(batch).await
    }
}

#[async_trait]
impl<T: MetricReader + ?Sized> MetricReader for Arc<T> {
    async fn read_metric(&self) -> Result<Metric, MetricError> {
        self.as_ref().read_metric().await
    }
}

impl<T: MetricCloser + ?Sized> MetricCloser for Arc<T> {
    fn close(&self) {
        self.as_ref().close()
    }
}

/// Adapter giving a component without close support a no-op close, so
/// call sites can hold a uniform closable handle instead of probing
/// for the capability.
pub struct NoopClose<T>(pub T);

#[async_trait]
impl<T: MetricWriter> MetricWriter for NoopClose<T> {
    async fn write_metrics(&self, batch: &[Metric]) -> Result<(), MetricError> {
        self.0.write_metrics(batch).await
    }
}

#[async_trait]
impl<T: MetricReader> MetricReader for NoopClose<T> {
    async fn read_metric(&self) -> Result<Metric, MetricError> {
        self.0.read_metric().await
    }
}

impl<T> MetricCloser for NoopClose<T> {
    fn close(&self) {}
}
