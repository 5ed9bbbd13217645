/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod tag;
pub use tag::{MetricTag, MetricTags};

mod metric;
pub use metric::{Metric, MetricKind};

mod error;
pub use error::{BroadcastError, MetricError, SinkFailure};

mod contract;
pub use contract::{
    ArcMetricReadCloser, ArcMetricWriteCloser, ArcMetricWriter, MetricCloser, MetricReadCloser,
    MetricReader, MetricWriteCloser, MetricWriter, NoopClose,
};

mod buffer;
pub use buffer::MetricBuffer;

mod poller;
pub use poller::{MetricPoller, MetricSampler};

mod merge;
pub use merge::{merge, merge_with_capacity};

mod broadcast;
pub use broadcast::BroadcastWriter;

mod copy;
pub use copy::copy_metrics;
