/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use log::trace;
use tokio::task::JoinSet;

use crate::buffer::MetricBuffer;
use crate::contract::{ArcMetricReadCloser, MetricCloser, NoopClose};
use crate::copy::copy_metrics;

/// Merges independent metric streams into one, with a buffer capacity
/// of one slot per source.
pub fn merge(sources: Vec<ArcMetricReadCloser>) -> ArcMetricReadCloser {
    let capacity = sources.len();
    merge_with_capacity(sources, capacity)
}

/// Merges independent metric streams into one. One pump task runs per
/// source; relative order across sources is unspecified, per-source
/// order is preserved. Closing the merged stream closes every source.
/// A source that reports end of stream is finished for good; once all
/// sources are finished the merged stream ends as well. Any other pump
/// error is surfaced in-stream and that source's pump is restarted.
pub fn merge_with_capacity(
    sources: Vec<ArcMetricReadCloser>,
    capacity: usize,
) -> ArcMetricReadCloser {
    let buffer = Arc::new(MetricBuffer::new(capacity));

    let mut pumps = JoinSet::new();
    for (index, source) in sources.iter().enumerate() {
        let source = source.clone();
        let buffer = buffer.clone();
        pumps.spawn(async move {
            let dst = NoopClose(buffer.clone());
            loop {
                match copy_metrics(&dst, source.as_ref()).await {
                    Ok(_) => {
                        trace!("merge source #{index} exhausted");
                        break;
                    }
                    Err(e) => {
                        if buffer.is_closed() {
                            break;
                        }
                        if buffer.write_error(e).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    let merged = buffer.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = buffer.wait_closed() => {
                    for source in &sources {
                        source.close();
                    }
                    break;
                }
                joined = pumps.join_next() => {
                    if joined.is_none() {
                        // every source finished on its own; end the
                        // merged stream so the consumer sees EOS
                        buffer.close();
                        break;
                    }
                }
            }
        }
        while pumps.join_next().await.is_some() {}
    });

    merged
}
