/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::contract::{MetricReader, MetricWriteCloser};
use crate::error::MetricError;

/// Drains `src` into `dst` one metric at a time. Returns Ok when the
/// source reports end of stream, after closing the destination. Any
/// other read error and any write error aborts the loop and is
/// returned to the caller unmodified; retry policy belongs to the
/// caller. Wrap a destination that must outlive the copy in
/// [`NoopClose`](crate::NoopClose).
pub async fn copy_metrics<W, R>(dst: &W, src: &R) -> Result<(), MetricError>
where
    W: MetricWriteCloser + ?Sized,
    R: MetricReader + ?Sized,
{
    loop {
        let metric = match src.read_metric().await {
            Ok(metric) => metric,
            Err(MetricError::EndOfStream) => {
                dst.close();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        dst.write_metrics(std::slice::from_ref(&metric)).await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MetricBuffer;
    use crate::contract::{MetricCloser, MetricWriter};
    use crate::metric::{Metric, MetricKind};
    use anyhow::anyhow;
    use std::sync::Arc;

    #[tokio::test]
    async fn copies_until_end_of_stream_and_closes_dst() {
        let src = MetricBuffer::new(4);
        src.write_metrics(&[
            Metric::new(MetricKind::Gauge, "a", 1.0),
            Metric::new(MetricKind::Gauge, "b", 2.0),
        ])
        .await
        .unwrap();
        src.close();

        let dst = Arc::new(MetricBuffer::new(4));
        copy_metrics(&dst, &src).await.unwrap();

        assert!(dst.is_closed());
        assert_eq!(dst.read_metric().await.unwrap().name, "a");
        assert_eq!(dst.read_metric().await.unwrap().name, "b");
        assert!(dst.read_metric().await.unwrap_err().is_end_of_stream());
    }

    #[tokio::test]
    async fn read_error_aborts_unmodified() {
        let src = MetricBuffer::new(4);
        src.write_error(MetricError::Sample(anyhow!("flaky source")))
            .await
            .unwrap();

        let dst = Arc::new(MetricBuffer::new(4));
        let err = copy_metrics(&dst, &src).await.unwrap_err();
        assert!(matches!(err, MetricError::Sample(_)));
        // an aborted copy leaves the destination open
        assert!(!dst.is_closed());
    }

    #[tokio::test]
    async fn write_error_aborts() {
        let src = MetricBuffer::new(4);
        src.write_metrics(&[Metric::new(MetricKind::Gauge, "a", 1.0)])
            .await
            .unwrap();

        let dst = Arc::new(MetricBuffer::new(4));
        dst.close();
        let err = copy_metrics(&dst, &src).await.unwrap_err();
        assert!(matches!(err, MetricError::SinkClosed));
    }
}
