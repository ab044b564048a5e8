//! Write API: batched line-protocol uploads.

use async_trait::async_trait;

use cablesync_core::{Point, PointWriteError, PointWriter};

use crate::client::InfluxClient;
use crate::error::InfluxResult;
use crate::http::{HttpBackend, HttpRequest};
use crate::line_protocol::encode_points;

impl<B: HttpBackend> InfluxClient<B> {
    /// Write `points` in chunks of the configured batch size.
    ///
    /// Every chunk is encoded before anything is sent, so an unencodable
    /// point fails the call without a partial write. Returns the number of
    /// requests made.
    pub async fn write(&self, points: &[Point]) -> InfluxResult<usize> {
        let bodies = points
            .chunks(self.config.batch_size)
            .map(encode_points)
            .collect::<InfluxResult<Vec<_>>>()?;

        for (index, body) in bodies.iter().enumerate() {
            let request = self.write_request(body.clone());
            self.execute(&request).await?;
            tracing::debug!(
                batch = index + 1,
                batches = bodies.len(),
                bucket = %self.config.bucket,
                "Wrote point batch"
            );
        }
        Ok(bodies.len())
    }

    fn write_request(&self, body: String) -> HttpRequest {
        let mut url = self.endpoint(&["api", "v2", "write"]);
        url.query_pairs_mut()
            .append_pair("org", &self.config.org)
            .append_pair("bucket", &self.config.bucket)
            .append_pair("precision", "ns");

        self.authorize(HttpRequest::post(url, body))
            .header("Content-Type", "text/plain; charset=utf-8")
            .header("Accept", "application/json")
    }
}

#[async_trait]
impl<B: HttpBackend> PointWriter for InfluxClient<B> {
    async fn health(&self) -> Result<(), PointWriteError> {
        self.check_health().await.map_err(Into::into)
    }

    async fn write_points(&self, points: &[Point]) -> Result<(), PointWriteError> {
        self.write(points).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InfluxConfig;
    use crate::http::Method;
    use crate::http::testing::FakeBackend;
    use std::time::Duration;

    fn client(batch_size: usize, backend: FakeBackend) -> InfluxClient<FakeBackend> {
        let config = InfluxConfig::new()
            .with_org("grid-ops")
            .with_bucket("telemetry")
            .with_token("t0ken")
            .with_batch_size(batch_size)
            .with_retry_delay(Duration::ZERO);
        InfluxClient::with_backend(config, backend).unwrap()
    }

    fn points(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                Point::new("sensor_data")
                    .tag("cableID", i.to_string())
                    .field("value", 1.5)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batching_splits_requests() {
        let c = client(50, FakeBackend::new());
        let requests = c.write(&points(120)).await.unwrap();
        assert_eq!(requests, 3);

        let sent = c.backend.requests();
        assert_eq!(sent.len(), 3);
        let lines: Vec<usize> = sent
            .iter()
            .map(|r| r.body.as_deref().unwrap().lines().count())
            .collect();
        assert_eq!(lines, vec![50, 50, 20]);
    }

    #[tokio::test]
    async fn test_write_request_shape() {
        let c = client(10, FakeBackend::new());
        c.write(&points(1)).await.unwrap();

        let sent = c.backend.requests();
        let request = &sent[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/api/v2/write");
        assert_eq!(
            request.url.query(),
            Some("org=grid-ops&bucket=telemetry&precision=ns")
        );
        assert_eq!(request.header_value("Authorization"), Some("Token t0ken"));
        assert_eq!(
            request.header_value("Content-Type"),
            Some("text/plain; charset=utf-8")
        );
        assert!(request.body.as_deref().unwrap().starts_with("sensor_data,cableID=0 value=1.5 "));
    }

    #[tokio::test]
    async fn test_empty_input_sends_nothing() {
        let c = client(10, FakeBackend::new());
        assert_eq!(c.write(&[]).await.unwrap(), 0);
        assert!(c.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unencodable_point_sends_nothing() {
        let c = client(2, FakeBackend::new());
        let mut batch = points(3);
        batch.push(Point::new("sensor_data"));

        let err = c.write_points(&batch).await.unwrap_err();
        assert!(matches!(err, PointWriteError::Encoding(_)));
        assert!(c.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_retried_then_succeeds() {
        let backend = FakeBackend::new().with_status(502, "bad gateway");
        let c = client(50, backend);
        c.write_points(&points(5)).await.unwrap();
        assert_eq!(c.backend.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_unauthorized_not_retried() {
        let backend = FakeBackend::new()
            .with_status(401, r#"{"code":"unauthorized","message":"unauthorized access"}"#);
        let c = client(50, backend);

        let err = c.write_points(&points(5)).await.unwrap_err();
        match err {
            PointWriteError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "unauthorized access");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(c.backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_batches() {
        let backend = FakeBackend::new()
            .with_status(204, "")
            .with_status(400, "partial write: field type conflict");
        let c = client(2, backend);

        let err = c.write_points(&points(6)).await.unwrap_err();
        assert!(matches!(err, PointWriteError::Rejected { status: 400, .. }));
        assert_eq!(c.backend.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_health_through_port() {
        let backend = FakeBackend::new().with_status(503, r#"{"status":"fail"}"#);
        let c = client(50, backend);
        let err = c.health().await.unwrap_err();
        assert!(matches!(err, PointWriteError::Rejected { status: 503, .. }));
    }
}
