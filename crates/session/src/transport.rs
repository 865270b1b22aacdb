use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use jobwatch_api_client::ApiClient;
use jobwatch_core::search::SearchRequest;

/// Lazy, finite sequence of raw byte chunks. Exhaustion signals normal
/// stream end; dropping the stream aborts the underlying connection.
pub type ChunkStream = BoxStream<'static, Result<Bytes>>;

/// Seam between the controller and the wire.
///
/// A non-success response fails `open` before any chunk is yielded; the
/// caller must not read after that. Tests substitute scripted sources here.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn open(&self, request: &SearchRequest) -> Result<ChunkStream>;
}

/// Production transport backed by the backend's `/search/stream` endpoint.
pub struct HttpSearchTransport {
    api: ApiClient,
}

impl HttpSearchTransport {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[async_trait]
impl SearchTransport for HttpSearchTransport {
    async fn open(&self, request: &SearchRequest) -> Result<ChunkStream> {
        let stream = self.api.open_search_stream(request).await?;
        Ok(stream.map(|chunk| chunk.map_err(anyhow::Error::from)).boxed())
    }
}
