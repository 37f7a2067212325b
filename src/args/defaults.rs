pub(crate) const DEFAULT_USER_AGENT: &str = concat!("embench/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_EMBEDDINGS_MODEL: &str = "BAAI/bge-m3";
pub(crate) const DEFAULT_RERANK_MODEL: &str = "BAAI/bge-reranker-v2-m3";

pub(crate) const DEFAULT_EMBEDDINGS_REQUESTS: u64 = 100;
pub(crate) const DEFAULT_EMBEDDINGS_CONCURRENCY: usize = 6;

pub(crate) const DEFAULT_RERANK_REQUESTS: u64 = 50;
pub(crate) const DEFAULT_RERANK_CONCURRENCY: usize = 10;
