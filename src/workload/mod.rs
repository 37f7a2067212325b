//! Static request specs, payload builders, and response-score parsing.
#[cfg(test)]
mod tests;

use serde_json::Value;

use crate::args::Mode;

/// One canned test case. `text` is the embedding input in embeddings mode
/// and the query in rerank mode.
#[derive(Debug, Clone, Copy)]
pub struct RequestSpec {
    pub category: &'static str,
    pub text: &'static str,
}

const EMBEDDING_SPECS: [RequestSpec; 5] = [
    RequestSpec {
        category: "short",
        text: "What is semantic search?",
    },
    RequestSpec {
        category: "medium",
        text: "How do vector databases index high dimensional embeddings?",
    },
    RequestSpec {
        category: "long",
        text: "Text embedding models map sentences into dense numeric vectors so that \
semantically similar passages end up close together in the vector space.",
    },
    RequestSpec {
        category: "very-long",
        text: "Retrieval augmented generation pipelines first embed a user question, then \
fetch the most similar documents from an index, and finally pass those documents to a \
language model so it can ground its answer in retrieved evidence.",
    },
    RequestSpec {
        category: "extra-long",
        text: "Evaluating an embedding service under load matters because production \
traffic rarely arrives one request at a time; batching behavior, queueing delays, and \
model warm-up all shape tail latency, and a benchmark that exercises realistic \
concurrency reveals how the deployment behaves when dozens of clients embed documents \
of very different lengths at once.",
    },
];

const RERANK_SPECS: [RequestSpec; 5] = [
    RequestSpec {
        category: "short",
        text: "What is semantic search?",
    },
    RequestSpec {
        category: "medium",
        text: "Which database is best for storing embeddings?",
    },
    RequestSpec {
        category: "long",
        text: "How does a cross encoder rerank the candidate documents returned by a \
first stage retriever?",
    },
    RequestSpec {
        category: "very-long",
        text: "When building a question answering system over internal documentation, \
what retrieval strategy keeps answers grounded while still responding quickly under \
heavy concurrent load?",
    },
    RequestSpec {
        category: "extra-long",
        text: "Considering both accuracy and latency, how should a production search \
pipeline balance lightweight bi encoder retrieval against expensive cross encoder \
reranking when the corpus contains millions of documents and users expect answers in \
well under a second?",
    },
];

const RERANK_DOCUMENTS: [&str; 10] = [
    "Semantic search uses dense vector representations to match queries with documents \
by meaning rather than exact keywords.",
    "A cross encoder scores each query document pair jointly, trading throughput for \
substantially better ranking quality.",
    "Vector databases use approximate nearest neighbor indexes to retrieve candidate \
documents in milliseconds even at billion scale.",
    "BM25 remains a strong lexical baseline and is often combined with dense retrieval \
in hybrid search systems.",
    "Reranking a small candidate set with a heavyweight model is usually cheaper than \
scoring the whole corpus.",
    "Embedding dimensionality affects both index memory footprint and the latency of \
similarity computations.",
    "Quantization compresses embedding vectors to reduce memory usage at a small cost \
in retrieval accuracy.",
    "Caching frequent query embeddings avoids recomputing them and cuts average \
response time noticeably.",
    "Batching several inference requests together improves accelerator utilization but \
can increase per-request tail latency.",
    "Latency percentiles such as P99 reveal queueing effects that average response \
times hide.",
];

#[must_use]
pub const fn specs_for(mode: Mode) -> &'static [RequestSpec; 5] {
    match mode {
        Mode::Embeddings => &EMBEDDING_SPECS,
        Mode::Rerank => &RERANK_SPECS,
    }
}

/// Maps a 1-based request id onto the spec table, cycling round-robin.
#[must_use]
pub fn spec_for(mode: Mode, id: u64) -> &'static RequestSpec {
    let [first, second, third, fourth, fifth] = specs_for(mode);
    match id.saturating_sub(1).checked_rem(5).unwrap_or(0) {
        0 => first,
        1 => second,
        2 => third,
        3 => fourth,
        _ => fifth,
    }
}

#[must_use]
pub fn build_payload(mode: Mode, model: &str, spec: &RequestSpec) -> Value {
    match mode {
        Mode::Embeddings => serde_json::json!({
            "model": model,
            "input": spec.text,
        }),
        Mode::Rerank => serde_json::json!({
            "model": model,
            "query": spec.text,
            "documents": RERANK_DOCUMENTS,
        }),
    }
}

/// Whitespace word count of the payload text; rerank counts the query plus
/// every document sent with it.
#[must_use]
pub fn token_count(mode: Mode, spec: &RequestSpec) -> u64 {
    let words = count_words(spec.text);
    match mode {
        Mode::Embeddings => words,
        Mode::Rerank => RERANK_DOCUMENTS
            .iter()
            .fold(words, |acc, doc| acc.saturating_add(count_words(doc))),
    }
}

/// Extracts `[0].score` from a rerank response body. Anything that is not a
/// JSON array with a numeric score at element 0 yields `None`.
#[must_use]
pub fn parse_top_score(body: &[u8]) -> Option<f64> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get(0)?.get("score")?.as_f64()
}

fn count_words(text: &str) -> u64 {
    u64::try_from(text.split_whitespace().count()).unwrap_or(u64::MAX)
}
