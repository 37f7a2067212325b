use super::*;
use crate::error::{AppError, AppResult};

#[test]
fn spec_cycle_is_deterministic() -> AppResult<()> {
    for mode in [Mode::Embeddings, Mode::Rerank] {
        let specs = specs_for(mode);
        for id in 1..=25u64 {
            let expected = usize::try_from(id.saturating_sub(1).checked_rem(5).unwrap_or(0))
                .map_err(|err| AppError::validation(format!("index conversion: {}", err)))?;
            let expected_category = specs
                .get(expected)
                .map(|spec| spec.category)
                .ok_or_else(|| AppError::validation("spec table too short".to_owned()))?;
            if spec_for(mode, id).category != expected_category {
                return Err(AppError::validation(format!(
                    "id {} mapped to wrong category in {} mode",
                    id,
                    mode.as_str()
                )));
            }
        }
    }
    Ok(())
}

#[test]
fn spec_cycle_wraps_after_five() -> AppResult<()> {
    if spec_for(Mode::Embeddings, 1).category != spec_for(Mode::Embeddings, 6).category {
        return Err(AppError::validation("Expected id 6 to wrap to first spec"));
    }
    if spec_for(Mode::Rerank, 5).category != spec_for(Mode::Rerank, 10).category {
        return Err(AppError::validation("Expected id 10 to wrap to fifth spec"));
    }
    Ok(())
}

#[test]
fn categories_grow_in_text_length() -> AppResult<()> {
    for mode in [Mode::Embeddings, Mode::Rerank] {
        let mut previous = 0u64;
        for spec in specs_for(mode) {
            let words = token_count(Mode::Embeddings, spec);
            if words <= previous {
                return Err(AppError::validation(format!(
                    "category '{}' does not grow in {} mode",
                    spec.category,
                    mode.as_str()
                )));
            }
            previous = words;
        }
    }
    Ok(())
}

#[test]
fn embeddings_payload_shape() -> AppResult<()> {
    let spec = spec_for(Mode::Embeddings, 1);
    let payload = build_payload(Mode::Embeddings, "test-model", spec);
    if payload.get("model").and_then(Value::as_str) != Some("test-model") {
        return Err(AppError::validation("Unexpected model field"));
    }
    if payload.get("input").and_then(Value::as_str) != Some(spec.text) {
        return Err(AppError::validation("Unexpected input field"));
    }
    if payload.get("query").is_some() || payload.get("documents").is_some() {
        return Err(AppError::validation("Unexpected rerank fields"));
    }
    Ok(())
}

#[test]
fn rerank_payload_carries_ten_documents() -> AppResult<()> {
    let spec = spec_for(Mode::Rerank, 3);
    let payload = build_payload(Mode::Rerank, "test-model", spec);
    if payload.get("query").and_then(Value::as_str) != Some(spec.text) {
        return Err(AppError::validation("Unexpected query field"));
    }
    let documents = payload
        .get("documents")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::validation("Expected documents array".to_owned()))?;
    if documents.len() != 10 {
        return Err(AppError::validation(format!(
            "Expected 10 documents, got {}",
            documents.len()
        )));
    }
    if payload.get("input").is_some() {
        return Err(AppError::validation("Unexpected embeddings field"));
    }
    Ok(())
}

#[test]
fn token_count_matches_word_count() -> AppResult<()> {
    let spec = spec_for(Mode::Embeddings, 1);
    if token_count(Mode::Embeddings, spec) != 4 {
        return Err(AppError::validation("Expected 4 words in shortest text"));
    }
    let rerank_spec = spec_for(Mode::Rerank, 1);
    let document_words: u64 = RERANK_DOCUMENTS
        .iter()
        .map(|doc| u64::try_from(doc.split_whitespace().count()).unwrap_or(u64::MAX))
        .sum();
    let expected = document_words.saturating_add(4);
    if token_count(Mode::Rerank, rerank_spec) != expected {
        return Err(AppError::validation(
            "Rerank token count should include all documents",
        ));
    }
    Ok(())
}

#[test]
fn parse_top_score_reads_first_element() -> AppResult<()> {
    let score = parse_top_score(br#"[{"score": 0.87}, {"score": 0.12}]"#)
        .ok_or_else(|| AppError::validation("Expected a score".to_owned()))?;
    if (score - 0.87).abs() > f64::EPSILON {
        return Err(AppError::validation("Expected top score 0.87"));
    }
    Ok(())
}

#[test]
fn parse_top_score_tolerates_malformed_bodies() -> AppResult<()> {
    let cases: [&[u8]; 6] = [
        b"{}",
        b"not json",
        b"[]",
        br#"[{"relevance": 0.5}]"#,
        br#"[{"score": "high"}]"#,
        b"",
    ];
    for body in cases {
        if parse_top_score(body).is_some() {
            return Err(AppError::validation(format!(
                "Expected no score for body {:?}",
                String::from_utf8_lossy(body)
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_top_score_accepts_integer_scores() -> AppResult<()> {
    let score = parse_top_score(br#"[{"score": 1}]"#)
        .ok_or_else(|| AppError::validation("Expected integer score to parse".to_owned()))?;
    if (score - 1.0).abs() > f64::EPSILON {
        return Err(AppError::validation("Unexpected integer score value"));
    }
    Ok(())
}
