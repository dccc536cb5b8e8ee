use std::fs;
use std::path::PathBuf;

use docsum_core::error::Error;
use docsum_pipeline::{index_document, search, IndexParams, Models, SearchParams, SessionState};
use tempfile::TempDir;

fn fake_models() -> Models {
    std::env::set_var("APP_USE_FAKE_MODELS", "1");
    Models::load_default().expect("fake models")
}

/// Three 100-word single-topic sections plus a 50-word tail, so
/// chunk_size=100 / overlap=0 yields four chunks with known content.
fn topical_document(dir: &TempDir) -> PathBuf {
    let mut text = String::new();
    for topic in ["alpacas", "birches", "cobalt"] {
        for _ in 0..100 {
            text.push_str(topic);
            text.push(' ');
        }
    }
    for _ in 0..50 {
        text.push_str("delta ");
    }
    let path = dir.path().join("topics.txt");
    fs::write(&path, text).expect("write");
    path
}

fn params_100_0() -> IndexParams {
    IndexParams { chunk_size: 100, overlap: 0, batch_size: 4 }
}

#[test]
fn index_then_search_end_to_end() {
    let tmp = TempDir::new().expect("tempdir");
    let path = topical_document(&tmp);
    let models = fake_models();
    let mut state = SessionState::new();

    let count = index_document(&mut state, &path, &params_100_0(), &models).expect("index");
    assert_eq!(count, 4);

    let outcome = search(&state, "cobalt", &SearchParams { top_k: 3 }, &models).expect("search");
    assert_eq!(outcome.hits.len(), 3);
    assert!(outcome.hits[0].text.contains("cobalt"), "best hit matches the query topic");
    assert!(outcome.hits[0].distance < outcome.hits[1].distance);
    assert!(
        outcome.hits.windows(2).all(|w| w[0].distance <= w[1].distance),
        "distances are non-decreasing"
    );
    assert_eq!(outcome.hits[0].doc_id, "topics.txt");
    let summary = outcome.summary.expect("summary present when hits exist");
    assert!(!summary.is_empty());
}

#[test]
fn alignment_holds_after_indexing() {
    let tmp = TempDir::new().expect("tempdir");
    let path = topical_document(&tmp);
    let models = fake_models();
    let mut state = SessionState::new();

    let count = index_document(&mut state, &path, &params_100_0(), &models).expect("index");
    let corpus = state.corpus().expect("corpus");
    assert_eq!(corpus.chunks.len(), count);
    assert_eq!(corpus.embeddings.len(), count);
    assert_eq!(corpus.index.len(), count);
    // chunk_id is the emission order
    for (i, chunk) in corpus.chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_id, i);
        assert!(!chunk.text.is_empty());
    }
}

#[test]
fn top_k_beyond_corpus_returns_every_chunk_once() {
    let tmp = TempDir::new().expect("tempdir");
    let path = topical_document(&tmp);
    let models = fake_models();
    let mut state = SessionState::new();
    index_document(&mut state, &path, &params_100_0(), &models).expect("index");

    let outcome = search(&state, "birches", &SearchParams { top_k: 10 }, &models).expect("search");
    assert_eq!(outcome.hits.len(), 4, "sentinels filtered, one hit per indexed chunk");
    let mut ids: Vec<usize> = outcome.hits.iter().map(|h| h.chunk_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn search_without_index_and_empty_query_are_user_errors() {
    let models = fake_models();
    let state = SessionState::new();
    assert!(matches!(
        search(&state, "anything", &SearchParams::default(), &models),
        Err(Error::NoIndex)
    ));

    let tmp = TempDir::new().expect("tempdir");
    let path = topical_document(&tmp);
    let mut state = SessionState::new();
    index_document(&mut state, &path, &params_100_0(), &models).expect("index");
    assert!(matches!(
        search(&state, "   \t ", &SearchParams::default(), &models),
        Err(Error::EmptyQuery)
    ));
}

#[test]
fn failed_reindex_preserves_previous_corpus() {
    let tmp = TempDir::new().expect("tempdir");
    let path = topical_document(&tmp);
    let models = fake_models();
    let mut state = SessionState::new();
    index_document(&mut state, &path, &params_100_0(), &models).expect("index");

    let before = search(&state, "alpacas", &SearchParams::default(), &models).expect("search");

    // empty file: extraction fails, nothing must change
    let empty = tmp.path().join("empty.txt");
    fs::write(&empty, "  \n ").expect("write");
    assert!(matches!(
        index_document(&mut state, &empty, &params_100_0(), &models),
        Err(Error::NoTextDetected(_))
    ));

    // unsupported file type: rejected before extraction
    let weird = tmp.path().join("sheet.xlsx");
    fs::write(&weird, "bytes").expect("write");
    assert!(matches!(
        index_document(&mut state, &weird, &params_100_0(), &models),
        Err(Error::UnsupportedFile(_))
    ));

    // invalid parameters: rejected at the boundary
    let bad = IndexParams { chunk_size: 50, overlap: 0, batch_size: 4 };
    assert!(matches!(
        index_document(&mut state, &path, &bad, &models),
        Err(Error::InvalidConfig(_))
    ));

    let after = search(&state, "alpacas", &SearchParams::default(), &models).expect("search");
    assert_eq!(before.hits.len(), after.hits.len());
    for (a, b) in before.hits.iter().zip(after.hits.iter()) {
        assert_eq!(a.chunk_id, b.chunk_id);
        assert_eq!(a.doc_id, b.doc_id);
        assert!((a.distance - b.distance).abs() <= 1e-6);
    }
}

#[test]
fn empty_document_never_creates_an_index() {
    let tmp = TempDir::new().expect("tempdir");
    let empty = tmp.path().join("empty.txt");
    fs::write(&empty, "").expect("write");
    let models = fake_models();
    let mut state = SessionState::new();

    assert!(matches!(
        index_document(&mut state, &empty, &params_100_0(), &models),
        Err(Error::NoTextDetected(_))
    ));
    assert!(!state.has_index());
    assert_eq!(state.chunk_count(), 0);
}

#[test]
fn batch_size_choice_does_not_change_results() {
    let tmp = TempDir::new().expect("tempdir");
    let path = topical_document(&tmp);
    let models = fake_models();

    let mut hits_per_batch = Vec::new();
    for batch_size in [2, 4, 8] {
        let mut state = SessionState::new();
        let params = IndexParams { chunk_size: 100, overlap: 0, batch_size };
        index_document(&mut state, &path, &params, &models).expect("index");
        let outcome = search(&state, "delta", &SearchParams::default(), &models).expect("search");
        hits_per_batch.push(outcome.hits);
    }
    for other in &hits_per_batch[1..] {
        assert_eq!(hits_per_batch[0].len(), other.len());
        for (a, b) in hits_per_batch[0].iter().zip(other.iter()) {
            assert_eq!(a.chunk_id, b.chunk_id);
            assert!((a.distance - b.distance).abs() <= 1e-6);
        }
    }
}
