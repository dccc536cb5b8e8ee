use docsum_core::error::Error;
use docsum_core::traits::Embedder;
use docsum_embed::{encode_chunks, encode_query, get_default_embedder, FakeEmbedder, EMBEDDING_DIM};

#[test]
fn fake_embedder_shapes_and_determinism() {
    // Force fake models to avoid loading large weights
    std::env::set_var("APP_USE_FAKE_MODELS", "1");

    let embedder = get_default_embedder().expect("embedder");
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), EMBEDDING_DIM, "embedding dim is 1024");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn batch_size_does_not_change_the_matrix() {
    let embedder = FakeEmbedder::new(64);
    let texts: Vec<String> = (0..7).map(|i| format!("sentence number {i}")).collect();

    let m2 = encode_chunks(&texts, &embedder, 2).expect("batch 2");
    let m4 = encode_chunks(&texts, &embedder, 4).expect("batch 4");
    let m8 = encode_chunks(&texts, &embedder, 8).expect("batch 8");

    assert_eq!(m2.len(), texts.len());
    assert_eq!(m2, m4);
    assert_eq!(m4, m8);
}

#[test]
fn zero_batch_size_is_invalid_config() {
    let embedder = FakeEmbedder::new(16);
    let texts = vec!["a".to_string()];
    assert!(matches!(encode_chunks(&texts, &embedder, 0), Err(Error::InvalidConfig(_))));
}

#[test]
fn query_encoding_matches_single_row_encoding() {
    let embedder = FakeEmbedder::new(32);
    let q = encode_query("what is a homestead", &embedder).expect("query");
    let m = encode_chunks(&["what is a homestead".to_string()], &embedder, 1).expect("matrix");
    assert_eq!(q, m[0]);
}

/// An embedder that drops a vector, which must surface as an
/// internal-consistency error rather than silent misalignment.
struct ShortChangingEmbedder;

impl Embedder for ShortChangingEmbedder {
    fn dim(&self) -> usize {
        8
    }
    fn max_len(&self) -> usize {
        16
    }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().skip(1).map(|_| vec![0.5; 8]).collect())
    }
}

#[test]
fn vector_count_mismatch_is_fatal() {
    let texts = vec!["one".to_string(), "two".to_string()];
    match encode_chunks(&texts, &ShortChangingEmbedder, 4) {
        Err(Error::Inconsistency(msg)) => assert!(msg.contains("vectors"), "got: {msg}"),
        other => panic!("expected Inconsistency, got {other:?}"),
    }
}

struct WrongDimEmbedder;

impl Embedder for WrongDimEmbedder {
    fn dim(&self) -> usize {
        8
    }
    fn max_len(&self) -> usize {
        16
    }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![0.5; 4]).collect())
    }
}

#[test]
fn dimension_mismatch_is_fatal() {
    let texts = vec!["one".to_string()];
    assert!(matches!(
        encode_chunks(&texts, &WrongDimEmbedder, 2),
        Err(Error::Inconsistency(_))
    ));
}
