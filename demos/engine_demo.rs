use bm25_engine::{BM25Config, BM25Engine, Document};
use serde_json::json;

fn doc(v: serde_json::Value) -> Document {
    serde_json::from_value(v).expect("valid document")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    structured_logger::Builder::new().init();

    let mut engine = BM25Engine::with_identity_field("id", Some(BM25Config::default()))?;
    engine.add_index("title")?;
    engine.add_index("body")?;

    engine.add_documents(vec![
        doc(json!({
            "id": "1",
            "title": "Rust",
            "body": "Rust is a systems programming language",
        })),
        doc(json!({
            "id": "2",
            "title": "Rust performance",
            "body": "Rust is fast and memory efficient",
        })),
        doc(json!({
            "id": "3",
            "title": "Python",
            "body": "Python is a dynamic language",
        })),
    ])?;

    for query in ["Rust memory", "language", "garbage collection"] {
        println!("query: {query:?}");
        for result in engine.search(query) {
            let id = result.document.field("id").cloned().unwrap_or_default();
            println!("  doc {id}, score: {:.4}", result.score);
        }
    }

    // Overwrite by identity, then search again.
    engine.add_documents(vec![doc(json!({
        "id": "3",
        "title": "Python 3",
        "body": "Python is a dynamic, garbage collected language",
    }))])?;

    println!("query after update: \"garbage collection\"");
    for result in engine.search("garbage collection") {
        let id = result.document.field("id").cloned().unwrap_or_default();
        println!("  doc {id}, score: {:.4}", result.score);
    }

    let stats = engine.stats();
    println!(
        "corpus: {} documents, {} distinct terms, avg length {:.2}",
        stats.num_documents, stats.distinct_terms, stats.avg_doc_tokens
    );

    Ok(())
}
