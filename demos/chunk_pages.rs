//! Chunk a small tutorial page and print the result.
//!
//! ```bash
//! RUST_LOG=docslabs=debug cargo run --example chunk_pages
//! ```
//!
//! `DOCSLABS_MAX_CHUNK_CHARS` and `DOCSLABS_OVERLAP_SENTENCES` override the
//! defaults.

use docslabs::{chunk_documents, ChunkConfig, Document};
use tracing_subscriber::EnvFilter;

const PAGE: &str = "\
Python's class mechanism adds classes with a minimum of new syntax and semantics. \
It is a mixture of the class mechanisms found in C++ and Modula-3.

9.1. A Word About Names
Objects have individuality, and multiple names can be bound to the same object. \
This is known as aliasing in other languages.

9.3.1. Class Definition Syntax
The simplest form of class definition looks like this:
```
class ClassName:
    <statement-1>
    .
    .
    <statement-N>
```
Class definitions, like function definitions, must be executed before they have any effect.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ChunkConfig::from_env()?;
    let docs = vec![
        Document::new(PAGE, "classes.html", "9. Classes").with_meta("section", "9"),
        // No title: reported and skipped, the other page is unaffected.
        Document {
            text: "Orphaned text.".to_owned(),
            metadata: [("source".to_owned(), "orphan.html".into())].into_iter().collect(),
        },
    ];

    let batch = chunk_documents(&docs, &config);

    println!("{} chunks, {} skipped\n", batch.len(), batch.skipped.len());
    for chunk in &batch.chunks {
        println!("{chunk}");
        println!("{}\n", chunk.text);
    }
    for skipped in &batch.skipped {
        println!("skipped {} ({})", skipped.source, skipped.error);
    }

    Ok(())
}
