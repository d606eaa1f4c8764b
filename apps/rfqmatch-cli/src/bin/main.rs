use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rfqmatch_catalog::InMemoryCatalog;
use rfqmatch_core::config::{Config, MatchConfig};
use rfqmatch_core::traits::EmbeddingProvider;
use rfqmatch_core::types::{CatalogEntry, QueryItem};
use rfqmatch_embed::HashEmbedder;
use rfqmatch_engine::{EngineSettings, MatchEngine};
use serde::Deserialize;

const EMBEDDING_DIM: usize = 256;

/// Catalog rows as shipped in the demo JSON file. Embeddings are computed
/// from the entry name at load time.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: u64,
    name: String,
    #[serde(default)]
    identifier: Option<String>,
    supplier_name: String,
    supplier_contact: String,
    origin_region: String,
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} match <catalog.json> \"<description>\" [identifier] [region]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn load_catalog(path: &PathBuf, embedder: &HashEmbedder) -> anyhow::Result<InMemoryCatalog> {
    let raw = fs::read_to_string(path)?;
    let records: Vec<CatalogRecord> = serde_json::from_str(&raw)?;
    let mut catalog = InMemoryCatalog::new(embedder.dim());
    for record in records {
        let embedding = embedder.embed(&record.name);
        catalog.insert(CatalogEntry {
            id: record.id,
            name: record.name,
            identifier: record.identifier,
            supplier_name: record.supplier_name,
            supplier_contact: record.supplier_contact,
            origin_region: record.origin_region,
            embedding,
        })?;
    }
    Ok(catalog)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    let settings: EngineSettings = config.get("engine").unwrap_or_default();
    let match_config: MatchConfig = config.get("match").unwrap_or_default();

    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "match" => {
            let catalog_path = args
                .first()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("samples/supplier_catalog.json"));
            let Some(description) = args.get(1).cloned() else {
                eprintln!("Usage: rfqmatch match <catalog.json> \"<description>\" [identifier] [region]");
                std::process::exit(1);
            };
            let item = QueryItem {
                description,
                identifier: args.get(2).cloned(),
                region: args.get(3).cloned(),
            };

            let embedder = Arc::new(HashEmbedder::new(EMBEDDING_DIM));
            let catalog = Arc::new(load_catalog(&catalog_path, &embedder)?);
            println!(
                "Loaded {} catalog entries from {}",
                catalog.len(),
                catalog_path.display()
            );

            let engine = MatchEngine::new(embedder, catalog, settings)?;
            let matches = tokio::runtime::Runtime::new()?
                .block_on(async { engine.match_item(&item, &match_config).await })?;

            println!(
                "Line item: {}{}",
                item.description,
                item.identifier
                    .as_deref()
                    .map(|pn| format!(" [{pn}]"))
                    .unwrap_or_default()
            );
            if matches.is_empty() {
                println!("No catalog entry cleared the similarity threshold.");
            }
            for (rank, m) in matches.iter().enumerate() {
                println!(
                    "{:>3}. [{:.4}] {} ({}, {}) vec={:.4} lex={:.4}",
                    rank + 1,
                    m.hybrid_score,
                    m.entry.name,
                    m.entry.supplier_name,
                    m.entry.supplier_contact,
                    m.vector_similarity,
                    m.lexical_similarity,
                );
            }
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
