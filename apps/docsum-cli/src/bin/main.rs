use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use docsum_core::config::Config;
use docsum_pipeline::{index_document, search, IndexParams, Models, SearchParams, SessionState};
use tracing_subscriber::EnvFilter;

fn parse_args() -> (PathBuf, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <file> [chunk_size overlap batch_size]", prog);
        std::process::exit(1);
    }
    let file = PathBuf::from(args.remove(0));
    (file, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (file, overrides) = parse_args();

    let mut index_params = IndexParams::from_config(&config);
    if let Some(v) = overrides.first().and_then(|s| s.parse().ok()) {
        index_params.chunk_size = v;
    }
    if let Some(v) = overrides.get(1).and_then(|s| s.parse().ok()) {
        index_params.overlap = v;
    }
    if let Some(v) = overrides.get(2).and_then(|s| s.parse().ok()) {
        index_params.batch_size = v;
    }
    let mut search_params = SearchParams::from_config(&config);

    println!("🔎 docsum — semantic search + summary");
    println!("=====================================");

    let models = Models::load_default()?;
    let mut state = SessionState::new();
    index_file(&mut state, &file, &index_params, &models);
    if !state.has_index() {
        std::process::exit(1);
    }

    query_loop(&mut state, &index_params, &mut search_params, &models)
}

fn index_file(state: &mut SessionState, file: &Path, params: &IndexParams, models: &Models) {
    println!("📂 Indexing {}...", file.display());
    match index_document(state, file, params, models) {
        Ok(count) => println!("✅ Index built with {} chunks.", count),
        Err(e) => println!("❌ {}", e),
    }
}

fn query_loop(
    state: &mut SessionState,
    index_params: &IndexParams,
    search_params: &mut SearchParams,
    models: &Models,
) -> anyhow::Result<()> {
    println!();
    println!("🎯 Commands:");
    println!("  /topk N          - Set number of results (1-10)");
    println!("  /reindex <file>  - Index a different document");
    println!("  /quit            - Exit");
    println!("  <query>          - Search and summarize");
    println!();

    loop {
        print!("search> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(rest) = input.strip_prefix("/topk") {
            match rest.trim().parse::<usize>() {
                Ok(k) => {
                    let candidate = SearchParams { top_k: k };
                    match candidate.validate() {
                        Ok(()) => {
                            *search_params = candidate;
                            println!("✅ top_k set to {}", k);
                        }
                        Err(e) => println!("❌ {}", e),
                    }
                }
                Err(_) => println!("❌ Usage: /topk N"),
            }
            continue;
        }
        if let Some(rest) = input.strip_prefix("/reindex") {
            let path = rest.trim();
            if path.is_empty() {
                println!("❌ Usage: /reindex <file>");
            } else {
                index_file(state, Path::new(path), index_params, models);
            }
            continue;
        }
        if input == "/quit" || input == "/q" {
            break;
        }

        run_search(state, input, search_params, models);
    }
    Ok(())
}

fn run_search(state: &SessionState, query: &str, params: &SearchParams, models: &Models) {
    match search(state, query, params, models) {
        Ok(outcome) if outcome.hits.is_empty() => println!("🤷 No results."),
        Ok(outcome) => {
            println!("📄 Results:");
            for (rank, hit) in outcome.hits.iter().enumerate() {
                println!("#{} — L2 distance: {:.4}", rank + 1, hit.distance);
                println!("   {} | chunk {}", hit.doc_id, hit.chunk_id);
                println!("   {}", hit.text);
            }
            if let Some(summary) = outcome.summary {
                println!();
                println!("📝 Summary:");
                println!("{}", summary);
            }
        }
        Err(e) => println!("❌ {}", e),
    }
}
