//! Citelink CLI — citation attribution and deep-link navigation engine.
//!
//! Usage:
//!   citelink scan <file>
//!   citelink resolve <file> --sources <sources.json>
//!   citelink simulate [--messages N] [--spread-ms MS] [--no-watcher]

use citelink::{
    element_id_for, message_fragment, AddressBar, ConversationService, EvidenceRecord,
    MemoryAddressBar, MemoryViewTree, MessageView, NavConfig, NavigateOptions,
    NavigationOutcome, Navigator, RenderedSegment,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "citelink",
    version,
    about = "Citation attribution and deep-link navigation engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a text file for citation markers
    Scan {
        /// Path to the message text
        file: PathBuf,
    },
    /// Resolve a message against an evidence list and print the rendering
    Resolve {
        /// Path to the message text
        file: PathBuf,
        /// Path to a JSON array of evidence records
        #[arg(long)]
        sources: PathBuf,
    },
    /// Drive synthetic navigations against the in-memory view tree
    Simulate {
        /// Number of streamed-in messages
        #[arg(long, default_value_t = 50)]
        messages: usize,
        /// Window over which message elements mount, in milliseconds
        #[arg(long, default_value_t = 2_000)]
        spread_ms: u64,
        /// Disable change notification; exercise the polling fallback
        #[arg(long)]
        no_watcher: bool,
        /// Path to a YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<NavConfig, String> {
    match path {
        Some(path) => {
            NavConfig::load(&path).map_err(|e| format!("failed to load config: {}", e))
        }
        None => {
            let default = NavConfig::default_path();
            if default.exists() {
                NavConfig::load(&default).map_err(|e| format!("failed to load config: {}", e))
            } else {
                Ok(NavConfig::default())
            }
        }
    }
}

fn cmd_scan(file: &PathBuf) -> i32 {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("failed to read {}: {}", file.display(), e);
            return 1;
        }
    };

    let fragments = citelink::citation::split_fragments(&content);
    let scannable = citelink::citation::scannable_text(&fragments);
    let occurrences = citelink::citation::scan(&scannable);

    if occurrences.is_empty() {
        println!("no citation markers found");
        return 0;
    }
    for occurrence in &occurrences {
        let keys: Vec<String> = occurrence.keys.iter().map(|k| k.to_string()).collect();
        println!(
            "{}..{}  [{}]",
            occurrence.start,
            occurrence.end,
            keys.join(", ")
        );
    }
    println!("{} marker(s)", occurrences.len());
    0
}

fn cmd_resolve(file: &PathBuf, sources_path: &PathBuf) -> i32 {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("failed to read {}: {}", file.display(), e);
            return 1;
        }
    };
    let sources: Vec<EvidenceRecord> = match std::fs::read_to_string(sources_path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(sources) => sources,
        Err(e) => {
            eprintln!("failed to load sources from {}: {}", sources_path.display(), e);
            return 1;
        }
    };

    let service = ConversationService::new();
    let entry = service.upsert_message(MessageView::new(content, sources));
    let rendered = match service.render_message(&entry.view.uuid) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("render failed: {}", e);
            return 1;
        }
    };

    let mut out = String::new();
    for fragment in &rendered {
        for segment in &fragment.segments {
            match segment {
                RenderedSegment::Text(text) => out.push_str(text),
                RenderedSegment::Citations(chips) => {
                    let labels: Vec<String> = chips
                        .iter()
                        .map(|c| {
                            format!("{}{}", c.evidence.provenance_kind.prefix(), c.index_in_group)
                        })
                        .collect();
                    out.push_str(&format!("[{}]", labels.join(", ")));
                }
            }
        }
    }
    println!("{}", out);

    if !entry.registry.is_empty() {
        println!("\nSources cited:");
        for key in entry.registry.used_order() {
            let index = entry.registry.group_index(key).unwrap_or(0);
            let total = entry.registry.group_total(key.kind);
            if let Some(record) = entry.grouped.get(key.kind, key.position) {
                println!(
                    "  {}{} ({}/{} {})  {}",
                    key.kind.prefix(),
                    index,
                    index,
                    total,
                    key.kind,
                    record.title
                );
            }
        }
    }
    0
}

fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn cmd_simulate(messages: usize, spread_ms: u64, no_watcher: bool, config: NavConfig) -> i32 {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    runtime.block_on(async move {
        let tree = if no_watcher {
            MemoryViewTree::without_watcher()
        } else {
            MemoryViewTree::new()
        };
        let bar = Arc::new(MemoryAddressBar::new());
        let navigator = Navigator::with_config(
            Arc::new(tree.clone()),
            Arc::clone(&bar) as Arc<dyn AddressBar>,
            config.clone(),
        );

        let uuids: Vec<citelink::MessageUuid> =
            (0..messages).map(|_| citelink::MessageUuid::new()).collect();

        // Stream elements into the tree across the spread window.
        let streamer = tree.clone();
        let stream_uuids = uuids.clone();
        tokio::spawn(async move {
            let step = spread_ms / stream_uuids.len().max(1) as u64;
            for (i, uuid) in stream_uuids.iter().enumerate() {
                tokio::time::sleep(std::time::Duration::from_millis(step)).await;
                let height = 120.0 + (i % 5) as f64 * 40.0;
                streamer.insert_element(element_id_for(uuid), height);
            }
        });

        let options = NavigateOptions::default().with_timeout(config.navigate_timeout());
        let mut latencies_ms: Vec<u64> = Vec::with_capacity(messages);
        let mut failures = 0usize;

        for uuid in &uuids {
            let started = std::time::Instant::now();
            let outcome = navigator.navigate_to_message(uuid, &options).await;
            let elapsed = started.elapsed().as_millis() as u64;
            match outcome {
                NavigationOutcome::Done => latencies_ms.push(elapsed),
                NavigationOutcome::TimedOut => failures += 1,
            }
            if bar.fragment().as_deref() != Some(&message_fragment(uuid)) {
                eprintln!("address bar out of sync after navigating to {}", uuid);
                failures += 1;
            }
        }

        latencies_ms.sort_unstable();
        println!("navigations: {}", messages);
        println!("mode:        {}", if no_watcher { "polling" } else { "watcher" });
        println!("failures:    {}", failures);
        println!(
            "latency ms:  p50 {}  p95 {}  max {}",
            percentile(&latencies_ms, 0.5),
            percentile(&latencies_ms, 0.95),
            latencies_ms.last().copied().unwrap_or(0)
        );

        if failures > 0 {
            1
        } else {
            0
        }
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Scan { file } => cmd_scan(&file),
        Commands::Resolve { file, sources } => cmd_resolve(&file, &sources),
        Commands::Simulate {
            messages,
            spread_ms,
            no_watcher,
            config,
        } => match load_config(config) {
            Ok(config) => cmd_simulate(messages, spread_ms, no_watcher, config),
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        },
    };
    std::process::exit(code);
}
