//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::analysis::AnalysisRequest;
use chatlens::archive::ChatExport;
use chatlens::cli::Args;
use chatlens::config::AnalysisConfig;
use chatlens::core::{ChatStats, ProcessingStats, apply_filters, merge_consecutive};
use chatlens::format::write_to_format;
use chatlens::{ChatLogParser, ChatlensError, MessageType};

const DEFAULT_REQUEST_OUT: &str = "request.json";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatlens=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let format = args.output_format();
    let output_path = args.output_path();
    let filter_config = args.filter_config()?;

    println!("📦 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", format);
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    if !args.kinds.is_empty() {
        let kinds: Vec<_> = args.kinds.iter().map(|k| k.as_str()).collect();
        println!("🏷️  Kinds:   {}", kinds.join(", "));
    }
    println!();

    // Step 1: Load and parse
    println!("⏳ Reading export...");
    let parse_start = Instant::now();
    let export = ChatExport::from_path(&args.input)?;
    let messages = ChatLogParser::new().parse_export(&export);
    let original_count = messages.len();

    if messages.is_empty() {
        return Err(ChatlensError::invalid_format(
            "chat",
            "The file appears to be empty or in an unsupported format.",
        ));
    }

    let stats = ChatStats::collect(&messages);
    println!(
        "   Found {} messages from {} authors ({:.2}s)",
        original_count,
        stats.authors().len(),
        parse_start.elapsed().as_secs_f64()
    );
    println!(
        "   {} of {} attachments linked, {} images",
        stats.media(),
        export.attachments.len(),
        stats.count(MessageType::Image)
    );
    if stats.missing_media > 0 {
        println!("   {} media markers had no attachment", stats.missing_media);
    }

    // Step 2: Filter (BEFORE merge)
    let filtered = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = apply_filters(messages, &filter_config);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        messages
    };
    let filtered_count = filtered.len();

    // Step 3: Question request, built from unmerged messages
    if let Some(ref question) = args.ask {
        let request_path = args
            .request_out
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REQUEST_OUT));
        let config = AnalysisConfig::from_env().unwrap_or_default();
        let request = AnalysisRequest::for_chat(
            &filtered,
            |name| export.attachment_data(name),
            question.as_str(),
            &config,
        );
        fs::write(&request_path, serde_json::to_string_pretty(&request)?)?;
        println!(
            "🤖 Question request with {} images saved to {}",
            request.images.len(),
            request_path.display()
        );
    }

    // Step 4: Merge (unless disabled)
    let final_messages = if args.no_merge {
        println!("⏭️  Skipping merge (--no-merge)");
        filtered
    } else {
        println!("🔀 Merging consecutive messages...");
        let merged = merge_consecutive(filtered);
        println!(
            "   Compressed to {} entries ({:.1}% reduction)",
            merged.len(),
            ProcessingStats::new(filtered_count, merged.len()).compression_ratio()
        );
        merged
    };

    // Step 5: Write output in selected format
    println!("💾 Writing {}...", format);
    write_to_format(&final_messages, &output_path, format, &args.output_config())?;

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    println!();
    println!("📊 Summary:");
    println!("   Original:  {} messages", original_count);
    if filter_config.is_active() {
        println!("   Filtered:  {} messages", filtered_count);
    }
    println!("   Final:     {} entries", final_messages.len());
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
