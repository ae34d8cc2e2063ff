//! Command-line interface for the wordnet_lite library.
//!
//! This CLI looks words up, derives synonyms, antonyms and parts of speech,
//! lists the vocabulary, and manages the unpacked data.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{LevelFilter, debug, error, info};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wordnet_lite::{
    Category, LoadOptions, SenseRecord, SynonymSet, WordNet,
    error::Result,
    progress::{ProgressCallback, ProgressUpdate},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "WordNet lookup CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the unpacked sense tables (optional)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// ZIP bundle to unpack the sense tables from (optional)
    #[arg(long, global = true)]
    archive: Option<PathBuf>,

    /// Base URL serving <category>.json tables (optional)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Force reload data, discarding the unpacked tables
    #[arg(long, global = true, default_value_t = false)]
    force_reload: bool,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a word or a sense id, optionally filtering by part of speech
    Lookup {
        /// The word or sense id (e.g. bitter.adjective.01)
        query: String,
        /// Optional part of speech filter (noun, verb, adj, adv)
        pos: Option<Category>,
    },
    /// Show close and far synonyms of a word
    Synonyms {
        word: String,
        pos: Option<Category>,
    },
    /// Show antonyms of an adjective
    Antonyms {
        word: String,
        pos: Option<Category>,
    },
    /// Show the parts of speech a word belongs to
    Pos { word: String },
    /// List known words
    Words {
        /// Only show words containing this text
        #[arg(long)]
        contains: Option<String>,
        /// Show at most this many words
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show a random word
    Random,
    /// Delete the unpacked sense tables
    ClearData,
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Creates a progress callback for displaying unpacking and download progress.
fn create_progress_callback(
    multi_progress: MultiProgress,
    progress_bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
) -> ProgressCallback {
    Box::new(move |update: ProgressUpdate| {
        let Ok(mut bars) = progress_bars.lock() else {
            return true;
        };

        if update.current_item == 0 && !bars.contains_key(&update.stage_description) {
            // Create new progress bar for this stage
            let pb = multi_progress.add(ProgressBar::new(update.total_items.unwrap_or(0)));
            let style_template = if update.total_items.is_some() {
                "{prefix:>12.cyan.bold} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({percent}%) {msg}"
            } else {
                "{prefix:>12.cyan.bold} [{elapsed_precise}] {spinner} {msg}"
            };

            if let Ok(style) = ProgressStyle::default_bar().template(style_template) {
                pb.set_style(style.progress_chars("##-"));
            }
            pb.set_prefix(update.stage_description.clone());
            pb.set_message(update.message.unwrap_or_default());
            pb.enable_steady_tick(Duration::from_millis(100));
            bars.insert(update.stage_description.clone(), pb);
        } else if let Some(pb) = bars.get(&update.stage_description) {
            // Update existing progress bar
            if let Some(total) = update.total_items {
                pb.set_length(total);
            }
            pb.set_position(update.current_item);
            if let Some(msg) = update.message {
                pb.set_message(msg);
            }
            if let Some(total) = update.total_items {
                if update.current_item >= total {
                    pb.finish_and_clear();
                }
            }
        }
        true
    })
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Commands::ClearData = cli.command {
        info!("Clearing unpacked data...");
        match WordNet::clear_data(cli.data_dir) {
            Ok(()) => println!("{}", "Unpacked data cleared successfully.".green()),
            Err(e) => {
                error!("Failed to clear data: {}", e);
                eprintln!("{}", format!("Error clearing data: {}", e).red());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    info!("Loading WordNet data...");

    let multi_progress = MultiProgress::new();
    let progress_bars = Arc::new(Mutex::new(HashMap::<String, ProgressBar>::new()));

    let callback = create_progress_callback(multi_progress.clone(), progress_bars.clone());

    let load_options = LoadOptions {
        data_dir: cli.data_dir.clone(),
        archive_path: cli.archive.clone(),
        base_url: cli.base_url.clone(),
        force_reload: cli.force_reload,
    };

    let wn_result = WordNet::load_with_options(load_options, Some(callback)).await;

    // Clean up progress bars
    if let Ok(bars) = progress_bars.lock() {
        for (_, pb) in bars.iter() {
            pb.finish_and_clear();
        }
    }
    drop(multi_progress);
    std::io::stdout().flush().ok();

    let wn = match wn_result {
        Ok(wn) => {
            info!("WordNet data loaded successfully.");
            wn
        }
        Err(e) => {
            error!("Failed to load WordNet data: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    let json = cli.json;
    let outcome = match cli.command {
        Commands::Lookup { query, pos } => handle_lookup(&wn, &query, pos, json),
        Commands::Synonyms { word, pos } => handle_synonyms(&wn, &word, pos, json),
        Commands::Antonyms { word, pos } => handle_antonyms(&wn, &word, pos, json),
        Commands::Pos { word } => handle_pos(&wn, &word, json),
        Commands::Words { contains, limit } => handle_words(&wn, contains.as_deref(), limit, json),
        Commands::Random => handle_random(&wn, json),
        Commands::ClearData => Ok(()),
    };

    if let Err(e) = outcome {
        error!("Command failed: {}", e);
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints one sense record.
fn print_record(record: &SenseRecord, counter: usize) {
    println!(
        "\n{} {} ~ {}",
        format!("{}.", counter).bold(),
        record.id.bold().cyan(),
        record.syntactic_category.to_string().italic()
    );
    if !record.description.is_empty() {
        println!("   {}", record.description.trim());
    }
    println!("   {}: {}", "Words".magenta(), record.words.join(", ").green());
    if !record.lexname.is_empty() {
        println!("   {}", record.lexname.dimmed());
    }
}

fn handle_lookup(wn: &WordNet, query: &str, pos: Option<Category>, json: bool) -> Result<()> {
    info!("Looking up: '{}', PoS filter: {:?}", query, pos);
    let start_lookup = Instant::now();
    let records = wn.lookup(query, pos);
    debug!("lookup for '{}' took: {:?}", query, start_lookup.elapsed());

    if json {
        return print_json(&records);
    }
    if records.is_empty() {
        println!("No senses found for '{}'.", query.yellow());
        return Ok(());
    }
    for (index, record) in records.iter().enumerate() {
        print_record(record, index + 1);
    }
    Ok(())
}

fn handle_synonyms(wn: &WordNet, word: &str, pos: Option<Category>, json: bool) -> Result<()> {
    let sets: Vec<SynonymSet> = wn.synonyms(word, pos)?;
    if json {
        return print_json(&sets);
    }
    if sets.is_empty() {
        println!("No senses found for '{}'.", word.yellow());
        return Ok(());
    }
    for set in sets {
        println!("\n{}", set.synset.bold().cyan());
        if !set.close.is_empty() {
            println!("   {}: {}", "Close".magenta(), set.close.join(", ").green());
        }
        if !set.far.is_empty() {
            println!("   {}: {}", "Far".magenta(), set.far.join(", ").green());
        }
    }
    Ok(())
}

fn handle_antonyms(wn: &WordNet, word: &str, pos: Option<Category>, json: bool) -> Result<()> {
    let records = wn.antonyms(word, pos)?;
    if json {
        return print_json(&records);
    }
    if records.is_empty() {
        println!("No antonyms found for '{}'.", word.yellow());
        return Ok(());
    }
    for (index, record) in records.iter().enumerate() {
        print_record(record, index + 1);
    }
    Ok(())
}

fn handle_pos(wn: &WordNet, word: &str, json: bool) -> Result<()> {
    let categories = wn.pos(word);
    if json {
        let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
        return print_json(&labels);
    }
    if categories.is_empty() {
        println!("'{}' is not in the dictionary.", word.yellow());
        return Ok(());
    }
    let labels: Vec<String> = categories.iter().map(|c| c.label().to_string()).collect();
    println!("{} ~ {}", word.bold().cyan(), labels.join(", ").italic());
    Ok(())
}

fn handle_words(
    wn: &WordNet,
    contains: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let start_words = Instant::now();
    let words: Vec<&String> = wn
        .words()
        .iter()
        .filter(|w| contains.is_none_or(|needle| w.contains(needle)))
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    debug!("Listing {} words took: {:?}", words.len(), start_words.elapsed());

    if json {
        return print_json(&words);
    }
    for word in words {
        println!("{}", word);
    }
    Ok(())
}

fn handle_random(wn: &WordNet, json: bool) -> Result<()> {
    info!("Getting random word...");
    let record = wn.random_record()?;
    if json {
        return print_json(record);
    }
    println!(
        "Random word: {} ({})",
        record.lemma().unwrap_or(&record.id).bold().cyan(),
        record.syntactic_category.to_string().italic()
    );
    if !record.description.is_empty() {
        println!("   {}", record.description.trim());
    }
    Ok(())
}
