use clap::Parser;
use log::{debug, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use picsearch::core::config::{self, CliOverrides};
use picsearch::core::raw::RawAction;
use picsearch::core::session::{Completion, SearchSession};
use picsearch::core::{SearchState, Store};
use picsearch::search::UnsplashProvider;

#[derive(Parser)]
#[command(name = "picsearch", about = "Paginated photo search in the terminal")]
struct Args {
    /// Search query
    query: Option<String>,

    /// Number of pages to load, first page included
    #[arg(short, long)]
    pages: Option<u32>,

    /// Results per page (1..=30)
    #[arg(long)]
    per_page: Option<u32>,

    /// Like a result by id; repeatable
    #[arg(long = "like", value_name = "ID")]
    likes: Vec<String>,

    /// Dispatch actions from a JSON-lines file after the search
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Level written to picsearch.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to picsearch.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("picsearch.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    if args.query.is_none() && args.replay.is_none() {
        return Err("nothing to do: pass a QUERY or --replay FILE".into());
    }

    let config = config::load_config()?;
    let resolved = config::resolve(
        &config,
        CliOverrides {
            per_page: args.per_page,
            pages: args.pages,
        },
    );
    info!("picsearch starting up: {:?}", args.query);

    let mut store = Store::new();
    store.subscribe(|state| {
        debug!(
            "state: query={:?} results={} count={} page={} searching={} next_page={}",
            state.query,
            state.results.len(),
            state.count,
            state.page,
            state.is_searching,
            state.is_searching_for_next_page
        );
    });
    let mut session = SearchSession::new(store, resolved.per_page);

    if let Some(query) = args.query.as_deref() {
        let access_key = resolved.unsplash_access_key.clone().ok_or(
            "Unsplash access key must be set (config file or UNSPLASH_ACCESS_KEY env var)",
        )?;
        let provider = UnsplashProvider::new(access_key, Some(resolved.unsplash_base_url.clone()));

        if let Some(Completion::Failed(e)) = session.search(&provider, query).await {
            if e.is_retryable() {
                eprintln!("search failed with a temporary error; try again shortly");
            }
            return Err(e.into());
        }
        for _ in 1..resolved.pages {
            match session.load_next_page(&provider).await {
                Some(Completion::Failed(e)) => {
                    let hint = if e.is_retryable() { " (temporary)" } else { "" };
                    eprintln!("warning: stopped paging{hint}: {e}");
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }
    }

    if let Some(path) = args.replay.as_ref() {
        replay(session.store_mut(), path)?;
    }

    for id in &args.likes {
        session.like(id);
    }

    let state = session.store().state();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&*state)?);
    } else {
        print_listing(&state);
    }

    info!("picsearch done");
    Ok(())
}

/// Dispatches one raw action per non-empty line. Lines that are not valid
/// JSON are skipped with a warning, same as malformed actions.
fn replay(store: &mut Store, path: &Path) -> Result<(), Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    for (lineno, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawAction>(line) {
            Ok(raw) => store.dispatch_raw(raw),
            Err(e) => warn!("{}:{}: not an action: {}", path.display(), lineno + 1, e),
        }
    }
    Ok(())
}

fn print_listing(state: &SearchState) {
    if state.is_on_init && state.results.is_empty() {
        println!("No search yet.");
        return;
    }
    println!(
        "\"{}\": showing {} of {} (page {})",
        state.query,
        state.results.len(),
        state.count,
        state.page
    );
    for item in &state.results {
        let label = if item.alt_description.is_empty() {
            &item.description
        } else {
            &item.alt_description
        };
        println!("{:<14} ♥ {:<6} {}  {}", item.id, item.likes, label, item.thumbnail_url);
    }
}
