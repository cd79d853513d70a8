use clap::{Parser, Subcommand};
use folio::{BranchId, EntryKey, LanguageId, ManualBuilder, ManualConfig, ManualError, ViewState};
use folio_render::HtmlRenderer;
use std::path::PathBuf;
use std::time::Instant;

/// Renders manual entries from a content repository to HTML.
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Paginated manual viewer")]
struct Cli {
    /// JSON settings file
    #[arg(long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Serve content from a local checkout instead of the network
    #[arg(long, env = "FOLIO_REPO_DIR")]
    repo_dir: Option<PathBuf>,

    /// Repository base URL
    #[arg(long)]
    repo_url: Option<String>,

    #[arg(long, short)]
    branch: Option<String>,

    #[arg(long, short)]
    language: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the index or a category listing
    Index {
        /// Category key; the top-level index when omitted
        category: Option<String>,
    },
    /// Print one page of an entry
    Entry {
        key: String,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Print every page of an entry, one per line
    Pages { key: String },
}

#[tokio::main]
async fn main() -> Result<(), ManualError> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ManualConfig::from_file(path)?,
        None => ManualConfig::default(),
    };
    if let Some(url) = cli.repo_url {
        config.repository_url = url;
    }
    if let Some(dir) = cli.repo_dir {
        config.local_root = Some(dir);
    }
    let branch = BranchId::new(cli.branch.unwrap_or_else(|| config.default_branch.clone()));
    let language = LanguageId::new(cli.language.unwrap_or_else(|| config.default_language.clone()));

    let store = ManualBuilder::new().with_config(config).build()?;

    let start = Instant::now();
    store.load(&branch, &language).await?;
    log::info!(
        "Loaded {} entries of {} / {} in {:?}",
        store.entry_count(),
        branch,
        language,
        start.elapsed()
    );

    let view = ViewState::new();
    match cli.command {
        Commands::Index { category } => {
            let html = store
                .render_route(category.as_deref().unwrap_or(""), 0, &view)
                .await?;
            println!("{}", html);
        }
        Commands::Entry { key, page } => {
            let key = EntryKey::new(key);
            if !store.has_entry(&key) {
                store.resolve_entry(&branch, &language, &key).await?;
            }
            let html = store.render_route(key.as_str(), page, &view).await?;
            println!("{}", html);
        }
        Commands::Pages { key } => {
            let key = EntryKey::new(key);
            let pages = store.entry_pages(&key).await?;
            let renderer = HtmlRenderer::new(store.translator().as_ref(), &view);
            for page in pages.iter() {
                println!("{}", renderer.render_page(page));
            }
        }
    }
    Ok(())
}
