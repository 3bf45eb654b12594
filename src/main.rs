//! CLI for cite-copy - Copy quoted web page excerpts as formatted citations.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cite_copy::{
    deliver, export_history, history_listing, load_metadata, load_session, save_session,
    style::all_styles, CitationStyle, CiteRequest, ClipboardSink, FileStore, HistoryStore,
    PageMetadata, Session, Settings, SettingsStore, StoreError, SystemClipboard,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Copy quoted web page excerpts as formatted citations
#[derive(Parser)]
#[command(name = "cite-copy")]
#[command(version)]
#[command(after_help = "\
Examples:
  cite-copy cite \"selected text\" --url https://example.com/a --html page.html
  echo 'selected text' | cite-copy cite --url https://example.com/a --style apa
  cite-copy history list
  cite-copy styles")]
struct Cli {
    /// Directory holding history, settings and session files
    #[arg(long, global = true, env = "CITE_COPY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format selected text as a citation and copy it
    #[command(after_help = "\
Examples:
  cite-copy cite \"Hello\" --url https://example.com/a --title \"Example Page\" --author \"Jane Doe\"
  cite-copy cite \"Hello\" --url https://example.com/a --html saved-page.html --style mla
  cite-copy cite - --url https://example.com/a --no-copy < selection.txt

Styles: japanese (default), apa, mla, chicago, ieee")]
    Cite {
        /// Selected text (use '-' or omit to read stdin)
        text: Option<String>,

        /// Address of the cited page
        #[arg(short, long)]
        url: String,

        /// Saved HTML of the page, used for title, author and site name
        #[arg(long)]
        html: Option<PathBuf>,

        /// Page title (overrides the HTML title)
        #[arg(short, long)]
        title: Option<String>,

        /// Author (overrides the HTML author)
        #[arg(short, long)]
        author: Option<String>,

        /// Site name (overrides the HTML og:site_name)
        #[arg(long)]
        site_name: Option<String>,

        /// Citation style (default: the style in settings)
        #[arg(short, long)]
        style: Option<String>,

        /// Footnote number to use instead of the session counter
        #[arg(short, long)]
        number: Option<u32>,

        /// Print the citation without touching the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Show, export or clear the citation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or replace the settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage the footnote counter
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// List available citation styles
    Styles,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved citations, newest first
    List {
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every saved citation
    Clear,
    /// Export every saved citation as plain text
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not copy the export to the clipboard
        #[arg(long)]
        no_copy: bool,
    },
    /// Copy a saved citation to the clipboard again
    Copy {
        /// Position in the listing, starting at 1
        index: usize,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings as JSON
    Show,
    /// Replace the settings (every field is required)
    Set {
        /// Default citation style
        #[arg(long)]
        style: String,

        /// Advance the footnote counter before each citation
        #[arg(long, required = true, action = clap::ArgAction::Set)]
        auto_increment: bool,

        /// Report each copy
        #[arg(long, required = true, action = clap::ArgAction::Set)]
        show_notification: bool,

        /// Save each citation to the history
        #[arg(long, required = true, action = clap::ArgAction::Set)]
        save_history: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the current footnote counter
    Show,
    /// Start numbering from 1 again
    Reset,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — selection or HTML file unreadable / empty
    InputFile(String),
    /// Exit 11 — history or settings store unreadable / unwritable
    Store(String),
    /// Exit 12 — clipboard unavailable for an explicit copy
    Clipboard(String),
    /// Exit 13 — history index out of range
    History(String),
    /// Exit 14 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::Store(_) => 11,
            AppError::Clipboard(_) => 12,
            AppError::History(_) => 13,
            AppError::OutputFile(_) => 14,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::Store(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the data directory is writable (--data-dir or CITE_COPY_DATA_DIR)",
                    msg
                )
            }
            AppError::Clipboard(msg) => {
                write!(
                    f,
                    "{}\n  hint: a graphical session is needed to reach the clipboard",
                    msg
                )
            }
            AppError::History(msg) => {
                write!(f, "{}\n  hint: run 'cite-copy history list' to see indexes", msg)
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cite_copy=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let store = FileStore::new(resolve_data_dir(cli.data_dir));
    tracing::debug!(dir = %store.dir().display(), "using data directory");

    match cli.command {
        Commands::Cite {
            text,
            url,
            html,
            title,
            author,
            site_name,
            style,
            number,
            no_copy,
        } => {
            let page = PageArgs {
                url,
                html,
                title,
                author,
                site_name,
            };
            cite_command(store, text.as_deref(), page, style.as_deref(), number, no_copy)?;
        }
        Commands::History { action } => match action {
            HistoryAction::List { json } => history_list_command(store, json)?,
            HistoryAction::Clear => history_clear_command(store)?,
            HistoryAction::Export { output, no_copy } => {
                history_export_command(store, output.as_deref(), no_copy)?
            }
            HistoryAction::Copy { index } => history_copy_command(store, index)?,
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => settings_show_command(store)?,
            SettingsAction::Set {
                style,
                auto_increment,
                show_notification,
                save_history,
            } => {
                let settings = Settings {
                    citation_style: CitationStyle::from_id(Some(&style)),
                    auto_increment,
                    show_notification,
                    save_history,
                };
                settings_set_command(store, &settings)?;
            }
        },
        Commands::Session { action } => match action {
            SessionAction::Show => {
                let session = load_session(&store)?;
                println!("{}", session.counter());
            }
            SessionAction::Reset => {
                let mut store = store;
                save_session(&mut store, &Session::new())?;
                eprintln!("footnote counter reset");
            }
        },
        Commands::Styles => styles_command(),
    }

    Ok(())
}

/// Data directory: explicit flag/env, then the platform data dir, then `./.cite-copy`.
fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| dirs::data_dir().map(|dir| dir.join("cite-copy")))
        .unwrap_or_else(|| PathBuf::from(".cite-copy"))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Where the page metadata comes from.
struct PageArgs {
    url: String,
    html: Option<PathBuf>,
    title: Option<String>,
    author: Option<String>,
    site_name: Option<String>,
}

/// Format a citation, copy it and record it.
fn cite_command(
    mut store: FileStore,
    text: Option<&str>,
    page: PageArgs,
    style: Option<&str>,
    number: Option<u32>,
    no_copy: bool,
) -> Result<(), AppError> {
    // 1. Read the selection (support '-' or no argument for stdin)
    let selection = match text {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
            buf
        }
    };
    if selection.trim().is_empty() {
        return Err(AppError::InputFile("no text selected".to_string()));
    }

    // 2. Page metadata: HTML first, then explicit overrides
    let meta = resolve_page(page)?;

    // 3. Settings and session; an unreadable store falls back to defaults
    let settings = SettingsStore::new(store.clone()).get().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read settings, using defaults");
        Settings::default()
    });
    let mut session = load_session(&store).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read session, starting a new one");
        Session::new()
    });

    // 4. Format
    let mut request = CiteRequest::new(selection);
    if let Some(style) = style {
        request = request.with_style(CitationStyle::from_id(Some(style)));
    }
    if let Some(number) = number {
        request = request.with_number(number);
    }
    let outcome = session.cite(&request, &meta, &settings, Local::now());

    if let Err(e) = save_session(&mut store, &session) {
        tracing::warn!(error = %e, "could not save session counter");
    }

    // 5. Copy and record
    let mut clipboard = if no_copy {
        None
    } else {
        SystemClipboard::new()
            .map_err(|e| tracing::warn!(error = %e, "clipboard unavailable"))
            .ok()
    };
    let mut history = HistoryStore::new(store);
    let delivery = deliver(
        &outcome,
        &settings,
        &mut history,
        clipboard.as_mut().map(|c| c as &mut dyn ClipboardSink),
    );

    // 6. Print
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", outcome.citation)
        .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;

    if let Some(message) = delivery.notification(&outcome) {
        eprintln!("{}", message);
    }

    Ok(())
}

fn resolve_page(page: PageArgs) -> Result<PageMetadata, AppError> {
    let mut meta = match &page.html {
        Some(path) => load_metadata(path, &page.url)
            .map_err(|e| AppError::InputFile(format!("'{}': {}", path.display(), e)))?,
        None => PageMetadata::new(page.url.as_str(), ""),
    };

    if let Some(title) = page.title {
        meta.title = title;
    }
    if let Some(author) = page.author {
        meta = meta.with_author(author);
    }
    if let Some(site_name) = page.site_name {
        meta = meta.with_site_name(site_name);
    }
    Ok(meta)
}

/// List saved citations.
fn history_list_command(store: FileStore, json: bool) -> Result<(), AppError> {
    let records = HistoryStore::new(store).list()?;

    if json {
        let text = serde_json::to_string_pretty(&records)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
        println!("{}", text);
    } else if records.is_empty() {
        eprintln!("no citations in history");
    } else {
        print!("{}", history_listing(&records, &Local));
    }
    Ok(())
}

/// Remove every saved citation.
fn history_clear_command(store: FileStore) -> Result<(), AppError> {
    HistoryStore::new(store).clear()?;
    eprintln!("history cleared");
    Ok(())
}

/// Export saved citations as plain text.
fn history_export_command(
    store: FileStore,
    output: Option<&Path>,
    no_copy: bool,
) -> Result<(), AppError> {
    let records = HistoryStore::new(store).list()?;
    if records.is_empty() {
        eprintln!("no citations to export");
        return Ok(());
    }

    let text = export_history(&records, &Local);

    if let Some(output_path) = output {
        fs::write(output_path, &text).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        eprintln!(
            "exported {} citation(s), wrote {}",
            records.len(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", text).map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    if !no_copy {
        copy_to_clipboard(&text)?;
    }
    Ok(())
}

/// Copy one saved citation again.
fn history_copy_command(store: FileStore, index: usize) -> Result<(), AppError> {
    let records = HistoryStore::new(store).list()?;
    let record = index
        .checked_sub(1)
        .and_then(|i| records.get(i))
        .ok_or_else(|| {
            AppError::History(format!(
                "no citation at index {} (history holds {})",
                index,
                records.len()
            ))
        })?;

    copy_to_clipboard(&record.text)?;
    println!("{}", record.text);
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<(), AppError> {
    let mut clipboard =
        SystemClipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
    clipboard
        .write_text(text)
        .map_err(|e| AppError::Clipboard(e.to_string()))
}

/// Print the current settings.
fn settings_show_command(store: FileStore) -> Result<(), AppError> {
    let settings = SettingsStore::new(store).get()?;
    let text = serde_json::to_string_pretty(&settings)
        .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    println!("{}", text);
    Ok(())
}

/// Replace the settings.
fn settings_set_command(store: FileStore, settings: &Settings) -> Result<(), AppError> {
    SettingsStore::new(store).set(settings)?;
    eprintln!("settings saved");
    Ok(())
}

/// List available citation styles.
fn styles_command() {
    for style in all_styles() {
        println!("{}\t{}", style.id(), style.display_name());
    }
}
