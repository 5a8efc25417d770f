use clap::{Parser, Subcommand, ValueEnum};
use eqstudio::HostDocument;
use eqstudio::document::{Cursor, TextDocument};
use eqstudio::recent::{RECENT_CHIP_CHARS, RECENT_CHIP_COUNT};
use eqstudio::session::{AcceptOutcome, Edit, FormulaSession};
use eqstudio::settings::{TomlSettingsStore, settings_file_path};
use eqstudio::span::{Detection, MathMode, locate};
use eqstudio::studio::Studio;
use eqstudio::templates;
use std::error::Error;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::metadata::LevelFilter;

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "eqstudio")]
#[command(about = "Edit $...$ and $$...$$ formulas in plain-text notes", long_about = None)]
struct Args {
    /// Settings file (default: the platform's local data directory)
    #[arg(short = 's', long = "settings", value_name = "PATH", global = true)]
    settings: Option<PathBuf>,

    /// Log more details (-v warnings, -vv info, -vvv debug, -vvvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the formula under a cursor position
    Locate {
        /// Text file to inspect
        file: PathBuf,
        #[command(flatten)]
        at: Position,
    },
    /// Replace the formula under the cursor, or insert a new one there
    Edit {
        /// Text file to modify
        file: PathBuf,
        #[command(flatten)]
        at: Position,
        /// LaTeX content of the formula
        #[arg(long)]
        latex: String,
        /// Delimiters to write (default: the existing formula's, else the default mode)
        #[arg(short = 'm', long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Show or clear the recent formulas
    Recent {
        #[command(subcommand)]
        action: Option<RecentAction>,
    },
    /// List formula templates
    Templates {
        /// Only list this category
        category: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct Position {
    /// Line number, starting at 1
    #[arg(short = 'l', long)]
    line: NonZeroUsize,

    /// Byte offset within the line, starting at 0
    #[arg(short = 'c', long, default_value = "0")]
    column: usize,
}

impl Position {
    fn cursor(&self) -> Cursor {
        Cursor::new(self.line.get() - 1, self.column)
    }
}

#[derive(Subcommand, Debug)]
enum RecentAction {
    /// List recent formulas, most recent first
    List {
        /// Only show the first few, shortened
        #[arg(long)]
        short: bool,
    },
    /// Forget all recent formulas
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Inline,
    Block,
}

impl From<ModeArg> for MathMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Inline => MathMode::Inline,
            ModeArg::Block => MathMode::Block,
        }
    }
}

fn setup_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_studio(settings: Option<PathBuf>) -> Result<Studio<TomlSettingsStore>, Box<dyn Error>> {
    let path = settings
        .or_else(settings_file_path)
        .ok_or("Could not determine a settings directory, use --settings")?;
    let store = TomlSettingsStore::new(path);
    tracing::debug!("settings file: {}", store.path().display());
    Ok(Studio::load(store)?)
}

fn load_at(file: &Path, at: &Position) -> Result<TextDocument, Box<dyn Error>> {
    let mut doc = TextDocument::load(file)?;
    doc.set_cursor(at.cursor())?;
    Ok(doc)
}

fn cmd_locate(file: &Path, at: &Position) -> CliResult {
    let doc = load_at(file, at)?;
    let cursor = doc.cursor();
    let line = doc.line_text(cursor.line).unwrap_or_default();

    match locate(&line, cursor.column) {
        Detection::Found(span) => {
            println!("{} {}..{}: {}", span.kind, span.start, span.end, span.content)
        }
        Detection::NotFound => println!("no formula at cursor"),
    }

    Ok(())
}

fn cmd_edit(
    file: &Path,
    at: &Position,
    latex: &str,
    mode: Option<ModeArg>,
    settings: Option<PathBuf>,
) -> CliResult {
    let mut doc = load_at(file, at)?;
    let mut studio = open_studio(settings)?;

    let mut session = FormulaSession::open(&doc, studio.settings().default_mode);
    if let Some(mode) = mode {
        session.set_mode(mode.into());
    }

    match session.on_accept(&mut doc, latex, &mut studio)? {
        AcceptOutcome::Applied { edit, history } => {
            doc.save(file)?;
            match edit {
                Edit::Replaced { line, .. } => println!("Replaced formula on line {}", line + 1),
                Edit::Inserted { line, .. } => println!("Inserted formula on line {}", line + 1),
            }
            if let Err(e) = history {
                eprintln!("Warning: recent formulas not saved: {}", e);
            }
            Ok(())
        }
        AcceptOutcome::Stale { line } => Err(format!(
            "Could not update formula in place on line {}",
            line + 1
        )
        .into()),
    }
}

fn cmd_recent(action: Option<RecentAction>, settings: Option<PathBuf>) -> CliResult {
    let mut studio = open_studio(settings)?;

    match action.unwrap_or(RecentAction::List { short: false }) {
        RecentAction::List { short } => {
            let formulas = if short {
                studio.recent().previews(RECENT_CHIP_COUNT, RECENT_CHIP_CHARS)
            } else {
                studio.recent().list().to_vec()
            };

            if formulas.is_empty() {
                println!("(no recent formulas)");
            }
            for (i, formula) in formulas.iter().enumerate() {
                println!("{:>2}. {}", i + 1, formula);
            }
        }
        RecentAction::Clear => {
            studio.clear_recent()?;
            println!("Formula history cleared");
        }
    }

    Ok(())
}

fn cmd_templates(category: Option<String>, settings: Option<PathBuf>) -> CliResult {
    if let Some(name) = category {
        let category = templates::category(&name)
            .ok_or_else(|| format!("Unknown template category '{}'", name))?;
        println!("{}", templates::describe(category));
        return Ok(());
    }

    let studio = open_studio(settings)?;
    let listing: Vec<String> = templates::visible_categories(studio.settings().show_quick_templates)
        .map(templates::describe)
        .collect();
    println!("{}", listing.join("\n\n"));

    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_tracing(args.verbosity);

    let result = match args.command {
        Commands::Locate { file, at } => cmd_locate(&file, &at),
        Commands::Edit {
            file,
            at,
            latex,
            mode,
        } => cmd_edit(&file, &at, &latex, mode, args.settings),
        Commands::Recent { action } => cmd_recent(action, args.settings),
        Commands::Templates { category } => cmd_templates(category, args.settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
