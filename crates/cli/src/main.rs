// rboard - reward categorization board (headless)
// Drop rewards into categories, undo/redo, save and restore the layout.

mod exit_codes;
mod shell;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rewardboard_config::{BoardDefinition, ConfigError, Settings};
use rewardboard_core::{BlobStore, BoardController, BoardError, Layout};
use rewardboard_io::FileStore;

use exit_codes::{board_exit_code, config_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use shell::{render_board, Shell};

#[derive(Parser)]
#[command(name = "rboard")]
#[command(about = "Reward categorization board with undo/redo")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Settings file (default: ~/.config/rewardboard/settings.json)
    #[arg(long, global = true, env = "RBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory saved layouts are stored in
    #[arg(long, global = true, env = "RBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Board definition TOML (categories and rewards)
    #[arg(long, global = true, env = "RBOARD_BOARD")]
    board: Option<PathBuf>,

    /// Storage key for the saved layout
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive board session reading commands from stdin
    #[command(after_help = "\
Examples:
  rboard shell
  printf 'drop r1 c1\\nundo\\nredo\\nsave\\n' | rboard shell
  rboard --board team.toml --key team shell")]
    Shell {
        /// Clear the saved layout without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Print the saved layout
    Show {
        /// Print the raw layout JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the saved layout
    Clear,

    /// Write the sample board definition to edit
    Init {
        /// Output file (default: ~/.config/rewardboard/board.toml)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ncore:    rewardboard-core ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Shell { yes } => cmd_shell(&cli, *yes),
        Commands::Show { json } => cmd_show(&cli, *json),
        Commands::Clear => cmd_clear(&cli),
        Commands::Init { output, force } => cmd_init(output.clone(), *force),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// RUST_LOG controls verbosity; library crates log through `log`, bridged
/// into the subscriber.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<BoardError> for CliError {
    fn from(err: BoardError) -> Self {
        let hint = match &err {
            BoardError::Layout(_) => Some("run `rboard clear` to discard the saved layout".to_string()),
            _ => None,
        };
        Self { code: board_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self { code: config_exit_code(&err), message: err.to_string(), hint: None }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Settings merged with command-line overrides
struct Context {
    settings: Settings,
    store: FileStore,
    key: String,
    board: BoardDefinition,
}

impl Context {
    fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let settings = match &cli.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        };

        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| settings.data_dir.clone())
            .unwrap_or_else(FileStore::default_dir);
        let key = cli.key.clone().unwrap_or_else(|| settings.storage_key.clone());

        let board = match cli.board.as_ref().or(settings.board_file.as_ref()) {
            Some(path) => BoardDefinition::load(path)?,
            None => BoardDefinition::sample(),
        };

        log::debug!("data dir {}, key '{}'", data_dir.display(), key);
        Ok(Self { settings, store: FileStore::new(data_dir), key, board })
    }

    fn controller(self) -> BoardController<FileStore> {
        BoardController::new(self.board.to_catalog(), self.store).with_key(self.key)
    }
}

fn cmd_shell(cli: &Cli, yes: bool) -> Result<(), CliError> {
    let ctx = Context::resolve(cli)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    // Piped scripts have no one to answer, and the next line is a command
    let confirm_clear = ctx.settings.confirm_clear && !yes && interactive;
    if interactive {
        println!("rboard shell - type 'help' for commands");
    }

    let mut shell = Shell::new(ctx.controller())
        .confirm_clear(confirm_clear)
        .prompt(interactive);
    let mut stdout = io::stdout().lock();
    shell.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

fn cmd_show(cli: &Cli, json: bool) -> Result<(), CliError> {
    let mut ctl = Context::resolve(cli)?.controller();

    if json {
        let blob = ctl.store().load(ctl.key()).map_err(BoardError::from)?;
        let Some(blob) = blob else {
            println!("{{}}");
            return Ok(());
        };
        let layout = Layout::from_json(&blob)?;
        let pretty = serde_json::to_string_pretty(&layout)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{pretty}");
        return Ok(());
    }

    match ctl.restore()? {
        Some(report) => {
            print!("{}", render_board(ctl.board()));
            if report.skipped > 0 {
                eprintln!("note: skipped {} unknown or duplicate reward(s)", report.skipped);
            }
        }
        None => println!("no saved layout under '{}'", ctl.key()),
    }
    Ok(())
}

fn cmd_clear(cli: &Cli) -> Result<(), CliError> {
    let mut ctl = Context::resolve(cli)?.controller();
    if !ctl.has_saved()? {
        println!("no saved layout under '{}'", ctl.key());
        return Ok(());
    }
    ctl.clear_saved()?;
    println!("cleared saved layout '{}'", ctl.key());
    Ok(())
}

fn cmd_init(output: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = output.unwrap_or_else(|| rewardboard_config::config_dir().join("board.toml"));
    if path.exists() && !force {
        return Err(CliError::args(format!("{} already exists", path.display()))
            .with_hint("use --force to overwrite"));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let toml = BoardDefinition::sample().to_toml()?;
    std::fs::write(&path, toml)?;
    println!("wrote sample board to {}", path.display());
    Ok(())
}
