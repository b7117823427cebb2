//! focusboard - A focus dashboard with a Pomodoro timer
//!
//! The timer follows the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 work sessions
//!
//! Tasks, today's focus and display settings are kept in a local JSON store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use focusboard::cli::{Cli, Commands, Display, IpcClient, SettingsArgs, TaskCommand};
use focusboard::daemon;
use focusboard::store::{
    default_store_path, find_gradient_preset, DashboardSettings, JsonFileStore, SettingsStore,
    TaskStore, GRADIENT_PRESETS,
};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            let store = open_store(cli.store)?;
            let settings = SettingsStore::new(&store);
            let tasks = TaskStore::new(&store).list()?;
            let timer = match client(cli.socket)?.status_once().await {
                Ok(response) => response.data,
                Err(e) => {
                    tracing::debug!("タイマーの状態を取得できません: {:#}", e);
                    None
                }
            };
            Display::show_dashboard(
                chrono::Local::now().time(),
                settings.user_name()?.as_deref(),
                settings.focus()?.as_deref(),
                &tasks,
                timer.as_ref(),
            );
        }
        Commands::Start => {
            let response = client(cli.socket)?.start().await?;
            Display::show_start_success(&response);
        }
        Commands::Pause => {
            let response = client(cli.socket)?.pause().await?;
            Display::show_pause_success(&response);
        }
        Commands::Reset => {
            let response = client(cli.socket)?.reset().await?;
            Display::show_reset_success(&response);
        }
        Commands::Status => {
            let response = client(cli.socket)?.status().await?;
            Display::show_status(&response);
        }
        Commands::Configure(args) => {
            let params = args.to_params();
            if params.is_empty() {
                anyhow::bail!(
                    "--work, --break-time, --long-break, --sessions のいずれかを指定してください"
                );
            }
            let response = client(cli.socket)?.configure(params).await?;
            Display::show_configure_success(&response);
        }
        Commands::Daemon(args) => {
            let socket_path = match cli.socket {
                Some(path) => path,
                None => daemon::ipc::default_socket_path()?,
            };
            daemon::run(&socket_path, args.config()).await?;
        }
        Commands::Task(command) => {
            let store = open_store(cli.store)?;
            run_task_command(TaskStore::new(&store), command)?;
        }
        Commands::Settings(args) => {
            let store = open_store(cli.store)?;
            run_settings_command(SettingsStore::new(&store), &args)?;
        }
        Commands::Name { name } => {
            let store = open_store(cli.store)?;
            let settings = SettingsStore::new(&store);
            match name {
                Some(name) => Display::show_name_saved(&settings.set_user_name(&name)?),
                None => Display::show_name(settings.user_name()?.as_deref()),
            }
        }
        Commands::Focus { text, clear } => {
            let store = open_store(cli.store)?;
            let settings = SettingsStore::new(&store);
            if clear {
                settings.set_focus("")?;
                Display::show_focus_saved(None);
            } else if let Some(text) = text {
                settings.set_focus(&text)?;
                Display::show_focus_saved(settings.focus()?.as_deref());
            } else {
                Display::show_focus(settings.focus()?.as_deref());
            }
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Creates an IPC client for the given or default socket path.
fn client(socket: Option<PathBuf>) -> Result<IpcClient> {
    match socket {
        Some(path) => Ok(IpcClient::with_socket_path(path)),
        None => IpcClient::new(),
    }
}

/// Opens the given or default JSON store.
fn open_store(path: Option<PathBuf>) -> Result<JsonFileStore> {
    let path = match path {
        Some(path) => path,
        None => default_store_path().context("ホームディレクトリが見つかりません")?,
    };
    JsonFileStore::open(&path)
        .with_context(|| format!("データファイルを開けません: {}", path.display()))
}

fn run_task_command(tasks: TaskStore<&JsonFileStore>, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add { title, description } => {
            let task = tasks.add(&title, description.as_deref())?;
            Display::show_task_added(&task);
        }
        TaskCommand::List => {
            Display::show_tasks(&tasks.list()?);
        }
        TaskCommand::Done { id } => {
            let id = tasks.resolve_id(&id)?;
            Display::show_task_toggled(&tasks.toggle(&id)?);
        }
        TaskCommand::Edit {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                anyhow::bail!("--title か --description を指定してください");
            }
            let id = tasks.resolve_id(&id)?;
            let task = tasks.update(&id, title.as_deref(), description.as_deref())?;
            Display::show_task_updated(&task);
        }
        TaskCommand::Remove { id } => {
            let id = tasks.resolve_id(&id)?;
            Display::show_task_removed(&tasks.remove(&id)?);
        }
    }
    Ok(())
}

fn run_settings_command(store: SettingsStore<&JsonFileStore>, args: &SettingsArgs) -> Result<()> {
    let current = store.load()?;
    if args.is_empty() {
        Display::show_settings(&current);
        return Ok(());
    }

    let updated = apply_settings_args(current, args)?;
    store.save(&updated)?;
    Display::show_settings_saved(&updated);
    Ok(())
}

/// Applies the given settings options on top of `settings`.
fn apply_settings_args(
    mut settings: DashboardSettings,
    args: &SettingsArgs,
) -> Result<DashboardSettings> {
    if let Some(name) = &args.gradient {
        let preset = find_gradient_preset(name).with_context(|| {
            let names: Vec<_> = GRADIENT_PRESETS.iter().map(|p| p.name).collect();
            format!(
                "グラデーション '{}' は存在しません (選択肢: {})",
                name,
                names.join(", ")
            )
        })?;
        settings = settings.with_gradient(preset);
    }
    if let Some(url) = &args.image {
        settings = settings.with_image(url.trim());
    }
    if let Some(color) = args.color {
        settings.color_scheme = color;
    }
    if let Some(glass) = args.glass {
        settings.glass_effect = glass;
    }
    if let Some(blur) = args.blur {
        settings.blur_amount = blur;
    }
    Ok(settings)
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
