use clap::{Parser, Subcommand};

use workout_bot::application::auth::AuthService;
use workout_bot::application::errors::BotError;
use workout_bot::application::messaging::{CommandDispatcher, MessageParser};
use workout_bot::domain::traits::{Bot, EntityKind, WorkoutStore};
use workout_bot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use workout_bot::infrastructure::config::Config;
use workout_bot::infrastructure::database::SqliteStore;
use workout_bot::infrastructure::seed;

/// Database used by `console` when no DATABASE_URL is configured
const CONSOLE_FALLBACK_DATABASE: &str = ":memory:";

#[derive(Parser)]
#[command(name = "workout-bot")]
#[command(about = "Log workouts from a chat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot
    Run,
    /// Chat with the bot on stdin/stdout
    Console,
    /// Create the schema and exercise catalog, then exit
    Seed,
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Console => run_console(&cli.config),
        Commands::Seed => seed_only(&cli.config),
        Commands::InitConfig => init_config(),
        Commands::Version => {
            println!("workout-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// defaults, then the YAML file if present, then the environment, then `--token`
fn load_config(path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if std::path::Path::new(path).exists() {
        tracing::info!("Loading config from {}", path);
        Config::load(path)?.apply_env()?
    } else {
        Config::load_env()?
    };

    if let Some(token) = token_override {
        config.telegram.token = Some(token);
    }

    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set, signing tokens with the built-in default secret");
    }

    Ok(config)
}

/// Open the store and make sure the catalog exists
fn open_store(url: &str) -> Result<SqliteStore, BotError> {
    let store = SqliteStore::open(url)?;
    tracing::info!("Database initialized");

    seed::seed_exercises(&store)?;
    Ok(store)
}

fn build_dispatcher(config: &Config, store: SqliteStore) -> CommandDispatcher {
    CommandDispatcher::new(Box::new(store), AuthService::from_config(&config.auth))
}

fn runtime() -> Result<tokio::runtime::Runtime, BotError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, token_override)?;
    config.validate_for_run()?;

    tracing::info!("Starting {}", config.bot.name);

    let store = open_store(config.database_url()?)?;
    let dispatcher = build_dispatcher(&config, store);
    let token = config.telegram_token()?.to_string();
    let timeout = config.telegram.poll_timeout_seconds;

    runtime()?.block_on(async {
        let mut bot = TelegramAdapter::new(token);

        // Register bot commands with Telegram
        if let Err(e) = bot.register_commands().await {
            tracing::warn!("Failed to register commands: {}", e);
        }

        run_telegram_bot(&mut bot, &dispatcher, timeout).await
    })
}

async fn run_telegram_bot(
    bot: &mut TelegramAdapter,
    dispatcher: &CommandDispatcher,
    timeout_seconds: i64,
) -> Result<(), BotError> {
    bot.fetch_bot_info().await?;
    bot.start().await?;

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let parser = MessageParser::new();
    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        match bot.get_updates(offset, timeout_seconds).await {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::debug!("Received {} updates", updates.len());
                }

                for update in &updates {
                    let Some(msg) = &update.message else {
                        continue;
                    };
                    let Some(text) = msg.text.as_deref() else {
                        continue;
                    };

                    let chat_id = msg.chat.id.to_string();
                    let sender = msg.from.as_ref().and_then(|u| u.username.clone());
                    let message = parser.parse(chat_id.clone(), text, sender);

                    if let Some(reply) = dispatcher.process(&message) {
                        if let Err(e) = bot.send_message(&chat_id, &reply).await {
                            tracing::error!("[{}] Failed to send reply: {}", chat_id, e);
                        }
                    }
                }

                offset = TelegramAdapter::next_offset(&updates, offset);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
            }
        }
    }
}

fn run_console(config_path: &str) -> Result<(), BotError> {
    let config = load_config(config_path, None)?;

    let url = match config.database.url.as_deref() {
        Some(url) => url.to_string(),
        None => {
            tracing::warn!("DATABASE_URL is not set, console data will not be kept");
            CONSOLE_FALLBACK_DATABASE.to_string()
        }
    };

    let store = open_store(&url)?;
    let dispatcher = build_dispatcher(&config, store);

    runtime()?.block_on(async {
        let bot = ConsoleAdapter::new();
        run_console_bot(&bot, &dispatcher).await
    })
}

async fn run_console_bot(bot: &ConsoleAdapter, dispatcher: &CommandDispatcher) -> Result<(), BotError> {
    bot.start().await?;

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    while let Some(input) = bot.read_line("> ").await {
        if let Some(reply) = dispatcher.process_text("console", &input) {
            bot.send_message("console", &reply).await?;
        }
    }

    tracing::info!("End of input, bye");
    Ok(())
}

fn seed_only(config_path: &str) -> Result<(), BotError> {
    let config = load_config(config_path, None)?;
    let store = open_store(config.database_url()?)?;

    let count = store.count(EntityKind::Exercise)?;
    println!("Exercise catalog ready ({} exercises)", count);
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
