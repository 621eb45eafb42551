use clap::{Parser, Subcommand};
use std::sync::Arc;

mod application;
mod domain;
mod infrastructure;

use application::messaging::CommandDispatcher;
use application::services::MessageService;
use domain::entities::InboundMessage;
use domain::traits::{Channel, DriveStorage, Summarizer};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::whatsapp::webhook::{self, WebhookState};
use infrastructure::adapters::whatsapp::WhatsAppAdapter;
use infrastructure::ai::{AiConfig, AiProvider, ClaudeProvider, DocumentSummarizer, Llm, OpenAiProvider};
use infrastructure::config::Config;
use infrastructure::google_drive::{DriveClient, ServiceAccountAuth};

#[derive(Parser)]
#[command(name = "arsip-bot")]
#[command(about = "WhatsApp assistant for Google Drive", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("arsip-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(cli.config);
        }
    }
}

fn run_bot(config_path: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using environment", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting {}", config.bot.name);

    let dispatcher = Arc::new(build_dispatcher(&config));

    let rt = tokio::runtime::Runtime::new().unwrap();

    if let Some(wa) = config.whatsapp_ready() {
        let adapter = WhatsAppAdapter::new(
            wa.access_token.clone().unwrap_or_default(),
            wa.phone_number_id.clone().unwrap_or_default(),
        );
        let info = adapter.channel_info();
        tracing::info!("Sending as {} number {}", info.platform, info.account_id);
        let state = Arc::new(WebhookState {
            drive_available: dispatcher.drive_available(),
            service: MessageService::new(adapter, dispatcher),
            verify_token: wa.verify_token.clone(),
            app_secret: wa.app_secret.clone(),
            bot_name: config.bot.name.clone(),
        });
        rt.block_on(webhook::serve(config.server.port, &config.server.webhook_path, state));
    } else {
        // Run console bot (dev mode)
        tracing::info!("WhatsApp not configured, starting console mode");
        rt.block_on(run_console_bot(dispatcher));
    }
}

/// Build the capability configuration once at startup. A failed integration
/// leaves its slot empty; the dispatcher answers those commands with a
/// diagnostic instead of crashing.
fn build_dispatcher(config: &Config) -> CommandDispatcher {
    let drive: Option<Arc<dyn DriveStorage>> =
        match ServiceAccountAuth::from_config(&config.google_drive) {
            Ok(auth) => Some(Arc::new(DriveClient::new(auth))),
            Err(e) => {
                tracing::warn!("Google Drive not available: {}", e);
                tracing::warn!("Chat commands will work, but Drive features will be disabled");
                None
            }
        };

    CommandDispatcher::new(drive, build_summarizer())
}

fn build_summarizer() -> Option<Arc<dyn Summarizer>> {
    let ai = AiConfig::from_env();
    let Some(api_key) = ai.api_key().map(str::to_string) else {
        tracing::warn!("No AI API key set, SUMMARY will be unavailable");
        return None;
    };

    let llm: Arc<dyn Llm> = match ai.provider {
        AiProvider::OpenAi => Arc::new(OpenAiProvider::new(api_key, ai.model())),
        AiProvider::Claude => Arc::new(ClaudeProvider::new(api_key, ai.model())),
    };
    tracing::info!("Using {} {} for summaries", llm.name(), ai.model());

    Some(Arc::new(DocumentSummarizer::new(llm, &ai)))
}

async fn run_console_bot(dispatcher: Arc<CommandDispatcher>) {
    let service = MessageService::new(ConsoleAdapter::new(), dispatcher);

    println!("arsip-bot console mode. Type HELP for commands, Ctrl-D to exit.");
    loop {
        let Some(line) = service.channel().read_line("> ") else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        service.handle_inbound(InboundMessage::from_text("console", line)).await;
    }
}

fn init_config(path: String) {
    if std::path::Path::new(&path).exists() {
        eprintln!("Config file {} already exists, not overwriting", path);
        return;
    }
    match Config::default().save(&path) {
        Ok(()) => println!("Wrote default config to {}", path),
        Err(e) => eprintln!("Failed to write config: {}", e),
    }
}
