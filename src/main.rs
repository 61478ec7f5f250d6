use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use air_onboard::api::{self, AppState, SecurityConfig};
use air_onboard::assistant::{Assistant, ChatBackend};
use air_onboard::config::{ChatMode, Config};
use air_onboard::render;
use air_onboard::store::{self, DataSource, Store};

#[derive(Parser)]
#[command(name = "air-onboard")]
#[command(about = "Role-aware onboarding dashboard and policy assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Directory of JSON data files (default: built-in data)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Answer source for /api/chat
        #[arg(long, value_enum)]
        chat_mode: Option<ChatMode>,
    },
    /// Answer one policy question and exit
    Ask {
        /// Role to answer for, e.g. software-engineer
        #[arg(short, long)]
        role: String,

        /// Ask Claude instead of the local mock
        #[arg(long)]
        real: bool,

        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Print the task checklist and progress for a role
    Dashboard {
        #[arg(short, long)]
        role: String,

        /// Completed task IDs, comma-separated
        #[arg(long, value_delimiter = ',')]
        completed: Vec<String>,

        /// Completed course IDs, comma-separated
        #[arg(long, value_delimiter = ',')]
        courses: Vec<String>,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Load and validate the dataset, then print collection sizes
    Check {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "air_onboard=debug,tower_http=debug".into()),
    );

    // Logs go to stderr so `ask` and `dashboard` output stays clean on stdout.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_store(config: &Config, data_dir: Option<PathBuf>) -> anyhow::Result<Store> {
    let source = match data_dir {
        Some(dir) => DataSource::Directory(dir),
        None => config.data_source(),
    };
    Store::load(&source).with_context(|| format!("failed to load dataset from {source:?}"))
}

async fn serve(config: Config, store: Store) -> anyhow::Result<()> {
    let backend = config.chat_backend()?;
    tracing::info!(backend = backend.name(), "Chat backend selected");

    let state = AppState::new(store.clone(), Assistant::new(store, backend));
    let app = api::create_router_with_security(state, SecurityConfig::from_config(&config));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("AirOnboard server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env().context("invalid environment configuration")?;

    match cli.command {
        Some(Commands::Serve {
            port,
            host,
            data_dir,
            chat_mode,
        }) => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(mode) = chat_mode {
                config.chat_mode = mode;
            }
            let store = load_store(&config, data_dir)?;
            serve(config, store).await?;
        }
        Some(Commands::Ask {
            role,
            real,
            data_dir,
            question,
        }) => {
            let store = load_store(&config, data_dir)?;
            let backend = if real {
                config.chat_mode = ChatMode::Claude;
                config.chat_backend()?
            } else {
                ChatBackend::Mock {
                    delay: std::time::Duration::ZERO,
                }
            };

            let question = question.join(" ");
            let response = Assistant::new(store, backend)
                .answer(&question, &role)
                .await
                .context("failed to get response from Claude")?;

            println!("{}", response.answer);
            if !response.citations.is_empty() {
                println!("\nSources: {}", response.citations.join(", "));
            }
            println!("Tokens: {}", response.tokens_used);
        }
        Some(Commands::Dashboard {
            role,
            completed,
            courses,
            data_dir,
        }) => {
            let store = load_store(&config, data_dir)?;
            let display = store
                .get_role_display(&role)
                .with_context(|| format!("unknown role: {role}"))?;

            println!("{} ({})\n", display.title, display.department);
            print!(
                "{}",
                render::render_checklist(&store.get_tasks_grouped_by_timeline(&role), &completed)
            );
            println!();
            print!(
                "{}",
                render::render_stats(&store.get_quick_stats(&role, &completed, &courses))
            );
            if let Some(next) = store.get_next_task(&role, &completed, None) {
                println!("Next:     {} ({})", next.title, next.timeline.as_str());
            }
        }
        Some(Commands::Check { data_dir }) => {
            let store = load_store(&config, data_dir)?;
            let counts = store.counts();
            println!("Dataset OK");
            for file in store::DATA_FILES {
                println!("  {}", file.name);
            }
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        None => {
            let store = load_store(&config, None)?;
            serve(config, store).await?;
        }
    }

    Ok(())
}
