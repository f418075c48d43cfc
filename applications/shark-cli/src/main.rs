/// Jelly Shark - browse a Jellyfin-compatible media server from the terminal
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use shark_cli::{config::AppConfig, output};
use shark_connection::{
    ClientFactory, ConnectionController, ConnectionState, HttpClientFactory, ServerEndpoint,
};
use shark_core::ImageType;
use shark_server_client::{HttpTransport, MediaServerClient};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jellyshark")]
#[command(about = "Browse a Jellyfin-compatible media server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./jellyshark.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server address, e.g. demo.jellyfin.org or http://192.168.1.20:8096
    #[arg(short, long, global = true, env = "SHARK_SERVER_URL")]
    server: Option<String>,

    /// User to sign in as
    #[arg(short, long, global = true, env = "SHARK_USERNAME")]
    username: Option<String>,

    /// Password (prefer the environment variable)
    #[arg(
        short,
        long,
        global = true,
        env = "SHARK_PASSWORD",
        hide_env_values = true
    )]
    password: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show public server information (no sign-in)
    Info,
    /// Sign in and list libraries
    Libraries,
    /// List the items of a library
    Items {
        /// Library identifier
        library_id: String,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(long)]
        start_index: Option<u32>,
    },
    /// Show a single item
    Item {
        /// Item identifier
        item_id: String,
    },
    /// List partially watched items
    Resume {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List recently added items
    Latest {
        /// Restrict to one library
        #[arg(long)]
        library: Option<String>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Print the URL of an item image (no sign-in)
    ImageUrl {
        /// Item identifier
        item_id: String,
        #[arg(short = 't', long = "type", value_enum, default_value_t = ImageKind::Primary)]
        image_type: ImageKind,
        #[arg(long)]
        max_width: Option<u32>,
        #[arg(long)]
        max_height: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageKind {
    Primary,
    Backdrop,
    Banner,
    Thumb,
    Logo,
}

impl From<ImageKind> for ImageType {
    fn from(kind: ImageKind) -> Self {
        match kind {
            ImageKind::Primary => ImageType::Primary,
            ImageKind::Backdrop => ImageType::Backdrop,
            ImageKind::Banner => ImageType::Banner,
            ImageKind::Thumb => ImageType::Thumb,
            ImageKind::Logo => ImageType::Logo,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shark_cli=info,shark_connection=info,shark_server_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli {
        config,
        server,
        username,
        password,
        json,
        command,
    } = Cli::parse();

    if let Commands::Init { force } = command {
        let path =
            config.unwrap_or_else(|| PathBuf::from(shark_cli::config::DEFAULT_CONFIG_FILE));
        AppConfig::write_default(&path, force)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = AppConfig::load(config.as_deref()).context("Failed to load configuration")?;
    let transport = HttpTransport::with_timeouts(
        config.client.timeout(),
        config.client.connect_timeout(),
    )?;
    let factory = HttpClientFactory::new(config.client.client_info(), Arc::new(transport));

    let server = server
        .or_else(|| config.server.url.clone())
        .context("No server configured (use --server or SHARK_SERVER_URL)")?;

    match command {
        Commands::Info => {
            let client = factory.create(&ServerEndpoint::parse(&server)?)?;
            let info = client.server_info().await?;
            print(&info, json, output::server_line)?;
        }
        Commands::ImageUrl {
            item_id,
            image_type,
            max_width,
            max_height,
        } => {
            let client = factory.create(&ServerEndpoint::parse(&server)?)?;
            let url = client.get_image_url(&item_id, image_type.into(), max_width, max_height);
            println!("{}", url);
        }
        command => {
            let username = username
                .or_else(|| config.server.username.clone())
                .context("No username configured (use --username or SHARK_USERNAME)")?;
            let password = password.unwrap_or_default();

            let mut controller =
                ConnectionController::with_settings(factory, config.connection.clone());
            let watcher = report_progress(&controller);

            controller.connect(&server, &username, &password).await;
            if controller.state() != ConnectionState::Connected {
                bail!(
                    "{}",
                    controller.error_message().unwrap_or("Connection failed")
                );
            }

            let result = run(&controller, command, json).await;
            controller.disconnect().await;
            watcher.abort();
            result?;
        }
    }

    Ok(())
}

/// Echo connection progress to stderr until aborted
fn report_progress<F: ClientFactory>(
    controller: &ConnectionController<F>,
) -> tokio::task::JoinHandle<()> {
    let mut rx = controller.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = *rx.borrow_and_update();
            if state.is_in_progress() {
                eprintln!("{}...", state);
            }
        }
    })
}

async fn run<F: ClientFactory>(
    controller: &ConnectionController<F>,
    command: Commands,
    json: bool,
) -> anyhow::Result<()> {
    let client = controller
        .client()
        .context("Connected without a client")?;

    if let Some(user) = controller.connected_user() {
        tracing::info!("Signed in as {}", output::user_line(user));
    }

    match command {
        Commands::Libraries => {
            print_list(controller.libraries(), json, output::library_line)?;
        }
        Commands::Items {
            library_id,
            limit,
            start_index,
        } => {
            let items = client
                .get_library_items(&library_id, limit, start_index)
                .await?;
            print_list(&items, json, output::item_line)?;
        }
        Commands::Item { item_id } => {
            let item = client.get_media_item(&item_id).await?;
            print(&item, json, |item| {
                let mut text = output::item_line(item);
                if let Some(overview) = &item.overview {
                    text.push_str("\n\n");
                    text.push_str(overview);
                }
                text
            })?;
        }
        Commands::Resume { limit } => {
            let items = client.get_resume_items(limit).await?;
            print_list(&items, json, output::item_line)?;
        }
        Commands::Latest { library, limit } => {
            let items = client.get_latest_items(library.as_deref(), limit).await?;
            print_list(&items, json, output::item_line)?;
        }
        Commands::Init { .. } | Commands::Info | Commands::ImageUrl { .. } => {}
    }

    Ok(())
}

fn print<T: Serialize>(value: &T, json: bool, text: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn print_list<T: Serialize>(
    values: &[T],
    json: bool,
    line: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(values)?);
    } else if values.is_empty() {
        println!("(none)");
    } else {
        for value in values {
            println!("{}", line(value));
        }
    }
    Ok(())
}
