use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use landcover::api;
use landcover::models::{AppConfig, ClassificationModel, ImageRecord, DEFAULT_DIM, KMEANS_ID};
use landcover::server;
use landcover::services::{ClassificationService, ClassifyOutcome, InMemoryCache};

#[derive(Parser)]
#[command(name = "landcover")]
#[command(about = "Land-cover classification service for satellite imagery")]
struct Cli {
    /// Configuration file (overrides CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Classify a PNG file directly (no server needed)
    Classify {
        /// Input RGB(A) PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the colored class mask
        #[arg(short, long)]
        output: PathBuf,

        /// Number of classes (1 to 256)
        #[arg(short = 'k', long, default_value_t = 5)]
        classes: i64,

        /// Classification model
        #[arg(short, long, default_value = KMEANS_ID)]
        model: String,

        /// Fixed seed for reproducible labels
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Landcover API",
        description = "Land-cover classification service for satellite imagery",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_put_image,
        api::handle_get_image,
        api::handle_delete_image,
        api::handle_classify,
        api::handle_get_proportions,
        api::handle_get_colors,
        api::handle_get_classified,
    ),
    components(schemas(
        ImageRecord,
        ClassifyOutcome,
        api::ClassifyRequest,
        api::ProportionsResponse,
        api::ColorsResponse,
    )),
    tags(
        (name = "Images", description = "Raw scene upload and metadata"),
        (name = "Classification", description = "Classification runs and their artifacts")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Classify {
            input,
            output,
            classes,
            model,
            seed,
        }) => run_classify_command(config_path, &input, &output, classes, &model, seed),
        Some(Commands::Serve) => run_server(config_path).await,
        None => {
            run_status_command(config_path);
            Ok(())
        }
    }
}

/// Classify a PNG file into a colored mask (no server needed)
fn run_classify_command(
    config_path: Option<PathBuf>,
    input: &PathBuf,
    output: &PathBuf,
    classes: i64,
    model: &str,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landcover=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::load(config_path.as_deref());
    if seed.is_some() {
        config.seed = seed;
    }

    let png_bytes = std::fs::read(input)?;
    let image_id = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());

    let service = ClassificationService::new(Arc::new(InMemoryCache::new()), &config);
    let record = ImageRecord::new(&image_id, Utc::now().date_naive(), 0.0, 0.0, DEFAULT_DIM);
    service.ingest(record, &png_bytes)?;

    let model = ClassificationModel::from(model);
    let outcome = service.classify(&image_id, &model, classes)?;
    if !outcome.classified {
        anyhow::bail!(outcome.status_message);
    }

    let mask = service.get_classified_png(&image_id)?;
    std::fs::write(output, &mask)?;
    println!("{}", outcome.status_message);
    println!("Wrote {} ({} bytes)\n", output.display(), mask.len());

    let proportions = service.get_proportions(&image_id)?;
    let colors = service.get_color_table(&image_id)?;
    println!("Class  Color    Share");
    for (class, hex) in colors.to_hex().iter().enumerate() {
        println!("{class:>5}  {hex}  {:>5.1}%", proportions.get(class) * 100.0);
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command(config_path: Option<PathBuf>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = config_path.as_ref().map(|p| p.display().to_string());

    println!("Landcover v{VERSION}");
    println!("Land-cover classification service for satellite imagery\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_path {
        Some(ref path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load(config_path.as_deref());

    println!("\nConfiguration ({config_source}):");
    println!("  cache_ttl_secs = {}", config.cache_ttl_secs);
    println!("  target_size    = {}", config.target_size);
    println!("  clip_limit     = {}", config.clip_limit);
    println!("  tile_grid      = {}", config.tile_grid);
    println!("  max_iter       = {}", config.max_iter);
    println!("  tolerance      = {}", config.tolerance);
    println!(
        "  seed           = {}",
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(random)".to_string())
    );

    println!("\nCommands:");
    println!("  landcover serve      Start the HTTP server");
    println!("  landcover classify   Classify a PNG file to a colored mask");
    println!("\nRun 'landcover --help' for more details.");
}

/// Run the HTTP server
async fn run_server(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landcover=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::load(config_path.as_deref());
    tracing::info!(
        cache_ttl_secs = config.cache_ttl_secs,
        target_size = config.target_size,
        seeded = config.seed.is_some(),
        "Configuration loaded"
    );

    let state = server::create_app_state(config);

    // OpenAPI documentation (production only)
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Landcover server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
