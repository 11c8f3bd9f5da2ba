use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use homestead::{
    catalog::{Catalog, CatalogLoader},
    config::GameConfig,
    map::TileMap,
    runtime::{self, GameLoop},
    web::{self, AppState},
    Game,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Homestead idle simulation")]
struct Cli {
    /// Path to the game configuration YAML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a resource catalog YAML file (built-in tables when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Terrain map text file
    #[arg(long, requires = "scenery")]
    terrain: Option<PathBuf>,

    /// Scenery overlay text file
    #[arg(long, requires = "terrain")]
    scenery: Option<PathBuf>,

    /// Ticks to simulate in headless mode
    #[arg(long, default_value_t = 500)]
    ticks: u64,

    /// Resource to gather manually; restarted whenever the previous cycle ends
    #[arg(long = "gather", value_name = "KEY")]
    gather: Vec<String>,

    /// Run the real-time loop behind the HTTP API instead of a headless run
    #[arg(long)]
    serve: bool,

    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    init_tracing(&config.logging.level);

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let catalog = match &cli.catalog {
        Some(path) => CatalogLoader::new(".").load(path)?,
        None => Catalog::standard().context("built-in catalog is invalid")?,
    };
    let map = match (&cli.terrain, &cli.scenery) {
        (Some(terrain), Some(scenery)) => TileMap::load(terrain, scenery)?,
        _ => TileMap::default(),
    };
    let server = config.server.clone();
    let game = Game::new(catalog, config)?.with_map(map);

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(serve(game, &server));
    }
    run_headless(game, &cli)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_headless(mut game: Game, cli: &Cli) -> Result<()> {
    for _ in 0..cli.ticks {
        for key in &cli.gather {
            if game.can_start_gathering(key)? {
                game.start_gathering(key)?;
            }
        }
        game.tick()?;
    }

    println!("Simulated {} ticks. Gold: {:.1}", game.current_tick(), game.gold());
    for (key, res) in game.state().resources() {
        if key == homestead::GOLD {
            continue;
        }
        println!(
            "  {key}: {:.1} ({} workers, {} paid)",
            res.amount, res.workers, res.paid_workers
        );
    }
    Ok(())
}

async fn serve(game: Game, server: &homestead::config::ServerConfig) -> Result<()> {
    let mut game_loop = GameLoop::new(runtime::shared(game));
    game_loop.start();
    let result = web::serve(AppState::for_loop(&game_loop), server).await;
    game_loop.stop();
    result
}
