use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tram_sim::domain::Clock;
use tram_sim::engine::{EngineError, SimConfig, Simulation};
use tram_sim::loader::{NetworkPaths, SetupError, load_network};
use tram_sim::ticker;
use tram_sim::web::{AppState, create_router};

/// Simulate a tram network and show it on a live map.
#[derive(Parser, Debug)]
#[command(name = "tram-sim", version, about)]
struct Args {
    /// Stops file: id,name,x,y
    #[arg(long, default_value = "tram_stops.txt")]
    file_tramstop: PathBuf,

    /// Connections file: stop_a,stop_b,minutes
    #[arg(long, default_value = "tram_stops_connection.txt")]
    file_connection: PathBuf,

    /// Lines file: line,hour,minute,interval,stop[,stop...]
    #[arg(long, default_value = "tram_line.txt")]
    file_tramline: PathBuf,

    /// Simulated start time (HH:MM)
    #[arg(long, default_value = "05:00", value_parser = parse_clock)]
    start: Clock,

    /// Real milliseconds per simulated minute
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Trams registered on every line
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    fleet_size: u64,

    /// Address for the web server
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Directory served under /static
    #[arg(long, default_value = "static")]
    static_dir: String,

    /// Run this many ticks without a server, then print final positions
    #[arg(long)]
    ticks: Option<u64>,
}

fn parse_clock(s: &str) -> Result<Clock, String> {
    Clock::parse_hhmm(s).map_err(|e| format!("expected HH:MM: {e}"))
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), RunError> {
    let config = SimConfig::default()
        .with_fleet_size(usize::try_from(args.fleet_size).unwrap_or(usize::MAX))
        .with_start(args.start)
        .with_tick(Duration::from_millis(args.tick_ms));

    let paths = NetworkPaths::new(args.file_tramstop, args.file_connection, args.file_tramline);
    let network = load_network(&paths, config.fleet_size)?;
    let mut simulation = Simulation::new(network, config.start);

    if let Some(ticks) = args.ticks {
        simulation.run_for(ticks)?;
        info!(ticks, time = %simulation.clock(), "headless run finished");
        for tram in simulation.positions() {
            info!(
                tram = %tram.tram,
                position = %tram.position,
                activated = tram.activated,
                "final position"
            );
        }
        return Ok(());
    }

    let state = AppState::new(simulation, config.tick);
    let app = create_router(state.clone(), &args.static_dir);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(start = %config.start, tick = ?config.tick, "Tram simulator listening on http://{}", args.bind);

    tokio::select! {
        served = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()) => {
            served?;
            info!("server stopped");
        }
        ticked = ticker::run(state, None) => ticked?,
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
