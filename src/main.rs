//! Serial Plotter - Main Entry Point
//!
//! Reads delimiter-separated numbers from a serial port and plots them in the
//! terminal until `q` is pressed.

use anyhow::Context;
use clap::Parser;
use serialvis_rs::{
    backend::{list_ports, SerialTransport, Transport},
    cli::Cli,
    config::{default_log_dir, AppConfig, LOG_FILE_NAME},
    frontend::{combine_teardown, install_panic_hook, spawn_quit_listener, TerminalDisplay},
    pipeline::{AcquisitionLoop, CancellationSignal},
    AcquisitionStats,
};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,serialvis_rs=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Ok(guard)
}

fn print_ports() -> anyhow::Result<()> {
    let ports = list_ports().context("Failed to enumerate serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found");
    }
    for port in ports {
        println!("{}", port);
    }
    Ok(())
}

/// Run the chart on `transport` until the user quits or the transport fails
fn plot<T: Transport>(transport: T, config: &AppConfig) -> anyhow::Result<AcquisitionStats> {
    install_panic_hook();
    let mut display = TerminalDisplay::init().context("Failed to initialize terminal")?;
    let signal = CancellationSignal::new();
    let listener = spawn_quit_listener(signal.clone())?;

    let result = AcquisitionLoop::new(transport, &mut display, config, signal.clone())
        .and_then(|mut acquisition| acquisition.run());

    // Stops the listener if acquisition ended on its own
    signal.cancel();
    match listener.join() {
        Ok(Err(e)) => tracing::warn!("Input listener failed: {}", e),
        Err(_) => tracing::warn!("Input listener panicked"),
        Ok(Ok(())) => {}
    }
    let restored = display.restore();

    Ok(combine_teardown(result, restored)?)
}

#[cfg(feature = "mock-device")]
fn plot_mock(mut config: AppConfig) -> anyhow::Result<AcquisitionStats> {
    use serialvis_rs::backend::{MockDataPattern, MockDevice};

    if config.display.label.is_none() {
        config.display.label = Some("mock".to_string());
    }
    let (transport, handle) = MockDevice::new(MockDataPattern::default())
        .with_delimiter(config.display.delimiter.clone())
        .with_read_timeout(config.serial.read_timeout())
        .spawn();
    let stats = plot(transport, &config);
    if handle.join().is_err() {
        tracing::warn!("Mock device thread panicked");
    }
    stats
}

#[cfg(not(feature = "mock-device"))]
fn plot_mock(_config: AppConfig) -> anyhow::Result<AcquisitionStats> {
    anyhow::bail!("this build does not include the mock device (enable the `mock-device` feature)")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    let _guard = init_logging(&log_dir)?;

    tracing::info!("Starting serial plotter");

    if cli.list {
        return print_ports();
    }

    let mock = cli.uses_mock();
    let config = cli.into_config().context("Invalid configuration")?;

    let stats = if mock {
        plot_mock(config)?
    } else {
        let transport = SerialTransport::open(&config.serial)
            .with_context(|| format!("Failed to open {}", config.serial.port_name()))?;
        tracing::info!("Plotting readings from {}", transport.name());
        plot(transport, &config)?
    };

    tracing::info!(
        reads = stats.reads,
        samples = stats.samples,
        "Shutting down..."
    );
    Ok(())
}
