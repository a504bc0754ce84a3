use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serverpulse_core::{
    AlertStore, JsonlAlertStore, LogNotifier, MemoryAlertStore, MonitorConfig, MonitorService,
    SyntheticGenerator,
};

pub fn run(
    host: &str,
    port: u16,
    tick_ms: u64,
    capacity: usize,
    alert_log: Option<&Path>,
    notify_to: Option<String>,
) {
    let alerts: Box<dyn AlertStore> = match alert_log {
        Some(path) => match JsonlAlertStore::open(path) {
            Ok(store) => Box::new(store),
            Err(err) => {
                eprintln!("cannot open alert log {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => Box::new(MemoryAlertStore::new()),
    };

    let config = MonitorConfig {
        capacity,
        tick_interval: Duration::from_millis(tick_ms),
        notify_to,
    };
    let monitor = Arc::new(MonitorService::new(
        config,
        Box::new(SyntheticGenerator::new()),
        alerts,
        Box::new(LogNotifier),
    ));
    monitor.start();

    let base = format!("http://{host}:{port}");
    println!("📈 Serverpulse v{}", serverpulse_core::VERSION);
    println!("   {base}");
    println!("   tick every {tick_ms} ms, {capacity} readings kept in memory");
    println!();
    println!("   Endpoints:");
    println!("     GET /                           API index (try: curl {base})");
    println!("     GET /api/server-status          Latest telemetry reading");
    println!("     GET /api/server-status/history  Recent history for one metric");
    println!("     GET /api/server-status/alert    Most recent alerting reading");
    println!("     GET /health                     Service health check");
    println!();
    println!("   Query params for /api/server-status/history:");
    println!("     limit=N                Points to return (default: 120)");
    println!("     metric=cpu|mem|disk|suhu  Metric to project (default: cpu)");
    println!();
    println!("   Examples:");
    println!("     curl '{base}/api/server-status/history?limit=30&metric=cpu'");
    println!("     curl '{base}/api/server-status/history?limit=30&metric=suhu'");
    println!("     curl {base}/health");
    println!();

    let rt = tokio::runtime::Runtime::new().unwrap();
    if let Err(err) = rt.block_on(serverpulse_server::run_server(
        Arc::clone(&monitor),
        host,
        port,
    )) {
        monitor.stop();
        eprintln!("server error: {err}");
        std::process::exit(1);
    }
    monitor.stop();
}
