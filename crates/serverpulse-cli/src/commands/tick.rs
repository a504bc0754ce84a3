use std::time::Duration;

use serverpulse_core::{MonitorConfig, MonitorService};

/// Run `count` ticks in-process and print each reading. Smoke-tests
/// generation and thresholds without standing up the HTTP server.
pub fn run(count: usize, interval_ms: u64) {
    let monitor = MonitorService::with_defaults(MonitorConfig::default());

    println!(
        "{:<15} {:>7} {:>7} {:>7} {:>7}  {}",
        "Time (ms)", "CPU%", "Mem%", "Disk%", "Suhu°C", "Alert"
    );
    println!("{}", "-".repeat(64));

    for i in 0..count {
        monitor.tick();
        if let Some(r) = monitor.latest() {
            let alert = r.pesan_alert.as_deref().unwrap_or("-");
            println!(
                "{:<15} {:>7.1} {:>7.1} {:>7.1} {:>7.1}  {}",
                r.waktu, r.cpu, r.mem, r.disk, r.suhu, alert
            );
        }
        if interval_ms > 0 && i + 1 < count {
            std::thread::sleep(Duration::from_millis(interval_ms));
        }
    }

    match monitor.last_alert() {
        Some(alert) => println!(
            "\nLast alert at {}: {}",
            alert.waktu,
            alert.pesan_alert.as_deref().unwrap_or("")
        ),
        None => println!("\nNo alerts in {count} ticks"),
    }
}
