use log::info;
use std::time::{Duration, Instant};

/// Throttled progress log lines for a single transfer.
pub struct ProgressTracker {
    name: String,
    current: u64,
    total: Option<u64>,
    interval: Duration,
    start_time: Instant,
    last_update: Instant,
}

impl ProgressTracker {
    pub fn new(name: impl Into<String>, total: Option<u64>, interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            name: name.into(),
            current: 0,
            total,
            interval,
            start_time: now,
            last_update: now,
        }
    }

    pub fn advance(&mut self, bytes: u64) {
        self.current += bytes;

        if self.last_update.elapsed() >= self.interval {
            self.display();
            self.last_update = Instant::now();
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn complete(self) {
        info!(
            "{}: Complete - {} in {:.1}s",
            self.name,
            format_bytes(self.current),
            self.start_time.elapsed().as_secs_f64()
        );
    }

    fn display(&self) {
        match self.total {
            Some(total) if total > 0 => {
                let percentage = (self.current as f64 / total as f64 * 100.0).round() as u8;
                info!(
                    "{}: {}% ({}/{})",
                    self.name,
                    percentage,
                    format_bytes(self.current),
                    format_bytes(total)
                );
            }
            _ => info!("{}: {}", self.name, format_bytes(self.current)),
        }
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
