//! In-memory log buffer surfaced through the HTTP API.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const MAX_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub type LogBuffer = Arc<Mutex<Vec<LogEntry>>>;

pub fn new_buffer() -> LogBuffer {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > MAX_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_capped() {
        let logs = new_buffer();
        for i in 0..150 {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }
        let entries = logs.lock().unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        // Oldest entries are dropped first
        assert_eq!(entries[0].message, "entry 50");
    }
}
