//! Event logger writing `.evlog` files for headless runs

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::bus::BusEvent;
use super::format::serialize_event;
use super::types::GameEvent;
use crate::tuning::PhysicsTweaks;

/// Configuration for event logging
#[derive(Resource, Clone, Debug)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    pub enabled: bool,
    /// Sample a Tick event every N frames (0 = disabled)
    pub tick_sample_frames: u64,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
            tick_sample_frames: 60,
        }
    }
}

/// Active event logger with file handle
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (file is opened by `start_session`)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            path: None,
            session_id: String::new(),
            config,
        }
    }

    /// Start a new log session with a fresh UUID and log SessionStart
    pub fn start_session(&mut self, timestamp: &str) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
        {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!(
                    "Event logging started: {} (session: {})",
                    path.display(),
                    &self.session_id[..8]
                );
                self.path = Some(path);
                self.log(
                    0,
                    GameEvent::SessionStart {
                        session_id: self.session_id.clone(),
                        timestamp: timestamp.to_string(),
                    },
                );
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    /// Log the tuning in effect (call after start_session)
    pub fn log_config(&mut self, tweaks: &PhysicsTweaks) {
        self.log(0, GameEvent::Config(tweaks.clone()));
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Path of the open log file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush and close the current log session
    pub fn end_session(&mut self) {
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    pub fn log(&mut self, frame: u64, event: GameEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };
        let line = serialize_event(frame, &event);
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write event: {}", e);
        }
    }

    /// Write drained bus events in order
    pub fn log_bus_events(&mut self, events: &[BusEvent]) {
        for bus_event in events {
            self.log(bus_event.frame, bus_event.event.clone());
        }
    }

    /// Whether a Tick sample is due on this frame
    pub fn should_log_tick(&self, frame: u64) -> bool {
        self.config.tick_sample_frames > 0 && frame % self.config.tick_sample_frames == 0
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        self.end_session();
    }
}
