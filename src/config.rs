use serde::Deserialize;
use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Row index of the header row inside the worksheet. The pulse workbook
/// carries two banner rows above the real headers, so the third row (index 2)
/// is the header row. Fixed offset, not discovered.
pub const DEFAULT_HEADER_ROW: usize = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Default workbook path, used by `serve` when a request does not name one.
    pub workbook: Option<PathBuf>,
    pub header_row: usize,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let workbook = std::env::var("PULSE_WORKBOOK").ok().map(PathBuf::from);

        let header_row = match std::env::var("PULSE_HEADER_ROW") {
            Ok(v) => v
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PULSE_HEADER_ROW: {}", e))?,
            Err(_) => DEFAULT_HEADER_ROW,
        };

        let bind_addr = match std::env::var("PULSE_BIND_ADDR") {
            Ok(v) => v
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PULSE_BIND_ADDR: {}", e))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        Ok(Config {
            workbook,
            header_row,
            bind_addr,
        })
    }
}
