// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use psxcore::core::config::CoreConfig;
use psxcore::core::error::Result;
use psxcore::core::system::System;

/// PlayStation CPU/GPU core runner
#[derive(Parser)]
#[command(name = "psxcore")]
#[command(about = "Run the PlayStation CPU/GPU core for a number of ticks", long_about = None)]
struct Args {
    /// Path to a 512KB BIOS image (e.g., SCPH1001.BIN)
    #[arg(short, long)]
    bios: Option<PathBuf>,

    /// Raw program image to copy into RAM
    #[arg(short, long)]
    program: Option<PathBuf>,

    /// Virtual address the program is loaded at
    #[arg(long, default_value = "0x80010000", value_parser = parse_address)]
    load_address: u32,

    /// Initial PC (defaults to the load address when a program is given)
    #[arg(short, long, value_parser = parse_address)]
    entry: Option<u32>,

    /// Number of CPU ticks to run
    #[arg(short = 'n', long, default_value = "100000")]
    ticks: u64,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write VRAM to this file after the run (raw little-endian 16-bit pixels)
    #[arg(long)]
    dump_vram: Option<PathBuf>,
}

/// Parse a decimal or `0x`-prefixed hexadecimal address
fn parse_address(text: &str) -> std::result::Result<u32, String> {
    let text = text.replace('_', "");
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", text, e))
}

fn main() -> Result<()> {
    // Optional .env for RUST_LOG and friends
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log.level))
        .init();

    info!("psxcore v{}", env!("CARGO_PKG_VERSION"));

    let mut system = System::with_config(&config);

    if let Some(bios) = &args.bios {
        info!("Loading BIOS from: {}", bios.display());
        if let Err(e) = system.load_bios(bios) {
            error!("Failed to load BIOS: {}", e);
            return Err(e);
        }
    }

    if let Some(program) = &args.program {
        let image = std::fs::read(program)?;
        system.load_program(&image, args.load_address)?;
        system.set_pc(args.entry.unwrap_or(args.load_address));
    } else if let Some(entry) = args.entry {
        system.set_pc(entry);
    }

    info!("Starting at PC=0x{:08X}, {} ticks", system.pc(), args.ticks);

    let log_interval = (args.ticks / 10).max(1);
    let mut remaining = args.ticks;
    while remaining > 0 {
        let batch = remaining.min(log_interval);
        system.run(batch);
        remaining -= batch;

        info!(
            "Progress: {}/{} ticks | PC: 0x{:08X} | Cycles: {}",
            args.ticks - remaining,
            args.ticks,
            system.pc(),
            system.cycles()
        );
    }

    info!("Total cycles: {}", system.cycles());
    info!("Final PC: 0x{:08X}", system.pc());
    info!("GPUSTAT: 0x{:08X}", system.gpu().status());

    if let Some(path) = &args.dump_vram {
        let bytes: Vec<u8> = system
            .gpu()
            .vram()
            .iter()
            .flat_map(|pixel| pixel.to_le_bytes())
            .collect();
        std::fs::write(path, bytes)?;
        info!("VRAM written to {}", path.display());
    }

    Ok(())
}
