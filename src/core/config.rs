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

//! Core configuration
//!
//! Behaviour that real software may depend on but that the hardware leaves
//! undefined (or that is still incomplete) is selectable through a small
//! TOML file. Every key is optional.
//!
//! ```toml
//! [cpu]
//! unknown_opcode = "reserved-instruction"
//!
//! [gpu]
//! unhandled_command = "drop"
//!
//! [log]
//! level = "debug"
//! ```
//!
//! # Example
//!
//! ```
//! use psxcore::core::config::{CoreConfig, UnknownOpcodePolicy};
//!
//! let config = CoreConfig::from_toml_str("[cpu]\nunknown_opcode = \"reserved-instruction\"\n").unwrap();
//! assert_eq!(config.cpu.unknown_opcode, UnknownOpcodePolicy::ReservedInstruction);
//! ```

use crate::core::error::{EmulatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the CPU does with an opcode it does not decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownOpcodePolicy {
    /// Log a warning and treat the instruction as a no-op
    #[default]
    Ignore,
    /// Raise a Reserved Instruction exception
    ReservedInstruction,
}

/// What the GPU dispatcher does with a GP0 opcode it does not implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnhandledCommandPolicy {
    /// Log a warning, discard the command word and complete the command
    #[default]
    Drop,
    /// Log a warning and keep the command in progress; the FIFO stalls
    Stall,
}

/// CPU options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    /// Handling of undecoded opcodes
    pub unknown_opcode: UnknownOpcodePolicy,
}

/// GPU options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    /// Handling of unimplemented GP0 commands
    pub unhandled_command: UnhandledCommandPolicy,
}

/// Logging options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub cpu: CpuConfig,
    pub gpu: GpuConfig,
    pub log: LogConfig,
}

impl CoreConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::Config`] if the text is not valid TOML or
    /// names an unknown policy.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EmulatorError::Config(e.to_string()))
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::Io`] if the file cannot be read, or
    /// [`EmulatorError::Config`] if it cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    /// Render the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| EmulatorError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.cpu.unknown_opcode, UnknownOpcodePolicy::Ignore);
        assert_eq!(config.gpu.unhandled_command, UnhandledCommandPolicy::Drop);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_parse_all_sections() {
        let text = r#"
            [cpu]
            unknown_opcode = "reserved-instruction"

            [gpu]
            unhandled_command = "stall"

            [log]
            level = "trace"
        "#;
        let config = CoreConfig::from_toml_str(text).unwrap();
        assert_eq!(
            config.cpu.unknown_opcode,
            UnknownOpcodePolicy::ReservedInstruction
        );
        assert_eq!(config.gpu.unhandled_command, UnhandledCommandPolicy::Stall);
        assert_eq!(config.log.level, "trace");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = CoreConfig::from_toml_str("[gpu]\nunhandled_command = \"explode\"\n");
        assert!(matches!(result, Err(EmulatorError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cpu]\nunknown_opcode = \"ignore\"\n[log]\nlevel = \"warn\"").unwrap();

        let config = CoreConfig::load(file.path()).unwrap();
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CoreConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(EmulatorError::Io(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = CoreConfig::default();
        config.gpu.unhandled_command = UnhandledCommandPolicy::Stall;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("unhandled_command = \"stall\""));
        assert_eq!(CoreConfig::from_toml_str(&text).unwrap(), config);
    }
}
