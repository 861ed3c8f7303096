//! Compiled contract artifacts.
//!
//! The contract build writes `build/<Name>.compiled.json`:
//!
//! ```json
//! { "hash": "<hex>", "hashBase64": "<base64>", "hex": "<boc hex>" }
//! ```
//!
//! A bare `.boc` file is accepted as well.

use crate::error::{ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ton_cell::Cell;
use tracing::debug;

/// JSON shape of a compiled artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledArtifact {
    /// Code hash, hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Code hash, base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_base64: Option<String>,
    /// Code bag of cells, hex.
    pub hex: String,
}

impl CompiledArtifact {
    /// Wraps a code cell.
    #[must_use]
    pub fn from_code(code: &Cell) -> Self {
        use base64::Engine as _;
        Self {
            hash: Some(code.hash_hex()),
            hash_base64: Some(base64::engine::general_purpose::STANDARD.encode(code.hash())),
            hex: code.to_boc_hex(),
        }
    }

    /// Parses the JSON form.
    pub fn from_json(json: &str) -> ContractResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ContractError::invalid_artifact(format!("malformed JSON: {e}")))
    }

    /// Conventional artifact location for `name` under `build_dir`.
    #[must_use]
    pub fn default_path(build_dir: &Path, name: &str) -> PathBuf {
        build_dir.join(format!("{name}.compiled.json"))
    }

    /// Loads the code cell from a `.compiled.json` or `.boc` file.
    pub fn load_code(path: &Path) -> ContractResult<Cell> {
        let bytes = std::fs::read(path).map_err(|e| {
            ContractError::invalid_artifact(format!("cannot read {}: {e}", path.display()))
        })?;

        let code = if path.extension().is_some_and(|ext| ext == "boc") {
            Cell::from_boc(&bytes)?
        } else {
            let text = String::from_utf8(bytes).map_err(|e| {
                ContractError::invalid_artifact(format!("{} is not UTF-8: {e}", path.display()))
            })?;
            Self::from_json(&text)?.code()?
        };

        debug!(path = %path.display(), hash = %code.hash_hex(), "loaded contract code");
        Ok(code)
    }

    /// Decodes the code cell and checks it against the recorded hash.
    pub fn code(&self) -> ContractResult<Cell> {
        let code = Cell::from_boc_hex(&self.hex)?;
        if let Some(expected) = &self.hash {
            if !expected.eq_ignore_ascii_case(&code.hash_hex()) {
                return Err(ContractError::invalid_artifact(format!(
                    "hash mismatch: artifact says {expected}, code is {}",
                    code.hash_hex()
                )));
            }
        }
        Ok(code)
    }
}
