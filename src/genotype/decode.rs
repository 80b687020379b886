use crate::foundation::error::{LaserCatError, LaserCatResult};

/// Decoded genotype identifier.
///
/// Keeps the canonical lowercase hex (without `0x`) next to its byte vector. Byte 0 selects the
/// color counting mode, byte 1 the head count and design.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Genotype {
    hex: String,
    bytes: Vec<u8>,
}

/// Which colors compete for the dominant (restriped) color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountingMode {
    /// Every non-empty color counts.
    Vivid,
    /// Only colors brighter than the muted threshold count.
    Muted,
}

impl Genotype {
    /// Decode a hex identifier with an optional `0x` prefix.
    pub fn parse(id: &str) -> LaserCatResult<Self> {
        let trimmed = id.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex.is_empty() || !hex.len().is_multiple_of(2) {
            return Err(LaserCatError::decode(format!(
                "genotype '{id}' must have an even, non-zero number of hex digits"
            )));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LaserCatError::decode(format!(
                "genotype '{id}' contains non-hex characters"
            )));
        }

        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| LaserCatError::decode(format!("genotype '{id}': {e}")))?;
        if bytes.len() < 2 {
            return Err(LaserCatError::decode(format!(
                "genotype '{id}' needs at least two bytes"
            )));
        }

        Ok(Self {
            hex: hex.to_ascii_lowercase(),
            bytes,
        })
    }

    /// Lowercase hex without prefix.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte 1 reduced to its low seven bits.
    fn head_byte(&self) -> u8 {
        self.bytes[1] % 128
    }

    pub fn is_two_headed(&self) -> bool {
        self.head_byte() <= 3
    }

    /// Design selector in `0..8`: the low two bits of byte 1, plus 4 for the upper half.
    pub fn design(&self) -> u8 {
        let base = self.bytes[1] % 4;
        if self.head_byte() >= 64 { base + 4 } else { base }
    }

    pub fn counting_mode(&self) -> CountingMode {
        if self.bytes[0].is_multiple_of(2) {
            CountingMode::Muted
        } else {
            CountingMode::Vivid
        }
    }
}

impl std::fmt::Display for Genotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.hex)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/genotype/decode.rs"]
mod tests;
