//! Access trace parsing.
//!
//! A trace is a text file with one access per line: an operation (`R` or `W`,
//! case-insensitive) followed by an address in decimal or `0x` hexadecimal.
//! Blank lines and everything after a `#` are ignored.
//!
//! ```text
//! # warm up
//! R 0x100
//! W 200
//! ```

use crate::CliError;

/// One access from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// Accessed address.
    pub addr: u32,
    /// Whether the access is a write.
    pub is_write: bool,
}

/// The reference five-access pattern: a cold miss, two hits on the same line, a write miss, a hit.
pub const DEMO_PATTERN: [Access; 5] = [
    Access { addr: 100, is_write: false },
    Access { addr: 120, is_write: false },
    Access { addr: 100, is_write: false },
    Access { addr: 200, is_write: true },
    Access { addr: 100, is_write: false },
];

/// Parses a whole trace.
///
/// # Errors
///
/// Returns [`CliError::Trace`] naming the first malformed line (1-based).
pub fn parse(text: &str) -> Result<Vec<Access>, CliError> {
    let mut accesses = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let access = parse_line(line).map_err(|reason| CliError::Trace {
            line: idx + 1,
            reason,
        })?;
        accesses.push(access);
    }
    Ok(accesses)
}

fn parse_line(line: &str) -> Result<Access, String> {
    let mut fields = line.split_whitespace();
    let op = fields.next().ok_or_else(|| "missing operation".to_string())?;
    let addr = fields.next().ok_or_else(|| "missing address".to_string())?;
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected field `{extra}`"));
    }

    let is_write = match op.to_ascii_uppercase().as_str() {
        "R" => false,
        "W" => true,
        other => return Err(format!("unknown operation `{other}`")),
    };

    let parsed = match addr.strip_prefix("0x").or_else(|| addr.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => addr.parse::<u32>(),
    };
    let addr = parsed.map_err(|e| format!("bad address `{addr}`: {e}"))?;

    Ok(Access { addr, is_write })
}
