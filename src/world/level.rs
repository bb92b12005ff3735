//! Level definitions: loading, saving and validation
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression

use std::fs;
use std::io::Cursor;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::rasterizer::{Rect, Vec2};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum obstacles or hazards in a level
    pub const MAX_RECTS: usize = 4096;
    /// Maximum hostile actors in a level
    pub const MAX_HOSTILES: usize = 256;
    /// Maximum level dimension in tiles
    pub const MAX_TILES: f32 = 4096.0;
    /// Maximum dialogue line length
    pub const MAX_STRING_LEN: usize = 512;
}

/// Error type for level loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Compression error: {0}")]
    Compression(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Rectangle in tile units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl TileRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn to_world(&self, tile_size: f32) -> Rect {
        Rect::new(self.x * tile_size, self.y * tile_size, self.w * tile_size, self.h * tile_size)
    }
}

/// Movement axis for patrolling hostiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Hostile behavior as authored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HostileKind {
    /// Walks between `min` and `max` (tile units along `axis`)
    Patrol { axis: Axis, min: f32, max: f32 },
    /// Homes in on the player
    Pursuer,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostileDef {
    /// Top-left spawn position in tile units
    pub x: f32,
    pub y: f32,
    pub kind: HostileKind,
}

/// Everything needed to construct one level attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub id: u32,
    pub name: String,
    /// Level size in tiles
    pub width: f32,
    pub height: f32,
    /// Collectibles required to open the portal
    pub quota: u32,
    /// Seconds allowed once play starts; None = unlimited
    #[serde(default)]
    pub time_budget: Option<f32>,
    /// Player spawn (tile units, top-left of the player box)
    pub spawn: (f32, f32),
    /// Explicit portal anchor (tile units, bottom-center); placed automatically if absent
    #[serde(default)]
    pub portal: Option<(f32, f32)>,
    pub obstacles: Vec<TileRect>,
    #[serde(default)]
    pub hazards: Vec<TileRect>,
    #[serde(default)]
    pub hostiles: Vec<HostileDef>,
    /// Lines shown before play starts
    #[serde(default)]
    pub dialogue: Vec<String>,
}

impl LevelDef {
    pub fn spawn_world(&self, tile_size: f32) -> Vec2 {
        Vec2::new(self.spawn.0 * tile_size, self.spawn.1 * tile_size)
    }
}

fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_TILES
}

fn validate_rect(r: &TileRect, context: &str) -> Result<(), String> {
    if ![r.x, r.y, r.w, r.h].iter().all(|v| is_valid_float(*v)) {
        return Err(format!("{}: non-finite or out-of-range coordinate", context));
    }
    if r.w <= 0.0 || r.h <= 0.0 {
        return Err(format!("{}: zero-sized rectangle ({} x {})", context, r.w, r.h));
    }
    Ok(())
}

/// Validate a level definition
pub fn validate_level(level: &LevelDef) -> Result<(), LevelError> {
    let fail = |msg: String| Err(LevelError::Validation(format!("level {}: {}", level.id, msg)));

    if !is_valid_float(level.width) || !is_valid_float(level.height) || level.width <= 0.0 || level.height <= 0.0 {
        return fail(format!("invalid size {} x {}", level.width, level.height));
    }
    if level.quota == 0 {
        return fail("quota must be at least 1".to_string());
    }
    if let Some(budget) = level.time_budget {
        if !budget.is_finite() || budget <= 0.0 {
            return fail(format!("time budget must be positive, got {}", budget));
        }
    }
    let (sx, sy) = level.spawn;
    if !(0.0..level.width).contains(&sx) || !(0.0..level.height).contains(&sy) {
        return fail(format!("spawn ({}, {}) outside level", sx, sy));
    }
    if level.obstacles.len() > limits::MAX_RECTS || level.hazards.len() > limits::MAX_RECTS {
        return fail(format!("too many rectangles (max {})", limits::MAX_RECTS));
    }
    if level.hostiles.len() > limits::MAX_HOSTILES {
        return fail(format!("too many hostiles ({} > {})", level.hostiles.len(), limits::MAX_HOSTILES));
    }
    for (i, r) in level.obstacles.iter().enumerate() {
        validate_rect(r, &format!("obstacle {}", i)).map_err(LevelError::Validation)?;
    }
    for (i, r) in level.hazards.iter().enumerate() {
        validate_rect(r, &format!("hazard {}", i)).map_err(LevelError::Validation)?;
    }
    for (i, h) in level.hostiles.iter().enumerate() {
        if !is_valid_float(h.x) || !is_valid_float(h.y) {
            return fail(format!("hostile {}: invalid position", i));
        }
        if let HostileKind::Patrol { min, max, .. } = h.kind {
            if !is_valid_float(min) || !is_valid_float(max) || min > max {
                return fail(format!("hostile {}: patrol bounds {}..{} invalid", i, min, max));
            }
        }
    }
    if level.dialogue.iter().any(|l| l.len() > limits::MAX_STRING_LEN) {
        return fail("dialogue line too long".to_string());
    }
    Ok(())
}

/// Decode raw file bytes (plain or brotli-compressed RON) into text
fn decode_bytes(bytes: Vec<u8>) -> Result<String, LevelError> {
    // RON files start with '(' or whitespace, brotli is binary
    let is_plain_ron = bytes.first()
        .map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t' || b == b'/')
        .unwrap_or(false);

    let bytes = if is_plain_ron {
        bytes
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(&bytes), &mut decompressed)
            .map_err(|e| LevelError::Compression(format!("brotli decompression failed: {}", e)))?;
        decompressed
    };

    String::from_utf8(bytes).map_err(|e| LevelError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("invalid UTF-8: {}", e),
    )))
}

/// Load a level from a RON string (for embedded levels or testing)
pub fn load_level_from_str(s: &str) -> Result<LevelDef, LevelError> {
    let level: LevelDef = ron::from_str(s)?;
    validate_level(&level)?;
    Ok(level)
}

/// Load a level from a RON file (supports both compressed and uncompressed)
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelDef, LevelError> {
    let path = path.as_ref();
    let contents = decode_bytes(fs::read(path)?)?;
    load_level_from_str(&contents).map_err(|e| {
        log::error!("Failed to load level {}: {}", path.display(), e);
        e
    })
}

/// Save a level to a compressed RON file (brotli)
pub fn save_level<P: AsRef<Path>>(level: &LevelDef, path: P) -> Result<(), LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let ron_string = ron::ser::to_string_pretty(level, config)?;

    // Quality 6, window 22 - good balance of speed/ratio
    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(ron_string.as_bytes()), &mut compressed, &brotli::enc::BrotliEncoderParams {
        quality: 6,
        lgwin: 22,
        ..Default::default()
    }).map_err(|e| LevelError::Compression(format!("brotli compression failed: {}", e)))?;

    fs::write(path, compressed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"(
        id: 7,
        name: "Test",
        width: 20.0,
        height: 10.0,
        quota: 2,
        time_budget: Some(30.0),
        spawn: (1.0, 7.0),
        obstacles: [(x: 0.0, y: 9.0, w: 20.0, h: 1.0)],
        hazards: [(x: 5.0, y: 8.5, w: 1.0, h: 0.5)],
        hostiles: [(x: 10.0, y: 8.0, kind: Patrol(axis: Horizontal, min: 8.0, max: 12.0))],
    )"#;

    #[test]
    fn test_load_from_str() {
        let level = load_level_from_str(SMALL).unwrap();
        assert_eq!(level.id, 7);
        assert_eq!(level.quota, 2);
        assert_eq!(level.portal, None);
        assert!(level.dialogue.is_empty());
        assert_eq!(level.obstacles[0].to_world(32.0), Rect::new(0.0, 288.0, 640.0, 32.0));
    }

    #[test]
    fn test_validation_rejects_zero_quota() {
        let mut level = load_level_from_str(SMALL).unwrap();
        level.quota = 0;
        assert!(matches!(validate_level(&level), Err(LevelError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_inverted_patrol() {
        let mut level = load_level_from_str(SMALL).unwrap();
        level.hostiles[0].kind = HostileKind::Patrol { axis: Axis::Vertical, min: 5.0, max: 1.0 };
        assert!(validate_level(&level).is_err());
    }

    #[test]
    fn test_validation_rejects_degenerate_rect() {
        let mut level = load_level_from_str(SMALL).unwrap();
        level.hazards.push(TileRect::new(1.0, 1.0, 0.0, 1.0));
        assert!(validate_level(&level).is_err());
    }

    #[test]
    fn test_save_compressed_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("level.ron");
        let level = load_level_from_str(SMALL).unwrap();
        save_level(&level, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_ne!(bytes.first(), Some(&b'('));
        assert_eq!(load_level(&path).unwrap(), level);
    }
}
