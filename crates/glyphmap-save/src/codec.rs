//! Binary encode/decode for headers and tiles.
//!
//! All multi-byte integers are little-endian. There is no padding and no
//! length prefix: array lengths follow from the header's dimensions.

use std::io::{Read, Write};

use glyphmap_core::{Dimensions, Tile};

use crate::error::StoreError;
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), StoreError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u16.
pub fn write_u16_le(w: &mut dyn Write, v: u16) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, StoreError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u16.
pub fn read_u16_le(r: &mut dyn Read) -> Result<u16, StoreError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

// ── Header encode/decode ────────────────────────────────────────

/// A decoded file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version the file was written with.
    pub version: u16,
    /// Extents of the world the file belongs to.
    pub dims: Dimensions,
}

/// Encode a header for a world of `dims` at the current format version.
///
/// Layout: magic, version, then realm w/h, region w/h, local w/h, z,
/// world w/h as single bytes.
pub fn encode_header(w: &mut dyn Write, dims: &Dimensions) -> Result<(), StoreError> {
    w.write_all(&MAGIC)?;
    write_u16_le(w, FORMAT_VERSION)?;
    w.write_all(&[
        dims.realm_width,
        dims.realm_height,
        dims.region_width,
        dims.region_height,
        dims.local_width,
        dims.local_height,
        dims.z_height,
        dims.world_width,
        dims.world_height,
    ])?;
    Ok(())
}

/// Decode and validate a header.
///
/// Magic is checked first, then the version; nothing past the version is
/// read from a rejected file.
pub fn decode_header(r: &mut dyn Read) -> Result<FileHeader, StoreError> {
    let mut magic = [0u8; 8];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        log::warn!("rejected header with magic {magic:02x?}");
        return Err(StoreError::BadMagic { found: magic });
    }

    let version = read_u16_le(r)?;
    if version > FORMAT_VERSION {
        log::warn!("rejected header with format version {version}");
        return Err(StoreError::UnsupportedVersion { found: version });
    }

    let mut d = [0u8; 9];
    r.read_exact(&mut d)?;
    let dims = Dimensions::new(d[7], d[8], d[0], d[1], d[2], d[3], d[4], d[5], d[6]);
    Ok(FileHeader { version, dims })
}

// ── Tile encode/decode ──────────────────────────────────────────

/// Encode one tile: glyph, fg, bg, elevation, temperature, passable.
pub fn encode_tile(w: &mut dyn Write, tile: &Tile) -> Result<(), StoreError> {
    let [g0, g1] = tile.glyph.to_le_bytes();
    w.write_all(&[
        g0,
        g1,
        tile.fg,
        tile.bg,
        tile.elevation,
        tile.temperature,
        tile.passable as u8,
    ])?;
    Ok(())
}

/// Decode one tile. The passable byte must be 0 or 1.
pub fn decode_tile(r: &mut dyn Read) -> Result<Tile, StoreError> {
    let mut b = [0u8; crate::TILE_LEN];
    r.read_exact(&mut b)?;
    let passable = match b[6] {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::MalformedTile {
                detail: format!("passable flag must be 0 or 1, got {other}"),
            })
        }
    };
    Ok(Tile {
        glyph: u16::from_le_bytes([b[0], b[1]]),
        fg: b[2],
        bg: b[3],
        elevation: b[4],
        temperature: b[5],
        passable,
    })
}
