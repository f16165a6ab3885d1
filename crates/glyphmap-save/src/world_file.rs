//! The world file: header, world tiles, then every realm array.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use glyphmap_arena::{ArraySource, SystemSource, World, WorldAllocator};

use crate::codec::{decode_header, decode_tile, encode_header, encode_tile};
use crate::error::StoreError;

/// Encode `world`'s world and realm tiles.
pub fn write_world(w: &mut dyn Write, world: &World) -> Result<(), StoreError> {
    encode_header(w, world.dims())?;
    for cell in world.cells() {
        encode_tile(w, &cell.tile)?;
    }
    for i in 0..world.cells().len() {
        for realm in world.realm_cells(i)? {
            encode_tile(w, &realm.tile)?;
        }
    }
    Ok(())
}

/// Decode a world file into a shallow world built from `source`.
///
/// The header is validated before anything is allocated. Arrays are
/// acquired as their tiles are read; on any failure every array acquired
/// so far is released.
pub fn read_world<S: ArraySource>(r: &mut dyn Read, source: &mut S) -> Result<World, StoreError> {
    let header = decode_header(r)?;
    WorldAllocator::allocate_shallow_with(header.dims, source, |_, tile| {
        *tile = decode_tile(r)?;
        Ok(())
    })
}

/// Save the world file to `path`.
///
/// Region and local arrays are not part of the world file; see
/// [`save_region`](crate::save_region).
pub fn save(world: &World, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    write_atomically(path, |w| write_world(w, world))?;
    log::info!("saved world ({}) to {}", world.dims(), path.display());
    Ok(())
}

/// Load a world file from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<World, StoreError> {
    load_with(path, &mut SystemSource)
}

/// [`load`] with an explicit array source.
pub fn load_with<S: ArraySource>(
    path: impl AsRef<Path>,
    source: &mut S,
) -> Result<World, StoreError> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let world = read_world(&mut reader, source)?;
    log::info!("loaded world ({}) from {}", world.dims(), path.display());
    Ok(world)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write through a sibling `.tmp` file and rename it over `path` once
/// the body and flush have succeeded. On failure `path` is untouched.
pub(crate) fn write_atomically(
    path: &Path,
    body: impl FnOnce(&mut dyn Write) -> Result<(), StoreError>,
) -> Result<(), StoreError> {
    let tmp = temp_path(path);
    let result = (|| -> Result<(), StoreError> {
        let mut w = BufWriter::new(File::create(&tmp)?);
        body(&mut w)?;
        w.flush()?;
        w.get_ref().sync_all()?;
        Ok(())
    })();
    let result = result.and_then(|()| Ok(fs::rename(&tmp, path)?));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
