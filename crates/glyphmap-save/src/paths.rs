//! On-disk layout of a saved world directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glyphmap_arena::{ArraySource, FreeBounds, World, WorldAllocator};

use crate::error::StoreError;
use crate::region_file::{load_region_with, save_region};
use crate::world_file::{load_with, save};

/// File names inside a save directory.
///
/// ```text
/// <root>/world.dat
/// <root>/realm0.dat
/// <root>/realm1.dat
/// …
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldPaths {
    /// Directory holding every file of one world.
    pub root: PathBuf,
}

impl WorldPaths {
    /// Paths under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The world file.
    pub fn world_file(&self) -> PathBuf {
        self.root.join("world.dat")
    }

    /// The region file of world cell `world_index`.
    pub fn region_file(&self, world_index: usize) -> PathBuf {
        self.root.join(format!("realm{world_index}.dat"))
    }

    /// Whether a region file exists for `world_index`.
    pub fn has_region_file(&self, world_index: usize) -> bool {
        self.region_file(world_index).is_file()
    }

    /// World cell indices of every region file under `root`, ascending.
    pub fn region_indices(&self) -> io::Result<Vec<usize>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            let index = name
                .strip_prefix("realm")
                .and_then(|n| n.strip_suffix(".dat"))
                .and_then(|n| n.parse::<usize>().ok());
            match index {
                Some(i) if name == format!("realm{i}.dat") => found.push(i),
                _ => {}
            }
        }
        found.sort_unstable();
        Ok(found)
    }
}

/// Save the world file and the region file of every materialized world
/// cell. Creates `root` if needed.
///
/// Every file is first written next to its final name. The save only
/// replaces what is on disk once all of them have been written, so a
/// failure leaves the previous save intact. Region files left over for
/// cells that are not materialized in `world` are removed before the new
/// files are moved into place, the world file last.
pub fn save_all(world: &World, paths: &WorldPaths) -> Result<(), StoreError> {
    fs::create_dir_all(&paths.root)?;
    let regions: Vec<usize> = world.materialized().collect();

    let mut staged = Vec::with_capacity(regions.len() + 1);
    let written = stage_all(world, paths, &regions, &mut staged);
    if let Err(e) = written {
        for path in &staged {
            let _ = fs::remove_file(staging_path(path));
        }
        log::warn!("save to {} abandoned: {e}", paths.root.display());
        return Err(e);
    }

    let stale: Vec<usize> = paths
        .region_indices()?
        .into_iter()
        .filter(|i| !regions.contains(i))
        .collect();
    for &i in &stale {
        fs::remove_file(paths.region_file(i))?;
    }
    for path in &staged {
        fs::rename(staging_path(path), path)?;
    }
    log::info!(
        "saved {} with {} region files ({} stale removed)",
        paths.root.display(),
        regions.len(),
        stale.len()
    );
    Ok(())
}

fn stage_all(
    world: &World,
    paths: &WorldPaths,
    regions: &[usize],
    staged: &mut Vec<PathBuf>,
) -> Result<(), StoreError> {
    for &i in regions {
        let path = paths.region_file(i);
        save_region(world, staging_path(&path), i)?;
        staged.push(path);
    }
    let path = paths.world_file();
    save(world, staging_path(&path))?;
    staged.push(path);
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".new");
    path.with_file_name(name)
}

/// Load the world file and every region file present.
///
/// World cells without a region file stay unmaterialized. If any file
/// fails to load, the whole world is released and the error returned.
pub fn load_all<S: ArraySource>(paths: &WorldPaths, source: &mut S) -> Result<World, StoreError> {
    let mut world = load_with(paths.world_file(), source)?;
    for i in 0..world.cells().len() {
        if !paths.has_region_file(i) {
            continue;
        }
        if let Err(e) = load_region_with(&mut world, paths.region_file(i), i, source) {
            let dims = *world.dims();
            WorldAllocator::free(world, FreeBounds::all(&dims), source);
            return Err(e);
        }
    }
    Ok(world)
}
