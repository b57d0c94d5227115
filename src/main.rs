use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use bzen::io::common::loader::{AssetFormat, AssetLocator, AssetRepository, LoadError, NativeRecord};
use bzen::io::index::AssetIndex;
use bzen::io::vdf::loader::VdfLoader;
use bzen::settings::{CliArgs, OperationMode, init_logging};
use bzen::world::world_loader::locate_world;
use bzen_files::world::types::World;
use clap::Parser;

/// The index only needs the locations, nothing is decoded by the inspection commands.
struct ListingOnly {}

impl AssetRepository for ListingOnly {
    fn load(&self, _locator: &AssetLocator, format: AssetFormat) -> Result<NativeRecord, LoadError> {
        Err(LoadError::Unsupported(format))
    }

    fn load_world(&self, _locator: &AssetLocator) -> Result<World, LoadError> {
        Err(LoadError::Malformed {
            reason: "worlds are not decoded when listing".to_string(),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose, args.log_file.as_deref()).context("Failed to set up logging")?;
    log::trace!("Starting with args: {:?}", args);

    let game_dir = Path::new(&args.game_dir);
    match &args.operation_mode {
        OperationMode::Index { list } => print_index(game_dir, *list),
        OperationMode::Archive { path } => print_archive(path),
        OperationMode::Locate { world } => {
            let locator = locate_world(world, game_dir).with_context(|| format!("Cannot locate {}", world))?;
            println!("{}", locator);
            Ok(())
        }
    }
}

fn print_index(game_dir: &Path, list: bool) -> anyhow::Result<()> {
    let now = Instant::now();
    let index = AssetIndex::build(game_dir, Arc::new(ListingOnly {}))
        .with_context(|| format!("Failed to index {}", game_dir.display()))?;
    println!("{} assets indexed in {}ms", index.len(), now.elapsed().as_millis());

    for (format, count) in index.counts_by_format() {
        println!("  {:>5}  {}", count, format.extension());
    }

    if list {
        for key in index.keys_sorted() {
            if let Some(entry) = index.entry(key) {
                println!("{} [{:?}] {}", key, entry.source, entry.loader.locator());
            }
        }
    }

    Ok(())
}

fn print_archive(path: &Path) -> anyhow::Result<()> {
    let archive = VdfLoader::mount(path).with_context(|| format!("Failed to mount {}", path.display()))?;
    for node in &archive.files {
        println!("{:>10}  {}", node.size, node.path);
    }
    println!("{} files", archive.files.len());
    Ok(())
}
