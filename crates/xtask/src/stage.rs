use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Parser)]
pub struct Args {
    /// Template tree to copy from.
    #[arg(long)]
    pub templates: PathBuf,

    /// Destination root; created if missing.
    #[arg(long)]
    pub dest: PathBuf,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing templates directory: {0}")]
    MissingTemplates(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Copies every file under the template tree to the same relative path under
/// the destination, creating intermediate directories and overwriting
/// existing files. Permissions and modification times follow the source.
pub fn run(args: Args) -> Result<(), Error> {
    if !args.templates.is_dir() {
        return Err(Error::MissingTemplates(args.templates));
    }
    copy_tree(&args.templates, &args.dest)
}

fn copy_tree(src_dir: &Path, dest_dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dest_dir)?;
    for entry in fs::read_dir(src_dir)? {
        let entry = entry?;
        let src = entry.path();
        let dest = dest_dir.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&src, &dest)?;
        } else {
            copy_file(&src, &dest)?;
        }
    }
    Ok(())
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), Error> {
    // fs::copy carries permissions; mtime needs an explicit touch-up.
    fs::copy(src, dest)?;
    let modified = fs::metadata(src)?.modified()?;
    let dest_file = fs::File::options().write(true).open(dest)?;
    dest_file.set_modified(modified)?;
    Ok(())
}
