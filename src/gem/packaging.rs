//! Assembly of a staging tree into a `.gem` archive.
//!
//! A gem is a plain tar holding two members, in this order:
//!
//! - `data.tar.gz`: gzipped tar of the `lib/` files;
//! - `metadata.gz`: gzipped `Gem::Specification` YAML.
//!
//! The outer archive is written to a `<name>*.partial` temporary file and
//! persisted into place, so an interrupted build never leaves a truncated
//! `.gem` behind.

use super::loader::{jar_file_name, loader_file_name, loader_source};
use super::naming::GemFileName;
use super::packaging_error::PackagingError;
use super::specification::GemSpecification;
use super::staging::StagingDir;
use crate::pom::PomRecord;
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const METADATA_FILE: &str = "metadata";
const METADATA_MEMBER: &str = "metadata.gz";
const DATA_MEMBER: &str = "data.tar.gz";
const PARTIAL_SUFFIX: &str = ".partial";
#[cfg(unix)]
const GEM_MODE: u32 = 0o644;

/// Input parameters for [`assemble`].
#[derive(Debug, Clone)]
pub struct PackageParams {
    /// Directory receiving the staging tree and the finished gem.
    pub output_dir: PathBuf,
}

/// A completed assembly step, reported to the observer of
/// [`assemble_with`] together with the path it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStep {
    /// The staging tree exists.
    Staged,
    /// The JAR is in `lib/`.
    JarWritten,
    /// The Ruby loader is in `lib/`.
    LoaderWritten,
    /// The YAML metadata is in the staging root.
    MetadataWritten,
    /// `metadata` was replaced by `metadata.gz`.
    MetadataCompressed,
    /// `data.tar.gz` holds the `lib/` files.
    DataArchived,
    /// The outer archive is complete but not yet renamed into place.
    Packed,
}

impl fmt::Display for AssemblyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Staged => "staging",
            Self::JarWritten => "writing the JAR",
            Self::LoaderWritten => "writing the loader",
            Self::MetadataWritten => "writing metadata",
            Self::MetadataCompressed => "compressing metadata",
            Self::DataArchived => "archiving lib/",
            Self::Packed => "packing the gem",
        };
        f.write_str(label)
    }
}

/// Assemble a gem for `record` around `jar`.
///
/// # Errors
///
/// See [`assemble_with`].
pub fn assemble(
    record: &PomRecord,
    jar: &[u8],
    params: &PackageParams,
) -> Result<PathBuf, PackagingError> {
    assemble_with(record, jar, params, |_, _| Ok(()))
}

/// Assemble a gem, calling `on_step` after each step.
///
/// An error returned by `on_step` stops the build like any other failure.
/// On every failure the staging tree is removed and no `.gem` (complete or
/// partial) is left in `params.output_dir`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] on filesystem or archive failures,
/// [`PackagingError::Metadata`] if the specification cannot be serialized,
/// or whatever `on_step` returns.
pub fn assemble_with<F>(
    record: &PomRecord,
    jar: &[u8],
    params: &PackageParams,
    mut on_step: F,
) -> Result<PathBuf, PackagingError>
where
    F: FnMut(AssemblyStep, &Path) -> Result<(), PackagingError>,
{
    let gem_name = GemFileName::for_record(record);
    let staging = StagingDir::create(
        &params.output_dir,
        &gem_name.staging_name(),
        std::process::id(),
    )?;
    on_step(AssemblyStep::Staged, staging.path())?;

    let jar_path = staging.lib_dir().join(jar_file_name(record));
    fs::write(&jar_path, jar)?;
    on_step(AssemblyStep::JarWritten, &jar_path)?;

    let loader_path = staging.lib_dir().join(loader_file_name(record));
    fs::write(&loader_path, loader_source(record))?;
    on_step(AssemblyStep::LoaderWritten, &loader_path)?;

    let metadata_path = staging.path().join(METADATA_FILE);
    fs::write(
        &metadata_path,
        GemSpecification::from_record(record).to_yaml()?,
    )?;
    on_step(AssemblyStep::MetadataWritten, &metadata_path)?;

    let metadata_gz = staging.path().join(METADATA_MEMBER);
    compress_file(&metadata_path, &metadata_gz)?;
    on_step(AssemblyStep::MetadataCompressed, &metadata_gz)?;

    let data_path = staging.path().join(DATA_MEMBER);
    create_data_archive(&data_path, staging.lib_dir())?;
    on_step(AssemblyStep::DataArchived, &data_path)?;

    let gem_path = params.output_dir.join(gem_name.filename());
    let partial = tempfile::Builder::new()
        .prefix(&gem_name.filename())
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(&params.output_dir)?;
    create_outer_archive(&partial, &data_path, &metadata_gz)?;
    on_step(AssemblyStep::Packed, partial.path())?;

    publish(partial, &gem_path)?;
    debug!("built {}", gem_path.display());
    Ok(gem_path)
}

/// Gzip `source` into `dest` and delete `source`.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if either file cannot be accessed.
pub fn compress_file(source: &Path, dest: &Path) -> Result<(), PackagingError> {
    let contents = fs::read(source)?;
    let mut encoder = GzEncoder::new(fs::File::create(dest)?, Compression::default());
    encoder.write_all(&contents)?;
    encoder.finish()?;
    fs::remove_file(source)?;
    Ok(())
}

/// Create `data.tar.gz` from the files in `lib_dir`, sorted by name and
/// stored as `lib/<name>`.
///
/// # Errors
///
/// Returns [`PackagingError::InvalidLibraryPath`] for non-UTF-8 file names
/// and [`PackagingError::Io`] on read or write failures.
pub fn create_data_archive(output_path: &Path, lib_dir: &Path) -> Result<(), PackagingError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(lib_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| PackagingError::InvalidLibraryPath(entry.path()))?;
        names.push(name);
    }
    names.sort();

    let encoder = GzEncoder::new(fs::File::create(output_path)?, Compression::default());
    let mut archive = tar::Builder::new(encoder);
    for name in names {
        append_file(&mut archive, &lib_dir.join(&name), &format!("lib/{name}"))?;
    }
    archive.into_inner()?.finish()?;
    Ok(())
}

/// Write the outer (uncompressed) gem archive into `partial`.
fn create_outer_archive(
    partial: &NamedTempFile,
    data_path: &Path,
    metadata_path: &Path,
) -> Result<(), PackagingError> {
    let mut archive = tar::Builder::new(partial.as_file());
    append_file(&mut archive, data_path, DATA_MEMBER)?;
    append_file(&mut archive, metadata_path, METADATA_MEMBER)?;
    archive.into_inner()?.sync_all()?;
    Ok(())
}

/// Give the finished archive ordinary file permissions and move it to
/// `gem_path`, replacing any earlier build.
fn publish(partial: NamedTempFile, gem_path: &Path) -> Result<(), PackagingError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        partial
            .as_file()
            .set_permissions(fs::Permissions::from_mode(GEM_MODE))?;
    }
    partial
        .persist(gem_path)
        .map_err(|err| PackagingError::Io(err.error))?;
    Ok(())
}

/// Append a regular file under a ustar header with deterministic metadata
/// (mode 0644, fixed mtime, no owner).
fn append_file<W: Write>(
    archive: &mut tar::Builder<W>,
    source: &Path,
    name: &str,
) -> Result<(), PackagingError> {
    let file = fs::File::open(source)?;
    let mut header = tar::Header::new_ustar();
    header.set_metadata_in_mode(&file.metadata()?, tar::HeaderMode::Deterministic);
    archive.append_data(&mut header, name, file)?;
    Ok(())
}

#[cfg(test)]
#[path = "packaging_tests.rs"]
mod tests;
