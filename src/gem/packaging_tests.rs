//! Unit tests for gem assembly.

use super::*;
use crate::pom::parse_pom;
use crate::test_utils::SAMPLE_POM;
use flate2::read::GzDecoder;
use rstest::{fixture, rstest};
use std::io::Read;
use tempfile::TempDir;

const JAR: &[u8] = b"PK\x03\x04 not really a jar";

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

#[fixture]
fn record() -> PomRecord {
    parse_pom(SAMPLE_POM).expect("sample POM parses")
}

fn params(dir: &TempDir) -> PackageParams {
    PackageParams {
        output_dir: dir.path().to_path_buf(),
    }
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Read every member of a tar stream as `(name, mode, bytes)`.
fn tar_members<R: Read>(reader: R) -> Vec<(String, u32, Vec<u8>)> {
    let mut archive = tar::Archive::new(reader);
    archive
        .entries()
        .expect("tar entries")
        .map(|entry| {
            let mut entry = entry.expect("tar entry");
            let name = entry
                .path()
                .expect("entry path")
                .to_string_lossy()
                .into_owned();
            let mode = entry.header().mode().expect("entry mode");
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).expect("entry body");
            (name, mode, bytes)
        })
        .collect()
}

fn member<'a>(members: &'a [(String, u32, Vec<u8>)], name: &str) -> &'a [u8] {
    members
        .iter()
        .find(|(member, _, _)| member == name)
        .map(|(_, _, bytes)| bytes.as_slice())
        .unwrap_or_else(|| panic!("member {name} missing"))
}

#[rstest]
fn gem_holds_exactly_data_then_metadata(temp_dir: TempDir, record: PomRecord) {
    let gem = assemble(&record, JAR, &params(&temp_dir)).expect("assembly succeeds");

    assert_eq!(gem, temp_dir.path().join("ant.ant-1.6.5-java.gem"));
    let members = tar_members(fs::File::open(&gem).expect("open gem"));
    let names: Vec<&str> = members.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(names, [DATA_MEMBER, METADATA_MEMBER]);
}

#[rstest]
fn data_archive_holds_sorted_lib_files(temp_dir: TempDir, record: PomRecord) {
    let gem = assemble(&record, JAR, &params(&temp_dir)).expect("assembly succeeds");
    let outer = tar_members(fs::File::open(&gem).expect("open gem"));
    let data = tar_members(GzDecoder::new(member(&outer, DATA_MEMBER)));

    let names: Vec<&str> = data.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(names, ["lib/ant-1.6.5.jar", "lib/ant.rb"]);
    assert!(data.iter().all(|(_, mode, _)| *mode == 0o644));
    assert_eq!(member(&data, "lib/ant-1.6.5.jar"), JAR);
    let loader = String::from_utf8(member(&data, "lib/ant.rb").to_vec()).expect("UTF-8 loader");
    assert!(loader.starts_with("module Ant\n"));
}

#[rstest]
fn metadata_decompresses_to_specification(temp_dir: TempDir, record: PomRecord) {
    let gem = assemble(&record, JAR, &params(&temp_dir)).expect("assembly succeeds");
    let outer = tar_members(fs::File::open(&gem).expect("open gem"));

    let mut yaml = String::new();
    GzDecoder::new(member(&outer, METADATA_MEMBER))
        .read_to_string(&mut yaml)
        .expect("gzipped YAML");
    assert_eq!(
        yaml,
        GemSpecification::from_record(&record)
            .to_yaml()
            .expect("serializes")
    );
}

#[rstest]
fn success_leaves_only_the_gem(temp_dir: TempDir, record: PomRecord) {
    assemble(&record, JAR, &params(&temp_dir)).expect("assembly succeeds");
    assert_eq!(dir_entries(temp_dir.path()), ["ant.ant-1.6.5-java.gem"]);
}

#[rstest]
fn reports_steps_in_order(temp_dir: TempDir, record: PomRecord) {
    let mut seen = Vec::new();
    assemble_with(&record, JAR, &params(&temp_dir), |step, path| {
        assert!(path.exists(), "{step} reported missing {}", path.display());
        seen.push(step);
        Ok(())
    })
    .expect("assembly succeeds");

    assert_eq!(
        seen,
        [
            AssemblyStep::Staged,
            AssemblyStep::JarWritten,
            AssemblyStep::LoaderWritten,
            AssemblyStep::MetadataWritten,
            AssemblyStep::MetadataCompressed,
            AssemblyStep::DataArchived,
            AssemblyStep::Packed,
        ]
    );
}

#[rstest]
fn metadata_is_replaced_by_its_compressed_form(temp_dir: TempDir, record: PomRecord) {
    assemble_with(&record, JAR, &params(&temp_dir), |step, path| {
        if step == AssemblyStep::MetadataCompressed {
            let staging = path.parent().expect("staging root");
            assert!(!staging.join(METADATA_FILE).exists());
        }
        Ok(())
    })
    .expect("assembly succeeds");
}

#[rstest]
#[case::staged(AssemblyStep::Staged)]
#[case::jar(AssemblyStep::JarWritten)]
#[case::loader(AssemblyStep::LoaderWritten)]
#[case::metadata(AssemblyStep::MetadataWritten)]
#[case::compressed(AssemblyStep::MetadataCompressed)]
#[case::data(AssemblyStep::DataArchived)]
#[case::packed(AssemblyStep::Packed)]
fn failure_at_any_step_leaves_nothing_behind(
    temp_dir: TempDir,
    record: PomRecord,
    #[case] failing: AssemblyStep,
) {
    let err = assemble_with(&record, JAR, &params(&temp_dir), |step, _| {
        if step == failing {
            return Err(PackagingError::Aborted {
                step,
                reason: "injected".to_owned(),
            });
        }
        Ok(())
    })
    .expect_err("injected failure");

    assert!(matches!(err, PackagingError::Aborted { step, .. } if step == failing));
    assert!(
        dir_entries(temp_dir.path()).is_empty(),
        "left behind: {:?}",
        dir_entries(temp_dir.path())
    );
}

#[rstest]
fn packed_archive_is_a_partial_file_until_published(temp_dir: TempDir, record: PomRecord) {
    let mut packed = None;
    let gem = assemble_with(&record, JAR, &params(&temp_dir), |step, path| {
        if step == AssemblyStep::Packed {
            assert!(path.is_file(), "{} must exist while packing", path.display());
            packed = Some(path.to_path_buf());
        }
        Ok(())
    })
    .expect("assembly succeeds");

    let packed = packed.expect("packed step reported");
    assert_eq!(packed.parent(), Some(temp_dir.path()));
    let name = packed.file_name().expect("file name").to_string_lossy().into_owned();
    assert!(name.starts_with("ant.ant-1.6.5-java.gem"), "{name}");
    assert!(name.ends_with(".partial"), "{name}");
    assert!(!packed.exists());
    assert!(gem.is_file());
}

#[cfg(unix)]
#[rstest]
fn published_gem_is_world_readable(temp_dir: TempDir, record: PomRecord) {
    use std::os::unix::fs::PermissionsExt;

    let gem = assemble(&record, JAR, &params(&temp_dir)).expect("assembly succeeds");
    let mode = fs::metadata(&gem).expect("gem metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[rstest]
fn creates_missing_output_dir(temp_dir: TempDir, record: PomRecord) {
    let params = PackageParams {
        output_dir: temp_dir.path().join("gems").join("java"),
    };
    let gem = assemble(&record, JAR, &params).expect("assembly succeeds");
    assert_eq!(dir_entries(&params.output_dir), ["ant.ant-1.6.5-java.gem"]);
    assert!(gem.is_file());
}

#[rstest]
fn rebuild_overwrites_existing_gem(temp_dir: TempDir, record: PomRecord) {
    let gem_path = temp_dir.path().join("ant.ant-1.6.5-java.gem");
    fs::write(&gem_path, b"stale").expect("stale gem");

    assemble(&record, JAR, &params(&temp_dir)).expect("assembly succeeds");
    let members = tar_members(fs::File::open(&gem_path).expect("open gem"));
    assert_eq!(members.len(), 2);
}

#[rstest]
fn missing_output_dir_is_an_io_error(temp_dir: TempDir, record: PomRecord) {
    let params = PackageParams {
        output_dir: temp_dir.path().join("absent").join("deeper"),
    };
    // create_dir_all builds the missing parents, so point at a file instead.
    fs::write(temp_dir.path().join("absent"), b"file").expect("blocking file");

    let err = assemble(&record, JAR, &params).expect_err("output dir is unusable");
    assert!(matches!(err, PackagingError::Io(_)));
}
