use crate::{
    cli::BatchArgs,
    core::cluster::cluster_variants,
    error::IgvxError,
    io::{batch_writer::BatchWriter, vcf_reader::load_variants},
    utils::util::{absolute_path, format_number_with_commas, Result},
};
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

fn add_extension(path: &Path, ext: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    let new_ext: OsString = match path.extension() {
        Some(old) => {
            let mut s = old.to_os_string();
            s.push(".");
            s.push(ext);
            s
        }
        None => OsString::from(ext),
    };
    out.set_extension(new_ext);
    out
}

/// IGV needs the alignment index next to the BAM to jump between regions.
/// Both index spellings are accepted: `sample.bam.bai` and `sample.bai`.
fn check_alignment_index(aln: &Path) -> Result<()> {
    let bai_path = add_extension(aln, "bai");
    if bai_path.exists() || aln.with_extension("bai").exists() {
        return Ok(());
    }
    Err(IgvxError::MissingAlignmentIndex {
        bai_path,
        aln_path: aln.to_path_buf(),
    })
}

/// Recreates the snapshot directory, clearing leftovers from earlier runs so
/// stale screenshots never mix with the current set.
fn prepare_snapshot_dir(out_prefix: &str) -> Result<PathBuf> {
    let dir = absolute_path(Path::new(out_prefix))?;
    if dir.exists() {
        log::debug!("Clearing existing snapshot directory {}", dir.display());
        fs::remove_dir_all(&dir).map_err(|e| {
            crate::igvx_error!(
                "Failed to clear snapshot directory {}: {}",
                dir.display(),
                e
            )
        })?;
    }
    fs::create_dir_all(&dir).map_err(|e| {
        crate::igvx_error!(
            "Failed to create snapshot directory {}: {}",
            dir.display(),
            e
        )
    })?;
    Ok(dir)
}

pub fn batch(args: BatchArgs) -> Result<()> {
    check_alignment_index(&args.aln)?;

    let variants = load_variants(&args.vcf)?;
    log::info!(
        "Loaded {} variants from {}",
        format_number_with_commas(variants.len()),
        args.vcf.display()
    );

    let clusters = cluster_variants(variants, &args.cluster_args);
    log::info!(
        "Emitting {} snapshot windows",
        format_number_with_commas(clusters.len())
    );

    let snapshot_dir = prepare_snapshot_dir(&args.out_prefix)?;
    let script_path = args.batch_script_path();
    let mut writer = BatchWriter::create(&script_path)?;
    writer.write_session_setup(
        &absolute_path(&args.genome)?,
        &absolute_path(&args.aln)?,
        &snapshot_dir,
    )?;
    for cluster in &clusters {
        writer.write_snapshot(cluster, args.cluster_args.padding, args.squish)?;
    }
    writer.finish()?;

    log::info!("Wrote IGV batch script to {}", script_path.display());
    Ok(())
}
