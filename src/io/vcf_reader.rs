use crate::{core::variant::Variant, error::IgvxError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

fn open_vcf_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path)
        .map_err(|error| crate::igvx_error!("Failed to open file {}: {error}", path.display()))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(IgvxError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Extracts a [`Variant`] from one VCF data line.
///
/// Only CHROM, POS and REF are consumed; the reference-allele length gives
/// the variant its extent. Everything else on the line is ignored.
pub fn line_to_variant(line: &str) -> Result<Variant> {
    const MIN_FIELD_COUNT: usize = 4;
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_FIELD_COUNT {
        return Err(crate::igvx_error!(
            "Expected at least {} tab-separated fields in the format 'CHROM POS ID REF ...', found {}: {}",
            MIN_FIELD_COUNT,
            fields.len(),
            line
        ));
    }

    let chrom = fields[0];
    if chrom.is_empty() {
        return Err(crate::igvx_error!("CHROM field is empty: {}", line));
    }

    let pos: i64 = fields[1]
        .parse()
        .map_err(|e| crate::igvx_error!("Invalid variant position '{}': {}", fields[1], e))?;
    if pos < 1 {
        return Err(crate::igvx_error!(
            "Variant position {} must be greater than or equal to 1 (1-based)",
            pos
        ));
    }

    let ref_allele = fields[3];
    if ref_allele.is_empty() {
        return Err(crate::igvx_error!("REF field is empty: {}", line));
    }

    Ok(Variant::new(chrom, pos, ref_allele.len() as i64))
}

/// Loads the variants of a plain or gzipped VCF file in file order.
///
/// Header and comment lines (leading `#`) and blank lines are skipped;
/// anything else that fails to parse is fatal.
pub fn load_variants<P: AsRef<Path>>(vcf_path: P) -> Result<Vec<Variant>> {
    let path = vcf_path.as_ref();
    log::trace!("Start loading VCF {:?}", path);
    let reader = open_vcf_reader(path)?;

    let mut variants = Vec::new();
    for (line_number, result_line) in reader.lines().enumerate() {
        let line = result_line
            .map_err(|e| crate::igvx_error!("Error at VCF line {}: {}", line_number + 1, e))?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let variant = line_to_variant(&line)
            .map_err(|e| crate::igvx_error!("Error at VCF line {}: {}", line_number + 1, e))?;
        variants.push(variant);
    }

    log::trace!("Finished loading VCF {:?}", path);
    Ok(variants)
}
