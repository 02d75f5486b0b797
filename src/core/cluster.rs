use crate::{cli::ClusterArgs, core::variant::Variant};
use std::cmp::Ordering;

/// Collapses runs of variants whose padded windows transitively overlap.
///
/// The sweep always compares the *running merged* variant against the *next
/// raw* variant, so a merged window that has grown wider can absorb variants
/// the first member alone would never have reached. Three variants A, B, C
/// where only A/B overlap directly still end up in one cluster once the
/// merged AB window reaches C.
///
/// Input is expected in ascending `(chrom, pos)` order; out-of-order input
/// is sorted first (see [`ensure_sorted`]). Output clusters keep the input
/// order of their first member. With `combine_nearby` disabled the input
/// passes through untouched, one cluster per variant.
pub fn cluster_variants(variants: Vec<Variant>, args: &ClusterArgs) -> Vec<Variant> {
    if !args.combine_nearby {
        return variants;
    }

    let variants = ensure_sorted(variants);
    let mut clusters = Vec::with_capacity(variants.len());

    let mut iter = variants.into_iter();
    let Some(mut current) = iter.next() else {
        return clusters;
    };
    for variant in iter {
        if current.overlaps(&variant, args.padding) {
            current = current.combine(&variant);
        } else {
            clusters.push(std::mem::replace(&mut current, variant));
        }
    }
    clusters.push(current);

    clusters
}

fn compare_coordinates(a: &Variant, b: &Variant) -> Ordering {
    a.chrom.cmp(&b.chrom).then_with(|| a.pos.cmp(&b.pos))
}

/// Returns the variants in ascending `(chrom, pos)` order.
///
/// Already-sorted input is passed through without reordering. The sweep in
/// [`cluster_variants`] silently under-merges on unsorted input, so a stable
/// sort is applied (and a warning logged) when the precondition fails.
fn ensure_sorted(mut variants: Vec<Variant>) -> Vec<Variant> {
    let sorted = variants
        .windows(2)
        .all(|pair| compare_coordinates(&pair[0], &pair[1]) != Ordering::Greater);
    if !sorted {
        log::warn!("Variants are not sorted by (chromosome, position); sorting before clustering");
        variants.sort_by(compare_coordinates);
    }
    variants
}
