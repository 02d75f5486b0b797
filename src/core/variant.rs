use std::fmt;

/// A single variant call, or a run of nearby calls that were collapsed into
/// one screenshot window.
///
/// Variants and clusters share this one shape: a cluster is simply a variant
/// whose `positions` list carries more than one member. `pos` is 1-based and
/// `ref_len` is the length of the reference allele, so the unpadded extent is
/// `[pos, pos + ref_len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub chrom: String,
    pub pos: i64,
    pub ref_len: i64,
    // Member positions, ascending and never empty.
    positions: Vec<i64>,
}

impl Variant {
    pub fn new(chrom: impl Into<String>, pos: i64, ref_len: i64) -> Self {
        Variant {
            chrom: chrom.into(),
            pos,
            ref_len,
            positions: vec![pos],
        }
    }

    /// End of the reference allele, `pos + ref_len`.
    pub fn end(&self) -> i64 {
        self.pos + self.ref_len
    }

    /// Original input positions absorbed into this variant, ascending.
    pub fn positions(&self) -> &[i64] {
        &self.positions
    }

    /// The padded genomic interval framing this variant in the viewer.
    /// The start is clamped so windows never reach below coordinate 1.
    pub fn window(&self, padding: i64) -> (i64, i64) {
        ((self.pos - padding).max(1), self.end() + padding)
    }

    /// Whether the padded windows of two variants intersect or touch at a
    /// boundary. Variants on different chromosomes never overlap.
    pub fn overlaps(&self, other: &Variant, padding: i64) -> bool {
        if self.chrom != other.chrom {
            return false;
        }
        let (start, end) = self.window(padding);
        let (other_start, other_end) = other.window(padding);
        if end < other_start {
            return false;
        }
        if start > other_end {
            return false;
        }
        true
    }

    /// Collapses two variants into one spanning both reference extents.
    ///
    /// Performs no overlap check of its own; the caller decides adjacency.
    /// Member positions of both inputs are carried over in ascending order,
    /// and padding is applied afresh to the merged extent when its window is
    /// computed, never accumulated per member.
    pub fn combine(&self, other: &Variant) -> Variant {
        let pos = self.pos.min(other.pos);
        let end = self.end().max(other.end());
        let mut positions: Vec<i64> = self
            .positions
            .iter()
            .chain(other.positions.iter())
            .copied()
            .collect();
        positions.sort_unstable();
        Variant {
            chrom: self.chrom.clone(),
            pos,
            ref_len: end - pos,
            positions,
        }
    }

    /// Identifier used as the snapshot filename stem, e.g. `chr1_100_140`.
    ///
    /// Member positions are ascending, so the same membership always yields
    /// the same identifier, and distinct clusters within a run never collide.
    pub fn id(&self) -> String {
        let mut id = self.chrom.clone();
        for pos in &self.positions {
            id.push('_');
            id.push_str(&pos.to_string());
        }
        id
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "(chrom: {}, pos: {}, ref_len: {}, members: {})",
            self.chrom,
            self.pos,
            self.ref_len,
            self.positions.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_padded_on_both_sides() {
        let v = Variant::new("1", 100, 1);
        assert_eq!(v.window(50), (50, 151));
        assert_eq!(v.window(0), (100, 101));
    }

    #[test]
    fn test_window_start_is_clamped_at_one() {
        let v = Variant::new("1", 10, 1);
        assert_eq!(v.window(50), (1, 61));
    }

    #[test]
    fn test_overlaps_is_symmetric_and_inclusive_at_boundaries() {
        // Windows (50, 151) and (151, 252) touch at 151.
        let a = Variant::new("1", 100, 1);
        let b = Variant::new("1", 201, 1);
        assert!(a.overlaps(&b, 50));
        assert!(b.overlaps(&a, 50));

        // Windows (50, 151) and (152, 253) are disjoint by one base.
        let c = Variant::new("1", 202, 1);
        assert!(!a.overlaps(&c, 50));
        assert!(!c.overlaps(&a, 50));
    }

    #[test]
    fn test_overlaps_never_crosses_chromosomes() {
        let a = Variant::new("1", 100, 1);
        let b = Variant::new("2", 100, 1);
        assert!(!a.overlaps(&b, 1_000_000));
    }

    #[test]
    fn test_combine_spans_both_extents_and_sorts_members() {
        let a = Variant::new("1", 140, 1);
        let b = Variant::new("1", 100, 5);
        let merged = a.combine(&b);

        assert_eq!(merged.chrom, "1");
        assert_eq!(merged.pos, 100);
        assert_eq!(merged.end(), 141);
        assert_eq!(merged.ref_len, 41);
        assert_eq!(merged.positions(), &[100, 140]);
    }

    #[test]
    fn test_combine_applies_padding_once_at_the_merged_level() {
        let a = Variant::new("1", 100, 1);
        let b = Variant::new("1", 140, 1);
        let merged = a.combine(&b);
        // Padded once around the merged extent [100, 141), not per member.
        assert_eq!(merged.window(50), (50, 191));
    }

    #[test]
    fn test_id_concatenates_chromosome_and_member_positions() {
        let a = Variant::new("chr1", 100, 1);
        assert_eq!(a.id(), "chr1_100");

        let merged = a.combine(&Variant::new("chr1", 140, 1));
        assert_eq!(merged.id(), "chr1_100_140");
    }
}
