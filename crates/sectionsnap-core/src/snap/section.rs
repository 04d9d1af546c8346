//! Section measurement
//!
//! A host reports the geometry of every element tagged as a snap target;
//! the registry turns that into an ordered, indexed `SectionList`. The list
//! is always rebuilt wholesale.

/// Geometry of one tagged element as reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetGeometry {
    /// Offset from the top of the document
    pub start_offset: f64,
    /// Rendered height
    pub height: f64,
}

impl TargetGeometry {
    pub fn new(start_offset: f64, height: f64) -> Self {
        Self {
            start_offset,
            height,
        }
    }
}

/// Host side of section measurement
pub trait LayoutSource {
    /// Geometry of every element tagged as a snap target, in any order
    fn snap_targets(&self) -> Vec<TargetGeometry>;

    /// Total scrollable height of the document
    fn document_height(&self) -> f64;
}

/// A contiguous vertical region designated as a snap target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub index: usize,
    pub start_offset: f64,
    pub height: f64,
}

/// Ordered sections plus the document extent needed to close the last one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionList {
    sections: Vec<Section>,
    document_height: f64,
}

impl SectionList {
    pub fn new(sections: Vec<Section>, document_height: f64) -> Self {
        Self {
            sections,
            document_height,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// End of a section: the next section's start, or the document end for the last one
    pub fn end_offset(&self, index: usize) -> Option<f64> {
        let section = self.sections.get(index)?;
        match self.sections.get(index + 1) {
            Some(next) => Some(next.start_offset),
            None => Some(
                (section.start_offset + section.height).max(self.document_height),
            ),
        }
    }

    /// Highest index whose start is at or above `offset`, or 0 when the
    /// offset lies above the first section
    pub fn locate(&self, offset: f64) -> Option<usize> {
        if self.sections.is_empty() {
            return None;
        }
        let after = self
            .sections
            .partition_point(|s| s.start_offset <= offset);
        Some(after.saturating_sub(1))
    }

    /// Whether `offset` falls inside the extent the sections span
    ///
    /// Space above the first section belongs to it, so only negative
    /// offsets and offsets past the last section's end are uncovered.
    pub fn covers(&self, offset: f64) -> bool {
        let (Some(first), Some(last_end)) = (
            self.sections.first(),
            self.end_offset(self.sections.len().saturating_sub(1)),
        ) else {
            return false;
        };
        offset >= first.start_offset.min(0.0) && offset <= last_end
    }
}

/// Builds the section list from a host's current layout
pub struct SectionRegistry;

impl SectionRegistry {
    /// Measure every snap target and return them ordered by document position
    ///
    /// Idempotent: an unchanged layout yields an identical list. Entries with
    /// non-finite geometry are skipped and negative heights read as zero.
    pub fn recompute(source: &impl LayoutSource) -> SectionList {
        let mut targets: Vec<TargetGeometry> = source
            .snap_targets()
            .into_iter()
            .filter(|t| t.start_offset.is_finite() && t.height.is_finite())
            .collect();

        // Stable, so equal starts keep host order
        targets.sort_by(|a, b| a.start_offset.total_cmp(&b.start_offset));

        let sections: Vec<Section> = targets
            .into_iter()
            .enumerate()
            .map(|(index, t)| Section {
                index,
                start_offset: t.start_offset,
                height: t.height.max(0.0),
            })
            .collect();

        let document_height = source.document_height();
        let document_height = if document_height.is_finite() {
            document_height.max(0.0)
        } else {
            0.0
        };

        tracing::debug!(count = sections.len(), document_height, "Recomputed sections");

        SectionList::new(sections, document_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLayout {
        targets: Vec<TargetGeometry>,
        height: f64,
    }

    impl LayoutSource for FixedLayout {
        fn snap_targets(&self) -> Vec<TargetGeometry> {
            self.targets.clone()
        }

        fn document_height(&self) -> f64 {
            self.height
        }
    }

    fn layout(starts: &[f64], height: f64) -> FixedLayout {
        let targets = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(height);
                TargetGeometry::new(start, end - start)
            })
            .collect();
        FixedLayout { targets, height }
    }

    #[test]
    fn test_recompute_orders_and_indexes() {
        let source = FixedLayout {
            targets: vec![
                TargetGeometry::new(800.0, 1200.0),
                TargetGeometry::new(0.0, 800.0),
                TargetGeometry::new(2000.0, 800.0),
            ],
            height: 2800.0,
        };
        let list = SectionRegistry::recompute(&source);
        let starts: Vec<f64> = list.iter().map(|s| s.start_offset).collect();
        let indices: Vec<usize> = list.iter().map(|s| s.index).collect();
        assert_eq!(starts, vec![0.0, 800.0, 2000.0]);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let source = layout(&[0.0, 800.0, 2000.0], 2800.0);
        let first = SectionRegistry::recompute(&source);
        let second = SectionRegistry::recompute(&source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_recompute_with_no_targets() {
        let source = FixedLayout {
            targets: Vec::new(),
            height: 500.0,
        };
        let list = SectionRegistry::recompute(&source);
        assert!(list.is_empty());
        assert_eq!(list.locate(100.0), None);
        assert!(!list.covers(100.0));
    }

    #[test]
    fn test_recompute_skips_non_finite_geometry() {
        let source = FixedLayout {
            targets: vec![
                TargetGeometry::new(f64::NAN, 10.0),
                TargetGeometry::new(0.0, -5.0),
            ],
            height: 100.0,
        };
        let list = SectionRegistry::recompute(&source);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).map(|s| s.height), Some(0.0));
    }

    #[test]
    fn test_end_offset_and_locate() {
        let list = SectionRegistry::recompute(&layout(&[0.0, 800.0, 2000.0], 2800.0));
        assert_eq!(list.end_offset(0), Some(800.0));
        assert_eq!(list.end_offset(2), Some(2800.0));
        assert_eq!(list.end_offset(3), None);

        assert_eq!(list.locate(0.0), Some(0));
        assert_eq!(list.locate(799.0), Some(0));
        assert_eq!(list.locate(800.0), Some(1));
        assert_eq!(list.locate(5000.0), Some(2));
        assert_eq!(list.locate(-50.0), Some(0));
    }

    #[test]
    fn test_covers() {
        let list = SectionRegistry::recompute(&layout(&[100.0, 800.0], 1600.0));
        assert!(!list.covers(-1.0));
        assert!(list.covers(50.0));
        assert!(list.covers(100.0));
        assert!(list.covers(1600.0));
        assert!(!list.covers(1601.0));
    }
}
