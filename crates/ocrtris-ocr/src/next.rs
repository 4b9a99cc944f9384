use ocrtris_engine::PieceKind;

use crate::{
    grid::{NextGrid, closest},
    recognition::Recognition,
};

/// Reference renderings of each piece in the next box, in canonical order.
///
/// Cells are half a block wide, so a three-wide piece spans six columns
/// centred in the eight-column grid. The I-piece is drawn half a block lower
/// by some captures and has two references.
const NEXT_TEMPLATES: [(PieceKind, [&str; 4]); 8] = [
    (PieceKind::I, ["........", "XXXXXXXX", "XXXXXXXX", "........"]),
    (PieceKind::I, ["........", "........", "XXXXXXXX", "XXXXXXXX"]),
    (PieceKind::O, ["..XXXX..", "..XXXX..", "..XXXX..", "..XXXX.."]),
    (PieceKind::S, ["...XXXX.", "...XXXX.", ".XXXX...", ".XXXX..."]),
    (PieceKind::Z, [".XXXX...", ".XXXX...", "...XXXX.", "...XXXX."]),
    (PieceKind::J, [".XXXXXX.", ".XXXXXX.", ".....XX.", ".....XX."]),
    (PieceKind::L, [".XXXXXX.", ".XXXXXX.", ".XX.....", ".XX....."]),
    (PieceKind::T, [".XXXXXX.", ".XXXXXX.", "...XX...", "...XX..."]),
];

/// A reference bitmap for one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextTemplate {
    pub kind: PieceKind,
    pub grid: NextGrid,
}

/// Classifies the next-box grid by nearest reference bitmap.
///
/// Distance is the number of mismatching cells. The closest template wins,
/// earlier templates winning ties, and anything farther than
/// `max_distance` from every template is unrecognized.
///
/// # Example
///
/// ```
/// use ocrtris_engine::PieceKind;
/// use ocrtris_ocr::{NextClassifier, NextGrid, Recognition};
///
/// let classifier = NextClassifier::new(4);
/// let grid = NextGrid::from_art(["..XXXX..", "..XXXX..", "..XXXX..", "..XXX..."]);
/// assert_eq!(classifier.classify(&grid), Recognition::Recognized(PieceKind::O));
/// assert_eq!(classifier.classify(&NextGrid::DARK), Recognition::Unrecognized);
/// ```
#[derive(Debug, Clone)]
pub struct NextClassifier {
    templates: Vec<NextTemplate>,
    max_distance: usize,
}

impl Default for NextClassifier {
    fn default() -> Self {
        Self::new(4)
    }
}

impl NextClassifier {
    /// Creates a classifier with the built-in templates.
    #[must_use]
    pub fn new(max_distance: usize) -> Self {
        let templates = NEXT_TEMPLATES
            .iter()
            .map(|&(kind, art)| NextTemplate {
                kind,
                grid: NextGrid::from_art(art),
            })
            .collect();
        Self::with_templates(templates, max_distance)
    }

    /// Creates a classifier with custom templates, tried in the given order.
    #[must_use]
    pub fn with_templates(templates: Vec<NextTemplate>, max_distance: usize) -> Self {
        Self {
            templates,
            max_distance,
        }
    }

    #[must_use]
    pub fn templates(&self) -> &[NextTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    #[must_use]
    pub fn classify(&self, grid: &NextGrid) -> Recognition<PieceKind> {
        let best = closest(grid, self.templates.iter().map(|t| (t.kind, &t.grid)));
        match best {
            Some((kind, distance)) if distance <= self.max_distance => Recognition::Recognized(kind),
            _ => Recognition::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_templates_classify() {
        let classifier = NextClassifier::default();
        for template in classifier.templates() {
            assert_eq!(
                classifier.classify(&template.grid),
                Recognition::Recognized(template.kind)
            );
        }
    }

    #[test]
    fn test_templates_are_well_separated() {
        let classifier = NextClassifier::default();
        let templates = classifier.templates();
        for (i, a) in templates.iter().enumerate() {
            for b in &templates[i + 1..] {
                if a.kind != b.kind {
                    assert!(
                        a.grid.distance(&b.grid) > 2 * classifier.max_distance() - 1,
                        "{:?} and {:?} are too close",
                        a.kind,
                        b.kind
                    );
                }
            }
        }
    }

    #[test]
    fn test_noisy_t_piece() {
        let classifier = NextClassifier::default();
        let grid = NextGrid::from_art([".XXXXXX.", "XXXXXXX.", "...XX...", "...X...."]);
        assert_eq!(classifier.classify(&grid), Recognition::Recognized(PieceKind::T));
    }

    #[test]
    fn test_unrelated_grids_are_unrecognized() {
        let classifier = NextClassifier::default();
        let all_bright = NextGrid::from_art(["XXXXXXXX"; 4]);
        let checker = NextGrid::from_art(["X.X.X.X.", ".X.X.X.X", "X.X.X.X.", ".X.X.X.X"]);
        assert_eq!(classifier.classify(&NextGrid::DARK), Recognition::Unrecognized);
        assert_eq!(classifier.classify(&all_bright), Recognition::Unrecognized);
        assert_eq!(classifier.classify(&checker), Recognition::Unrecognized);
    }

    #[test]
    fn test_tie_breaks_by_template_order() {
        // Equidistant from J, L and T: the J template comes first
        let grid = NextGrid::from_art([".XXXXXX.", ".XXXXXX.", "........", "........"]);
        let classifier = NextClassifier::new(4);
        assert_eq!(classifier.classify(&grid), Recognition::Recognized(PieceKind::J));
    }

    #[test]
    fn test_custom_threshold() {
        let grid = NextGrid::from_art(["..XXXX..", "..XXXX..", "..XX....", "..XX...."]);
        assert_eq!(NextClassifier::new(3).classify(&grid), Recognition::Unrecognized);
        assert_eq!(
            NextClassifier::new(4).classify(&grid),
            Recognition::Recognized(PieceKind::O)
        );
    }
}
