use crate::sample::ClassStats;
use super::{
    SharingMask,
    WeightedHistogram,
    Split,
    optimize_weak,
};


/// A split together with the classes sharing it.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedSplit {
    /// The classes sharing `(a, b)`.
    pub mask: SharingMask,
    /// The optimal split for `mask`.
    pub split: Split,
}


/// Greedy forward selection of the sharing classes.
///
/// Starting from the empty set, each step adds the single class
/// that yields the smallest error when added,
/// until all classes are shared.
/// This builds a chain of nested masks; the best split
/// found anywhere along the chain is returned.
/// On equal errors, the class of smaller index is preferred.
///
/// Returns `None` if there are no classes.
pub fn select_sharing(
    hist: &WeightedHistogram,
    stats: &ClassStats,
) -> Option<SharedSplit>
{
    let n_classes = stats.n_classes();
    let mut mask = SharingMask::empty(n_classes);
    let mut best: Option<SharedSplit> = None;

    for _ in 0..n_classes {
        let mut step: Option<SharedSplit> = None;
        for c in (0..n_classes).filter(|&c| !mask.contains(c)) {
            let tentative = mask.with(c);
            let split = optimize_weak(hist, stats, &tentative);

            if step.as_ref().map_or(true, |s| split.error < s.split.error) {
                step = Some(SharedSplit { mask: tentative, split });
            }
        }

        let Some(step) = step else { break; };

        mask = step.mask.clone();
        if best.as_ref().map_or(true, |b| step.split.error < b.split.error) {
            best = Some(step);
        }
    }

    best
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::WeightMatrix;

    fn setup(values: &[f64], thresholds: &[f64], classes: &[usize], n_classes: usize)
        -> (WeightedHistogram, ClassStats)
    {
        let weights = WeightMatrix::new(values.len(), n_classes);
        let hist = WeightedHistogram::build(values, thresholds, classes, &weights);
        let stats = ClassStats::from_weights(&weights, classes);
        (hist, stats)
    }


    #[test]
    fn test_select_sharing_01() {
        let values = [0.0, 1.0, 2.0, 3.0];
        let classes = [0, 0, 1, 1];
        let (hist, stats) = setup(&values, &[1.5], &classes, 2);

        let best = select_sharing(&hist, &stats).unwrap();
        // {0} and {1} tie with error 4.
        // Sharing {0, 1} is worse since the two classes have opposite signs.
        assert_eq!(best.mask, SharingMask::from_classes(2, [0]));
        assert_eq!(best.split.threshold_id, 1);
        assert!((best.split.error - 4.0).abs() < 1e-12);
    }


    #[test]
    fn test_select_sharing_not_worse_than_singletons_01() {
        let values = [0.3, -1.0, 2.0, 0.7, 5.0, 1.1, 0.0, 2.2, 4.0];
        let classes = [0, 1, 2, 0, 2, 1, 1, 3, 3];
        let thresholds = [-0.5, 0.5, 1.0, 2.1, 3.0];
        let (hist, stats) = setup(&values, &thresholds, &classes, 4);

        let best = select_sharing(&hist, &stats).unwrap();
        let best_singleton = (0..4)
            .map(|c| {
                let mask = SharingMask::from_classes(4, [c]);
                optimize_weak(&hist, &stats, &mask).error
            })
            .fold(f64::INFINITY, f64::min);

        assert!(best.split.error <= best_singleton);
        assert!(!best.mask.is_empty());
    }


    #[test]
    fn test_select_sharing_tie_01() {
        // The same split is optimal for either class alone;
        // the smaller index wins.
        let values = [0.0, 1.0];
        let classes = [0, 1];
        let (hist, stats) = setup(&values, &[0.5], &classes, 2);

        let first = optimize_weak(&hist, &stats, &SharingMask::from_classes(2, [0]));
        let second = optimize_weak(&hist, &stats, &SharingMask::from_classes(2, [1]));
        assert!((first.error - second.error).abs() < 1e-12);

        let best = select_sharing(&hist, &stats).unwrap();
        assert!(best.mask.contains(0));
    }
}
