use crate::common::checker;
use crate::error::{BoostError, Result};


/// Class labels of a training sample.
/// Each label is either a class in `[0, n_classes)` or `None`,
/// which excludes the sample from training
/// (e.g., an ambiguous pixel on an object boundary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    labels: Vec<Option<usize>>,
    n_classes: usize,
}


impl Labels {
    /// Construct a new instance of [`Labels`].
    /// Returns an error if `n_classes == 0`
    /// or a label is not smaller than `n_classes`.
    pub fn new(labels: Vec<Option<usize>>, n_classes: usize) -> Result<Self> {
        checker::n_classes(n_classes)?;

        let out_of_range = labels.iter()
            .enumerate()
            .find_map(|(index, label)| match label {
                Some(c) if *c >= n_classes => Some((index, *c)),
                _ => None,
            });
        if let Some((index, label)) = out_of_range {
            return Err(BoostError::LabelOutOfRange {
                index,
                label: label as i64,
                n_classes,
            });
        }

        Ok(Self { labels, n_classes })
    }


    /// Convert signed labels into [`Labels`].
    /// A negative label means "exclude this sample".
    pub fn from_signed<T>(labels: &[T], n_classes: usize) -> Result<Self>
        where T: Copy + Into<i64>,
    {
        checker::n_classes(n_classes)?;

        let labels = labels.iter()
            .copied()
            .enumerate()
            .map(|(index, label)| {
                let label: i64 = label.into();
                if label < 0 {
                    Ok(None)
                } else if label as u64 >= n_classes as u64 {
                    Err(BoostError::LabelOutOfRange { index, label, n_classes })
                } else {
                    Ok(Some(label as usize))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { labels, n_classes })
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Returns the number of labels, excluded ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }


    /// Returns `true` if there is no label.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }


    /// Returns the label of the `i`-th sample.
    #[inline]
    pub fn get(&self, i: usize) -> Option<usize> {
        self.labels.get(i).copied().flatten()
    }


    /// Returns the pairs `(index, class)` of the samples used for training.
    pub fn included(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.labels.iter()
            .enumerate()
            .filter_map(|(i, label)| label.map(|c| (i, c)))
    }


    /// Returns the number of samples used for training.
    pub fn n_included(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signed_01() {
        let labels = Labels::from_signed(&[0_i8, -1, 2, 1], 3).unwrap();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels.n_included(), 3);
        assert_eq!(labels.get(1), None);
        assert_eq!(
            labels.included().collect::<Vec<_>>(),
            vec![(0, 0), (2, 2), (3, 1)],
        );
    }

    #[test]
    fn test_from_signed_failure_01() {
        let res = Labels::from_signed(&[0_i8, 3], 3);
        assert!(matches!(
            res,
            Err(BoostError::LabelOutOfRange { index: 1, label: 3, n_classes: 3 })
        ));
    }

    #[test]
    fn test_new_failure_01() {
        assert!(matches!(
            Labels::new(vec![Some(0)], 0),
            Err(BoostError::NoClasses)
        ));
    }
}
