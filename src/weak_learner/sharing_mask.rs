use fixedbitset::FixedBitSet;
use serde::{Serialize, Deserialize};

use std::fmt;


/// The set of classes that share the response `(a, b)` of a rule.
/// Classes outside the set respond with their constant bias instead.
/// The set has no upper bound on the number of classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharingMask(FixedBitSet);


impl SharingMask {
    /// Construct an empty set over `n_classes` classes.
    #[inline]
    pub fn empty(n_classes: usize) -> Self {
        Self(FixedBitSet::with_capacity(n_classes))
    }


    /// Construct the set of all `n_classes` classes.
    #[inline]
    pub fn full(n_classes: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(n_classes);
        bits.insert_range(..);
        Self(bits)
    }


    /// Construct a set from class indices.
    /// Indices not smaller than `n_classes` are ignored.
    pub fn from_classes<I>(n_classes: usize, classes: I) -> Self
        where I: IntoIterator<Item = usize>,
    {
        let mut mask = Self::empty(n_classes);
        classes.into_iter()
            .filter(|&c| c < n_classes)
            .for_each(|c| mask.0.insert(c));
        mask
    }


    /// Returns the number of classes this set is defined over.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if `class` shares the rule.
    #[inline]
    pub fn contains(&self, class: usize) -> bool {
        self.0.contains(class)
    }


    /// Returns a copy of `self` with `class` added.
    #[inline]
    pub fn with(&self, class: usize) -> Self {
        let mut bits = self.0.clone();
        bits.insert(class);
        Self(bits)
    }


    /// Returns the number of classes in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones(..)
    }


    /// Returns `true` if no class is in the set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns the classes in the set in ascending order.
    #[inline]
    pub fn classes(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.ones()
    }
}


impl fmt::Display for SharingMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classes = self.classes()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{classes}}}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharing_mask_01() {
        let mask = SharingMask::empty(3);
        assert!(mask.is_empty());
        assert_eq!(mask.n_classes(), 3);

        let mask = mask.with(2).with(0);
        assert_eq!(mask.len(), 2);
        assert!(mask.contains(0) && !mask.contains(1) && mask.contains(2));
        assert_eq!(mask.classes().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(mask.to_string(), "{0, 2}");
    }

    #[test]
    fn test_sharing_mask_02() {
        // More classes than a machine word.
        let mask = SharingMask::from_classes(130, [0, 64, 129, 200]);
        assert_eq!(mask.len(), 3);
        assert!(mask.contains(129));
        assert_eq!(SharingMask::full(130).len(), 130);
    }
}
