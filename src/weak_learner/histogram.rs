use crate::sample::{sign, WeightMatrix};


/// Per-bin, per-class weighted sums of a single candidate.
///
/// For thresholds `t[0] <= .. <= t[T-1]`,
/// bin `k` holds the samples whose response `v` satisfies
/// `t[k-1] < v <= t[k]`,
/// where `t[-1] = -inf` and `t[T] = +inf`.
/// So there are `T + 1` bins and the samples in bins `0..=k`
/// are exactly the ones that do **not** fire at threshold `t[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedHistogram {
    n_classes: usize,
    n_bins: usize,
    // `wi[bin * n_classes + c]`
    wi: Vec<f64>,
    // `wizi[bin * n_classes + c]`
    wizi: Vec<f64>,
}


impl WeightedHistogram {
    /// Buckets the weights of every sample by its response `values`.
    /// `thresholds` must be sorted in ascending order.
    pub fn build(
        values: &[f64],
        thresholds: &[f64],
        classes: &[usize],
        weights: &WeightMatrix,
    ) -> Self
    {
        let n_classes = weights.n_classes();
        let n_bins = thresholds.len() + 1;
        let mut wi = vec![0f64; n_bins * n_classes];
        let mut wizi = vec![0f64; n_bins * n_classes];

        values.iter()
            .zip(classes)
            .zip(weights.rows())
            .for_each(|((&v, &label), row)| {
                let bin = thresholds.partition_point(|&t| t < v);
                let offset = bin * n_classes;
                row.iter()
                    .enumerate()
                    .for_each(|(c, &w)| {
                        wi[offset + c] += w;
                        wizi[offset + c] += sign(label, c) * w;
                    });
            });

        Self { n_classes, n_bins, wi, wizi }
    }


    /// Returns the number of bins.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Returns `sum w[i][c]` over the samples in `bin`, for each class.
    #[inline]
    pub fn wi(&self, bin: usize) -> &[f64] {
        let start = bin * self.n_classes;
        &self.wi[start..start + self.n_classes]
    }


    /// Returns `sum w[i][c] * z[i][c]` over the samples in `bin`,
    /// for each class.
    #[inline]
    pub fn wizi(&self, bin: usize) -> &[f64] {
        let start = bin * self.n_classes;
        &self.wizi[start..start + self.n_classes]
    }
}
