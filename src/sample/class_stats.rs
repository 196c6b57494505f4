use super::{sign, WeightMatrix};


/// Per-class statistics of the current weights.
///
/// For each class `c`,
/// ```txt
/// den[c]  = sum_i w[i][c],
/// num[c]  = sum_i w[i][c] * z[i][c],
/// bias[c] = num[c] / den[c],
/// ```
/// where `z[i][c]` is `+1` if the label of sample `i` is `c`
/// and `-1` otherwise.
/// `bias[c]` is the constant response of class `c`
/// when the class does not share the weak rule of a round.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    num: Vec<f64>,
    den: Vec<f64>,
    bias: Vec<f64>,
}


impl ClassStats {
    /// Computes the statistics from the weights
    /// and the classes of the training samples.
    pub fn from_weights(weights: &WeightMatrix, classes: &[usize]) -> Self {
        let n_classes = weights.n_classes();
        let mut num = vec![0f64; n_classes];
        let mut den = vec![0f64; n_classes];

        weights.rows()
            .zip(classes)
            .for_each(|(row, &label)| {
                row.iter()
                    .enumerate()
                    .for_each(|(c, &w)| {
                        num[c] += sign(label, c) * w;
                        den[c] += w;
                    });
            });

        let bias = num.iter()
            .zip(&den)
            .map(|(n, d)| if *d > 0f64 { n / d } else { 0f64 })
            .collect();

        Self { num, den, bias }
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.bias.len()
    }


    /// Returns `sum_i w[i][c] * z[i][c]` for each class.
    #[inline]
    pub fn num(&self) -> &[f64] {
        &self.num
    }


    /// Returns `sum_i w[i][c]` for each class.
    #[inline]
    pub fn den(&self) -> &[f64] {
        &self.den
    }


    /// Returns the per-class bias `num[c] / den[c]`.
    #[inline]
    pub fn bias(&self) -> &[f64] {
        &self.bias
    }


    /// Weighted squared error of the constant response `bias[c]`
    /// on class `c`. Recall that `z * z = 1`, so
    /// ```txt
    /// sum_i w (z - k)^2 = den - 2 k num + k^2 den.
    /// ```
    #[inline]
    pub fn constant_error(&self, class: usize) -> f64 {
        let k = self.bias[class];
        self.den[class] - 2f64 * k * self.num[class] + k * k * self.den[class]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_stats_01() {
        let weights = WeightMatrix::new(4, 2);
        let stats = ClassStats::from_weights(&weights, &[0, 0, 0, 1]);

        assert_eq!(stats.den(), &[4.0, 4.0]);
        assert_eq!(stats.num(), &[2.0, -2.0]);
        assert_eq!(stats.bias(), &[0.5, -0.5]);

        // 3 * (1 - 0.5)^2 + (-1 - 0.5)^2 = 3
        assert!((stats.constant_error(0) - 3.0).abs() < 1e-12);
    }
}
