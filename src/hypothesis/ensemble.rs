use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::{
    WeakRule,
    common::utils,
};
use crate::error::{BoostError, Result};
use super::{Round, ScoreMap, OutputMode};


/// The trained model: an additive sequence of [`Round`]s.
///
/// The score of a pixel is the sum of the scores of all rounds.
/// [`JointBoost`](crate::JointBoost) appends one round per iteration;
/// after training, the ensemble is read-only.
///
/// # Example
/// ```no_run
/// use sharedboost::prelude::*;
///
/// let ensemble = Ensemble::<ChannelRule<Vec<f64>>>::load("model.json").unwrap();
///
/// let pixels: Vec<Vec<f64>> = vec![vec![0.0, 1.0], vec![2.0, 0.5]];
/// let scores = ensemble.score_map(&pixels, OutputMode::Probability);
/// for (i, p) in scores.pixels().enumerate() {
///     println!("pixel {i}: {p:?}");
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ensemble<R> {
    n_rounds: usize,
    n_classes: usize,
    rounds: Vec<Round<R>>,
}


impl<R> Ensemble<R> {
    /// Construct an empty ensemble over `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self { n_rounds: 0, n_classes, rounds: Vec::new() }
    }


    /// Appends a round.
    pub fn push(&mut self, round: Round<R>) -> Result<()> {
        if round.n_classes() != self.n_classes {
            return Err(BoostError::ClassMismatch {
                expected: self.n_classes,
                got: round.n_classes(),
            });
        }
        self.rounds.push(round);
        self.n_rounds = self.rounds.len();
        Ok(())
    }


    /// Returns the number of rounds.
    #[inline]
    pub fn n_rounds(&self) -> usize {
        self.n_rounds
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Returns the rounds.
    #[inline]
    pub fn rounds(&self) -> &[Round<R>] {
        &self.rounds
    }


    /// Returns `true` if the ensemble has no round.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }


    /// Check the consistency of a deserialized ensemble.
    fn validate(&self) -> Result<()> {
        if self.n_classes == 0 {
            return Err(BoostError::InvalidEnsemble("zero classes".into()));
        }

        if self.n_rounds != self.rounds.len() {
            let message = format!(
                "header says {} rounds, found {}", self.n_rounds, self.rounds.len()
            );
            return Err(BoostError::InvalidEnsemble(message));
        }

        for (k, round) in self.rounds.iter().enumerate() {
            if round.n_classes() != self.n_classes
                || round.mask().n_classes() != self.n_classes
            {
                let message = format!("round {k} does not have {} classes", self.n_classes);
                return Err(BoostError::InvalidEnsemble(message));
            }

            let finite = round.a().is_finite()
                && round.b().is_finite()
                && round.bias().iter().all(|v| v.is_finite());
            if !finite {
                let message = format!("round {k} has a non-finite parameter");
                return Err(BoostError::InvalidEnsemble(message));
            }
        }
        Ok(())
    }
}


impl<R: WeakRule> Ensemble<R> {
    /// Returns the raw additive score of every class on `data`.
    pub fn confidence(&self, data: &R::Data) -> Vec<f64> {
        let mut scores = vec![0f64; self.n_classes];
        self.rounds.iter()
            .for_each(|round| {
                round.accumulate(round.rule().fires(data), &mut scores);
            });
        scores
    }


    /// Returns the score of every class on `data`.
    pub fn score(&self, data: &R::Data, mode: OutputMode) -> Vec<f64> {
        let mut scores = self.confidence(data);
        if mode == OutputMode::Probability {
            utils::softmax(&mut scores);
        }
        scores
    }


    /// Returns the scores of every pixel of `data`.
    pub fn score_map(&self, data: &[R::Data], mode: OutputMode) -> ScoreMap {
        let scores = data.par_iter()
            .flat_map_iter(|x| self.score(x, mode))
            .collect::<Vec<_>>();
        ScoreMap::new(self.n_classes, scores)
    }


    /// Returns the class of maximum score on `data`.
    pub fn predict(&self, data: &R::Data) -> usize {
        utils::argmax(&self.confidence(data))
    }


    /// Returns the class of maximum score on every pixel of `data`.
    pub fn predict_all(&self, data: &[R::Data]) -> Vec<usize> {
        data.par_iter()
            .map(|x| self.predict(x))
            .collect()
    }
}


impl<R: Serialize> Ensemble<R> {
    /// Writes the ensemble as JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }


    /// Writes the ensemble to `path` as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}


impl<R: DeserializeOwned> Ensemble<R> {
    /// Reads an ensemble written by [`Ensemble::to_writer`].
    pub fn from_reader<Rd: Read>(reader: Rd) -> Result<Self> {
        let ensemble: Self = serde_json::from_reader(reader)?;
        ensemble.validate()?;
        Ok(ensemble)
    }


    /// Reads an ensemble written by [`Ensemble::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelRule, SharingMask};

    fn ensemble() -> Ensemble<ChannelRule<f64>> {
        let mut ensemble = Ensemble::new(2);
        let mask = SharingMask::from_classes(2, [0]);
        let round = Round::new(ChannelRule::new(0, 1.5), mask, -2.0, 1.0, vec![0.0, 0.0], 4.0);
        ensemble.push(round).unwrap();
        ensemble
    }

    #[test]
    fn test_confidence_01() {
        let ensemble = ensemble();
        assert_eq!(ensemble.n_rounds(), 1);
        assert_eq!(ensemble.confidence(&0.0), vec![1.0, 0.0]);
        assert_eq!(ensemble.confidence(&3.0), vec![-1.0, 0.0]);
        assert_eq!(ensemble.predict_all(&[0.0, 1.0, 2.0, 3.0]), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_score_map_01() {
        let ensemble = ensemble();
        let map = ensemble.score_map(&[0.0, 3.0], OutputMode::Probability);
        assert_eq!(map.n_pixels(), 2);
        map.pixels()
            .for_each(|p| assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12));
        assert!(map.pixel(0)[0] > 0.5);
        assert!(map.pixel(1)[1] > 0.5);
    }

    #[test]
    fn test_push_failure_01() {
        let mut ensemble = ensemble();
        let round = Round::new(
            ChannelRule::new(0, 0.0), SharingMask::empty(3), 0.0, 0.0, vec![0.0; 3], 0.0
        );
        assert!(matches!(
            ensemble.push(round),
            Err(BoostError::ClassMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_always_fires_01() {
        let mut ensemble = Ensemble::new(2);
        let mask = SharingMask::from_classes(2, [1]);
        let rule = ChannelRule::new(0, crate::constants::ALWAYS_FIRES);
        let round = Round::new(rule, mask, 0.5, 0.0, vec![0.25, 0.0], 1.0);
        ensemble.push(round).unwrap();

        let mut buffer = Vec::new();
        ensemble.to_writer(&mut buffer).unwrap();
        let loaded = Ensemble::<ChannelRule<f64>>::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(loaded, ensemble);

        let expected = loaded.confidence(&0.0);
        assert_eq!(loaded.confidence(&f64::NEG_INFINITY), expected);
        assert_eq!(loaded.confidence(&f64::MIN), expected);
    }

    #[test]
    fn test_from_reader_failure_01() {
        let json = r#"{"n_rounds":2,"n_classes":2,"rounds":[]}"#;
        let result = Ensemble::<ChannelRule<f64>>::from_reader(json.as_bytes());
        assert!(matches!(result, Err(BoostError::InvalidEnsemble(_))));

        let result = Ensemble::<ChannelRule<f64>>::from_reader("not json".as_bytes());
        assert!(matches!(result, Err(BoostError::Json(_))));
    }
}
