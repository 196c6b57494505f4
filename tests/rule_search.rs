use rand::prelude::*;
use sharedboost::prelude::*;
use sharedboost::weak_learner::trial_seeds;


/// Tests for `RuleSearch`.
#[cfg(test)]
pub mod tests {
    use super::*;

    struct Fixture {
        data: Vec<Vec<f64>>,
        classes: Vec<usize>,
        weights: WeightMatrix,
    }

    impl Fixture {
        fn new(n_sample: usize) -> Self {
            let mut rng = StdRng::seed_from_u64(2024);
            let data = (0..n_sample)
                .map(|_| (0..4).map(|_| rng.gen_range(-1.0..1.0)).collect())
                .collect::<Vec<Vec<f64>>>();
            // The class is decided by the first two channels.
            let classes = data.iter()
                .map(|x| if x[0] > 0.2 { 0 } else if x[1] > 0.0 { 1 } else { 2 })
                .collect::<Vec<usize>>();
            let weights = WeightMatrix::new(n_sample, 3);
            Self { data, classes, weights }
        }
    }


    fn search(n_candidates: usize) -> RuleSearch<ChannelRule<Vec<f64>>> {
        RuleSearch::<ChannelRule<Vec<f64>>>::new(ChannelConfig::new(vec![0..2, 2..4]))
            .candidates(n_candidates)
            .thresholds(10)
    }


    #[test]
    fn single_trial_reproduces_the_sampler() {
        let fx = Fixture::new(50);
        let data = fx.data.iter().collect::<Vec<_>>();
        let stats = ClassStats::from_weights(&fx.weights, &fx.classes);
        let view = WeightedSample::new(&data, &fx.classes, &fx.weights, &stats);

        let search = search(1);
        for seed in [0, 1, 1234, u64::MAX] {
            let produced = search.produce(&view, seed).unwrap();

            let mut rng = StdRng::seed_from_u64(trial_seeds(seed, 1)[0]);
            let sampler = CandidateSampler::<ChannelRule<Vec<f64>>>::new(search.config(), 10);
            let sampled = sampler.sample(&view, &mut rng);

            assert_eq!(produced, sampled);
            assert_eq!(produced, search.produce(&view, seed).unwrap());
        }
    }


    #[test]
    fn best_of_n_is_the_minimum_trial() {
        let fx = Fixture::new(80);
        let data = fx.data.iter().collect::<Vec<_>>();
        let stats = ClassStats::from_weights(&fx.weights, &fx.classes);
        let view = WeightedSample::new(&data, &fx.classes, &fx.weights, &stats);

        let search = search(12);
        let best = search.produce(&view, 99).unwrap();

        let sampler = CandidateSampler::<ChannelRule<Vec<f64>>>::new(search.config(), 10);
        let trials = trial_seeds(99, 12)
            .into_iter()
            .map(|s| sampler.sample(&view, &mut StdRng::seed_from_u64(s)))
            .collect::<Vec<_>>();

        let min = trials.iter()
            .map(|c| c.error)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(best.error, min);

        // The first trial with the minimum error wins.
        let first = trials.iter().find(|c| c.error == min).unwrap();
        assert_eq!(&best, first);
    }


    #[test]
    fn deterministic_across_thread_counts() {
        let fx = Fixture::new(60);
        let data = fx.data.iter().collect::<Vec<_>>();
        let stats = ClassStats::from_weights(&fx.weights, &fx.classes);
        let view = WeightedSample::new(&data, &fx.classes, &fx.weights, &stats);
        let search = search(32);

        let results = [1, 2, 8].map(|n_threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .unwrap()
                .install(|| search.produce(&view, 5).unwrap())
        });

        assert_eq!(results[0], results[1]);
        assert_eq!(results[0], results[2]);
    }
}
