use colored::Colorize;

use crate::{
    Booster,
    WeakRule,
    WeakLearner,
    booster::RoundReport,
    constants::DEFAULT_PRINT_EVERY,
};
use crate::error::Result;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;

const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Round,Error,RecomputedError,Drift,SharedClasses,Time\n";


/// Implementing this trait allows you to use `Logger` to
/// log algorithm's behavor.
pub trait Research {
    /// Returns the report of the last finished round.
    fn last_report(&self) -> Option<&RoundReport>;
}


/// Struct `Logger` runs a boosting algorithm and
/// logs the error, the recomputed error, the drift
/// and the running time for each round.
///
/// # Example
/// ```no_run
/// use sharedboost::prelude::*;
///
/// let data: Vec<f64> = vec![0.0, 1.0, 2.0, 3.0];
/// let labels = Labels::new(vec![Some(0), Some(0), Some(1), Some(1)], 2).unwrap();
///
/// let booster = JointBoost::<ChannelRule<f64>>::init(&data, &labels)
///     .unwrap()
///     .rounds(10);
/// let weak_learner = RuleSearch::<ChannelRule<f64>>::new(ChannelConfig::new(vec![0..1]));
///
/// let mut logger = Logger::new(booster, weak_learner)
///     .print_every(1)
///     .time_limit_as_secs(60);
/// let ensemble = logger.run("jointboost.csv").unwrap();
/// ```
pub struct Logger<B, W> {
    booster: B,
    weak_learner: W,
    time_limit: u128,
    round: usize,
}


impl<B, W> Logger<B, W> {
    /// Create a new instance of `Logger`.
    pub fn new(booster: B, weak_learner: W) -> Self {
        Self {
            booster,
            weak_learner,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            round: DEFAULT_PRINT_EVERY,
        }
    }


    /// Returns the booster.
    pub fn booster(&self) -> &B {
        &self.booster
    }
}


impl<R, B, W> Logger<B, W>
    where R: WeakRule,
          B: Booster<R> + Research,
          W: WeakLearner<Rule = R>,
{
    /// Set the time limit for boosting algorithm as milliseconds.
    /// If the boosting algorithm reaches this limit,
    /// breaks immediately.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Set the time limit for boosting algorithm as seconds.
    /// If the boosting algorithm reaches this limit,
    /// breaks immediately.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(1_000);
        self
    }

    /// Set the time limit for boosting algorithm as minutes.
    /// If the boosting algorithm reaches this limit,
    /// breaks immediately.
    #[inline(always)]
    pub fn time_limit_as_mins(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(60_000);
        self
    }

    /// Set the interval to print the current status.
    /// By default, the method `run` prints its status every `100` rounds.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }

    #[inline(always)]
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "ROUND".bold().blue(),
            "RECOMP.".bold().green(),
            "SHARED".bold().yellow(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "ROUND".bold().red(),
            "ERROR".bold().blue(),
            "ERROR".bold().green(),
            "CLASSES".bold().yellow(),
            "TIME".bold().cyan(),
        );
    }

    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let limit = if self.time_limit != u128::MAX {
            time_format(self.time_limit)
        } else {
            "Nothing".into()
        };
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Booster".bold(),
            self.booster.name().bold().green(),
        );
        if let Some(info) = self.booster.info() {
            println!("{}", info_lines(info));
        }

        println!(
            "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Weak Learner".bold(),
            self.weak_learner.name().bold().green(),
        );
        if let Some(info) = self.weak_learner.info() {
            println!("{}", info_lines(info));
        }
        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Time Limit".bold(),
            limit.bold().green(),
            "".bold(),
        );
    }

    #[inline(always)]
    fn print_report(&self, tag: &str, report: &RoundReport, time_acc: u128) {
        println!(
            "{} {}\t\t{}\t{}\t{}\t{}",
            tag,
            format!("{:>WIDTH$}", report.iteration).red(),
            format!("{:>WIDTH$.PREC_WIDTH$}", report.error).blue(),
            format!("{:>WIDTH$.PREC_WIDTH$}", report.recomputed_error).green(),
            format!("{:>WIDTH$}", report.shared_classes).yellow(),
            time_format(time_acc).bold().cyan(),
        );
    }

    /// Run the given boosting algorithm with logging.
    /// Note that this method is almost the same as `Booster::run`.
    /// This method measures running time per iteration
    /// and writes one CSV line per round to `filename`.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P)
        -> Result<B::Output>
    {
        // Open file
        let mut file = File::create(filename)?;

        // Write header to the file
        file.write_all(HEADER.as_bytes())?;

        // ---------------------------------------------------------------------
        // Pre-processing
        self.booster.preprocess(&self.weak_learner)?;
        self.print_stats();

        // Cumulative time
        let mut time_acc = 0;

        // ---------------------------------------------------------------------
        // Boosting step
        let verbose = self.round != usize::MAX;
        if verbose { self.print_log_header(); }
        for iter in 1.. {
            // Start measuring time
            let now = Instant::now();

            let flow = self.booster.boost(&self.weak_learner, iter)?;

            // Stop measuring and convert `Duration` to Milliseconds.
            time_acc += now.elapsed().as_millis();

            let report = self.booster.last_report()
                .filter(|r| r.iteration == iter)
                .copied();

            if let Some(r) = report.as_ref() {
                // Write the results to `file`.
                let line = format!(
                    "{},{},{},{},{},{time_acc}\n",
                    r.iteration,
                    r.error,
                    r.recomputed_error,
                    r.drift,
                    r.shared_classes,
                );
                file.write_all(line.as_bytes())?;
            }

            if time_acc > self.time_limit {
                if let Some(r) = report.as_ref() {
                    self.print_report(&"[TLE]".bold().bright_red().to_string(), r, time_acc);
                    println!();
                }
                break;
            }

            if let Some(r) = report.as_ref() {
                if verbose && iter % self.round == 0 {
                    self.print_report(&"[LOG]".bold().magenta().to_string(), r, time_acc);
                }
            }

            if flow.is_break() {
                if let (true, Some(r)) = (verbose, self.booster.last_report()) {
                    self.print_report(&"[FIN]".bold().bright_green().to_string(), r, time_acc);
                    println!();
                }
                break;
            }
        }

        self.booster.postprocess()
    }
}


fn info_lines(info: Vec<(&str, String)>) -> String {
    info.into_iter()
        .map(|(key, val)| {
            format!(
                "    + {:<STAT_WIDTH$}\t{:>width$}",
                key,
                val.bold().yellow(),
                width = STAT_WIDTH - 8
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_format_01() {
        assert_eq!(time_format(12), "  0.012s");
        assert_eq!(time_format(61_500), " 01m 01s");
        assert_eq!(time_format(3_600_000), " 01h 00m");
    }
}
