//! CLI modes operating on one stdin batch per process.
//!
//! Every mode consumes the same input shape (see [`crate::protocol`]) and
//! renders its whole stdout payload as a string, leaving I/O and exit codes
//! to the binary.

use std::fmt::Write;

use enum_dispatch::enum_dispatch;

use crate::distribution::RhoDistribution;
use crate::sketch::{Sketch, SketchError};

/// Register count used by the modes that take no `m` argument.
pub const DEFAULT_REGISTER_COUNT: usize = 16;

/// A CLI mode: turns one parsed batch into its stdout payload.
#[enum_dispatch]
pub trait Command {
    fn run(&self, values: &[u32]) -> Result<String, SketchError>;
}

/// Modes accepted on the command line.
#[enum_dispatch(Command)]
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Estimate(Estimate),
    RhoDist(RhoDist),
    RegistersSample(RegistersSample),
}

/// Command-line usage errors, reported distinctly from input errors.
#[derive(Debug, PartialEq, Eq)]
pub enum ModeError {
    MissingMode,
    UnknownMode(String),
    MissingRegisterCount,
    InvalidRegisterCount(String),
    UnexpectedArgument(String),
}

impl std::fmt::Display for ModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeError::MissingMode => write!(f, "missing mode argument"),
            ModeError::UnknownMode(mode) => write!(f, "unknown mode {mode:?}"),
            ModeError::MissingRegisterCount => write!(f, "estimate mode requires <m>"),
            ModeError::InvalidRegisterCount(arg) => write!(f, "invalid register count {arg:?}"),
            ModeError::UnexpectedArgument(arg) => write!(f, "unexpected argument {arg:?}"),
        }
    }
}

impl std::error::Error for ModeError {}

impl Mode {
    /// Parse a mode from the arguments following the program name.
    ///
    /// `hll` is accepted as an alias of `estimate`; both require a register
    /// count. The other modes take no arguments.
    pub fn from_args<I>(args: I) -> Result<Self, ModeError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mode = args.next().ok_or(ModeError::MissingMode)?;
        let mode = match mode.as_str() {
            "estimate" | "hll" => {
                let arg = args.next().ok_or(ModeError::MissingRegisterCount)?;
                let m = arg
                    .parse()
                    .map_err(|_| ModeError::InvalidRegisterCount(arg))?;
                Mode::Estimate(Estimate { m })
            }
            "rho-dist" => Mode::RhoDist(RhoDist),
            "registers-sample" => Mode::RegistersSample(RegistersSample),
            other => return Err(ModeError::UnknownMode(other.to_string())),
        };
        if let Some(extra) = args.next() {
            return Err(ModeError::UnexpectedArgument(extra));
        }
        Ok(mode)
    }
}

/// `estimate <m>` / `hll <m>`: print the cardinality estimate of the batch.
#[derive(Debug, PartialEq, Eq)]
pub struct Estimate {
    pub m: usize,
}

impl Command for Estimate {
    fn run(&self, values: &[u32]) -> Result<String, SketchError> {
        let mut sketch = Sketch::new(self.m)?;
        for &value in values {
            sketch.insert_value(value);
        }
        Ok(format!("{}\n", sketch.estimate()?))
    }
}

/// `rho-dist`: print the empirical rank distribution of the batch as
/// `label,count` rows under a `rho,count` header, numeric ranks ascending and
/// the `undefined` row last when present.
#[derive(Debug, PartialEq, Eq)]
pub struct RhoDist;

impl Command for RhoDist {
    fn run(&self, values: &[u32]) -> Result<String, SketchError> {
        let b = DEFAULT_REGISTER_COUNT.trailing_zeros();
        let mut dist = RhoDistribution::new(b);
        for &value in values {
            dist.observe_value(value);
        }
        let mut out = String::from("rho,count\n");
        for (rank, count) in dist.ranks() {
            let _ = writeln!(out, "{rank},{count}");
        }
        if dist.undefined() > 0 {
            let _ = writeln!(out, "undefined,{}", dist.undefined());
        }
        Ok(out)
    }
}

/// `registers-sample`: print the final register array of a default-sized
/// sketch, one register per line in bucket-index order.
#[derive(Debug, PartialEq, Eq)]
pub struct RegistersSample;

impl Command for RegistersSample {
    fn run(&self, values: &[u32]) -> Result<String, SketchError> {
        let mut sketch = Sketch::new(DEFAULT_REGISTER_COUNT)?;
        for &value in values {
            sketch.insert_value(value);
        }
        let mut out = String::new();
        for &register in sketch.registers() {
            let _ = writeln!(out, "{register}");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_estimate_and_alias() {
        assert_eq!(
            Mode::from_args(args(&["estimate", "1024"])).unwrap(),
            Mode::Estimate(Estimate { m: 1024 })
        );
        assert_eq!(
            Mode::from_args(args(&["hll", "128"])).unwrap(),
            Mode::Estimate(Estimate { m: 128 })
        );
    }

    #[test]
    fn parses_argumentless_modes() {
        assert_eq!(
            Mode::from_args(args(&["rho-dist"])).unwrap(),
            Mode::RhoDist(RhoDist)
        );
        assert_eq!(
            Mode::from_args(args(&["registers-sample"])).unwrap(),
            Mode::RegistersSample(RegistersSample)
        );
    }

    #[test_case(&[] => ModeError::MissingMode)]
    #[test_case(&["count-things"] => ModeError::UnknownMode("count-things".to_string()))]
    #[test_case(&["estimate"] => ModeError::MissingRegisterCount)]
    #[test_case(&["estimate", "lots"] => ModeError::InvalidRegisterCount("lots".to_string()))]
    #[test_case(&["rho-dist", "16"] => ModeError::UnexpectedArgument("16".to_string()))]
    fn rejects_bad_arguments(parts: &[&str]) -> ModeError {
        Mode::from_args(args(parts)).unwrap_err()
    }

    #[test]
    fn estimate_of_empty_batch_is_zero() {
        let output = Estimate { m: 1024 }.run(&[]).unwrap();
        assert_eq!(output, "0\n");
    }

    #[test]
    fn estimate_rejects_invalid_register_count() {
        assert_eq!(
            Estimate { m: 10 }.run(&[]),
            Err(SketchError::InvalidRegisterCount(10))
        );
    }

    #[test]
    fn estimate_output_parses_as_float() {
        let values: Vec<u32> = (1..=1000).collect();
        let output = Estimate { m: 1024 }.run(&values).unwrap();
        let estimate: f64 = output.trim().parse().unwrap();
        assert!((estimate - 1000.0).abs() / 1000.0 < 0.0975);
    }

    #[test]
    fn rho_dist_of_empty_batch_is_header_only() {
        assert_eq!(RhoDist.run(&[]).unwrap(), "rho,count\n");
    }

    #[test]
    fn rho_dist_rows_are_sorted_with_undefined_last() {
        // Values 1..=20 under the fixed hash produce this exact table.
        let values: Vec<u32> = (1..=20).collect();
        assert_eq!(
            RhoDist.run(&values).unwrap(),
            "rho,count\n1,9\n2,3\n3,3\n4,1\n5,3\n6,1\n"
        );

        // Value 0 hashes to digest 0: the only undefined remainder here.
        let mut with_zero = values;
        with_zero.push(0);
        assert_eq!(
            RhoDist.run(&with_zero).unwrap(),
            "rho,count\n1,9\n2,3\n3,3\n4,1\n5,3\n6,1\nundefined,1\n"
        );
    }

    #[test]
    fn registers_sample_prints_default_register_array() {
        let values: Vec<u32> = (1..=8).collect();
        assert_eq!(
            RegistersSample.run(&values).unwrap(),
            "0\n0\n0\n0\n3\n4\n5\n2\n5\n0\n0\n5\n0\n3\n0\n0\n"
        );
    }

    #[test]
    fn registers_sample_of_empty_batch_is_all_zeros() {
        let output = RegistersSample.run(&[]).unwrap();
        assert_eq!(output.lines().count(), DEFAULT_REGISTER_COUNT);
        assert!(output.lines().all(|line| line == "0"));
    }
}
