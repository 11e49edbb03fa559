use std::ops::Mul;

use chrono::Duration;
use derive_more::{AsRef, Display, Into};

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub set_no: u32,
    pub reps: Option<Reps>,
    pub rest_time: Option<Time>,
    pub tempo: Option<Tempo>,
    pub weight: Option<Weight>,
    pub attributes: Vec<SetAttribute>,
}

impl ExerciseSet {
    /// Estimated time to perform the set, including the rest that follows it.
    ///
    /// Sets without reps count as a single rep. Sets without a tempo are
    /// assumed to take four seconds per rep.
    #[must_use]
    pub fn duration(&self) -> Duration {
        let reps = self.reps.map_or(1, u32::from);
        let seconds_per_rep = self.tempo.as_ref().map_or(4, Tempo::seconds_per_rep);
        let rest = self.rest_time.map_or(0, u32::from);
        Duration::seconds(i64::from(reps * seconds_per_rep + rest))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Time(u32);

impl Time {
    pub fn new(value: u32) -> Result<Self, TimeError> {
        if !(0..1000).contains(&value) {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<Time> for i64 {
    fn from(value: Time) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<&str> for Time {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Time::new(parsed_value),
            Err(_) => Err(TimeError::ParseError),
        }
    }
}

impl Mul<Reps> for Time {
    type Output = Time;

    fn mul(self, rhs: Reps) -> Self::Output {
        Time(self.0 * rhs.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must be in the range 0 to 999 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Lifting tempo code, one digit per movement phase, e.g. "3-1-2-0".
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq)]
pub struct Tempo(String);

impl Tempo {
    pub fn new(value: &str) -> Result<Self, TempoError> {
        let trimmed_value = value.trim();

        if trimmed_value.is_empty() {
            return Err(TempoError::Empty);
        }

        let len = trimmed_value.len();

        if len > 11 {
            return Err(TempoError::TooLong(len));
        }

        if !trimmed_value
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-')
        {
            return Err(TempoError::InvalidCharacter);
        }

        Ok(Self(trimmed_value.to_string()))
    }

    #[must_use]
    pub fn seconds_per_rep(&self) -> u32 {
        self.0
            .split('-')
            .filter_map(|phase| phase.parse::<u32>().ok())
            .sum()
    }
}

impl TryFrom<&str> for Tempo {
    type Error = TempoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Tempo::new(value)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TempoError {
    #[error("Tempo must not be empty")]
    Empty,
    #[error("Tempo must be 11 characters or fewer ({0} > 11)")]
    TooLong(usize),
    #[error("Tempo must consist of digits separated by dashes")]
    InvalidCharacter,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("12", Ok(Reps(12)))]
    #[case(" 999 ", Ok(Reps(999)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("-1", Err(RepsError::ParseError))]
    #[case("ten", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case("90", Ok(Time(90)))]
    #[case("1000", Err(TimeError::OutOfRange))]
    #[case("1.5", Err(TimeError::ParseError))]
    fn test_time_try_from(#[case] value: &str, #[case] expected: Result<Time, TimeError>) {
        assert_eq!(Time::try_from(value), expected);
    }

    #[rstest]
    #[case("80", Ok(Weight(80.0)))]
    #[case("62,5", Ok(Weight(62.5)))]
    #[case("1000", Err(WeightError::OutOfRange))]
    #[case("80.05", Err(WeightError::InvalidResolution))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_try_from(#[case] value: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(value), expected);
    }

    #[rstest]
    #[case("3-1-2-0", Ok(Tempo("3-1-2-0".to_string())))]
    #[case(" 2-0-2 ", Ok(Tempo("2-0-2".to_string())))]
    #[case("", Err(TempoError::Empty))]
    #[case("1-1-1-1-1-1-1", Err(TempoError::TooLong(13)))]
    #[case("3s-1-2", Err(TempoError::InvalidCharacter))]
    fn test_tempo_new(#[case] value: &str, #[case] expected: Result<Tempo, TempoError>) {
        assert_eq!(Tempo::new(value), expected);
    }

    #[rstest]
    #[case("3-1-2-0", 6)]
    #[case("2-0-2", 4)]
    #[case("10", 10)]
    fn test_tempo_seconds_per_rep(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(Tempo::new(value).unwrap().seconds_per_rep(), expected);
    }

    #[rstest]
    #[case(Some(10), Some(60), Some("3-1-2-0"), 120)]
    #[case(Some(10), None, None, 40)]
    #[case(None, Some(30), None, 34)]
    fn test_exercise_set_duration(
        #[case] reps: Option<u32>,
        #[case] rest_time: Option<u32>,
        #[case] tempo: Option<&str>,
        #[case] expected: i64,
    ) {
        let set = ExerciseSet {
            set_no: 1,
            reps: reps.map(|r| Reps::new(r).unwrap()),
            rest_time: rest_time.map(|t| Time::new(t).unwrap()),
            tempo: tempo.map(|t| Tempo::new(t).unwrap()),
            weight: None,
            attributes: Vec::new(),
        };
        assert_eq!(set.duration(), Duration::seconds(expected));
    }
}
