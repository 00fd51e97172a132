//! Reference month of a dataset snapshot (`YYYY-MM`).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReferenceMonthError {
    #[error("expected `YYYY-MM`, got `{0}`")]
    Format(String),
    #[error("`{0}` is not a valid calendar month")]
    OutOfRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceMonth {
    year: i32,
    month: u32,
}

impl ReferenceMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ReferenceMonthError> {
        let text = format!("{year:04}-{month:02}");
        if !(1900..=9999).contains(&year) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ReferenceMonthError::OutOfRange(text));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl FromStr for ReferenceMonth {
    type Err = ReferenceMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| ReferenceMonthError::Format(s.to_string()))?;
        let well_formed = y.len() == 4
            && m.len() == 2
            && y.bytes().all(|b| b.is_ascii_digit())
            && m.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(ReferenceMonthError::Format(s.to_string()));
        }
        let year: i32 = y
            .parse()
            .map_err(|_| ReferenceMonthError::Format(s.to_string()))?;
        let month: u32 = m
            .parse()
            .map_err(|_| ReferenceMonthError::Format(s.to_string()))?;
        Self::new(year, month)
    }
}

impl fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for ReferenceMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReferenceMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
