use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Calendar date of a post. On the wire it is always `dd-mm-yyyy`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PostDate(pub NaiveDate);

impl PostDate {
    pub const FORMAT: &'static str = "%d-%m-%Y";
}

impl FromStr for PostDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref DATE_REGEX: Regex = Regex::new(
                r"^(?P<day>[0-9]{2})-(?P<month>[0-9]{2})-(?P<year>[0-9]{4})$"
            ).unwrap();
        }

        let Some(caps) = DATE_REGEX.captures(s) else {
            return Err(format!("Date {} is not in dd-mm-yyyy format", s));
        };

        // The regex guarantees digits, so only the calendar check can fail
        let day: u32 = caps["day"].parse().map_err(|_| format!("Invalid day in {}", s))?;
        let month: u32 = caps["month"].parse().map_err(|_| format!("Invalid month in {}", s))?;
        let year: i32 = caps["year"].parse().map_err(|_| format!("Invalid year in {}", s))?;

        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Ok(Self(date)),
            None => Err(format!("Date {} does not exist", s)),
        }
    }
}

impl Display for PostDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl<'de> Deserialize<'de> for PostDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
    {
        use serde::de::Error;
        let value = String::deserialize(deserializer)?;
        PostDate::from_str(&value).map_err(Error::custom)
    }
}

impl Serialize for PostDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        serializer.collect_str(self)
    }
}
