//! Temporal attribute names and the time-unit algebra.
//!
//! Every graph element (and every property value) in a bitemporal graph
//! carries two system intervals: transaction time and valid time. This
//! module names those attributes ([`TimeProperty`]) and defines the
//! granularities in which interval lengths can be reported ([`TimeUnit`]),
//! together with their fixed conversion factors to the microsecond base
//! unit.

use std::fmt;
use std::str::FromStr;

use crate::diag::IrError;

/// A temporal attribute of a graph element or property value.
///
/// `TX_TIME` and `VAL_TIME` denote the interval itself; the four
/// `*_FROM`/`*_TO` attributes denote one bound of that interval.
/// Attribute names are case-insensitive on input and always render
/// upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeProperty {
    /// The transaction-time interval.
    TxTime,
    /// The valid-time interval.
    ValTime,
    /// Beginning bound of the transaction-time interval.
    TxFrom,
    /// Ending bound of the transaction-time interval.
    TxTo,
    /// Beginning bound of the valid-time interval.
    ValFrom,
    /// Ending bound of the valid-time interval.
    ValTo,
}

impl TimeProperty {
    /// All temporal attributes, in declaration order.
    pub const ALL: [TimeProperty; 6] = [
        TimeProperty::TxTime,
        TimeProperty::ValTime,
        TimeProperty::TxFrom,
        TimeProperty::TxTo,
        TimeProperty::ValFrom,
        TimeProperty::ValTo,
    ];

    /// Returns the canonical (upper-case) token for this attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeProperty::TxTime => "TX_TIME",
            TimeProperty::ValTime => "VAL_TIME",
            TimeProperty::TxFrom => "TX_FROM",
            TimeProperty::TxTo => "TX_TO",
            TimeProperty::ValFrom => "VAL_FROM",
            TimeProperty::ValTo => "VAL_TO",
        }
    }

    /// Returns true if this attribute denotes a whole interval
    /// (`TX_TIME` or `VAL_TIME`) rather than one of its bounds.
    pub const fn is_interval(self) -> bool {
        matches!(self, TimeProperty::TxTime | TimeProperty::ValTime)
    }

    /// Returns true if this attribute denotes a single interval bound.
    pub const fn is_bound(self) -> bool {
        !self.is_interval()
    }
}

impl fmt::Display for TimeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeProperty {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TX_TIME" => Ok(TimeProperty::TxTime),
            "VAL_TIME" => Ok(TimeProperty::ValTime),
            "TX_FROM" => Ok(TimeProperty::TxFrom),
            "TX_TO" => Ok(TimeProperty::TxTo),
            "VAL_FROM" => Ok(TimeProperty::ValFrom),
            "VAL_TO" => Ok(TimeProperty::ValTo),
            _ => Err(IrError::UnknownTimeProperty(s.into())),
        }
    }
}

/// Granularity in which a period length is reported.
///
/// Conversion factors are calendar-naive conventions committed to by the
/// surface syntax: a year is 365 days and a quarter is a year divided by
/// four. Unit names are case-insensitive on input and render upper-case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Year,
    Quarter,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    /// The base unit; the default when a query leaves the unit implicit.
    #[default]
    Microsecond,
}

impl TimeUnit {
    /// All supported units, coarsest first.
    pub const ALL: [TimeUnit; 9] = [
        TimeUnit::Year,
        TimeUnit::Quarter,
        TimeUnit::Week,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
        TimeUnit::Millisecond,
        TimeUnit::Microsecond,
    ];

    /// Returns the duration of one unit in microseconds.
    pub const fn micros(self) -> i64 {
        const MICROS_PER_SECOND: i64 = 1_000_000;
        const MICROS_PER_DAY: i64 = 24 * 60 * 60 * MICROS_PER_SECOND;
        match self {
            TimeUnit::Year => 365 * MICROS_PER_DAY,
            TimeUnit::Quarter => 365 * MICROS_PER_DAY / 4,
            TimeUnit::Week => 7 * MICROS_PER_DAY,
            TimeUnit::Day => MICROS_PER_DAY,
            TimeUnit::Hour => 60 * 60 * MICROS_PER_SECOND,
            TimeUnit::Minute => 60 * MICROS_PER_SECOND,
            TimeUnit::Second => MICROS_PER_SECOND,
            TimeUnit::Millisecond => 1_000,
            TimeUnit::Microsecond => 1,
        }
    }

    /// Returns the canonical (upper-case) token for this unit.
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Year => "YEAR",
            TimeUnit::Quarter => "QUARTER",
            TimeUnit::Week => "WEEK",
            TimeUnit::Day => "DAY",
            TimeUnit::Hour => "HOUR",
            TimeUnit::Minute => "MINUTE",
            TimeUnit::Second => "SECOND",
            TimeUnit::Millisecond => "MILLISECOND",
            TimeUnit::Microsecond => "MICROSECOND",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YEAR" => Ok(TimeUnit::Year),
            "QUARTER" => Ok(TimeUnit::Quarter),
            "WEEK" => Ok(TimeUnit::Week),
            "DAY" => Ok(TimeUnit::Day),
            "HOUR" => Ok(TimeUnit::Hour),
            "MINUTE" => Ok(TimeUnit::Minute),
            "SECOND" => Ok(TimeUnit::Second),
            "MILLISECOND" => Ok(TimeUnit::Millisecond),
            "MICROSECOND" => Ok(TimeUnit::Microsecond),
            _ => Err(IrError::UnknownTimeUnit(s.into())),
        }
    }
}

/// Length of the period `[begin_micros, end_micros)` expressed in `unit`,
/// truncated toward zero.
///
/// The two instants are resolved by evaluation, not by the IR; this is the
/// pure conversion the evaluator applies once it has them.
pub fn period_length(begin_micros: i64, end_micros: i64, unit: TimeUnit) -> i64 {
    (end_micros - begin_micros) / unit.micros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_factors_are_consistent() {
        assert_eq!(TimeUnit::Microsecond.micros(), 1);
        assert_eq!(TimeUnit::Millisecond.micros(), 1_000);
        assert_eq!(TimeUnit::Second.micros(), 1_000_000);
        assert_eq!(TimeUnit::Minute.micros(), 60 * TimeUnit::Second.micros());
        assert_eq!(TimeUnit::Hour.micros(), 60 * TimeUnit::Minute.micros());
        assert_eq!(TimeUnit::Day.micros(), 24 * TimeUnit::Hour.micros());
        assert_eq!(TimeUnit::Week.micros(), 7 * TimeUnit::Day.micros());
        assert_eq!(TimeUnit::Year.micros(), 365 * TimeUnit::Day.micros());
        assert_eq!(TimeUnit::Quarter.micros(), TimeUnit::Year.micros() / 4);
    }

    #[test]
    fn default_unit_is_microsecond() {
        assert_eq!(TimeUnit::default(), TimeUnit::Microsecond);
    }

    #[test]
    fn period_length_truncates_toward_zero() {
        assert_eq!(period_length(0, 3_599_999_999, TimeUnit::Hour), 0);
        assert_eq!(period_length(0, 3_600_000_000, TimeUnit::Hour), 1);
        // Negative differences truncate toward zero as well.
        assert_eq!(period_length(3_599_999_999, 0, TimeUnit::Hour), 0);
        assert_eq!(period_length(7_200_000_000, 0, TimeUnit::Hour), -2);
    }

    #[test]
    fn unit_parsing_is_case_insensitive() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.as_str().parse::<TimeUnit>().unwrap(), unit);
            assert_eq!(
                unit.as_str().to_lowercase().parse::<TimeUnit>().unwrap(),
                unit
            );
        }
        assert!("FORTNIGHT".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn time_property_parsing_is_case_insensitive() {
        for prop in TimeProperty::ALL {
            assert_eq!(prop.as_str().parse::<TimeProperty>().unwrap(), prop);
            assert_eq!(
                prop.as_str().to_lowercase().parse::<TimeProperty>().unwrap(),
                prop
            );
        }
        assert!("SYS_TIME".parse::<TimeProperty>().is_err());
    }

    #[test]
    fn interval_and_bound_classification() {
        assert!(TimeProperty::TxTime.is_interval());
        assert!(TimeProperty::ValTime.is_interval());
        assert!(TimeProperty::TxFrom.is_bound());
        assert!(TimeProperty::TxTo.is_bound());
        assert!(TimeProperty::ValFrom.is_bound());
        assert!(TimeProperty::ValTo.is_bound());
    }
}
