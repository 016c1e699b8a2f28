//! Conversion between units of length, time and angle.
//!
//! A quantity is given as a tagged value, e.g. `Length::Miles(3.)`, so the
//! unit of the input is never ambiguous. Conversions go through one canonical
//! unit per family: metres, seconds, and degrees.
//!
//! For convenience, the conversion functions come with short aliases, e.g.
//! `km()` for `kilometers()`.
//!
//! ```rust
//! use geoshift::units::*;
//! assert_eq!(km(Length::Meters(1000.)), Some(1.));
//! assert_eq!(hours(Time::Days(2.)), Some(48.));
//! assert_eq!(km(None), None);
//! ```
use crate::Error;
use std::fmt;
use std::str::FromStr;

/// A unit: Name, conversion factor (as text), description, and multiplier
/// to the canonical unit of its family
#[derive(Debug)]
pub struct Unit(&'static str, &'static str, &'static str, f64);
impl Unit {
    pub fn name(&self) -> &'static str {
        self.0
    }
    pub fn factor(&self) -> &'static str {
        self.1
    }
    pub fn description(&self) -> &'static str {
        self.2
    }
    pub fn multiplier(&self) -> f64 {
        self.3
    }
}

/// Linear units and their conversion to metres
#[rustfmt::skip]
pub const LENGTH_UNITS: [Unit; 5] = [
    Unit("km",      "1000",                 "Kilometer",                    1000.0),
    Unit("m",       "1",                    "Meter",                        1.0),
    Unit("mi",      "1609.344",             "International Statute Mile",   1609.344),
    Unit("ft",      "0.3048",               "International Foot",           0.3048),
    Unit("nm",      "1852",                 "International Nautical Mile",  1852.0),
];

/// Time units and their conversion to seconds. A year is 365 days.
#[rustfmt::skip]
pub const TIME_UNITS: [Unit; 6] = [
    Unit("y",       "31536000",             "Year",     31_536_000.0),
    Unit("w",       "604800",               "Week",     604_800.0),
    Unit("d",       "86400",                "Day",      86_400.0),
    Unit("h",       "3600",                 "Hour",     3_600.0),
    Unit("m",       "60",                   "Minute",   60.0),
    Unit("s",       "1",                    "Second",   1.0),
];

const RAD_TO_DEG: f64 = 57.295_779_513_082_32;

/// Angular units and their conversion to degrees
#[rustfmt::skip]
pub const ANGLE_UNITS: [Unit; 4] = [
    Unit("deg",     "1",                    "Degree",       1.0),
    Unit("rad",     "57.29577951308232",    "Radian",       RAD_TO_DEG),
    Unit("arcmin",  "1/60",                 "Arc minute",   1.0 / 60.0),
    Unit("arcsec",  "1/3600",               "Arc second",   1.0 / 3600.0),
];

// Generate the unit enumeration, the tagged quantity, and the trait
// implementations of one family of units
macro_rules! unit_family {
    (
        $unit:ident, $quantity:ident, $table:ident, $count:literal, $what:literal, $expected:literal,
        [$($variant:ident = $index:literal, $long:literal);+ $(;)?]
    ) => {
        #[doc = concat!("The ", $what, "s supported")]
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
        pub enum $unit {
            $($variant),+
        }

        impl $unit {
            pub const ALL: [$unit; $count] = [$($unit::$variant),+];

            /// The table entry describing this unit
            pub fn unit(&self) -> &'static Unit {
                match self {
                    $($unit::$variant => &$table[$index]),+
                }
            }

            /// The short name, e.g. `km`
            pub fn name(&self) -> &'static str {
                self.unit().name()
            }
        }

        impl fmt::Display for $unit {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $unit {
            type Err = Error;

            /// Parse a short name (`km`) or a long one (`kilometers`)
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let name = s.trim().to_lowercase();
                for unit in $unit::ALL {
                    if unit.name() == name {
                        return Ok(unit);
                    }
                }
                match name.as_str() {
                    $($long => Ok($unit::$variant),)+
                    _ => Err(Error::Invalid {
                        what: $what,
                        value: s.to_string(),
                        expected: $expected,
                    }),
                }
            }
        }

        #[doc = concat!("A value tagged with its ", $what)]
        #[derive(Debug, PartialEq, Copy, Clone)]
        pub enum $quantity {
            $($variant(f64)),+
        }

        impl $quantity {
            pub fn new(value: f64, unit: $unit) -> $quantity {
                match unit {
                    $($unit::$variant => $quantity::$variant(value)),+
                }
            }

            pub fn value(&self) -> f64 {
                match *self {
                    $($quantity::$variant(value) => value),+
                }
            }

            pub fn unit(&self) -> $unit {
                match self {
                    $($quantity::$variant(_) => $unit::$variant),+
                }
            }

            /// The numerical value of `self`, expressed in `unit`
            pub fn to(&self, unit: $unit) -> f64 {
                let from = self.unit();
                if from == unit {
                    return self.value();
                }
                self.value() * from.unit().multiplier() / unit.unit().multiplier()
            }
        }
    };
}

unit_family!(
    LengthUnit, Length, LENGTH_UNITS, 5, "length unit", "km/m/mi/ft/nm",
    [
        Kilometers = 0, "kilometers";
        Meters = 1, "meters";
        Miles = 2, "miles";
        Feet = 3, "feet";
        Nautical = 4, "nautical";
    ]
);

unit_family!(
    TimeUnit, Time, TIME_UNITS, 6, "time unit", "y/w/d/h/m/s",
    [
        Years = 0, "years";
        Weeks = 1, "weeks";
        Days = 2, "days";
        Hours = 3, "hours";
        Minutes = 4, "minutes";
        Seconds = 5, "seconds";
    ]
);

unit_family!(
    AngleUnit, Angle, ANGLE_UNITS, 4, "angle unit", "deg/rad/arcmin/arcsec",
    [
        Degrees = 0, "degrees";
        Radians = 1, "radians";
        Arcminutes = 2, "arcminutes";
        Arcseconds = 3, "arcseconds";
    ]
);

// ----- C O N V E R S I O N   F U N C T I O N S ---------------------------------------

// Generate one conversion function per unit, plus its short alias, if any
macro_rules! conversion {
    ($quantity:ident, $unit:expr, $name:ident $(, $alias:ident)?) => {
        #[doc = concat!("Convert to ", stringify!($name), ". `None` in gives `None` out")]
        pub fn $name(value: impl Into<Option<$quantity>>) -> Option<f64> {
            value.into().map(|v| v.to($unit))
        }
        $(
            #[doc = concat!("Alias for [`", stringify!($name), "`]")]
            pub fn $alias(value: impl Into<Option<$quantity>>) -> Option<f64> {
                $name(value)
            }
        )?
    };
}

conversion!(Length, LengthUnit::Kilometers, kilometers, km);
conversion!(Length, LengthUnit::Meters, meters, m);
conversion!(Length, LengthUnit::Miles, miles, mi);
conversion!(Length, LengthUnit::Feet, feet, ft);
conversion!(Length, LengthUnit::Nautical, nautical, nm);

conversion!(Time, TimeUnit::Years, years);
conversion!(Time, TimeUnit::Weeks, weeks);
conversion!(Time, TimeUnit::Days, days);
conversion!(Time, TimeUnit::Hours, hours);
conversion!(Time, TimeUnit::Minutes, minutes);
conversion!(Time, TimeUnit::Seconds, seconds);

conversion!(Angle, AngleUnit::Degrees, degrees);
conversion!(Angle, AngleUnit::Radians, radians, rad);
conversion!(Angle, AngleUnit::Arcminutes, arcminutes, arcmin);
conversion!(Angle, AngleUnit::Arcseconds, arcseconds, arcsec);

/// Convert `value` between two units, given by name.
///
/// Both names must belong to the same family. The pair is tried as length,
/// time and angle units, in that order, and the first family knowing both
/// names wins. So `m` is metres next to `km`, but minutes next to `h`.
pub fn convert_by_name(value: f64, from: &str, to: &str) -> Result<f64, Error> {
    if let (Ok(from), Ok(to)) = (from.parse::<LengthUnit>(), to.parse::<LengthUnit>()) {
        return Ok(Length::new(value, from).to(to));
    }
    if let (Ok(from), Ok(to)) = (from.parse::<TimeUnit>(), to.parse::<TimeUnit>()) {
        return Ok(Time::new(value, from).to(to));
    }
    if let (Ok(from), Ok(to)) = (from.parse::<AngleUnit>(), to.parse::<AngleUnit>()) {
        return Ok(Angle::new(value, from).to(to));
    }
    Err(Error::Invalid {
        what: "unit pair",
        value: format!("{from} -> {to}"),
        expected: "two units of the same family",
    })
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn length() {
        assert_eq!(km(Length::Meters(1000.)), Some(1.));
        assert_eq!(m(Length::Kilometers(0.001)), Some(1.));
        assert_eq!(m(Length::Kilometers(1.)), Some(1000.));
        assert_eq!(meters(Length::Miles(1.)), Some(1609.344));
        assert_eq!(feet(Length::Meters(0.3048)), Some(1.));
        assert_eq!(nm(Length::Meters(1852.)), Some(1.));
        assert_float_eq!(mi(Length::Feet(5280.)).unwrap_or_default(), 1., abs <= 1e-12);
        assert_float_eq!(km(Length::Nautical(10.)).unwrap_or_default(), 18.52, abs <= 1e-12);
        assert_eq!(kilometers(None), None);
    }

    #[test]
    fn time() {
        assert_eq!(seconds(Time::Years(1.)), Some(31_536_000.));
        assert_eq!(days(Time::Weeks(2.)), Some(14.));
        assert_eq!(minutes(Time::Hours(1.5)), Some(90.));
        assert_eq!(weeks(Time::Seconds(604_800.)), Some(1.));
        assert_float_eq!(years(Time::Days(73.)).unwrap_or_default(), 0.2, abs <= 1e-12);
        assert_eq!(hours(None), None);
    }

    #[test]
    fn angle() {
        assert_float_eq!(rad(Angle::Degrees(180.)).unwrap_or_default(), std::f64::consts::PI, abs <= 1e-14);
        assert_float_eq!(degrees(Angle::Radians(1.)).unwrap_or_default(), 1f64.to_degrees(), abs <= 1e-13);
        assert_float_eq!(arcmin(Angle::Degrees(1.)).unwrap_or_default(), 60., abs <= 1e-12);
        assert_float_eq!(arcsec(Angle::Arcminutes(1.)).unwrap_or_default(), 60., abs <= 1e-12);
        assert_eq!(radians(None), None);
    }

    #[test]
    fn names() -> Result<(), Error> {
        for unit in LengthUnit::ALL {
            assert_eq!(unit, unit.name().parse()?);
        }
        for unit in TimeUnit::ALL {
            assert_eq!(unit, unit.to_string().parse()?);
        }
        assert_eq!(LengthUnit::Nautical, "NM".parse()?);
        assert_eq!(LengthUnit::Meters, "meters".parse()?);
        assert_eq!(TimeUnit::Minutes, "m".parse()?);
        assert_eq!(AngleUnit::Arcseconds, "arcsec".parse()?);
        assert!(matches!("furlong".parse::<LengthUnit>(), Err(Error::Invalid { .. })));

        assert_eq!(Length::new(3., LengthUnit::Feet), Length::Feet(3.));
        assert_eq!(Time::Hours(2.).unit(), TimeUnit::Hours);
        assert_eq!(Angle::Degrees(2.).value(), 2.);
        assert_eq!(LengthUnit::Miles.unit().factor(), "1609.344");
        assert_eq!(AngleUnit::Radians.unit().description(), "Radian");
        Ok(())
    }

    #[test]
    fn by_name() -> Result<(), Error> {
        assert_eq!(convert_by_name(1., "km", "m")?, 1000.);
        assert_eq!(convert_by_name(2., "h", "m")?, 120.);
        assert_eq!(convert_by_name(1., "w", "d")?, 7.);
        assert_float_eq!(convert_by_name(90., "deg", "arcmin")?, 5400., abs <= 1e-9);
        assert!(convert_by_name(1., "km", "h").is_err());

        // `m` is read in the family of its partner
        assert_eq!(convert_by_name(1000., "m", "km")?, 1.);
        assert_float_eq!(convert_by_name(1., "m", "h")?, 1. / 60., abs <= 1e-15);
        assert!(matches!(
            convert_by_name(1., "m", "deg"),
            Err(Error::Invalid { what: "unit pair", .. })
        ));
        Ok(())
    }
}
