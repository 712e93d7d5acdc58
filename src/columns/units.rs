use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use super::ColumnError;

/// Unit of a relative uncertainty column
pub const PERCENT: &str = "PER-CENT";

/// A physical unit family and its canonical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitFamily {
    /// Energies and temperatures, canonical `MeV`
    Energy,
    /// Energy spectra, canonical `1/MeV`
    EnergyDistribution,
    /// Cross sections, canonical `barns`
    CrossSection,
    /// Angles, canonical `degrees`
    Angle,
    /// Cross section times square root of energy, canonical `B*RT-EV`
    SqrtEnergyCrossSection,
    /// Differential cross sections, canonical `barns/ster`
    AngularDistribution,
    /// Momenta, canonical `GeV/c`
    Momentum,
    /// Neutrons per fission, canonical `ptcls/fis`
    Nubar,
    /// Dimensionless numbers, canonical `no-dim`
    Dimensionless,
}

impl UnitFamily {
    /// Families in lookup order
    pub const ALL: [UnitFamily; 9] = [
        UnitFamily::Energy,
        UnitFamily::EnergyDistribution,
        UnitFamily::CrossSection,
        UnitFamily::Angle,
        UnitFamily::SqrtEnergyCrossSection,
        UnitFamily::AngularDistribution,
        UnitFamily::Momentum,
        UnitFamily::Nubar,
        UnitFamily::Dimensionless,
    ];

    /// Canonical unit name
    pub fn canonical(self) -> &'static str {
        match self {
            UnitFamily::Energy => "MeV",
            UnitFamily::EnergyDistribution => "1/MeV",
            UnitFamily::CrossSection => "barns",
            UnitFamily::Angle => "degrees",
            UnitFamily::SqrtEnergyCrossSection => "B*RT-EV",
            UnitFamily::AngularDistribution => "barns/ster",
            UnitFamily::Momentum => "GeV/c",
            UnitFamily::Nubar => "ptcls/fis",
            UnitFamily::Dimensionless => "no-dim",
        }
    }

    /// `(unit, factor to canonical)` pairs
    pub fn factors(self) -> &'static [(&'static str, f64)] {
        match self {
            UnitFamily::Energy => &[
                ("GEV", 1.0e3),
                ("MEV", 1.0),
                ("KEV", 1.0e-3),
                ("EV", 1.0e-6),
                ("MILLI-EV", 1.0e-9),
                ("MeV", 1.0),
                ("K", 8.621738e-11),
            ],
            UnitFamily::EnergyDistribution => &[
                ("1/GEV", 1.0e-3),
                ("1/MEV", 1.0),
                ("1/KEV", 1.0e3),
                ("1/EV", 1.0e6),
                ("1/MILLI-EV", 1.0e9),
                ("1/MeV", 1.0),
            ],
            UnitFamily::CrossSection => &[
                ("B", 1.0),
                ("MB", 1.0e-3),
                ("MICRO-B", 1.0e-6),
                ("barns", 1.0),
            ],
            UnitFamily::Angle => &[("ADEG", 1.0), ("SR", 180.0 / PI), ("RAD", 180.0 / PI)],
            UnitFamily::SqrtEnergyCrossSection => &[("B*RT-EV", 1.0), ("MB*RT-EV", 1.0e-3)],
            UnitFamily::AngularDistribution => &[
                ("B/SR", 1.0),
                ("MB/SR", 1.0e-3),
                ("MICRO-B/SR", 1.0e-6),
                ("barns/SR", 1.0),
            ],
            UnitFamily::Momentum => &[("GEV/C", 1.0), ("MEV/C", 1.0e-3)],
            UnitFamily::Nubar => &[("PRT/FIS", 1.0)],
            UnitFamily::Dimensionless => &[("NO-DIM", 1.0), ("ARB-UNITS", 1.0), ("no-dim", 1.0)],
        }
    }

    /// Unit codes of this family
    pub fn units(self) -> impl Iterator<Item = &'static str> {
        self.factors().iter().map(|(unit, _)| *unit)
    }

    /// Family and conversion factor of an EXFOR unit code
    pub fn lookup(unit: &str) -> Option<(UnitFamily, f64)> {
        Self::ALL.into_iter().find_map(|family| {
            family
                .factors()
                .iter()
                .find(|(code, _)| *code == unit)
                .map(|(_, factor)| (family, *factor))
        })
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Conversion factor to canonical units and the canonical unit name.
///
/// Unknown units pass through with factor 1.0 and their own name, except in
/// strict mode where anything but a known unit or [`PERCENT`] is rejected.
pub fn convert_unit(label: &str, unit: &str, strict: bool) -> Result<(f64, String), ColumnError> {
    match UnitFamily::lookup(unit) {
        Some((family, factor)) => Ok((factor, family.canonical().to_string())),
        None if strict && unit != PERCENT => Err(ColumnError::BadUnits {
            label: label.to_string(),
            unit: unit.to_string(),
        }),
        None => {
            log::debug!("Unit '{unit}' of column '{label}' is not converted");
            Ok((1.0, unit.to_string()))
        }
    }
}
