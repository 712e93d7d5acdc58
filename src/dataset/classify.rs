use std::fmt;

use serde::Serialize;

use crate::columns::Quantity;
use crate::reaction::Measurement;

use super::DatasetError;

/// What kind of data a dataset holds, chosen from its reaction's quantity codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuantityClass {
    /// Cross section against incident energy
    CrossSection,
    /// Cross section averaged over a spectrum (Maxwellian, fission, ...)
    SpectrumAverage,
    /// Resonance integral
    ResonanceIntegral,
    /// Polarization analyzing power
    AnalyzingPower,
    /// Differential cross section in angle
    AngularDistribution,
    /// Neutrons per fission
    Nubar,
    /// Differential cross section in outgoing energy
    EnergyDistribution,
    /// Double differential cross section in angle and energy
    EnergyAngleDistribution,
    /// Anything else; the raw columns are kept
    Plain,
}

enum Rule {
    Exactly(&'static [&'static str]),
    Contains(&'static str),
}

impl Rule {
    fn matches(&self, codes: &[String]) -> bool {
        match self {
            Rule::Exactly(expected) => codes.iter().map(String::as_str).eq(expected.iter().copied()),
            Rule::Contains(code) => codes.iter().any(|c| c == code),
        }
    }
}

/// Tried top to bottom; the first matching rule wins and [`QuantityClass::Plain`] is the fallback
const RULES: &[(Rule, QuantityClass)] = &[
    (Rule::Exactly(&["SIG"]), QuantityClass::CrossSection),
    (Rule::Exactly(&["CN", "SIG"]), QuantityClass::CrossSection),
    (Rule::Exactly(&["SIG", "DERIV"]), QuantityClass::CrossSection),
    (Rule::Exactly(&["SIG", "FCT"]), QuantityClass::CrossSection),
    (Rule::Exactly(&["DI", "SIG"]), QuantityClass::CrossSection),
    (Rule::Exactly(&["SIG", "EVAL"]), QuantityClass::CrossSection),
    (Rule::Exactly(&["SIG", "EXP"]), QuantityClass::CrossSection),
    (Rule::Exactly(&["SIG", "MXW"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "SPA"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "SFC", "EVAL"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "SFC", "EXP"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "SFC"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "FST"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "RTE"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "FIS"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "FIS", "EVAL"]), QuantityClass::SpectrumAverage),
    (Rule::Exactly(&["SIG", "AV"]), QuantityClass::CrossSection),
    (Rule::Contains("RI"), QuantityClass::ResonanceIntegral),
    (Rule::Contains("POL/DA"), QuantityClass::AnalyzingPower),
    (Rule::Contains("DA/DE"), QuantityClass::EnergyAngleDistribution),
    (Rule::Contains("DA"), QuantityClass::AngularDistribution),
    (Rule::Contains("NU"), QuantityClass::Nubar),
    (Rule::Contains("DE"), QuantityClass::EnergyDistribution),
];

impl QuantityClass {
    /// Class of a quantity code list such as `[SIG, MXW]`
    pub fn from_codes(codes: &[String]) -> Self {
        RULES
            .iter()
            .find(|(rule, _)| rule.matches(codes))
            .map_or(QuantityClass::Plain, |(_, class)| *class)
    }

    /// Class of a measurement. Combinations must agree on one quantity.
    pub fn of(measurement: &Measurement) -> Result<Self, DatasetError> {
        match measurement {
            Measurement::Single(reaction) => Ok(Self::from_codes(&reaction.quantity)),
            _ => measurement
                .common_quantity()
                .map(Self::from_codes)
                .ok_or_else(|| DatasetError::CoupledQuantities(measurement.to_string())),
        }
    }

    /// Simplified column names and the quantity behind each.
    ///
    /// `Ok(None)` means the dataset is returned unchanged by simplification.
    pub fn column_map(self) -> Result<Option<&'static [(&'static str, Quantity)]>, DatasetError> {
        const ENERGY: (&str, Quantity) = ("Energy", Quantity::IncidentEnergy);
        let map: &'static [(&'static str, Quantity)] = match self {
            QuantityClass::CrossSection => &[ENERGY, ("Data", Quantity::CrossSection)],
            QuantityClass::Nubar => &[ENERGY, ("Data", Quantity::Nubar)],
            QuantityClass::SpectrumAverage => &[
                ("Energy", Quantity::SpectrumArgument),
                ("Data", Quantity::CrossSection),
            ],
            QuantityClass::AngularDistribution => &[
                ENERGY,
                ("Angle", Quantity::Angle),
                ("Data", Quantity::AngularDistribution),
            ],
            QuantityClass::EnergyDistribution => &[
                ENERGY,
                ("E'", Quantity::OutgoingEnergy),
                ("Data", Quantity::EnergyDistribution),
            ],
            QuantityClass::AnalyzingPower | QuantityClass::Plain => return Ok(None),
            QuantityClass::ResonanceIntegral | QuantityClass::EnergyAngleDistribution => {
                return Err(DatasetError::Unsupported(self.to_string()))
            }
        };
        Ok(Some(map))
    }

    /// Whether rendering carries a `Frame:` line
    pub fn has_frame(self) -> bool {
        matches!(
            self,
            QuantityClass::AngularDistribution | QuantityClass::EnergyDistribution
        )
    }
}

impl fmt::Display for QuantityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuantityClass::CrossSection => "Cross section",
            QuantityClass::SpectrumAverage => "Spectrum averaged cross section",
            QuantityClass::ResonanceIntegral => "Resonance integral",
            QuantityClass::AnalyzingPower => "Analyzing power",
            QuantityClass::AngularDistribution => "Angular distribution",
            QuantityClass::Nubar => "Nubar",
            QuantityClass::EnergyDistribution => "Energy distribution",
            QuantityClass::EnergyAngleDistribution => "Energy-angle distribution",
            QuantityClass::Plain => "Unrecognized quantity",
        };
        write!(f, "{name}")
    }
}
