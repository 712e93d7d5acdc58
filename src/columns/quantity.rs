use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use super::units::{UnitFamily, PERCENT};
use super::{condense, Column, ColumnError, ColumnMatcher, PairMatcher, TableView};

const VARIABLE_SUFFIXES: [&str; 5] = ["", "-DUMMY", "-ASSUM", "-MEAN", "-APRX"];
const FRAME_SUFFIXES: [&str; 1] = ["-CM"];
const SHIFT_SUFFIXES: [&str; 1] = ["-K"];
const ERROR_SUFFIXES: [&str; 1] = ["-ERR"];
const FULL_WIDTH_SUFFIXES: [&str; 3] = ["-RES", "-RSL", "-RSL-FW"];
const HALF_WIDTH_SUFFIXES: [&str; 1] = ["-RSL-HW"];

const DATA_KEYS: [&str; 2] = ["DATA", "RATIO"];
const ANGLE_KEYS: [&str; 2] = ["COS", "ANG"];
const MOMENTUM_KEYS: [&str; 1] = ["MOM"];
const TOTAL_ERROR_KEYS: [&str; 1] = ["ERR-T"];
const SYSTEMATIC_ERROR_KEYS: [&str; 1] = ["ERR"];
const STATISTICAL_ERROR_KEYS: [&str; 1] = ["ERR-S"];

/// A physical quantity read out of a table, backed by an ordered list of strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quantity {
    /// Incident energy (`EN`), MeV
    IncidentEnergy,
    /// Outgoing energy (`E`), MeV
    OutgoingEnergy,
    /// Spectrum temperature (`KT`, `TEMP`), MeV
    Temperature,
    /// Argument of a spectrum average: temperature, else incident energy
    SpectrumArgument,
    /// Cross section (`DATA`, `RATIO`), barns or no-dim
    CrossSection,
    /// Neutrons per fission
    Nubar,
    /// Differential cross section, barns/ster
    AngularDistribution,
    /// Energy spectrum, 1/MeV
    EnergyDistribution,
    /// Scattering angle, degrees
    Angle,
}

impl Quantity {
    /// Strategies in priority order
    pub fn strategies(self) -> &'static [PairMatcher] {
        static TABLES: OnceLock<Vec<Vec<PairMatcher>>> = OnceLock::new();
        let tables = TABLES.get_or_init(|| {
            [
                Quantity::IncidentEnergy,
                Quantity::OutgoingEnergy,
                Quantity::Temperature,
                Quantity::SpectrumArgument,
                Quantity::CrossSection,
                Quantity::Nubar,
                Quantity::AngularDistribution,
                Quantity::EnergyDistribution,
                Quantity::Angle,
            ]
            .into_iter()
            .map(build)
            .collect()
        });
        &tables[self as usize]
    }

    /// Value and uncertainty, each taken row by row from the first strategy that has it
    pub fn extract<T: TableView + ?Sized>(self, table: &T, strict: bool) -> Result<(Column, Column), ColumnError> {
        let numrows = table.numrows();
        let mut values = Vec::new();
        let mut errors = Vec::new();
        for strategy in self.strategies() {
            values.push(strategy.value(table, strict)?);
            errors.push(strategy.error(table, strict)?);
        }
        Ok((condense(values, numrows), condense(errors, numrows)))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::IncidentEnergy => "incident energy",
            Quantity::OutgoingEnergy => "outgoing energy",
            Quantity::Temperature => "temperature",
            Quantity::SpectrumArgument => "spectrum argument",
            Quantity::CrossSection => "cross section",
            Quantity::Nubar => "nubar",
            Quantity::AngularDistribution => "angular distribution",
            Quantity::EnergyDistribution => "energy distribution",
            Quantity::Angle => "angle",
        };
        write!(f, "{name}")
    }
}

/// Every `base + suffix` combination
fn labels(bases: &[&str], suffixes: &[&[&str]]) -> Vec<String> {
    bases
        .iter()
        .flat_map(|base| {
            suffixes
                .iter()
                .flat_map(|group| group.iter())
                .map(move |suffix| format!("{base}{suffix}"))
        })
        .collect()
}

fn units(families: &[UnitFamily], percent: bool) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = families.iter().flat_map(|f| f.units()).collect();
    if percent {
        out.push(PERCENT);
    }
    out
}

/// The value/error strategies shared by `EN`, `E` and `KT` style energies
fn energy_strategies(base: &str, value_suffixes: &[&[&str]], families: &[UnitFamily]) -> Vec<PairMatcher> {
    let energy = units(families, false);
    let energy_or_percent = units(families, true);
    let value = || ColumnMatcher::new(labels(&[base], value_suffixes), energy.clone());
    let plain = || ColumnMatcher::new(labels(&[base], &[&VARIABLE_SUFFIXES]), energy.clone());
    vec![
        PairMatcher::Independent {
            value: value(),
            error: ColumnMatcher::new(labels(&[base], &[&ERROR_SUFFIXES]), energy_or_percent.clone()),
        },
        PairMatcher::Independent {
            value: plain(),
            error: ColumnMatcher::new(labels(&[base], &[&FULL_WIDTH_SUFFIXES]), energy_or_percent.clone())
                .with_scale(0.5),
        },
        PairMatcher::Independent {
            value: plain(),
            error: ColumnMatcher::new(labels(&[base], &[&HALF_WIDTH_SUFFIXES]), energy_or_percent),
        },
        PairMatcher::HighLow {
            low: ColumnMatcher::new([format!("{base}-MIN")], energy.clone()),
            high: ColumnMatcher::new([format!("{base}-MAX")], energy.clone()),
        },
    ]
}

fn build(quantity: Quantity) -> Vec<PairMatcher> {
    use UnitFamily::*;
    match quantity {
        Quantity::IncidentEnergy | Quantity::OutgoingEnergy => {
            let base = if quantity == Quantity::IncidentEnergy { "EN" } else { "E" };
            let energy = units(&[Energy], false);
            let mut strategies = energy_strategies(base, &[&VARIABLE_SUFFIXES], &[Energy]);
            let mut mid = vec![base.to_string()];
            mid.extend(MOMENTUM_KEYS.map(String::from));
            strategies.push(PairMatcher::HighMidLow {
                mid: ColumnMatcher::new(mid, energy.clone()),
                minus: ColumnMatcher::new([format!("-{base}-ERR")], energy.clone()),
                plus: ColumnMatcher::new([format!("+{base}-ERR")], energy),
            });
            let mut bare = labels(&[base], &[&VARIABLE_SUFFIXES]);
            bare.extend(MOMENTUM_KEYS.map(String::from));
            strategies.push(PairMatcher::MissingError {
                value: ColumnMatcher::new(bare, units(&[Energy, Momentum], false)),
            });
            strategies
        }
        Quantity::Temperature => {
            let energy = units(&[Energy], false);
            let mut strategies = energy_strategies("KT", &[&VARIABLE_SUFFIXES, &SHIFT_SUFFIXES], &[Energy]);
            strategies.push(PairMatcher::HighMidLow {
                mid: ColumnMatcher::new(["KT"], energy.clone()),
                minus: ColumnMatcher::new(["-KT-ERR"], energy.clone()),
                plus: ColumnMatcher::new(["+KT-ERR"], energy.clone()),
            });
            let mut bare = labels(&["TEMP"], &[&VARIABLE_SUFFIXES, &SHIFT_SUFFIXES]);
            bare.extend(labels(&["KT"], &[&VARIABLE_SUFFIXES]));
            strategies.push(PairMatcher::MissingError {
                value: ColumnMatcher::new(bare, energy),
            });
            strategies
        }
        Quantity::SpectrumArgument => {
            let mut strategies = build(Quantity::Temperature);
            strategies.extend(build(Quantity::IncidentEnergy));
            strategies
        }
        Quantity::CrossSection => {
            let mut strategies = data_strategies(&[CrossSection, Dimensionless], &[&VARIABLE_SUFFIXES, &FRAME_SUFFIXES]);
            strategies.insert(
                4,
                PairMatcher::DerivedRatio {
                    value: ColumnMatcher::new(["DATA"], units(&[SqrtEnergyCrossSection], false)),
                    error: ColumnMatcher::new(["DATA-ERR"], units(&[SqrtEnergyCrossSection], false)),
                },
            );
            strategies
        }
        Quantity::Nubar => data_strategies(&[Nubar, Dimensionless], &[&VARIABLE_SUFFIXES]),
        Quantity::AngularDistribution => spectrum_strategies(&[AngularDistribution, Dimensionless]),
        Quantity::EnergyDistribution => spectrum_strategies(&[EnergyDistribution, Dimensionless]),
        Quantity::Angle => {
            let value = || {
                ColumnMatcher::new(
                    labels(&ANGLE_KEYS, &[&VARIABLE_SUFFIXES, &FRAME_SUFFIXES]),
                    units(&[Angle, Dimensionless], false),
                )
                .with_cosine()
            };
            let error_units = units(&[Angle, Dimensionless], true);
            vec![
                PairMatcher::Independent {
                    value: value(),
                    error: ColumnMatcher::new(
                        labels(&ANGLE_KEYS, &[&ERROR_SUFFIXES, &HALF_WIDTH_SUFFIXES]),
                        error_units.clone(),
                    ),
                },
                PairMatcher::Independent {
                    value: value(),
                    error: ColumnMatcher::new(labels(&ANGLE_KEYS, &[&FULL_WIDTH_SUFFIXES]), error_units)
                        .with_scale(0.5),
                },
                PairMatcher::MissingError { value: value() },
            ]
        }
    }
}

/// Cross section and nubar style `DATA` strategies
fn data_strategies(families: &[UnitFamily], value_suffixes: &[&[&str]]) -> Vec<PairMatcher> {
    let plain = units(families, false);
    let with_percent = units(families, true);
    let mut error_labels = labels(&DATA_KEYS, &[&ERROR_SUFFIXES]);
    error_labels.extend(TOTAL_ERROR_KEYS.map(String::from));
    vec![
        PairMatcher::Independent {
            value: ColumnMatcher::new(labels(&DATA_KEYS, value_suffixes), plain.clone()),
            error: ColumnMatcher::new(error_labels, with_percent.clone()),
        },
        PairMatcher::HighLow {
            low: ColumnMatcher::new(labels(&DATA_KEYS, &[&["-MIN"]]), plain.clone()),
            high: ColumnMatcher::new(labels(&DATA_KEYS, &[&["-MAX"]]), plain.clone()),
        },
        PairMatcher::HighMidLow {
            mid: ColumnMatcher::new(DATA_KEYS, plain.clone()),
            minus: ColumnMatcher::new(DATA_KEYS.map(|k| format!("-{k}-ERR")), plain.clone()),
            plus: ColumnMatcher::new(DATA_KEYS.map(|k| format!("+{k}-ERR")), plain.clone()),
        },
        PairMatcher::AddErrorBars {
            value: ColumnMatcher::new(DATA_KEYS, plain.clone()),
            systematic: ColumnMatcher::new(SYSTEMATIC_ERROR_KEYS, with_percent.clone()),
            statistical: ColumnMatcher::new(STATISTICAL_ERROR_KEYS, with_percent),
        },
        PairMatcher::MissingError {
            value: ColumnMatcher::new(labels(&DATA_KEYS, &[&VARIABLE_SUFFIXES]), plain),
        },
    ]
}

/// Differential `DATA` strategies: value with an optional error column
fn spectrum_strategies(families: &[UnitFamily]) -> Vec<PairMatcher> {
    let plain = units(families, false);
    let value = || ColumnMatcher::new(labels(&DATA_KEYS, &[&VARIABLE_SUFFIXES, &FRAME_SUFFIXES]), plain.clone());
    let mut error_labels = labels(&DATA_KEYS, &[&ERROR_SUFFIXES]);
    error_labels.extend(TOTAL_ERROR_KEYS.map(String::from));
    vec![
        PairMatcher::Independent {
            value: value(),
            error: ColumnMatcher::new(error_labels, units(families, true)),
        },
        PairMatcher::MissingError { value: value() },
    ]
}
