// Unit systems declared in the PLT header

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    MetricBars,
    MetricKilopascals,
    MetricKgCm2,
    English,
    Lab,
}

/// Physical quantity a value is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Compressibility,
    Density,
    FormationVolumeFactorGas,
    FormationVolumeFactorOil,
    Fraction,
    GasLiquidRatio,
    Length,
    Moles,
    Permeability,
    Pressure,
    PressureAbsolute,
    ReservoirRates,
    ReservoirVolumes,
    SurfaceRatesGas,
    SurfaceRatesLiquid,
    SurfaceVolumesGas,
    SurfaceVolumesLiquid,
    Temperature,
    Time,
    Viscosity,
    Volume,
    WaterCut,
}

impl Measure {
    pub const ALL: [Measure; 22] = [
        Measure::Compressibility,
        Measure::Density,
        Measure::FormationVolumeFactorGas,
        Measure::FormationVolumeFactorOil,
        Measure::Fraction,
        Measure::GasLiquidRatio,
        Measure::Length,
        Measure::Moles,
        Measure::Permeability,
        Measure::Pressure,
        Measure::PressureAbsolute,
        Measure::ReservoirRates,
        Measure::ReservoirVolumes,
        Measure::SurfaceRatesGas,
        Measure::SurfaceRatesLiquid,
        Measure::SurfaceVolumesGas,
        Measure::SurfaceVolumesLiquid,
        Measure::Temperature,
        Measure::Time,
        Measure::Viscosity,
        Measure::Volume,
        Measure::WaterCut,
    ];
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 5] = [
        UnitSystem::MetricBars,
        UnitSystem::MetricKilopascals,
        UnitSystem::MetricKgCm2,
        UnitSystem::English,
        UnitSystem::Lab,
    ];

    /// Exact match on the 6-byte header tag. There is no fallback.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"METBAR" => Some(UnitSystem::MetricBars),
            b"METKPA" => Some(UnitSystem::MetricKilopascals),
            b"METKG/" => Some(UnitSystem::MetricKgCm2),
            b"ENGLIS" => Some(UnitSystem::English),
            b"LAB   " => Some(UnitSystem::Lab),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static [u8; 6] {
        match self {
            UnitSystem::MetricBars => b"METBAR",
            UnitSystem::MetricKilopascals => b"METKPA",
            UnitSystem::MetricKgCm2 => b"METKG/",
            UnitSystem::English => b"ENGLIS",
            UnitSystem::Lab => b"LAB   ",
        }
    }

    pub fn unit_str(&self, measure: Measure) -> &'static str {
        use Measure::*;
        match self {
            UnitSystem::English => match measure {
                Compressibility => "PSI-1",
                Density => "LB/FT3",
                FormationVolumeFactorGas => "RB/MSCF",
                FormationVolumeFactorOil => "RB/STB",
                Fraction => "",
                GasLiquidRatio => "MSCF/STB",
                Length => "FT",
                Moles => "LB-M",
                Permeability => "MD",
                Pressure => "PSI",
                PressureAbsolute => "PSIA",
                ReservoirRates => "RB/DAY",
                ReservoirVolumes => "kRB",
                SurfaceRatesGas => "MSCF/DAY",
                SurfaceRatesLiquid => "STB/DAY",
                SurfaceVolumesGas => "MMSCF",
                SurfaceVolumesLiquid => "kSTB",
                Temperature => "F",
                Time => "DAY",
                Viscosity => "CP",
                Volume => "FT3",
                WaterCut => "STB/STB",
            },
            UnitSystem::Lab => match measure {
                Compressibility => "PSI-1",
                Density => "GM/CC",
                FormationVolumeFactorGas => "CC/CC",
                FormationVolumeFactorOil => "CC/CC",
                Fraction => "",
                GasLiquidRatio => "CC/CC",
                Length => "CM",
                Moles => "GM-M",
                Permeability => "MD",
                Pressure => "PSI",
                PressureAbsolute => "PSIA",
                ReservoirRates => "CC/HR",
                ReservoirVolumes => "CC",
                SurfaceRatesGas => "CC/HR",
                SurfaceRatesLiquid => "CC/HR",
                SurfaceVolumesGas => "CC",
                SurfaceVolumesLiquid => "CC",
                Temperature => "C",
                Time => "HR",
                Viscosity => "CP",
                Volume => "CC",
                WaterCut => "CC/CC",
            },
            // The metric systems differ only in pressure units
            metric => match measure {
                Compressibility => match metric {
                    UnitSystem::MetricKilopascals => "KPA-1",
                    UnitSystem::MetricKgCm2 => "KG/CM2-1",
                    _ => "BARS-1",
                },
                Pressure => match metric {
                    UnitSystem::MetricKilopascals => "KPA",
                    UnitSystem::MetricKgCm2 => "KG/CM2",
                    _ => "BARS",
                },
                PressureAbsolute => match metric {
                    UnitSystem::MetricKilopascals => "KPAA",
                    UnitSystem::MetricKgCm2 => "KG/CM2A",
                    _ => "BARSA",
                },
                Density => "KG/M3",
                FormationVolumeFactorGas => "RM3/SM3",
                FormationVolumeFactorOil => "RM3/SM3",
                Fraction => "",
                GasLiquidRatio => "SM3/SM3",
                Length => "M",
                Moles => "KG-M",
                Permeability => "MD",
                ReservoirRates => "RM3/DAY",
                ReservoirVolumes => "kRM3",
                SurfaceRatesGas => "SM3/DAY",
                SurfaceRatesLiquid => "SM3/DAY",
                SurfaceVolumesGas => "kSM3",
                SurfaceVolumesLiquid => "kSM3",
                Temperature => "C",
                Time => "DAY",
                Viscosity => "CP",
                Volume => "M3",
                WaterCut => "SM3/SM3",
            },
        }
    }

    /// Unit of a Nexus variable keyword, e.g. `QOP`. Empty when the keyword
    /// has no known measure.
    pub fn unit_for_keyword(&self, keyword: &str) -> &'static str {
        keyword_measure(keyword.trim_end()).map_or("", |m| self.unit_str(m))
    }
}

pub fn keyword_measure(keyword: &str) -> Option<Measure> {
    keyword_measures().get(keyword).copied()
}

fn keyword_measures() -> &'static HashMap<&'static str, Measure> {
    static TABLE: OnceLock<HashMap<&'static str, Measure>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use Measure::*;
        HashMap::from([
            ("QOP", SurfaceRatesLiquid),
            ("QWP", SurfaceRatesLiquid),
            ("QGP", SurfaceRatesGas),
            ("GOR", GasLiquidRatio),
            ("WCUT", WaterCut),
            ("COP", SurfaceVolumesLiquid),
            ("CWP", SurfaceVolumesLiquid),
            ("CGP", SurfaceVolumesGas),
            ("QWI", SurfaceRatesLiquid),
            ("QGI", SurfaceRatesGas),
            ("CWI", SurfaceVolumesLiquid),
            ("CGI", SurfaceVolumesGas),
            ("QPP", SurfaceRatesLiquid),
            ("CPP", SurfaceVolumesLiquid),
            ("PRES", Pressure),
            ("BHP", Pressure),
            ("THP", Pressure),
        ])
    })
}
