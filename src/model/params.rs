//! Parameters of the generic eukaryotic cell-cycle model
//!
//! Constants from the supplementary materials of Csikász-Nagy, Battogtokh,
//! Chen, Novák, Tyson: *Analysis of a generic model of eukaryotic
//! cell-cycle regulation*, Biophys J 2006. The paper provides datasets for
//! budding yeast, fission yeast, mammalian cells and Xenopus embryos; this
//! crate ships the mammalian column, which is the one the canonical net is
//! tuned for. Constants the mammalian dataset leaves undefined are zero,
//! which is what makes the G2 (Wee1/Cdc25) and TFI modules inert.
//!
//! Rate constants (`k*`) are published in min⁻¹ and stored here in s⁻¹;
//! saturation constants (`j*`), the Hill exponent and the CycD scaling
//! factor are dimensionless and kept as published.

use serde::{Deserialize, Serialize};

use crate::core::units::{hours, per_minute};

/// ActCycB level below which a licensed cell divides.
pub const CYCB_DIVISION_THRESHOLD: f64 = 0.3;

/// The two parameterizations of cell growth given by the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthCase {
    /// Case 1: 24 h mass doubling time
    Case1,
    /// Case 2: 14 h mass doubling time
    Case2,
}

impl GrowthCase {
    /// Mass doubling time in seconds.
    pub fn mass_doubling_time(&self) -> f64 {
        match self {
            GrowthCase::Case1 => hours(24.0),
            GrowthCase::Case2 => hours(14.0),
        }
    }

    /// First-order growth rate constant, ln 2 over the doubling time.
    pub fn growth_rate(&self) -> f64 {
        std::f64::consts::LN_2 / self.mass_doubling_time()
    }
}

/// One complete constant set for the generic model.
///
/// Passed by value into the net constructors; rate and assignment closures
/// capture the copy they need, so no global state is involved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    // saturation constants
    pub j20: f64,
    pub ja20: f64,
    pub ja25: f64,
    pub ja_apc: f64,
    pub jafb: f64,
    pub jafi: f64,
    pub jah1: f64,
    pub jatf: f64,
    pub jawee: f64,
    pub ji20: f64,
    pub ji25: f64,
    pub ji_apc: f64,
    pub jifb: f64,
    pub jifi: f64,
    pub jih1: f64,
    pub jitf: f64,
    pub jiwee: f64,
    pub j14di: f64,
    // Cdc25 / Wee1 rates (G2 module)
    pub k25p: f64,
    pub k25pp: f64,
    pub ka25: f64,
    pub ki25p: f64,
    pub ki25pp: f64,
    pub kaweep: f64,
    pub kaweepp: f64,
    pub kiwee: f64,
    pub kweep: f64,
    pub kweepp: f64,
    // Cdc20 / APC rates
    pub ka20: f64,
    pub ka_apc: f64,
    pub ki20: f64,
    pub ki_apc: f64,
    pub kd20: f64,
    pub ks20p: f64,
    pub ks20pp: f64,
    // transcription factor rates
    pub kafb: f64,
    pub kifb: f64,
    pub kafi: f64,
    pub kifip: f64,
    pub kifipp: f64,
    pub katfp: f64,
    pub katfpp: f64,
    pub katfppp: f64,
    pub katfpppp: f64,
    pub kitfp: f64,
    pub kitfpp: f64,
    pub kitfppp: f64,
    // Cdh1 rates
    pub kah1p: f64,
    pub kah1pp: f64,
    pub kih1p: f64,
    pub kih1pp: f64,
    pub kih1ppp: f64,
    pub kih1pppp: f64,
    pub kih1ppppp: f64,
    // CKI association / dissociation
    pub kasa: f64,
    pub kasb: f64,
    pub kase: f64,
    pub kdia: f64,
    pub kdib: f64,
    pub kdie: f64,
    // synthesis rates
    pub ksap: f64,
    pub ksapp: f64,
    pub ksbp: f64,
    pub ksbpp: f64,
    pub ksep: f64,
    pub ksepp: f64,
    pub ksip: f64,
    pub ksipp: f64,
    // degradation rates
    pub kdap: f64,
    pub kdapp: f64,
    pub kdappp: f64,
    pub kdbp: f64,
    pub kdbpp: f64,
    pub kdbppp: f64,
    pub kdep: f64,
    pub kdepp: f64,
    pub kdeppp: f64,
    pub kdepppp: f64,
    pub kdip: f64,
    pub kdipp: f64,
    pub kdippp: f64,
    pub kdipppp: f64,
    pub kdippppp: f64,
    // Hill exponent of Cdc20T synthesis
    pub n: f64,
    // CycD level per unit mass
    pub cycd0: f64,
}

impl ParameterSet {
    /// The mammalian dataset.
    pub fn mammalian() -> Self {
        Self {
            j20: 100.0,
            ja20: 0.005,
            ja25: 0.0,
            ja_apc: 0.01,
            jafb: 0.1,
            jafi: 0.0,
            jah1: 0.01,
            jatf: 0.01,
            jawee: 0.0,
            ji20: 0.005,
            ji25: 0.0,
            ji_apc: 0.01,
            jifb: 0.1,
            jifi: 0.0,
            jih1: 0.01,
            jitf: 0.01,
            jiwee: 0.0,
            j14di: 0.0,
            k25p: 0.0,
            k25pp: 0.0,
            ka25: 0.0,
            ki25p: 0.0,
            ki25pp: 0.0,
            kaweep: 0.0,
            kaweepp: 0.0,
            kiwee: 0.0,
            kweep: 0.0,
            kweepp: 0.0,
            ka20: per_minute(0.0833),
            ka_apc: per_minute(0.0117),
            ki20: per_minute(0.0417),
            ki_apc: per_minute(0.03),
            kd20: per_minute(0.025),
            ks20p: 0.0,
            ks20pp: per_minute(2.5),
            kafb: per_minute(0.167),
            kifb: per_minute(0.0167),
            kafi: 0.0,
            kifip: 0.0,
            kifipp: 0.0,
            katfp: 0.0,
            katfpp: per_minute(0.05),
            katfppp: per_minute(0.0833),
            katfpppp: per_minute(0.055),
            kitfp: per_minute(0.0417),
            kitfpp: per_minute(0.0167),
            kitfppp: per_minute(0.0167),
            kah1p: per_minute(0.175),
            kah1pp: per_minute(2.33),
            kih1p: 0.0,
            kih1pp: per_minute(0.2),
            kih1ppp: per_minute(0.667),
            kih1pppp: 0.0,
            kih1ppppp: 0.0,
            kasa: per_minute(16.7),
            kasb: 0.0,
            kase: per_minute(16.7),
            kdia: per_minute(0.167),
            kdib: 0.0,
            kdie: per_minute(0.167),
            ksap: 0.0,
            ksapp: per_minute(0.00417),
            ksbp: per_minute(0.00167),
            ksbpp: per_minute(0.005),
            ksep: per_minute(0.00133),
            ksepp: per_minute(0.05),
            ksip: per_minute(0.333),
            ksipp: 0.0,
            kdap: per_minute(0.000333),
            kdapp: per_minute(0.333),
            kdappp: 0.0,
            kdbp: per_minute(0.000833),
            kdbpp: per_minute(0.333),
            kdbppp: per_minute(0.0167),
            kdep: per_minute(0.00167),
            kdepp: per_minute(0.0167),
            kdeppp: per_minute(0.167),
            kdepppp: per_minute(0.167),
            kdip: per_minute(0.167),
            kdipp: per_minute(0.833),
            kdippp: per_minute(1.67),
            kdipppp: per_minute(0.833),
            kdippppp: 0.0,
            n: 1.0,
            cycd0: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_constants_are_converted_to_per_second() {
        let p = ParameterSet::mammalian();
        assert!((p.kd20 - 0.025 / 60.0).abs() < 1e-15);
        assert!((p.kah1pp - 2.33 / 60.0).abs() < 1e-15);
        assert!((p.kasa - 16.7 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn dimensionless_constants_are_unconverted() {
        let p = ParameterSet::mammalian();
        assert_eq!(p.j20, 100.0);
        assert_eq!(p.n, 1.0);
        assert_eq!(p.cycd0, 0.5);
    }

    #[test]
    fn absent_mammalian_constants_are_zero() {
        let p = ParameterSet::mammalian();
        // the G2 module and TFI are switched off in the mammalian dataset
        assert_eq!(p.kweep, 0.0);
        assert_eq!(p.kweepp, 0.0);
        assert_eq!(p.kafi, 0.0);
        assert_eq!(p.kasb, 0.0);
        assert_eq!(p.kdib, 0.0);
    }

    #[test]
    fn growth_rates_follow_doubling_times() {
        let r1 = GrowthCase::Case1.growth_rate();
        assert!((r1 - std::f64::consts::LN_2 / 86400.0).abs() < 1e-18);
        assert!(GrowthCase::Case2.growth_rate() > r1);
    }
}
