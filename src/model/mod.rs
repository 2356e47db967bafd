pub mod kinetics;
pub mod mammalian;
pub mod params;
pub mod simple;

pub use mammalian::{mammalian_cycle, MammalianCycle};
pub use params::{GrowthCase, ParameterSet, CYCB_DIVISION_THRESHOLD};
pub use simple::{simple_cycle, SimpleCycle};
