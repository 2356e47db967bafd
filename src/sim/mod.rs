pub mod driver;
pub mod ensemble;
pub mod fine_step;
pub mod marking;
pub mod recording;

pub use driver::{SimState, Simulation};
pub use ensemble::run_batch;
pub use fine_step::FineStepper;
pub use marking::Marking;
pub use recording::{Recording, Sample};
