//! Recording: the driver's output sink
//!
//! An append-only sequence of `(time, marking snapshot)` samples, one taken
//! at simulation start and one at every crossed sampling boundary. Export
//! here is deliberately plain (CSV rows, serde JSON); resampling and
//! feature extraction belong to downstream consumers.

use serde::Serialize;
use std::io::Write;

use crate::core::error::Result;

/// One sampled state: elapsed time and the full marking.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub time: f64,
    pub marking: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recording {
    /// Place names, in net order; column headers for the samples.
    place_names: Vec<String>,
    samples: Vec<Sample>,
}

impl Recording {
    pub(crate) fn new(place_names: Vec<String>) -> Self {
        Self {
            place_names,
            samples: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, time: f64, marking: Vec<f64>) {
        self.samples.push(Sample { time, marking });
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn place_names(&self) -> &[String] {
        &self.place_names
    }

    /// Time series of a single place, by its net index.
    pub fn series(&self, place_index: usize) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.time, s.marking[place_index]))
            .collect()
    }

    /// Write the recording as CSV: a `time` column followed by one column
    /// per place.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "time")?;
        for name in &self.place_names {
            write!(writer, ",{name}")?;
        }
        writeln!(writer)?;
        for sample in &self.samples {
            write!(writer, "{}", sample.time)?;
            for value in &sample.marking {
                write!(writer, ",{value}")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Serialize the recording as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
