//! Tabulation of the rod diagrams at a uniform step along each rod.

use serde::Serialize;

use crate::errors::SamplingError;
use crate::postprocessor::{FullResult, RodResult};

/// Values of the three diagrams at one local coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePoint {
    /// Rod the sample belongs to.
    pub rod_id: usize,
    /// Local coordinate measured from the rod's start node.
    pub x: f64,
    /// Axial force `N(x)`.
    pub axial_force: f64,
    /// Axial stress `σ(x)`.
    pub stress: f64,
    /// Axial displacement `u(x)`.
    pub displacement: f64,
    /// Whether `x` is one of the rod ends.
    pub is_boundary: bool,
}

/// Largest number of rows a single rod may contribute to a table.
pub const MAX_SAMPLES_PER_ROD: usize = 100_000;

impl RodResult {
    /// Sample the diagrams at `0, step, 2·step, …` and at the rod end.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidStep`] when `step` is not a positive
    /// finite number and [`SamplingError::TooManySamples`] when the rod would
    /// need more than [`MAX_SAMPLES_PER_ROD`] rows.
    ///
    /// # Examples
    /// ```
    /// use rodx::{calculate_full, fixed_node, free_node, Rod, StructureInput};
    ///
    /// let structure = StructureInput::new(
    ///     vec![fixed_node(0), free_node(1, 100.0)],
    ///     vec![Rod::new(0, 2.0, 1.0, 1000.0, 10.0)],
    /// );
    /// let result = calculate_full(&structure).expect("supported chain");
    /// let rows = result.result_output[0].sample(0.5).expect("valid step");
    /// let xs: Vec<f64> = rows.iter().map(|p| p.x).collect();
    /// assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    /// ```
    pub fn sample(&self, step: f64) -> Result<Vec<SamplePoint>, SamplingError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(SamplingError::InvalidStep(step));
        }
        // Interior positions plus the end point.
        let intervals = (self.length / step).ceil();
        if !intervals.is_finite() || intervals + 1.0 > MAX_SAMPLES_PER_ROD as f64 {
            return Err(SamplingError::TooManySamples {
                rod: self.rod_id,
                step,
                limit: MAX_SAMPLES_PER_ROD,
            });
        }

        let mut positions: Vec<f64> = (0..intervals as usize)
            .map(|index| index as f64 * step)
            .take_while(|&x| x < self.length)
            .collect();
        positions.push(self.length);

        Ok(positions
            .into_iter()
            .map(|x| SamplePoint {
                rod_id: self.rod_id,
                x,
                axial_force: self.axial_force_coeffs.evaluate(x),
                stress: self.stress_coeffs.evaluate(x),
                displacement: self.displacement_coeffs.evaluate(x),
                is_boundary: x == 0.0 || x == self.length,
            })
            .collect())
    }
}

impl FullResult {
    /// Sample every rod in rod order. See [`RodResult::sample`].
    ///
    /// # Errors
    ///
    /// Fails on the first rod that cannot be sampled.
    pub fn sample(&self, step: f64) -> Result<Vec<SamplePoint>, SamplingError> {
        let mut rows = Vec::new();
        for rod in &self.result_output {
            rows.extend(rod.sample(step)?);
        }
        Ok(rows)
    }
}
