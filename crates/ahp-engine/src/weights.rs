//! Weight derivation
//!
//! Six pairwise sliders become a 4x4 reciprocal comparison matrix on the
//! Saaty scale. Weights are the row means of the column-normalized matrix,
//! the usual approximation of the principal eigenvector.

use analysis_core::{Criterion, SliderInput, WeightVector};
use nalgebra::Matrix4;

/// Map a slider position to a Saaty intensity.
///
/// The value is rounded to the nearest integer (ties to even). Negative
/// positions favor the row criterion (3, 5, 7, 9), positive positions the
/// column criterion (1/3 .. 1/9). Anything outside [-4, 4] after rounding,
/// or non-finite, is treated as indifferent.
pub fn saaty_intensity(value: f64) -> f64 {
    if !value.is_finite() {
        return 1.0;
    }
    match value.round_ties_even() as i64 {
        -4 => 9.0,
        -3 => 7.0,
        -2 => 5.0,
        -1 => 3.0,
        0 => 1.0,
        1 => 1.0 / 3.0,
        2 => 1.0 / 5.0,
        3 => 1.0 / 7.0,
        4 => 1.0 / 9.0,
        _ => 1.0,
    }
}

/// Positive reciprocal matrix over (Risk, Profit, Value, Dividend)
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix(Matrix4<f64>);

impl ComparisonMatrix {
    pub fn from_sliders(sliders: &SliderInput) -> Self {
        let rp = saaty_intensity(sliders.risk_profit);
        let rv = saaty_intensity(sliders.risk_value);
        let rd = saaty_intensity(sliders.risk_div);
        let pv = saaty_intensity(sliders.profit_value);
        let pd = saaty_intensity(sliders.profit_div);
        let vd = saaty_intensity(sliders.value_div);

        #[rustfmt::skip]
        let matrix = Matrix4::new(
            1.0,      rp,       rv,       rd,
            1.0 / rp, 1.0,      pv,       pd,
            1.0 / rv, 1.0 / pv, 1.0,      vd,
            1.0 / rd, 1.0 / pd, 1.0 / vd, 1.0,
        );
        Self(matrix)
    }

    /// How strongly `row` is preferred over `col`
    pub fn entry(&self, row: Criterion, col: Criterion) -> f64 {
        self.0[(row.index(), col.index())]
    }

    pub fn as_matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    /// Normalize each column to sum 1, then average each row.
    ///
    /// Every entry is at least 1/9, so no column sum can be zero.
    pub fn priority_vector(&self) -> WeightVector {
        let col_sums: [f64; 4] = std::array::from_fn(|j| self.0.column(j).sum());
        let normalized = Matrix4::from_fn(|i, j| self.0[(i, j)] / col_sums[j]);
        WeightVector::new(std::array::from_fn(|i| normalized.row(i).mean()))
    }
}

/// Slider positions to criterion weights. Total over all inputs.
pub fn derive_weights(sliders: &SliderInput) -> WeightVector {
    let weights = ComparisonMatrix::from_sliders(sliders).priority_vector();
    tracing::debug!(?weights, "derived AHP weights");
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const POSITIONS: [f64; 9] = [-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0];

    #[test]
    fn test_saaty_scale() {
        assert_eq!(saaty_intensity(-4.0), 9.0);
        assert_eq!(saaty_intensity(-1.0), 3.0);
        assert_eq!(saaty_intensity(0.0), 1.0);
        assert_relative_eq!(saaty_intensity(2.0), 0.2);
        assert_relative_eq!(saaty_intensity(4.0), 1.0 / 9.0);
    }

    #[test]
    fn test_saaty_rounds_ties_to_even() {
        assert_eq!(saaty_intensity(0.5), 1.0);
        assert_relative_eq!(saaty_intensity(1.5), 0.2);
        assert_relative_eq!(saaty_intensity(2.5), 0.2);
        assert_eq!(saaty_intensity(-2.5), 5.0);
        assert_eq!(saaty_intensity(-3.7), 9.0);
    }

    #[test]
    fn test_saaty_out_of_range_fails_closed() {
        assert_eq!(saaty_intensity(5.0), 1.0);
        assert_eq!(saaty_intensity(-12.0), 1.0);
        assert_eq!(saaty_intensity(4.6), 1.0);
        assert_eq!(saaty_intensity(f64::NAN), 1.0);
        assert_eq!(saaty_intensity(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_indifferent_sliders_give_uniform_weights() {
        let w = derive_weights(&SliderInput::default());
        for c in Criterion::ALL {
            assert_relative_eq!(w.get(c), 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_matrix_is_reciprocal() {
        let sliders = SliderInput {
            risk_profit: -3.0,
            risk_value: 2.0,
            risk_div: 4.0,
            profit_value: -1.0,
            profit_div: 0.0,
            value_div: 3.0,
        };
        let m = ComparisonMatrix::from_sliders(&sliders);
        for row in Criterion::ALL {
            assert_eq!(m.entry(row, row), 1.0);
            for col in Criterion::ALL {
                assert_relative_eq!(m.entry(row, col) * m.entry(col, row), 1.0, epsilon = 1e-12);
            }
        }
        assert_eq!(m.entry(Criterion::Risk, Criterion::Profit), 7.0);
        assert_relative_eq!(m.entry(Criterion::Dividend, Criterion::Value), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_strong_risk_preference() {
        let sliders = SliderInput {
            risk_profit: -4.0,
            ..Default::default()
        };
        let w = derive_weights(&sliders);

        assert_relative_eq!(w.get(Criterion::Risk), 0.392857, epsilon = 1e-6);
        assert_relative_eq!(w.get(Criterion::Profit), 0.154762, epsilon = 1e-6);
        assert_relative_eq!(w.get(Criterion::Value), 0.226190, epsilon = 1e-6);
        assert_relative_eq!(w.get(Criterion::Dividend), 0.226190, epsilon = 1e-6);
    }

    #[test]
    fn test_half_percent_weight_rounds_to_even() {
        let w = derive_weights(&SliderInput {
            risk_profit: -4.0,
            risk_value: -3.0,
            risk_div: -1.0,
            ..Default::default()
        });
        assert_relative_eq!(w.get(Criterion::Risk) * 100.0, 64.5, epsilon = 1e-9);
        assert_eq!(w.percentages().risk, 64);
    }

    #[test]
    fn test_every_slider_combination_is_a_distribution() {
        // 9^6 combinations
        for &rp in &POSITIONS {
            for &rv in &POSITIONS {
                for &rd in &POSITIONS {
                    for &pv in &POSITIONS {
                        for &pd in &POSITIONS {
                            for &vd in &POSITIONS {
                                let w = derive_weights(&SliderInput {
                                    risk_profit: rp,
                                    risk_value: rv,
                                    risk_div: rd,
                                    profit_value: pv,
                                    profit_div: pd,
                                    value_div: vd,
                                });
                                assert!(w.as_array().iter().all(|&x| x >= 0.0));
                                assert!((w.sum() - 1.0).abs() < 1e-9, "sum {} for {:?}", w.sum(), w);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_garbage_input_still_sums_to_one() {
        let w = derive_weights(&SliderInput {
            risk_profit: f64::NAN,
            risk_value: 1e9,
            risk_div: -0.4,
            profit_value: 3.49,
            profit_div: f64::NEG_INFINITY,
            value_div: -7.0,
        });
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-9);
    }
}
