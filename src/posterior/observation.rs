//! Observation bundle — spectroscopy and photometry consumed read-only.
//!
//! Purpose
//! -------
//! Carry the observed data the posterior evaluators compare models
//! against: a masked spectroscopic channel with per-pixel uncertainties
//! and a photometric channel in magnitude space. Either channel may be
//! absent; a missing channel contributes zero to the likelihood.
//!
//! Key behaviors
//! -------------
//! - One-time ingestion rescale of the spectroscopic channel: spectrum
//!   and uncertainty are divided by the median of the masked spectrum to
//!   keep likelihood arithmetic away from floating-point under/overflow.
//!   The factor is retained on the channel so fluxes can be restored.
//! - Magnitudes are converted to maggies (`10^(-0.4 m)`) once at
//!   construction; the evaluators work in flux space.
//!
//! Invariants & assumptions
//! ------------------------
//! - Array lengths agree within a channel; uncertainties are finite and
//!   strictly positive; the mask selects at least one pixel. All are
//!   validated at construction so evaluation never re-checks.
//! - After construction the bundle is never mutated by this crate.
use crate::posterior::errors::{PosteriorError, PosteriorResult};
use ndarray::Array1;

fn validate_len(field: &'static str, expected: usize, actual: usize) -> PosteriorResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(PosteriorError::ChannelLengthMismatch { field, expected, actual })
    }
}

/// Masked spectroscopic channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecObservation {
    wavelength: Array1<f64>,
    spectrum: Array1<f64>,
    unc: Array1<f64>,
    mask: Array1<bool>,
    scale: f64,
}

impl SpecObservation {
    /// Ingest a spectroscopic observation.
    ///
    /// Parameters
    /// ----------
    /// - `wavelength`, `spectrum`, `unc`, `mask`: per-pixel arrays of a
    ///   common length; `mask` selects the pixels that enter the
    ///   likelihood.
    /// - `rescale`: when true, divide `spectrum` and `unc` by the median
    ///   of the masked spectrum and retain the factor in `scale`;
    ///   otherwise `scale` is 1.0.
    ///
    /// Errors
    /// ------
    /// - [`PosteriorError::ChannelLengthMismatch`] for ragged arrays.
    /// - [`PosteriorError::InvalidUncertainty`] for non-finite or
    ///   non-positive uncertainties.
    /// - [`PosteriorError::NoValidPixels`] for an all-false mask.
    /// - [`PosteriorError::InvalidRescale`] when the masked median is
    ///   non-finite or non-positive.
    pub fn new(
        wavelength: Array1<f64>, spectrum: Array1<f64>, unc: Array1<f64>, mask: Array1<bool>,
        rescale: bool,
    ) -> PosteriorResult<Self> {
        let n = wavelength.len();
        validate_len("spectrum", n, spectrum.len())?;
        validate_len("unc", n, unc.len())?;
        validate_len("mask", n, mask.len())?;
        for (index, &value) in unc.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(PosteriorError::InvalidUncertainty { index, value });
            }
        }
        if !mask.iter().any(|&m| m) {
            return Err(PosteriorError::NoValidPixels);
        }

        let mut spectrum = spectrum;
        let mut unc = unc;
        let scale = if rescale {
            let scale = masked_median(&spectrum, &mask);
            if !scale.is_finite() || scale <= 0.0 {
                return Err(PosteriorError::InvalidRescale { value: scale });
            }
            spectrum.mapv_inplace(|v| v / scale);
            unc.mapv_inplace(|v| v / scale);
            scale
        } else {
            1.0
        };
        Ok(SpecObservation { wavelength, spectrum, unc, mask, scale })
    }

    pub fn wavelength(&self) -> &Array1<f64> {
        &self.wavelength
    }

    /// Spectrum in rescaled units (observed flux divided by `scale`).
    pub fn spectrum(&self) -> &Array1<f64> {
        &self.spectrum
    }

    /// Uncertainty in the same rescaled units as the spectrum.
    pub fn unc(&self) -> &Array1<f64> {
        &self.unc
    }

    pub fn mask(&self) -> &Array1<bool> {
        &self.mask
    }

    /// The ingestion rescale factor (1.0 when rescaling was disabled).
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Median of the masked-in pixels. Caller guarantees a non-empty mask.
fn masked_median(values: &Array1<f64>, mask: &Array1<bool>) -> f64 {
    let mut selected: Vec<f64> =
        values.iter().zip(mask.iter()).filter(|(_, &m)| m).map(|(&v, _)| v).collect();
    selected.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = selected.len();
    if n % 2 == 1 {
        selected[n / 2]
    } else {
        0.5 * (selected[n / 2 - 1] + selected[n / 2])
    }
}

/// Photometric channel in magnitude space.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotObservation {
    filters: Vec<String>,
    mags: Array1<f64>,
    mags_unc: Array1<f64>,
    maggies: Array1<f64>,
}

impl PhotObservation {
    /// Ingest a photometric observation.
    ///
    /// Maggies (`10^(-0.4 m)`) are materialized here once; the
    /// evaluators compare model photometry against them in flux space.
    ///
    /// Errors
    /// ------
    /// - [`PosteriorError::ChannelLengthMismatch`] for ragged arrays.
    /// - [`PosteriorError::InvalidUncertainty`] for non-finite or
    ///   non-positive magnitude uncertainties.
    pub fn new(
        filters: Vec<String>, mags: Array1<f64>, mags_unc: Array1<f64>,
    ) -> PosteriorResult<Self> {
        let n = filters.len();
        validate_len("mags", n, mags.len())?;
        validate_len("mags_unc", n, mags_unc.len())?;
        for (index, &value) in mags_unc.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(PosteriorError::InvalidUncertainty { index, value });
            }
        }
        let maggies = mags.mapv(|m| 10f64.powf(-0.4 * m));
        Ok(PhotObservation { filters, mags, mags_unc, maggies })
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn mags(&self) -> &Array1<f64> {
        &self.mags
    }

    pub fn mags_unc(&self) -> &Array1<f64> {
        &self.mags_unc
    }

    /// Observed fluxes in maggies, `10^(-0.4 mags)`.
    pub fn maggies(&self) -> &Array1<f64> {
        &self.maggies
    }
}

/// Full observation bundle; either channel may be absent.
#[derive(Debug, Clone, Default)]
pub struct Observation {
    pub spec: Option<SpecObservation>,
    pub phot: Option<PhotObservation>,
}

impl Observation {
    pub fn new(spec: Option<SpecObservation>, phot: Option<PhotObservation>) -> Self {
        Observation { spec, phot }
    }

    pub fn spec_only(spec: SpecObservation) -> Self {
        Observation { spec: Some(spec), phot: None }
    }

    pub fn phot_only(phot: PhotObservation) -> Self {
        Observation { spec: None, phot: Some(phot) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The one-time median rescale and its retained factor.
    // - Maggie conversion at photometric ingestion.
    // - Validation of ragged arrays, bad uncertainties, and empty masks.
    //
    // They intentionally DO NOT cover:
    // - Likelihood terms built on these channels (see posterior::model).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify ingestion divides spectrum and uncertainty by the masked
    // median and retains the factor.
    //
    // Given
    // -----
    // - Spectrum [2, 4, 100] with the third pixel masked out, rescale on.
    //
    // Expect
    // ------
    // - scale == 3 (median of [2, 4]); spectrum and unc divided by 3.
    fn rescale_divides_by_masked_median_and_retains_factor() {
        // Arrange
        let wavelength = array![1.0, 2.0, 3.0];
        let spectrum = array![2.0, 4.0, 100.0];
        let unc = array![0.3, 0.3, 0.3];
        let mask = array![true, true, false];

        // Act
        let obs = SpecObservation::new(wavelength, spectrum, unc, mask, true).unwrap();

        // Assert
        assert_relative_eq!(obs.scale(), 3.0);
        assert_relative_eq!(obs.spectrum()[0], 2.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(obs.unc()[1], 0.1, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify rescaling can be disabled, leaving data untouched with a
    // unit factor.
    //
    // Given
    // -----
    // - The same arrays with rescale off.
    //
    // Expect
    // ------
    // - scale == 1.0 and spectrum is unchanged.
    fn rescale_disabled_keeps_unit_factor() {
        // Arrange
        let wavelength = array![1.0, 2.0];
        let spectrum = array![2.0, 4.0];
        let unc = array![0.3, 0.3];
        let mask = array![true, true];

        // Act
        let obs = SpecObservation::new(wavelength, spectrum, unc, mask, false).unwrap();

        // Assert
        assert_eq!(obs.scale(), 1.0);
        assert_eq!(obs.spectrum(), &array![2.0, 4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify an all-false mask is rejected at ingestion.
    //
    // Given
    // -----
    // - A two-pixel observation with mask [false, false].
    //
    // Expect
    // ------
    // - SpecObservation::new returns NoValidPixels.
    fn empty_mask_is_rejected() {
        // Arrange & Act
        let res = SpecObservation::new(
            array![1.0, 2.0],
            array![1.0, 1.0],
            array![0.1, 0.1],
            array![false, false],
            true,
        );

        // Assert
        assert_eq!(res, Err(PosteriorError::NoValidPixels));
    }

    #[test]
    // Purpose
    // -------
    // Verify a non-positive uncertainty is rejected with its index.
    //
    // Given
    // -----
    // - unc = [0.1, 0.0].
    //
    // Expect
    // ------
    // - SpecObservation::new returns InvalidUncertainty at index 1.
    fn non_positive_uncertainty_is_rejected() {
        // Arrange & Act
        let res = SpecObservation::new(
            array![1.0, 2.0],
            array![1.0, 1.0],
            array![0.1, 0.0],
            array![true, true],
            false,
        );

        // Assert
        assert_eq!(res, Err(PosteriorError::InvalidUncertainty { index: 1, value: 0.0 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify maggies are materialized from magnitudes at construction.
    //
    // Given
    // -----
    // - mags = [0.0, 2.5].
    //
    // Expect
    // ------
    // - maggies == [1.0, 0.1].
    fn maggies_are_materialized_from_magnitudes() {
        // Arrange & Act
        let phot = PhotObservation::new(
            vec!["sdss_g".to_string(), "sdss_r".to_string()],
            array![0.0, 2.5],
            array![0.05, 0.05],
        )
        .unwrap();

        // Assert
        assert_relative_eq!(phot.maggies()[0], 1.0, max_relative = 1e-12);
        assert_relative_eq!(phot.maggies()[1], 0.1, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify ragged photometric arrays are rejected with the offending
    // field name.
    //
    // Given
    // -----
    // - Two filters but three magnitudes.
    //
    // Expect
    // ------
    // - PhotObservation::new returns ChannelLengthMismatch for 'mags'.
    fn ragged_photometry_is_rejected() {
        // Arrange & Act
        let res = PhotObservation::new(
            vec!["a".to_string(), "b".to_string()],
            array![1.0, 2.0, 3.0],
            array![0.1, 0.1],
        );

        // Assert
        assert_eq!(
            res,
            Err(PosteriorError::ChannelLengthMismatch { field: "mags", expected: 2, actual: 3 })
        );
    }
}
