use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

/// Error type returned by [`Settings::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A settings field took an unreasonable value
    #[error("invalid solver settings: {0}")]
    BadFieldValue(&'static str),
}

/// Solver configuration, shared by the case solver and the simplex
/// engine.
///
/// Defaults can be modified directly or via the derived
/// [`SettingsBuilder`]:
///
/// ```no_run
/// use karush::Settings;
/// let settings = Settings::<f64>::default();
/// ```
#[derive(Builder, Debug, Clone)]
pub struct Settings<T: FloatT> {
    /// verbose printing to stdout
    #[builder(default = "false")]
    pub verbose: bool,

    /// feasibility and dual-sign check tolerance
    #[builder(default = "(1e-6).as_T()")]
    pub tol_feas: T,

    /// pivot magnitudes at or below this count as zero
    #[builder(default = "(1e-12).as_T()")]
    pub zero_pivot_tol: T,

    /// eigenvalues above −eps_convexity count as nonnegative
    #[builder(default = "(1e-9).as_T()")]
    pub eps_convexity: T,

    /// simplex pivot limit across both phases
    #[builder(default = "200")]
    pub max_pivots: u32,

    /// refuse case enumeration beyond this many inequalities
    #[builder(default = "16")]
    pub max_enumeration_ineqs: u32,

    /// wall-clock budget in seconds (unlimited when infinite)
    #[builder(default = "f64::INFINITY")]
    pub time_limit: f64,

    /// Newton iteration limit per starting point
    #[builder(default = "50")]
    pub newton_max_iter: u32,

    /// Newton residual tolerance
    #[builder(default = "(1e-10).as_T()")]
    pub newton_tol: T,

    /// smallest Newton damping factor before a step is abandoned
    #[builder(default = "(1e-10).as_T()")]
    pub newton_min_step: T,
}

impl<T> Default for Settings<T>
where
    T: FloatT,
{
    fn default() -> Settings<T> {
        SettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> Settings<T>
where
    T: FloatT,
{
    /// Sanity check on settings.
    ///
    /// Called by the solvers on entry so that a nonsensical
    /// configuration fails loudly instead of looping or accepting
    /// garbage answers.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tol_feas <= T::zero() {
            return Err(SettingsError::BadFieldValue("tol_feas must be positive"));
        }
        if self.zero_pivot_tol <= T::zero() {
            return Err(SettingsError::BadFieldValue(
                "zero_pivot_tol must be positive",
            ));
        }
        if self.eps_convexity < T::zero() {
            return Err(SettingsError::BadFieldValue(
                "eps_convexity must be nonnegative",
            ));
        }
        if self.max_pivots == 0 {
            return Err(SettingsError::BadFieldValue("max_pivots must be positive"));
        }
        // the case count 2^m is held in a u64
        if self.max_enumeration_ineqs > 63 {
            return Err(SettingsError::BadFieldValue(
                "max_enumeration_ineqs must be at most 63",
            ));
        }
        if self.time_limit <= 0.0 {
            return Err(SettingsError::BadFieldValue("time_limit must be positive"));
        }
        if self.newton_max_iter == 0 {
            return Err(SettingsError::BadFieldValue(
                "newton_max_iter must be positive",
            ));
        }
        if self.newton_tol <= T::zero() || self.newton_min_step <= T::zero() {
            return Err(SettingsError::BadFieldValue(
                "newton tolerances must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::<f64>::default();
        assert!(settings.validate().is_ok());
        assert!(!settings.verbose);
        assert_eq!(settings.max_enumeration_ineqs, 16);
    }

    #[test]
    fn test_builder_and_validation() {
        let settings = SettingsBuilder::<f64>::default()
            .tol_feas(1e-8)
            .max_pivots(500)
            .build()
            .unwrap();
        assert_eq!(settings.tol_feas, 1e-8);
        assert_eq!(settings.max_pivots, 500);

        let bad = SettingsBuilder::<f64>::default()
            .time_limit(0.0)
            .build()
            .unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_enumeration_cap_is_bounded() {
        // 2^m must stay representable in the u64 case counter
        let bad = SettingsBuilder::<f64>::default()
            .max_enumeration_ineqs(64)
            .build()
            .unwrap();
        assert!(bad.validate().is_err());

        let ok = SettingsBuilder::<f64>::default()
            .max_enumeration_ineqs(63)
            .build()
            .unwrap();
        assert!(ok.validate().is_ok());
    }
}
