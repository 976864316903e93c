//! Protocol configuration.

use std::fmt;
use std::str::FromStr;

use mpdh_primitives::ec::scalar::DEFAULT_SAMPLING_ATTEMPTS;
use mpdh_primitives::ec::{DhCurve, NistP256, Secp256k1};

use crate::ProtocolError;

/// The curves a front end can select at runtime.
///
/// Library components are generic over [`DhCurve`]; this value is what a
/// caller dispatches on to pick the type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    /// NIST P-256 (prime256v1).
    #[default]
    P256,
    /// secp256k1.
    Secp256k1,
}

impl CurveKind {
    /// The curve's display name.
    pub fn name(&self) -> &'static str {
        match self {
            CurveKind::P256 => NistP256::NAME,
            CurveKind::Secp256k1 => Secp256k1::NAME,
        }
    }

    /// The kind matching a curve type, if it is one of the supported curves.
    pub fn of<C: DhCurve>() -> Option<Self> {
        [CurveKind::P256, CurveKind::Secp256k1]
            .into_iter()
            .find(|kind| kind.name() == C::NAME)
    }
}

impl FromStr for CurveKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p256" | "p-256" | "prime256v1" | "secp256r1" => Ok(CurveKind::P256),
            "secp256k1" | "k256" => Ok(CurveKind::Secp256k1),
            _ => Err(ProtocolError::UnknownCurve(s.to_string())),
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by all protocol components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// Curve the caller intends to run over.
    pub curve: CurveKind,
    /// Rejection-sampling draws allowed per random scalar before the random
    /// source is treated as exhausted.
    pub sampling_attempts: u32,
}

impl ProtocolConfig {
    /// Create a config for `curve` with the default sampling bound.
    ///
    /// # Arguments
    /// * `curve` - the curve every component built from this config must run over
    pub fn new(curve: CurveKind) -> Self {
        ProtocolConfig {
            curve,
            sampling_attempts: DEFAULT_SAMPLING_ATTEMPTS,
        }
    }

    /// Create a config for the curve type `C`.
    ///
    /// # Returns
    /// The config, or `UnknownCurve` if `C` is not a curve [`CurveKind`] can name.
    pub fn for_curve<C: DhCurve>() -> Result<Self, ProtocolError> {
        CurveKind::of::<C>()
            .map(Self::new)
            .ok_or_else(|| ProtocolError::UnknownCurve(C::NAME.to_string()))
    }

    /// Replace the number of rejection-sampling draws per random scalar.
    ///
    /// # Arguments
    /// * `attempts` - draws allowed before the random source is declared failed
    pub fn with_sampling_attempts(mut self, attempts: u32) -> Self {
        self.sampling_attempts = attempts;
        self
    }

    /// Check that a component over curve type `C` may use this config.
    ///
    /// # Returns
    /// `CurveMismatch` if the configured curve is not `C`.
    pub fn ensure_curve<C: DhCurve>(&self) -> Result<(), ProtocolError> {
        if CurveKind::of::<C>() == Some(self.curve) {
            Ok(())
        } else {
            Err(ProtocolError::CurveMismatch {
                configured: self.curve,
                actual: C::NAME,
            })
        }
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::new(CurveKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_curve_names() {
        assert_eq!("p256".parse::<CurveKind>().unwrap(), CurveKind::P256);
        assert_eq!("P-256".parse::<CurveKind>().unwrap(), CurveKind::P256);
        assert_eq!("secp256k1".parse::<CurveKind>().unwrap(), CurveKind::Secp256k1);
        assert!(matches!(
            "ed25519".parse::<CurveKind>(),
            Err(ProtocolError::UnknownCurve(_))
        ));
    }

    #[test]
    fn test_kind_of_curve_type() {
        assert_eq!(CurveKind::of::<NistP256>(), Some(CurveKind::P256));
        assert_eq!(CurveKind::of::<Secp256k1>(), Some(CurveKind::Secp256k1));
    }

    #[test]
    fn test_default_config() {
        let config = ProtocolConfig::default();
        assert_eq!(config.curve, CurveKind::P256);
        assert_eq!(config.sampling_attempts, DEFAULT_SAMPLING_ATTEMPTS);
        assert_eq!(config.with_sampling_attempts(3).sampling_attempts, 3);
        assert_eq!(CurveKind::Secp256k1.to_string(), "secp256k1");
    }

    #[test]
    fn test_config_for_curve_type() {
        let config = ProtocolConfig::for_curve::<Secp256k1>().unwrap();
        assert_eq!(config.curve, CurveKind::Secp256k1);
        config.ensure_curve::<Secp256k1>().unwrap();
    }

    #[test]
    fn test_ensure_curve_rejects_other_curve() {
        let config = ProtocolConfig::new(CurveKind::P256);
        assert!(config.ensure_curve::<NistP256>().is_ok());
        let err = config.ensure_curve::<Secp256k1>().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::CurveMismatch {
                configured: CurveKind::P256,
                actual: "secp256k1",
            }
        ));
    }
}
