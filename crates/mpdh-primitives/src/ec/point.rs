//! Validated curve points.
//!
//! A `Point` is always on the curve and never the identity; both checks run
//! when the value is constructed, so arithmetic never has to re-validate.

use std::fmt;

use elliptic_curve::group::Group;
use elliptic_curve::point::AffineCoordinates;
use elliptic_curve::{AffinePoint, FieldBytes, ProjectivePoint};

use crate::codec::{point_from_pem, point_to_pem};
use crate::ec::{DhCurve, Scalar};
use crate::PrimitivesError;

/// A non-identity point on the curve, such as a public key or ephemeral public key.
pub struct Point<C: DhCurve> {
    inner: AffinePoint<C>,
}

impl<C: DhCurve> Point<C> {
    /// Wrap an affine point, rejecting the identity.
    pub fn from_affine(affine: AffinePoint<C>) -> Result<Self, PrimitivesError> {
        let projective = C::ProjectivePoint::from(affine);
        if bool::from(projective.is_identity()) {
            return Err(PrimitivesError::PointAtInfinity);
        }
        Ok(Point { inner: affine })
    }

    /// Normalize a projective point, rejecting the identity.
    pub fn from_projective(projective: ProjectivePoint<C>) -> Result<Self, PrimitivesError> {
        if bool::from(projective.is_identity()) {
            return Err(PrimitivesError::PointAtInfinity);
        }
        Ok(Point {
            inner: projective.into(),
        })
    }

    /// Parse a SEC1 encoded point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        Self::from_affine(C::from_sec1_bytes(bytes)?)
    }

    /// Parse a PEM `SubjectPublicKeyInfo` document.
    pub fn from_pem(text: &str) -> Result<Self, PrimitivesError> {
        point_from_pem(text)
    }

    /// Serialize as a PEM `SubjectPublicKeyInfo` document.
    pub fn to_pem(&self) -> Result<String, PrimitivesError> {
        point_to_pem(self)
    }

    /// Scalar-base multiplication `k · G`.
    ///
    /// # Returns
    /// The product, or `PointAtInfinity` if `k` is zero.
    pub fn mul_base(k: &Scalar<C>) -> Result<Self, PrimitivesError> {
        Self::from_projective(C::ProjectivePoint::generator() * *k.as_inner())
    }

    /// Scalar multiplication `k · self`.
    ///
    /// # Returns
    /// The product, or `PointAtInfinity` if it is the identity.
    pub fn mul(&self, k: &Scalar<C>) -> Result<Self, PrimitivesError> {
        Self::from_projective(self.scale(k))
    }

    /// Scalar multiplication `k · self` without normalizing or validating the result.
    ///
    /// The product may be the identity (for example when `k` is zero).
    pub fn scale(&self, k: &Scalar<C>) -> ProjectivePoint<C> {
        self.to_projective() * *k.as_inner()
    }

    /// Point addition `self + other`.
    ///
    /// # Returns
    /// The sum, or `PointAtInfinity` if the points are inverses of each other.
    pub fn add(&self, other: &Self) -> Result<Self, PrimitivesError> {
        Self::from_projective(self.to_projective() + other.to_projective())
    }

    /// The big-endian affine x-coordinate.
    pub fn x_bytes(&self) -> FieldBytes<C> {
        self.inner.x()
    }

    /// Access the underlying affine point.
    pub fn as_affine(&self) -> &AffinePoint<C> {
        &self.inner
    }

    /// Convert to projective coordinates for arithmetic.
    pub fn to_projective(&self) -> ProjectivePoint<C> {
        C::ProjectivePoint::from(self.inner)
    }
}

impl<C: DhCurve> Clone for Point<C> {
    fn clone(&self) -> Self {
        Point { inner: self.inner }
    }
}

impl<C: DhCurve> PartialEq for Point<C> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<C: DhCurve> Eq for Point<C> {}

impl<C: DhCurve> fmt::Debug for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point<{}>(x={})", C::NAME, hex::encode(self.x_bytes()))
    }
}
