use bls12_381::Scalar;
use std::ops::{Deref, DerefMut};

/// A polynomial in coefficient form, lowest degree term first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolyCoeff(pub Vec<Scalar>);

impl Deref for PolyCoeff {
    type Target = Vec<Scalar>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PolyCoeff {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Scalar>> for PolyCoeff {
    fn from(coeffs: Vec<Scalar>) -> Self {
        PolyCoeff(coeffs)
    }
}

/// Removes trailing zero coefficients (the highest-degree terms), so that
/// the last coefficient of a non-zero polynomial is never zero.
fn truncate_leading_zeros(mut coeffs: Vec<Scalar>) -> Vec<Scalar> {
    while coeffs.last() == Some(&Scalar::ZERO) {
        coeffs.pop();
    }
    coeffs
}

impl PolyCoeff {
    pub fn add(&self, other: &Self) -> Self {
        let (longer, shorter) = if self.0.len() >= other.0.len() {
            (&self.0, &other.0)
        } else {
            (&other.0, &self.0)
        };

        let mut result = longer.clone();
        for (r, s) in result.iter_mut().zip(shorter.iter()) {
            *r += s;
        }

        PolyCoeff(truncate_leading_zeros(result))
    }

    pub fn neg(&self) -> Self {
        PolyCoeff(self.0.iter().map(|c| -c).collect())
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Evaluates the polynomial at `x` using Horner's method.
    pub fn eval(&self, x: &Scalar) -> Scalar {
        self.0
            .iter()
            .rev()
            .fold(Scalar::ZERO, |acc, coeff| acc * x + coeff)
    }

    /// Naive O(n^2) polynomial multiplication.
    pub fn mul(&self, other: &Self) -> Self {
        if self.0.is_empty() || other.0.is_empty() {
            return PolyCoeff(Vec::new());
        }

        let mut result = vec![Scalar::ZERO; self.0.len() + other.0.len() - 1];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in other.0.iter().enumerate() {
                result[i + j] += a * b;
            }
        }

        PolyCoeff(truncate_leading_zeros(result))
    }
}

/// Computes the monic polynomial whose roots are exactly `roots`.
pub fn vanishing_poly(roots: &[Scalar]) -> PolyCoeff {
    let mut poly = PolyCoeff(vec![Scalar::ONE]);
    for root in roots {
        let linear = PolyCoeff(vec![-root, Scalar::ONE]);
        poly = poly.mul(&linear);
    }
    poly
}

/// Interpolates the unique lowest-degree polynomial passing through `points`,
/// returning `None` if two points share the same x-coordinate.
pub fn lagrange_interpolate(points: &[(Scalar, Scalar)]) -> Option<PolyCoeff> {
    for (i, (x_i, _)) in points.iter().enumerate() {
        for (x_j, _) in &points[i + 1..] {
            if x_i == x_j {
                return None;
            }
        }
    }

    let mut result = PolyCoeff(Vec::new());

    for (i, (x_i, y_i)) in points.iter().enumerate() {
        let mut numerator = PolyCoeff(vec![Scalar::ONE]);
        let mut denominator = Scalar::ONE;

        for (j, (x_j, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = numerator.mul(&PolyCoeff(vec![-x_j, Scalar::ONE]));
            denominator *= *x_i - x_j;
        }

        let denominator_inv = denominator.invert().expect("points have distinct x-coordinates");
        let scale = *y_i * denominator_inv;
        let scaled: Vec<_> = numerator.0.iter().map(|c| *c * scale).collect();

        result = result.add(&PolyCoeff(scaled));
    }

    Some(result)
}

/// Evaluates `poly` (in coefficient form) at `x`.
pub fn poly_eval(poly: &[Scalar], x: &Scalar) -> Scalar {
    PolyCoeff(poly.to_vec()).eval(x)
}

/// Subtracts `b` from `a`, both in coefficient form.
pub fn poly_sub(a: Vec<Scalar>, b: Vec<Scalar>) -> Vec<Scalar> {
    PolyCoeff(a).sub(&PolyCoeff(b)).0
}

/// Adds two polynomials in coefficient form, padding the shorter with zeros.
pub fn poly_add(a: Vec<Scalar>, b: Vec<Scalar>) -> Vec<Scalar> {
    PolyCoeff(a).add(&PolyCoeff(b)).0
}
