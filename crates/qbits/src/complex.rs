//! Complex amplitudes.
//!
//! Amplitudes are plain [`num_complex::Complex64`] values: immutable `Copy`
//! pairs with exact field-wise `==`, closed under `+`, `-`, `*` and unary
//! `-`, and mixing freely with real `f64` scalars (`z * 0.5`, `z + 1.0`).
//! `conj()` is the conjugate.
//!
//! This module adds the constants used throughout the engine and the
//! human-readable `a+bi` rendering used by [`QState`](crate::QState)'s
//! `Display` impl.

use num_complex::Complex64;

/// Complex scalar used for every amplitude.
pub type Complex = Complex64;

/// `0 + 0i`.
pub const ZERO: Complex = Complex::new(0.0, 0.0);

/// `1 + 0i`.
pub const ONE: Complex = Complex::new(1.0, 0.0);

/// `0 + 1i`.
pub const I: Complex = Complex::new(0.0, 1.0);

/// Options for [`ComplexExt::format_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Round both parts to this many decimal places.
    pub decimal_places: Option<u32>,
    /// Prefix a spaced `" + "` / `" - "` sign, for use after another term.
    pub spaced_sign: bool,
}

impl FormatOptions {
    /// Round to `places` decimals.
    #[must_use]
    pub fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = Some(places);
        self
    }

    /// Emit a leading spaced sign.
    #[must_use]
    pub fn spaced_sign(mut self) -> Self {
        self.spaced_sign = true;
        self
    }
}

/// Engine-level helpers on top of [`Complex64`].
pub trait ComplexExt {
    /// Euclidean norm `√(re² + im²)`.
    fn magnitude(&self) -> f64;

    /// Render as `a+bi`.
    ///
    /// A zero imaginary part prints only the real part and a zero real part
    /// prints only the imaginary part; unit imaginary coefficients print as
    /// `i` / `-i`. With [`FormatOptions::spaced_sign`] the sign of the real
    /// part (or of the imaginary part when the real part is zero) becomes a
    /// `" + "` / `" - "` prefix and the number is printed negated if needed.
    ///
    /// ```rust
    /// use qbits::{Complex, ComplexExt, FormatOptions};
    ///
    /// let z = Complex::new(-1.235959, 3.423523);
    /// assert_eq!(z.format_with(FormatOptions::default()), "-1.235959+3.423523i");
    /// let opts = FormatOptions::default().decimal_places(3).spaced_sign();
    /// assert_eq!(z.format_with(opts), " - 1.236-3.424i");
    /// ```
    fn format_with(&self, options: FormatOptions) -> String;
}

impl ComplexExt for Complex {
    fn magnitude(&self) -> f64 {
        self.norm()
    }

    fn format_with(&self, options: FormatOptions) -> String {
        let mut z = match options.decimal_places {
            Some(places) => {
                let scale = 10f64.powi(places as i32);
                // halves round toward +∞
                let round = |v: f64| (v * scale + 0.5).floor() / scale;
                Complex::new(round(self.re), round(self.im))
            }
            None => *self,
        };

        let mut prefix = "";
        if options.spaced_sign {
            let negative = if z.re != 0.0 { z.re < 0.0 } else { z.im < 0.0 };
            if negative {
                prefix = " - ";
                z = -z;
            } else {
                prefix = " + ";
            }
        }
        format!("{prefix}{}", plain(z))
    }
}

fn plain(z: Complex) -> String {
    if z.im == 0.0 {
        return number(z.re);
    }
    let imaginary = if z.im == 1.0 {
        "i".to_string()
    } else if z.im == -1.0 {
        "-i".to_string()
    } else {
        format!("{}i", number(z.im))
    };
    if z.re == 0.0 {
        return imaginary;
    }
    let sign = if z.im < 0.0 { "" } else { "+" };
    format!("{}{sign}{imaginary}", number(z.re))
}

/// Shortest round-trip decimal; `-0` prints as `0`.
fn number(v: f64) -> String {
    format!("{}", v + 0.0)
}
