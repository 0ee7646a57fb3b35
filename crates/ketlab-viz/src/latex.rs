//! LaTeX rendering of amplitude vectors and matrices.
//!
//! Numbers are shown exactly when they are a small rational (`\frac{1}{2}`)
//! or a rational multiple of a small square root (`\frac{\sqrt{2}}{2}`),
//! and as rounded decimals otherwise. Complex values print as `a + b i`.

use ndarray::{ArrayView1, ArrayView2, Axis, aview1};
use num_complex::Complex64;

const TOLERANCE: f64 = 1e-9;
const MAX_DENOMINATOR: i64 = 50;
const SURDS: [i64; 5] = [2, 3, 5, 6, 7];

/// Rendering options.
#[derive(Debug, Clone)]
pub struct LatexOptions {
    /// Text placed on its own line before the matrix.
    pub prefix: String,
    /// Decimal places kept before recognizing exact forms.
    pub precision: usize,
    /// Rows and columns shown before eliding the middle. Values below 2
    /// are treated as 2.
    pub max_size: usize,
}

impl Default for LatexOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            precision: 10,
            max_size: 8,
        }
    }
}

impl LatexOptions {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.max(2);
        self
    }
}

/// Render `values` as a one-row `bmatrix` wrapped in `$$ … $$`.
///
/// ```rust
/// use num_complex::Complex64;
///
/// let half = Complex64::new(0.5, 0.0);
/// let latex = ketlab_viz::array_to_latex(&[half, half], r"\text{Statevector} = ");
/// assert!(latex.contains(r"\frac{1}{2} & \frac{1}{2}"));
/// ```
pub fn array_to_latex(values: &[Complex64], prefix: &str) -> String {
    let options = LatexOptions::default().with_prefix(prefix);
    matrix_to_latex(aview1(values).insert_axis(Axis(0)), &options)
}

/// Render a matrix as a `bmatrix` wrapped in `$$ … $$`.
pub fn matrix_to_latex(matrix: ArrayView2<'_, Complex64>, options: &LatexOptions) -> String {
    let max = options.max_size.max(2);
    let mut out = format!("$$\n{}\n\\begin{{bmatrix}}\n", options.prefix);

    let rows: Vec<_> = matrix.axis_iter(Axis(0)).collect();
    let render_row = |row: &ArrayView1<'_, Complex64>| {
        let cells: Vec<String> = row.iter().map(|z| num_to_latex(*z, options.precision)).collect();
        let mut line = if cells.len() <= max {
            join_cells(&cells)
        } else {
            let tail = max.div_ceil(2) - 1;
            let mut line = join_cells(&cells[..max / 2]);
            line.push_str("& \\cdots & ");
            line.push_str(&join_cells(&cells[cells.len() - tail..]));
            line
        };
        line.push_str(" \\\\\n ");
        line
    };

    if rows.len() <= max {
        for row in &rows {
            out.push_str(&render_row(row));
        }
    } else {
        let tail = max.div_ceil(2) - 1;
        for row in &rows[..max / 2] {
            out.push_str(&render_row(row));
        }
        out.push_str("\\vdots \\\\\n ");
        for row in &rows[rows.len() - tail..] {
            out.push_str(&render_row(row));
        }
    }

    out.push_str("\\end{bmatrix}\n$$");
    out
}

/// Each cell followed by ` & `, minus the final `& `.
fn join_cells(cells: &[String]) -> String {
    let mut line: String = cells.iter().map(|c| format!("{c} & ")).collect();
    line.truncate(line.len().saturating_sub(2));
    line
}

/// Exact or decimal form of a non-negative real.
#[derive(Debug, Clone)]
enum Magnitude {
    Rational(i64, i64),
    /// `p √k / q`
    Surd(i64, i64, i64),
    Decimal(String),
}

impl Magnitude {
    fn of(x: f64, precision: usize) -> Self {
        if let Some((p, q)) = as_rational(x) {
            return Magnitude::Rational(p, q);
        }
        for k in SURDS {
            if let Some((p, q)) = as_rational(x / (k as f64).sqrt()) {
                return Magnitude::Surd(p, q, k);
            }
        }
        Magnitude::Decimal(decimal(x, precision))
    }

    /// LaTeX with an optional unit (`i`) folded into the numerator.
    fn latex(&self, unit: Option<&str>) -> String {
        let attach = |head: String| match unit {
            Some(u) => format!("{head} {u}"),
            None => head,
        };
        match self {
            Magnitude::Rational(p, q) => {
                let numer = match (p, unit) {
                    (1, Some(u)) => u.to_string(),
                    _ => attach(p.to_string()),
                };
                frac(numer, *q)
            }
            Magnitude::Surd(p, q, k) => {
                let root = format!("\\sqrt{{{k}}}");
                let numer = if *p == 1 { attach(root) } else { attach(format!("{p} {root}")) };
                frac(numer, *q)
            }
            Magnitude::Decimal(s) => attach(s.clone()),
        }
    }
}

fn frac(numer: String, denom: i64) -> String {
    if denom == 1 {
        numer
    } else {
        format!("\\frac{{{numer}}}{{{denom}}}")
    }
}

/// Smallest-denominator fraction within tolerance of `x`.
fn as_rational(x: f64) -> Option<(i64, i64)> {
    (1..=MAX_DENOMINATOR).find_map(|q| {
        let scaled = x * q as f64;
        let p = scaled.round();
        ((scaled - p).abs() < TOLERANCE && p != 0.0).then_some((p as i64, q))
    })
}

fn decimal(x: f64, precision: usize) -> String {
    let s = format!("{x:.precision$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn round_to(x: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(i32::try_from(precision).unwrap_or(15).min(15));
    let r = (x * scale).round() / scale;
    if r.abs() < TOLERANCE { 0.0 } else { r }
}

fn signed(negative: bool, body: String) -> String {
    match (negative, body.starts_with('\\')) {
        (false, _) => body,
        (true, true) => format!("- {body}"),
        (true, false) => format!("-{body}"),
    }
}

/// Render one complex number.
pub fn num_to_latex(z: Complex64, precision: usize) -> String {
    let re = round_to(z.re, precision);
    let im = round_to(z.im, precision);

    let real = (re != 0.0).then(|| (re < 0.0, Magnitude::of(re.abs(), precision).latex(None)));
    let imag = (im != 0.0).then(|| (im < 0.0, Magnitude::of(im.abs(), precision).latex(Some("i"))));

    match (real, imag) {
        (None, None) => "0".to_string(),
        (Some((neg, body)), None) | (None, Some((neg, body))) => signed(neg, body),
        (Some((rneg, rbody)), Some((ineg, ibody))) => {
            let op = if ineg { '-' } else { '+' };
            format!("{} {op} {ibody}", signed(rneg, rbody))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn re(x: f64) -> Complex64 {
        Complex64::new(x, 0.0)
    }

    #[test]
    fn test_statevector_block() {
        let latex = array_to_latex(&[re(0.5); 4], "\\text{Statevector} = ");
        let expected = "$$\n\\text{Statevector} = \n\\begin{bmatrix}\n\
            \\frac{1}{2} & \\frac{1}{2} & \\frac{1}{2} & \\frac{1}{2}  \\\\\n \
            \\end{bmatrix}\n$$";
        assert_eq!(latex, expected);
    }

    #[test]
    fn test_float_noise_is_absorbed() {
        let h = FRAC_1_SQRT_2 * FRAC_1_SQRT_2;
        assert_eq!(num_to_latex(re(h), 10), "\\frac{1}{2}");
    }

    #[test]
    fn test_real_forms() {
        assert_eq!(num_to_latex(re(0.0), 10), "0");
        assert_eq!(num_to_latex(re(1.0), 10), "1");
        assert_eq!(num_to_latex(re(-1.0), 10), "-1");
        assert_eq!(num_to_latex(re(-0.5), 10), "- \\frac{1}{2}");
        assert_eq!(num_to_latex(re(0.75), 10), "\\frac{3}{4}");
        assert_eq!(num_to_latex(re(FRAC_1_SQRT_2), 10), "\\frac{\\sqrt{2}}{2}");
        assert_eq!(num_to_latex(re(2.0_f64.sqrt()), 10), "\\sqrt{2}");
        assert_eq!(num_to_latex(re(0.75_f64.sqrt()), 10), "\\frac{\\sqrt{3}}{2}");
        assert_eq!(num_to_latex(re(0.123_456_789_1), 5), "0.12346");
    }

    #[test]
    fn test_complex_forms() {
        assert_eq!(num_to_latex(Complex64::new(0.0, 1.0), 10), "i");
        assert_eq!(num_to_latex(Complex64::new(0.0, -0.5), 10), "- \\frac{i}{2}");
        assert_eq!(num_to_latex(Complex64::new(0.5, 0.5), 10), "\\frac{1}{2} + \\frac{i}{2}");
        assert_eq!(
            num_to_latex(Complex64::new(0.5, -FRAC_1_SQRT_2), 10),
            "\\frac{1}{2} - \\frac{\\sqrt{2} i}{2}"
        );
        assert_eq!(num_to_latex(Complex64::new(0.0, 2.0), 10), "2 i");
    }

    #[test]
    fn test_wide_row_is_elided() {
        let values: Vec<_> = (1..=10).map(|n| re(f64::from(n))).collect();
        let latex = array_to_latex(&values, "");
        assert!(latex.contains("1 & 2 & 3 & 4 & \\cdots & 8 & 9 & 10  \\\\"));
    }

    #[test]
    fn test_max_size_below_two_is_clamped() {
        let options = LatexOptions {
            max_size: 0,
            ..LatexOptions::default()
        };
        let single = matrix_to_latex(array![[re(1.0)]].view(), &options);
        assert_eq!(single, "$$\n\n\\begin{bmatrix}\n1  \\\\\n \\end{bmatrix}\n$$");

        let tall = array![[re(1.0)], [re(2.0)], [re(3.0)]];
        let latex = matrix_to_latex(tall.view(), &options);
        assert!(latex.contains("1  \\\\\n \\vdots \\\\\n \\end{bmatrix}"));
        assert!(!latex.contains('3'));
    }

    #[test]
    fn test_matrix_rows() {
        let m = array![[re(1.0), re(0.0)], [re(0.0), re(-1.0)]];
        let latex = matrix_to_latex(m.view(), &LatexOptions::default().with_prefix("Z = "));
        assert_eq!(
            latex,
            "$$\nZ = \n\\begin{bmatrix}\n1 & 0  \\\\\n 0 & -1  \\\\\n \\end{bmatrix}\n$$"
        );
    }
}
