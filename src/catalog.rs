// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The list of fractals a user can pick from.  A catalog only
//! describes fractals; turning a description into pixels is the job of
//! `render`.

use std::sync::OnceLock;

use log::error;

use crate::error::FractalError;
use crate::lsystem::LSystem;
use crate::planes::Viewport;

/// What kind of fractal a descriptor names, with everything needed to
/// draw it.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant {
    /// An L-system traced by a turtle.
    Geometric(LSystem),
    /// The Mandelbrot set over a viewport.
    Mandelbrot(Viewport),
    /// Newton's method for z⁴ = 1 over a viewport.
    Newton(Viewport),
}

/// A named fractal.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalDescriptor {
    /// Display name.
    pub name: String,
    /// How to draw it.
    pub variant: Variant,
}

impl FractalDescriptor {
    /// An L-system descriptor in `symbol:replacement;...` notation.
    pub fn geometric(name: &str, angle: f64, rules: &str) -> Result<Self, FractalError> {
        Ok(FractalDescriptor {
            name: name.to_string(),
            variant: Variant::Geometric(LSystem::parse(angle, rules)?),
        })
    }

    /// A Mandelbrot descriptor.
    pub fn mandelbrot(name: &str, viewport: Viewport) -> Self {
        FractalDescriptor {
            name: name.to_string(),
            variant: Variant::Mandelbrot(viewport),
        }
    }

    /// A Newton descriptor over the square around the unit roots.
    pub fn newton(name: &str) -> Self {
        FractalDescriptor {
            name: name.to_string(),
            variant: Variant::Newton(Viewport::NEWTON),
        }
    }
}

/// An ordered, immutable collection of descriptors.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    fractals: Vec<FractalDescriptor>,
}

// Name, turning angle, rules (root first).
const LSYSTEMS: &[(&str, f64, &str)] = &[
    ("Koch Curve", 60.0, "F:F-F++F-F"),
    ("Koch Snowflake", 60.0, ":F++F++F;F:F-F++F-F"),
    ("Fractal 3", 120.0, ":F+F+F;F:F-F+F"),
    ("Fractal 4", 90.0, ":F+F+F+F;F:FF+F++F+F"),
    ("Dragon Curve", 90.0, ":FX;X:X+YF+;Y:-FX-Y"),
    ("Gosper Curve", 60.0, ":XF;X:X+YF++YF-FX--FXFX-YF+;Y:-FX+YFYF++YF+FX--FX-Y"),
    ("Sierpinski Curve", 90.0, ":F+XF+F+XF;X:XF-F+F-XF+F+XF-F+F-X"),
    ("Hilbert Curve", 90.0, ":X;X:-YF+XFX+FY-;Y:+XF-YFY-FX+"),
    ("Fractal 9", 90.0, ":F+F+F+F;F:FF+F+F+F+FF"),
    ("Fractal 10", 90.0, ":F+F+F+F;F:F+F-F-FF+F+F-F"),
    ("Fractal 11", 90.0, ":F+F+F+F;F:F+F-F-FFF+F+F-F"),
    ("Fractal 12", 90.0, ":F+F+F+F;F:F-FF+FF+F+F-F-FF+F+F-F-FF-FF+F"),
    ("Fractal 13", 90.0, ":F;F:F-F+F+F-F"),
    ("Fractal 14", 60.0, ":YF;X:YF+XF+Y;Y:XF-YF-X"),
    ("Fractal 15", 90.0, ":F+F+F+F;F:F+F-F+F+F"),
    ("Fractal 16", 90.0, ":F+F+F+F;F:FF+F+F+F+F+F-F"),
    ("Bush 1", 25.7, ":Y;X:X[-FFF][+FFF]FX;Y:YFX[+Y][-Y]"),
    ("Bush 2", 22.5, ":F;F:FF+[+F-F-F]-[-F+F+F]"),
    ("Bush 3", 36.0, ":F;F:F[+FF][-FF]F[-F][+F]F"),
    ("Bush 4", 20.0, ":X;F:FF;X:F[+X]F[-X]+X"),
    ("Bush 5", 90.0, ":F-F-F-F;F:F-F+F+F-F"),
    ("Weed", 25.7, ":F;F:F[+F]F[-F]F"),
    ("Fractal 23", 60.0, ":F;F:FXF;X:[-F+F+F]+F-F-F+"),
    ("Sierpinski Triangle", 60.0, ":FXF--FF--FF;F:FF;X:--FXF++FXF++FXF--"),
    ("Sierpinski Carpet", 90.0, ":F;F:FFF[+FFF+FFF+FFF]"),
];

impl Catalog {
    /// A catalog holding exactly `fractals`, in order.
    pub fn new(fractals: Vec<FractalDescriptor>) -> Self {
        Catalog { fractals }
    }

    /// The built-in catalog, constructed on first use and shared,
    /// read-only, by every caller afterward.  A built-in grammar that
    /// fails to parse fails the whole catalog, so indices never shift.
    pub fn builtin() -> Result<&'static Catalog, FractalError> {
        static BUILTIN: OnceLock<Result<Catalog, FractalError>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| -> Result<Catalog, FractalError> {
                let mut fractals = Catalog::from_table(LSYSTEMS).map_err(|e| {
                    error!("built-in catalog is broken: {}", e);
                    e
                })?;
                fractals.push(FractalDescriptor::mandelbrot(
                    "Mandelbrot Set",
                    Viewport::MANDELBROT,
                ));
                fractals.push(FractalDescriptor::newton("Newton Cross"));
                Ok(Catalog::new(fractals))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn from_table(
        table: &[(&str, f64, &str)],
    ) -> Result<Vec<FractalDescriptor>, FractalError> {
        table
            .iter()
            .map(|&(name, angle, rules)| FractalDescriptor::geometric(name, angle, rules))
            .collect()
    }

    /// Display names, in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.fractals.iter().map(|f| f.name.as_str()).collect()
    }

    /// The descriptor at `index`.
    pub fn describe(&self, index: usize) -> Result<&FractalDescriptor, FractalError> {
        self.fractals
            .get(index)
            .ok_or(FractalError::IndexOutOfRange {
                index,
                len: self.fractals.len(),
            })
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.fractals.len()
    }

    /// True for a catalog with nothing in it.
    pub fn is_empty(&self) -> bool {
        self.fractals.is_empty()
    }

    /// Every descriptor, in order.
    pub fn iter(&self) -> std::slice::Iter<FractalDescriptor> {
        self.fractals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_grammars_all_parse() {
        for &(name, angle, rules) in LSYSTEMS {
            assert!(
                FractalDescriptor::geometric(name, angle, rules).is_ok(),
                "{} does not parse",
                name
            );
        }
        assert_eq!(Catalog::builtin().unwrap().len(), LSYSTEMS.len() + 2);
    }

    #[test]
    fn a_broken_table_fails_instead_of_shifting() {
        let table = [
            ("good", 60.0, "F:F-F++F-F"),
            ("bad", 90.0, "F-F"),
            ("also good", 90.0, ":F+F+F+F"),
        ];
        assert_eq!(
            Catalog::from_table(&table),
            Err(FractalError::MalformedRule("F-F".to_string()))
        );
        assert_eq!(Catalog::from_table(&[table[0], table[2]]).unwrap().len(), 2);
    }

    #[test]
    fn names_follow_insertion_order() {
        let names = Catalog::builtin().unwrap().names();
        assert_eq!(names.len(), Catalog::builtin().unwrap().len());
        assert_eq!(names[0], "Koch Curve");
        assert_eq!(names[names.len() - 2], "Mandelbrot Set");
        assert_eq!(names[names.len() - 1], "Newton Cross");
    }

    #[test]
    fn describe_returns_variants() {
        let catalog = Catalog::builtin().unwrap();
        match &catalog.describe(4).unwrap().variant {
            Variant::Geometric(ls) => assert_eq!(ls.angle, 90.0),
            other => panic!("expected the dragon curve, got {:?}", other),
        }
        assert_eq!(
            catalog.describe(catalog.len() - 1).unwrap().variant,
            Variant::Newton(Viewport::NEWTON)
        );
    }

    #[test]
    fn describe_rejects_indices_past_the_end() {
        let catalog = Catalog::builtin().unwrap();
        let len = catalog.len();
        assert_eq!(
            catalog.describe(len),
            Err(FractalError::IndexOutOfRange { index: len, len })
        );
        assert!(catalog.describe(usize::max_value()).is_err());
    }

    #[test]
    fn builtin_is_built_once() {
        assert!(std::ptr::eq(
            Catalog::builtin().unwrap(),
            Catalog::builtin().unwrap()
        ));
    }

    #[test]
    fn custom_catalogs() {
        let catalog = Catalog::new(vec![FractalDescriptor::newton("only")]);
        assert_eq!(catalog.names(), vec!["only"]);
        assert!(Catalog::default().is_empty());
    }
}
