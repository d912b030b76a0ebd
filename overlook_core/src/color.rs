// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay tinting.
//!
//! The overlay manager asks an injected [`ColorScheme`] for the tint of every
//! overlay it creates. [`DepthPalette`] is the default: it walks the hue
//! wheel by tree depth so nested wireframes stay distinguishable.

use crate::element::ElementReference;

/// An RGBA colour with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Neutral grey used for status overlays.
    pub const STATUS_GREY: Self = Self::rgba(0.5, 0.5, 0.5, 0.9);

    /// Creates a colour from its components.
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque colour from hue (0–360), saturation and lightness
    /// (both 0–1).
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let [r, g, b] = hsl_to_rgb(h, s, l);
        Self::rgba(r, g, b, 1.0)
    }

    /// Returns the same colour with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// Converts HSL (hue 0–360, saturation 0–1, lightness 0–1) to RGB 0–1.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let c = (1.0 - libm::fabs(2.0 * l - 1.0)) * s;
    let h_prime = libm::fmod(h, 360.0) / 60.0;
    let x = c * (1.0 - libm::fabs(libm::fmod(h_prime, 2.0) - 1.0));
    let (r1, g1, b1) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };
    let m = l - c / 2.0;
    [r1 + m, g1 + m, b1 + m]
}

/// Assigns overlay tints to elements.
pub trait ColorScheme {
    /// Returns the tint for overlays bound to `element`.
    fn color(&self, element: &ElementReference) -> Color;
}

/// Hue-by-depth palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthPalette {
    /// Hue of depth zero.
    pub base_hue: f64,
    /// Hue advance per level.
    pub hue_step: f64,
    /// Alpha of every produced colour.
    pub alpha: f64,
}

impl Default for DepthPalette {
    fn default() -> Self {
        Self {
            base_hue: 200.0,
            hue_step: 37.0,
            alpha: 0.8,
        }
    }
}

impl ColorScheme for DepthPalette {
    fn color(&self, element: &ElementReference) -> Color {
        let hue = self.base_hue + self.hue_step * element.depth() as f64;
        Color::from_hsl(hue, 0.7, 0.5).with_alpha(self.alpha)
    }
}

impl<F> ColorScheme for F
where
    F: Fn(&ElementReference) -> Color,
{
    fn color(&self, element: &ElementReference) -> Color {
        self(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        libm::fabs(a - b) < 1e-9
    }

    #[test]
    fn primary_hues() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0), "{red:?}");
        let green = Color::from_hsl(120.0, 1.0, 0.5);
        assert!(close(green.g, 1.0) && close(green.r, 0.0), "{green:?}");
        let blue = Color::from_hsl(240.0, 1.0, 0.5);
        assert!(close(blue.b, 1.0) && close(blue.g, 0.0), "{blue:?}");
    }

    #[test]
    fn hue_wraps_past_full_circle() {
        assert_eq!(Color::from_hsl(400.0, 0.7, 0.5), Color::from_hsl(40.0, 0.7, 0.5));
    }
}
