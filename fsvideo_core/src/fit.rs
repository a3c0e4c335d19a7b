// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cover-fit geometry.
//!
//! [`fit_to_screen`] scales content uniformly so that it covers the viewport
//! in both dimensions ("cover", never "contain") and centers the overflow
//! with negative margins. The result is applied as four CSS properties; see
//! [`CoverFit::style_properties`].

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Size;

/// Layout produced by [`fit_to_screen`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale factor applied to the intrinsic size.
    pub scale: f64,
    /// Scaled content size.
    pub size: Size,
    /// Top margin in pixels; zero or negative.
    pub margin_top: f64,
    /// Left margin in pixels; zero or negative.
    pub margin_left: f64,
}

impl CoverFit {
    /// Returns the `(property, value)` pairs to write into the surface's
    /// inline style, in `px` units.
    #[must_use]
    pub fn style_properties(&self) -> [(&'static str, String); 4] {
        [
            ("width", px(self.size.width)),
            ("height", px(self.size.height)),
            ("margin-top", px(self.margin_top)),
            ("margin-left", px(self.margin_left)),
        ]
    }
}

/// Computes the cover fit of content with size `intrinsic` inside `viewport`.
///
/// The scale is `max(viewport.width / intrinsic.width, viewport.height /
/// intrinsic.height)`. A dimension that overflows the viewport after scaling
/// is centered with a margin of `floor((viewport - scaled) / 2)`; a dimension
/// that does not overflow gets a zero margin.
///
/// Returns `None` when the intrinsic size is not yet known (zero, negative or
/// non-finite), which is the case for a video before its metadata loads.
#[must_use]
pub fn fit_to_screen(intrinsic: Size, viewport: Size) -> Option<CoverFit> {
    if !(intrinsic.width > 0.0 && intrinsic.height > 0.0) || !intrinsic.is_finite() {
        return None;
    }
    if !viewport.is_finite() {
        return None;
    }

    let factor_width = viewport.width / intrinsic.width;
    let factor_height = viewport.height / intrinsic.height;
    let scale = if factor_width > factor_height {
        factor_width
    } else {
        factor_height
    };

    let size = Size::new(intrinsic.width * scale, intrinsic.height * scale);
    let margin_left = if size.width > viewport.width {
        ((viewport.width - size.width) / 2.0).floor()
    } else {
        0.0
    };
    let margin_top = if size.height > viewport.height {
        ((viewport.height - size.height) / 2.0).floor()
    } else {
        0.0
    };

    Some(CoverFit {
        scale,
        size,
        margin_top,
        margin_left,
    })
}

fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_aspect_scales_without_margins() {
        let fit = fit_to_screen(Size::new(16.0, 9.0), Size::new(32.0, 18.0)).unwrap();
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.size, Size::new(32.0, 18.0));
        assert_eq!(fit.margin_top, 0.0);
        assert_eq!(fit.margin_left, 0.0);
    }

    #[test]
    fn tall_viewport_crops_width() {
        let fit = fit_to_screen(Size::new(16.0, 9.0), Size::new(18.0, 36.0)).unwrap();
        assert_eq!(fit.scale, 4.0);
        assert_eq!(fit.size, Size::new(64.0, 36.0));
        assert_eq!(fit.margin_top, 0.0);
        assert_eq!(fit.margin_left, -23.0);
    }

    #[test]
    fn wide_viewport_crops_height() {
        let fit = fit_to_screen(Size::new(200.0, 250.0), Size::new(100.0, 300.0)).unwrap();
        assert_eq!(fit.scale, 1.2);
        assert_eq!(fit.margin_top, 0.0);
        assert_eq!(fit.margin_left, -70.0);

        let fit = fit_to_screen(Size::new(4.0, 3.0), Size::new(100.0, 10.0)).unwrap();
        assert_eq!(fit.scale, 25.0);
        assert_eq!(fit.size, Size::new(100.0, 75.0));
        assert_eq!(fit.margin_top, -33.0);
        assert_eq!(fit.margin_left, 0.0);
    }

    #[test]
    fn odd_overflow_floors_toward_negative() {
        // 3 px of overflow splits as -2, not -1.
        let fit = fit_to_screen(Size::new(10.0, 10.0), Size::new(13.0, 10.0)).unwrap();
        assert_eq!(fit.size, Size::new(13.0, 13.0));
        assert_eq!(fit.margin_top, -2.0);
    }

    #[test]
    fn covers_both_dimensions() {
        for (iw, ih, vw, vh) in [(1920.0, 1080.0, 800.0, 1200.0), (640.0, 480.0, 1280.0, 400.0)] {
            let fit = fit_to_screen(Size::new(iw, ih), Size::new(vw, vh)).unwrap();
            assert!(fit.size.width + 1e-9 >= vw, "width {} < {vw}", fit.size.width);
            assert!(fit.size.height + 1e-9 >= vh, "height {} < {vh}", fit.size.height);
        }
    }

    #[test]
    fn unknown_intrinsic_size_is_skipped() {
        let viewport = Size::new(800.0, 600.0);
        assert_eq!(fit_to_screen(Size::ZERO, viewport), None);
        assert_eq!(fit_to_screen(Size::new(0.0, 9.0), viewport), None);
        assert_eq!(fit_to_screen(Size::new(f64::NAN, 9.0), viewport), None);
    }

    #[test]
    fn style_properties_render_px() {
        let fit = fit_to_screen(Size::new(16.0, 9.0), Size::new(18.0, 36.0)).unwrap();
        let props = fit.style_properties();
        assert_eq!(props[0], ("width", String::from("64px")));
        assert_eq!(props[1], ("height", String::from("36px")));
        assert_eq!(props[2], ("margin-top", String::from("0px")));
        assert_eq!(props[3], ("margin-left", String::from("-23px")));
    }
}
