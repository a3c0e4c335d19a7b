// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source path classification.
//!
//! The widget decides between a poster image and a video by looking only at
//! the extension of the first source path. Extensions are compared exactly;
//! `"a.JPG"` is not an image.

use alloc::string::String;
use core::fmt;

/// Extensions that select poster mode.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "png", "gif"];

/// CSS class assigned to poster surfaces.
pub const POSTER_CLASS: &str = "fsvideo-placeholder";

/// CSS class assigned to video surfaces.
pub const VIDEO_CLASS: &str = "fsvideo-video";

/// Which kind of surface the widget displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// A static image shown in place of video.
    Poster,
    /// An auto-playing video.
    Video,
}

impl DisplayMode {
    /// Chooses the display mode for a source list from its first entry.
    ///
    /// An extensionless name has the whole name as its extension, so it lands
    /// in [`Video`](Self::Video) unless the name itself is `"jpg"`, `"png"`
    /// or `"gif"`.
    #[must_use]
    pub fn classify(first_source: &str) -> Self {
        if IMAGE_EXTENSIONS.contains(&file_ext(first_source)) {
            Self::Poster
        } else {
            Self::Video
        }
    }

    /// Returns the CSS class name used for this kind of surface.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Poster => POSTER_CLASS,
            Self::Video => VIDEO_CLASS,
        }
    }

    /// Returns the element tag name used for this kind of surface.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Poster => "img",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poster => f.write_str("poster"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// Returns the text after the last `.` in `file_name`, or the whole name if
/// it contains no `.`.
#[must_use]
pub fn file_ext(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Returns the `<source>` media type for a video path: `"video/"` followed by
/// its extension.
#[must_use]
pub fn video_media_type(path: &str) -> String {
    let ext = file_ext(path);
    let mut ty = String::with_capacity("video/".len() + ext.len());
    ty.push_str("video/");
    ty.push_str(ext);
    ty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_last_dot_segment() {
        assert_eq!(file_ext("a.jpg"), "jpg");
        assert_eq!(file_ext("a.tar.gz"), "gz");
        assert_eq!(file_ext("testfile.ext"), "ext");
    }

    #[test]
    fn extensionless_name_is_its_own_extension() {
        assert_eq!(file_ext("noext"), "noext");
        assert_eq!(DisplayMode::classify("noext"), DisplayMode::Video);
    }

    #[test]
    fn trailing_dot_yields_empty_extension() {
        assert_eq!(file_ext("movie."), "");
    }

    #[test]
    fn image_extensions_select_poster() {
        for name in ["x.jpg", "dir.v2/x.png", "x.gif"] {
            assert_eq!(DisplayMode::classify(name), DisplayMode::Poster, "{name}");
        }
    }

    #[test]
    fn everything_else_selects_video() {
        for name in ["x.mp4", "x.webm", "x.JPG", "x.jpeg"] {
            assert_eq!(DisplayMode::classify(name), DisplayMode::Video, "{name}");
        }
    }

    #[test]
    fn media_type_uses_extension() {
        assert_eq!(video_media_type("clips/a.mp4"), "video/mp4");
        assert_eq!(video_media_type("b.webm"), "video/webm");
    }

    #[test]
    fn mode_names_match_dom() {
        assert_eq!(DisplayMode::Poster.tag_name(), "img");
        assert_eq!(DisplayMode::Video.tag_name(), "video");
        assert_eq!(DisplayMode::Poster.class_name(), "fsvideo-placeholder");
        assert_eq!(DisplayMode::Video.class_name(), "fsvideo-video");
    }
}
