//! Hangul font setup
//! egui's bundled fonts have no Hangul glyphs, so a system font is added as a fallback.

use egui::{FontData, FontDefinitions, FontFamily};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const FONT_NAME: &str = "hangul";

/// System font locations for the current OS, most preferred first.
pub fn candidate_paths(os: &str) -> &'static [&'static str] {
    match os {
        "windows" => &[
            "C:\\Windows\\Fonts\\malgun.ttf",
            "C:\\Windows\\Fonts\\gulim.ttc",
        ],
        "macos" => &[
            "/System/Library/Fonts/Supplemental/AppleGothic.ttf",
            "/Library/Fonts/AppleGothic.ttf",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ],
        _ => &[
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        ],
    }
}

/// Install the first readable Hangul font. Returns false when none is found.
pub fn install_hangul_font(ctx: &egui::Context) -> bool {
    let Some((path, bytes)) = candidate_paths(std::env::consts::OS)
        .iter()
        .map(Path::new)
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (path, bytes)))
    else {
        warn!("no Hangul font found, Korean labels may not render");
        return false;
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_NAME.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);

    debug!(path = %path.display(), "installed Hangul font");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_per_os() {
        assert!(candidate_paths("windows")[0].ends_with("malgun.ttf"));
        assert!(candidate_paths("macos")[0].contains("AppleGothic"));
        assert!(candidate_paths("linux")[0].contains("NanumGothic"));
    }
}
