//! Display probe.

use crate::domain::DisplayInfo;
use crate::ports::HostEnvironment;

/// Read screen geometry from the host.
///
/// Headless hosts produce [`DisplayInfo::headless`]. A missing orientation is
/// derived from the geometry; a non-positive pixel ratio becomes 1.
pub fn probe_display(host: &dyn HostEnvironment) -> DisplayInfo {
    let Some(screen) = host.screen() else {
        return DisplayInfo::headless();
    };

    let orientation = screen
        .orientation
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| {
            if screen.width >= screen.height {
                "landscape-primary".to_string()
            } else {
                "portrait-primary".to_string()
            }
        });

    let pixel_ratio = if screen.pixel_ratio.is_finite() && screen.pixel_ratio > 0.0 {
        screen.pixel_ratio
    } else {
        1.0
    };

    DisplayInfo {
        width: screen.width,
        height: screen.height,
        avail_width: screen.avail_width,
        avail_height: screen.avail_height,
        color_depth: screen.color_depth,
        pixel_ratio,
        orientation,
    }
}
