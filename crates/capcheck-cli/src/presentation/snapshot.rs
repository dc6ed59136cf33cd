//! Human-readable capability snapshot summary.

use std::fmt::Write;

use capcheck_core::{CapabilitySnapshot, UNKNOWN};

use super::tables::{Palette, format_optional, pad, truncate_string, yes_no};

const LABEL_WIDTH: usize = 14;
const MAX_ISP_WIDTH: usize = 48;

fn section(out: &mut String, palette: Palette, title: &str) {
    let _ = writeln!(out, "{}", palette.bold(title));
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {}{value}", pad(&format!("{label}:"), LABEL_WIDTH));
}

fn known_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let known: Vec<&str> = parts
        .into_iter()
        .filter(|p| !p.is_empty() && *p != UNKNOWN)
        .collect();
    if known.is_empty() {
        UNKNOWN.to_string()
    } else {
        known.join(", ")
    }
}

/// Render a snapshot as a sectioned summary.
pub fn render_snapshot(snapshot: &CapabilitySnapshot, palette: Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Capability snapshot taken {} (assembled in {} ms)",
        snapshot.taken_at().format("%Y-%m-%d %H:%M:%S UTC"),
        snapshot.assembly_duration_ms()
    );
    let _ = writeln!(out);

    let network = snapshot.network();
    section(&mut out, palette, "Network");
    field(&mut out, "Download", &format!("{:.1} Mbps", network.download_mbps));
    let latency = if network.latency_ms == 0 {
        UNKNOWN.to_string()
    } else {
        format!("{} ms", network.latency_ms)
    };
    field(&mut out, "Latency", &latency);
    field(
        &mut out,
        "Connection",
        &format!("{} ({})", network.connection_type, network.effective_type),
    );

    let identity = snapshot.identity();
    section(&mut out, palette, "Identity");
    field(&mut out, "IP", &identity.ip);
    field(
        &mut out,
        "Location",
        &known_parts([
            identity.city.as_str(),
            identity.region.as_str(),
            identity.country.as_str(),
        ]),
    );
    field(&mut out, "Timezone", &identity.timezone);
    field(&mut out, "ISP", &truncate_string(&identity.isp, MAX_ISP_WIDTH));
    let flags: Vec<&str> = [
        (identity.is_vpn, "VPN"),
        (identity.is_proxy, "proxy"),
        (identity.is_hosting, "hosting"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();
    let flags = if flags.is_empty() {
        palette.green("none")
    } else {
        palette.yellow(&flags.join(", "))
    };
    field(&mut out, "Flags", &flags);

    let hardware = snapshot.hardware();
    section(&mut out, palette, "Hardware");
    field(&mut out, "CPU cores", &hardware.cpu_cores.to_string());
    let ram = hardware.ram_gb.map(|gb| format!("{gb:.1} GB"));
    field(&mut out, "RAM", &format_optional(ram.as_ref(), UNKNOWN));
    let class = if hardware.is_tablet {
        "tablet"
    } else if hardware.is_mobile {
        "mobile"
    } else {
        "desktop"
    };
    field(&mut out, "Platform", &format!("{} ({class})", hardware.platform));

    let display = snapshot.display();
    section(&mut out, palette, "Display");
    if display.width == 0 || display.height == 0 {
        field(&mut out, "Resolution", "none");
    } else {
        field(
            &mut out,
            "Resolution",
            &format!("{}x{} @{}x", display.width, display.height, display.pixel_ratio),
        );
        field(
            &mut out,
            "Available",
            &format!("{}x{}", display.avail_width, display.avail_height),
        );
        field(&mut out, "Color depth", &format!("{}-bit", display.color_depth));
        field(&mut out, "Orientation", &display.orientation);
    }

    let browser = snapshot.browser();
    section(&mut out, palette, "Browser");
    field(&mut out, "Name", &format!("{} {}", browser.name, browser.version));
    field(&mut out, "Language", &browser.language);
    if !browser.languages.is_empty() {
        field(&mut out, "Languages", &browser.languages.join(", "));
    }
    field(&mut out, "Cookies", yes_no(browser.cookies_enabled));
    field(&mut out, "Do Not Track", yes_no(browser.do_not_track));
    field(&mut out, "Online", yes_no(browser.online));

    let media = snapshot.media_devices();
    section(&mut out, palette, "Media devices");
    field(&mut out, "Webcam", yes_no(media.has_webcam));
    field(&mut out, "Microphone", yes_no(media.has_microphone));
    field(&mut out, "Speakers", yes_no(media.has_speakers));

    out
}
