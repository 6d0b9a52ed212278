//! gcat panel descriptors

use crate::{InitSequence, ModeFlags, ModeType, PanelDescriptor, PixelFormat, TimingMode};

/// gcat SN65 WS7D timing (1024×600, 51 MHz, ~77 Hz)
///
/// - HFP 10, HSync 4, HBP 20 → htotal 1058
/// - VFP 8, VSync 4, VBP 14 → vtotal 626
pub const SN65_WS7D_MODE: TimingMode = TimingMode {
    clock_khz: 51_000,
    hdisplay: 1024,
    hfront_porch: 10,
    hsync_len: 4,
    hback_porch: 20,
    vdisplay: 600,
    vfront_porch: 8,
    vsync_len: 4,
    vback_porch: 14,
    width_mm: 43,
    height_mm: 57,
    mode_type: ModeType::DRIVER.union(ModeType::PREFERRED),
};

/// gcat SN65 WS7D (2-lane video burst, RGB888)
///
/// Commands go out in low-power mode. No vendor init sequence.
pub const SN65_WS7D: PanelDescriptor = PanelDescriptor {
    name: "gcat SN65 WS7D",
    mode: &SN65_WS7D_MODE,
    lanes: 2,
    mode_flags: ModeFlags::VIDEO
        .union(ModeFlags::VIDEO_BURST)
        .union(ModeFlags::LPM),
    format: PixelFormat::Rgb888,
    init_sequence: InitSequence::Sn65Ws7d,
};
