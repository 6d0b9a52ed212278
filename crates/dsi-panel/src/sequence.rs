//! Init sequence playback
//!
//! Sends each command buffer of a panel's vendor sequence verbatim. The first
//! failed write aborts the rest; nothing is retried.

use panel_specs::InitSequence;
use platform::DsiDevice;

/// Play `sequence` on `dsi`. Returns the number of buffers sent.
pub fn run<D: DsiDevice + ?Sized>(sequence: InitSequence, dsi: &mut D) -> Result<usize, D::Error> {
    panel_debug!(
        "init sequence {}: {} commands",
        sequence.as_str(),
        sequence.len()
    );
    send_all(sequence.commands(), dsi)
}

/// Send `commands` in order, stopping at the first failure.
pub fn send_all<D: DsiDevice + ?Sized>(commands: &[&[u8]], dsi: &mut D) -> Result<usize, D::Error> {
    let mut sent: usize = 0;
    for cmd in commands {
        if let Err(e) = dsi.dcs_write_buffer(cmd) {
            panel_error!("init command {} failed", sent);
            return Err(e);
        }
        sent = sent.saturating_add(1);
    }
    Ok(sent)
}
