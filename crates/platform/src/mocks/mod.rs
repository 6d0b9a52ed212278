//! Mock implementations for testing
//!
//! Recording doubles for every collaborator a panel driver touches. The DSI
//! transport, delay source and backlight share one [`MockBus`] so tests can
//! assert on the exact interleaving of commands, sleeps and backlight
//! switching. Faults can be injected per operation.

#![cfg(any(test, feature = "std"))]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use panel_specs::{ModeFlags, PixelFormat};

use crate::backlight::Backlight;
use crate::dsi::DsiDevice;
use crate::host::{Connector, DisplayHost, DisplayMode, HostError, PanelId, PanelInfo};

/// Error returned by any mock operation a test told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedFault;

impl core::fmt::Display for InjectedFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Injected fault")
    }
}

impl std::error::Error for InjectedFault {}

/// One observable effect on the shared bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// Lane count configured
    SetLanes(u8),
    /// Pixel format configured
    SetPixelFormat(PixelFormat),
    /// Mode flags configured
    SetModeFlags(ModeFlags),
    /// Transport attached
    Attach,
    /// Transport detached
    Detach,
    /// DCS buffer delivered
    Write(Vec<u8>),
    /// DCS buffer rejected by an injected fault
    WriteFailed(Vec<u8>),
    /// Blocking delay
    Delay {
        /// Duration in nanoseconds
        ns: u64,
    },
    /// Backlight switched on
    BacklightOn,
    /// Backlight switched off
    BacklightOff,
}

impl BusEvent {
    /// Delay event of `ms` milliseconds.
    pub fn delay_ms(ms: u32) -> Self {
        Self::Delay {
            ns: u64::from(ms).saturating_mul(1_000_000),
        }
    }

    /// Delivered write of `bytes`.
    pub fn write(bytes: &[u8]) -> Self {
        Self::Write(bytes.to_vec())
    }
}

#[derive(Debug, Default)]
struct BusState {
    events: Vec<BusEvent>,
    writes_seen: usize,
    fail_write_at: Option<usize>,
    fail_opcode: Option<u8>,
    fail_config: bool,
    fail_attach: bool,
    fail_detach: bool,
    fail_backlight: bool,
}

impl BusState {
    fn record(&mut self, event: BusEvent) {
        self.events.push(event);
    }
}

/// Shared event log and fault switches.
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    state: Rc<RefCell<BusState>>,
}

impl MockBus {
    /// Create an empty bus with no faults armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// DSI transport recording onto this bus.
    pub fn dsi(&self) -> MockDsi {
        MockDsi {
            state: Rc::clone(&self.state),
        }
    }

    /// Delay source recording onto this bus.
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Rc::clone(&self.state),
        }
    }

    /// Backlight recording onto this bus, initially off.
    pub fn backlight(&self) -> MockBacklight {
        MockBacklight {
            state: Rc::clone(&self.state),
            enabled: false,
        }
    }

    /// Everything recorded since the last [`clear`](Self::clear).
    pub fn events(&self) -> Vec<BusEvent> {
        self.state.borrow().events.clone()
    }

    /// Delivered DCS buffers, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// Sum of all recorded delays in milliseconds (truncated).
    pub fn total_delay_ms(&self) -> u64 {
        let ns: u64 = self
            .state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Delay { ns } => Some(*ns),
                _ => None,
            })
            .fold(0, u64::saturating_add);
        ns.saturating_div(1_000_000)
    }

    /// Drop recorded events and restart the write counter. Faults stay armed.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.events.clear();
        state.writes_seen = 0;
    }

    /// Fail the `n`th DCS write (0-based, counted since the last clear).
    pub fn fail_write_at(&self, n: usize) {
        self.state.borrow_mut().fail_write_at = Some(n);
    }

    /// Fail every DCS write whose first byte is `opcode`.
    pub fn fail_opcode(&self, opcode: u8) {
        self.state.borrow_mut().fail_opcode = Some(opcode);
    }

    /// Fail lane, format and flag configuration.
    pub fn fail_config(&self) {
        self.state.borrow_mut().fail_config = true;
    }

    /// Fail transport attach.
    pub fn fail_attach(&self) {
        self.state.borrow_mut().fail_attach = true;
    }

    /// Fail transport detach.
    pub fn fail_detach(&self) {
        self.state.borrow_mut().fail_detach = true;
    }

    /// Fail backlight switching.
    pub fn fail_backlight(&self) {
        self.state.borrow_mut().fail_backlight = true;
    }

    /// Disarm every fault.
    pub fn heal(&self) {
        let mut state = self.state.borrow_mut();
        state.fail_write_at = None;
        state.fail_opcode = None;
        state.fail_config = false;
        state.fail_attach = false;
        state.fail_detach = false;
        state.fail_backlight = false;
    }
}

/// Mock DSI transport
#[derive(Debug, Clone)]
pub struct MockDsi {
    state: Rc<RefCell<BusState>>,
}

impl MockDsi {
    fn configure(&mut self, event: BusEvent) -> Result<(), InjectedFault> {
        let mut state = self.state.borrow_mut();
        if state.fail_config {
            return Err(InjectedFault);
        }
        state.record(event);
        Ok(())
    }
}

impl DsiDevice for MockDsi {
    type Error = InjectedFault;

    fn set_lanes(&mut self, lanes: u8) -> Result<(), Self::Error> {
        self.configure(BusEvent::SetLanes(lanes))
    }

    fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), Self::Error> {
        self.configure(BusEvent::SetPixelFormat(format))
    }

    fn set_mode_flags(&mut self, flags: ModeFlags) -> Result<(), Self::Error> {
        self.configure(BusEvent::SetModeFlags(flags))
    }

    fn attach(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_attach {
            return Err(InjectedFault);
        }
        state.record(BusEvent::Attach);
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_detach {
            return Err(InjectedFault);
        }
        state.record(BusEvent::Detach);
        Ok(())
    }

    fn dcs_write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        let index = state.writes_seen;
        state.writes_seen = index.saturating_add(1);

        let fail = state.fail_write_at == Some(index)
            || (state.fail_opcode.is_some() && state.fail_opcode == data.first().copied());
        if fail {
            state.record(BusEvent::WriteFailed(data.to_vec()));
            return Err(InjectedFault);
        }
        state.record(BusEvent::Write(data.to_vec()));
        Ok(())
    }
}

/// Mock delay; records instead of sleeping
#[derive(Debug, Clone)]
pub struct MockDelay {
    state: Rc<RefCell<BusState>>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.state.borrow_mut().record(BusEvent::Delay {
            ns: u64::from(ns),
        });
    }

    fn delay_us(&mut self, us: u32) {
        self.state.borrow_mut().record(BusEvent::Delay {
            ns: u64::from(us).saturating_mul(1_000),
        });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.state.borrow_mut().record(BusEvent::delay_ms(ms));
    }
}

/// Mock backlight
#[derive(Debug, Clone)]
pub struct MockBacklight {
    state: Rc<RefCell<BusState>>,
    enabled: bool,
}

impl Backlight for MockBacklight {
    type Error = InjectedFault;

    fn enable(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_backlight {
            return Err(InjectedFault);
        }
        state.record(BusEvent::BacklightOn);
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_backlight {
            return Err(InjectedFault);
        }
        state.record(BusEvent::BacklightOff);
        self.enabled = false;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Mock display host
#[derive(Debug, Default)]
pub struct MockHost {
    panels: Vec<(PanelId, PanelInfo)>,
    next_id: u16,
    fail_add: Option<HostError>,
    removed: Vec<PanelId>,
}

impl MockHost {
    /// Host that accepts every registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that refuses every registration with `err`.
    pub fn failing(err: HostError) -> Self {
        Self {
            fail_add: Some(err),
            ..Self::default()
        }
    }

    /// Panels currently registered.
    pub fn registered(&self) -> &[(PanelId, PanelInfo)] {
        &self.panels
    }

    /// `true` if `id` is currently registered.
    pub fn is_registered(&self, id: PanelId) -> bool {
        self.panels.iter().any(|(p, _)| *p == id)
    }

    /// Ids passed to `remove_panel`, in order.
    pub fn removed(&self) -> &[PanelId] {
        &self.removed
    }
}

impl DisplayHost for MockHost {
    fn add_panel(&mut self, info: &PanelInfo) -> Result<PanelId, HostError> {
        if let Some(err) = self.fail_add {
            return Err(err);
        }
        let id = PanelId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.panels.push((id, *info));
        Ok(id)
    }

    fn remove_panel(&mut self, id: PanelId) {
        self.panels.retain(|(p, _)| *p != id);
        self.removed.push(id);
    }
}

/// Mock connector collecting probed modes
#[derive(Debug)]
pub struct MockConnector {
    modes: Vec<DisplayMode>,
    capacity: usize,
    physical_size: Option<(u16, u16)>,
}

impl MockConnector {
    /// Connector that accepts any number of modes.
    pub fn new() -> Self {
        Self::with_capacity(usize::MAX)
    }

    /// Connector that refuses modes beyond `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            modes: Vec::new(),
            capacity,
            physical_size: None,
        }
    }

    /// Modes added so far.
    pub fn modes(&self) -> &[DisplayMode] {
        &self.modes
    }

    /// Physical size last reported, if any.
    pub fn physical_size(&self) -> Option<(u16, u16)> {
        self.physical_size
    }
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for MockConnector {
    fn add_probed_mode(&mut self, mode: DisplayMode) -> Result<(), HostError> {
        if self.modes.len() >= self.capacity {
            return Err(HostError::OutOfMemory);
        }
        self.modes.push(mode);
        Ok(())
    }

    fn set_physical_size(&mut self, width_mm: u16, height_mm: u16) {
        self.physical_size = Some((width_mm, height_mm));
    }
}
