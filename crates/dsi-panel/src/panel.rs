//! MIPI-DSI panel driver
//!
//! One [`DsiPanel`] binds a discovered device to its resolved
//! [`PanelDescriptor`] and drives it through the power lifecycle.
//!
//! # Attach
//!
//! 1. Resolve the compatible string and validate the descriptor
//! 2. Configure mode flags, pixel format and lane count on the transport
//! 3. Look up the backlight (an error aborts)
//! 4. Register with the host pipeline
//! 5. Attach the transport; on failure the host registration is undone
//!
//! # Prepare
//!
//! ```text
//! [reset line low 30 ms, high 150 ms]   only with_reset_line()
//! soft reset (0x01)       → wait 30 ms
//! init sequence
//! tear on, vblank (0x35 0x00)
//! exit sleep (0x11)       → wait 120 ms
//! ```
//!
//! The host must serialize calls on one panel. Every lifecycle method takes
//! `&mut self`, so a host sharing a panel across threads wraps it in a lock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use panel_specs::{registry, DescriptorRegistry, PanelDescriptor, TimingMode};
use platform::{
    Backlight, BacklightLookup, Connector, ConnectorType, DisplayHost, DisplayMode, DisplayPanel,
    DsiDevice, NoBacklight, NoResetPin, PanelId, PanelInfo, TearMode,
};

use crate::error::{AttachError, PanelError, PrepareStep};
use crate::sequence;
use crate::state::{Operation, PanelState, Transition};

// ---------------------------------------------------------------------------
// Hardware-mandated delays
// ---------------------------------------------------------------------------

/// Wait after DCS soft reset before the controller accepts configuration.
pub const SOFT_RESET_SETTLE_MS: u32 = 30;

/// Wait after DCS exit-sleep before the panel presents frames reliably.
pub const SLEEP_EXIT_SETTLE_MS: u32 = 120;

/// Reset line low pulse width.
pub const RESET_PULSE_MS: u32 = 30;

/// Wait after releasing the reset line.
pub const RESET_RECOVERY_MS: u32 = 150;

/// Tear signal mode requested during prepare.
pub const TEAR_MODE: TearMode = TearMode::VBlank;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Live binding of one DSI device to its panel descriptor.
///
/// Type parameters:
/// - `DSI`: [`DsiDevice`] transport, typically borrowed (`&mut T`)
/// - `DELAY`: [`embedded_hal::delay::DelayNs`] for settle delays
/// - `BL`: [`Backlight`] bound at attach, if any
/// - `RST`: reset [`OutputPin`]; [`NoResetPin`] when absent
pub struct DsiPanel<DSI, DELAY, BL = NoBacklight, RST = NoResetPin> {
    dsi: DSI,
    delay: DELAY,
    descriptor: &'static PanelDescriptor,
    state: PanelState,
    backlight: Option<BL>,
    reset: Option<RST>,
    id: PanelId,
}

impl<DSI, DELAY, BL> DsiPanel<DSI, DELAY, BL, NoResetPin>
where
    DSI: DsiDevice,
    DELAY: DelayNs,
    BL: Backlight,
{
    /// Attach using the built-in registry.
    pub fn attach<H, L>(
        compatible: &str,
        dsi: DSI,
        delay: DELAY,
        backlight: L,
        host: &mut H,
    ) -> Result<Self, AttachError<DSI::Error>>
    where
        H: DisplayHost + ?Sized,
        L: BacklightLookup<Backlight = BL>,
    {
        Self::attach_from(&registry::BUILTIN, compatible, dsi, delay, backlight, host)
    }

    /// Attach using a caller-supplied registry.
    ///
    /// On error nothing stays registered with the host and the transport is
    /// not attached.
    pub fn attach_from<H, L>(
        registry: &DescriptorRegistry,
        compatible: &str,
        mut dsi: DSI,
        delay: DELAY,
        mut backlight: L,
        host: &mut H,
    ) -> Result<Self, AttachError<DSI::Error>>
    where
        H: DisplayHost + ?Sized,
        L: BacklightLookup<Backlight = BL>,
    {
        let descriptor = registry.resolve(compatible).map_err(|e| -> AttachError<DSI::Error> {
            panel_error!("no panel descriptor for {}", compatible);
            AttachError::Resolution(e)
        })?;
        descriptor.validate().map_err(|e| -> AttachError<DSI::Error> {
            panel_error!("descriptor {} is invalid", descriptor.name);
            AttachError::Descriptor(e)
        })?;

        dsi.set_mode_flags(descriptor.mode_flags)
            .map_err(AttachError::Transport)?;
        dsi.set_pixel_format(descriptor.format)
            .map_err(AttachError::Transport)?;
        dsi.set_lanes(descriptor.lanes)
            .map_err(AttachError::Transport)?;

        let backlight = backlight.lookup().map_err(|e| -> AttachError<DSI::Error> {
            panel_error!("backlight lookup failed for {}", descriptor.name);
            AttachError::Dependency(e)
        })?;

        let info = PanelInfo {
            name: descriptor.name,
            connector_type: ConnectorType::Dsi,
            has_backlight: backlight.is_some(),
        };
        let id = host.add_panel(&info).map_err(|e| -> AttachError<DSI::Error> {
            panel_error!("failed to register panel {}", descriptor.name);
            AttachError::Resource(e)
        })?;

        if let Err(e) = dsi.attach() {
            panel_error!("failed to attach to DSI host");
            host.remove_panel(id);
            return Err(AttachError::Transport(e));
        }

        panel_info!(
            "{} attached: {} lanes, {}, {}x{}",
            descriptor.name,
            descriptor.lanes,
            descriptor.format.as_str(),
            descriptor.mode.hdisplay,
            descriptor.mode.vdisplay
        );

        Ok(Self {
            dsi,
            delay,
            descriptor,
            state: PanelState::Unprepared,
            backlight,
            reset: None,
            id,
        })
    }

    /// Install a reset GPIO, driven around the soft reset in `prepare` and
    /// held low after `unprepare`.
    pub fn with_reset_line<P: OutputPin>(self, pin: P) -> DsiPanel<DSI, DELAY, BL, P> {
        DsiPanel {
            dsi: self.dsi,
            delay: self.delay,
            descriptor: self.descriptor,
            state: self.state,
            backlight: self.backlight,
            reset: Some(pin),
            id: self.id,
        }
    }
}

impl<DSI, DELAY, BL, RST> DsiPanel<DSI, DELAY, BL, RST>
where
    DSI: DsiDevice,
    DELAY: DelayNs,
    BL: Backlight,
    RST: OutputPin,
{
    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Descriptor this panel was bound to.
    pub fn descriptor(&self) -> &'static PanelDescriptor {
        self.descriptor
    }

    /// The panel's only timing mode.
    pub fn mode(&self) -> &'static TimingMode {
        self.descriptor.mode
    }

    /// Host registration handle.
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Bound backlight, if one was found at attach.
    pub fn backlight(&self) -> Option<&BL> {
        self.backlight.as_ref()
    }

    /// Backlight brightness, `None` without a backlight.
    pub fn brightness(&self) -> Option<u8> {
        self.backlight.as_ref().map(Backlight::brightness)
    }

    /// Set backlight brightness. Without a backlight this does nothing.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), BL::Error> {
        match self.backlight.as_mut() {
            Some(bl) => bl.set_brightness(level),
            None => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Reset, configure and wake the panel.
    ///
    /// Any failure leaves the panel `Unprepared` and sends nothing further.
    /// A no-op when already prepared or enabled.
    pub fn prepare(&mut self) -> Result<(), PanelError<DSI::Error>> {
        let Transition::Run(next) = self.gate(Operation::Prepare)? else {
            return Ok(());
        };

        self.pulse_reset()?;

        self.dsi
            .soft_reset()
            .map_err(|e| prepare_failed(PrepareStep::SoftReset, e))?;
        self.delay.delay_ms(SOFT_RESET_SETTLE_MS);

        sequence::run(self.descriptor.init_sequence, &mut self.dsi)
            .map_err(|e| prepare_failed(PrepareStep::InitSequence, e))?;

        self.dsi
            .set_tear_on(TEAR_MODE)
            .map_err(|e| prepare_failed(PrepareStep::TearOn, e))?;

        self.dsi
            .exit_sleep_mode()
            .map_err(|e| prepare_failed(PrepareStep::ExitSleep, e))?;
        self.delay.delay_ms(SLEEP_EXIT_SETTLE_MS);

        self.state = next;
        panel_debug!("{} prepared", self.descriptor.name);
        Ok(())
    }

    /// Turn the display on, then the backlight.
    ///
    /// Refused with `InvalidState` before `prepare`. A no-op when enabled.
    pub fn enable(&mut self) -> Result<(), PanelError<DSI::Error>> {
        let Transition::Run(next) = self.gate(Operation::Enable)? else {
            return Ok(());
        };

        self.dsi.set_display_on().map_err(|e| {
            panel_error!("failed to turn display on");
            PanelError::EnableFailed(e)
        })?;
        self.state = next;
        self.backlight_on();
        panel_debug!("{} enabled", self.descriptor.name);
        Ok(())
    }

    /// Turn the backlight off, then the display.
    ///
    /// A no-op unless enabled. On failure the panel stays enabled and the
    /// backlight is switched back on, so the panel is still visible.
    pub fn disable(&mut self) -> Result<(), PanelError<DSI::Error>> {
        let Transition::Run(next) = self.gate(Operation::Disable)? else {
            return Ok(());
        };

        self.backlight_off();

        if let Err(e) = self.dsi.set_display_off() {
            panel_error!("failed to turn display off");
            self.backlight_on();
            return Err(PanelError::DisableFailed(e));
        }
        self.state = next;
        panel_debug!("{} disabled", self.descriptor.name);
        Ok(())
    }

    /// Put the panel to sleep.
    ///
    /// Best effort: the panel ends `Unprepared` even when the sleep command
    /// or the reset line fails; the first failure is still reported. Accepted
    /// from `Enabled`, in which case the backlight is switched off first.
    pub fn unprepare(&mut self) -> Result<(), PanelError<DSI::Error>> {
        let Transition::Run(next) = self.gate(Operation::Unprepare)? else {
            return Ok(());
        };

        if self.state == PanelState::Enabled {
            panel_warn!("unprepare while enabled");
            self.backlight_off();
        }

        let sleep = self.dsi.enter_sleep_mode().map_err(|e| {
            panel_error!("failed to enter sleep mode");
            PanelError::UnprepareFailed(e)
        });
        let reset = match self.reset.as_mut() {
            Some(rst) => rst.set_low().map_err(|_| {
                panel_error!("failed to assert reset line");
                PanelError::Gpio(Operation::Unprepare)
            }),
            None => Ok(()),
        };

        self.state = next;
        panel_debug!("{} unprepared", self.descriptor.name);
        sleep.and(reset)
    }

    /// Report the descriptor's mode and physical size to `connector`.
    ///
    /// Callable in any state. Returns the number of modes added (always 1).
    pub fn get_modes<C>(&self, connector: &mut C) -> Result<usize, PanelError<DSI::Error>>
    where
        C: Connector + ?Sized,
    {
        let timing = self.descriptor.mode;
        if let Err(e) = connector.add_probed_mode(DisplayMode::from_timing(timing)) {
            panel_error!(
                "failed to add mode {}x{}@{}",
                timing.hdisplay,
                timing.vdisplay,
                timing.vrefresh_hz()
            );
            return Err(PanelError::ResourceExhausted(e));
        }
        connector.set_physical_size(timing.width_mm, timing.height_mm);
        Ok(1)
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Unregister from the host and release the transport.
    ///
    /// No lifecycle transition is implied: an enabled panel is detached as
    /// is. A transport detach failure is logged and otherwise ignored.
    /// Returns the transport and delay source to the caller.
    pub fn detach<H>(mut self, host: &mut H) -> (DSI, DELAY)
    where
        H: DisplayHost + ?Sized,
    {
        host.remove_panel(self.id);
        if self.dsi.detach().is_err() {
            panel_warn!("failed to detach from DSI host");
        }
        panel_info!("{} detached", self.descriptor.name);
        (self.dsi, self.delay)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Apply the transition table, logging skips and rejections.
    fn gate(&self, op: Operation) -> Result<Transition, PanelError<DSI::Error>> {
        match self.state.check(op) {
            Transition::Reject => {
                panel_warn!("{} refused while {}", op.as_str(), self.state.as_str());
                Err(PanelError::InvalidState {
                    op,
                    state: self.state,
                })
            }
            Transition::Skip => {
                panel_debug!("{} skipped, already {}", op.as_str(), self.state.as_str());
                Ok(Transition::Skip)
            }
            run @ Transition::Run(_) => Ok(run),
        }
    }

    /// Reset line low → wait → high → wait. Nothing without a reset line.
    fn pulse_reset(&mut self) -> Result<(), PanelError<DSI::Error>> {
        let Some(rst) = self.reset.as_mut() else {
            return Ok(());
        };
        let gpio = |_: RST::Error| -> PanelError<DSI::Error> {
            panel_error!("failed to drive reset line");
            PanelError::Gpio(Operation::Prepare)
        };
        rst.set_low().map_err(gpio)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        rst.set_high().map_err(gpio)?;
        self.delay.delay_ms(RESET_RECOVERY_MS);
        Ok(())
    }

    fn backlight_on(&mut self) {
        if let Some(bl) = self.backlight.as_mut() {
            if bl.enable().is_err() {
                panel_warn!("failed to enable backlight");
            }
        }
    }

    fn backlight_off(&mut self) {
        if let Some(bl) = self.backlight.as_mut() {
            if bl.disable().is_err() {
                panel_warn!("failed to disable backlight");
            }
        }
    }
}

fn prepare_failed<E>(step: PrepareStep, source: E) -> PanelError<E> {
    panel_error!("prepare failed at {}", step.as_str());
    PanelError::PrepareFailed { step, source }
}

impl<DSI, DELAY, BL, RST> DisplayPanel for DsiPanel<DSI, DELAY, BL, RST>
where
    DSI: DsiDevice,
    DELAY: DelayNs,
    BL: Backlight,
    RST: OutputPin,
{
    type Error = PanelError<DSI::Error>;

    fn prepare(&mut self) -> Result<(), Self::Error> {
        Self::prepare(self)
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        Self::enable(self)
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        Self::disable(self)
    }

    fn unprepare(&mut self) -> Result<(), Self::Error> {
        Self::unprepare(self)
    }

    fn get_modes<C: Connector>(&self, connector: &mut C) -> Result<usize, Self::Error> {
        Self::get_modes(self, connector)
    }

    fn brightness(&self) -> Option<u8> {
        Self::brightness(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use platform::mocks::{
        BusEvent, InjectedFault, MockBacklight, MockBus, MockConnector, MockDelay, MockDsi,
        MockHost,
    };
    use panel_specs::{InitSequence, RegistryEntry};
    use platform::{HostError, NO_BACKLIGHT};

    const COMPATIBLE: &str = "gcat,sn65_ws7d";

    type TestPanel = DsiPanel<MockDsi, MockDelay, MockBacklight>;

    /// Attached panel with a backlight; the bus log starts empty.
    fn attached(bus: &MockBus, host: &mut MockHost) -> TestPanel {
        let panel = DsiPanel::attach(
            COMPATIBLE,
            bus.dsi(),
            bus.delay(),
            Some(bus.backlight()),
            host,
        )
        .expect("attach must succeed");
        bus.clear();
        panel
    }

    fn prepared(bus: &MockBus, host: &mut MockHost) -> TestPanel {
        let mut panel = attached(bus, host);
        panel.prepare().unwrap();
        bus.clear();
        panel
    }

    /// The exact bus traffic of a prepare without a reset line.
    fn prepare_events() -> Vec<BusEvent> {
        vec![
            BusEvent::write(&[0x01]),
            BusEvent::delay_ms(SOFT_RESET_SETTLE_MS),
            BusEvent::write(&[0x35, 0x00]),
            BusEvent::write(&[0x11]),
            BusEvent::delay_ms(SLEEP_EXIT_SETTLE_MS),
        ]
    }

    // -----------------------------------------------------------------------
    // Attach
    // -----------------------------------------------------------------------

    #[test]
    fn test_attach_configures_link_before_attach() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let panel = DsiPanel::attach(COMPATIBLE, bus.dsi(), bus.delay(), NO_BACKLIGHT, &mut host)
            .unwrap();

        let desc = panel.descriptor();
        assert_eq!(
            bus.events(),
            vec![
                BusEvent::SetModeFlags(desc.mode_flags),
                BusEvent::SetPixelFormat(desc.format),
                BusEvent::SetLanes(2),
                BusEvent::Attach,
            ]
        );
        assert_eq!(panel.state(), PanelState::Unprepared);
        assert!(host.is_registered(panel.id()));
        assert!(!host.registered()[0].1.has_backlight);
    }

    #[test]
    fn test_attach_failure_unregisters() {
        let bus = MockBus::new();
        bus.fail_attach();
        let mut host = MockHost::new();
        let result = DsiPanel::attach(COMPATIBLE, bus.dsi(), bus.delay(), NO_BACKLIGHT, &mut host);

        assert!(matches!(result, Err(AttachError::Transport(InjectedFault))));
        assert!(host.registered().is_empty());
        assert_eq!(host.removed().len(), 1);
    }

    // -----------------------------------------------------------------------
    // Prepare
    // -----------------------------------------------------------------------

    #[test]
    fn test_prepare_sequence() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attached(&bus, &mut host);

        panel.prepare().unwrap();

        assert_eq!(bus.events(), prepare_events());
        assert_eq!(panel.state(), PanelState::Prepared);
        assert_eq!(bus.total_delay_ms(), 150);
    }

    #[test]
    fn test_prepare_twice_is_noop() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);

        panel.prepare().unwrap();
        assert!(bus.events().is_empty());
        assert_eq!(panel.state(), PanelState::Prepared);
    }

    #[test]
    fn test_prepare_failure_at_each_step() {
        // (failing write index, step, writes delivered before it)
        let cases = [
            (0, PrepareStep::SoftReset, 0),
            (1, PrepareStep::TearOn, 1),
            (2, PrepareStep::ExitSleep, 2),
        ];
        for (index, step, delivered) in cases {
            let bus = MockBus::new();
            let mut host = MockHost::new();
            let mut panel = attached(&bus, &mut host);
            bus.fail_write_at(index);

            let err = panel.prepare().unwrap_err();
            assert_eq!(
                err,
                PanelError::PrepareFailed {
                    step,
                    source: InjectedFault
                }
            );
            assert_eq!(panel.state(), PanelState::Unprepared);
            assert_eq!(bus.writes().len(), delivered, "step {step}");
            // Nothing after the failed write.
            assert!(matches!(
                bus.events().last(),
                Some(BusEvent::WriteFailed(_))
            ));
        }
    }

    #[test]
    fn test_prepare_retry_after_failure() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attached(&bus, &mut host);
        bus.fail_opcode(0x11);
        assert!(panel.prepare().is_err());

        bus.heal();
        bus.clear();
        panel.prepare().unwrap();
        assert_eq!(bus.events(), prepare_events());
    }

    static VENDOR_PANEL: PanelDescriptor = PanelDescriptor {
        name: "vendor test panel",
        init_sequence: InitSequence::Vendor,
        ..panel_specs::panels::SN65_WS7D
    };

    static VENDOR_ENTRIES: [RegistryEntry; 1] = [RegistryEntry {
        compatible: "acme,vendor",
        descriptor: &VENDOR_PANEL,
    }];

    /// Attached panel whose init sequence performs three vendor writes.
    fn attached_vendor(bus: &MockBus, host: &mut MockHost) -> TestPanel {
        let registry = DescriptorRegistry::new(&VENDOR_ENTRIES);
        let panel = DsiPanel::attach_from(
            &registry,
            "acme,vendor",
            bus.dsi(),
            bus.delay(),
            Some(bus.backlight()),
            host,
        )
        .expect("attach must succeed");
        bus.clear();
        panel
    }

    #[test]
    fn test_init_sequence_runs_between_reset_and_tear_on() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attached_vendor(&bus, &mut host);

        panel.prepare().unwrap();
        assert_eq!(
            bus.events(),
            vec![
                BusEvent::write(&[0x01]),
                BusEvent::delay_ms(SOFT_RESET_SETTLE_MS),
                BusEvent::write(&[0xB0, 0x04]),
                BusEvent::write(&[0xC1, 0x00, 0x01, 0x02]),
                BusEvent::write(&[0xB0, 0x03]),
                BusEvent::write(&[0x35, 0x00]),
                BusEvent::write(&[0x11]),
                BusEvent::delay_ms(SLEEP_EXIT_SETTLE_MS),
            ]
        );
        assert_eq!(panel.state(), PanelState::Prepared);
    }

    #[test]
    fn test_init_sequence_failure_stops_prepare() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attached_vendor(&bus, &mut host);
        // write 0 is the soft reset, write 2 the second vendor command
        bus.fail_write_at(2);

        assert_eq!(
            panel.prepare(),
            Err(PanelError::PrepareFailed {
                step: PrepareStep::InitSequence,
                source: InjectedFault,
            })
        );
        assert_eq!(panel.state(), PanelState::Unprepared);
        assert_eq!(bus.writes(), vec![vec![0x01], vec![0xB0, 0x04]]);
        assert_eq!(
            bus.events().last(),
            Some(&BusEvent::WriteFailed(vec![0xC1, 0x00, 0x01, 0x02]))
        );

        // Tear-on and exit-sleep are never sent, nor the exit-sleep settle delay.
        let tail_sent = bus
            .events()
            .iter()
            .any(|e| *e == BusEvent::write(&[0x35, 0x00]) || *e == BusEvent::write(&[0x11]));
        assert!(!tail_sent);
        assert_eq!(bus.total_delay_ms(), u64::from(SOFT_RESET_SETTLE_MS));

        bus.heal();
        bus.clear();
        panel.prepare().unwrap();
        assert_eq!(bus.writes().len(), 6);
    }

    #[test]
    fn test_prepare_with_reset_line() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut pin = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            // unprepare holds the panel in reset
            PinTransaction::set(PinState::Low),
        ]);
        let mut panel = attached(&bus, &mut host).with_reset_line(pin.clone());

        panel.prepare().unwrap();
        let mut expected = vec![
            BusEvent::delay_ms(RESET_PULSE_MS),
            BusEvent::delay_ms(RESET_RECOVERY_MS),
        ];
        expected.extend(prepare_events());
        assert_eq!(bus.events(), expected);

        bus.clear();
        panel.unprepare().unwrap();
        assert_eq!(bus.writes(), vec![vec![0x10]]);
        pin.done();
    }

    #[test]
    fn test_reset_line_failure_is_gpio_error() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        use embedded_hal_mock::eh1::MockError;
        use std::io::ErrorKind;

        let mut pin = PinMock::new(&[PinTransaction::set(PinState::Low)
            .with_error(MockError::Io(ErrorKind::NotConnected))]);
        let mut panel = attached(&bus, &mut host).with_reset_line(pin.clone());

        assert_eq!(panel.prepare(), Err(PanelError::Gpio(Operation::Prepare)));
        assert_eq!(panel.state(), PanelState::Unprepared);
        assert!(bus.writes().is_empty());
        pin.done();
    }

    // -----------------------------------------------------------------------
    // Enable / disable
    // -----------------------------------------------------------------------

    #[test]
    fn test_enable_before_prepare_is_rejected() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attached(&bus, &mut host);

        assert_eq!(
            panel.enable(),
            Err(PanelError::InvalidState {
                op: Operation::Enable,
                state: PanelState::Unprepared
            })
        );
        assert!(bus.events().is_empty());
    }

    #[test]
    fn test_backlight_follows_display() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);

        panel.enable().unwrap();
        assert_eq!(
            bus.events(),
            vec![BusEvent::write(&[0x29]), BusEvent::BacklightOn]
        );
        assert_eq!(panel.brightness(), Some(platform::MAX_BRIGHTNESS));

        bus.clear();
        panel.disable().unwrap();
        assert_eq!(
            bus.events(),
            vec![BusEvent::BacklightOff, BusEvent::write(&[0x28])]
        );
        assert_eq!(panel.state(), PanelState::Prepared);
        assert_eq!(panel.brightness(), Some(0));
    }

    #[test]
    fn test_enable_failure_keeps_prepared() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);
        bus.fail_opcode(0x29);

        assert_eq!(panel.enable(), Err(PanelError::EnableFailed(InjectedFault)));
        assert_eq!(panel.state(), PanelState::Prepared);
        assert!(!panel.backlight().unwrap().is_enabled());
    }

    #[test]
    fn test_disable_failure_keeps_enabled() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);
        panel.enable().unwrap();
        bus.fail_opcode(0x28);

        assert_eq!(
            panel.disable(),
            Err(PanelError::DisableFailed(InjectedFault))
        );
        assert_eq!(panel.state(), PanelState::Enabled);
    }

    #[test]
    fn test_failed_disable_keeps_panel_lit() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);
        panel.enable().unwrap();
        bus.clear();
        bus.fail_opcode(0x28);

        assert!(panel.disable().is_err());
        assert_eq!(
            bus.events(),
            vec![
                BusEvent::BacklightOff,
                BusEvent::WriteFailed(vec![0x28]),
                BusEvent::BacklightOn,
            ]
        );
        assert_eq!(panel.state(), PanelState::Enabled);
        assert!(panel.backlight().unwrap().is_enabled());

        // A later disable still goes through the full sequence.
        bus.heal();
        bus.clear();
        panel.disable().unwrap();
        assert_eq!(
            bus.events(),
            vec![BusEvent::BacklightOff, BusEvent::write(&[0x28])]
        );
        assert!(!panel.backlight().unwrap().is_enabled());
    }

    #[test]
    fn test_backlight_failure_is_not_fatal() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);
        bus.fail_backlight();

        panel.enable().unwrap();
        assert_eq!(panel.state(), PanelState::Enabled);
        panel.disable().unwrap();
        assert_eq!(panel.state(), PanelState::Prepared);
        assert_eq!(bus.writes(), vec![vec![0x29], vec![0x28]]);
    }

    #[test]
    fn test_duplicate_enable_disable_are_noops() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);

        panel.disable().unwrap();
        assert!(bus.events().is_empty());

        panel.enable().unwrap();
        panel.enable().unwrap();
        assert_eq!(bus.writes(), vec![vec![0x29]]);
    }

    // -----------------------------------------------------------------------
    // Unprepare
    // -----------------------------------------------------------------------

    #[test]
    fn test_unprepare_is_best_effort() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);
        bus.fail_opcode(0x10);

        assert_eq!(
            panel.unprepare(),
            Err(PanelError::UnprepareFailed(InjectedFault))
        );
        assert_eq!(panel.state(), PanelState::Unprepared);
    }

    #[test]
    fn test_unprepare_from_enabled() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = prepared(&bus, &mut host);
        panel.enable().unwrap();
        bus.clear();

        panel.unprepare().unwrap();
        assert_eq!(
            bus.events(),
            vec![BusEvent::BacklightOff, BusEvent::write(&[0x10])]
        );
        assert_eq!(panel.state(), PanelState::Unprepared);
    }

    #[test]
    fn test_unprepare_when_unprepared_is_noop() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attached(&bus, &mut host);

        panel.unprepare().unwrap();
        assert!(bus.events().is_empty());
    }

    // -----------------------------------------------------------------------
    // Modes
    // -----------------------------------------------------------------------

    #[test]
    fn test_get_modes_reports_one_mode() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let panel = attached(&bus, &mut host);
        let mut connector = MockConnector::new();

        assert_eq!(panel.get_modes(&mut connector), Ok(1));
        let mode = &connector.modes()[0];
        assert_eq!(mode.name.as_str(), "1024x600");
        assert_eq!(mode.timing.clock_khz, 51_000);
        assert!(mode.timing.is_preferred());
        assert_eq!(connector.physical_size(), Some((43, 57)));
        assert!(bus.events().is_empty());
    }

    #[test]
    fn test_get_modes_refused() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let panel = attached(&bus, &mut host);
        let mut connector = MockConnector::with_capacity(0);

        assert_eq!(
            panel.get_modes(&mut connector),
            Err(PanelError::ResourceExhausted(HostError::OutOfMemory))
        );
        assert_eq!(connector.physical_size(), None);
    }

    // -----------------------------------------------------------------------
    // Host-facing trait
    // -----------------------------------------------------------------------

    fn cycle<P: DisplayPanel>(panel: &mut P) -> Result<Vec<Option<u8>>, P::Error> {
        let mut levels = vec![panel.brightness()];
        panel.prepare()?;
        panel.enable()?;
        levels.push(panel.brightness());
        panel.disable()?;
        levels.push(panel.brightness());
        panel.unprepare()?;
        Ok(levels)
    }

    #[test]
    fn test_display_panel_trait() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attached(&bus, &mut host);

        let levels = cycle(&mut panel).unwrap();
        assert_eq!(levels, vec![Some(0), Some(platform::MAX_BRIGHTNESS), Some(0)]);
        assert_eq!(
            bus.writes(),
            vec![
                vec![0x01],
                vec![0x35, 0x00],
                vec![0x11],
                vec![0x29],
                vec![0x28],
                vec![0x10],
            ]
        );
    }

    #[test]
    fn test_detach_returns_transport() {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let panel = attached(&bus, &mut host);
        let id = panel.id();

        let (_dsi, _delay) = panel.detach(&mut host);
        assert!(!host.is_registered(id));
        assert_eq!(bus.events(), vec![BusEvent::Detach]);
    }
}
