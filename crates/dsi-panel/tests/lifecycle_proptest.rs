//! Property-based tests for the lifecycle state machine.
//! Drives random call orders against the transition table and checks that the
//! panel state and bus traffic agree with it for every prefix.

#![allow(clippy::unwrap_used)]

use dsi_panel::{DsiPanel, Operation, PanelState, Transition};
use platform::mocks::{BusEvent, MockBacklight, MockBus, MockDelay, MockDsi, MockHost};
use proptest::prelude::*;

type TestPanel = DsiPanel<MockDsi, MockDelay, MockBacklight>;

fn attach(bus: &MockBus, host: &mut MockHost) -> TestPanel {
    let panel = DsiPanel::attach(
        "gcat,sn65_ws7d",
        bus.dsi(),
        bus.delay(),
        Some(bus.backlight()),
        host,
    )
    .unwrap();
    bus.clear();
    panel
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Prepare),
        Just(Operation::Enable),
        Just(Operation::Disable),
        Just(Operation::Unprepare),
    ]
}

fn call(panel: &mut TestPanel, op: Operation) -> bool {
    let result = match op {
        Operation::Prepare => panel.prepare(),
        Operation::Enable => panel.enable(),
        Operation::Disable => panel.disable(),
        Operation::Unprepare => panel.unprepare(),
    };
    result.is_ok()
}

proptest! {
    /// Run transitions touch the bus and succeed; skipped and rejected ones
    /// send nothing. The panel state always equals the model state.
    #[test]
    fn lifecycle_follows_transition_table(ops in prop::collection::vec(operation(), 0..24)) {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attach(&bus, &mut host);
        let mut model = PanelState::Unprepared;

        for op in ops {
            let before = bus.events().len();
            let ok = call(&mut panel, op);
            let after = bus.events().len();

            match model.check(op) {
                Transition::Run(next) => {
                    prop_assert!(ok, "{} from {} failed", op, model);
                    prop_assert!(after > before, "{} from {} sent nothing", op, model);
                    model = next;
                }
                Transition::Skip => {
                    prop_assert!(ok);
                    prop_assert_eq!(after, before);
                }
                Transition::Reject => {
                    prop_assert!(!ok);
                    prop_assert_eq!(after, before);
                }
            }
            prop_assert_eq!(panel.state(), model);
        }
    }

    /// Display-on is never sent to a panel that was not prepared.
    #[test]
    fn display_on_only_after_exit_sleep(ops in prop::collection::vec(operation(), 0..24)) {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attach(&bus, &mut host);
        for op in ops {
            call(&mut panel, op);
        }

        let mut awake = false;
        for event in bus.events() {
            match event {
                BusEvent::Write(bytes) if bytes == [0x11] => awake = true,
                BusEvent::Write(bytes) if bytes == [0x10] => awake = false,
                BusEvent::Write(bytes) if bytes == [0x29] => prop_assert!(awake),
                _ => {}
            }
        }
    }

    /// Unprepare lands in `Unprepared` whatever came before and even when
    /// sleep-enter fails.
    #[test]
    fn unprepare_always_lands_unprepared(
        ops in prop::collection::vec(operation(), 0..8),
        fail_sleep in any::<bool>(),
    ) {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attach(&bus, &mut host);
        for op in ops {
            call(&mut panel, op);
        }
        if fail_sleep {
            bus.fail_opcode(0x10);
        }

        let _ = panel.unprepare();
        prop_assert_eq!(panel.state(), PanelState::Unprepared);
    }

    /// A write failure at prepare step `k` leaves the panel unprepared and
    /// nothing after the failed write reaches the bus.
    #[test]
    fn prepare_failure_stops_at_failed_write(k in 0usize..3) {
        let bus = MockBus::new();
        let mut host = MockHost::new();
        let mut panel = attach(&bus, &mut host);
        bus.fail_write_at(k);

        prop_assert!(panel.prepare().is_err());
        prop_assert_eq!(panel.state(), PanelState::Unprepared);
        prop_assert_eq!(bus.writes().len(), k);
        let last_is_failed = matches!(bus.events().last(), Some(BusEvent::WriteFailed(_)));
        prop_assert!(last_is_failed);
    }
}
