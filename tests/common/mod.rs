//! Shared test utilities: scripted mock links and coordinator builders.

#![allow(dead_code)]

use marlin_testbench::{ConnectionSettings, MockSerialPort, TestCoordinator, Timings};

/// Coordinator wired to a fresh mock link with instant timings.
///
/// Returns the mock handle so tests can script responses and inspect
/// the commands that were written.
pub fn coordinator_over_mock() -> (MockSerialPort, TestCoordinator) {
    let mock = MockSerialPort::new("MOCK0");
    let mut coordinator = TestCoordinator::new(
        ConnectionSettings {
            port_name: "MOCK0".to_string(),
            baud_rate: 115_200,
        },
        Timings::instant(),
    );
    coordinator
        .attach_link(Box::new(mock.clone()))
        .expect("attaching a mock link cannot fail");
    (mock, coordinator)
}

/// Script one healthy response for every command the full suite sends,
/// in suite order, so every check passes.
pub fn script_healthy_firmware(mock: &MockSerialPort) {
    script_healthy_until_safety(mock);
    // safety: M112, M999, M503
    mock.enqueue_read(b"ok\n");
    mock.enqueue_read(b"ok\n");
    mock.enqueue_read(b"THERMAL_PROTECTION enabled\nok\n");
}

/// Healthy responses for the hardware, stepper, and probe agents only,
/// leaving the safety agent's exchanges to the test.
pub fn script_healthy_until_safety(mock: &MockSerialPort) {
    // hardware: M115, M119, M105
    mock.enqueue_read(b"FIRMWARE_NAME:Marlin 2.1.2 SOURCE_CODE_URL:github.com ok\n");
    mock.enqueue_read(b"Reporting endstop status\nX_MIN: open\nY_MIN: open\nZ_MIN: open\nok\n");
    mock.enqueue_read(b"ok T:24.8 /0.0 B:23.9 /0.0\n");
    // hardware: G28 + G1 + G1 for each of X, Y, Z, E
    for _ in 0..12 {
        mock.enqueue_read(b"ok\n");
    }
    // stepper: M122, M906, M350
    // Single line: "OK" doubles as the acknowledgement token.
    mock.enqueue_read(b"X: OK Y: OK Z: OK E: OK\n");
    mock.enqueue_read(b"X:800 Y:800 Z:800 E:850 ok\n");
    mock.enqueue_read(b"X:16 Y:16 Z:16 E:16 ok\n");
    // probe: deploy, retract, self test
    for _ in 0..3 {
        mock.enqueue_read(b"ok\n");
    }
}
