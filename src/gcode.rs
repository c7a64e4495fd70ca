//! Marlin command vocabulary used by the checks.
//!
//! The command set is a fixed external contract; this module just gives
//! the codes names so check logic reads as intent rather than numbers.

/// M115: report firmware name and capabilities.
pub const FIRMWARE_INFO: &str = "M115";

/// M119: report endstop states.
pub const ENDSTOP_STATES: &str = "M119";

/// M105: report hotend and bed temperatures.
pub const TEMPERATURE_REPORT: &str = "M105";

/// G28: auto-home one or more axes.
pub const AUTO_HOME: &str = "G28";

/// G1: linear move.
pub const LINEAR_MOVE: &str = "G1";

/// M122: TMC stepper driver debug report.
pub const DRIVER_STATUS: &str = "M122";

/// M906: report stepper driver currents.
pub const DRIVER_CURRENT: &str = "M906";

/// M350: report microstepping modes.
pub const MICROSTEPPING: &str = "M350";

/// M280: position the probe servo (P0 selects the probe).
pub const SERVO_POSITION: &str = "M280";

/// M280 S-codes for the BLTouch-style probe.
pub const PROBE_DEPLOY_ANGLE: u8 = 10;
pub const PROBE_RETRACT_ANGLE: u8 = 90;
pub const PROBE_SELF_TEST_ANGLE: u8 = 120;

/// M112: emergency stop.
pub const EMERGENCY_STOP: &str = "M112";

/// M999: restart after emergency stop.
pub const RESTART: &str = "M999";

/// M503: report current settings, including thermal protection flags.
pub const REPORT_SETTINGS: &str = "M503";

/// Case-insensitive token that marks the end of a command's response.
pub const ACK_TOKEN: &str = "ok";

/// Build an `M280 P0 S<angle>` probe servo command.
pub fn probe_servo_command(angle: u8) -> String {
    format!("{SERVO_POSITION} P0 S{angle}")
}
