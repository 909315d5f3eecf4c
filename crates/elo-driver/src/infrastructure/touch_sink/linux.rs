//! Linux virtual touchscreen via uinput.
//!
//! Creates an input device that the kernel and the desktop treat exactly
//! like a directly attached touchscreen, then replays decoded touch events
//! into it.
//!
//! # What is uinput? (for beginners)
//!
//! `/dev/uinput` lets a userspace process register a new input device and
//! write `input_event` records into it.  Those records show up on a fresh
//! `/dev/input/eventN` node and are picked up by libinput, X11 or Wayland
//! compositors as if they came from hardware.
//!
//! The device declared here has:
//!
//! | Capability     | Range                  |
//! |----------------|------------------------|
//! | `ABS_X`        | 0..=4095               |
//! | `ABS_Y`        | 0..=4095               |
//! | `ABS_PRESSURE` | 0..=`pressure_max`     |
//! | `BTN_TOUCH`    | 0 / 1                  |
//!
//! and the `INPUT_PROP_DIRECT` property, which tells the desktop that
//! coordinates map straight onto the screen (a touchscreen, not a touchpad).
//!
//! # One batch per frame
//!
//! Each touch event is written as a single batch terminated by `SYN_REPORT`
//! so consumers never see a position without the matching contact state:
//!
//! ```text
//! ABS_X x, ABS_Y y, ABS_PRESSURE z, BTN_TOUCH touch, SYN_REPORT
//! ```
//!
//! # Permissions
//!
//! Opening `/dev/uinput` normally requires root or membership in a group
//! that owns the node (often `input` or `uinput`).  If access is denied the
//! constructor fails with an I/O error and the driver exits; `--sniff` runs
//! without a device.

use std::sync::Mutex;

use evdevil::event::{Abs, EventType, InputEvent, Key, Syn, SynEvent};
use evdevil::uinput::{AbsSetup, UinputDevice};
use evdevil::{AbsInfo, Bus, InputId, InputProp};
use tracing::info;

use elo_core::protocol::frame::AXIS_MAX;
use elo_core::TouchEvent;

use crate::application::forward_touch::{SinkError, TouchSink};

// ── evdev constants ───────────────────────────────────────────────────────────

const EV_KEY: u16 = 0x01;
const EV_ABS: u16 = 0x03;
const ABS_X: u16 = 0x00;
const ABS_Y: u16 = 0x01;
const ABS_PRESSURE: u16 = 0x18;

/// `BUS_RS232`: the controller hangs off a serial line.
const BUS_RS232: u16 = 0x13;

/// Elo Touch Solutions USB vendor ID, reused so desktop tools show a sensible name.
const ELO_VENDOR_ID: u16 = 0x04e7;

/// Name the virtual device registers under.
pub const DEVICE_NAME: &str = "Elo Serial Touchscreen";

/// uinput-backed [`TouchSink`].
pub struct UinputTouchSink {
    device: Mutex<UinputDevice>,
}

impl UinputTouchSink {
    /// Registers the virtual touchscreen.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if `/dev/uinput` cannot be opened or the
    /// kernel rejects the device description.
    pub fn new(pressure_max: i32) -> Result<Self, SinkError> {
        let axes = [
            AbsSetup::new(Abs::X, AbsInfo::new(0, i32::from(AXIS_MAX))),
            AbsSetup::new(Abs::Y, AbsInfo::new(0, i32::from(AXIS_MAX))),
            AbsSetup::new(Abs::PRESSURE, AbsInfo::new(0, pressure_max)),
        ];
        let device = UinputDevice::builder()?
            .with_input_id(InputId::new(Bus::RS232, ELO_VENDOR_ID, 0x0001, 0))?
            .with_props([InputProp::DIRECT])?
            .with_abs_axes(axes)?
            .with_keys([Key::BTN_TOUCH])?
            .build(DEVICE_NAME)?;

        if let Ok(name) = device.sysname() {
            info!(
                "uinput device created: /sys/devices/virtual/input/{}",
                name.to_string_lossy()
            );
        }
        Ok(Self {
            device: Mutex::new(device),
        })
    }
}

/// Builds the event batch for one touch report.
fn touch_batch(event: &TouchEvent) -> [InputEvent; 5] {
    [
        abs_event(ABS_X, i32::from(event.x)),
        abs_event(ABS_Y, i32::from(event.y)),
        abs_event(ABS_PRESSURE, i32::from(event.z)),
        InputEvent::new(
            EventType::from_raw(EV_KEY),
            Key::BTN_TOUCH.raw(),
            i32::from(event.touch),
        ),
        SynEvent::new(Syn::REPORT).into(),
    ]
}

fn abs_event(code: u16, value: i32) -> InputEvent {
    InputEvent::new(EventType::from_raw(EV_ABS), code, value)
}

impl TouchSink for UinputTouchSink {
    fn emit(&self, event: &TouchEvent) -> Result<(), SinkError> {
        let batch = touch_batch(event);
        let device = self
            .device
            .lock()
            .map_err(|_| SinkError::Device("uinput device mutex poisoned".into()))?;
        device.write(&batch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_batch_orders_axes_before_button_and_sync() {
        // Arrange
        let event = TouchEvent { touch: true, x: 4095, y: 12, z: 200, status: 0x03 };

        // Act
        let batch = touch_batch(&event);

        // Assert
        let raw: Vec<(u16, u16, i32)> = batch
            .iter()
            .map(|ev| (ev.event_type().raw(), ev.raw_code(), ev.raw_value()))
            .collect();
        assert_eq!(
            raw,
            vec![
                (EV_ABS, ABS_X, 4095),
                (EV_ABS, ABS_Y, 12),
                (EV_ABS, ABS_PRESSURE, 200),
                (EV_KEY, Key::BTN_TOUCH.raw(), 1),
                (0x00, 0x00, 0),
            ]
        );
    }

    #[test]
    fn test_release_reports_button_up() {
        let event = TouchEvent { touch: false, x: 0, y: 0, z: 0, status: 0x00 };
        let batch = touch_batch(&event);
        assert_eq!(batch[3].raw_value(), 0);
    }
}
