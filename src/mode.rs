//! The main-loop state machine: alarm evaluation, then one button transition per step.
//!
//! ```text
//!            B2 released            B2 released            B2 released
//!   Normal ──────────────► MinutesSeconds ──────────► HourFormat ──────────► Normal
//!     │ B1 long                                        (B1 released toggles 12/24 h)
//!     ▼
//!   EditHour ──B1 pressed──► EditMinute ──B1 pressed──► Normal   (B2 increments, clock paused)
//!
//!   Normal ──B1 released──► ShowAlarm ──B1 released──► EnableAlarm ──B1 pressed──► Normal
//!                              │ B1 long                 ▲ (B2 pressed toggles enabled)
//!                              ▼                         │
//!                      EditAlarmHour ──B1 pressed──► EditAlarmMinute
//!
//!   any mode ──alarm minute starts──► Alarming ──any release / minute over──► Normal
//! ```

#[cfg(feature = "defmt")]
use defmt::{debug, info};

use crate::debounce::{Button, ButtonEvents};
use crate::display;
use crate::segment::SegmentBuffer;
use crate::time::{AlarmSetting, HourFormat};
use crate::timekeeper::ClockShared;

/// What the clock is doing. Exactly one at a time.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `hh:mm` with a blinking colon.
    #[default]
    Normal,
    /// `mm:ss` with a blinking colon.
    MinutesSeconds,
    /// `24h` or `12h`; B1 toggles.
    HourFormat,
    EditHour,
    EditMinute,
    /// The alarm time, whole display flashing.
    ShowAlarm,
    EditAlarmHour,
    EditAlarmMinute,
    /// `AL y` or `AL n`; B2 toggles.
    EnableAlarm,
    /// The live time, flashing, with the buzzer sounding.
    Alarming,
}

/// Owns the mode, the alarm setting, and the hour format. Runs once per main-loop iteration.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Mode,
    alarm: AlarmSetting,
    hour_format: HourFormat,
    buzzer: bool,
    // Set when the alarm fires; cleared once the clock leaves the alarm minute. Keeps a
    // dismissed alarm from firing again in the same minute.
    alarm_latched: bool,
}

impl ModeController {
    #[must_use]
    pub const fn new(alarm: AlarmSetting, hour_format: HourFormat) -> Self {
        Self {
            mode: Mode::Normal,
            alarm,
            hour_format,
            buzzer: false,
            alarm_latched: false,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn alarm(&self) -> AlarmSetting {
        self.alarm
    }

    #[must_use]
    pub const fn hour_format(&self) -> HourFormat {
        self.hour_format
    }

    /// Whether the buzzer should be sounding right now.
    #[must_use]
    pub const fn buzzer(&self) -> bool {
        self.buzzer
    }

    /// One main-loop step: alarm evaluation, then at most one button transition.
    pub fn step(&mut self, shared: &ClockShared) {
        self.evaluate_alarm(shared);
        self.handle_buttons(shared);
    }

    /// Composes the display for the current state.
    #[must_use]
    pub fn render(&self, shared: &ClockShared) -> SegmentBuffer {
        display::compose(
            self.mode,
            shared.time(),
            self.alarm,
            shared.flags(),
            self.hour_format,
        )
    }

    fn evaluate_alarm(&mut self, shared: &ClockShared) {
        let now = shared.time();
        let matched = self.alarm.enabled && shared.is_running() && self.alarm.matches(now);

        if !matched {
            self.alarm_latched = false;
            if self.mode == Mode::Alarming {
                #[cfg(feature = "defmt")]
                info!("Alarm minute over");
                self.buzzer = false;
                self.enter(Mode::Normal);
            }
            return;
        }

        if now.second == 0 && !self.alarm_latched && self.mode != Mode::Alarming {
            #[cfg(feature = "defmt")]
            info!("Alarm at {}:{}", now.hour, now.minute);
            self.alarm_latched = true;
            self.enter(Mode::Alarming);
        }
        if self.mode == Mode::Alarming {
            self.buzzer = shared.flags().colon_visible;
        }
    }

    fn handle_buttons(&mut self, shared: &ClockShared) {
        let b1 = shared.button(Button::B1);
        let b2 = shared.button(Button::B2);

        match self.mode {
            Mode::Alarming => {
                // Take both so a release on the other button cannot leak into Normal.
                let released_b1 = b1.released.take();
                let released_b2 = b2.released.take();
                if released_b1 || released_b2 {
                    #[cfg(feature = "defmt")]
                    info!("Alarm dismissed");
                    self.buzzer = false;
                    self.enter(Mode::Normal);
                }
            }
            Mode::Normal => {
                if b2.released.take() {
                    self.enter(Mode::MinutesSeconds);
                } else if take_long_press(b1) {
                    shared.set_running(false);
                    self.enter(Mode::EditHour);
                } else if b1.released.take() {
                    self.enter(Mode::ShowAlarm);
                }
            }
            Mode::MinutesSeconds => {
                if b2.released.take() {
                    self.enter(Mode::HourFormat);
                }
            }
            Mode::HourFormat => {
                if b2.released.take() {
                    self.enter(Mode::Normal);
                } else if b1.released.take() {
                    self.hour_format = self.hour_format.toggled();
                    #[cfg(feature = "defmt")]
                    info!("Hour format: {:?}", self.hour_format);
                }
            }
            Mode::ShowAlarm => {
                if take_long_press(b1) {
                    self.enter(Mode::EditAlarmHour);
                } else if b1.released.take() {
                    self.enter(Mode::EnableAlarm);
                }
            }
            Mode::EnableAlarm => {
                if b1.pressed.take() {
                    self.enter(Mode::Normal);
                } else if b2.pressed.take() {
                    self.alarm.enabled = !self.alarm.enabled;
                    #[cfg(feature = "defmt")]
                    info!("Alarm enabled: {}", self.alarm.enabled);
                }
            }
            Mode::EditHour => {
                if b1.pressed.take() {
                    self.enter(Mode::EditMinute);
                } else if take_increment(b2, shared) {
                    shared.clock().increment_hour();
                    #[cfg(feature = "defmt")]
                    debug!("Clock hour: {}", shared.time().hour);
                }
            }
            Mode::EditMinute => {
                if b1.pressed.take() {
                    shared.set_running(true);
                    self.enter(Mode::Normal);
                } else if take_increment(b2, shared) {
                    shared.clock().increment_minute();
                    #[cfg(feature = "defmt")]
                    debug!("Clock minute: {}", shared.time().minute);
                }
            }
            Mode::EditAlarmHour => {
                if b1.pressed.take() {
                    self.enter(Mode::EditAlarmMinute);
                } else if take_increment(b2, shared) {
                    self.alarm.increment_hour();
                    #[cfg(feature = "defmt")]
                    debug!("Alarm hour: {}", self.alarm.hour);
                }
            }
            Mode::EditAlarmMinute => {
                if b1.pressed.take() {
                    self.enter(Mode::EnableAlarm);
                } else if take_increment(b2, shared) {
                    self.alarm.increment_minute();
                    #[cfg(feature = "defmt")]
                    debug!("Alarm minute: {}", self.alarm.minute);
                }
            }
        }
    }

    fn enter(&mut self, mode: Mode) {
        #[cfg(feature = "defmt")]
        info!("Mode: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }
}

/// Consumes a long press, along with its press so the eventual release is swallowed.
fn take_long_press(events: &ButtonEvents) -> bool {
    if events.pressed_long.take() {
        events.pressed.clear();
        true
    } else {
        false
    }
}

/// A fresh press, or one auto-repeat step while the button is held past the long threshold.
fn take_increment(events: &ButtonEvents, shared: &ClockShared) -> bool {
    events.pressed.take() || (events.pressed_long.is_set() && shared.auto_repeat_ready().take())
}

#[cfg(test)]
mod tests {
    use super::{Mode, ModeController};
    use crate::debounce::Button;
    use crate::time::{AlarmSetting, HourFormat, TimeOfDay};
    use crate::timekeeper::ClockShared;

    fn controller() -> ModeController {
        ModeController::new(AlarmSetting::new(12, 1, true), HourFormat::TwentyFour)
    }

    #[test]
    fn b2_release_cycles_display_modes() {
        let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
        let mut controller = controller();
        for expected in [Mode::MinutesSeconds, Mode::HourFormat, Mode::Normal] {
            shared.button(Button::B2).released.set();
            controller.step(&shared);
            assert_eq!(controller.mode(), expected);
        }
    }

    #[test]
    fn hour_format_toggles_on_b1_release() {
        let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
        let mut controller = controller();
        shared.button(Button::B2).released.set();
        controller.step(&shared);
        shared.button(Button::B2).released.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::HourFormat);

        shared.button(Button::B1).released.set();
        controller.step(&shared);
        assert_eq!(controller.hour_format(), HourFormat::Twelve);
        assert_eq!(controller.mode(), Mode::HourFormat);
    }

    #[test]
    fn long_press_swallows_its_release() {
        let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
        let mut controller = controller();
        let b1 = shared.button(Button::B1);
        b1.pressed.set();
        b1.pressed_long.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::EditHour);
        assert!(!shared.is_running());
        assert!(!b1.pressed.is_set());
        assert!(!b1.pressed_long.is_set());
    }

    #[test]
    fn unmatched_events_are_left_alone() {
        let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
        let mut controller = controller();
        // Normal has no row for B2 pressed.
        shared.button(Button::B2).pressed.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::Normal);
        assert!(shared.button(Button::B2).pressed.is_set());
    }

    #[test]
    fn auto_repeat_needs_long_press_and_ready_flag() {
        let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
        let mut controller = controller();
        shared.button(Button::B1).pressed_long.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::EditHour);

        let b2 = shared.button(Button::B2);
        b2.pressed_long.set();
        controller.step(&shared);
        assert_eq!(shared.time().hour, 9, "no repeat without the ready flag");

        shared.auto_repeat_ready().set();
        controller.step(&shared);
        assert_eq!(shared.time().hour, 10);
        assert!(!shared.auto_repeat_ready().is_set());
        controller.step(&shared);
        assert_eq!(shared.time().hour, 10, "one increment per ready flag");
    }

    #[test]
    fn alarm_edit_path_reaches_enable_alarm() {
        let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
        let mut controller = controller();
        let b1 = shared.button(Button::B1);
        let b2 = shared.button(Button::B2);

        b1.released.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::ShowAlarm);

        b1.pressed_long.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::EditAlarmHour);

        b2.pressed.set();
        controller.step(&shared);
        assert_eq!(controller.alarm().hour, 13);

        b1.pressed.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::EditAlarmMinute);

        for _ in 0..59 {
            b2.pressed.set();
            controller.step(&shared);
        }
        assert_eq!(controller.alarm(), AlarmSetting::new(13, 0, true));

        b1.pressed.set();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::EnableAlarm);
        assert!(shared.is_running(), "alarm edits never pause the clock");
    }

    #[test]
    fn alarm_expires_after_its_minute() {
        let shared = ClockShared::new(TimeOfDay::new(12, 1, 0));
        let mut controller = controller();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::Alarming);

        shared.clock().store(TimeOfDay::new(12, 2, 0));
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::Normal);
        assert!(!controller.buzzer());
    }

    #[test]
    fn disabled_or_paused_alarm_never_fires() {
        let shared = ClockShared::new(TimeOfDay::new(12, 1, 0));
        let mut disabled =
            ModeController::new(AlarmSetting::new(12, 1, false), HourFormat::TwentyFour);
        disabled.step(&shared);
        assert_eq!(disabled.mode(), Mode::Normal);

        let mut controller = controller();
        shared.set_running(false);
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::Normal);
    }

    #[test]
    fn alarm_does_not_fire_mid_minute() {
        let shared = ClockShared::new(TimeOfDay::new(12, 1, 30));
        let mut controller = controller();
        controller.step(&shared);
        assert_eq!(controller.mode(), Mode::Normal);
    }
}
