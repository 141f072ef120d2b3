//! End-to-end button scenarios: the tick handler and the mode controller driven together, the
//! way the firmware's two tasks drive them.

use alarm_clock::constants::LONG_THRESHOLD;
use alarm_clock::{
    AlarmSetting, Button, ButtonLines, ClockShared, Glyph, HourFormat, Mode, ModeController,
    SegmentBuffer, TimeOfDay, Timekeeper,
};

/// Main-loop iterations per tick (50 ms tick, 5 ms loop).
const STEPS_PER_TICK: u32 = 10;

struct Rig<'a> {
    shared: &'a ClockShared,
    timekeeper: Timekeeper<'a>,
    controller: ModeController,
}

impl<'a> Rig<'a> {
    fn new(shared: &'a ClockShared, alarm: AlarmSetting) -> Self {
        Self {
            shared,
            timekeeper: Timekeeper::new(shared),
            controller: ModeController::new(alarm, HourFormat::TwentyFour),
        }
    }

    fn hold(&mut self, lines: ButtonLines, ticks: u32) {
        for _ in 0..ticks {
            self.timekeeper.tick(lines);
            for _ in 0..STEPS_PER_TICK {
                self.controller.step(self.shared);
            }
        }
    }

    fn idle(&mut self, ticks: u32) {
        self.hold(ButtonLines::RELEASED, ticks);
    }

    fn tap(&mut self, button: Button) {
        self.hold(lines(button), 3);
        self.idle(1);
    }

    fn long_press(&mut self, button: Button) {
        self.hold(lines(button), u32::from(LONG_THRESHOLD) + 2);
        self.idle(1);
    }

    fn mode(&self) -> Mode {
        self.controller.mode()
    }

    fn render(&self) -> SegmentBuffer {
        self.controller.render(self.shared)
    }
}

fn lines(button: Button) -> ButtonLines {
    match button {
        Button::B1 => ButtonLines { b1: true, b2: false },
        Button::B2 => ButtonLines { b1: false, b2: true },
    }
}

fn digits(left: u8, right: u8) -> SegmentBuffer {
    SegmentBuffer::from_pairs(Glyph::pair(left), Glyph::pair(right))
}

#[test]
fn set_clock_hour_with_long_press() {
    let shared = ClockShared::new(TimeOfDay::new(9, 15, 30));
    let mut rig = Rig::new(&shared, AlarmSetting::new(12, 1, true));

    rig.long_press(Button::B1);
    assert_eq!(rig.mode(), Mode::EditHour);
    assert!(!shared.is_running());
    let paused_at = shared.time();

    rig.tap(Button::B2);
    assert_eq!(shared.time(), TimeOfDay::new(10, 15, 0));
    assert_eq!(rig.mode(), Mode::EditHour);

    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::EditMinute);
    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::Normal);
    assert!(shared.is_running());
    assert_ne!(paused_at, shared.time());

    rig.idle(20);
    assert_eq!(shared.time(), TimeOfDay::new(10, 15, 1));
}

#[test]
fn edited_field_blinks_and_clock_stays_paused() {
    let shared = ClockShared::new(TimeOfDay::new(9, 15, 30));
    let mut rig = Rig::new(&shared, AlarmSetting::new(12, 1, true));
    rig.long_press(Button::B1);
    let paused_at = shared.time();

    let shown = digits(paused_at.hour, paused_at.minute).with_colon(true);
    let blanked = SegmentBuffer::from_pairs([Glyph::Blank; 2], Glyph::pair(paused_at.minute))
        .with_colon(true);
    let mut saw_shown = false;
    let mut saw_blanked = false;
    for _ in 0..40 {
        rig.idle(1);
        let buffer = rig.render();
        saw_shown |= buffer == shown;
        saw_blanked |= buffer == blanked;
        assert!(buffer == shown || buffer == blanked, "{buffer:?}");
    }
    assert!(saw_shown && saw_blanked);
    assert_eq!(shared.time(), paused_at);
}

#[test]
fn held_increment_auto_repeats() {
    let shared = ClockShared::new(TimeOfDay::new(9, 15, 30));
    let mut rig = Rig::new(&shared, AlarmSetting::new(12, 1, true));
    rig.long_press(Button::B1);
    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::EditMinute);

    // One step for the press, then one every four ticks once the hold turns long.
    rig.hold(lines(Button::B2), u32::from(LONG_THRESHOLD) + 20);
    rig.idle(1);
    let minute = shared.time().minute;
    assert!((21..=22).contains(&minute), "minute {minute}");
    assert_eq!(shared.time().second, 0);
    assert_eq!(shared.time().hour, 9);
    assert_eq!(rig.mode(), Mode::EditMinute);
}

#[test]
fn alarm_fires_once_and_release_dismisses_it() {
    let shared = ClockShared::new(TimeOfDay::new(7, 29, 58));
    let mut rig = Rig::new(&shared, AlarmSetting::new(7, 30, true));

    rig.idle(39);
    assert_eq!(rig.mode(), Mode::Normal);
    rig.idle(1);
    assert_eq!(shared.time(), TimeOfDay::new(7, 30, 0));
    assert_eq!(rig.mode(), Mode::Alarming);
    assert!(rig.controller.buzzer());
    assert_eq!(rig.render(), digits(7, 30).with_colon(true));

    // Second half of the second: buzzer and display dark.
    rig.idle(10);
    assert!(!rig.controller.buzzer());
    assert_eq!(rig.render(), SegmentBuffer::blank());

    rig.tap(Button::B2);
    assert_eq!(rig.mode(), Mode::Normal);
    assert!(!rig.controller.buzzer());

    // The rest of the alarm minute must not re-trigger.
    rig.idle(20 * 55);
    assert_eq!(shared.time().minute, 30);
    assert_eq!(rig.mode(), Mode::Normal);
    rig.idle(20 * 5);
    assert_eq!(shared.time(), TimeOfDay::new(7, 31, 0));
    assert_eq!(rig.mode(), Mode::Normal);

    // The next time the alarm minute starts, it fires again.
    shared.clock().store(TimeOfDay::new(7, 29, 59));
    rig.idle(20);
    assert_eq!(rig.mode(), Mode::Alarming);
}

#[test]
fn undismissed_alarm_stops_after_its_minute() {
    let shared = ClockShared::new(TimeOfDay::new(7, 30, 0));
    let mut rig = Rig::new(&shared, AlarmSetting::new(7, 30, true));
    rig.idle(1);
    assert_eq!(rig.mode(), Mode::Alarming);

    rig.idle(20 * 59);
    assert_eq!(rig.mode(), Mode::Alarming);
    rig.idle(20);
    assert_eq!(shared.time(), TimeOfDay::new(7, 31, 0));
    assert_eq!(rig.mode(), Mode::Normal);
    assert!(!rig.controller.buzzer());
}

#[test]
fn toggle_alarm_enable() {
    let shared = ClockShared::new(TimeOfDay::new(7, 0, 0));
    let mut rig = Rig::new(&shared, AlarmSetting::new(7, 30, true));
    let yes = SegmentBuffer::from_glyphs([Glyph::A, Glyph::L, Glyph::Blank, Glyph::Y]);
    let no = SegmentBuffer::from_glyphs([Glyph::A, Glyph::L, Glyph::Blank, Glyph::N]);

    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::ShowAlarm);
    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::EnableAlarm);
    assert_eq!(rig.render(), yes);

    rig.tap(Button::B2);
    assert_eq!(rig.render(), no);
    assert!(!rig.controller.alarm().enabled);

    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::Normal);

    // Disabled: 07:30 passes quietly.
    shared.clock().store(TimeOfDay::new(7, 29, 59));
    rig.idle(40);
    assert_eq!(shared.time().minute, 30);
    assert_eq!(rig.mode(), Mode::Normal);
}

#[test]
fn alarm_enable_toggles_back_and_forth() {
    let shared = ClockShared::new(TimeOfDay::new(7, 0, 0));
    let mut rig = Rig::new(&shared, AlarmSetting::new(7, 30, true));
    let yes = SegmentBuffer::from_glyphs([Glyph::A, Glyph::L, Glyph::Blank, Glyph::Y]);
    let no = SegmentBuffer::from_glyphs([Glyph::A, Glyph::L, Glyph::Blank, Glyph::N]);

    rig.tap(Button::B1);
    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::EnableAlarm);

    rig.tap(Button::B2);
    assert_eq!(rig.render(), no);
    rig.tap(Button::B2);
    assert_eq!(rig.render(), yes);
    assert!(rig.controller.alarm().enabled);
    assert_eq!(rig.mode(), Mode::EnableAlarm);

    rig.tap(Button::B1);
    assert_eq!(rig.mode(), Mode::Normal);

    // Enabled again: 07:30 fires.
    shared.clock().store(TimeOfDay::new(7, 29, 59));
    rig.idle(20);
    assert_eq!(rig.mode(), Mode::Alarming);
}

#[test]
fn hour_edit_wraps_past_midnight_and_resets_seconds() {
    let shared = ClockShared::new(TimeOfDay::new(23, 40, 25));
    let mut rig = Rig::new(&shared, AlarmSetting::new(12, 1, true));

    rig.long_press(Button::B1);
    assert_eq!(rig.mode(), Mode::EditHour);
    assert_eq!(shared.time().hour, 23);
    assert_ne!(shared.time().second, 0);

    rig.tap(Button::B2);
    assert_eq!(shared.time(), TimeOfDay::new(0, 40, 0));
    let shown = digits(0, 40).with_colon(true);
    let blanked =
        SegmentBuffer::from_pairs([Glyph::Blank; 2], Glyph::pair(40)).with_colon(true);
    let buffer = rig.render();
    assert!(buffer == shown || buffer == blanked, "{buffer:?}");

    rig.tap(Button::B2);
    assert_eq!(shared.time(), TimeOfDay::new(1, 40, 0));
}

#[test]
fn twelve_hour_format_from_the_b2_cycle() {
    let shared = ClockShared::new(TimeOfDay::new(15, 42, 0));
    let mut rig = Rig::new(&shared, AlarmSetting::new(7, 30, false));

    rig.tap(Button::B2);
    assert_eq!(rig.mode(), Mode::MinutesSeconds);
    rig.tap(Button::B2);
    assert_eq!(rig.mode(), Mode::HourFormat);
    rig.tap(Button::B1);
    assert_eq!(rig.controller.hour_format(), HourFormat::Twelve);
    assert_eq!(
        rig.render(),
        SegmentBuffer::from_glyphs([Glyph::Digit(1), Glyph::Digit(2), Glyph::H, Glyph::Blank])
    );
    rig.tap(Button::B2);
    assert_eq!(rig.mode(), Mode::Normal);

    let without_colon = rig.render().bits();
    assert_eq!(without_colon[0], digits(3, 42).bits()[0]);
    assert_eq!(without_colon[2..], digits(3, 42).bits()[2..]);
}

#[test]
fn bounces_shorter_than_the_threshold_are_ignored() {
    let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
    let mut rig = Rig::new(&shared, AlarmSetting::new(12, 1, true));
    for _ in 0..10 {
        rig.hold(lines(Button::B2), 1);
        rig.idle(1);
    }
    assert_eq!(rig.mode(), Mode::Normal);
    assert!(!shared.button(Button::B2).pressed.is_set());
    assert!(!shared.button(Button::B2).released.is_set());
}

#[test]
fn steps_without_ticks_change_nothing() {
    let shared = ClockShared::new(TimeOfDay::new(9, 0, 0));
    let mut rig = Rig::new(&shared, AlarmSetting::new(12, 1, true));
    rig.long_press(Button::B1);
    rig.idle(7);

    let mode = rig.mode();
    let buffer = rig.render();
    let time = shared.time();
    for _ in 0..100 {
        rig.controller.step(&shared);
    }
    assert_eq!(rig.mode(), mode);
    assert_eq!(rig.render(), buffer);
    assert_eq!(shared.time(), time);
}
