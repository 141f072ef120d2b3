//! Pure composition of the segment buffer from the clock's state.

use crate::mode::Mode;
use crate::segment::{Glyph, SegmentBuffer};
use crate::time::{AlarmSetting, HourFormat, TimeOfDay};
use crate::timekeeper::TickFlags;

/// Which half of an `hh:mm` pair blinks while being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditedField {
    Hour,
    Minute,
}

/// Renders `mode` into a fresh buffer.
///
/// * Normal and minutes-seconds show live time with the colon following `colon_visible`.
/// * Edit modes blank the edited field while `blink_visible` is false; the colon is steady in
///   24-hour format and marks afternoon hours in 12-hour format.
/// * Show-alarm and alarming flash the whole display with `colon_visible`.
#[must_use]
pub fn compose(
    mode: Mode,
    clock: TimeOfDay,
    alarm: AlarmSetting,
    flags: TickFlags,
    hour_format: HourFormat,
) -> SegmentBuffer {
    match mode {
        Mode::Normal => hours_minutes(clock.hour, clock.minute, hour_format)
            .with_colon(flags.colon_visible),
        Mode::MinutesSeconds => {
            SegmentBuffer::from_pairs(Glyph::pair(clock.minute), Glyph::pair(clock.second))
                .with_colon(flags.colon_visible)
        }
        Mode::HourFormat => {
            let [tens, ones] = match hour_format {
                HourFormat::TwentyFour => Glyph::pair(24),
                HourFormat::Twelve => Glyph::pair(12),
            };
            SegmentBuffer::from_glyphs([tens, ones, Glyph::H, Glyph::Blank])
        }
        Mode::EditHour => editing(clock.hour, clock.minute, EditedField::Hour, flags, hour_format),
        Mode::EditMinute => {
            editing(clock.hour, clock.minute, EditedField::Minute, flags, hour_format)
        }
        Mode::ShowAlarm => flashing(alarm.hour, alarm.minute, flags, hour_format),
        Mode::EditAlarmHour => {
            editing(alarm.hour, alarm.minute, EditedField::Hour, flags, hour_format)
        }
        Mode::EditAlarmMinute => {
            editing(alarm.hour, alarm.minute, EditedField::Minute, flags, hour_format)
        }
        Mode::EnableAlarm => SegmentBuffer::from_glyphs([
            Glyph::A,
            Glyph::L,
            Glyph::Blank,
            if alarm.enabled { Glyph::Y } else { Glyph::N },
        ]),
        Mode::Alarming => flashing(clock.hour, clock.minute, flags, hour_format),
    }
}

fn hours_minutes(hour: u8, minute: u8, hour_format: HourFormat) -> SegmentBuffer {
    SegmentBuffer::from_pairs(
        Glyph::pair(hour_format.display_hour(hour)),
        Glyph::pair(minute),
    )
}

fn editing(
    hour: u8,
    minute: u8,
    field: EditedField,
    flags: TickFlags,
    hour_format: HourFormat,
) -> SegmentBuffer {
    const BLANK_PAIR: [Glyph; 2] = [Glyph::Blank; 2];
    let mut hour_glyphs = Glyph::pair(hour_format.display_hour(hour));
    let mut minute_glyphs = Glyph::pair(minute);
    if !flags.blink_visible {
        match field {
            EditedField::Hour => hour_glyphs = BLANK_PAIR,
            EditedField::Minute => minute_glyphs = BLANK_PAIR,
        }
    }
    SegmentBuffer::from_pairs(hour_glyphs, minute_glyphs)
        .with_colon(hour_format.colon_marks_hour(hour))
}

fn flashing(hour: u8, minute: u8, flags: TickFlags, hour_format: HourFormat) -> SegmentBuffer {
    if flags.colon_visible {
        hours_minutes(hour, minute, hour_format).with_colon(true)
    } else {
        SegmentBuffer::blank()
    }
}
