//! Host simulation: the real clock core driven by a scripted button sequence, drawn as ASCII
//! seven-segment digits.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use alarm_clock::constants::TICK_PERIOD;
use alarm_clock::segment::COLON_CELL;
use alarm_clock::{
    AlarmSetting, ButtonLines, ClockShared, HourFormat, Leds, Mode, ModeController,
    SegmentBuffer, TimeOfDay, Timekeeper,
};
use owo_colors::OwoColorize;

/// Alarm fires, gets dismissed, then a tour of the B2 cycle and an hour/minute edit.
pub const DEFAULT_SCRIPT: &str = "idle:110,b2:3,idle:20,b2:3,idle:40,b2:3,idle:10,b1:3,idle:20,\
b2:3,idle:20,b1:44,idle:20,b2:3,idle:10,b1:3,b2:70,idle:5,b1:3,idle:40";

/// Main-loop steps per tick, matching the firmware's 5 ms loop against the 50 ms tick.
const STEPS_PER_TICK: u32 = 10;

struct Step {
    lines: ButtonLines,
    ticks: u32,
}

pub fn run(script: &str, start: &str, alarm: &str, realtime: bool) -> ExitCode {
    let parsed = parse_script(script).and_then(|steps| {
        let start = parse_time(start)?;
        let (hour, minute, _) = parse_time(alarm)?;
        Ok((steps, start, AlarmSetting::new(hour, minute, true)))
    });
    let (steps, (hour, minute, second), alarm) = match parsed {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message.red());
            return ExitCode::FAILURE;
        }
    };

    let shared = ClockShared::new(TimeOfDay::new(hour, minute, second));
    let mut timekeeper = Timekeeper::new(&shared);
    let mut controller = ModeController::new(alarm, HourFormat::TwentyFour);
    let mut shown: Option<(Mode, SegmentBuffer, bool)> = None;
    let mut elapsed_ticks: u32 = 0;
    let tick = Duration::from_millis(TICK_PERIOD.as_millis());

    for step in &steps {
        for _ in 0..step.ticks {
            timekeeper.tick(step.lines);
            elapsed_ticks += 1;
            for _ in 0..STEPS_PER_TICK {
                controller.step(&shared);
            }

            let frame = (
                controller.mode(),
                controller.render(&shared),
                controller.buzzer(),
            );
            if shown != Some(frame) {
                draw(elapsed_ticks, &shared, frame, step.lines);
                shown = Some(frame);
            }
            if realtime {
                thread::sleep(tick);
            }
        }
    }

    println!(
        "\n{}",
        format!("Simulated {:.2}s", seconds(elapsed_ticks)).green()
    );
    ExitCode::SUCCESS
}

fn seconds(ticks: u32) -> f64 {
    f64::from(ticks) * TICK_PERIOD.as_millis() as f64 / 1000.0
}

fn draw(
    elapsed_ticks: u32,
    shared: &ClockShared,
    (mode, buffer, buzzer): (Mode, SegmentBuffer, bool),
    lines: ButtonLines,
) {
    let time = shared.time();
    let buttons = match (lines.b1, lines.b2) {
        (false, false) => "",
        (true, false) => "[B1]",
        (false, true) => "[B2]",
        (true, true) => "[B1+B2]",
    };
    println!(
        "\n{} {} {} {} {}",
        format!("t={:7.2}s", seconds(elapsed_ticks)).bright_black(),
        format!("{:02}:{:02}:{:02}", time.hour, time.minute, time.second).bright_black(),
        format!("{mode:?}").cyan(),
        buttons.yellow(),
        if buzzer { "BUZZ".red().bold().to_string() } else { String::new() },
    );
    for row in render_rows(buffer) {
        println!("  {}", row.red());
    }
}

/// Three text rows for the four digits, colon drawn between the second and third.
fn render_rows(buffer: SegmentBuffer) -> [String; 3] {
    let mut rows = [String::new(), String::new(), String::new()];
    for (index, bits) in buffer.into_iter().enumerate() {
        let lit = |mask: u8, on: char| if bits & mask != 0 { on } else { ' ' };
        rows[0].extend([' ', lit(Leds::SEG_A, '_'), ' ']);
        rows[1].extend([lit(Leds::SEG_F, '|'), lit(Leds::SEG_G, '_'), lit(Leds::SEG_B, '|')]);
        rows[2].extend([lit(Leds::SEG_E, '|'), lit(Leds::SEG_D, '_'), lit(Leds::SEG_C, '|')]);
        let separator = if index == COLON_CELL { lit(Leds::DECIMAL, '.') } else { ' ' };
        rows[0].push(' ');
        rows[1].push(separator);
        rows[2].push(separator);
    }
    rows
}

fn parse_script(script: &str) -> Result<Vec<Step>, String> {
    script
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (name, count) = part
                .split_once(':')
                .ok_or_else(|| format!("Step '{part}' is not '<button>:<ticks>'"))?;
            let ticks = count
                .parse::<u32>()
                .map_err(|_| format!("Step '{part}' has a bad tick count"))?;
            let lines = match name {
                "idle" => ButtonLines::RELEASED,
                "b1" => ButtonLines { b1: true, b2: false },
                "b2" => ButtonLines { b1: false, b2: true },
                "both" => ButtonLines { b1: true, b2: true },
                _ => return Err(format!("Step '{part}' names unknown button '{name}'")),
            };
            Ok(Step { lines, ticks })
        })
        .collect()
}

fn parse_time(text: &str) -> Result<(u8, u8, u8), String> {
    let bad = || format!("'{text}' is not HH:MM or HH:MM:SS");
    let fields = text
        .split(':')
        .map(|field| field.parse::<u8>().map_err(|_| bad()))
        .collect::<Result<Vec<_>, _>>()?;
    let (hour, minute, second) = match fields.as_slice() {
        [hour, minute] => (*hour, *minute, 0),
        [hour, minute, second] => (*hour, *minute, *second),
        _ => return Err(bad()),
    };
    if hour > 23 || minute > 59 || second > 59 {
        return Err(bad());
    }
    Ok((hour, minute, second))
}
