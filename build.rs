use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x based on target
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    if target.starts_with("thumbv6m") {
        // Pico 1: copy memory.x to OUT_DIR so cortex-m-rt's link.x can find it
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");
    load_home_env(".env");

    // 3) Validate power-on settings, falling back to defaults
    let start = env_or_default("ALARM_CLOCK_START", "12:00:00");
    let (start_hour, start_minute, start_second) = parse_clock("ALARM_CLOCK_START", &start, true);

    let alarm = env_or_default("ALARM_CLOCK_ALARM", "12:01");
    let (alarm_hour, alarm_minute, _) = parse_clock("ALARM_CLOCK_ALARM", &alarm, false);

    let alarm_enabled = parse_flag(
        "ALARM_CLOCK_ALARM_ENABLED",
        &env_or_default("ALARM_CLOCK_ALARM_ENABLED", "1"),
    );
    let buzzer_active_low = parse_flag(
        "ALARM_CLOCK_BUZZER_ACTIVE_LOW",
        &env_or_default("ALARM_CLOCK_BUZZER_ACTIVE_LOW", "1"),
    );

    let hour_format = env_or_default("ALARM_CLOCK_HOUR_FORMAT", "24");
    assert!(
        hour_format == "24" || hour_format == "12",
        "ALARM_CLOCK_HOUR_FORMAT must be 12 or 24, got {hour_format:?}"
    );

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=ALARM_CLOCK_START_HOUR={start_hour}");
    println!("cargo:rustc-env=ALARM_CLOCK_START_MINUTE={start_minute}");
    println!("cargo:rustc-env=ALARM_CLOCK_START_SECOND={start_second}");
    println!("cargo:rustc-env=ALARM_CLOCK_ALARM_HOUR={alarm_hour}");
    println!("cargo:rustc-env=ALARM_CLOCK_ALARM_MINUTE={alarm_minute}");
    println!("cargo:rustc-env=ALARM_CLOCK_ALARM_ENABLED={}", u8::from(alarm_enabled));
    println!("cargo:rustc-env=ALARM_CLOCK_BUZZER_ACTIVE_LOW={}", u8::from(buzzer_active_low));
    println!("cargo:rustc-env=ALARM_CLOCK_TWELVE_HOUR={}", u8::from(hour_format == "12"));

    // Optional: don't rebuild unless these change
    println!("cargo:rerun-if-env-changed=ALARM_CLOCK_START");
    println!("cargo:rerun-if-env-changed=ALARM_CLOCK_ALARM");
    println!("cargo:rerun-if-env-changed=ALARM_CLOCK_ALARM_ENABLED");
    println!("cargo:rerun-if-env-changed=ALARM_CLOCK_BUZZER_ACTIVE_LOW");
    println!("cargo:rerun-if-env-changed=ALARM_CLOCK_HOUR_FORMAT");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses `HH:MM` or `HH:MM:SS` into a valid wall-clock triple.
fn parse_clock(key: &str, value: &str, allow_seconds: bool) -> (u8, u8, u8) {
    let parts: Vec<&str> = value.trim().split(':').collect();
    let field = |index: usize, limit: u8| -> u8 {
        let text = parts.get(index).copied().unwrap_or("0");
        let number: u8 = text
            .parse()
            .unwrap_or_else(|_| panic!("{key}: {text:?} is not a number (got {value:?})"));
        assert!(number < limit, "{key}: {number} is out of range (got {value:?})");
        number
    };
    match parts.len() {
        2 => (field(0, 24), field(1, 60), 0),
        3 if allow_seconds => (field(0, 24), field(1, 60), field(2, 60)),
        _ => panic!("{key} must look like HH:MM{}, got {value:?}", if allow_seconds { "[:SS]" } else { "" }),
    }
}

fn parse_flag(key: &str, value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => panic!("{key} must be 1/0/true/false, got {other:?}"),
    }
}
