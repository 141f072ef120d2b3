//! Build automation tasks for the alarm clock.
//!
//! Run with: `cargo xtask <command>`

mod simulate;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The only supported board: Raspberry Pi Pico (RP2040).
const FIRMWARE_TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_FEATURES: &str = "pico1";
const FIRMWARE_BIN: &str = "alarm-clock";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the alarm clock", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, firmware build, docs
    CheckAll,
    /// Build the firmware
    Build {
        #[arg(long)]
        release: bool,
        /// Log every frame the display driver receives
        #[arg(long)]
        display_trace: bool,
    },
    /// Build UF2 firmware file for flashing to Pico
    Uf2,
    /// Run the clock core on the host and draw the display in the terminal
    Simulate {
        /// Comma-separated steps, each `idle:<ticks>`, `b1:<ticks>`, `b2:<ticks>` or
        /// `both:<ticks>` (one tick is 50 ms)
        #[arg(long, default_value = simulate::DEFAULT_SCRIPT)]
        script: String,
        /// Start time as `HH:MM:SS`
        #[arg(long, default_value = "07:29:55")]
        start: String,
        /// Alarm time as `HH:MM`
        #[arg(long, default_value = "07:30")]
        alarm: String,
        /// Sleep one tick period between ticks
        #[arg(long)]
        realtime: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build {
            release,
            display_trace,
        } => build_firmware(release, display_trace),
        Commands::Uf2 => build_uf2(),
        Commands::Simulate {
            script,
            start,
            alarm,
            realtime,
        } => simulate::run(&script, &start, &alarm, realtime),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut test_cmd = Command::new("cargo");
    test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--package", "alarm-clock"]);
    if let Some(target) = host_target {
        test_cmd.arg("--target").arg(target);
    }
    if !run_command(&mut test_cmd) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building firmware...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--bin",
        FIRMWARE_BIN,
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Running clippy on firmware...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "clippy",
        "--bin",
        FIRMWARE_BIN,
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--lib",
        "--target",
        FIRMWARE_TARGET,
        "--no-deps",
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn build_firmware(release: bool, display_trace: bool) -> ExitCode {
    let workspace_root = workspace_root();
    let features = firmware_features(display_trace);
    println!(
        "{}",
        format!("Building firmware with features: {features}").cyan()
    );

    let mut cmd = Command::new("cargo");
    cmd.current_dir(&workspace_root).args([
        "build",
        "--bin",
        FIRMWARE_BIN,
        "--target",
        FIRMWARE_TARGET,
        "--features",
        &features,
    ]);
    if release {
        cmd.arg("--release");
    }

    if run_command(&mut cmd) {
        println!("{}", "Build successful!".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_uf2() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "Building UF2 for the alarm clock (pico1/arm)".cyan());
    println!("  Features: {}", FIRMWARE_FEATURES.bright_black());
    println!("  Target: {}", FIRMWARE_TARGET.bright_black());

    // Build in release mode for UF2
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--bin",
        FIRMWARE_BIN,
        "--release",
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        return ExitCode::FAILURE;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{FIRMWARE_TARGET}/release/{FIRMWARE_BIN}");
    let uf2_path = format!("{FIRMWARE_BIN}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path}").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn firmware_features(display_trace: bool) -> String {
    let mut features = vec![FIRMWARE_FEATURES.to_string()];
    if display_trace {
        features.push("display-trace".to_string());
    }
    features.join(",")
}

fn workspace_root() -> std::path::PathBuf {
    // `cargo xtask` runs from the workspace root.
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if let Some(host) = line.strip_prefix("host: ") {
            return Some(host.trim().to_string());
        }
    }
    None
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
