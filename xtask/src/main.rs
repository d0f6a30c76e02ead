use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

/// VRAM dimensions of a `--dump-vram` file
const VRAM_WIDTH: usize = 1024;
const VRAM_HEIGHT: usize = 512;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for psxcore")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        /// Run only CPU module tests
        #[arg(long)]
        cpu: bool,
        /// Run only GPU module tests
        #[arg(long)]
        gpu: bool,
        /// Run only Memory module tests
        #[arg(long)]
        memory: bool,
        /// Run only System module tests
        #[arg(long)]
        system: bool,
    },
    /// Run benchmarks
    Bench,
    /// Run a raw program image and convert the resulting VRAM to PPM
    Render {
        /// Program image loaded at 0x80010000
        program: PathBuf,
        /// Number of CPU ticks
        #[arg(short = 'n', long, default_value = "100000")]
        ticks: u64,
        /// Output image
        #[arg(short, long, default_value = "vram.ppm")]
        output: PathBuf,
    },
    /// Convert a raw VRAM dump to a PPM image
    VramPpm {
        /// Dump written by `psxcore --dump-vram`
        input: PathBuf,
        /// Output image
        #[arg(short, long, default_value = "vram.ppm")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Test {
            doc,
            cpu,
            gpu,
            memory,
            system,
        } => run_test(doc, cpu, gpu, memory, system),
        Commands::Bench => run_bench(),
        Commands::Render {
            program,
            ticks,
            output,
        } => run_render(&program, ticks, &output),
        Commands::VramPpm { input, output } => vram_to_ppm(&input, &output),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Test", || run_test(false, false, false, false, false), verbose)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy").arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_test(doc: bool, cpu: bool, gpu: bool, memory: bool, system: bool) -> Result<()> {
    if doc {
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--doc");
        return execute_command(&mut cmd);
    }

    let modules = [
        (cpu, "core::cpu", "CPU"),
        (gpu, "core::gpu", "GPU"),
        (memory, "core::memory", "Memory"),
        (system, "core::system", "System"),
    ];

    if modules.iter().all(|(enabled, _, _)| !enabled) {
        let mut cmd = Command::new("cargo");
        cmd.arg("test");
        return execute_command(&mut cmd);
    }

    let mut failed = Vec::new();
    for (enabled, module_path, module_name) in modules {
        if !enabled {
            continue;
        }

        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--lib").arg(module_path);

        match execute_command(&mut cmd) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), module_name),
            Err(_) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                failed.push(module_name);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Module tests failed: {}", failed.join(", "))
    }
}

fn run_bench() -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("bench");

    execute_command(&mut cmd)
}

fn run_render(program: &Path, ticks: u64, output: &Path) -> Result<()> {
    println!("{}", "=== Render ===".bold().blue());

    if !program.exists() {
        anyhow::bail!("Program not found: {}", program.display());
    }

    let dump = std::env::temp_dir().join("psxcore-vram.bin");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("run")
        .arg("--release")
        .arg("--bin")
        .arg("psxcore")
        .arg("--")
        .arg("--program")
        .arg(program)
        .arg("--ticks")
        .arg(ticks.to_string())
        .arg("--dump-vram")
        .arg(&dump);
    execute_command(&mut cmd)?;

    vram_to_ppm(&dump, output)?;

    println!(
        "{} Rendered in {}",
        "✓".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

/// Expand 15-bit VRAM pixels to a binary PPM (P6)
fn vram_to_ppm(input: &Path, output: &Path) -> Result<()> {
    let raw = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    if raw.len() != VRAM_WIDTH * VRAM_HEIGHT * 2 {
        anyhow::bail!(
            "{} is {} bytes, expected {} (1024×512 16-bit pixels)",
            input.display(),
            raw.len(),
            VRAM_WIDTH * VRAM_HEIGHT * 2
        );
    }

    let mut image = format!("P6\n{} {}\n255\n", VRAM_WIDTH, VRAM_HEIGHT).into_bytes();
    for pixel in raw.chunks_exact(2) {
        let pixel = u16::from_le_bytes([pixel[0], pixel[1]]);
        let expand = |channel: u16| ((channel & 0x1F) << 3) as u8;
        image.extend([expand(pixel >> 10), expand(pixel >> 5), expand(pixel)]);
    }

    fs::write(output, image).with_context(|| format!("writing {}", output.display()))?;
    println!("{} Wrote {}", "✓".green(), output.display().to_string().cyan());
    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
