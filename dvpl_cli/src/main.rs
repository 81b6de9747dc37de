use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use dvpl_codecs::{
    decode, encode, inspect, looks_like_container, packed_path, unpacked_path, ContainerInfo,
};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "dvpl",
    about = "Pack, unpack, and inspect DVPL asset containers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a file into a DVPL container
    Pack {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Destination container (default: <input>.dvpl, "-" writes stdout)
        output: Option<PathBuf>,
        /// Overwrite the destination if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Unpack a DVPL container back to its original bytes
    Unpack {
        /// Source container ("-" reads stdin)
        input: PathBuf,
        /// Destination file (default: input without .dvpl, "-" writes stdout)
        output: Option<PathBuf>,
        /// Overwrite the destination if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Print the container trailer without decompressing
    Inspect {
        /// DVPL container to inspect
        file: PathBuf,
        /// Emit a JSON object instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write an asset's payload to stdout, unpacking it if it is a container
    Cat {
        /// Packed or plain asset file
        file: PathBuf,
    },
    /// Fully decode each container and report whether it is intact
    Verify {
        /// Containers to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read(path).with_context(|| format!("reading input file {:?}", path))
    }
}

fn write_output(path: &Path, data: &[u8], force: bool) -> anyhow::Result<()> {
    if is_stdio(path) {
        let mut out = io::stdout().lock();
        out.write_all(data)?;
        out.flush()?;
        return Ok(());
    }
    if !force && path.exists() {
        anyhow::bail!("{:?} already exists (use --force to overwrite)", path);
    }
    std::fs::write(path, data).with_context(|| format!("writing output file {:?}", path))
}

fn print_info(info: &ContainerInfo) {
    eprintln!("  coding mode : {}", info.coding_mode.name());
    eprintln!("  original    : {}", human_bytes(info.original_size as u64));
    eprintln!("  stored      : {}", human_bytes(info.stored_size as u64));
    eprintln!("  ratio       : {:.3}", info.ratio());
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_pack(input: PathBuf, output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let output = match output {
        Some(path) => path,
        None if is_stdio(&input) => anyhow::bail!("an output path is required when packing stdin"),
        None => packed_path(&input),
    };

    let raw = read_input(&input)?;
    if looks_like_container(&raw) {
        eprintln!("warning: {:?} already looks like a DVPL container, packing it again", input);
    }

    let t0 = Instant::now();
    let packed = encode(Some(raw.as_slice())).with_context(|| format!("packing {:?}", input))?;
    let elapsed = t0.elapsed();

    write_output(&output, &packed, force)?;

    print_info(&inspect(&packed)?);
    eprintln!("  container   : {}", human_bytes(packed.len() as u64));
    eprintln!("  elapsed     : {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    if !is_stdio(&output) {
        eprintln!("  written to {:?}", output);
    }
    Ok(())
}

fn run_unpack(input: PathBuf, output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let output = match output {
        Some(path) => path,
        None => unpacked_path(&input).with_context(|| {
            format!("{:?} has no .dvpl extension; give an output path explicitly", input)
        })?,
    };

    let packed = read_input(&input)?;

    let t0 = Instant::now();
    let raw = decode(&packed).with_context(|| format!("unpacking {:?}", input))?;
    let elapsed = t0.elapsed();

    write_output(&output, &raw, force)?;

    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((raw.len() as f64 / elapsed.as_secs_f64().max(1e-9)) as u64)
    );
    eprintln!("  elapsed     : {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    if !is_stdio(&output) {
        eprintln!("  written to {:?}", output);
    }
    Ok(())
}

fn run_inspect(file: PathBuf, json: bool) -> anyhow::Result<()> {
    let data = read_input(&file)?;
    let info = inspect(&data).with_context(|| format!("inspecting {:?}", file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("=== DVPL container: {:?} ===", file);
    println!();
    println!("  coding mode    : {} ({})", info.coding_mode.name(), info.coding_mode as u32);
    println!("  original size  : {} ({} bytes)", human_bytes(info.original_size as u64), info.original_size);
    println!("  stored size    : {} ({} bytes)", human_bytes(info.stored_size as u64), info.stored_size);
    println!("  container size : {}", human_bytes(info.container_size()));
    println!("  crc32          : {:08x}", info.checksum);
    println!("  ratio          : {:.3}", info.ratio());
    Ok(())
}

fn run_cat(file: PathBuf) -> anyhow::Result<()> {
    let asset = dvpl_codecs::open_asset(&file)?;
    let mut out = io::stdout().lock();
    out.write_all(&asset.content)?;
    out.flush()?;
    Ok(())
}

fn run_verify(files: Vec<PathBuf>) -> anyhow::Result<()> {
    let mut failed = 0usize;
    for file in &files {
        let outcome = std::fs::read(file)
            .with_context(|| format!("reading {:?}", file))
            .and_then(|data| Ok(decode(&data)?));
        match outcome {
            Ok(raw) => println!("ok      {:?} ({})", file, human_bytes(raw.len() as u64)),
            Err(e) => {
                failed += 1;
                println!("FAILED  {:?}: {:#}", file, e);
            }
        }
    }

    eprintln!("  checked     : {}", files.len());
    eprintln!("  failed      : {}", failed);
    if failed > 0 {
        anyhow::bail!("{} of {} containers failed verification", failed, files.len());
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Pack {
            input,
            output,
            force,
        } => run_pack(input, output, force),
        Commands::Unpack {
            input,
            output,
            force,
        } => run_unpack(input, output, force),
        Commands::Inspect { file, json } => run_inspect(file, json),
        Commands::Cat { file } => run_cat(file),
        Commands::Verify { files } => run_verify(files),
    }
}
