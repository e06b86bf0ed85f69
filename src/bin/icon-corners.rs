use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use icon_corner_mask::inspect::{corner_pixels, probe, probe_points, transparency_summary};
use icon_corner_mask::{
    corner_regions, default_output_path, normalize, CornerMaskEngine, ProcessOptions,
    ProcessResult, DEFAULT_INPUT,
};

#[derive(Parser)]
#[command(
    name = "icon-corners",
    about = "Make the white background in the four corners of an icon transparent",
    version,
    after_help = "Simple usage: icon-corners  (reads ic_launcher.png, writes ic_launcher_transparent.png)\n\n\
                  If the result is off, raise --tolerance to catch off-white backgrounds or\n\
                  change --corner-ratio to resize the corner circles."
)]
struct Cli {
    /// Input image file or directory
    #[arg(default_value = DEFAULT_INPUT)]
    input: String,

    /// Output file or directory (default: {name}_transparent.png)
    #[arg(short, long)]
    output: Option<String>,

    /// Corner diameter as a fraction of the image width, in (0, 0.5]
    #[arg(short = 'r', long, default_value = "0.25")]
    corner_ratio: f64,

    /// Per-channel shortfall from 255 still treated as white background (0-255)
    #[arg(short, long, default_value = "50")]
    tolerance: u8,

    /// Only report the corner state of an existing image, write nothing
    #[arg(long)]
    inspect: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let opts = ProcessOptions {
        corner_ratio: cli.corner_ratio,
        color_tolerance: cli.tolerance,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let engine = match CornerMaskEngine::new(opts) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let opts = engine.options();

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", cli.input);
        process::exit(1);
    }

    if cli.inspect {
        if let Err(e) = inspect(input_path, opts.corner_ratio) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
        return;
    }

    if !opts.quiet {
        eprintln!(
            "Masking corners (ratio {}, tolerance {})",
            opts.corner_ratio, opts.color_tolerance
        );
        eprintln!();
    }

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &cli.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: icon-corners <input_dir> -o <output_dir>");
            process::exit(1);
        };
        engine.process_directory(input_path, &output_dir)
    } else {
        let output_path = match &cli.output {
            Some(o) => PathBuf::from(o),
            None => default_output_path(input_path),
        };
        vec![engine.process_file(input_path, &output_path)]
    };

    let mut success_count = 0u32;
    let mut skip_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, opts);
        if r.skipped {
            skip_count += 1;
        } else if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if skip_count > 0 {
            eprint!(", Skipped: {skip_count}");
        }
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, opts: &ProcessOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.skipped {
        if !opts.quiet {
            eprintln!("[SKIP] {filename}: {}", result.message);
        }
    } else if result.success {
        if !opts.quiet {
            match &result.stats {
                Some(stats) => eprintln!(
                    "[OK] {filename}: {} pixels transparent ({:.2}%)",
                    stats.transparent(),
                    stats.image_percentage()
                ),
                None => eprintln!("[OK] {filename}"),
            }
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if opts.verbose {
        if let Some(stats) = &result.stats {
            for line in stats.to_string().lines() {
                eprintln!("  {line}");
            }
        }
    }
}

fn inspect(path: &Path, corner_ratio: f64) -> icon_corner_mask::Result<()> {
    let img = normalize(image::open(path)?);
    let (width, height) = img.dimensions();
    eprintln!("{}: {width}x{height}", path.display());

    if let Some(corners) = corner_pixels(&img) {
        eprintln!("\nImage corners:");
        for (corner, px) in corners {
            let [r, g, b, a] = px.0;
            eprintln!("  {corner}: RGB({r},{g},{b}) alpha={a}");
        }
    }

    let regions = corner_regions(width, height, corner_ratio)?;
    eprintln!("\nProbe points (radius {}):", regions[0].radius);
    for result in probe(&img, &probe_points(width, height, &regions)) {
        eprintln!("  {result}");
    }

    let summary = transparency_summary(&img);
    eprintln!(
        "\nTransparent pixels: {}/{} ({:.2}%)",
        summary.transparent,
        summary.total,
        summary.percentage()
    );
    Ok(())
}
