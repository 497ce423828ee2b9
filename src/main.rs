//! CLI for exifgraft: inspect JPEG Exif metadata, or graft the metadata of
//! one JPEG onto another.

#![cfg(feature = "cli")]

use clap::Parser;
use exifgraft::{decode_exif, is_jpeg, scan, splice_markers, ExifData, MarkerTable};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Parser)]
#[command(name = "exifgraft")]
#[command(about = "Inspect JPEG Exif metadata or graft it from one image onto another", long_about = None)]
struct Args {
    /// JPEG file or directory to inspect (use -d/--directory to scan a whole directory)
    path: Option<String>,

    /// Scan a whole directory (optionally with -r to recurse into subdirectories)
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directory: Option<String>,

    /// When scanning a directory, recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// File extensions to scan (comma-separated). Files with other extensions are skipped; files without an extension are sniffed by content.
    #[arg(short, long, default_value = "jpg,jpeg")]
    extensions: String,

    /// Graft metadata from this JPEG onto PATH and write the result to --output
    #[arg(long, value_name = "SOURCE")]
    graft_from: Option<String>,

    /// Where to write the grafted JPEG (required with --graft-from)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Output JSON per result (one line per file unless --pretty)
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON (use with --json)
    #[arg(long)]
    pretty: bool,

    /// Quiet: only print files that carry Exif data
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let exts: std::collections::HashSet<String> = args
        .extensions
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .collect();

    let path_str = args
        .directory
        .as_ref()
        .or(args.path.as_ref())
        .ok_or("Missing path: give a file/directory as argument or use -d/--directory <DIR>")?;
    let path = Path::new(path_str.as_str());

    if !path.exists() {
        eprintln!("Not found: {}", path.display());
        std::process::exit(1);
    }

    if let Some(ref source) = args.graft_from {
        if !path.is_file() {
            eprintln!("--graft-from expects PATH to be a file: {}", path.display());
            std::process::exit(1);
        }
        graft(Path::new(source), path, &args)?;
        return Ok(());
    }

    if path.is_file() {
        if args.directory.is_some() {
            eprintln!("--directory expects a directory, not a file: {}", path.display());
            std::process::exit(1);
        }
        inspect_file(path, &args, &exts)?;
        return Ok(());
    }

    if path.is_dir() {
        if !args.quiet {
            eprintln!(
                "Scanning directory: {} {}",
                path.display(),
                if args.recursive { "(recursive)" } else { "" }
            );
        }
        inspect_dir(path, &args, &exts)?;
        return Ok(());
    }

    eprintln!("Not a file or directory: {}", path.display());
    std::process::exit(1);
}

/// Transplant metadata from `source` onto `dest` and write the spliced image.
fn graft(source: &Path, dest: &Path, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = args
        .output
        .as_ref()
        .ok_or("--graft-from requires --output <FILE>")?;
    let source_bytes = fs::read(source)?;
    let dest_bytes = fs::read(dest)?;

    let source_table = scan(&source_bytes);
    if !source_table.valid {
        eprintln!("Not a scannable JPEG: {}", source.display());
        std::process::exit(1);
    }
    if source_table.app_markers.is_empty() {
        eprintln!("No metadata segments to graft in {}", source.display());
        std::process::exit(1);
    }

    let out = splice_markers(&source_bytes, &dest_bytes, Some(&source_table));
    fs::write(out_path, &out)?;

    if !args.quiet {
        println!(
            "Grafted {} metadata segment(s) from {} onto {} -> {} ({} bytes)",
            source_table.app_markers.len(),
            source.display(),
            dest.display(),
            out_path,
            out.len()
        );
        let exif = decode_exif(&out, None);
        if exif.present {
            print_exif_fields(&exif);
        }
    }
    Ok(())
}

fn skip_by_extension(path: &Path, exts: &std::collections::HashSet<String>) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    // No extension => sniff content later; unknown extension => skip.
    !ext.is_empty() && !exts.is_empty() && !exts.contains(&ext)
}

fn inspect_file(
    path: &Path,
    args: &Args,
    exts: &std::collections::HashSet<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if skip_by_extension(path, exts) {
        if !args.quiet {
            eprintln!("Skip (extension): {}", path.display());
        }
        return Ok(());
    }
    let bytes = fs::read(path)?;
    let table = scan(&bytes);
    let exif = decode_exif(&bytes, Some(&table));
    print_result(path.display().to_string(), &table, &exif, args, &bytes)?;
    Ok(())
}

fn inspect_dir(
    dir: &Path,
    args: &Args,
    exts: &std::collections::HashSet<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let walker = if args.recursive {
        WalkDir::new(dir).into_iter()
    } else {
        WalkDir::new(dir).max_depth(1).into_iter()
    };

    let mut total = 0u64;
    let mut with_exif = 0u64;
    let mut with_gps = 0u64;

    for entry in walker.filter_entry(|e| !e.path().starts_with(".")) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || skip_by_extension(path, exts) {
            continue;
        }
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(_) => continue,
        };
        if path.extension().is_none() && !is_jpeg(&bytes) {
            continue;
        }
        total += 1;
        let table = scan(&bytes);
        let exif = decode_exif(&bytes, Some(&table));
        if exif.present {
            with_exif += 1;
        }
        if exif.has_gps_location {
            with_gps += 1;
        }
        print_result(path.display().to_string(), &table, &exif, args, &bytes)?;
    }

    if !args.quiet {
        eprintln!(
            "Scanned {} files, {} with Exif, {} with GPS position",
            total, with_exif, with_gps
        );
    }
    Ok(())
}

fn print_result(
    path: String,
    table: &MarkerTable,
    exif: &ExifData,
    args: &Args,
    bytes: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    if args.quiet && !exif.present {
        return Ok(());
    }
    if args.json {
        let mut out = IndexMap::<String, serde_json::Value>::new();
        out.insert("sha256".to_string(), serde_json::Value::String(sha256_hex(bytes)));
        out.insert("path".to_string(), serde_json::Value::String(path));
        out.insert("size_bytes".to_string(), serde_json::to_value(bytes.len())?);
        out.insert("valid_jpeg".to_string(), serde_json::Value::Bool(table.valid));
        out.insert("app_markers".to_string(), serde_json::to_value(&table.app_markers)?);
        out.insert("other_markers".to_string(), serde_json::to_value(&table.other_markers)?);
        out.insert("scan_start".to_string(), serde_json::to_value(table.scan_start)?);
        out.insert("exif".to_string(), serde_json::to_value(exif)?);
        let json_str = if args.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        println!("{}", json_str);
        return Ok(());
    }

    let status = if !table.valid {
        "NOT-JPEG"
    } else if exif.present {
        "EXIF"
    } else {
        "NO-EXIF"
    };
    println!("{} {} ({} bytes)", status, path, bytes.len());
    println!("  sha256: {}", sha256_hex(bytes));
    if table.valid {
        println!(
            "  markers: {} application, {} other, scan data at {}",
            table.app_markers.len(),
            table.other_markers.len(),
            table.scan_start
        );
    }
    if exif.present {
        print_exif_fields(exif);
    }
    Ok(())
}

fn print_exif_fields(exif: &ExifData) {
    if let Some(ref make) = exif.make {
        println!("  make: {}", make);
    }
    if let Some(ref model) = exif.model {
        println!("  model: {}", model);
    }
    if let Some(ref artist) = exif.artist {
        println!("  artist: {}", artist);
    }
    if let Some(ref copyright) = exif.copyright {
        println!("  copyright: {}", copyright);
    }
    if exif.orientation != 0 {
        println!("  orientation: {}", exif.orientation);
    }
    if exif.has_gps_location {
        println!("  gps: {}, {}", exif.latitude, exif.longitude);
    }
}
