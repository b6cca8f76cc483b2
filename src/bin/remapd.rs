// Remapd CLI
// Compiles configs and resolves device profiles from the command line

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;

use remapd_core::profile;
use remapd_core::Config;

/// Config front end for the remapd daemon
#[derive(Parser, Debug)]
#[command(name = "remapd")]
#[command(about = "Compile remapd configs and resolve device profiles", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file to compile
    config: Option<PathBuf>,

    /// Print a summary of the compiled configuration
    #[arg(long)]
    check: bool,

    /// Resolve the profile for a device id given as vendor:product (hex)
    #[arg(short, long, value_name = "VENDOR:PRODUCT")]
    device: Option<String>,

    /// Directory scanned for device profiles
    #[arg(long, default_value = "/etc/remapd", value_name = "DIR")]
    profile_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_device_id(s: &str) -> Result<(u16, u16)> {
    let Some((vendor, product)) = s.split_once(':') else {
        bail!("device id '{s}' is not of the form vendor:product");
    };

    let vendor = u16::from_str_radix(vendor, 16)
        .with_context(|| format!("invalid vendor id '{vendor}'"))?;
    let product = u16::from_str_radix(product, 16)
        .with_context(|| format!("invalid product id '{product}'"))?;

    Ok((vendor, product))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    if let Some(device) = &args.device {
        let (vendor, product) = parse_device_id(device)?;

        match profile::resolve(&args.profile_dir, vendor, product) {
            Some((path, exact)) => {
                println!(
                    "{} ({})",
                    path.display(),
                    if exact { "exact" } else { "wildcard" }
                );
            }
            None => bail!("no profile in {} matches {device}", args.profile_dir.display()),
        }

        return Ok(());
    }

    let Some(path) = args.config else {
        bail!("no configuration file given");
    };

    let config = Config::from_path(&path)
        .with_context(|| format!("failed to compile {}", path.display()))?;

    if args.check {
        println!("{}: {} layers", path.display(), config.layer_count());
        for layer in config.layers() {
            println!("  [{}]", layer.name());
        }
        let globals = config.globals();
        println!(
            "  macro_timeout={}ms macro_sequence_timeout={}ms macro_repeat_timeout={}ms",
            globals.macro_timeout, globals.macro_sequence_timeout, globals.macro_repeat_timeout
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_id() {
        assert_eq!(parse_device_id("1234:5678").unwrap(), (0x1234, 0x5678));
        assert_eq!(parse_device_id("04d9:a0f8").unwrap(), (0x04d9, 0xa0f8));
        assert!(parse_device_id("12345678").is_err());
        assert!(parse_device_id("xyz:1").is_err());
    }
}
