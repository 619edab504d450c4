use anyhow::Context;
use clap::Parser;
use log::{debug, LevelFilter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tcpdump_endpoints::{extract_endpoints, Config, LineMatcher};

#[derive(Parser)]
#[command(name = "tcpdump-endpoints")]
#[command(about = "Extract all unique hosts from the output of tcpdump")]
struct Cli {
    #[arg(
        short = 'p',
        long = "ports",
        help = "Treat each host+port pair as a separate endpoint"
    )]
    distinguish_ports: bool,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Token that introduces a traffic record (default: IP)")]
    marker: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,

    #[arg(help = "tcpdump output to read (default: stdin)")]
    input: Option<PathBuf>,
}

/// Apply command-line overrides on top of the file configuration.
/// `-p` can only turn port distinction on; `--marker` replaces the marker.
fn resolve_config(cli: &Cli, mut config: Config) -> Config {
    if cli.distinguish_ports {
        config.report.distinguish_ports = true;
    }
    if let Some(marker) = &cli.marker {
        config.report.marker = marker.clone();
    }
    config
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    let config = resolve_config(&cli, config);
    debug!("Effective configuration: {:?}", config.report);

    let matcher = LineMatcher::with_marker(&config.report.marker)
        .with_context(|| format!("Invalid record marker {:?}", config.report.marker))?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Cannot open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let extraction = extract_endpoints(input, &matcher, config.report.distinguish_ports)
        .context("Failed to read capture output")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    extraction
        .registry
        .render(&mut out)
        .context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcpdump_endpoints::config::ReportConfig;

    fn file_config(distinguish_ports: bool) -> Config {
        Config {
            report: ReportConfig {
                distinguish_ports,
                marker: "IP".to_string(),
            },
        }
    }

    #[test]
    fn test_ports_flag_overrides_config() {
        let cli = Cli::try_parse_from(["tcpdump-endpoints", "-p"]).unwrap();
        let config = resolve_config(&cli, file_config(false));
        assert!(config.report.distinguish_ports);
    }

    #[test]
    fn test_config_applies_without_flag() {
        let cli = Cli::try_parse_from(["tcpdump-endpoints"]).unwrap();
        assert!(resolve_config(&cli, file_config(true)).report.distinguish_ports);
        assert!(!resolve_config(&cli, file_config(false)).report.distinguish_ports);
    }

    #[test]
    fn test_marker_flag_overrides_config() {
        let cli = Cli::try_parse_from(["tcpdump-endpoints", "-m", "IP6"]).unwrap();
        let config = resolve_config(&cli, file_config(false));
        assert_eq!(config.report.marker, "IP6");
        assert!(!config.report.distinguish_ports);

        let cli = Cli::try_parse_from(["tcpdump-endpoints"]).unwrap();
        assert_eq!(resolve_config(&cli, file_config(false)).report.marker, "IP");
    }

    #[test]
    fn test_cli_accepts_long_flags_and_input() {
        let cli = Cli::try_parse_from([
            "tcpdump-endpoints",
            "--ports",
            "--marker",
            "IP6",
            "--config",
            "report.toml",
            "trace.txt",
        ])
        .unwrap();

        assert!(cli.distinguish_ports);
        assert_eq!(cli.marker.as_deref(), Some("IP6"));
        assert_eq!(cli.config, Some(PathBuf::from("report.toml")));
        assert_eq!(cli.input, Some(PathBuf::from("trace.txt")));
    }
}
