use clap::{Args, Parser, Subcommand};
use log::debug;
use std::io::Write;
use std::net::IpAddr;

use crate::api::{ServerConfig, run_http_server};
use crate::core::{Calculator, CurrencyFormatter, FormFields, LocaleCurrency, ProjectionReport};
use crate::error::{ProjectionError, check_horizon};

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Compound-interest retirement projection (monthly deposits until age 65)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project a balance and print the summary and yearly timeline
    Project(ProjectArgs),
    /// Serve the calculator page and JSON API
    Serve(ServeArgs),
}

/// Field values are taken as text and normalized like the web form.
#[derive(Args, Debug, Default)]
pub struct ProjectArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub initial_capital: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub current_age: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Nominal annual interest in percent, e.g. 5"
    )]
    pub annual_interest: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub monthly_contribution: Option<String>,
    #[arg(long, help = "Print the full report as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "NESTEGG_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl From<&ProjectArgs> for FormFields {
    fn from(args: &ProjectArgs) -> Self {
        FormFields {
            initial_capital: args.initial_capital.clone(),
            current_age: args.current_age.clone(),
            annual_interest: args.annual_interest.clone(),
            monthly_contribution: args.monthly_contribution.clone(),
        }
    }
}

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
        }
    }
}

pub async fn run(cli: Cli) -> Result<(), ProjectionError> {
    match cli.command {
        Command::Project(args) => {
            let report = project_report(&args)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if args.json {
                writeln!(out, "{}", report_json(&report)?)?;
            } else {
                write_report(&mut out, &report)?;
            }
            Ok(())
        }
        Command::Serve(args) => run_http_server(ServerConfig::from(&args)).await,
    }
}

fn project_report(args: &ProjectArgs) -> Result<ProjectionReport, ProjectionError> {
    let input = FormFields::from(args).normalize();
    check_horizon(&input)?;
    debug!("projecting {input:?}");
    Ok(Calculator::new(LocaleCurrency::es_euro()).run(&input))
}

fn report_json(report: &ProjectionReport) -> Result<String, ProjectionError> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn write_report(out: &mut impl Write, report: &ProjectionReport) -> std::io::Result<()> {
    let fmt = LocaleCurrency::es_euro();

    writeln!(out, "Projection to age {}", report.target_age)?;
    writeln!(out, "  Total invested:  {:>16}", report.summary.total_invested)?;
    writeln!(out, "  Total interest:  {:>16}", report.summary.total_interest)?;
    writeln!(out, "  Final capital:   {:>16}", report.summary.final_capital)?;
    writeln!(out)?;
    writeln!(out, "{:>5} {:>18}", "Age", "Balance")?;
    writeln!(out, "{}", "-".repeat(24))?;
    for (age, balance) in report.timeline.labels.iter().zip(&report.timeline.data) {
        writeln!(out, "{age:>5} {:>18}", fmt.format(*balance))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn project_args_are_taken_as_text() {
        let cli = parse(&[
            "nestegg",
            "project",
            "--initial-capital",
            "1000",
            "--current-age",
            "64",
            "--annual-interest",
            "5",
            "--monthly-contribution",
            "100",
        ]);
        let Command::Project(args) = cli.command else {
            panic!("expected project command");
        };
        assert_eq!(args.initial_capital.as_deref(), Some("1000"));
        assert!(!args.json);

        let report = project_report(&args).expect("valid projection");
        assert_eq!(report.summary.final_capital, "2282 €");
    }

    #[test]
    fn project_accepts_negative_and_garbage_values() {
        let cli = parse(&[
            "nestegg",
            "project",
            "--current-age",
            "-5",
            "--monthly-contribution",
            "abc",
        ]);
        let Command::Project(args) = cli.command else {
            panic!("expected project command");
        };
        let report = project_report(&args).expect("valid projection");
        assert_eq!(report.timeline.labels.len(), 71);
        assert_eq!(report.summary.total_invested, "0 €");
    }

    #[test]
    fn project_rejects_excessive_horizon() {
        let args = ProjectArgs {
            current_age: Some("-500".to_string()),
            ..ProjectArgs::default()
        };
        let err = project_report(&args).expect_err("must reject");
        assert!(matches!(err, ProjectionError::HorizonTooLong { .. }));
    }

    #[test]
    fn serve_defaults_to_all_interfaces() {
        let cli = parse(&["nestegg", "serve", "--port", "9000"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        let config = ServerConfig::from(&args);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn json_flag_renders_camel_case_report() {
        let cli = parse(&[
            "nestegg",
            "project",
            "--initial-capital",
            "1000",
            "--current-age",
            "63",
            "--monthly-contribution",
            "100",
            "--json",
        ]);
        let Command::Project(args) = cli.command else {
            panic!("expected project command");
        };
        assert!(args.json);

        let report = project_report(&args).expect("valid projection");
        let json = report_json(&report).expect("report serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("output is JSON");
        assert_eq!(value["summary"]["finalCapital"], "3400 €");
        assert_eq!(value["timeline"]["labels"], serde_json::json!([63, 64, 65]));
    }

    #[test]
    fn text_report_lists_every_year() {
        let args = ProjectArgs {
            initial_capital: Some("1000".to_string()),
            current_age: Some("63".to_string()),
            monthly_contribution: Some("100".to_string()),
            ..ProjectArgs::default()
        };
        let report = project_report(&args).expect("valid projection");
        let mut buf = Vec::new();
        write_report(&mut buf, &report).expect("write to memory");
        let text = String::from_utf8(buf).expect("utf-8 output");

        assert!(text.contains("Projection to age 65"));
        assert!(text.contains("3400 €"));
        assert_eq!(text.lines().filter(|l| l.trim_start().starts_with("6")).count(), 3);
    }
}
