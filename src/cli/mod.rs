//! CLI command handlers for sankey-gen
//!
//! Each handler takes an already-loaded configuration so it can be tested
//! without touching the working directory.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::{SankeyError, SankeyResult};
use crate::reports::SankeyReport;
use crate::services::parse_ledger;

/// Arguments for the `generate` command
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Ledger CSV to read (overrides the configured input)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// File to write the diagram to (overrides the configured output)
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the diagram instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

/// Handle the `generate` command
pub fn handle_generate_command<W: Write>(
    config: &Config,
    args: &GenerateArgs,
    out: &mut W,
) -> SankeyResult<()> {
    let input = args.input.clone().unwrap_or_else(|| config.input_path());
    let transactions = parse_ledger(&input)?;
    let report = SankeyReport::generate(config, &transactions)?;

    if args.stdout {
        return report.write_to(out);
    }

    let output = args.output.clone().unwrap_or_else(|| config.output_path());
    report.export(&output)?;
    writeln!(
        out,
        "Wrote {} flow lines for {} to {}",
        report.lines.len(),
        report.window,
        output.display()
    )
    .map_err(|e| SankeyError::Io(e.to_string()))?;
    Ok(())
}

/// Handle the `config` command
pub fn handle_config_command<W: Write>(config: &Config, out: &mut W) -> SankeyResult<()> {
    let rules = &config.transactions;
    let mut summary = String::new();

    summary.push_str("sankey-gen Configuration\n");
    summary.push_str("========================\n");
    summary.push_str(&format!("Window:            {}\n", config.window()));
    summary.push_str(&format!("Input file:        {}\n", config.input_path().display()));
    summary.push_str(&format!("Output file:       {}\n", config.output_path().display()));
    summary.push_str(&format!("Income source:     {}\n", rules.income_source));
    summary.push_str(&format!("Prefer labels:     {}\n", rules.prefer_labels));
    summary.push_str(&format!("Use percentages:   {}\n", rules.use_percentages));
    summary.push_str(&format!("Misc threshold:    {}\n", rules.category_threshold));
    summary.push_str(&format!("Ignored vendors:   {}\n", rules.ignore_vendors.join(", ")));
    summary.push_str(&format!("Ignored categories: {}\n", rules.ignore_categories.join(", ")));

    summary.push_str("\nCategory groups:\n");
    for group in &config.categories {
        summary.push_str(&format!("  {}: {}\n", group.name, group.members.join(", ")));
    }

    out.write_all(summary.as_bytes())
        .map_err(|e| SankeyError::Io(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::tests::SAMPLE;
    use tempfile::TempDir;

    const LEDGER: &str = "\
Date,Description,Original Description,Amount,Transaction Type,Category,Account Name,Labels,Notes
05/20/2018,Hilton,,78,debit,Hotel,Credit Card,,
06/15/2018,ACME Corp,Payroll,1000,credit,Paycheck,Checking,,
";

    fn ledger_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("transactions.csv");
        std::fs::write(&path, LEDGER).unwrap();
        path
    }

    #[test]
    fn test_generate_to_stdout() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml(SAMPLE).unwrap();
        let args = GenerateArgs {
            input: Some(ledger_file(&temp_dir)),
            output: None,
            stdout: true,
        };

        let mut out = Vec::new();
        handle_generate_command(&config, &args, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Paycheck [1000] Total Income\n\
             Lodging [78] Hotel\n\
             Total Income [78] Lodging\n\
             Total Income [922] To Savings\n"
        );
    }

    #[test]
    fn test_generate_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_yaml(SAMPLE).unwrap();
        let output = temp_dir.path().join("sankey.txt");
        let args = GenerateArgs {
            input: Some(ledger_file(&temp_dir)),
            output: Some(output.clone()),
            stdout: false,
        };

        let mut out = Vec::new();
        handle_generate_command(&config, &args, &mut out).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("Wrote 4 flow lines"));
        assert!(std::fs::read_to_string(output)
            .unwrap()
            .starts_with("Paycheck [1000] Total Income\n"));
    }

    #[test]
    fn test_config_summary() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        let mut out = Vec::new();
        handle_config_command(&config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("05/01/2018 to 08/01/2018"));
        assert!(text.contains("Lodging: Hotel"));
        assert!(text.contains("Food: Restaurants, Groceries"));
        assert!(text.contains("Income source:     transactions"));
    }
}
