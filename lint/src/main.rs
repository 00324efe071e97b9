use clap::Parser;
use lint::error::LintError;
use lint::report::{self, Format};
use lint::settings::{LintConfig, DEFAULT_CONFIG_FILE};
use lint::Linter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sqlbit-lint")]
#[command(about = "Checks sqlbit entity declarations without compiling them")]
struct Cli {
    /// File or directory to lint
    #[arg(long, default_value = ".")]
    path: PathBuf,
    /// Config file, its extension is optional
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Exit with a failure status when any error is reported
    #[arg(long)]
    strict: bool,
}

fn run(cli: &Cli) -> Result<bool, LintError> {
    let config = LintConfig::new(&cli.config)?;
    let issues = Linter::new(&config)?.lint_path(&cli.path)?;
    print!("{}", report::render(&issues, cli.format)?);
    Ok(issues.iter().any(|issue| issue.is_error()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(has_errors) if has_errors && cli.strict => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            codegen::error!("{e}");
            ExitCode::from(2)
        }
    }
}
