use crate::report::{run_codes, run_iban, run_validate, CodesArgs, IbanArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use uae_payments::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "UAE Payment Validator",
    about = "Validate UAE payment instructions against the CBUAE purpose-code rulebook",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate a transaction request read from a JSON file or stdin
    Validate(ValidateArgs),
    /// Check a single UAE IBAN
    Iban(IbanArgs),
    /// Browse the purpose-code catalog
    Codes(CodesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Iban(args) => run_iban(args),
        Command::Codes(args) => run_codes(args),
    }
}
