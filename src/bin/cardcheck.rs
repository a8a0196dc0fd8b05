//! CLI tool for credit card validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate a card (network is inferred when omitted)
//! cardcheck validate 5019717010103742 --expiry 11/2030 --cvv 123
//!
//! # Validate against a declared network, evaluating expiry at a fixed time
//! cardcheck validate 378282246310005 --month 11 --year 2020 --cvv 1234 \
//!     --network "American Express" --now 2019-06-01T00:00:00Z
//!
//! # Show which BIN rule claims a number
//! cardcheck classify 4011780000000000
//!
//! # Luhn check only
//! cardcheck luhn 4111111111111111
//!
//! # Generate test numbers
//! cardcheck generate --network dankort --count 3
//!
//! # Validate "number,month,year,cvv[,network]" lines from a file or stdin
//! cardcheck batch cards.csv --output json
//! ```
//!
//! Set `RUST_LOG=cardcheck=debug` to see classification decisions on stderr.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use cardcheck::{
    batch, classify, detect, expiry, generate, mask, validate_luhn, Card, CardNetwork, Clock,
    Validation, Validator,
};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Credit card validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card: number, expiry, CVV and network
    Validate {
        /// Card number to validate
        card_number: String,

        /// Expiry date (MM/YY, MM/YYYY, MMYY or MMYYYY)
        #[arg(short, long, conflicts_with_all = ["month", "year"])]
        expiry: Option<String>,

        /// Expiry month
        #[arg(short, long, allow_negative_numbers = true, requires = "year")]
        month: Option<i32>,

        /// Expiry year
        #[arg(short, long, allow_negative_numbers = true, requires = "month")]
        year: Option<i32>,

        /// CVV/CVC code
        #[arg(short, long, default_value = "")]
        cvv: String,

        /// Declared network display name, e.g. "Visa"
        #[arg(short, long)]
        network: Option<String>,

        #[command(flatten)]
        options: ValidateOptions,
    },

    /// Validate cards listed as "number,month,year,cvv[,network]" lines
    Batch {
        /// Input file; reads stdin when omitted or "-"
        input: Option<PathBuf>,

        #[command(flatten)]
        options: ValidateOptions,
    },

    /// Detect the card network from a number
    Classify {
        /// Card number (or partial number)
        card_number: String,
    },

    /// Check if a card passes the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card network to generate
        #[arg(short, long, default_value = "visa")]
        network: NetworkArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Fill the middle digits randomly instead of with zeros
        #[arg(short, long)]
        random: bool,
    },
}

#[derive(Args)]
struct ValidateOptions {
    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Evaluate expiration at this RFC 3339 instant instead of now
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

impl ValidateOptions {
    fn validator(&self) -> Validator {
        match self.now {
            Some(now) => Validator::at(now),
            None => Validator::with_clock(Clock::System),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum NetworkArg {
    Amex,
    Aura,
    Bankcard,
    Cabal,
    Unionpay,
    Dankort,
    CarteBlanche,
    Enroute,
    DinersClub,
    Discover,
    Elo,
    Hipercard,
    Instapayment,
    Interpayment,
    Jcb,
    Maestro,
    Mastercard,
    Visa,
    VisaElectron,
}

impl From<NetworkArg> for CardNetwork {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Amex => CardNetwork::AmericanExpress,
            NetworkArg::Aura => CardNetwork::Aura,
            NetworkArg::Bankcard => CardNetwork::Bankcard,
            NetworkArg::Cabal => CardNetwork::Cabal,
            NetworkArg::Unionpay => CardNetwork::ChinaUnionPay,
            NetworkArg::Dankort => CardNetwork::Dankort,
            NetworkArg::CarteBlanche => CardNetwork::DinersClubCarteBlanche,
            NetworkArg::Enroute => CardNetwork::DinersClubEnroute,
            NetworkArg::DinersClub => CardNetwork::DinersClubInternational,
            NetworkArg::Discover => CardNetwork::Discover,
            NetworkArg::Elo => CardNetwork::Elo,
            NetworkArg::Hipercard => CardNetwork::Hipercard,
            NetworkArg::Instapayment => CardNetwork::InstaPayment,
            NetworkArg::Interpayment => CardNetwork::InterPayment,
            NetworkArg::Jcb => CardNetwork::Jcb,
            NetworkArg::Maestro => CardNetwork::Maestro,
            NetworkArg::Mastercard => CardNetwork::Mastercard,
            NetworkArg::Visa => CardNetwork::Visa,
            NetworkArg::VisaElectron => CardNetwork::VisaElectron,
        }
    }
}

/// Validation outcome safe to print: the number is masked, the CVV omitted.
#[derive(Serialize)]
struct Report {
    number: String,
    network: Option<String>,
    valid_card_number: bool,
    valid_expiry_month: bool,
    valid_expiry_year: bool,
    valid_cvv: bool,
    is_expired: bool,
    errors: Vec<String>,
}

impl From<&Validation> for Report {
    fn from(v: &Validation) -> Self {
        Self {
            number: mask::mask_string(&v.card().number),
            network: v.card().network.clone(),
            valid_card_number: v.valid_card_number(),
            valid_expiry_month: v.valid_expiry_month(),
            valid_expiry_year: v.valid_expiry_year(),
            valid_cvv: v.valid_cvv(),
            is_expired: v.is_expired(),
            errors: v.messages(),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            card_number,
            expiry,
            month,
            year,
            cvv,
            network,
            options,
        } => {
            let (month, year) = match (expiry, month, year) {
                (Some(date), _, _) => expiry::parse_expiry(&date)
                    .with_context(|| format!("cannot read expiry date '{date}'"))?,
                (None, Some(month), Some(year)) => (month, year),
                _ => bail!("an expiry is required: pass --expiry or --month and --year"),
            };
            let mut card = Card::new(card_number, month, year, cvv);
            card.network = network;
            cmd_validate(card, &options)
        }
        Commands::Batch { input, options } => cmd_batch(input, &options),
        Commands::Classify { card_number } => Ok(cmd_classify(&card_number)),
        Commands::Luhn { card_number } => Ok(cmd_luhn(&card_number)),
        Commands::Generate {
            network,
            count,
            random,
        } => cmd_generate(network.into(), count, random),
    }
}

fn cmd_validate(card: Card, options: &ValidateOptions) -> anyhow::Result<ExitCode> {
    let validation = options.validator().validate(card);
    let report = Report::from(&validation);

    match options.output {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(exit_code(validation.is_clean()))
}

fn cmd_batch(input: Option<PathBuf>, options: &ValidateOptions) -> anyhow::Result<ExitCode> {
    let cards = match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            batch::read_cards(file).with_context(|| format!("cannot read {}", path.display()))?
        }
        _ => batch::read_cards(io::stdin().lock()).context("cannot read stdin")?,
    };

    let results = batch::validate_all(&options.validator(), cards);
    let reports: Vec<Report> = results.iter().map(Report::from).collect();

    match options.output {
        OutputFormat::Text => {
            for report in &reports {
                print_report(report);
                println!();
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    let clean = batch::count_clean(&results);
    tracing::info!(total = results.len(), clean, "batch validated");

    Ok(exit_code(clean == results.len()))
}

fn print_report(report: &Report) {
    println!("Number: {}", report.number);
    println!("Network: {}", report.network.as_deref().unwrap_or("-"));
    println!("Expired: {}", yes_no(report.is_expired));
    println!("Valid month: {}", yes_no(report.valid_expiry_month));
    println!("Valid year: {}", yes_no(report.valid_expiry_year));
    println!("CVV flag: {}", yes_no(report.valid_cvv));
    println!("Number flag: {}", yes_no(report.valid_card_number));
    if report.errors.is_empty() {
        println!("Errors: none");
    } else {
        println!("Errors:");
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
}

fn cmd_classify(card_number: &str) -> ExitCode {
    match detect::classify_rule(card_number) {
        Some((index, rule)) => {
            println!("Detected Network: {}", rule.network.name());
            println!("Rule: #{} of {}", index + 1, detect::rules().len());
            println!("CVV Length: {}", rule.network.cvv_length());
            ExitCode::SUCCESS
        }
        None => {
            // Same message validation reports
            if let Err(e) = classify(card_number) {
                println!("Detected Network: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if validate_luhn(card_number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_generate(network: CardNetwork, count: usize, random: bool) -> anyhow::Result<ExitCode> {
    for _ in 0..count {
        let number = if random {
            generate::generate_random(network)
        } else {
            generate::generate_number(network)
        };
        match number {
            Some(number) => println!("{}", number),
            None => bail!("no test numbers for {}", network),
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn exit_code(clean: bool) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
