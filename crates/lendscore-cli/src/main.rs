use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use lendscore_cli::predict;
use lendscore_cli::train::input::TrainConfig;
use lendscore_cli::train::trainer;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::default().filter_or("LENDSCORE_LOG", "info"))
        .init();

    let matches = Command::new("lendscore")
        .version(clap::crate_version!())
        .about("Loan-approval prediction: train a model on applicant data and score new applicants")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train a loan-approval model from a CSV of historical applications")
                .arg(
                    Arg::new("config")
                        .help("Path to a training configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("train_data")
                        .short('d')
                        .long("train_data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to the training CSV. Overrides the training data file \
                             specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output_file")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "File path that the trained model artifact will be written to. \
                             Overrides the path specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Score one applicant with a trained model")
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .help("Path to the trained model artifact")
                        .default_value("loan_model.json")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help(
                            "Path to a JSON applicant record. Without this flag the \
                             applicant is entered through interactive prompts.",
                        )
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");

    if config_path.is_none() && matches.get_one::<String>("train_data").is_none() {
        let template = serde_json::to_string_pretty(&TrainConfig::default()).unwrap_or_default();
        println!("{}", template);
        eprintln!("No config file provided; printing a configuration template.");
        return Ok(());
    }

    if let Some(path) = config_path {
        log::info!("[Lendscore::Train] Training from config: {:?}", path);
    }

    let config = TrainConfig::from_arguments(config_path, matches)?;

    match trainer::run_training(&config) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let model_path: &PathBuf = matches.get_one("model").unwrap();
    let input_path: Option<&PathBuf> = matches.get_one("input");

    match predict::run_prediction(model_path, input_path) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
