use anyhow::{anyhow, Context, Result};
use clap::{App, Arg};
use log::info;
use noir_interface_gen::{generate_contract_interface_with, ContractAbi, InterfaceConfig};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let matches = App::new("noir-interface-gen")
        .version("0.1.0")
        .about("Generates a Noir contract interface from contract source and its ABI")
        .arg(
            Arg::with_name("INPUT")
                .help("Input Noir contract source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("abi")
                .short("a")
                .long("abi")
                .value_name("FILE")
                .help("Contract ABI JSON produced by the Noir compiler")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .help("Output directory for the interface file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("name")
                .short("n")
                .long("name")
                .value_name("NAME")
                .help("Contract name to use instead of the one in the ABI")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("type")
                .short("t")
                .long("type")
                .value_name("NAME=MODULE")
                .help("Serialisable type declared outside the imports, e.g. Note=dep::notes")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increase log verbosity"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input_file = matches.value_of("INPUT").context("missing input file")?;
    let abi_file = matches.value_of("abi").context("missing ABI file")?;
    let output_dir = matches
        .value_of("output")
        .map(String::from)
        .unwrap_or_else(|| String::from("."));

    let mut config = InterfaceConfig {
        contract_name: matches.value_of("name").map(String::from),
        extra_types: Vec::new(),
    };
    for value in matches.values_of("type").into_iter().flatten() {
        let (name, module) = value
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid --type '{}', expected NAME=MODULE", value))?;
        config.extra_types.push((name.trim().to_string(), module.trim().to_string()));
    }

    // Read input files
    let source = fs::read_to_string(input_file)
        .with_context(|| format!("Failed to read input file: {}", input_file))?;
    let abi_json = fs::read_to_string(abi_file)
        .with_context(|| format!("Failed to read ABI file: {}", abi_file))?;
    let abi = ContractAbi::from_json(&abi_json)
        .with_context(|| format!("Failed to parse ABI file: {}", abi_file))?;

    let contract_name = config.contract_name.clone().unwrap_or_else(|| abi.name.clone());
    info!("Generating interface for contract {}", contract_name);

    let interface = generate_contract_interface_with(&source, &abi, &config)
        .with_context(|| format!("Failed to generate interface for {}", contract_name))?;

    let output_file = Path::new(&output_dir)
        .join(format!("{}_interface.nr", to_snake_case(&contract_name)));

    fs::write(&output_file, interface)
        .with_context(|| format!("Failed to write output file: {}", output_file.display()))?;

    println!("Successfully generated interface for {} at {}", contract_name, output_file.display());

    Ok(())
}

/// `PrivateToken` -> `private_token`
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}
