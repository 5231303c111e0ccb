pub mod ast;
pub mod imports;
pub mod normalize;

use crate::error::ParseError;
use ast::{FunctionDescriptor, ParameterDescriptor};
use log::debug;
use pest::Parser;
use pest_derive::Parser;

pub use imports::{extract_imported_names, scan_imports};
pub use normalize::normalize;

#[derive(Parser)]
#[grammar = "parser/noir.pest"]
pub struct NoirParser;

/// Compiler-injected first parameter of every private function. It is never
/// part of the serialised call arguments.
pub const CONTEXT_INPUTS_TYPE: &str = "PrivateContextInputs";

/// Find every private function declared in (normalized) contract source.
///
/// Only functions returning `distinct pub abi::PrivateCircuitPublicInputs`
/// are matched; public `open` functions are ignored.
pub fn extract_private_functions(source: &str) -> Result<Vec<FunctionDescriptor>, ParseError> {
    let pairs = NoirParser::parse(Rule::contract, source)
        .map_err(|e| ParseError::Syntax(Box::new(e)))?;

    let mut functions = Vec::new();
    for contract in pairs {
        for item in contract.into_inner() {
            if item.as_rule() == Rule::private_function {
                let function = parse_private_function(item)?;
                debug!(
                    "Found private fn {} with {} parameter(s)",
                    function.name,
                    function.parameters.len()
                );
                functions.push(function);
            }
        }
    }

    Ok(functions)
}

fn parse_private_function(pair: pest::iterators::Pair<Rule>) -> Result<FunctionDescriptor, ParseError> {
    let mut name = String::new();
    let mut raw_parameters = Vec::new();

    for token in pair.into_inner() {
        match token.as_rule() {
            Rule::identifier => {
                name = token.as_str().to_string();
            }
            Rule::raw_parameters => {
                raw_parameters = split_parameters(token.as_str());
            }
            _ => {}
        }
    }

    let parameters = structure_parameters(&name, &raw_parameters)?;
    Ok(FunctionDescriptor::new(name, raw_parameters, parameters))
}

/// Split a parameter list on commas, dropping the implicit context inputs.
fn split_parameters(raw: &str) -> Vec<String> {
    normalize(raw)
        .split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .filter(|param| !param.contains(CONTEXT_INPUTS_TYPE))
        .map(String::from)
        .collect()
}

/// Turn `name: Type` strings into parameter descriptors.
///
/// Splits on the first colon only, so types such as `dep::a::B` survive.
pub fn structure_parameters(
    function: &str,
    raw_parameters: &[String],
) -> Result<Vec<ParameterDescriptor>, ParseError> {
    raw_parameters
        .iter()
        .map(|raw| {
            let malformed = || ParseError::MalformedParameter {
                function: function.to_string(),
                text: raw.clone(),
            };
            let (name, type_name) = raw.split_once(':').ok_or_else(malformed)?;
            let (name, type_name) = (name.trim(), type_name.trim());
            if name.is_empty() || type_name.is_empty() {
                return Err(malformed());
            }
            Ok(ParameterDescriptor {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
        })
        .collect()
}
