//! Generates Noir contract interfaces: a `<Contract>_ContractInterface` struct
//! with one method per private function, which other contracts use to call
//! into the contract.

pub mod abi;
pub mod error;
pub mod generator;
pub mod parser;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use abi::{ContractAbi, FunctionSelector};
pub use error::InterfaceGenError;
pub use generator::registry::{SerialisationSource, TypeRegistry};
pub use parser::ast::{FunctionDescriptor, ImportedName, ParameterDescriptor};

use log::debug;

#[derive(Debug, Clone, Default)]
pub struct InterfaceConfig {
    /// Overrides the contract name taken from the ABI.
    pub contract_name: Option<String>,
    /// Extra serialisable types as `(type name, module)` pairs, for structs
    /// that are declared in the contract itself rather than imported.
    pub extra_types: Vec<(String, String)>,
}

pub fn generate_contract_interface(
    source: &str,
    abi: &ContractAbi,
) -> Result<String, InterfaceGenError> {
    generate_contract_interface_with(source, abi, &InterfaceConfig::default())
}

pub fn generate_contract_interface_with(
    source: &str,
    abi: &ContractAbi,
    config: &InterfaceConfig,
) -> Result<String, InterfaceGenError> {
    let normalized = parser::normalize(source);
    let functions = parser::extract_private_functions(&normalized)?;
    let functions = resolver::resolve_selectors(functions, abi)?;
    debug!("Function data: {:?}", functions);

    let imports = parser::scan_imports(source)?;
    let mut registry = TypeRegistry::native();
    registry.register_imports(&imports);
    for (type_name, module) in &config.extra_types {
        registry.register(
            type_name.clone(),
            SerialisationSource::Imported {
                module: module.clone(),
            },
        );
    }

    let contract_name = config.contract_name.as_deref().unwrap_or(&abi.name);
    Ok(generator::generate(contract_name, &functions, &registry)?)
}
