use crate::abi::ContractAbi;
use crate::error::ResolveError;
use crate::parser::ast::FunctionDescriptor;
use log::{debug, warn};

/// Attach a selector to every function that has an entry in the ABI.
///
/// Functions missing from the ABI keep no selector; this is only logged so
/// that contracts under development can still be processed.
pub fn resolve_selectors(
    functions: Vec<FunctionDescriptor>,
    abi: &ContractAbi,
) -> Result<Vec<FunctionDescriptor>, ResolveError> {
    let mut resolved = Vec::with_capacity(functions.len());

    for mut function in functions {
        match abi.function(&function.name) {
            Some(function_abi) => {
                let selector = function_abi.selector();
                function.assign_selector(selector)?;
                debug!("Resolved fn {} to selector {}", function.name, selector);
            }
            None => {
                warn!(
                    "Couldn't find fn '{}' (found by parsing contract '{}') in the ABI's functions",
                    function.name, abi.name
                );
            }
        }
        resolved.push(function);
    }

    Ok(resolved)
}
