pub mod registry;

use crate::abi::FunctionSelector;
use crate::error::EmitError;
use crate::parser::ast::{FunctionDescriptor, ParameterDescriptor};
use registry::{Serialisation, SerialisationSource, TypeRegistry, NATIVE_SERIALISATION_MODULE};

/// A function that is known to have a selector, and can therefore be called
/// through the generated interface.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedFunction<'a> {
    pub descriptor: &'a FunctionDescriptor,
    pub selector: FunctionSelector,
}

impl<'a> TryFrom<&'a FunctionDescriptor> for ResolvedFunction<'a> {
    type Error = EmitError;

    fn try_from(descriptor: &'a FunctionDescriptor) -> Result<Self, Self::Error> {
        let selector = descriptor
            .selector()
            .ok_or_else(|| EmitError::MissingSelector(descriptor.name.clone()))?;
        Ok(ResolvedFunction { descriptor, selector })
    }
}

/// Generate the Noir contract interface module for `contract_name`.
///
/// Fails without producing any output if a function has no selector or uses a
/// parameter type the registry cannot serialise.
pub fn generate(
    contract_name: &str,
    functions: &[FunctionDescriptor],
    registry: &TypeRegistry,
) -> Result<String, EmitError> {
    let resolved = functions
        .iter()
        .map(ResolvedFunction::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let serialisations = collect_serialisations(&resolved, registry)?;

    let mut output = String::new();
    output.push_str("/* Autogenerated file, do not edit! */\n\n");
    output.push_str(&generate_static_imports());
    output.push_str(&generate_serialisation_imports(&serialisations));
    output.push_str(&generate_spread_helper());
    output.push_str(&generate_interface_struct(contract_name));
    output.push_str(&generate_interface_impl(contract_name, &resolved, registry)?);

    Ok(output)
}

/// Distinct parameter types across all functions, in first-appearance order.
fn collect_serialisations<'a>(
    functions: &[ResolvedFunction<'a>],
    registry: &'a TypeRegistry,
) -> Result<Vec<Serialisation<'a>>, EmitError> {
    let mut serialisations: Vec<Serialisation<'a>> = Vec::new();
    for function in functions {
        for param in &function.descriptor.parameters {
            if serialisations.iter().any(|s| s.type_name == param.type_name) {
                continue;
            }
            serialisations.push(lookup(registry, function.descriptor, param)?);
        }
    }
    Ok(serialisations)
}

fn lookup<'a>(
    registry: &'a TypeRegistry,
    function: &'a FunctionDescriptor,
    param: &'a ParameterDescriptor,
) -> Result<Serialisation<'a>, EmitError> {
    registry
        .lookup(&param.type_name)
        .ok_or_else(|| EmitError::UnknownType {
            type_name: param.type_name.clone(),
            function: function.name.clone(),
        })
}

fn generate_static_imports() -> String {
    let mut output = String::new();
    output.push_str("use dep::std;\n");
    output.push_str("use dep::aztec::context::Context;\n");
    output.push_str("use dep::aztec::constants_gen::RETURN_VALUES_LENGTH;\n\n");
    output.push_str("// ---\n\n");
    output
}

fn generate_serialisation_imports(serialisations: &[Serialisation]) -> String {
    let mut output = String::new();

    let natives: Vec<&Serialisation> = serialisations.iter().filter(|s| s.is_native()).collect();
    if !natives.is_empty() {
        output.push_str(&format!("use {}::{{\n", NATIVE_SERIALISATION_MODULE));
        for native in natives {
            output.push_str(&format!("  {}::{{\n", native.module_ident()));
            output.push_str(&format!("    {},\n", native.methods_ident()));
            output.push_str(&format!("    {},\n", native.length_const()));
            output.push_str("  },\n");
        }
        output.push_str("};\n");
    }

    // One line per imported type; aliases of the same type share it.
    let mut customs: Vec<(&Serialisation, Vec<String>)> = Vec::new();
    for custom in serialisations.iter().filter(|s| !s.is_native()) {
        let item = custom.import_item();
        match customs
            .iter_mut()
            .find(|(first, _)| first.source == custom.source && first.original == custom.original)
        {
            Some((_, items)) => items.push(item),
            None => customs.push((custom, vec![item])),
        }
    }
    for (custom, items) in customs {
        if let SerialisationSource::Imported { module } = custom.source {
            output.push_str(&format!(
                "use {}::{{{}, {}, {}}};\n",
                module,
                items.join(", "),
                custom.methods_ident(),
                custom.length_const()
            ));
        }
    }

    if !output.is_empty() {
        output.push('\n');
    }
    output
}

fn generate_spread_helper() -> String {
    let mut output = String::new();
    output.push_str("// Spread an array into an array:\n");
    output.push_str("fn spread<SRC_LEN, TARGET_LEN>(mut target_arr: [Field; TARGET_LEN], src_arr: [Field; SRC_LEN], at_index: Field) -> [Field; TARGET_LEN] {\n");
    output.push_str("  for i in 0..SRC_LEN {\n");
    output.push_str("    target_arr[at_index + i] = src_arr[i];\n");
    output.push_str("  }\n");
    output.push_str("  target_arr\n");
    output.push_str("}\n\n");
    output
}

fn generate_interface_struct(contract_name: &str) -> String {
    format!(
        "struct {}_ContractInterface {{\n  address: Field,\n}}\n\n",
        contract_name
    )
}

fn generate_interface_impl(
    contract_name: &str,
    functions: &[ResolvedFunction],
    registry: &TypeRegistry,
) -> Result<String, EmitError> {
    let mut output = String::new();
    output.push_str(&format!("impl {}_ContractInterface {{\n", contract_name));
    output.push_str("  fn at(address: Field) -> Self {\n");
    output.push_str("    Self {\n");
    output.push_str("      address,\n");
    output.push_str("    }\n");
    output.push_str("  }\n");

    for function in functions {
        output.push('\n');
        output.push_str(&generate_function_interface(function, registry)?);
    }

    output.push_str("}\n");
    Ok(output)
}

fn generate_function_interface(
    function: &ResolvedFunction,
    registry: &TypeRegistry,
) -> Result<String, EmitError> {
    let descriptor = function.descriptor;
    let serialisations = descriptor
        .parameters
        .iter()
        .map(|param| lookup(registry, descriptor, param))
        .collect::<Result<Vec<_>, _>>()?;

    let mut signature_params = vec!["self".to_string(), "context: &mut Context".to_string()];
    signature_params.extend(
        descriptor
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_name)),
    );

    let mut output = String::new();
    output.push_str(&format!("  fn {}(\n", descriptor.name));
    output.push_str(&format!("    {}\n", signature_params.join(",\n    ")));
    output.push_str("  ) -> [Field; RETURN_VALUES_LENGTH] {\n");
    output.push_str(&declare_serialised_args(&serialisations));

    if !descriptor.parameters.is_empty() {
        output.push_str("    let mut spread_index: Field = 0;\n");
        for (param, serialisation) in descriptor.parameters.iter().zip(&serialisations) {
            output.push('\n');
            output.push_str(&generate_serialisation_chunk(param, serialisation));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "    context.call_private_function(self.address, {}, serialised_args).public_inputs.return_values\n",
        function.selector
    ));
    output.push_str("  }\n");
    Ok(output)
}

/// The buffer length is the sum of the length globals, left for the Noir
/// compiler to evaluate.
fn declare_serialised_args(serialisations: &[Serialisation]) -> String {
    let length = if serialisations.is_empty() {
        "0".to_string()
    } else {
        serialisations
            .iter()
            .map(Serialisation::length_const)
            .collect::<Vec<_>>()
            .join(" + ")
    };
    format!("    let mut serialised_args = [0; {}];\n", length)
}

fn generate_serialisation_chunk(param: &ParameterDescriptor, serialisation: &Serialisation) -> String {
    let serialiser = format!("serialise{}", param.type_name);
    let mut output = String::new();
    output.push_str(&format!(
        "    let {} = {}.serialise;\n",
        serialiser,
        serialisation.methods_ident()
    ));
    output.push_str(&format!(
        "    serialised_args = spread(serialised_args, {}({}), spread_index);\n",
        serialiser, param.name
    ));
    output.push_str(&format!(
        "    spread_index += {};\n",
        serialisation.length_const()
    ));
    output
}
