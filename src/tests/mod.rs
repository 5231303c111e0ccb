use super::abi::{compute_selector, AbiParameter, AbiType, ContractAbi, FunctionAbi};
use super::error::{EmitError, InterfaceGenError};
use super::{generate_contract_interface, generate_contract_interface_with, generator, parser, resolver};
use super::{InterfaceConfig, TypeRegistry};
use anyhow::Result;

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER_SOURCE: &str = r#"
        contract PrivateToken {
            use dep::aztec::abi;
            use dep::aztec::abi::PrivateContextInputs;
            use dep::aztec::context::Context;

            fn transfer(inputs: PrivateContextInputs, amount: Field, to: Field) -> distinct pub abi::PrivateCircuitPublicInputs {
                let mut context = Context::new(inputs, abi::hash_args([amount, to]));
                context.finish()
            }
        }
    "#;

    fn field_params(names: &[&str]) -> Vec<AbiParameter> {
        names
            .iter()
            .map(|n| AbiParameter {
                name: n.to_string(),
                ty: AbiType::Field,
                visibility: Some("private".to_string()),
            })
            .collect()
    }

    fn abi_with(name: &str, functions: &[(&str, &[&str])]) -> ContractAbi {
        ContractAbi {
            name: name.to_string(),
            functions: functions
                .iter()
                .map(|(fname, params)| FunctionAbi {
                    name: fname.to_string(),
                    function_type: Some("secret".to_string()),
                    parameters: field_params(params),
                    return_types: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn test_transfer_scenario() -> Result<()> {
        let abi = abi_with("PrivateToken", &[("transfer", &["amount", "to"])]);

        let functions = parser::extract_private_functions(&parser::normalize(TRANSFER_SOURCE))?;
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "transfer");
        let params: Vec<(&str, &str)> = functions[0]
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.type_name.as_str()))
            .collect();
        assert_eq!(params, vec![("amount", "Field"), ("to", "Field")]);

        let resolved = resolver::resolve_selectors(functions, &abi)?;
        let expected = compute_selector("transfer", &field_params(&["amount", "to"]));
        assert_eq!(resolved[0].selector(), Some(expected));
        assert_eq!(expected.to_string(), "0xc0888d22");

        let code = generate_contract_interface(TRANSFER_SOURCE, &abi)?;
        assert!(code.contains("struct PrivateToken_ContractInterface {"));
        assert!(code.contains(
            "  fn transfer(\n    self,\n    context: &mut Context,\n    amount: Field,\n    to: Field\n  )"
        ));
        assert!(code.contains("[0; FIELD_SERIALISED_LEN + FIELD_SERIALISED_LEN]"));
        assert_eq!(code.matches("FieldSerialisationMethods.serialise").count(), 2);
        assert!(code.contains("context.call_private_function(self.address, 0xc0888d22, serialised_args)"));
        assert!(!code.contains("PrivateContextInputs"));
        Ok(())
    }

    #[test]
    fn test_public_only_contract_has_constructor_only() -> Result<()> {
        let source = r#"
            contract Counter {
                open fn increment(inputs: PublicContextInputs, by: Field) -> pub abi::PublicCircuitPublicInputs {
                    context.finish()
                }
            }
        "#;
        let abi = abi_with("Counter", &[("increment", &["by"])]);

        assert!(parser::extract_private_functions(&parser::normalize(source))?.is_empty());

        let code = generate_contract_interface(source, &abi)?;
        assert!(code.contains("impl Counter_ContractInterface {\n  fn at(address: Field) -> Self {"));
        assert!(!code.contains("fn increment"));
        assert!(!code.contains("call_private_function"));
        Ok(())
    }

    #[test]
    fn test_function_missing_from_abi() -> Result<()> {
        let source = r#"
            fn foo(inputs: PrivateContextInputs, x: Field) -> distinct pub abi::PrivateCircuitPublicInputs {}
        "#;
        let abi = abi_with("Dev", &[]);

        let functions = parser::extract_private_functions(&parser::normalize(source))?;
        let resolved = resolver::resolve_selectors(functions, &abi)?;
        assert_eq!(resolved[0].name, "foo");
        assert!(resolved[0].selector().is_none());

        match generator::generate(&abi.name, &resolved, &TypeRegistry::native()) {
            Err(EmitError::MissingSelector(name)) => assert_eq!(name, "foo"),
            other => panic!("expected missing selector error, got {:?}", other),
        }
        assert!(matches!(
            generate_contract_interface(source, &abi),
            Err(InterfaceGenError::Emit(EmitError::MissingSelector(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_private_and_public_declarations_in_order() -> Result<()> {
        let source = r#"
            //******/
            contract Mixed {
                fn first(inputs: PrivateContextInputs) -> distinct pub abi::PrivateCircuitPublicInputs {}
                open fn public_one(inputs: PublicContextInputs) -> pub abi::PublicCircuitPublicInputs {}
                /* fn commented(inputs: PrivateContextInputs) -> distinct pub abi::PrivateCircuitPublicInputs {} */
                fn second(inputs: PrivateContextInputs, a: Field) -> distinct pub abi::PrivateCircuitPublicInputs {}
                open fn public_two(inputs: PublicContextInputs) -> pub abi::PublicCircuitPublicInputs {}
                fn third(inputs: PrivateContextInputs, a: Field, b: bool) -> distinct pub abi::PrivateCircuitPublicInputs {}
            }
        "#;
        let functions = parser::extract_private_functions(&parser::normalize(source))?;
        let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(functions
            .iter()
            .flat_map(|f| f.raw_parameters.iter())
            .all(|p| !p.contains("PrivateContextInputs")));
        assert_eq!(functions[2].parameters.len(), 2);
        Ok(())
    }

    #[test]
    fn test_pipeline_output_is_byte_identical() -> Result<()> {
        let abi = abi_with("PrivateToken", &[("transfer", &["amount", "to"])]);
        let first = generate_contract_interface(TRANSFER_SOURCE, &abi)?;
        let second = generate_contract_interface(TRANSFER_SOURCE, &abi)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_imported_custom_type_is_serialisable() -> Result<()> {
        let source = r#"
            contract Game {
                use dep::aztec::abi::PrivateContextInputs;
                use dep::game_types::{board::Point, Move as GameMove};

                fn move_to(inputs: PrivateContextInputs, target: Point, nonce: Field) -> distinct pub abi::PrivateCircuitPublicInputs {}
            }
        "#;
        let abi = abi_with("Game", &[("move_to", &["target", "nonce"])]);
        let code = generate_contract_interface(source, &abi)?;

        assert!(code.contains(
            "use dep::game_types::board::{Point, PointSerialisationMethods, POINT_SERIALISED_LEN};"
        ));
        assert!(code.contains("field_serialisation::{"));
        assert!(code.contains("[0; POINT_SERIALISED_LEN + FIELD_SERIALISED_LEN]"));
        Ok(())
    }

    #[test]
    fn test_unknown_parameter_type_fails_generation() {
        let source = r#"
            fn place(inputs: PrivateContextInputs, note: ValueNote) -> distinct pub abi::PrivateCircuitPublicInputs {}
        "#;
        let abi = abi_with("Notes", &[("place", &["note"])]);
        match generate_contract_interface(source, &abi) {
            Err(InterfaceGenError::Emit(EmitError::UnknownType { type_name, function })) => {
                assert_eq!(type_name, "ValueNote");
                assert_eq!(function, "place");
            }
            other => panic!("expected unknown type error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_overrides_name_and_adds_types() -> Result<()> {
        let source = r#"
            struct ValueNote { value: Field }
            fn place(inputs: PrivateContextInputs, note: ValueNote) -> distinct pub abi::PrivateCircuitPublicInputs {}
        "#;
        let abi = abi_with("Notes", &[("place", &["note"])]);
        let config = InterfaceConfig {
            contract_name: Some("NoteStore".to_string()),
            extra_types: vec![("ValueNote".to_string(), "dep::value_note".to_string())],
        };
        let code = generate_contract_interface_with(source, &abi, &config)?;
        assert!(code.contains("struct NoteStore_ContractInterface {"));
        assert!(code.contains(
            "use dep::value_note::{ValueNote, ValueNoteSerialisationMethods, VALUENOTE_SERIALISED_LEN};"
        ));
        Ok(())
    }

    #[test]
    fn test_malformed_import_aborts_pipeline() {
        let source = r#"
            use std;
            fn f(inputs: PrivateContextInputs) -> distinct pub abi::PrivateCircuitPublicInputs {}
        "#;
        let abi = abi_with("Broken", &[("f", &[])]);
        assert!(matches!(
            generate_contract_interface(source, &abi),
            Err(InterfaceGenError::Import(_))
        ));
    }

    #[test]
    fn test_comment_marker_in_string_keeps_following_functions() -> Result<()> {
        let source = "global URL = \"http://example.org\";\nfn real(inputs: PrivateContextInputs, a: Field) -> distinct pub abi::PrivateCircuitPublicInputs {}\nglobal B = \"y\";\n";
        let functions = parser::extract_private_functions(&parser::normalize(source))?;
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "real");

        let abi = abi_with("Urls", &[("real", &["a"])]);
        let code = generate_contract_interface(source, &abi)?;
        assert!(code.contains("  fn real(\n    self,\n    context: &mut Context,\n    a: Field\n  )"));
        Ok(())
    }

    #[test]
    fn test_type_imported_under_alias_is_serialisable() -> Result<()> {
        let source = r#"
            contract Game {
                use dep::aztec::abi::PrivateContextInputs;
                use dep::t::Point as P;

                fn place(inputs: PrivateContextInputs, p: P) -> distinct pub abi::PrivateCircuitPublicInputs {}
            }
        "#;
        let abi = abi_with("Game", &[("place", &["p"])]);
        let code = generate_contract_interface(source, &abi)?;

        assert!(code.contains("use dep::t::{Point as P, PointSerialisationMethods, POINT_SERIALISED_LEN};"));
        assert!(code.contains("    p: P\n"));
        assert!(code.contains("let serialiseP = PointSerialisationMethods.serialise;"));
        assert!(code.contains("[0; POINT_SERIALISED_LEN]"));
        Ok(())
    }

    #[test]
    fn test_config_types_do_not_replace_natives() -> Result<()> {
        let abi = abi_with("PrivateToken", &[("transfer", &["amount", "to"])]);
        let config = InterfaceConfig {
            contract_name: None,
            extra_types: vec![("Field".to_string(), "dep::x".to_string())],
        };
        let code = generate_contract_interface_with(TRANSFER_SOURCE, &abi, &config)?;
        assert!(code.contains(
            "use dep::aztec::types::type_serialisation::{\n  field_serialisation::{\n    FieldSerialisationMethods,\n    FIELD_SERIALISED_LEN,\n  },\n};\n"
        ));
        assert!(!code.contains("dep::x"));
        Ok(())
    }
}
