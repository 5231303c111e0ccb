use super::ast::ImportedName;
use super::{normalize, NoirParser, Rule};
use crate::error::ImportError;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;

/// Collect every name imported by a `use` declaration in raw contract source.
///
/// Duplicates are kept, in declaration order.
pub fn scan_imports(source: &str) -> Result<Vec<ImportedName>, ImportError> {
    let pairs = NoirParser::parse(Rule::contract, source).map_err(|e| ImportError::Malformed {
        statement: String::new(),
        reason: e.to_string(),
    })?;

    let mut names = Vec::new();
    for contract in pairs {
        for item in contract.into_inner() {
            if item.as_rule() != Rule::use_declaration {
                continue;
            }
            if let Some(body) = item.into_inner().find(|p| p.as_rule() == Rule::use_body) {
                names.extend(extract_imported_names(body.as_str())?);
            }
        }
    }

    debug!("Found {} imported name(s)", names.len());
    Ok(names)
}

/// Extract the imported names from the body of one `use` declaration, i.e.
/// the text between `use` and `;`.
pub fn extract_imported_names(statement: &str) -> Result<Vec<ImportedName>, ImportError> {
    let statement = normalize(statement);
    let statement = statement.trim();
    let compact: String = statement.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.contains("::") {
        return Err(ImportError::MissingPathSeparator(compact));
    }

    let root = NoirParser::parse(Rule::use_statement, statement)
        .map_err(|e| ImportError::Malformed {
            statement: compact.clone(),
            reason: e.to_string(),
        })?
        .next()
        .and_then(|stmt| stmt.into_inner().find(|p| p.as_rule() == Rule::use_tree))
        .ok_or_else(|| ImportError::Malformed {
            statement: compact.clone(),
            reason: "empty use tree".to_string(),
        })?;

    let mut names = Vec::new();
    collect_use_tree(root, &[], &mut names);
    Ok(names)
}

fn collect_use_tree(tree: Pair<Rule>, prefix: &[String], names: &mut Vec<ImportedName>) {
    let mut path = prefix.to_vec();
    for part in tree.into_inner() {
        match part.as_rule() {
            Rule::path_segment => path.push(part.as_str().to_string()),
            Rule::use_group => {
                for nested in part.into_inner() {
                    collect_use_tree(nested, &path, names);
                }
            }
            Rule::use_leaf => {
                let mut leaf = None;
                let mut alias = None;
                for inner in part.into_inner() {
                    match inner.as_rule() {
                        Rule::path_segment => leaf = Some(inner.as_str().to_string()),
                        Rule::use_alias => {
                            alias = inner
                                .into_inner()
                                .find(|p| p.as_rule() == Rule::identifier)
                                .map(|p| p.as_str().to_string());
                        }
                        _ => {}
                    }
                }
                match leaf.as_deref() {
                    // `a::b::{self}` imports the module `b` itself.
                    Some("self") => {
                        if let Some(module) = path.last() {
                            names.push(ImportedName {
                                name: module.clone(),
                                path: path.join("::"),
                                alias,
                            });
                        }
                    }
                    Some(leaf) => {
                        let mut full = path.clone();
                        full.push(leaf.to_string());
                        names.push(ImportedName {
                            name: leaf.to_string(),
                            path: full.join("::"),
                            alias,
                        });
                    }
                    None => {}
                }
            }
            _ => {}
        }
    }
}
