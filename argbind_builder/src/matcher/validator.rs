use std::collections::{BTreeMap, HashMap};

use crate::api::OptionDefinition;
use crate::matcher::{fold_case, InitializationError};

/// Check the structural rules over a complete set of options.
///
/// Checks run in a fixed order; the first violation is reported.
pub(crate) fn validate(options: &[&OptionDefinition<'_>]) -> Result<(), InitializationError> {
    check_unique(options)?;

    let mut positionals: Vec<&OptionDefinition<'_>> = options
        .iter()
        .copied()
        .filter(|option| option.is_positional())
        .collect();
    positionals.sort_by_key(|option| option.position_index());

    check_unique_positions(&positionals)?;
    check_contiguous(&positionals)?;
    check_required_first(&positionals)?;
    check_single_collection(&positionals)?;

    if options.iter().any(|option| option.name().is_empty()) {
        return Err(InitializationError::Unnamed);
    }

    Ok(())
}

fn check_unique(options: &[&OptionDefinition<'_>]) -> Result<(), InitializationError> {
    // Keyed by folded case, keeping the first spelling seen.
    let mut seen: HashMap<String, (&str, usize)> = HashMap::default();

    for identifier in options.iter().flat_map(|option| option.identifiers()) {
        seen.entry(fold_case(identifier))
            .or_insert((identifier, 0))
            .1 += 1;
    }

    let mut duplicates: Vec<String> = seen
        .into_values()
        .filter(|(_, count)| *count > 1)
        .map(|(identifier, _)| identifier.to_string())
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        duplicates.sort();
        Err(InitializationError::NotUnique(duplicates))
    }
}

fn check_unique_positions(positionals: &[&OptionDefinition<'_>]) -> Result<(), InitializationError> {
    let mut owners: BTreeMap<usize, Vec<&str>> = BTreeMap::default();

    for option in positionals {
        owners
            .entry(option.position_index())
            .or_default()
            .push(option.name());
    }

    let mut shared: Vec<String> = owners
        .into_values()
        .filter(|names| names.len() > 1)
        .flatten()
        .map(str::to_string)
        .collect();

    if shared.is_empty() {
        Ok(())
    } else {
        shared.sort();
        Err(InitializationError::PositionNotUnique(shared))
    }
}

fn check_contiguous(positionals: &[&OptionDefinition<'_>]) -> Result<(), InitializationError> {
    for (index, option) in positionals.iter().enumerate() {
        let expected = index + 1;
        if option.position_index() != expected {
            return Err(InitializationError::PositionGap {
                found: option.position_index(),
                expected,
            });
        }
    }

    Ok(())
}

fn check_required_first(positionals: &[&OptionDefinition<'_>]) -> Result<(), InitializationError> {
    let mut last_optional: Option<&str> = None;

    for option in positionals {
        if !option.is_required() {
            last_optional.replace(option.name());
        } else if let Some(optional) = last_optional {
            return Err(InitializationError::RequiredAfterOptional {
                optional: optional.to_string(),
                required: option.name().to_string(),
            });
        }
    }

    Ok(())
}

fn check_single_collection(
    positionals: &[&OptionDefinition<'_>],
) -> Result<(), InitializationError> {
    let mut collections = positionals.iter().filter(|option| option.is_collection());

    match (collections.next(), collections.next()) {
        (Some(first), Some(second)) => Err(InitializationError::MultipleCollections {
            first: first.name().to_string(),
            second: second.name().to_string(),
        }),
        _ => Ok(()),
    }
}
