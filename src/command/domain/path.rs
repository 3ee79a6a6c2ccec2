//! Reconstruction of the command path and argument values from the nested
//! option tree of an inbound request.

use std::collections::BTreeMap;

use crate::interaction::{DataOption, InteractionData};

/// Value-carrying options keyed by name, flattened out of the nested tree.
pub type RawOptions = BTreeMap<String, DataOption>;

/// Collects subcommand-group and subcommand names in traversal order.
///
/// Value-carrying options are skipped; only grouping options contribute path
/// segments.
#[must_use]
pub fn build_path_from_options(options: &[DataOption]) -> Vec<String> {
    let mut path = Vec::new();
    let mut level = options;
    while let Some(grouping) = level.iter().find(|option| option.kind.is_grouping()) {
        path.push(grouping.name.clone());
        level = &grouping.options;
    }
    path
}

/// Returns the full path of a command payload: its top-level name followed
/// by any nested group and subcommand names.
#[must_use]
pub fn command_path(data: &InteractionData) -> Vec<String> {
    std::iter::once(data.name.clone())
        .chain(build_path_from_options(&data.options))
        .collect()
}

/// Flattens nested options into a name-to-option map.
///
/// Grouping options are descended into but never recorded, so a parameter
/// can never be satisfied by a subcommand that shares its name.
#[must_use]
pub fn flatten_options(options: &[DataOption]) -> RawOptions {
    let mut flattened = RawOptions::new();
    let mut pending: Vec<&DataOption> = options.iter().collect();
    while let Some(option) = pending.pop() {
        if option.kind.is_grouping() {
            pending.extend(option.options.iter());
        } else {
            flattened.insert(option.name.clone(), option.clone());
        }
    }
    flattened
}
