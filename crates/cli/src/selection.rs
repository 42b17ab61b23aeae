//! Picking a sub-workflow from a loosely typed command path.

use std::cmp::Reverse;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;

use argui_core::error::{Error, Result};
use argui_core::model::Workflow;

/// Finds the sub-workflow of `workflow` best matching `query`.
///
/// An exact path such as `remote.add` wins. Otherwise every path is scored
/// with a fuzzy matcher and the best score is taken, preferring shorter paths
/// on a tie.
///
/// # Returns
///
/// The dotted path that matched, with the sub-workflow it leads to
///
/// # Errors
///
/// Returns [`Error::SymbolNotFound`] if no path matches.
pub fn select_subworkflow<'a>(
    workflow: &'a Workflow,
    query: &str,
) -> Result<(String, &'a Workflow)> {
    if let Some(subworkflow) = workflow.subworkflow(query) {
        return Ok((query.to_string(), subworkflow));
    }

    let matcher = SkimMatcherV2::default();
    let best = workflow
        .subworkflow_paths()
        .into_iter()
        .filter_map(|path| matcher.fuzzy_match(&path, query).map(|score| (score, path)))
        .min_by_key(|(score, path)| (Reverse(*score), path.len()));

    let Some((score, path)) = best else {
        return Err(Error::symbol_not_found(query));
    };
    debug!("`{query}` matched sub-command `{path}` with score {score}");

    let subworkflow = workflow
        .subworkflow(&path)
        .ok_or_else(|| Error::symbol_not_found(&path))?;

    Ok((path, subworkflow))
}
