use std::path::{Path, PathBuf};
use std::rc::Rc;

use dataenrich::resolve::{Processor, ResolveOptions, resolve_value};

use crate::cmd::Result;
use crate::cmd::processors::{apply_all, builtin};
use crate::cmd::util::{load_tree, print_json, resolve_options};

/// Resolve a JSON document and print it.
///
/// The built-in processors run first unless `raw` is set, in which case only node references and
/// pending values are resolved and the document comes back unchanged.
pub fn run(path: PathBuf, max_depth: Option<u32>, compact: bool, raw: bool) -> Result<()> {
	let processors = if raw { Vec::new() } else { builtin() };
	let output = resolve_document(&path, &processors, &resolve_options(max_depth))?;
	print_json(&output, compact)
}

pub(crate) fn resolve_document(path: &Path, processors: &[Rc<dyn Processor>], options: &ResolveOptions) -> Result<serde_json::Value> {
	let mut tree = load_tree(path)?;
	apply_all(&tree, processors)?;
	resolve_value(&mut tree, options)?;
	Ok(tree.to_json()?)
}

#[cfg(test)]
mod tests;
