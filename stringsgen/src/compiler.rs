//! One-call entry points running the whole pipeline.

use std::{collections::BTreeMap, path::Path};

use tracing::debug;

use crate::{
    error::Error,
    formats::read_raw_strings,
    generator::{GeneratorOptions, SwiftGenerator},
    hierarchy::make_hierarchical,
    parser::parse_items,
    skeleton::{StringsSkeleton, make_skeleton},
    traits::Generator,
};

/// Runs the front half of the pipeline: parse, fold into namespaces and
/// reduce to a skeleton.
pub fn skeleton_for(raw: &BTreeMap<String, String>) -> Result<StringsSkeleton, Error> {
    let items = parse_items(raw)?;
    let strings = make_hierarchical(items)?;
    let skeleton = make_skeleton(&strings);
    debug!(
        pluralized = skeleton.uses_pluralized_strings(),
        "extracted skeleton"
    );
    Ok(skeleton)
}

/// Compiles a raw string table into Swift source.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use stringsgen::{GeneratorOptions, compile};
///
/// let raw = BTreeMap::from([("home.title".to_string(), "Welcome".to_string())]);
/// let swift = compile(&raw, &GeneratorOptions::default())?;
/// assert!(swift.contains("enum Home {"));
/// # Ok::<(), stringsgen::Error>(())
/// ```
pub fn compile(raw: &BTreeMap<String, String>, options: &GeneratorOptions) -> Result<String, Error> {
    let skeleton = skeleton_for(raw)?;
    let output = SwiftGenerator::new(options.clone()).generate(&skeleton);
    debug!(bytes = output.len(), type_name = %options.type_name, "generated Swift source");
    Ok(output)
}

/// Reads `path` (format inferred from its extension) and compiles it.
pub fn compile_file<P: AsRef<Path>>(path: P, options: &GeneratorOptions) -> Result<String, Error> {
    let raw = read_raw_strings(&path)?;
    debug!(path = %path.as_ref().display(), entries = raw.len(), "read input");
    compile(&raw, options)
}
