#![forbid(unsafe_code)]
//! Compiler from localized string tables to typed Swift accessors.
//!
//! Values may use a small template syntax (`{name}` parameters, `{{` / `}}`
//! escapes, a `{#n}` key parameter selecting the plural form) and keys may
//! carry a plural suffix (`apples$one`, `apples$other`). Dotted keys become
//! nested namespaces.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsgen::{GeneratorOptions, compile_file};
//!
//! let swift = compile_file("en.lproj/Localizable.strings", &GeneratorOptions::default())?;
//! std::fs::write("Strings.swift", swift)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pipeline
//!
//! - [`formats`]: decode `.strings` / JSON into a flat raw map
//! - [`parser`]: parse values and group plural variants
//! - [`hierarchy`]: fold dotted keys into namespaces
//! - [`skeleton`]: reduce values to parameter lists and category sets
//! - [`generator`]: emit Swift

pub mod compiler;
pub mod error;
pub mod formats;
pub mod generator;
pub mod hierarchy;
pub mod key;
pub mod parser;
pub mod skeleton;
pub mod template;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    compiler::{compile, compile_file, skeleton_for},
    error::Error,
    formats::InputFormat,
    generator::{GeneratorOptions, SwiftGenerator, SwiftVersion, Visibility},
    hierarchy::make_hierarchical,
    key::{Key, KeyComponent, KeyPath, ParameterName},
    parser::parse_items,
    skeleton::{SkeletonItem, SkeletonNamespace, SkeletonValue, StringsSkeleton, make_skeleton},
    template::{TemplateError, parse_value},
    traits::{Generator, Parser},
    types::{Item, Namespace, PluralCategory, Strings, TemplateComponent, Value},
};
