//! Java language support for mockgen.
//!
//! This crate implements the scaffold engine's host interfaces for Java
//! source trees. It includes:
//! - A declaration-level Java parser (package, imports, types, members)
//! - A class index over project and library source roots
//! - Name resolution against imports, packages and the index
//! - Java naming conventions for variable name suggestions
//! - Compilation units that accept field, method and import insertions

pub mod class;
pub mod error;
pub mod files;
pub mod imports;
pub mod index;
pub mod lexer;
pub mod naming;
pub mod parser;
pub mod project;
pub mod resolve;
pub mod types;
pub mod unit;

pub use class::JavaClass;
pub use error::{JavaError, JavaResult};
pub use imports::JavaImportOrganizer;
pub use index::{ClassIndex, Origin};
pub use project::{JavaField, JavaMethod, JavaProject};
pub use unit::JavaCompilationUnit;
