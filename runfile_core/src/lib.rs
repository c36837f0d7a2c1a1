//! `runfile_core` turns a single-file C# program that declares its build
//! configuration in `#:` directives into two artifacts: a project file for the
//! build host, and the same source with the directives removed so the compiler
//! can process it.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text
//!   → Line classifier (marker / directive / blank / comment / code, one pass)
//!   → Region boundary (the first line of code closes the directive region)
//!   → Directive parser (keyword, name, value, name validation)
//!   → Model builder (ordered SDKs, properties and packages)
//!   → Emitter (project file)  +  Rewriter (residual source)
//! ```
//!
//! Problems never abort the scan. They are collected as
//! [`DirectiveDiagnostic`]s and returned alongside the outputs.
//!
//! ## Directives
//!
//! ```csharp
//! #!/usr/bin/env dotnet
//! #:sdk Microsoft.NET.Sdk.Web
//! #:property LangVersion preview
//! #:package Humanizer 2.14.1
//!
//! Console.WriteLine("Hello");
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use runfile_core::ConvertOptions;
//! use runfile_core::convert;
//!
//! let result = convert("#:package Humanizer 2.14.1\nSay();\n", &ConvertOptions::default());
//! assert!(result.is_ok());
//! assert_eq!(result.source.as_deref(), Some("Say();\n"));
//! assert!(result.project.unwrap().contains("Include=\"Humanizer\""));
//! ```

pub use classifier::*;
pub use config::*;
pub use converter::*;
pub use diagnostics::*;
pub use directive::*;
pub use emitter::*;
pub use error::*;
pub use model::*;
pub use rewriter::*;

mod classifier;
pub mod config;
mod converter;
mod diagnostics;
mod directive;
mod emitter;
#[allow(unused_assignments)]
mod error;
pub(crate) mod lexer;
mod model;
mod rewriter;
