//! LaTeX renderer for generating Awesome-CV source from a résumé record
//!
//! This module takes a ResumeRecord and a Theme and produces the complete
//! document source. It performs no I/O.

pub mod config;
pub mod latex;

pub use config::{FontSize, FontSizeError, HeaderAlignment, LatexConfig, Paper};
pub use latex::{escape_latex, render_latex, render_markup};
