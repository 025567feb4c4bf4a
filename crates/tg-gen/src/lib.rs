//! `tg-gen` — configuration and orchestration of the generator pipeline.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`config`]    | `GeneratorConfig`: JSON loading, defaults, validation  |
//! | [`builder`]   | `GeneratorBuilder`                                     |
//! | [`generator`] | `Generator`, `Network`                                 |
//! | [`report`]    | `GenerationReport`                                     |
//! | [`error`]     | `ConfigError`, `GenError`, `GenResult`                 |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tg_gen::{GeneratorBuilder, GeneratorConfig};
//!
//! let config = GeneratorConfig::from_json_str(r#"{ "seed": 7 }"#)?;
//! let network = GeneratorBuilder::new(config).build()?.run()?;
//! if !network.report.is_complete() {
//!     eprintln!("shortfalls: {:?}", network.report.shortfalls);
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod report;


pub use builder::GeneratorBuilder;
pub use config::GeneratorConfig;
pub use error::{ConfigError, GenError, GenResult};
pub use generator::{Generator, Network};
pub use report::GenerationReport;
