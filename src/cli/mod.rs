//! # CLI Module
//!
//! Command-line front end for poking at a dispatcher without a network
//! server: build one request, dispatch it, and print what the response
//! would do.
//!
//! ## Commands
//!
//! ### `dispatch`
//!
//! Dispatch a single request against the demo application:
//!
//! ```bash
//! brrtmvc dispatch GET /greet/world
//! brrtmvc dispatch post /login -p user=alice -p password=secret
//! brrtmvc dispatch GET /users/42 -H "Accept-Language: en"
//! ```
//!
//! Options:
//! - `-p, --param <KEY=VALUE>` - Request parameter (repeatable)
//! - `-H, --header <NAME: VALUE>` - Request header (repeatable)
//!
//! ### `routes`
//!
//! List the demo application's routing table in scan order.
//!
//! ## Global Options
//!
//! - `--config <FILE>` - YAML [`RuntimeConfig`](crate::runtime_config::RuntimeConfig);
//!   environment variables are used when omitted
//! - `--templates <DIR>` - Override the template directory
//! - `--log-format <pretty|json>` - Log output format (logs go to stderr,
//!   filtered by `RUST_LOG`, default `info`)
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use brrtmvc::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;
mod demo;

pub use commands::{init_logging, run_cli, Cli, Commands, LogFormat};
pub use demo::demo_dispatcher;
