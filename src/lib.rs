// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! This crate contains the HTTP message model for gateway (CGI-style)
//! programs: a [`Request`] materialized from the meta-variables, query and
//! form data of one invocation, and a [`Response`] that is written to an
//! [`OutputBoundary`] at most once.

pub mod body;
pub mod config;
pub mod environment;
pub mod error;
pub mod header_map;
pub mod header_name;
pub mod message;
pub mod method;
pub mod output;
pub mod parameters;
pub mod request;
pub mod response;
pub mod status;
pub mod value;

pub use body::*;
pub use config::*;
pub use environment::*;
pub use error::*;
pub use header_map::*;
pub use header_name::*;
pub use message::*;
pub use method::*;
pub use output::*;
pub use parameters::*;
pub use request::*;
pub use response::*;
pub use status::*;
pub use value::*;
