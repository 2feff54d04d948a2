// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::Environment;

/// The variable that configures [`MessageSettings::max_body_size`].
pub const MAX_BODY_SIZE_VARIABLE: &str = "SERVENTE_MAX_BODY_SIZE";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSettings {
    /// If the request body is larger than this number of bytes, reading it
    /// fails instead of buffering it. `None` means no limit.
    pub max_body_size: Option<u64>,
}

impl MessageSettings {
    /// Reads the settings from the environment of the invocation. Malformed
    /// values are ignored, leaving the default in place.
    pub fn from_env_snapshot(environment: &Environment) -> Self {
        let mut settings = Self::default();

        if let Some(value) = environment.get(MAX_BODY_SIZE_VARIABLE) {
            match value.trim().parse() {
                Ok(size) => settings.max_body_size = Some(size),
                Err(_) => tracing::warn!(value, "ignoring malformed {}", MAX_BODY_SIZE_VARIABLE),
            }
        }

        settings
    }
}
