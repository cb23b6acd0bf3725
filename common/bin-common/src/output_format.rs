// Copyright 2023-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    pub fn is_text(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }

    pub fn format<T: Serialize + ToString>(&self, data: &T) -> String {
        match self {
            OutputFormat::Text => data.to_string(),
            OutputFormat::Json => serde_json::to_string(data)
                .unwrap_or_else(|err| format!("failed to serialize the output data: {err}")),
        }
    }

    pub fn to_stdout<T: Serialize + ToString>(&self, data: &T) {
        println!("{}", self.format(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Dummy {
        field: u32,
    }

    impl Display for Dummy {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "field is {}", self.field)
        }
    }

    #[test]
    fn formatting() {
        let dummy = Dummy { field: 42 };
        assert_eq!(OutputFormat::Text.format(&dummy), "field is 42");
        assert_eq!(OutputFormat::Json.format(&dummy), r#"{"field":42}"#);
    }

    #[test]
    fn parsing_from_cli_values() {
        assert_eq!(
            OutputFormat::from_str("json", true).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(OutputFormat::default().to_string(), "text");
    }
}
