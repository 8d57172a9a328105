// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # app-utils
//!
//! Utility modules for configuration and match suites.
//!
//! This crate provides non-core features:
//! - TOML settings (parse limits and output preferences)
//! - YAML match suites: named rule/query pairs with an expected decision

#![forbid(unsafe_code)]

pub mod error;

pub mod config {
    //! TOML settings shared by the command-line tools
    //!
    //! ```toml
    //! [limits]
    //! max_depth = 32
    //! allow_empty_atoms = false
    //!
    //! [output]
    //! color = false
    //! format = "json"
    //! ```

    use super::error::{Error, Result};
    use core_sexp::{ParseLimits, MAX_NESTING_DEPTH};
    use serde::{Deserialize, Serialize};
    use std::path::Path;

    /// How results are rendered
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum OutputFormat {
        /// Human-readable text
        #[default]
        Text,
        /// One JSON document per result
        Json,
    }

    /// Output preferences
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    pub struct OutputSettings {
        /// Colorize terminal output
        pub color: bool,
        /// Result format
        pub format: OutputFormat,
    }

    impl Default for OutputSettings {
        fn default() -> Self {
            Self {
                color: true,
                format: OutputFormat::Text,
            }
        }
    }

    /// Top-level settings file
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    pub struct Settings {
        /// Parser and matcher limits
        pub limits: ParseLimits,
        /// Output preferences
        pub output: OutputSettings,
    }

    impl Settings {
        /// Parse and validate settings from TOML text
        pub fn from_toml(input: &str) -> Result<Self> {
            let settings: Self = toml::from_str(input)?;
            settings.validate()?;
            Ok(settings)
        }

        /// Read, parse and validate a settings file
        pub fn load(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let input = std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let settings = Self::from_toml(&input)?;
            tracing::debug!(path = %path.display(), "settings loaded");
            Ok(settings)
        }

        /// Check that every limit is usable
        pub fn validate(&self) -> Result<()> {
            let limits = &self.limits;
            if limits.validate().is_err() {
                return Err(Error::InvalidConfig(format!(
                    "limits.max_depth must be within 1..={}, got {}",
                    MAX_NESTING_DEPTH, limits.max_depth
                )));
            }
            if limits.max_input_length == 0 {
                return Err(Error::InvalidConfig(
                    "limits.max_input_length must be positive".into(),
                ));
            }
            if limits.max_atom_length == 0 {
                return Err(Error::InvalidConfig(
                    "limits.max_atom_length must be positive".into(),
                ));
            }
            Ok(())
        }
    }
}

pub mod suite {
    //! YAML match suites
    //!
    //! A suite lists rule/query pairs in canonical text and the decision each
    //! pair is expected to produce.
    //!
    //! ```yaml
    //! name: fruit policy
    //! cases:
    //!   - name: apple allowed
    //!     rule: "(5:fruit(1:*3:set5:apple6:orange))"
    //!     query: "(5:fruit5:apple)"
    //!     expect: allow
    //!   - name: pear denied
    //!     rule: "(5:fruit(1:*3:set5:apple6:orange))"
    //!     query: "(5:fruit4:pear)"
    //!     expect: deny
    //! ```

    use super::error::{Error, Result};
    use core_sexp::{parse_with, Decision, Matcher, ParseLimits};
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::path::Path;

    /// Expected result of a case
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Expectation {
        /// The query must satisfy the rule
        Allow,
        /// The query must not satisfy the rule
        Deny,
        /// Either side must fail to parse, or the pair must be incomparable
        Error,
    }

    /// One rule/query pair
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct Case {
        /// Case label
        pub name: String,
        /// Rule in canonical text
        pub rule: String,
        /// Query in canonical text
        pub query: String,
        /// Expected result
        pub expect: Expectation,
    }

    /// A named list of cases
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct Suite {
        /// Suite label
        #[serde(default)]
        pub name: Option<String>,
        /// Cases in file order
        pub cases: Vec<Case>,
    }

    /// What a case actually produced
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(tag = "result", rename_all = "lowercase")]
    pub enum Outcome {
        /// Query satisfied the rule
        Allow,
        /// Query did not satisfy the rule
        Deny {
            /// Denial error, if one was raised
            reason: Option<String>,
        },
        /// Parse failure or incomparable pair
        Error {
            /// Error message
            message: String,
        },
    }

    impl Outcome {
        fn satisfies(&self, expect: Expectation) -> bool {
            matches!(
                (self, expect),
                (Self::Allow, Expectation::Allow)
                    | (Self::Deny { .. }, Expectation::Deny)
                    | (Self::Error { .. }, Expectation::Error)
            )
        }
    }

    impl fmt::Display for Outcome {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Allow => write!(f, "allow"),
                Self::Deny { reason: None } => write!(f, "deny"),
                Self::Deny {
                    reason: Some(reason),
                } => write!(f, "deny ({})", reason),
                Self::Error { message } => write!(f, "error ({})", message),
            }
        }
    }

    /// Result of running one case
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct CaseResult {
        /// Case label
        pub name: String,
        /// Expected result
        pub expected: Expectation,
        /// Actual result
        pub outcome: Outcome,
        /// Whether the outcome matched the expectation
        pub passed: bool,
    }

    /// Results of a whole suite
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Report {
        /// Suite label
        pub name: Option<String>,
        /// Per-case results in file order
        pub results: Vec<CaseResult>,
    }

    impl Report {
        /// Number of passing cases
        pub fn passed(&self) -> usize {
            self.results.iter().filter(|r| r.passed).count()
        }

        /// Number of failing cases
        pub fn failed(&self) -> usize {
            self.results.len() - self.passed()
        }

        /// Whether every case passed
        pub fn all_passed(&self) -> bool {
            self.results.iter().all(|r| r.passed)
        }
    }

    impl Suite {
        /// Parse a suite from YAML text
        pub fn from_yaml(input: &str) -> Result<Self> {
            let suite: Self = serde_yaml::from_str(input)?;
            if suite.cases.is_empty() {
                return Err(Error::InvalidSuite("suite has no cases".into()));
            }
            Ok(suite)
        }

        /// Read and parse a suite file
        pub fn load(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let input = std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_yaml(&input)
        }

        /// Evaluate every case with the given limits
        pub fn run(&self, limits: &ParseLimits) -> Report {
            let matcher = Matcher::from_limits(limits);
            let results = self
                .cases
                .iter()
                .map(|case| {
                    let outcome = evaluate(case, limits, &matcher);
                    let passed = outcome.satisfies(case.expect);
                    tracing::debug!(case = %case.name, %outcome, passed, "case evaluated");
                    CaseResult {
                        name: case.name.clone(),
                        expected: case.expect,
                        outcome,
                        passed,
                    }
                })
                .collect();

            Report {
                name: self.name.clone(),
                results,
            }
        }
    }

    fn evaluate(case: &Case, limits: &ParseLimits, matcher: &Matcher) -> Outcome {
        let parsed = parse_with(case.rule.as_bytes(), limits)
            .map_err(|e| format!("rule: {}", e))
            .and_then(|rule| {
                parse_with(case.query.as_bytes(), limits)
                    .map(|query| (rule, query))
                    .map_err(|e| format!("query: {}", e))
            });
        let (rule, query) = match parsed {
            Ok(pair) => pair,
            Err(message) => return Outcome::Error { message },
        };

        match matcher.authorize(&query, &rule) {
            Ok(Decision::Allow) => Outcome::Allow,
            Ok(Decision::Deny(reason)) => Outcome::Deny {
                reason: reason.map(|r| r.to_string()),
            },
            Err(e) => Outcome::Error {
                message: e.to_string(),
            },
        }
    }
}

/// Re-export commonly used types
pub use config::{OutputFormat, OutputSettings, Settings};
pub use error::{Error, Result};
pub use suite::{Case, CaseResult, Expectation, Outcome, Report, Suite};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SUITE: &str = r#"
name: certificates
cases:
  - name: empty subject accepts alice
    rule: "(11:certificate(6:issuer3:bob)(7:subject))"
    query: "(11:certificate(6:issuer3:bob)(7:subject5:alice))"
    expect: allow
  - name: level below minimum
    rule: "(5:level(1:*5:range7:numeric2:ge3:100))"
    query: "(5:level2:99)"
    expect: deny
  - name: pear not in set
    rule: "(5:fruit(1:*3:set5:apple6:orange))"
    query: "(5:fruit4:pear)"
    expect: deny
  - name: unbalanced query
    rule: "(5:fruit)"
    query: "(5:fruit"
    expect: error
  - name: wrong expectation
    rule: "(1:a)"
    query: "(1:a)"
    expect: deny
"#;

    #[test]
    fn test_settings_defaults_from_empty_toml() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.output.color);
    }

    #[test]
    fn test_settings_partial_tables() {
        let settings = Settings::from_toml(
            r#"
[limits]
max_depth = 16

[output]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(settings.limits.max_depth, 16);
        assert_eq!(
            settings.limits.max_input_length,
            core_sexp::DEFAULT_MAX_INPUT_LENGTH
        );
        assert_eq!(settings.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_settings_rejects_bad_values() {
        assert!(matches!(
            Settings::from_toml("[limits]\nmax_depth = 0\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Settings::from_toml("[limits]\nmax_depth = 1000\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Settings::from_toml("[limits]\nmax_input_length = 0\n"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Settings::from_toml("[limits]\nmax_deepness = 3\n"),
            Err(Error::TomlParseError(_))
        ));
    }

    #[test]
    fn test_settings_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ncolor = false").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert!(!settings.output.color);

        let missing = file.path().with_extension("missing");
        assert!(matches!(Settings::load(missing), Err(Error::Io { .. })));
    }

    #[test]
    fn test_suite_run() {
        let suite = Suite::from_yaml(SUITE).unwrap();
        assert_eq!(suite.name.as_deref(), Some("certificates"));

        let report = suite.run(&core_sexp::ParseLimits::default());
        assert_eq!(report.results.len(), 5);
        assert_eq!(report.passed(), 4);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());

        assert_eq!(report.results[0].outcome, Outcome::Allow);
        assert_eq!(report.results[1].outcome, Outcome::Deny { reason: None });
        assert!(matches!(
            &report.results[2].outcome,
            Outcome::Deny { reason: Some(_) }
        ));
        assert!(matches!(report.results[3].outcome, Outcome::Error { .. }));
        assert!(!report.results[4].passed);
    }

    #[test]
    fn test_suite_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.yaml");
        std::fs::write(&path, SUITE).unwrap();

        let suite = Suite::load(&path).unwrap();
        assert_eq!(suite.cases.len(), 5);
    }

    #[test]
    fn test_suite_rejects_empty_and_unknown_fields() {
        assert!(matches!(
            Suite::from_yaml("cases: []"),
            Err(Error::InvalidSuite(_))
        ));
        assert!(matches!(
            Suite::from_yaml(
                "cases:\n  - name: x\n    rule: \"1:a\"\n    query: \"1:a\"\n    expect: maybe\n"
            ),
            Err(Error::YamlParseError(_))
        ));
    }
}
