//! Environment expansion over the string fields of [`Config`](crate::Config).
//!
//! Expansion runs field by field and keeps going after a miss, so a config
//! that references several unset variables reports all of them in a single
//! [`ConfigError::EnvVar`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// `${NAME}` without a `:-default` fallback.
static REQUIRED_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// A `${NAME}` reference with no value and no default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsetVar {
    /// Config key holding the reference (e.g. `export.pandoc_path`).
    pub field: String,
    /// Variable name.
    pub name: String,
}

impl fmt::Display for UnsetVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} references ${{{}}}", self.field, self.name)
    }
}

/// Variable lookup in the process environment.
pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Expands `${VAR}` and `${VAR:-default}` in place, collecting misses.
pub(crate) struct EnvExpansion<F> {
    lookup: F,
    unset: Vec<UnsetVar>,
}

impl<F> EnvExpansion<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub(crate) fn new(lookup: F) -> Self {
        Self {
            lookup,
            unset: Vec::new(),
        }
    }

    /// Expand a required string field.
    ///
    /// The value is left untouched when any of its required variables is
    /// missing.
    pub(crate) fn string(&mut self, field: &str, value: &mut String) {
        if !value.contains("${") {
            return;
        }

        let before = self.unset.len();
        for caps in REQUIRED_VAR.captures_iter(value) {
            let name = &caps[1];
            if (self.lookup)(name).is_none() {
                self.unset.push(UnsetVar {
                    field: field.to_owned(),
                    name: name.to_owned(),
                });
            }
        }
        if self.unset.len() > before {
            return;
        }

        let expanded = shellexpand::env_with_context_no_errors(value.as_str(), |name| {
            (self.lookup)(name)
        })
        .into_owned();
        *value = expanded;
    }

    /// Expand an optional field when present.
    pub(crate) fn optional(&mut self, field: &str, value: &mut Option<String>) {
        if let Some(inner) = value.as_mut() {
            self.string(field, inner);
        }
    }

    /// Expand every entry of a list field; entries are keyed `field[i]`.
    pub(crate) fn list(&mut self, field: &str, values: &mut [String]) {
        for (i, value) in values.iter_mut().enumerate() {
            self.string(&format!("{field}[{i}]"), value);
        }
    }

    /// Fail with every unset reference seen so far.
    pub(crate) fn finish(self) -> Result<(), ConfigError> {
        if self.unset.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::EnvVar(self.unset))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(name: &str) -> Option<String> {
        match name {
            "CHROME_HOME" => Some("/opt/chrome".to_owned()),
            "REF_DIR" => Some("/srv/templates".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn test_plain_value_unchanged() {
        let mut expansion = EnvExpansion::new(env);
        let mut value = "/usr/bin/pandoc".to_owned();

        expansion.string("export.pandoc_path", &mut value);

        assert_eq!(value, "/usr/bin/pandoc");
        assert!(expansion.finish().is_ok());
    }

    #[test]
    fn test_set_var_and_default() {
        let mut expansion = EnvExpansion::new(env);
        let mut chrome = Some("${CHROME_HOME}/chrome".to_owned());
        let mut format = "${MDOC_FORMAT:-docx}".to_owned();

        expansion.optional("render.chrome_path", &mut chrome);
        expansion.string("export.format", &mut format);

        assert_eq!(chrome.as_deref(), Some("/opt/chrome/chrome"));
        assert_eq!(format, "docx");
        assert!(expansion.finish().is_ok());
    }

    #[test]
    fn test_list_entries_expanded() {
        let mut expansion = EnvExpansion::new(env);
        let mut args = vec![
            "--toc".to_owned(),
            "--reference-doc=${REF_DIR}/ref.docx".to_owned(),
        ];

        expansion.list("export.extra_args", &mut args);

        assert_eq!(args, vec!["--toc", "--reference-doc=/srv/templates/ref.docx"]);
    }

    #[test]
    fn test_all_unset_vars_reported() {
        let mut expansion = EnvExpansion::new(env);
        let mut pandoc = "${PANDOC_BIN}".to_owned();
        let mut args = vec!["--data-dir=${DATA_DIR}".to_owned()];

        expansion.string("export.pandoc_path", &mut pandoc);
        expansion.list("export.extra_args", &mut args);
        let err = expansion.finish().unwrap_err();

        let ConfigError::EnvVar(unset) = &err else {
            panic!("expected EnvVar, got {err:?}");
        };
        assert_eq!(
            unset,
            &vec![
                UnsetVar {
                    field: "export.pandoc_path".to_owned(),
                    name: "PANDOC_BIN".to_owned(),
                },
                UnsetVar {
                    field: "export.extra_args[0]".to_owned(),
                    name: "DATA_DIR".to_owned(),
                },
            ]
        );
        assert_eq!(pandoc, "${PANDOC_BIN}");
        assert_eq!(
            err.to_string(),
            "Unset environment variables: export.pandoc_path references ${PANDOC_BIN}, \
             export.extra_args[0] references ${DATA_DIR}"
        );
    }

    #[test]
    fn test_bare_dollar_kept_when_unset() {
        let mut expansion = EnvExpansion::new(env);
        let mut value = "C:/tools/$pandoc".to_owned();

        expansion.string("export.pandoc_path", &mut value);

        assert_eq!(value, "C:/tools/$pandoc");
        assert!(expansion.finish().is_ok());
    }
}
