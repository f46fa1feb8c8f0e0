//! Declarative operation table
//!
//! Every bridge operation is a row: leading flag tokens plus an ordered list
//! of parameter specs. Argument emission walks the specs in table order, so
//! the order of the resulting command line never depends on how a request
//! was assembled.

use std::fmt;

/// How a parameter is validated and emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free text, emitted as `--flag "value"`.
    Text,
    /// Absolute http/https URL, emitted as `--flag "value"`.
    Url,
    /// Path that must exist as a regular file, emitted as `--flag "value"`.
    File,
    /// Path that must exist as a directory, emitted as `--flag "value"`.
    Directory,
    /// Boolean, emitted as a bare `--flag` only when true.
    Switch,
}

/// One parameter row of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub flag: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    const fn required(name: &'static str, flag: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            flag,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, flag: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            flag,
            kind,
            required: false,
        }
    }
}

/// Static description of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub leading: &'static [&'static str],
    pub params: &'static [ParamSpec],
}

impl OperationSpec {
    /// Look up a parameter row by name.
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

const API_URL_PARAM: ParamSpec = ParamSpec::optional("api_url", "--api-url", ParamKind::Url);
const TOKEN_PARAM: ParamSpec = ParamSpec::optional("token", "--token", ParamKind::Text);
const CONFIG_ID_PARAM: ParamSpec = ParamSpec::optional("config_id", "--config-id", ParamKind::Text);

const NO_PARAMS: &[ParamSpec] = &[];
const REMOTE_PARAMS: &[ParamSpec] = &[API_URL_PARAM, TOKEN_PARAM];

static CONFIGURE: OperationSpec = OperationSpec {
    name: "configure",
    leading: &["--configure"],
    params: NO_PARAMS,
};

static LIST_CONFIGS: OperationSpec = OperationSpec {
    name: "list-configs",
    leading: &["--list-configs"],
    params: NO_PARAMS,
};

static REMOVE_CONFIG: OperationSpec = OperationSpec {
    name: "remove-config",
    leading: &["--remove-config"],
    params: NO_PARAMS,
};

static SHOW_SCHEMA: OperationSpec = OperationSpec {
    name: "show-schema",
    leading: &["--show-schema"],
    params: &[CONFIG_ID_PARAM],
};

static EXTRACT_SCHEMA: OperationSpec = OperationSpec {
    name: "extract-schema",
    leading: &["--extract-schema"],
    params: &[
        CONFIG_ID_PARAM,
        ParamSpec::optional("output_file", "--output-file", ParamKind::Text),
    ],
};

static VERSION: OperationSpec = OperationSpec {
    name: "version",
    leading: &["--version"],
    params: NO_PARAMS,
};

static HELP: OperationSpec = OperationSpec {
    name: "help",
    leading: &["--help"],
    params: NO_PARAMS,
};

static SET_TOKEN: OperationSpec = OperationSpec {
    name: "set-token",
    leading: &[],
    params: &[ParamSpec::required("token", "--token", ParamKind::Text)],
};

static SET_API_KEY: OperationSpec = OperationSpec {
    name: "set-api-key",
    leading: &[],
    params: &[ParamSpec::required("api_key", "--api-key", ParamKind::Text)],
};

static API_URL: OperationSpec = OperationSpec {
    name: "api-url",
    leading: &[],
    params: &[ParamSpec::required("url", "--api-url", ParamKind::Url)],
};

static SSO_URL: OperationSpec = OperationSpec {
    name: "sso-url",
    leading: &[],
    params: &[ParamSpec::required("url", "--sso-url", ParamKind::Url)],
};

static LOGIN: OperationSpec = OperationSpec {
    name: "login",
    leading: &["--login"],
    params: &[
        ParamSpec::required("username", "--username", ParamKind::Text),
        ParamSpec::required("password", "--password", ParamKind::Text),
    ],
};

static LOGIN_WITH_TOKEN: OperationSpec = OperationSpec {
    name: "login-with-token",
    leading: &["--login"],
    params: &[ParamSpec::required("token", "--token", ParamKind::Text)],
};

static TEST_AUTH: OperationSpec = OperationSpec {
    name: "test-auth",
    leading: &["--test-auth"],
    params: REMOTE_PARAMS,
};

static CHECK_STATUS: OperationSpec = OperationSpec {
    name: "check-status",
    leading: &["--check-status"],
    params: REMOTE_PARAMS,
};

static TASK_STATUS: OperationSpec = OperationSpec {
    name: "task-status",
    leading: &["--task-status"],
    params: &[
        ParamSpec::required("task_id", "--task-id", ParamKind::Text),
        API_URL_PARAM,
        TOKEN_PARAM,
    ],
};

static VALIDATE_CONFIG: OperationSpec = OperationSpec {
    name: "validate-config",
    leading: &["--validate-config"],
    params: REMOTE_PARAMS,
};

static VALIDATE_CONFIG_FILE: OperationSpec = OperationSpec {
    name: "validate-config-file",
    leading: &["--validate-config"],
    params: &[ParamSpec::required("path", "--config-file", ParamKind::File)],
};

static TEST_CONNECTION: OperationSpec = OperationSpec {
    name: "test-connection",
    leading: &["--test-connection"],
    params: &[
        API_URL_PARAM,
        TOKEN_PARAM,
        ParamSpec::optional("full_diagnostics", "--full", ParamKind::Switch),
    ],
};

static EXPORT_CONFIG: OperationSpec = OperationSpec {
    name: "export-config",
    leading: &["--export-config"],
    params: NO_PARAMS,
};

static EXPORT_CONFIG_TO: OperationSpec = OperationSpec {
    name: "export-config-to",
    leading: &["--export-config"],
    params: &[
        ParamSpec::required("output_directory", "--output", ParamKind::Directory),
        CONFIG_ID_PARAM,
        ParamSpec::optional("overwrite", "--overwrite", ParamKind::Switch),
    ],
};

/// Logical operations understood by the external program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Configure,
    ListConfigs,
    RemoveConfig,
    ShowSchema,
    ExtractSchema,
    Version,
    Help,
    SetToken,
    SetApiKey,
    ApiUrl,
    SsoUrl,
    Login,
    LoginWithToken,
    TestAuth,
    CheckStatus,
    TaskStatus,
    ValidateConfig,
    ValidateConfigFile,
    TestConnection,
    ExportConfig,
    ExportConfigTo,
}

impl Operation {
    pub const ALL: [Operation; 21] = [
        Operation::Configure,
        Operation::ListConfigs,
        Operation::RemoveConfig,
        Operation::ShowSchema,
        Operation::ExtractSchema,
        Operation::Version,
        Operation::Help,
        Operation::SetToken,
        Operation::SetApiKey,
        Operation::ApiUrl,
        Operation::SsoUrl,
        Operation::Login,
        Operation::LoginWithToken,
        Operation::TestAuth,
        Operation::CheckStatus,
        Operation::TaskStatus,
        Operation::ValidateConfig,
        Operation::ValidateConfigFile,
        Operation::TestConnection,
        Operation::ExportConfig,
        Operation::ExportConfigTo,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        match self {
            Operation::Configure => &CONFIGURE,
            Operation::ListConfigs => &LIST_CONFIGS,
            Operation::RemoveConfig => &REMOVE_CONFIG,
            Operation::ShowSchema => &SHOW_SCHEMA,
            Operation::ExtractSchema => &EXTRACT_SCHEMA,
            Operation::Version => &VERSION,
            Operation::Help => &HELP,
            Operation::SetToken => &SET_TOKEN,
            Operation::SetApiKey => &SET_API_KEY,
            Operation::ApiUrl => &API_URL,
            Operation::SsoUrl => &SSO_URL,
            Operation::Login => &LOGIN,
            Operation::LoginWithToken => &LOGIN_WITH_TOKEN,
            Operation::TestAuth => &TEST_AUTH,
            Operation::CheckStatus => &CHECK_STATUS,
            Operation::TaskStatus => &TASK_STATUS,
            Operation::ValidateConfig => &VALIDATE_CONFIG,
            Operation::ValidateConfigFile => &VALIDATE_CONFIG_FILE,
            Operation::TestConnection => &TEST_CONNECTION,
            Operation::ExportConfig => &EXPORT_CONFIG,
            Operation::ExportConfigTo => &EXPORT_CONFIG_TO,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value supplied for a named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Switch(bool),
}

/// A logical operation plus its named parameter values.
///
/// Parameters keep insertion order; setting the same name twice replaces
/// the earlier value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    operation: Operation,
    params: Vec<(String, ParamValue)>,
}

impl OperationRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: Vec::new(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, ParamValue::Text(value.into()));
        self
    }

    /// Set a text parameter only when a value is present.
    pub fn maybe_text(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn switch(mut self, name: &str, on: bool) -> Self {
        self.set(name, ParamValue::Switch(on));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn given_operation_table_when_listing_names_then_all_unique() {
        let names: HashSet<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn given_operation_table_when_checking_params_then_switches_are_optional() {
        for op in Operation::ALL {
            for p in op.spec().params {
                if p.kind == ParamKind::Switch {
                    assert!(!p.required, "{}.{} must be optional", op, p.name);
                }
                assert!(p.flag.starts_with("--"), "{}.{}", op, p.name);
            }
        }
    }

    #[test]
    fn given_both_validate_config_shapes_then_share_leading_flag() {
        assert_eq!(
            Operation::ValidateConfig.spec().leading,
            Operation::ValidateConfigFile.spec().leading
        );
    }

    #[test]
    fn given_both_export_shapes_then_share_leading_flag() {
        assert_eq!(
            Operation::ExportConfig.spec().leading,
            Operation::ExportConfigTo.spec().leading
        );
        assert!(Operation::ExportConfig.spec().params.is_empty());
    }

    #[test]
    fn given_repeated_param_when_set_then_replaces_in_place() {
        let req = OperationRequest::new(Operation::Login)
            .text("username", "alice")
            .text("password", "x")
            .text("username", "bob");

        assert_eq!(req.params().len(), 2);
        assert_eq!(req.params()[0].0, "username");
        assert_eq!(req.get("username"), Some(&ParamValue::Text("bob".into())));
    }

    #[test]
    fn given_none_when_maybe_text_then_param_absent() {
        let req = OperationRequest::new(Operation::TestAuth).maybe_text("token", None);
        assert!(req.get("token").is_none());
    }
}
