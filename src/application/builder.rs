//! Validation phase: operation request → argument vector
//!
//! Nothing here spawns a process. A request either yields a complete
//! `ArgumentVector` or the first `ValidationError` in table order.

use std::path::Path;

use tracing::debug;

use crate::domain::{
    is_blank, require_http_url, Argument, ArgumentVector, OperationRequest, ParamKind, ParamSpec,
    ParamValue, ValidationError,
};
use crate::infrastructure::traits::FileSystem;

/// Build the argument vector for a request.
///
/// Leading flags come first, then parameters in the order the operation
/// table lists them. Optional parameters that are absent or blank are
/// omitted entirely; switches emit their bare flag only when true.
pub fn build_arguments(
    request: &OperationRequest,
    fs: &dyn FileSystem,
) -> Result<ArgumentVector, ValidationError> {
    let operation = request.operation();
    let spec = operation.spec();

    for (name, value) in request.params() {
        let Some(param) = spec.param(name) else {
            return Err(ValidationError::UnknownParam {
                operation: operation.name().to_string(),
                param: name.clone(),
            });
        };
        check_value_type(param, value)?;
    }

    let mut argv: ArgumentVector = spec.leading.iter().map(|f| Argument::flag(*f)).collect();

    for param in spec.params {
        match (param.kind, request.get(param.name)) {
            (ParamKind::Switch, Some(ParamValue::Switch(true))) => {
                argv.push(Argument::flag(param.flag));
            }
            (ParamKind::Switch, _) => {}
            (_, Some(ParamValue::Text(value))) if !is_blank(value) => {
                check_value(param, value, fs)?;
                argv.push(Argument::quoted(param.flag, value.as_str()));
            }
            _ if param.required => {
                return Err(ValidationError::Blank {
                    param: param.name.to_string(),
                });
            }
            _ => {}
        }
    }

    debug!("build_arguments: {} -> {}", operation, argv);
    Ok(argv)
}

fn check_value_type(param: &ParamSpec, value: &ParamValue) -> Result<(), ValidationError> {
    let expected = match (param.kind, value) {
        (ParamKind::Switch, ParamValue::Switch(_)) => return Ok(()),
        (ParamKind::Switch, ParamValue::Text(_)) => "switch",
        (_, ParamValue::Text(_)) => return Ok(()),
        (_, ParamValue::Switch(_)) => "text",
    };
    Err(ValidationError::TypeMismatch {
        param: param.name.to_string(),
        expected: expected.to_string(),
    })
}

fn check_value(param: &ParamSpec, value: &str, fs: &dyn FileSystem) -> Result<(), ValidationError> {
    match param.kind {
        ParamKind::Url => require_http_url(param.name, value),
        ParamKind::File => {
            let path = Path::new(value);
            if fs.is_file(path) {
                Ok(())
            } else {
                Err(ValidationError::FileNotFound(path.to_path_buf()))
            }
        }
        ParamKind::Directory => {
            let path = Path::new(value);
            if fs.is_dir(path) {
                Ok(())
            } else {
                Err(ValidationError::DirectoryNotFound(path.to_path_buf()))
            }
        }
        ParamKind::Text | ParamKind::Switch => Ok(()),
    }
}
