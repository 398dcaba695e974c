use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /* expected and normal business logic related errors: a required form field is missing.
       Their display text is what the user gets to read. */

    #[error("No file provided")]
    NoFileProvided,
    #[error("No file selected")]
    NoFileSelected,
    #[error("No checksum provided")]
    NoChecksumProvided,
    #[error("No password provided")]
    NoPasswordProvided,
    #[error("No text provided")]
    NoTextProvided,
    #[error("No encrypted data provided")]
    NoEncryptedData,
    #[error("No salt provided")]
    NoSaltProvided,
    #[error("No email provided")]
    NoEmailProvided,

    /// The server answered with an error body.
    #[error("{error}")]
    Remote {
        error: String,
        message: Option<String>,
    },

    /* Execution errors which interrupted request processing.
       The outermost context of the report becomes the `error` field of the reply and
       the root cause becomes its `message`, similar to an http 500. */
    #[error("{0:#}")]
    ServerSideError(
        #[cfg_attr(feature = "server", from)]
        eyre::Report
    ),

    #[error("{0:#}")]
    ClientSideError(
        #[cfg_attr(all(feature = "client", not(feature = "server")), from)] // the negative condition is only there to not confuse rust-analyzer which enable all features at once
        eyre::Report
    ),
}

impl Error {
    /// Missing or empty inputs, the caller is at fault.
    pub fn is_business(&self) -> bool {
        !matches!(self, Error::ServerSideError(_) | Error::ClientSideError(_) | Error::Remote { .. })
    }

    pub fn to_body(&self) -> ErrorBody {
        match self {
            Error::ServerSideError(report) => ErrorBody {
                error: report.to_string(),
                message: Some(report.root_cause().to_string()),
            },
            Error::Remote { error, message } => ErrorBody {
                error: error.clone(),
                message: message.clone(),
            },
            e => ErrorBody {
                error: e.to_string(),
                message: None,
            },
        }
    }
}

/// JSON shape of every failed reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ErrorBody> for Error {
    fn from(body: ErrorBody) -> Self {
        Error::Remote {
            error: body.error,
            message: body.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;

    #[test]
    fn business_errors_serialize_without_message() {
        let body = Error::NoSaltProvided.to_body();
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({"error": "No salt provided"}));
        assert!(Error::NoSaltProvided.is_business());
    }

    #[test]
    fn server_side_error_splits_context_and_cause() {
        let report = Err::<(), _>(eyre::eyre!("Invalid padding"))
            .wrap_err("Error decrypting text")
            .unwrap_err();
        let e = Error::ServerSideError(report);
        assert!(!e.is_business());
        let body = e.to_body();
        assert_eq!(body.error, "Error decrypting text");
        assert_eq!(body.message.as_deref(), Some("Invalid padding"));
    }

    #[test]
    fn remote_error_keeps_server_text() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"No file selected"}"#).unwrap();
        let e = Error::from(body.clone());
        assert_eq!(e.to_string(), "No file selected");
        assert_eq!(e.to_body(), body);
    }
}
