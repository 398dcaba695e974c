use serde::{de::DeserializeOwned, Deserialize, Serialize};

use tracing::debug;

use super::{form::Form, ErrorBody, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One JSON endpoint under `/api/`.
pub trait Endpoint: Sized + Send + 'static {
    /// Path segment after `/api/`.
    const PATH: &'static str;
    const DISPLAY_NAME: &'static str;
    const METHOD: Method = Method::Post;
    type Ret: Serialize + DeserializeOwned + Send; // our deserialized structs will need to be self owned to be easily given back from calls

    fn into_form(self) -> Form;
    fn from_form(form: Form) -> Result<Self>;
}

/// Replies are checked for an `error` field before the success shape is tried.
#[derive(Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum Reply<T> {
    Failure(ErrorBody),
    Success(T),
}

impl<T> Reply<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            Reply::Failure(body) => {
                debug!(error = %body.error, "error reply");
                Err(body.into())
            }
            Reply::Success(ret) => Ok(ret),
        }
    }
}
