use serde::{Deserialize, Serialize};

use super::{Endpoint, Form, Method, Result};

/// Educational description of a digest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HashAlgorithmInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub use_case: String,
    pub security_level: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HashAlgorithms;
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HashAlgorithmsRet {
    pub algorithms: Vec<HashAlgorithmInfo>,
}
impl Endpoint for HashAlgorithms {
    const PATH: &'static str = "hash-algorithms";
    const DISPLAY_NAME: &'static str = "HashAlgorithms";
    const METHOD: Method = Method::Get;
    type Ret = HashAlgorithmsRet;

    fn into_form(self) -> Form {
        Form::new()
    }

    fn from_form(_form: Form) -> Result<Self> {
        Ok(Self)
    }
}
