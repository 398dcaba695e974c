use serde::{Deserialize, Serialize};

use super::{Endpoint, Error, Form, Result};

#[derive(Debug, Clone)]
pub struct CheckBreaches {
    pub email: String,
}

/// One breach record, in the field layout breach-monitoring front ends expect.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Breach {
    pub name: String,
    pub title: String,
    pub domain: String,
    pub breach_date: String,
    pub added_date: String,
    pub description: String,
    pub data_classes: Vec<String>,
    pub logo_path: String,
    pub pwn_count: u64,
    pub is_verified: bool,
    #[serde(rename = "demo", default, skip_serializing_if = "std::ops::Not::not")]
    pub demo: bool,
    /// Total hits reported by the lookup, repeated on every record.
    #[serde(rename = "found")]
    pub found: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckBreachesRet {
    pub breaches: Vec<Breach>,
}

/// Error-shaped reply, sent with a 200, when the email field is empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NoEmailRet {
    pub error: String,
    pub breaches: Vec<Breach>,
}

impl Default for NoEmailRet {
    fn default() -> Self {
        Self {
            error: Error::NoEmailProvided.to_string(),
            breaches: vec![],
        }
    }
}

impl Endpoint for CheckBreaches {
    const PATH: &'static str = "check-breaches";
    const DISPLAY_NAME: &'static str = "CheckBreaches";
    type Ret = CheckBreachesRet;

    fn into_form(self) -> Form {
        Form::new().text("email", self.email)
    }

    fn from_form(mut form: Form) -> Result<Self> {
        let email = form.take_non_empty("email").ok_or(Error::NoEmailProvided)?;
        Ok(Self { email })
    }
}
