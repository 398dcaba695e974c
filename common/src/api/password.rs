use serde::{Deserialize, Serialize};

use super::{Endpoint, Error, Form, Result};

#[derive(Debug, Clone)]
pub struct AnalyzePassword {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyzePasswordRet {
    pub strength: i64, // kept wide so an out-of-range score still decodes and renders as Unknown
    pub rating: String,
    pub length: usize,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
    pub entropy: f64,
    pub feedback: Vec<String>,
}

/// Error-shaped reply the analyzer sends, with a 200, when the password field is empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NoPasswordRet {
    pub error: String,
    pub strength: u8,
    pub feedback: Vec<String>,
}

impl Default for NoPasswordRet {
    fn default() -> Self {
        Self {
            error: Error::NoPasswordProvided.to_string(),
            strength: 0,
            feedback: vec!["Please enter a password".to_owned()],
        }
    }
}

impl Endpoint for AnalyzePassword {
    const PATH: &'static str = "analyze-password";
    const DISPLAY_NAME: &'static str = "AnalyzePassword";
    type Ret = AnalyzePasswordRet;

    fn into_form(self) -> Form {
        Form::new().text("password", self.password)
    }

    fn from_form(mut form: Form) -> Result<Self> {
        let password = form.take_non_empty("password").ok_or(Error::NoPasswordProvided)?;
        Ok(Self { password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Reply;

    #[test]
    fn no_password_reply_is_read_as_failure() {
        let json = serde_json::to_string(&NoPasswordRet::default()).unwrap();
        let reply: Reply<AnalyzePasswordRet> = serde_json::from_str(&json).unwrap();
        let err = reply.into_result().unwrap_err();
        assert_eq!(err.to_string(), "No password provided");
    }

    #[test]
    fn success_reply_decodes() {
        let json = r#"{"strength":3,"rating":"Strong","entropy":52.4,"length":8,
            "has_lowercase":true,"has_uppercase":true,"has_digit":true,"has_special":true,"feedback":[]}"#;
        let reply: Reply<AnalyzePasswordRet> = serde_json::from_str(json).unwrap();
        let ret = reply.into_result().unwrap();
        assert_eq!(ret.strength, 3);
        assert_eq!(ret.entropy, 52.4);
    }
}
