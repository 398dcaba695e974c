use serde::{Deserialize, Serialize};

use super::{Endpoint, Error, Form, Method, Result};
use crate::algorithm::CipherAlgorithm;

// Encrypt
#[derive(Debug, Clone)]
pub struct Encrypt {
    pub text: String,
    pub algorithm: String,
    pub password: String,
}
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EncryptRet {
    pub encrypted: String, // base64
    pub salt: String,      // base64
    pub algorithm: String,
}
impl Endpoint for Encrypt {
    const PATH: &'static str = "encrypt";
    const DISPLAY_NAME: &'static str = "Encrypt";
    type Ret = EncryptRet;

    fn into_form(self) -> Form {
        Form::new()
            .text("text", self.text)
            .text("algorithm", self.algorithm)
            .text("password", self.password)
    }

    fn from_form(mut form: Form) -> Result<Self> {
        let text = form.take_non_empty("text").ok_or(Error::NoTextProvided)?;
        let password = form.take_non_empty("password").ok_or(Error::NoPasswordProvided)?;
        let algorithm = form.text_or("algorithm", CipherAlgorithm::default().id());
        Ok(Self { text, algorithm, password })
    }
}

// Decrypt
#[derive(Debug, Clone)]
pub struct Decrypt {
    pub encrypted: String,
    pub salt: String,
    pub algorithm: String,
    pub password: String,
}
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DecryptRet {
    pub decrypted: String,
}
impl Endpoint for Decrypt {
    const PATH: &'static str = "decrypt";
    const DISPLAY_NAME: &'static str = "Decrypt";
    type Ret = DecryptRet;

    fn into_form(self) -> Form {
        Form::new()
            .text("encrypted", self.encrypted)
            .text("salt", self.salt)
            .text("algorithm", self.algorithm)
            .text("password", self.password)
    }

    fn from_form(mut form: Form) -> Result<Self> {
        let encrypted = form.take_non_empty("encrypted").ok_or(Error::NoEncryptedData)?;
        let salt = form.take_non_empty("salt").ok_or(Error::NoSaltProvided)?;
        let password = form.take_non_empty("password").ok_or(Error::NoPasswordProvided)?;
        let algorithm = form.text_or("algorithm", CipherAlgorithm::default().id());
        Ok(Self { encrypted, salt, algorithm, password })
    }
}

// EncryptionAlgorithms
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CipherInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub strength: String,
    pub use_case: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptionAlgorithms;
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EncryptionAlgorithmsRet {
    pub algorithms: Vec<CipherInfo>,
}
impl Endpoint for EncryptionAlgorithms {
    const PATH: &'static str = "encryption-algorithms";
    const DISPLAY_NAME: &'static str = "EncryptionAlgorithms";
    const METHOD: Method = Method::Get;
    type Ret = EncryptionAlgorithmsRet;

    fn into_form(self) -> Form {
        Form::new()
    }

    fn from_form(_form: Form) -> Result<Self> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrypt_field_order() {
        let err = Decrypt::from_form(Form::new().text("password", "pw")).unwrap_err();
        assert!(matches!(err, Error::NoEncryptedData));

        let form = Form::new().text("encrypted", "AAAA").text("password", "pw");
        assert!(matches!(Decrypt::from_form(form).unwrap_err(), Error::NoSaltProvided));

        let form = Form::new().text("encrypted", "AAAA").text("salt", "AAAA");
        assert!(matches!(Decrypt::from_form(form).unwrap_err(), Error::NoPasswordProvided));
    }

    #[test]
    fn encrypt_defaults_to_aes() {
        let form = Form::new().text("text", "hello").text("password", "pw");
        let req = Encrypt::from_form(form).unwrap();
        assert_eq!(req.algorithm, "aes");
    }
}
