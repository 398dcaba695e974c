use serde::{Deserialize, Serialize};

use super::{Endpoint, Error, Form, Result, Upload};
use crate::algorithm::HashAlgorithm;

// CalculateChecksum
#[derive(Debug, Clone)]
pub struct CalculateChecksum {
    pub file: Upload,
    pub algorithm: String, // echoed back as received, unknown ids hash as sha256
}
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CalculateChecksumRet {
    pub filename: String,
    pub algorithm: String,
    pub checksum: String,
}
impl Endpoint for CalculateChecksum {
    const PATH: &'static str = "calculate-checksum";
    const DISPLAY_NAME: &'static str = "CalculateChecksum";
    type Ret = CalculateChecksumRet;

    fn into_form(self) -> Form {
        Form::new()
            .file("file", self.file)
            .text("algorithm", self.algorithm)
    }

    fn from_form(mut form: Form) -> Result<Self> {
        let file = take_selected_file(&mut form)?;
        let algorithm = form.text_or("algorithm", HashAlgorithm::default().id());
        Ok(Self { file, algorithm })
    }
}

// VerifyChecksum
#[derive(Debug, Clone)]
pub struct VerifyChecksum {
    pub file: Upload,
    pub algorithm: String,
    pub checksum: String,
}
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VerifyChecksumRet {
    pub filename: String,
    pub is_valid: bool,
    pub provided_checksum: String,
    pub calculated_checksum: String,
}
impl Endpoint for VerifyChecksum {
    const PATH: &'static str = "verify-checksum";
    const DISPLAY_NAME: &'static str = "VerifyChecksum";
    type Ret = VerifyChecksumRet;

    fn into_form(self) -> Form {
        Form::new()
            .file("file", self.file)
            .text("algorithm", self.algorithm)
            .text("checksum", self.checksum)
    }

    fn from_form(mut form: Form) -> Result<Self> {
        let file = take_selected_file(&mut form)?;
        let checksum = form.take_non_empty("checksum").ok_or(Error::NoChecksumProvided)?;
        let algorithm = form.text_or("algorithm", HashAlgorithm::default().id());
        Ok(Self { file, algorithm, checksum })
    }
}

/// A file part with an empty filename is what browsers send when nothing was picked.
fn take_selected_file(form: &mut Form) -> Result<Upload> {
    let file = form.take_file("file").ok_or(Error::NoFileProvided)?;
    if file.filename.is_empty() {
        return Err(Error::NoFileSelected);
    }
    Ok(file)
}
