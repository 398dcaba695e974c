mod error;
mod endpoint;
mod form;
mod algorithms;
mod breach;
mod checksum;
mod encryption;
mod password;

pub use error::{Error, ErrorBody, Result};
pub use endpoint::{Endpoint, Method, Reply};
pub use form::{Form, Upload};
pub use algorithms::{HashAlgorithmInfo, HashAlgorithms, HashAlgorithmsRet};
pub use breach::{Breach, CheckBreaches, CheckBreachesRet, NoEmailRet};
pub use checksum::{CalculateChecksum, CalculateChecksumRet, VerifyChecksum, VerifyChecksumRet};
pub use encryption::{CipherInfo, Decrypt, DecryptRet, Encrypt, EncryptRet, EncryptionAlgorithms, EncryptionAlgorithmsRet};
pub use password::{AnalyzePassword, AnalyzePasswordRet, NoPasswordRet};
