use std::io::{Cursor, Read};

use async_trait::async_trait;
use common::{
    algorithm::HashAlgorithm,
    api::{self, CalculateChecksum, CalculateChecksumRet, HashAlgorithmInfo, HashAlgorithms, HashAlgorithmsRet, VerifyChecksum, VerifyChecksumRet},
    consts::CHECKSUM_CHUNK_SIZE,
};
use digest::Digest;
use eyre::WrapErr;
use strum::IntoEnumIterator;
use tracing::debug;

use super::blocking;
use crate::{request_dispatcher::Handler, state::State};

fn digest_reader<D: Digest, R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = [0u8; CHECKSUM_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

/// Lowercase hex digest of everything `reader` yields, read in fixed-size chunks.
pub fn calculate_checksum<R: Read>(reader: R, algorithm: HashAlgorithm) -> std::io::Result<String> {
    let digest = match algorithm {
        HashAlgorithm::Md5 => digest_reader::<md5::Md5, _>(reader)?,
        HashAlgorithm::Sha1 => digest_reader::<sha1::Sha1, _>(reader)?,
        HashAlgorithm::Sha256 => digest_reader::<sha2::Sha256, _>(reader)?,
        HashAlgorithm::Sha384 => digest_reader::<sha2::Sha384, _>(reader)?,
        HashAlgorithm::Sha512 => digest_reader::<sha2::Sha512, _>(reader)?,
        HashAlgorithm::Sha3_256 => digest_reader::<sha3::Sha3_256, _>(reader)?,
        HashAlgorithm::Sha3_512 => digest_reader::<sha3::Sha3_512, _>(reader)?,
    };
    Ok(data_encoding::HEXLOWER.encode(&digest))
}

/// Returns whether `provided` matches, ignoring case, along with the digest actually computed.
pub fn verify_checksum<R: Read>(reader: R, provided: &str, algorithm: HashAlgorithm) -> std::io::Result<(bool, String)> {
    let calculated = calculate_checksum(reader, algorithm)?;
    let is_valid = calculated.eq_ignore_ascii_case(provided);
    Ok((is_valid, calculated))
}

pub fn explain_algorithm(id: &str) -> HashAlgorithmInfo {
    let (name, description, use_case, security_level) = match id.parse::<HashAlgorithm>() {
        Ok(HashAlgorithm::Md5) => (
            "MD5 (Message Digest Algorithm 5)",
            "128-bit hash function developed in 1991. Not cryptographically secure anymore due to vulnerabilities.",
            "Quick file verification where security isn't critical",
            "Low - vulnerable to collision attacks",
        ),
        Ok(HashAlgorithm::Sha1) => (
            "SHA-1 (Secure Hash Algorithm 1)",
            "160-bit hash function developed by the NSA. No longer considered secure for cryptographic applications.",
            "Legacy systems and non-security-critical verifications",
            "Low - vulnerable to collision attacks (demonstrated in 2017)",
        ),
        Ok(HashAlgorithm::Sha256) => (
            "SHA-256 (Secure Hash Algorithm 256-bit)",
            "Part of the SHA-2 family, producing a 256-bit hash. Currently considered secure.",
            "Digital signatures, file integrity, and general cryptographic use",
            "High - no known practical attacks",
        ),
        Ok(HashAlgorithm::Sha384) => (
            "SHA-384 (Secure Hash Algorithm 384-bit)",
            "Truncated version of SHA-512 producing a 384-bit hash. Very secure.",
            "Applications requiring high security but slightly better performance than SHA-512",
            "Very High - no known practical attacks",
        ),
        Ok(HashAlgorithm::Sha512) => (
            "SHA-512 (Secure Hash Algorithm 512-bit)",
            "Part of the SHA-2 family, producing a 512-bit hash. Very secure with longer digest.",
            "High-security applications and sensitive data verification",
            "Very High - no known practical attacks",
        ),
        Ok(HashAlgorithm::Sha3_256) => (
            "SHA3-256 (Secure Hash Algorithm 3 256-bit)",
            "Part of the SHA-3 family (formerly Keccak), with a fundamentally different design than SHA-2.",
            "Future-proofing applications, resistance to quantum attacks",
            "Very High - no known practical attacks, different mathematical foundation than SHA-2",
        ),
        Ok(HashAlgorithm::Sha3_512) => (
            "SHA3-512 (Secure Hash Algorithm 3 512-bit)",
            "The 512-bit variant of SHA-3, offering maximum security in the SHA-3 family.",
            "Highest security requirements, long-term data integrity",
            "Extremely High - no known practical attacks, different mathematical foundation than SHA-2",
        ),
        Err(_) => {
            return HashAlgorithmInfo {
                id: id.to_owned(),
                name: id.to_uppercase(),
                description: "Information not available for this algorithm.".to_owned(),
                use_case: "Varies based on algorithm properties".to_owned(),
                security_level: "Unknown".to_owned(),
            }
        }
    };
    HashAlgorithmInfo {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        use_case: use_case.to_owned(),
        security_level: security_level.to_owned(),
    }
}

#[async_trait]
impl Handler for CalculateChecksum {
    async fn handle(self, _state: &State) -> api::Result<Self::Ret> {
        let CalculateChecksum { file, algorithm } = self;
        let algo = HashAlgorithm::from_id_or_default(&algorithm);
        debug!(filename = %file.filename, size = file.bytes.len(), %algo);

        let checksum = blocking(move || Ok(calculate_checksum(Cursor::new(file.bytes), algo)?))
            .await
            .wrap_err("Error calculating checksum")?;

        Ok(CalculateChecksumRet {
            filename: file.filename,
            algorithm,
            checksum,
        })
    }
}

#[async_trait]
impl Handler for VerifyChecksum {
    async fn handle(self, _state: &State) -> api::Result<Self::Ret> {
        let VerifyChecksum { file, algorithm, checksum } = self;
        let algo = HashAlgorithm::from_id_or_default(&algorithm);
        debug!(filename = %file.filename, size = file.bytes.len(), %algo);

        let provided = checksum.clone();
        let (is_valid, calculated_checksum) = blocking(move || Ok(verify_checksum(Cursor::new(file.bytes), &provided, algo)?))
            .await
            .wrap_err("Error verifying checksum")?;

        Ok(VerifyChecksumRet {
            filename: file.filename,
            is_valid,
            provided_checksum: checksum,
            calculated_checksum,
        })
    }
}

#[async_trait]
impl Handler for HashAlgorithms {
    async fn handle(self, _state: &State) -> api::Result<Self::Ret> {
        Ok(HashAlgorithmsRet {
            algorithms: HashAlgorithm::iter().map(|a| explain_algorithm(a.id())).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};

    const VECTORS: &[(HashAlgorithm, &str)] = &[
        (HashAlgorithm::Md5, "900150983cd24fb0d6963f7d28e17f72"),
        (HashAlgorithm::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
        (HashAlgorithm::Sha256, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
        (HashAlgorithm::Sha384, "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7"),
        (HashAlgorithm::Sha512, "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"),
        (HashAlgorithm::Sha3_256, "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"),
        (HashAlgorithm::Sha3_512, "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"),
    ];

    #[test]
    fn known_vectors() {
        for (algo, expected) in VECTORS {
            assert_eq!(&calculate_checksum(Cursor::new(b"abc"), *algo).unwrap(), expected, "{}", algo);
            assert_eq!(expected.len(), algo.hex_len());
        }
    }

    #[test]
    fn unknown_algorithm_hashes_as_sha256() {
        let algo = HashAlgorithm::from_id_or_default("crc32");
        assert_eq!(
            calculate_checksum(Cursor::new(b"abc"), algo).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn verification_ignores_case() {
        let (ok, calculated) = verify_checksum(Cursor::new(b"abc"), "900150983CD24FB0D6963F7D28E17F72", HashAlgorithm::Md5).unwrap();
        assert!(ok);
        assert_eq!(calculated, "900150983cd24fb0d6963f7d28e17f72");

        let (ok, _) = verify_checksum(Cursor::new(b"abd"), "900150983cd24fb0d6963f7d28e17f72", HashAlgorithm::Md5).unwrap();
        assert!(!ok);
    }

    #[test]
    fn file_larger_than_one_chunk() {
        let data = vec![0x61u8; CHECKSUM_CHUNK_SIZE * 3 + 17];
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&data).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let from_file = calculate_checksum(&mut file, HashAlgorithm::Sha512).unwrap();
        let from_memory = calculate_checksum(Cursor::new(&data), HashAlgorithm::Sha512).unwrap();
        assert_eq!(from_file, from_memory);
    }

    #[test]
    fn explanations() {
        assert_eq!(explain_algorithm("sha3_256").security_level, "Very High - no known practical attacks, different mathematical foundation than SHA-2");
        let unknown = explain_algorithm("blake3");
        assert_eq!(unknown.name, "BLAKE3");
        assert_eq!(unknown.security_level, "Unknown");
    }
}
