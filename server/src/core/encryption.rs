use aes::{Aes128, Aes256};
use async_trait::async_trait;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chacha20poly1305::{aead::Aead, ChaCha20Poly1305, KeyInit, Nonce};
use common::{
    algorithm::CipherAlgorithm,
    api::{self, CipherInfo, Decrypt, DecryptRet, Encrypt, EncryptRet, EncryptionAlgorithms, EncryptionAlgorithmsRet},
};
use data_encoding::{BASE64, BASE64URL};
use eyre::{eyre, WrapErr};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use tracing::debug;

use super::blocking;
use crate::{request_dispatcher::Handler, state::State};

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const FERNET_VERSION: u8 = 0x80;
const FERNET_HMAC_LEN: usize = 32;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

pub fn available_algorithms() -> Vec<CipherInfo> {
    let info = |id: CipherAlgorithm, name: &str, description: &str, strength: &str, use_case: &str| CipherInfo {
        id: id.id().to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        strength: strength.to_owned(),
        use_case: use_case.to_owned(),
    };
    vec![
        info(
            CipherAlgorithm::Aes,
            "AES-256-CBC",
            "Advanced Encryption Standard with 256-bit key in Cipher Block Chaining mode",
            "Very High",
            "General purpose encryption, industry standard",
        ),
        info(
            CipherAlgorithm::Fernet,
            "Fernet (AES-128-CBC)",
            "Implementation of symmetric authenticated cryptography (AES-128-CBC with HMAC)",
            "High",
            "Easy to use, authenticated encryption with high security",
        ),
        info(
            CipherAlgorithm::ChaCha20,
            "ChaCha20-Poly1305",
            "Stream cipher with built-in authentication using Poly1305",
            "Very High",
            "Efficient encryption on devices without AES hardware acceleration",
        ),
    ]
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    rand::thread_rng().fill(&mut buf[..]);
    buf
}

fn aes_encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> eyre::Result<Vec<u8>> {
    let iv: [u8; IV_LEN] = random_bytes();
    let ct = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|_| eyre!("invalid key length"))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    Ok([&iv[..], &ct].concat())
}

fn aes_decrypt(key: &[u8; KEY_LEN], data: &[u8]) -> eyre::Result<Vec<u8>> {
    eyre::ensure!(data.len() > IV_LEN, "ciphertext too short");
    let (iv, ct) = data.split_at(IV_LEN);
    Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| eyre!("invalid key length"))?
        .decrypt_padded_vec_mut::<Pkcs7>(ct)
        .map_err(|_| eyre!("invalid padding"))
}

/// The derived key is split like a Fernet key: signing half first, then encryption half.
fn fernet_keys(key: &[u8; KEY_LEN]) -> (&[u8], &[u8]) {
    key.split_at(KEY_LEN / 2)
}

/// Builds a standard Fernet token, URL-safe base64 text.
fn fernet_encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> eyre::Result<Vec<u8>> {
    let (signing_key, encryption_key) = fernet_keys(key);
    let iv: [u8; IV_LEN] = random_bytes();
    let timestamp = chrono::Utc::now().timestamp() as u64;

    let ct = Aes128CbcEnc::new_from_slices(encryption_key, &iv)
        .map_err(|_| eyre!("invalid key length"))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut token = Vec::with_capacity(1 + 8 + IV_LEN + ct.len() + FERNET_HMAC_LEN);
    token.push(FERNET_VERSION);
    token.extend_from_slice(&timestamp.to_be_bytes());
    token.extend_from_slice(&iv);
    token.extend_from_slice(&ct);

    let mut mac = <HmacSha256 as Mac>::new_from_slice(signing_key).map_err(|_| eyre!("invalid key length"))?;
    mac.update(&token);
    token.extend_from_slice(&mac.finalize().into_bytes());

    Ok(BASE64URL.encode(&token).into_bytes())
}

fn fernet_decrypt(key: &[u8; KEY_LEN], token: &[u8]) -> eyre::Result<Vec<u8>> {
    let (signing_key, encryption_key) = fernet_keys(key);
    let token = BASE64URL.decode(token).wrap_err("invalid fernet token")?;
    eyre::ensure!(token.len() > 1 + 8 + IV_LEN + FERNET_HMAC_LEN, "invalid fernet token");
    eyre::ensure!(token[0] == FERNET_VERSION, "invalid fernet token");

    let (signed, tag) = token.split_at(token.len() - FERNET_HMAC_LEN);
    let mut mac = <HmacSha256 as Mac>::new_from_slice(signing_key).map_err(|_| eyre!("invalid key length"))?;
    mac.update(signed);
    mac.verify_slice(tag).map_err(|_| eyre!("invalid fernet token"))?;

    let (iv, ct) = signed[1 + 8..].split_at(IV_LEN);
    Aes128CbcDec::new_from_slices(encryption_key, iv)
        .map_err(|_| eyre!("invalid key length"))?
        .decrypt_padded_vec_mut::<Pkcs7>(ct)
        .map_err(|_| eyre!("invalid fernet token"))
}

fn chacha_encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> eyre::Result<Vec<u8>> {
    let nonce: [u8; NONCE_LEN] = random_bytes();
    let ct = ChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| eyre!("invalid key length"))?
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| eyre!("encryption failure"))?;
    Ok([&nonce[..], &ct].concat())
}

fn chacha_decrypt(key: &[u8; KEY_LEN], data: &[u8]) -> eyre::Result<Vec<u8>> {
    eyre::ensure!(data.len() > NONCE_LEN, "ciphertext too short");
    let (nonce, ct) = data.split_at(NONCE_LEN);
    ChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| eyre!("invalid key length"))?
        .decrypt(Nonce::from_slice(nonce), ct)
        .map_err(|_| eyre!("authentication failed"))
}

/// Returns `(encrypted, salt)`, both standard base64.
pub fn encrypt_text(text: &str, password: &str, algorithm: CipherAlgorithm, iterations: u32) -> eyre::Result<(String, String)> {
    let salt: [u8; SALT_LEN] = random_bytes();
    let key = derive_key(password, &salt, iterations);

    let encrypted = match algorithm {
        CipherAlgorithm::Aes => aes_encrypt(&key, text.as_bytes())?,
        CipherAlgorithm::Fernet => fernet_encrypt(&key, text.as_bytes())?,
        CipherAlgorithm::ChaCha20 => chacha_encrypt(&key, text.as_bytes())?,
    };

    Ok((BASE64.encode(&encrypted), BASE64.encode(&salt)))
}

pub fn decrypt_text(encrypted: &str, salt: &str, password: &str, algorithm: CipherAlgorithm, iterations: u32) -> eyre::Result<String> {
    let data = BASE64.decode(encrypted.as_bytes()).wrap_err("invalid base64 in encrypted data")?;
    let salt = BASE64.decode(salt.as_bytes()).wrap_err("invalid base64 in salt")?;
    let key = derive_key(password, &salt, iterations);

    let plaintext = match algorithm {
        CipherAlgorithm::Aes => aes_decrypt(&key, &data)?,
        CipherAlgorithm::Fernet => fernet_decrypt(&key, &data)?,
        CipherAlgorithm::ChaCha20 => chacha_decrypt(&key, &data)?,
    };

    String::from_utf8(plaintext).wrap_err("decrypted data is not valid UTF-8")
}

fn parse_algorithm(id: &str) -> eyre::Result<CipherAlgorithm> {
    id.parse().map_err(|_| eyre!("Unsupported algorithm: {}", id))
}

#[async_trait]
impl Handler for Encrypt {
    async fn handle(self, state: &State) -> api::Result<Self::Ret> {
        let iterations = state.config.pbkdf2_iterations;
        let Encrypt { text, algorithm, password } = self;
        debug!(%algorithm, len = text.len());

        let algo = parse_algorithm(&algorithm).wrap_err("Error encrypting text")?;
        let (encrypted, salt) = blocking(move || encrypt_text(&text, &password, algo, iterations))
            .await
            .wrap_err("Error encrypting text")?;

        Ok(EncryptRet { encrypted, salt, algorithm })
    }
}

#[async_trait]
impl Handler for Decrypt {
    async fn handle(self, state: &State) -> api::Result<Self::Ret> {
        let iterations = state.config.pbkdf2_iterations;
        let Decrypt { encrypted, salt, algorithm, password } = self;
        debug!(%algorithm);

        let algo = parse_algorithm(&algorithm).wrap_err("Error decrypting text")?;
        let decrypted = blocking(move || decrypt_text(&encrypted, &salt, &password, algo, iterations))
            .await
            .wrap_err("Error decrypting text")?;

        Ok(DecryptRet { decrypted })
    }
}

#[async_trait]
impl Handler for EncryptionAlgorithms {
    async fn handle(self, _state: &State) -> api::Result<Self::Ret> {
        Ok(EncryptionAlgorithmsRet { algorithms: available_algorithms() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    // keeps the tests fast, production uses the configured count
    const ITERATIONS: u32 = 1_000;

    #[test]
    fn every_cipher_round_trips() {
        for algo in CipherAlgorithm::iter() {
            let (encrypted, salt) = encrypt_text("attack at dawn ✓", "hunter2", algo, ITERATIONS).unwrap();
            assert_eq!(BASE64.decode(salt.as_bytes()).unwrap().len(), SALT_LEN);
            let decrypted = decrypt_text(&encrypted, &salt, "hunter2", algo, ITERATIONS).unwrap();
            assert_eq!(decrypted, "attack at dawn ✓", "{}", algo);
        }
    }

    #[test]
    fn wrong_password_fails_authenticated_ciphers() {
        for algo in [CipherAlgorithm::Fernet, CipherAlgorithm::ChaCha20] {
            let (encrypted, salt) = encrypt_text("secret", "right", algo, ITERATIONS).unwrap();
            assert!(decrypt_text(&encrypted, &salt, "wrong", algo, ITERATIONS).is_err(), "{}", algo);
        }
    }

    #[test]
    fn wrong_password_never_yields_plaintext_with_aes() {
        let (encrypted, salt) = encrypt_text("secret", "right", CipherAlgorithm::Aes, ITERATIONS).unwrap();
        let res = decrypt_text(&encrypted, &salt, "wrong", CipherAlgorithm::Aes, ITERATIONS);
        assert!(res.map_or(true, |text| text != "secret"));
    }

    #[test]
    fn layouts() {
        let key = derive_key("pw", &[0u8; SALT_LEN], ITERATIONS);

        // iv + one padded block
        assert_eq!(aes_encrypt(&key, b"short").unwrap().len(), IV_LEN + 16);
        // nonce + ciphertext + poly1305 tag
        assert_eq!(chacha_encrypt(&key, b"short").unwrap().len(), NONCE_LEN + 5 + 16);

        let token = BASE64URL.decode(&fernet_encrypt(&key, b"short").unwrap()).unwrap();
        assert_eq!(token[0], FERNET_VERSION);
        assert_eq!(token.len(), 1 + 8 + IV_LEN + 16 + FERNET_HMAC_LEN);
    }

    #[test]
    fn tampered_fernet_token_is_rejected() {
        let key = derive_key("pw", &[1u8; SALT_LEN], ITERATIONS);
        let mut token = BASE64URL.decode(&fernet_encrypt(&key, b"data").unwrap()).unwrap();
        let last = token.len() - FERNET_HMAC_LEN - 1;
        token[last] ^= 1;
        assert!(fernet_decrypt(&key, BASE64URL.encode(&token).as_bytes()).is_err());
    }

    #[test]
    fn unsupported_algorithm() {
        assert_eq!(parse_algorithm("des").unwrap_err().to_string(), "Unsupported algorithm: des");
    }

    #[test]
    fn algorithm_list() {
        let ids: Vec<_> = available_algorithms().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, ["aes", "fernet", "chacha20"]);
    }
}
