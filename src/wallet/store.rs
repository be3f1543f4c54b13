use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;
use tracing::debug;

use crate::error::MintError;

/// A signing wallet: a keypair plus the name of the file it came from
///
/// The keypair never leaves this struct; callers get the derived public
/// address and a signing operation, nothing else.
pub struct Wallet {
    /// File stem of the keypair file this wallet was loaded from
    pub name: String,
    keypair: Keypair,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret key through Debug output
        f.debug_struct("Wallet")
            .field("name", &self.name)
            .field("pubkey", &self.pubkey())
            .finish()
    }
}

impl Wallet {
    pub fn new(name: String, keypair: Keypair) -> Self {
        Self { name, keypair }
    }

    /// Public address derived from the signing key
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Sign a constructed transaction as the fee payer
    ///
    /// The mint API builds the transaction with this wallet as the first
    /// required signer, so the signature goes into slot 0.
    pub fn sign_transaction(&self, tx: &mut VersionedTransaction) -> Result<(), MintError> {
        let required = tx.message.header().num_required_signatures as usize;
        if required == 0 {
            return Err(MintError::Signing(format!(
                "transaction for {} declares no required signers",
                self.pubkey()
            )));
        }

        let signature = self.keypair.sign_message(&tx.message.serialize());
        tx.signatures.resize(required, Signature::default());
        tx.signatures[0] = signature;
        Ok(())
    }
}

/// On-disk keypair file carrying the secret key under a tagged field
#[derive(Deserialize)]
struct TaggedKeypairFile {
    secret_key: Vec<u8>,
}

/// Load one wallet from a keypair JSON file
///
/// Accepts either a bare array of secret-key bytes (solana-keygen format)
/// or an object with a `secret_key` byte array.
pub fn load_wallet_from_file(path: &Path) -> Result<Wallet, MintError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        MintError::Configuration(format!("cannot read keypair file {}: {}", path.display(), e))
    })?;

    let value: serde_json::Value = serde_json::from_str(raw.trim()).map_err(|e| {
        MintError::Configuration(format!("keypair file {} is not valid JSON: {}", path.display(), e))
    })?;

    let secret: Vec<u8> = if value.is_array() {
        serde_json::from_value(value).map_err(|e| {
            MintError::Configuration(format!(
                "keypair file {} is not a byte array: {}",
                path.display(),
                e
            ))
        })?
    } else if value.is_object() {
        let tagged: TaggedKeypairFile = serde_json::from_value(value).map_err(|e| {
            MintError::Configuration(format!(
                "keypair file {} has no 'secret_key' byte array: {}",
                path.display(),
                e
            ))
        })?;
        tagged.secret_key
    } else {
        return Err(MintError::Configuration(format!(
            "unsupported keypair format in {}",
            path.display()
        )));
    };

    let keypair = Keypair::from_bytes(&secret).map_err(|e| {
        MintError::Configuration(format!("invalid secret key in {}: {}", path.display(), e))
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("wallet")
        .to_string();

    debug!(wallet = %name, pubkey = %keypair.pubkey(), "Loaded wallet");
    Ok(Wallet::new(name, keypair))
}

/// Load every `*.json` keypair file directly inside a directory
///
/// Files are loaded in lexicographic filename order so wallet ordering is
/// stable across runs. An empty directory is a configuration error.
fn load_wallets_from_dir(dir: &Path) -> Result<Vec<Wallet>, MintError> {
    if !dir.is_dir() {
        return Err(MintError::Configuration(format!(
            "wallets directory not found: {}",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        MintError::Configuration(format!("cannot read wallets directory {}: {}", dir.display(), e))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut wallets = Vec::with_capacity(files.len());
    for file in &files {
        wallets.push(load_wallet_from_file(file)?);
    }

    if wallets.is_empty() {
        return Err(MintError::Configuration(format!(
            "no wallet keypair JSON files found in {}",
            dir.display()
        )));
    }
    Ok(wallets)
}

/// Resolve a mix of keypair files and directories into an ordered wallet list
///
/// Paths are processed in the order given; directories expand in place.
/// An overall empty result is a configuration error.
pub fn load_wallets(paths: &[PathBuf]) -> Result<Vec<Wallet>, MintError> {
    let mut wallets = Vec::new();
    for path in paths {
        if path.is_dir() {
            wallets.extend(load_wallets_from_dir(path)?);
        } else {
            wallets.push(load_wallet_from_file(path)?);
        }
    }

    if wallets.is_empty() {
        return Err(MintError::Configuration(
            "no wallets loaded from given paths".to_string(),
        ));
    }
    Ok(wallets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::message::{Message, VersionedMessage};
    use std::fs;

    fn write_raw_keypair(dir: &Path, file_name: &str) -> (PathBuf, Pubkey) {
        let keypair = Keypair::new();
        let pubkey = keypair.pubkey();
        let bytes: Vec<u8> = keypair.to_bytes().to_vec();
        let path = dir.join(file_name);
        fs::write(&path, serde_json::to_string(&bytes).unwrap()).unwrap();
        (path, pubkey)
    }

    #[test]
    fn loads_raw_byte_array_file() {
        let dir = tempfile::tempdir().unwrap();
        let (path, pubkey) = write_raw_keypair(dir.path(), "payer.json");

        let wallet = load_wallet_from_file(&path).unwrap();
        assert_eq!(wallet.name, "payer");
        assert_eq!(wallet.pubkey(), pubkey);
    }

    #[test]
    fn loads_tagged_secret_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let keypair = Keypair::new();
        let pubkey = keypair.pubkey();
        let path = dir.path().join("tagged.json");
        let body = serde_json::json!({ "secret_key": keypair.to_bytes().to_vec() });
        fs::write(&path, body.to_string()).unwrap();

        let wallet = load_wallet_from_file(&path).unwrap();
        assert_eq!(wallet.pubkey(), pubkey);
    }

    #[test]
    fn rejects_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = load_wallet_from_file(&path).unwrap_err();
        assert!(matches!(err, MintError::Configuration(_)));
    }

    #[test]
    fn rejects_invalid_secret_key_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load_wallet_from_file(&path).unwrap_err();
        assert!(matches!(err, MintError::Configuration(_)));
    }

    #[test]
    fn directory_loads_sorted_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        // Written out of order on purpose
        let (_, pk_b) = write_raw_keypair(dir.path(), "b.json");
        let (_, pk_a) = write_raw_keypair(dir.path(), "a.json");
        let (_, pk_c) = write_raw_keypair(dir.path(), "c.json");

        let wallets = load_wallets(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(wallets.len(), 3);
        assert_eq!(wallets[0].pubkey(), pk_a);
        assert_eq!(wallets[1].pubkey(), pk_b);
        assert_eq!(wallets[2].pubkey(), pk_c);
    }

    #[test]
    fn empty_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_wallets(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, MintError::Configuration(_)));
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        // A nonexistent path is treated as a file and fails to read
        let err = load_wallets(&[missing]).unwrap_err();
        assert!(matches!(err, MintError::Configuration(_)));
    }

    #[test]
    fn directory_ignores_non_json_files() {
        let dir = tempfile::tempdir().unwrap();
        write_raw_keypair(dir.path(), "good.json");
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let wallets = load_wallets(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(wallets.len(), 1);
    }

    #[test]
    fn sign_transaction_fills_payer_slot() {
        let wallet = Wallet::new("w".to_string(), Keypair::new());
        let mut message = Message::default();
        message.header.num_required_signatures = 1;
        let mut tx = VersionedTransaction {
            signatures: Vec::new(),
            message: VersionedMessage::Legacy(message),
        };

        wallet.sign_transaction(&mut tx).unwrap();
        assert_eq!(tx.signatures.len(), 1);
        assert_ne!(tx.signatures[0], Signature::default());
    }

    #[test]
    fn sign_transaction_rejects_zero_required_signers() {
        let wallet = Wallet::new("w".to_string(), Keypair::new());
        let mut tx = VersionedTransaction {
            signatures: Vec::new(),
            message: VersionedMessage::Legacy(Message::default()),
        };

        let err = wallet.sign_transaction(&mut tx).unwrap_err();
        assert!(matches!(err, MintError::Signing(_)));
    }
}
