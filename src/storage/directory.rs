use super::KeyValueStore;
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable store keeping one file per key under a directory.
/// Writes go through a temp file and a rename so readers never see a
/// half-written value.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!("Opened directory store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(encode_key(key))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.path_for(key);
        let staging = self.root.join(format!(".{}.tmp", encode_key(key)));
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with('.') {
                continue;
            }
            match decode_key(name) {
                Ok(key) => keys.push(key),
                Err(e) => warn!("Ignoring foreign file in store: {}", e),
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Keep `[A-Za-z0-9_-]` as is, escape every other byte as `~XX`
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("~{:02X}", byte));
        }
    }
    out
}

fn decode_key(name: &str) -> Result<String> {
    let bad = || Error::Storage(format!("undecodable key file name: {}", name));
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'~' {
            let hex = name.get(i + 1..i + 3).ok_or_else(bad)?;
            out.push(u8::from_str_radix(hex, 16).map_err(|_| bad())?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| bad())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_escaping_round_trips() {
        for key in ["favoriteProperties", "pendingEnquiry_12_1700000000000", "a b/c~d", "ключ"] {
            assert_eq!(decode_key(&encode_key(key)).unwrap(), key);
        }
        assert_eq!(encode_key("a/b"), "a~2Fb");
        assert!(decode_key("bad~Z").is_err());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = DirectoryStore::open(dir.path()).unwrap();
            store.set("favoriteProperties", r#"["1","4"]"#).unwrap();
            store.set("pendingEnquiry_4_1", "{}").unwrap();
        }

        let store = DirectoryStore::open(dir.path()).unwrap();
        assert_eq!(store.get("favoriteProperties").unwrap().as_deref(), Some(r#"["1","4"]"#));
        assert_eq!(store.keys().unwrap(), vec!["favoriteProperties", "pendingEnquiry_4_1"]);

        assert!(store.remove("pendingEnquiry_4_1").unwrap());
        assert!(!store.remove("pendingEnquiry_4_1").unwrap());
        assert_eq!(store.get("pendingEnquiry_4_1").unwrap(), None);
    }
}
