use heapless::{FnvIndexMap, String, Vec};

use crate::config::DEVICE_RECORD_LEN;
use crate::Error;

/// Raw key/value persistence, the shape of the flash NVS partition.
pub trait KeyValueStorage {
    fn get_raw<'a>(&self, key: &str, buf: &'a mut [u8]) -> Result<Option<&'a [u8]>, Error>;
    fn set_raw(&mut self, key: &str, data: &[u8]) -> Result<(), Error>;
}

type StorageKey = String<15>;

/// RAM backed storage for the simulator and tests.
#[derive(Default, Debug)]
pub struct MemoryStorage {
    entries: FnvIndexMap<StorageKey, Vec<u8, DEVICE_RECORD_LEN>, 8>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_raw<'a>(&self, key: &str, buf: &'a mut [u8]) -> Result<Option<&'a [u8]>, Error> {
        let Some(value) = self.entries.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v)
        else {
            return Ok(None);
        };
        let target = buf
            .get_mut(..value.len())
            .ok_or(Error::Storage("buffer too small"))?;
        target.copy_from_slice(value);
        Ok(Some(target))
    }

    fn set_raw(&mut self, key: &str, data: &[u8]) -> Result<(), Error> {
        let key: StorageKey = String::try_from(key).map_err(|_| Error::Storage("key too long"))?;
        let value = Vec::from_slice(data).map_err(|_| Error::Storage("value too long"))?;
        self.entries
            .insert(key, value)
            .map_err(|_| Error::Storage("storage full"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_reads_back() {
        let mut storage = MemoryStorage::new();
        let mut buf = [0u8; 16];
        assert_eq!(storage.get_raw("inv", &mut buf).unwrap(), None);

        storage.set_raw("inv", &[1, 2, 3]).unwrap();
        assert_eq!(storage.get_raw("inv", &mut buf).unwrap(), Some(&[1, 2, 3][..]));

        storage.set_raw("inv", &[4]).unwrap();
        assert_eq!(storage.get_raw("inv", &mut buf).unwrap(), Some(&[4][..]));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn rejects_small_buffers_and_long_keys() {
        let mut storage = MemoryStorage::new();
        storage.set_raw("k", &[0; 8]).unwrap();
        let mut buf = [0u8; 4];
        assert!(storage.get_raw("k", &mut buf).is_err());
        assert!(storage.set_raw("a-very-long-storage-key", &[]).is_err());
    }
}
