//! Flash-backed script store.
//!
//! Uses the nRF52840's internal flash via `sequential-storage` (map mode),
//! with one record per script keyed by slot number. `sequential-storage`
//! handles wear levelling and garbage collection.
//!
//! Record layout: `[name_len][name bytes][script text]`.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use defmt::{debug, error, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use hidscript::config::{
    MAX_SCRIPT_SIZE, MAX_STORED_SCRIPTS, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START,
};
use hidscript::{Error, Result, ScriptStore};
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Longest script name kept in a record.
const MAX_NAME_LEN: usize = 64;

/// Scratch size for one record plus `sequential-storage` item overhead.
const RECORD_BUF_SIZE: usize = 1 + MAX_NAME_LEN + MAX_SCRIPT_SIZE + 32;

fn flash_range() -> Range<u32> {
    STORAGE_START..STORAGE_END
}

fn encode_record(name: &str, text: &str) -> Option<Vec<u8>> {
    if name.is_empty() || name.len() > MAX_NAME_LEN || text.len() > MAX_SCRIPT_SIZE {
        return None;
    }
    let mut record = Vec::with_capacity(1 + name.len() + text.len());
    record.push(name.len() as u8);
    record.extend_from_slice(name.as_bytes());
    record.extend_from_slice(text.as_bytes());
    Some(record)
}

fn decode_record(data: &[u8]) -> Option<(&str, &str)> {
    let (&len, rest) = data.split_first()?;
    let len = usize::from(len);
    if rest.len() < len {
        return None;
    }
    let (name, text) = rest.split_at(len);
    Some((
        core::str::from_utf8(name).ok()?,
        core::str::from_utf8(text).ok()?,
    ))
}

/// Script store on the reserved flash pages.
pub struct FlashStore<F> {
    flash: F,
    buf: Vec<u8>,
}

impl<F: NorFlash> FlashStore<F> {
    pub fn new(flash: F) -> Self {
        Self {
            flash,
            buf: vec![0u8; RECORD_BUF_SIZE],
        }
    }

    /// Record in `slot` as owned (name, text).
    async fn fetch(&mut self, slot: u8) -> Option<(String, String)> {
        let fetched = fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            flash_range(),
            &mut NoCache::new(),
            &mut self.buf,
            &slot,
        )
        .await;
        match fetched {
            Ok(Some(data)) => {
                let (name, text) = decode_record(data)?;
                Some((name.into(), text.into()))
            }
            Ok(None) => None,
            Err(e) => {
                error!("Flash read error in slot {}: {:?}", slot, defmt::Debug2Format(&e));
                None
            }
        }
    }

    /// Slot holding `name`, or else the first free slot.
    async fn slot_for(&mut self, name: &str) -> Option<u8> {
        let mut free = None;
        for slot in 0..MAX_STORED_SCRIPTS as u8 {
            match self.fetch(slot).await {
                Some((stored, _)) if stored == name => return Some(slot),
                Some(_) => {}
                None => {
                    free.get_or_insert(slot);
                }
            }
        }
        free
    }
}

impl<F: NorFlash> ScriptStore for FlashStore<F> {
    async fn names(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        for slot in 0..MAX_STORED_SCRIPTS as u8 {
            if let Some((name, _)) = self.fetch(slot).await {
                names.push(name);
            }
        }
        names.sort();
        names
    }

    async fn load(&mut self, name: &str) -> Option<String> {
        for slot in 0..MAX_STORED_SCRIPTS as u8 {
            if let Some((stored, text)) = self.fetch(slot).await {
                if stored == name {
                    return Some(text);
                }
            }
        }
        debug!("FlashStore: {} not stored", name);
        None
    }

    async fn save(&mut self, name: &str, text: &str) -> Result<()> {
        let record = encode_record(name, text).ok_or(Error::StoreNotWritable)?;
        let Some(slot) = self.slot_for(name).await else {
            warn!("FlashStore full, cannot save {}", name);
            return Err(Error::StoreNotWritable);
        };

        let stored = store_item::<u8, &[u8], _>(
            &mut self.flash,
            flash_range(),
            &mut NoCache::new(),
            &mut self.buf,
            &slot,
            &record.as_slice(),
        )
        .await;
        match stored {
            Ok(()) => {
                info!("Saved {} ({} bytes) to slot {}", name, text.len(), slot);
                Ok(())
            }
            Err(e) => {
                error!("Flash write error: {:?}", defmt::Debug2Format(&e));
                Err(Error::StoreNotWritable)
            }
        }
    }
}
