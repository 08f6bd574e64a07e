//! In-memory menu registry

use std::sync::Mutex;

use super::{MenuHost, MenuItem};
use crate::error::{Error, Result};

/// Menu state kept in process memory, rejecting duplicate ids
#[derive(Debug, Default)]
pub struct MenuRegistry {
    items: Mutex<Vec<MenuItem>>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<MenuItem>>> {
        self.items
            .lock()
            .map_err(|_| Error::Host("menu registry lock poisoned".to_string()))
    }
}

impl MenuHost for MenuRegistry {
    fn create(&self, item: MenuItem) -> Result<()> {
        let mut items = self.lock()?;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(Error::Host(format!(
                "Cannot create menu item with duplicate id {}",
                item.id
            )));
        }
        items.push(item);
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<()> {
        self.lock()?.retain(|item| item.id != id);
        Ok(())
    }

    fn items(&self) -> Vec<MenuItem> {
        self.lock().map(|items| items.clone()).unwrap_or_default()
    }
}
