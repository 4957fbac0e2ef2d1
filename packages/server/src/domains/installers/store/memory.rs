use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InstallerStore;
use crate::common::InstallerId;
use crate::domains::installers::models::Installer;
use crate::kernel::{StoreError, StoreResult};

/// In-memory installer store. Data is lost on restart.
#[derive(Default)]
pub struct MemoryInstallerStore {
    installers: RwLock<HashMap<InstallerId, Installer>>,
}

impl MemoryInstallerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.installers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.installers.read().await.is_empty()
    }
}

fn sorted_by_id(mut installers: Vec<Installer>) -> Vec<Installer> {
    installers.sort_by_key(|i| i.id);
    installers
}

#[async_trait]
impl InstallerStore for MemoryInstallerStore {
    async fn insert(&self, installer: &Installer) -> StoreResult<()> {
        self.installers
            .write()
            .await
            .insert(installer.id, installer.clone());
        Ok(())
    }

    async fn update(&self, installer: &Installer) -> StoreResult<()> {
        let mut installers = self.installers.write().await;
        match installers.get_mut(&installer.id) {
            Some(existing) => {
                *existing = installer.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("Installer", installer.id)),
        }
    }

    async fn find_by_id(&self, id: InstallerId) -> StoreResult<Option<Installer>> {
        Ok(self.installers.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Installer>> {
        let mut installers: Vec<Installer> =
            self.installers.read().await.values().cloned().collect();
        installers.sort_by(|a, b| {
            a.company_name
                .cmp(&b.company_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(installers)
    }

    async fn find_by_postal_area(&self, prefix: &str) -> StoreResult<Vec<Installer>> {
        let matches = self
            .installers
            .read()
            .await
            .values()
            .filter(|i| i.serves(prefix))
            .cloned()
            .collect();
        Ok(sorted_by_id(matches))
    }

    async fn find_fallbacks(&self) -> StoreResult<Vec<Installer>> {
        let fallbacks = self
            .installers
            .read()
            .await
            .values()
            .filter(|i| i.is_fallback)
            .cloned()
            .collect();
        Ok(sorted_by_id(fallbacks))
    }

    async fn set_fallback(&self, id: InstallerId) -> StoreResult<Installer> {
        let mut installers = self.installers.write().await;
        if !installers.contains_key(&id) {
            return Err(StoreError::not_found("Installer", id));
        }

        for installer in installers.values_mut() {
            installer.is_fallback = installer.id == id;
        }

        installers
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Installer", id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MemberId;
    use crate::domains::installers::models::InstallerFields;

    fn installer(name: &str, areas: &[&str]) -> Installer {
        let fields = InstallerFields::builder()
            .company_name(name)
            .logo_url("https://cdn.example.com/logo.png")
            .address_one("1 Test Lane")
            .postal_code("AB1 2CD")
            .city("Aberdeen")
            .phone_number("01224 000000")
            .email("test@example.com")
            .postal_areas(areas.iter().map(|a| a.to_string()).collect::<Vec<_>>())
            .build();
        Installer::new(fields, MemberId::new())
    }

    #[tokio::test]
    async fn test_find_by_postal_area_is_exact() {
        let store = MemoryInstallerStore::new();
        store.insert(&installer("A", &["AB1"])).await.unwrap();
        store.insert(&installer("B", &["AB12"])).await.unwrap();

        let matches = store.find_by_postal_area("AB1").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].company_name, "A");
        assert!(store.find_by_postal_area("AB").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_fallback_moves_flag() {
        let store = MemoryInstallerStore::new();
        let mut a = installer("A", &["AB1"]);
        a.is_fallback = true;
        let b = installer("B", &["CD1"]);
        store.insert(&a).await.unwrap();
        store.insert(&b).await.unwrap();

        let updated = store.set_fallback(b.id).await.unwrap();
        assert!(updated.is_fallback);

        let fallbacks = store.find_fallbacks().await.unwrap();
        assert_eq!(fallbacks.len(), 1);
        assert_eq!(fallbacks[0].id, b.id);
    }

    #[tokio::test]
    async fn test_set_fallback_unknown_id_keeps_existing() {
        let store = MemoryInstallerStore::new();
        let mut a = installer("A", &["AB1"]);
        a.is_fallback = true;
        store.insert(&a).await.unwrap();

        let err = store.set_fallback(InstallerId::new()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.find_fallbacks().await.unwrap()[0].id, a.id);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryInstallerStore::new();
        let err = store.update(&installer("A", &["AB1"])).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_orders_by_company_name() {
        let store = MemoryInstallerStore::new();
        store.insert(&installer("Zeta", &["Z1"])).await.unwrap();
        store.insert(&installer("Alpha", &["A1"])).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.company_name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }
}
