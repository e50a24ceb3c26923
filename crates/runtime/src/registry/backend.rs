use profile_core::{
    ApiVersion, CollectionId, InstalledMods, ModRegistry, ModSettingsReply, ObjectIndex,
    RegistryError, RegistrySnapshot,
};

/// Raw calls into the companion mod-management service.
///
/// Implementations do not gate on availability; [`super::RegistryLink`] does.
pub trait RegistryBackend: Send + Sync {
    fn api_version(&self) -> Result<ApiVersion, RegistryError>;

    fn effective_collection(&self, index: ObjectIndex)
    -> Result<Option<CollectionId>, RegistryError>;

    fn mod_settings(
        &self,
        collection: CollectionId,
        directory: &str,
        name: &str,
    ) -> Result<ModSettingsReply, RegistryError>;

    fn installed_mods(&self) -> Result<InstalledMods, RegistryError>;
}

impl RegistryBackend for RegistrySnapshot {
    fn api_version(&self) -> Result<ApiVersion, RegistryError> {
        self.probe_api_version()
    }

    fn effective_collection(
        &self,
        index: ObjectIndex,
    ) -> Result<Option<CollectionId>, RegistryError> {
        ModRegistry::effective_collection(self, index)
    }

    fn mod_settings(
        &self,
        collection: CollectionId,
        directory: &str,
        name: &str,
    ) -> Result<ModSettingsReply, RegistryError> {
        ModRegistry::mod_settings(self, collection, directory, name)
    }

    fn installed_mods(&self) -> Result<InstalledMods, RegistryError> {
        ModRegistry::installed_mods(self)
    }
}
