//! Resolution of stored mod identifiers against the live registry.
//!
//! A mod condition stores whatever the user picked when authoring it: the
//! mod's directory name or its display name. Either may have changed since.
//! [`ModIdentityResolver`] tries the exact spellings first and falls back to
//! case-insensitive matches against the installed-mod listing. Every registry
//! call is wrapped on its own; a faulting call is logged and the next attempt
//! runs.
use std::cell::OnceCell;

use tracing::{debug, trace};

use crate::env::{CollectionId, InstalledMods, ModRegistry};

/// Outcome of resolving a mod identifier in a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModResolution {
    Enabled,
    Disabled,
    /// No attempt produced an answer; treated as not satisfied.
    Unknown,
}

impl ModResolution {
    fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

/// Resolves mod identifiers through one registry.
///
/// The installed-mod listing is fetched at most once per resolver; build a
/// fresh resolver for every evaluation.
pub struct ModIdentityResolver<'a, R: ModRegistry + ?Sized> {
    registry: &'a R,
    installed: OnceCell<Option<InstalledMods>>,
}

impl<'a, R: ModRegistry + ?Sized> ModIdentityResolver<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self {
            registry,
            installed: OnceCell::new(),
        }
    }

    /// Determines whether the mod named by `identifier` is enabled.
    ///
    /// Attempts, first answer wins:
    /// 1. `identifier` as directory;
    /// 2. `identifier` as display name;
    /// 3. case-insensitive directory match in the installed listing, queried by
    ///    actual directory, then by its display name;
    /// 4. case-insensitive display-name match, queried by directory and name.
    ///
    /// A case-insensitive match against more than one installed mod is
    /// ambiguous and skips that attempt.
    pub fn resolve_enabled(&self, collection: CollectionId, identifier: &str) -> ModResolution {
        if identifier.is_empty() {
            return ModResolution::Unknown;
        }

        let answer = self
            .query(collection, identifier, "")
            .or_else(|| self.query(collection, "", identifier))
            .or_else(|| self.by_directory(collection, identifier))
            .or_else(|| self.by_display_name(collection, identifier));

        match answer {
            Some(enabled) => ModResolution::from_enabled(enabled),
            None => {
                debug!(
                    target: "profile_core::resolver",
                    identifier,
                    %collection,
                    "mod identifier could not be resolved"
                );
                ModResolution::Unknown
            }
        }
    }

    fn by_directory(&self, collection: CollectionId, identifier: &str) -> Option<bool> {
        let installed = self.installed()?;
        let (directory, name) = unique_match(installed, identifier, |directory, _| directory)?;
        self.query(collection, directory, "")
            .or_else(|| self.query(collection, "", name))
    }

    fn by_display_name(&self, collection: CollectionId, identifier: &str) -> Option<bool> {
        let installed = self.installed()?;
        let (directory, name) = unique_match(installed, identifier, |_, name| name)?;
        self.query(collection, directory, name)
    }

    /// One settings query; `None` if it faulted or found nothing.
    fn query(&self, collection: CollectionId, directory: &str, name: &str) -> Option<bool> {
        match self.registry.mod_settings(collection, directory, name) {
            Ok(reply) => {
                let enabled = reply.enabled();
                if enabled.is_none() {
                    trace!(
                        target: "profile_core::resolver",
                        directory,
                        name,
                        status = %reply.status,
                        "mod settings query found nothing"
                    );
                }
                enabled
            }
            Err(error) => {
                debug!(
                    target: "profile_core::resolver",
                    directory,
                    name,
                    %error,
                    "mod settings query failed"
                );
                None
            }
        }
    }

    fn installed(&self) -> Option<&InstalledMods> {
        self.installed
            .get_or_init(|| match self.registry.installed_mods() {
                Ok(installed) => Some(installed),
                Err(error) => {
                    debug!(
                        target: "profile_core::resolver",
                        %error,
                        "installed mod listing failed"
                    );
                    None
                }
            })
            .as_ref()
    }
}

/// The single installed mod whose selected key equals `identifier` ignoring case.
fn unique_match<'m>(
    installed: &'m InstalledMods,
    identifier: &str,
    key: impl Fn(&'m str, &'m str) -> &'m str,
) -> Option<(&'m str, &'m str)> {
    let wanted = identifier.to_lowercase();
    let mut matches = installed
        .iter()
        .map(|(directory, name)| (directory.as_str(), name.as_str()))
        .filter(|&(directory, name)| key(directory, name).to_lowercase() == wanted);

    let first = matches.next()?;
    if matches.next().is_some() {
        debug!(
            target: "profile_core::resolver",
            identifier,
            "ambiguous case-insensitive mod match"
        );
        return None;
    }
    Some(first)
}
