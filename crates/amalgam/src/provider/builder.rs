use super::{Provider, Shared};
use crate::engine::Engine;

use amalgam_core::{
    driver::{Driver, Operation},
    schema::{ParamsFn, Registry, Resource},
    Result,
};

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Resources to register, in registration order
    resources: Vec<Resource>,

    params_patch: Option<ParamsFn>,
}

impl Builder {
    pub fn register(&mut self, resource: Resource) -> &mut Self {
        self.resources.push(resource);
        self
    }

    /// Registers every resource of a JSON configuration document.
    ///
    /// See [`Resource::from_json`] for the format.
    pub fn register_json(&mut self, json: &str) -> Result<&mut Self> {
        self.resources.extend(Resource::from_json(json)?);
        Ok(self)
    }

    /// Rewrites every request before it is routed, whether or not the
    /// resource has a mapping.
    pub fn params_patch(
        &mut self,
        f: impl Fn(Operation) -> Operation + Send + Sync + 'static,
    ) -> &mut Self {
        self.params_patch = Some(Arc::new(f));
        self
    }

    /// Verifies every registered resource and builds the provider.
    pub fn build(&mut self, driver: impl Driver) -> Result<Provider> {
        let mut registry = Registry::new();
        for resource in &self.resources {
            registry.register(resource.clone())?;
        }

        Ok(Provider {
            shared: Arc::new(Shared {
                engine: Engine::new(Arc::new(driver)),
                registry,
                params_patch: self.params_patch.clone(),
            }),
        })
    }
}
