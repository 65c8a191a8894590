mod builder;
pub use builder::Builder;

use crate::engine::Engine;

use amalgam_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    schema::{ParamsFn, Registry},
    Result,
};

use std::sync::Arc;

/// Serves requests against logical resources.
///
/// Requests for a resource with a mapping set of the matching kind are
/// composed out of the resource's physical tables. Everything else goes to
/// the driver unchanged, under the resource's own name. A `Provider` is
/// itself a [`Driver`], so it can stand in wherever a single store is
/// expected.
///
/// Cloning is cheap; clones share the registry and the driver. Requests
/// carry their own working state, so any number of them can be in flight at
/// once.
#[derive(Clone)]
pub struct Provider {
    shared: Arc<Shared>,
}

struct Shared {
    engine: Engine,
    registry: Registry,

    /// Applied to every request before routing
    params_patch: Option<ParamsFn>,
}

impl Provider {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    /// Serves one request against `resource`.
    pub async fn serve(&self, resource: &str, op: impl Into<Operation>) -> Result<Response> {
        let mut op = op.into();
        if let Some(params_patch) = &self.shared.params_patch {
            op = params_patch(op);
        }

        let set = op
            .mapping_kind()
            .and_then(|kind| self.shared.registry.lookup(resource, kind));

        match set {
            Some(set) => {
                log::debug!("{} `{resource}`: composite", op.name());
                self.shared.engine.handle(set, op).await
            }
            None => {
                log::debug!("{} `{resource}`: passthrough", op.name());
                self.shared.engine.driver().exec(resource, op).await
            }
        }
    }
}

#[async_trait]
impl Driver for Provider {
    async fn exec(&self, table: &str, op: Operation) -> Result<Response> {
        self.serve(table, op).await
    }
}

impl core::fmt::Debug for Provider {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let resources: Vec<_> = self
            .shared
            .registry
            .resources()
            .map(|resource| resource.name.as_str())
            .collect();

        f.debug_struct("Provider")
            .field("resources", &resources)
            .field("driver", &self.shared.engine.driver())
            .finish()
    }
}
