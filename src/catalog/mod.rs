//! Immutable hull and module catalogs
//!
//! Catalog data is validated upstream (by the content pipeline) and consumed
//! here as read-only lookup tables. The engine never mutates a catalog.

pub mod hull;
pub mod module;

pub use hull::{BandBias, FrameClass, HullDefinition, HullId, HullTrait, SlotBudget};
pub use module::{
    Capability, ModuleDefinition, ModuleId, Rarity, SalvagePolicy, SecondaryTagPolicy,
    SlotCategory, SubsystemBonus,
};

use ahash::AHashMap;

use crate::core::error::{EngineError, Result};

/// Indexed hull and module definitions
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    hulls: AHashMap<HullId, HullDefinition>,
    modules: AHashMap<ModuleId, ModuleDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hull(&mut self, hull: HullDefinition) {
        self.hulls.insert(hull.id.clone(), hull);
    }

    pub fn add_module(&mut self, module: ModuleDefinition) {
        self.modules.insert(module.id.clone(), module);
    }

    pub fn hull(&self, id: &HullId) -> Result<&HullDefinition> {
        self.hulls
            .get(id)
            .ok_or_else(|| EngineError::UnknownHull(id.to_string()))
    }

    pub fn module(&self, id: &ModuleId) -> Result<&ModuleDefinition> {
        self.modules
            .get(id)
            .ok_or_else(|| EngineError::UnknownModule(id.to_string()))
    }

    pub fn hull_count(&self) -> usize {
        self.hulls.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}
