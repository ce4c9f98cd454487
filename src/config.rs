use crate::scheme::Scheme;

pub const DEFAULT_LAYER_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Scheme active before any explicit selection
    pub default_scheme: Scheme,
    /// Layer enumerations kept by the overlay; 0 is treated as 1
    pub layer_cache_capacity: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            default_scheme: Scheme::Quadtree,
            layer_cache_capacity: DEFAULT_LAYER_CACHE_CAPACITY,
        }
    }
}

impl OverlayConfig {
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.default_scheme = scheme;
        self
    }

    pub fn with_layer_cache_capacity(mut self, capacity: usize) -> Self {
        self.layer_cache_capacity = capacity;
        self
    }
}
