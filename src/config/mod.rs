pub mod traits;
pub mod evolution;
pub mod sampling;
pub mod rules;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{EvolutionConfig, SeedingMode};
pub use sampling::{BoundsPolicy, MutationConfig, SamplingConfig};
pub use rules::{RandomDesignRules, RuleBasedDesignRules, RulesConfig};
pub use traits::{ConfigManifest, ConfigSection, FieldManifest};
